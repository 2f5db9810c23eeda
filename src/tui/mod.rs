// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Draws the board with ratatui, feeds keyboard and mouse input into it and ships run requests
//! to the solver on a tokio blocking task.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

use crate::board::{Board, RunRequest, RunTicket};
use crate::model::{Cell, CellType, Coord, Tool};
use crate::sizing::Viewport;
use crate::solver::{Algorithm, SearchResult, Solver, SolverError};
use crate::ui::RunStage;

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "pathgrid";
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Tool buttons in toolbar order with their keys.
const TOOL_KEYS: [(char, Tool); 9] = [
    ('1', Tool::Source),
    ('2', Tool::Target),
    ('3', Tool::Wall),
    ('4', Tool::Weight),
    ('5', Tool::Erase),
    ('r', Tool::Run),
    ('p', Tool::Replay),
    ('e', Tool::Edit),
    ('R', Tool::Restart),
];

/// Sends run requests to a [`Solver`] on the runtime's blocking pool.
#[derive(Clone)]
pub struct SolverDispatch {
    handle: Handle,
    solver: Arc<dyn Solver>,
}

impl SolverDispatch {
    pub fn new(handle: Handle, solver: Arc<dyn Solver>) -> Self {
        Self { handle, solver }
    }

    fn dispatch(&self, request: RunRequest) -> PendingRun {
        let (sender, receiver) = oneshot::channel();
        let solver = Arc::clone(&self.solver);
        let algorithm = request.config.algorithm;
        let wire = request.config.to_request();
        self.handle.spawn_blocking(move || {
            // The receiver is gone when the run was abandoned; nothing to report then.
            let _ = sender.send(solver.solve(algorithm, &wire));
        });
        PendingRun { ticket: request.ticket, algorithm, receiver }
    }
}

struct PendingRun {
    ticket: RunTicket,
    algorithm: Algorithm,
    receiver: oneshot::Receiver<Result<SearchResult, SolverError>>,
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(board: Board, dispatch: SolverDispatch) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(board, dispatch, theme);

    while !app.should_quit {
        let now = Instant::now();
        app.poll_solver(now);
        app.board.tick(now);
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // The next draw picks up the new size.
                Event::Resize(..) => {}
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);
    let (toolbar_area, grid_area, stats_area, status_area) =
        (layout[0], layout[1], layout[2], layout[3]);

    app.sync_viewport(grid_area);
    let now = Instant::now();

    frame.render_widget(Paragraph::new(toolbar_line(app)), toolbar_area);
    frame.render_widget(Paragraph::new(grid_text(app)), grid_area);
    frame.render_widget(Paragraph::new(stats_line(app)), stats_area);
    frame.render_widget(Paragraph::new(footer_line(app, now)), status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.show_help {
        render_help(frame, area);
    }
}

fn grid_text(app: &App) -> Text<'static> {
    let grid = app.board.grid();
    let lines = grid
        .rows()
        .map(|row| {
            let spans = row
                .iter()
                .map(|cell| {
                    let mut style = app.theme.cell_style(cell);
                    if cell.coord == app.cursor {
                        style = app.theme.cursor_style(style);
                    }
                    let label = app.board.cost_label(cell.coord);
                    Span::styled(cell_glyph(cell, label.as_deref()), style)
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

/// Two-column glyph for a cell.
fn cell_glyph(cell: &Cell, cost_label: Option<&str>) -> String {
    match cell.cell_type {
        CellType::Source => "S ".to_owned(),
        CellType::Target => "T ".to_owned(),
        CellType::Wall => "██".to_owned(),
        CellType::Weight => match cost_label {
            Some(label) if cell.visited => short_cost(label),
            _ => "◆ ".to_owned(),
        },
        CellType::Empty => match cost_label {
            Some(label) if cell.visited => short_cost(label),
            _ if cell.visited || cell.on_path => "  ".to_owned(),
            _ => "· ".to_owned(),
        },
    }
}

/// Integer part of a cost label, right-aligned in two columns.
fn short_cost(label: &str) -> String {
    let whole = label.split('.').next().unwrap_or(label);
    if whole.chars().count() > 2 {
        "++".to_owned()
    } else {
        format!("{whole:>2}")
    }
}

// Toolbar, stats, footer and help rendering helpers.
include!("chrome.rs");

struct App {
    board: Board,
    dispatch: SolverDispatch,
    pending: Option<PendingRun>,
    theme: TuiTheme,
    cursor: Coord,
    grid_area: Rect,
    viewport: Option<Viewport>,
    last_drag: Option<Coord>,
    show_help: bool,
    should_quit: bool,
}

impl App {
    fn new(board: Board, dispatch: SolverDispatch, theme: TuiTheme) -> Self {
        Self {
            board,
            dispatch,
            pending: None,
            theme,
            cursor: Coord::new(0, 0),
            grid_area: Rect::default(),
            viewport: None,
            last_drag: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// Applies the sizing policy when the grid area changed since the last frame.
    fn sync_viewport(&mut self, grid_area: Rect) {
        self.grid_area = grid_area;
        let viewport = Viewport::new(grid_area.width, grid_area.height);
        if self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        self.board.resize(viewport);
        let dims = self.board.dimensions();
        self.cursor = Coord::new(
            self.cursor.row().min(dims.rows.saturating_sub(1)),
            self.cursor.col().min(dims.cols.saturating_sub(1)),
        );
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        if self.pending.is_some() {
            return FRAME_INTERVAL;
        }
        match self.board.next_deadline() {
            Some(deadline) => deadline.saturating_duration_since(now).min(FRAME_INTERVAL),
            None => IDLE_INTERVAL,
        }
    }

    fn poll_solver(&mut self, now: Instant) {
        if !self.board.awaiting_solver() {
            // Restart or an invalidating resize abandoned the run.
            self.pending = None;
            return;
        }
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err(SolverError::Disconnected),
        };
        let (ticket, algorithm) = (pending.ticket, pending.algorithm);
        self.pending = None;
        self.board.complete_run(ticket, algorithm, result, now);
    }

    fn select_tool(&mut self, tool: Tool) {
        if let Some(request) = self.board.select_tool(tool, Instant::now()) {
            self.pending = Some(self.dispatch.dispatch(request));
        }
    }

    fn click_cursor(&mut self) {
        self.board.click(self.cursor);
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let dims = self.board.dimensions();
        if let Some(next) = self.cursor.offset(d_row, d_col).filter(|next| dims.contains(*next)) {
            self.cursor = next;
        }
    }

    /// Grid coordinate under a terminal position, if it lands on a drawn cell.
    fn cell_at(&self, column: u16, row: u16) -> Option<Coord> {
        let area = self.grid_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let sizing = self.board.sizing();
        let coord = Coord::new(
            usize::from((row - area.y) / sizing.cell_height().max(1)),
            usize::from((column - area.x) / sizing.cell_width().max(1)),
        );
        self.board.dimensions().contains(coord).then_some(coord)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(coord) = self.cell_at(mouse.column, mouse.row) else {
                    return;
                };
                self.cursor = coord;
                self.last_drag = Some(coord);
                self.board.click(coord);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(coord) = self.cell_at(mouse.column, mouse.row) else {
                    return;
                };
                if self.last_drag == Some(coord) {
                    return;
                }
                self.cursor = coord;
                self.last_drag = Some(coord);
                self.board.click(coord);
            }
            MouseEventKind::Up(MouseButton::Left) => self.last_drag = None,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if let KeyCode::Char(ch) = code {
            if let Some((_, tool)) = TOOL_KEYS.iter().find(|(key, _)| *key == ch) {
                self.select_tool(*tool);
                return false;
            }
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('a') => {
                self.board.cycle_algorithm();
            }
            KeyCode::Char('d') => {
                self.board.toggle_diagonal();
            }
            KeyCode::Char(']') => {
                self.board.step_weight_cost(1);
            }
            KeyCode::Char('[') => {
                self.board.step_weight_cost(-1);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.board.step_speed(1),
            KeyCode::Char('-') => self.board.step_speed(-1),
            KeyCode::Char('c') => self.board.toggle_display_node_costs(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.click_cursor(),
            _ => {}
        }

        false
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}
