// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn toolbar_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let affordances = app.board.affordances();
    let active = app.board.active_tool();

    for (key, tool) in TOOL_KEYS {
        if !affordances.tool_available(tool) {
            continue;
        }
        if !spans.is_empty() {
            spans.push(Span::raw(" "));
        }
        let mut style = Style::default().fg(FOOTER_LABEL_COLOR);
        if active == Some(tool) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!("{key}"), help_key_style()));
        spans.push(Span::styled(format!(" {}", tool.label()), style));
    }

    let settings = app.board.settings();
    let mut entries = Vec::<Span<'static>>::new();
    if affordances.editing_enabled() {
        push_footer_entry(&mut entries, "ALGO", settings.algorithm().label());
        push_footer_entry(&mut entries, "DIAG", if settings.allow_diagonal() { "on" } else { "off" });
        push_footer_entry(&mut entries, "WEIGHT", &settings.weight_cost().to_string());
    }
    push_footer_entry(&mut entries, "SPEED", &settings.speed().to_string());
    push_footer_entry(
        &mut entries,
        "COSTS",
        if affordances.display_node_costs() { "on" } else { "off" },
    );

    spans.push(Span::styled("  ‖  ", Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.extend(entries);
    Line::from(spans)
}

fn stats_line(app: &App) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    let board = &app.board;

    if board.awaiting_solver() {
        push_footer_entry(&mut spans, "STATUS", "searching");
    } else if board.is_running() {
        push_footer_entry(&mut spans, "STATUS", "animating");
    }

    if board.affordances().stage() == RunStage::PostRun {
        if let Some(stats) = board.stats() {
            push_footer_entry(&mut spans, "ALGORITHM", stats.algorithm.label());
            push_footer_entry(&mut spans, "NODES EXPLORED", &stats.nodes_explored.to_string());
            push_footer_entry(&mut spans, "PATH COST", &format!("{:.2}", stats.path_cost));
            push_footer_entry(&mut spans, "PATH LENGTH", &format!("{:.2}", stats.path_length));
        }
    }

    let cursor = match board.cost_label(app.cursor) {
        Some(label) => format!("{} {label}", app.cursor),
        None => app.cursor.to_string(),
    };
    push_footer_entry(&mut spans, "CELL", &cursor);
    Line::from(spans)
}

fn footer_line(app: &App, now: Instant) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();
    push_footer_entry(&mut spans, "MOVE", "hjkl");
    push_footer_entry(&mut spans, "PAINT", "⏎");
    push_footer_entry(&mut spans, "HELP", "?");
    push_footer_entry(&mut spans, "QUIT", "q");
    if let Some(warning) = app.board.warning(now) {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(warning.to_owned(), app.theme.warning_style()));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let area = centered_rect(70, 80, area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = "arrows/hjkl".len();

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Tools ---", header_style)));
    lines.push(help_kv("1/2", "Set source / set target", key_col_width, key_style));
    lines.push(help_kv("3/4", "Add walls / add weights", key_col_width, key_style));
    lines.push(help_kv("5", "Erase selection", key_col_width, key_style));
    lines.push(help_kv("r", "Run the search", key_col_width, key_style));
    lines.push(help_kv("p", "Replay animation (after a run)", key_col_width, key_style));
    lines.push(help_kv("e", "Edit the grid again (after a run)", key_col_width, key_style));
    lines.push(help_kv("R", "Start over", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Grid ---", header_style)));
    lines.push(help_kv("arrows/hjkl", "Move the cursor", key_col_width, key_style));
    lines.push(help_kv("Enter/Space", "Apply the tool at the cursor", key_col_width, key_style));
    lines.push(help_kv("mouse", "Click or drag to apply the tool", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("--- Settings ---", header_style)));
    lines.push(help_kv("a", "Switch algorithm (A* / Dijkstra's)", key_col_width, key_style));
    lines.push(help_kv("d", "Toggle diagonal moves", key_col_width, key_style));
    lines.push(help_kv("[/]", "Weight cost down/up", key_col_width, key_style));
    lines.push(help_kv("-/+", "Animation speed down/up", key_col_width, key_style));
    lines.push(help_kv("c", "Show node costs", key_col_width, key_style));
    lines.push(Line::from(""));

    lines.push(help_kv("?/Esc", "Close help", key_col_width, key_style));
    lines.push(help_kv("q", "Quit", key_col_width, key_style));

    let help = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(help, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{}: ", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD),
    ));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}
