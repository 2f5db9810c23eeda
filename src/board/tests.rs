// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::{Board, RunRequest, NOTHING_TO_REPLAY_MESSAGE, NO_PATH_MESSAGE, WARNING_TTL};
use crate::model::{CellType, Coord, Dimensions, Tool};
use crate::run::RunSettings;
use crate::sizing::Viewport;
use crate::solver::{search, Algorithm, SearchResult, SolverError};
use crate::ui::RunStage;

#[fixture]
fn board() -> Board {
    Board::default()
}

fn place(board: &mut Board, tool: Tool, coord: (usize, usize), now: Instant) {
    if board.active_tool() != Some(tool) {
        assert_eq!(board.select_tool(tool, now), None);
    }
    assert!(board.click(coord.into()), "click on {coord:?} with {tool} changed nothing");
}

fn run(board: &mut Board, now: Instant) -> RunRequest {
    board.select_tool(Tool::Run, now).expect("run request")
}

/// Solves `request` in-process and hands the answer back to the board.
fn solve_and_complete(board: &mut Board, request: RunRequest, now: Instant) {
    let result = search::search(request.config.algorithm, &request.config.to_request());
    board.complete_run(request.ticket, request.config.algorithm, result, now);
}

/// Ticks the board at every pending animation deadline until the animation is done.
fn play_out(board: &mut Board) -> Instant {
    let mut last = Instant::now();
    while let Some(due) = board.animator().next_due() {
        board.tick(due);
        last = due;
    }
    last
}

#[rstest]
fn run_without_source_warns_and_never_dispatches(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Target, (3, 3), t0);

    assert_eq!(board.select_tool(Tool::Run, t0), None);
    assert_eq!(board.warning(t0), Some("Please set a source node before running."));
    assert_eq!(board.active_tool(), None);
    assert!(!board.is_running());
    assert_eq!(board.affordances().stage(), RunStage::PreRun);

    board.tick(t0 + WARNING_TTL);
    assert_eq!(board.warning(t0 + WARNING_TTL), None);
}

#[rstest]
fn run_without_target_warns(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);

    assert_eq!(board.select_tool(Tool::Run, t0), None);
    assert_eq!(board.warning(t0), Some("Please set a target node before running."));
}

#[rstest]
fn full_run_animates_then_settles(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 5), t0);
    place(&mut board, Tool::Wall, (1, 1), t0);

    let request = run(&mut board, t0);
    assert!(board.is_running());
    assert_eq!(board.affordances().stage(), RunStage::PostRun);
    assert_eq!(board.active_tool(), Some(Tool::Run));
    assert_eq!(board.select_tool(Tool::Run, t0), None, "second run while one is outstanding");

    solve_and_complete(&mut board, request, t0);
    assert_eq!(board.active_tool(), None);
    assert!(board.is_running());

    play_out(&mut board);
    assert!(!board.is_running());

    let result = board.last_result().expect("result stored").clone();
    for coord in &result.visited {
        assert!(board.grid().get(*coord).expect("in bounds").visited);
    }
    for coord in &result.path {
        assert!(board.grid().get(*coord).expect("in bounds").on_path);
    }
    assert_eq!(board.grid().get(Coord::new(1, 1)).map(|c| c.cell_type), Some(CellType::Wall));

    let stats = board.stats().expect("stats");
    assert_eq!(stats.algorithm, Algorithm::AStar);
    assert_eq!(stats.path_length, 5.0);
    assert_eq!(stats.nodes_explored, result.visited.len());
}

#[rstest]
fn post_run_locks_editing_until_edit(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 2), t0);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);
    play_out(&mut board);

    assert_eq!(board.select_tool(Tool::Wall, t0), None);
    assert_eq!(board.active_tool(), None);
    assert!(!board.click(Coord::new(5, 5)));
    assert!(!board.toggle_diagonal());
    board.step_speed(1);
    assert_eq!(board.settings().speed(), 60);

    board.select_tool(Tool::Edit, t0);
    assert_eq!(board.affordances().stage(), RunStage::PreRun);
    assert!(board.grid().cells().iter().all(|cell| !cell.visited && !cell.on_path));
    assert_eq!(board.registry().source(), Some(Coord::new(0, 0)));
    assert!(board.last_result().is_some());

    place(&mut board, Tool::Wall, (5, 5), t0);
}

#[rstest]
fn empty_path_plays_sweep_then_warns(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 2), t0);
    let request = run(&mut board, t0);

    let result = SearchResult {
        visited: vec![Coord::new(0, 0), Coord::new(1, 0)],
        node_costs: vec![2.0, 3.0],
        ..SearchResult::default()
    };
    board.complete_run(request.ticket, Algorithm::Dijkstra, Ok(result), t0);

    let half = Duration::from_micros(75_500);
    board.tick(t0 + half);
    assert!(board.grid().get(Coord::new(1, 0)).expect("cell").visited);
    assert_eq!(board.warning(t0 + half), None);

    board.tick(t0 + half * 2);
    assert_eq!(board.warning(t0 + half * 2), Some(NO_PATH_MESSAGE));
    assert!(board.is_running());

    board.tick(t0 + half * 3);
    assert!(!board.is_running());
    assert!(board.grid().cells().iter().all(|cell| !cell.on_path));

    board.select_tool(Tool::Replay, t0 + half * 3);
    assert_eq!(board.warning(t0 + half * 3), Some(NOTHING_TO_REPLAY_MESSAGE));
}

#[rstest]
fn node_cost_labels_follow_the_toggle(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 3), t0);
    board.set_algorithm(Algorithm::Dijkstra);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);
    play_out(&mut board);

    assert_eq!(board.cost_label(Coord::new(0, 1)), None);
    board.toggle_display_node_costs();
    assert_eq!(board.cost_label(Coord::new(0, 1)).as_deref(), Some("1.0"));
    assert_eq!(board.cost_label(Coord::new(0, 3)).as_deref(), Some("3.0"));
    board.toggle_display_node_costs();
    board.toggle_display_node_costs();
    assert_eq!(board.cost_label(Coord::new(0, 1)).as_deref(), Some("1.0"), "hidden, not cleared");
}

#[rstest]
fn replay_reapplies_identical_marks(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (2, 2), t0);
    place(&mut board, Tool::Target, (6, 7), t0);
    place(&mut board, Tool::Weight, (3, 3), t0);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);
    let end = play_out(&mut board);
    let first = board.grid().clone();

    board.select_tool(Tool::Replay, end);
    assert!(board.is_running());
    assert!(board.grid().cells().iter().all(|cell| !cell.visited && !cell.on_path));
    play_out(&mut board);

    assert_eq!(board.grid(), &first);
}

#[rstest]
fn replay_mid_sweep_restarts_from_a_clean_grid(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (9, 9), t0);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);

    let mid = t0 + Duration::from_millis(400);
    board.tick(mid);
    assert!(board.is_running());
    assert!(board.grid().cells().iter().any(|cell| cell.visited));
    let generation = board.animator().generation();

    board.select_tool(Tool::Replay, mid);

    assert!(board.animator().generation() > generation);
    assert!(board.is_running());
    assert!(board.grid().cells().iter().all(|cell| !cell.visited && !cell.on_path));
    assert_eq!(board.animator().next_due(), Some(mid));

    play_out(&mut board);
    let replayed = board.grid().clone();

    // A clean second replay from the settled state yields the same marks.
    board.select_tool(Tool::Replay, mid + Duration::from_secs(60));
    play_out(&mut board);
    assert_eq!(board.grid(), &replayed);
    let result = board.last_result().expect("result").clone();
    assert!(result.visited.iter().all(|coord| board.grid().get(*coord).expect("cell").visited));
    assert!(result.path.iter().all(|coord| board.grid().get(*coord).expect("cell").on_path));
}

#[rstest]
fn replay_waits_for_an_outstanding_solve(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 3), t0);
    let _request = run(&mut board, t0);

    board.select_tool(Tool::Replay, t0);
    assert!(board.awaiting_solver());
    assert!(board.warning(t0).is_none());
}

#[rstest]
fn solver_failure_rolls_back_to_pre_run(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 2), t0);
    let request = run(&mut board, t0);

    board.complete_run(request.ticket, Algorithm::AStar, Err(SolverError::Disconnected), t0);

    assert!(!board.is_running());
    assert_eq!(board.affordances().stage(), RunStage::PreRun);
    assert_eq!(board.active_tool(), None);
    let warning = board.warning(t0).expect("warning");
    assert!(warning.starts_with("Search failed:"), "{warning}");
    assert!(board.last_result().is_none());
}

#[rstest]
fn restart_drops_the_outstanding_completion(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 2), t0);
    place(&mut board, Tool::Wall, (4, 4), t0);
    let request = run(&mut board, t0);

    board.select_tool(Tool::Restart, t0);
    assert!(board.registry().is_empty());
    assert!(!board.is_running());
    assert_eq!(board.affordances().stage(), RunStage::PreRun);

    solve_and_complete(&mut board, request, t0);
    assert!(board.last_result().is_none());
    assert!(board.animator().next_due().is_none());
    assert!(board.grid().cells().iter().all(|cell| !cell.visited));
}

#[rstest]
fn restart_mid_animation_leaves_a_clean_board(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (9, 9), t0);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);
    board.tick(t0 + Duration::from_millis(300));
    board.toggle_display_node_costs();

    board.select_tool(Tool::Restart, t0 + Duration::from_millis(300));
    play_out(&mut board);

    assert!(!board.affordances().display_node_costs());
    assert!(board.grid().cells().iter().all(|cell| {
        cell.cell_type == CellType::Empty && !cell.visited && !cell.on_path
    }));
    assert!(board.stats().is_none());
}

#[rstest]
fn shrinking_viewport_resets_roles_and_drops_outside_placements(mut board: Board) {
    let t0 = Instant::now();
    assert_eq!(board.dimensions(), Dimensions::new(30, 30));
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (25, 25), t0);
    place(&mut board, Tool::Wall, (2, 2), t0);
    place(&mut board, Tool::Wall, (28, 3), t0);

    board.resize(Viewport::new(40, 20));

    assert_eq!(board.dimensions(), Dimensions::new(20, 20));
    assert_eq!(board.registry().source(), None);
    assert_eq!(board.registry().target(), None);
    assert_eq!(board.registry().walls().collect::<Vec<_>>(), vec![Coord::new(2, 2)]);
    assert_eq!(board.active_tool(), None);
    assert_eq!(board.grid().cells().len(), 400);
}

#[rstest]
fn shrinking_after_a_run_forces_the_cost_overlay_off(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (1, 1), t0);
    place(&mut board, Tool::Target, (25, 25), t0);
    let request = run(&mut board, t0);
    solve_and_complete(&mut board, request, t0);
    play_out(&mut board);
    board.toggle_display_node_costs();
    assert!(board.affordances().display_node_costs());
    assert!(board.cost_label(Coord::new(1, 1)).is_some());
    assert_eq!(board.affordances().stage(), RunStage::PostRun);

    board.resize(Viewport::new(40, 20));

    assert!(!board.affordances().display_node_costs());
    assert_eq!(board.affordances().stage(), RunStage::PreRun);
    assert!(board.affordances().editing_enabled());
    assert_eq!(board.cost_label(Coord::new(1, 1)), None);
    assert!(board.stats().is_none());
    assert!(board.grid().cells().iter().all(|cell| !cell.visited && !cell.on_path));
}

#[rstest]
fn growing_viewport_keeps_everything(mut board: Board) {
    let t0 = Instant::now();
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (29, 29), t0);

    board.resize(Viewport::new(100, 40));

    assert_eq!(board.dimensions(), Dimensions::new(40, 50));
    assert_eq!(board.registry().source(), Some(Coord::new(0, 0)));
    assert_eq!(board.registry().target(), Some(Coord::new(29, 29)));
    assert_eq!(board.active_tool(), Some(Tool::Target));
}

#[rstest]
fn resize_outside_last_visited_invalidates_the_run(mut board: Board) {
    let t0 = Instant::now();
    let board_dims = Dimensions::new(30, 30);
    assert_eq!(board.dimensions(), board_dims);
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (0, 2), t0);
    let request = run(&mut board, t0);
    let result = SearchResult {
        visited: vec![Coord::new(0, 0), Coord::new(20, 20)],
        node_costs: vec![0.0, 0.0],
        ..SearchResult::default()
    };
    board.complete_run(request.ticket, Algorithm::AStar, Ok(result), t0);

    board.resize(Viewport::new(30, 15));

    assert!(!board.is_running());
    assert_eq!(board.affordances().stage(), RunStage::PreRun);
    assert!(board.registry().source().is_none());
    assert!(board.animator().last_visited().is_empty());
}

#[rstest]
#[case(Tool::Source, (1, 1))]
#[case(Tool::Wall, (4, 2))]
#[case(Tool::Weight, (0, 7))]
fn clicks_are_ignored_outside_the_grid_and_without_a_tool(
    mut board: Board,
    #[case] tool: Tool,
    #[case] inside: (usize, usize),
) {
    let t0 = Instant::now();
    assert!(!board.click(inside.into()), "no active tool");

    board.select_tool(tool, t0);
    assert!(!board.click(Coord::new(30, 0)));
    assert!(!board.click(Coord::new(0, 30)));
    assert!(board.click(inside.into()));
    assert!(board.click(inside.into()), "second click toggles off");
    assert!(board.registry().is_empty());
}

#[test]
fn settings_flow_into_the_request() {
    let t0 = Instant::now();
    let mut settings = RunSettings::default();
    settings.set_weight_cost(9);
    let mut board = Board::with_dimensions(Dimensions::new(15, 12), settings);
    place(&mut board, Tool::Source, (0, 0), t0);
    place(&mut board, Tool::Target, (14, 11), t0);
    assert!(board.toggle_diagonal());
    assert!(board.cycle_algorithm());
    assert!(board.step_weight_cost(-4));

    let request = run(&mut board, t0);
    let wire = request.config.to_request();

    assert_eq!((wire.num_rows, wire.num_cols), (15, 12));
    assert_eq!(wire.weight_cost, 5);
    assert!(!wire.allow_diagonal);
    assert_eq!(request.config.algorithm, Algorithm::Dijkstra);
}
