// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The board: one grid, one registry, at most one run in flight.
//!
//! Every user intent (tool selection, click, resize, settings change) goes through a [`Board`]
//! method. The board never talks to a solver itself: [`Board::request_run`] hands back a
//! [`RunRequest`] that the caller dispatches, and the answer comes back through
//! [`Board::complete_run`]. Time is passed in explicitly so the whole state machine can be driven
//! from tests.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::anim::{AnimationEvent, Animator};
use crate::edit::apply_edit;
use crate::model::{CellType, Coord, Dimensions, Grid, NodeRegistry, Overlay, Tool, ToolRegister};
use crate::run::{RunConfig, RunSettings};
use crate::sizing::{GridSizing, Viewport};
use crate::solver::{Algorithm, SearchResult, SolverError};
use crate::ui::{Affordances, RunStage};

pub const WARNING_TTL: Duration = Duration::from_secs(3);
pub const NO_PATH_MESSAGE: &str = "No path was found.";
pub const NOTHING_TO_REPLAY_MESSAGE: &str = "Nothing to replay yet.";

/// Identifies one dispatched run. Completions with any other ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunTicket(u64);

/// A validated run the caller must hand to a solver.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRequest {
    pub ticket: RunTicket,
    pub config: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub message: String,
    pub expires_at: Instant,
}

/// Summary of the last completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    pub algorithm: Algorithm,
    pub nodes_explored: usize,
    pub path_cost: f64,
    pub path_length: f64,
}

#[derive(Debug)]
pub struct Board {
    sizing: GridSizing,
    dimensions: Dimensions,
    registry: NodeRegistry,
    overlay: Overlay,
    grid: Grid,
    tools: ToolRegister,
    settings: RunSettings,
    animator: Animator,
    affordances: Affordances,
    next_ticket: u64,
    pending: Option<RunTicket>,
    last_result: Option<(Algorithm, SearchResult)>,
    cost_labels: BTreeMap<Coord, f64>,
    warning: Option<Warning>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(RunSettings::default())
    }
}

impl Board {
    pub fn new(settings: RunSettings) -> Self {
        Self::with_dimensions(Dimensions::default(), settings)
    }

    pub fn with_dimensions(dimensions: Dimensions, settings: RunSettings) -> Self {
        let registry = NodeRegistry::new();
        let overlay = Overlay::default();
        let grid = Grid::project(dimensions, &registry, &overlay);
        Self {
            sizing: GridSizing::default(),
            dimensions,
            registry,
            overlay,
            grid,
            tools: ToolRegister::default(),
            settings,
            animator: Animator::new(),
            affordances: Affordances::default(),
            next_ticket: 0,
            pending: None,
            last_result: None,
            cost_labels: BTreeMap::new(),
            warning: None,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn sizing(&self) -> &GridSizing {
        &self.sizing
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_tool(&self) -> Option<Tool> {
        self.tools.active()
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    pub fn affordances(&self) -> &Affordances {
        &self.affordances
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// A solver call is outstanding or an animation is playing.
    pub fn is_running(&self) -> bool {
        self.pending.is_some() || self.animator.is_running()
    }

    pub fn awaiting_solver(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref().map(|(_, result)| result)
    }

    pub fn stats(&self) -> Option<SearchStats> {
        self.last_result.as_ref().map(|(algorithm, result)| SearchStats {
            algorithm: *algorithm,
            nodes_explored: result.nodes_explored(),
            path_cost: result.path_cost,
            path_length: result.path_length,
        })
    }

    /// Node-cost label for a visited cell, when the overlay is switched on.
    pub fn cost_label(&self, coord: Coord) -> Option<String> {
        if !self.affordances.display_node_costs() {
            return None;
        }
        self.cost_labels.get(&coord).map(|cost| format!("{cost:.1}"))
    }

    /// The warning to show at `now`, if one is live.
    pub fn warning(&self, now: Instant) -> Option<&str> {
        self.warning
            .as_ref()
            .filter(|warning| warning.expires_at > now)
            .map(|warning| warning.message.as_str())
    }

    /// Earliest instant at which [`Board::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let warning = self.warning.as_ref().map(|warning| warning.expires_at);
        match (self.animator.next_due(), warning) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Handles a tool button. Returns a run to dispatch when `tool` is [`Tool::Run`] and
    /// validation passes.
    pub fn select_tool(&mut self, tool: Tool, now: Instant) -> Option<RunRequest> {
        match tool {
            Tool::Restart => {
                self.restart();
                None
            }
            Tool::Replay => {
                self.replay(now);
                None
            }
            Tool::Edit => {
                self.edit();
                None
            }
            Tool::Run => {
                if self.is_running() || !self.affordances.tool_available(Tool::Run) {
                    return None;
                }
                self.tools.set_tool(Tool::Run);
                self.request_run(now)
            }
            editing => {
                if self.is_running() || !self.affordances.tool_available(editing) {
                    return None;
                }
                self.tools.set_tool(editing);
                None
            }
        }
    }

    /// Applies the active tool to `coord`. Returns whether the registry changed.
    pub fn click(&mut self, coord: Coord) -> bool {
        if self.is_running() || !self.affordances.editing_enabled() {
            return false;
        }
        let Some(tool) = self.tools.active() else {
            return false;
        };
        if !self.dimensions.contains(coord) {
            return false;
        }

        let outcome = apply_edit(&mut self.registry, tool, coord);
        if !outcome.changed() {
            return false;
        }
        tracing::trace!(?outcome, "cell edited");
        self.regrid();
        true
    }

    /// Validates the registry and, if it is runnable, moves to post-run and returns the request.
    pub fn request_run(&mut self, now: Instant) -> Option<RunRequest> {
        if !self.tools.is_active(Tool::Run) || self.is_running() {
            return None;
        }

        let config = match RunConfig::assemble(self.dimensions, &self.registry, &self.settings) {
            Ok(config) => config,
            Err(err) => {
                self.warn(err.to_string(), now);
                self.tools.clear_tool();
                return None;
            }
        };

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = RunTicket(self.next_ticket);
        self.pending = Some(ticket);
        self.affordances.set_stage(RunStage::PostRun);
        tracing::info!(
            algorithm = config.algorithm.endpoint(),
            rows = config.dimensions.rows,
            cols = config.dimensions.cols,
            walls = config.walls.len(),
            weights = config.weights.len(),
            "run requested"
        );
        Some(RunRequest { ticket, config })
    }

    /// Delivers a solver answer. Stale tickets are ignored.
    pub fn complete_run(
        &mut self,
        ticket: RunTicket,
        algorithm: Algorithm,
        result: Result<SearchResult, SolverError>,
        now: Instant,
    ) {
        if self.pending != Some(ticket) {
            tracing::debug!(?ticket, "dropping stale run completion");
            return;
        }
        self.pending = None;
        self.tools.clear_tool();

        match result {
            Ok(result) => {
                tracing::info!(
                    visited = result.visited.len(),
                    path = result.path.len(),
                    path_cost = result.path_cost,
                    "run completed"
                );
                self.clear_marks();
                self.animator.start(
                    result.visited.clone(),
                    result.path.clone(),
                    self.settings.speed(),
                    now,
                );
                self.last_result = Some((algorithm, result));
            }
            Err(err) => {
                tracing::warn!(error = %err, "run failed");
                self.affordances.set_stage(RunStage::PreRun);
                self.warn(format!("Search failed: {err}"), now);
            }
        }
    }

    /// Applies every animation step due at `now`. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if self.warning.as_ref().is_some_and(|warning| warning.expires_at <= now) {
            self.warning = None;
            changed = true;
        }

        while let Some(event) = self.animator.poll(now) {
            changed = true;
            match event {
                AnimationEvent::Visited { index, coord } => {
                    self.overlay.mark_visited(coord);
                    self.grid.set_marks(coord, true, self.overlay.is_on_path(coord));
                    let cost = self
                        .last_result()
                        .and_then(|result| result.node_costs.get(index).copied());
                    if let Some(cost) = cost {
                        self.cost_labels.insert(coord, cost);
                    }
                }
                AnimationEvent::PathStarted { found } => {
                    if !found {
                        self.warn(NO_PATH_MESSAGE.to_owned(), now);
                    }
                }
                AnimationEvent::OnPath(coord) => {
                    self.overlay.mark_on_path(coord);
                    self.grid.set_marks(coord, self.overlay.is_visited(coord), true);
                }
                AnimationEvent::Settled => tracing::debug!("animation settled"),
            }
        }
        changed
    }

    /// Applies the sizing policy for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        let plan = self.sizing.plan(viewport, &self.registry, self.animator.last_visited());
        if plan.dimensions == self.dimensions && !plan.invalidates {
            return;
        }

        if plan.invalidates {
            tracing::debug!(
                rows = plan.dimensions.rows,
                cols = plan.dimensions.cols,
                "resize invalidates placements"
            );
            self.registry.clear_role(CellType::Source);
            self.registry.clear_role(CellType::Target);
            self.abandon_run();
        }
        let dropped = self.registry.reconcile(plan.dimensions.rows, plan.dimensions.cols);
        if dropped > 0 {
            tracing::debug!(dropped, "placements outside the grid removed");
        }
        self.dimensions = plan.dimensions;
        self.regrid();
    }

    /// Clears placements, marks, results and run state.
    pub fn restart(&mut self) {
        self.registry.clear_all();
        self.abandon_run();
        self.regrid();
    }

    /// Leaves post-run keeping placements. Marks are stripped and the animation stops.
    pub fn edit(&mut self) {
        if !self.affordances.tool_available(Tool::Edit) || self.awaiting_solver() {
            return;
        }
        self.animator.cancel();
        self.clear_marks();
        self.affordances.reset();
        self.tools.clear_tool();
    }

    /// Replays the last animation from the start, cutting off one that is still playing.
    pub fn replay(&mut self, now: Instant) {
        if !self.affordances.tool_available(Tool::Replay) || self.awaiting_solver() {
            return;
        }
        self.tools.clear_tool();
        if !self.animator.can_replay() {
            self.warn(NOTHING_TO_REPLAY_MESSAGE.to_owned(), now);
            return;
        }
        self.clear_marks();
        self.animator.replay(self.settings.speed(), now);
    }

    /// Strips visited and on-path flags from every cell; base types stay.
    pub fn clear_marks(&mut self) {
        self.strip_marks();
        self.regrid();
    }

    pub fn set_display_node_costs(&mut self, display: bool) {
        self.affordances.set_display_node_costs(display);
    }

    pub fn toggle_display_node_costs(&mut self) {
        let display = !self.affordances.display_node_costs();
        self.set_display_node_costs(display);
    }

    /// Animation speed stays adjustable in every stage. It applies from the next start.
    pub fn step_speed(&mut self, steps: i32) {
        self.settings.step_speed(steps);
    }

    pub fn step_weight_cost(&mut self, delta: i32) -> bool {
        self.adjust_settings(|settings| settings.step_weight_cost(delta))
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        self.adjust_settings(|settings| settings.set_algorithm(algorithm))
    }

    pub fn cycle_algorithm(&mut self) -> bool {
        let next = self.settings.algorithm().next();
        self.set_algorithm(next)
    }

    pub fn toggle_diagonal(&mut self) -> bool {
        self.adjust_settings(|settings| {
            let allow = !settings.allow_diagonal();
            settings.set_allow_diagonal(allow);
        })
    }

    fn adjust_settings(&mut self, adjust: impl FnOnce(&mut RunSettings)) -> bool {
        if !self.affordances.editing_enabled() || self.is_running() {
            return false;
        }
        adjust(&mut self.settings);
        true
    }

    fn warn(&mut self, message: String, now: Instant) {
        self.warning = Some(Warning { message, expires_at: now + WARNING_TTL });
    }

    /// Cancels everything run-related and returns to pre-run with no tool.
    fn abandon_run(&mut self) {
        self.pending = None;
        self.animator.reset();
        self.last_result = None;
        self.strip_marks();
        self.affordances.reset();
        self.tools.clear_tool();
    }

    fn strip_marks(&mut self) {
        self.overlay.clear();
        self.cost_labels.clear();
    }

    fn regrid(&mut self) {
        self.grid = Grid::project(self.dimensions, &self.registry, &self.overlay);
    }
}

#[cfg(test)]
mod tests;
