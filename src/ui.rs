// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Run-stage affordances shared between the board and the chrome.
//!
//! The board decides what is enabled; the TUI only reads this state to decide what to draw.

use crate::model::Tool;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunStage {
    /// Editing tools and search settings are available.
    #[default]
    PreRun,
    /// A run was issued; only replay, edit and restart remain.
    PostRun,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Affordances {
    rev: u64,
    stage: RunStage,
    display_node_costs: bool,
}

impl Affordances {
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn editing_enabled(&self) -> bool {
        self.stage == RunStage::PreRun
    }

    pub fn display_node_costs(&self) -> bool {
        self.display_node_costs
    }

    /// Whether `tool` is offered in the current stage.
    pub fn tool_available(&self, tool: Tool) -> bool {
        match tool {
            Tool::Restart => true,
            Tool::Replay | Tool::Edit => self.stage == RunStage::PostRun,
            Tool::Source | Tool::Target | Tool::Wall | Tool::Weight | Tool::Erase | Tool::Run => {
                self.stage == RunStage::PreRun
            }
        }
    }

    pub fn set_stage(&mut self, stage: RunStage) {
        if self.stage == stage {
            return;
        }
        self.stage = stage;
        self.bump();
    }

    pub fn set_display_node_costs(&mut self, display: bool) {
        if self.display_node_costs == display {
            return;
        }
        self.display_node_costs = display;
        self.bump();
    }

    /// Back to pre-run with the node-cost overlay off.
    pub fn reset(&mut self) {
        self.set_stage(RunStage::PreRun);
        self.set_display_node_costs(false);
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}
