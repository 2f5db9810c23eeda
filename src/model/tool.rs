// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::cell::CellType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Source,
    Target,
    Wall,
    Weight,
    Erase,
    Run,
    Restart,
    Replay,
    Edit,
}

impl Tool {
    /// Tools that mutate the registry through clicks.
    pub fn is_editing(self) -> bool {
        matches!(self, Self::Source | Self::Target | Self::Wall | Self::Weight | Self::Erase)
    }

    /// The cell type an editing tool paints, if it paints one.
    pub fn paints(self) -> Option<CellType> {
        match self {
            Self::Source => Some(CellType::Source),
            Self::Target => Some(CellType::Target),
            Self::Wall => Some(CellType::Wall),
            Self::Weight => Some(CellType::Weight),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "Set Source",
            Self::Target => "Set Target",
            Self::Wall => "Add Walls",
            Self::Weight => "Add Weights",
            Self::Erase => "Erase Selection",
            Self::Run => "Run",
            Self::Restart => "Start Over",
            Self::Replay => "Replay Animation",
            Self::Edit => "Edit",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Holds the single active tool. `None` means no tool is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolRegister {
    active: Option<Tool>,
}

impl ToolRegister {
    pub fn active(&self) -> Option<Tool> {
        self.active
    }

    pub fn is_active(&self, tool: Tool) -> bool {
        self.active == Some(tool)
    }

    /// Selects `tool`, or deactivates it when it is already the active one.
    pub fn set_tool(&mut self, tool: Tool) -> Option<Tool> {
        self.active = if self.active == Some(tool) { None } else { Some(tool) };
        self.active
    }

    pub fn clear_tool(&mut self) {
        self.active = None;
    }
}
