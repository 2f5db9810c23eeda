// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::coord::Coord;

/// The edit-time type of a cell. Animation overlays are tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CellType {
    #[default]
    Empty,
    Source,
    Target,
    Wall,
    Weight,
}

impl CellType {
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Source and target are singleton roles: at most one cell holds each.
    pub fn is_role(self) -> bool {
        matches!(self, Self::Source | Self::Target)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Source => "source",
            Self::Target => "target",
            Self::Wall => "wall",
            Self::Weight => "weight",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// View record of one grid position, as handed to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coord,
    pub cell_type: CellType,
    pub visited: bool,
    pub on_path: bool,
}

impl Cell {
    pub fn new(coord: Coord, cell_type: CellType) -> Self {
        Self { coord, cell_type, visited: false, on_path: false }
    }
}
