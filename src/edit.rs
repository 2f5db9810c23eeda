// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tool edits: turns `(active tool, clicked coordinate)` into registry mutations.

use crate::model::{CellType, Coord, NodeRegistry, Tool};

/// What a single click did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The tool does not edit cells.
    Ignored,
    /// Nothing changed (erasing an empty cell).
    Unchanged,
    Assigned { coord: Coord, cell_type: CellType, replaced: CellType },
    Cleared { coord: Coord, previous: CellType },
}

impl EditOutcome {
    pub fn changed(self) -> bool {
        matches!(self, Self::Assigned { .. } | Self::Cleared { .. })
    }
}

pub fn apply_edit(registry: &mut NodeRegistry, tool: Tool, coord: Coord) -> EditOutcome {
    let current = registry.get(coord);

    if tool == Tool::Erase {
        if current.is_empty() {
            return EditOutcome::Unchanged;
        }
        registry.clear(coord);
        return EditOutcome::Cleared { coord, previous: current };
    }

    let Some(cell_type) = tool.paints() else {
        return EditOutcome::Ignored;
    };

    // Painting the same type again is an undo for every painting tool.
    if current == cell_type {
        registry.clear(coord);
        return EditOutcome::Cleared { coord, previous: current };
    }

    if current.is_role() {
        registry.clear(coord);
    }
    if cell_type.is_role() {
        registry.clear_role(cell_type);
    }
    registry.assign(coord, cell_type);
    EditOutcome::Assigned { coord, cell_type, replaced: current }
}
