// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid sizing policy.
//!
//! Derives the row/column count from the viewport the grid is drawn into and decides whether a
//! new size invalidates the current placements and run state.

use crate::model::{Coord, Dimensions, NodeRegistry};

const DEFAULT_CELL_WIDTH: u16 = 2;
const DEFAULT_CELL_HEIGHT: u16 = 1;
const MIN_ROWS: usize = 15;
const MIN_COLS: usize = 10;

/// Size of the drawable area reported by the terminal, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSizing {
    cell_width: u16,
    cell_height: u16,
    min_rows: usize,
    min_cols: usize,
}

impl Default for GridSizing {
    fn default() -> Self {
        Self {
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            min_rows: MIN_ROWS,
            min_cols: MIN_COLS,
        }
    }
}

/// Result of applying the policy to a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    pub dimensions: Dimensions,
    /// Some placement or visited coordinate falls outside `dimensions`.
    pub invalidates: bool,
}

impl GridSizing {
    pub fn cell_width(&self) -> u16 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u16 {
        self.cell_height
    }

    pub fn dimensions(&self, viewport: Viewport) -> Dimensions {
        let cols = usize::from(viewport.width / self.cell_width.max(1));
        let rows = usize::from(viewport.height / self.cell_height.max(1));
        Dimensions::new(rows.max(self.min_rows), cols.max(self.min_cols))
    }

    pub fn plan<'a>(
        &self,
        viewport: Viewport,
        registry: &NodeRegistry,
        last_visited: impl IntoIterator<Item = &'a Coord>,
    ) -> ResizePlan {
        let dimensions = self.dimensions(viewport);
        let invalidates = registry.coords().any(|coord| !dimensions.contains(coord))
            || last_visited.into_iter().any(|coord| !dimensions.contains(*coord));
        ResizePlan { dimensions, invalidates }
    }
}
