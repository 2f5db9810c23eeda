// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::cell::Cell;
use super::coord::Coord;
use super::registry::NodeRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn contains(self, coord: Coord) -> bool {
        coord.within(self.rows, self.cols)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(30, 30)
    }
}

/// Animation-only marks layered on top of the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlay {
    visited: BTreeSet<Coord>,
    on_path: BTreeSet<Coord>,
}

impl Overlay {
    pub fn mark_visited(&mut self, coord: Coord) -> bool {
        self.visited.insert(coord)
    }

    pub fn mark_on_path(&mut self, coord: Coord) -> bool {
        self.on_path.insert(coord)
    }

    pub fn is_visited(&self, coord: Coord) -> bool {
        self.visited.contains(&coord)
    }

    pub fn is_on_path(&self, coord: Coord) -> bool {
        self.on_path.contains(&coord)
    }

    pub fn visited(&self) -> &BTreeSet<Coord> {
        &self.visited
    }

    pub fn on_path(&self) -> &BTreeSet<Coord> {
        &self.on_path
    }

    pub fn clear(&mut self) {
        self.visited.clear();
        self.on_path.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.on_path.is_empty()
    }
}

/// Dense row-major view of the board, regenerated from the registry and overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn project(dimensions: Dimensions, registry: &NodeRegistry, overlay: &Overlay) -> Self {
        let mut cells = Vec::with_capacity(dimensions.rows * dimensions.cols);
        for row in 0..dimensions.rows {
            for col in 0..dimensions.cols {
                let coord = Coord::new(row, col);
                let mut cell = Cell::new(coord, registry.get(coord));
                cell.visited = overlay.is_visited(coord);
                cell.on_path = overlay.is_on_path(coord);
                cells.push(cell);
            }
        }
        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).map(|idx| &self.cells[idx])
    }

    /// Patches a single cell's overlay flags without a full projection.
    pub(crate) fn set_marks(&mut self, coord: Coord, visited: bool, on_path: bool) {
        if let Some(idx) = self.index_of(coord) {
            let cell = &mut self.cells[idx];
            cell.visited = visited;
            cell.on_path = on_path;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.dimensions.cols.max(1))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index_of(&self, coord: Coord) -> Option<usize> {
        self.dimensions.contains(coord).then(|| coord.row() * self.dimensions.cols + coord.col())
    }
}

#[cfg(test)]
mod tests {
    use super::{Dimensions, Grid, Overlay};
    use crate::model::{CellType, Coord, NodeRegistry};

    #[test]
    fn projection_combines_registry_and_overlay() {
        let mut registry = NodeRegistry::new();
        registry.assign(Coord::new(0, 1), CellType::Wall);
        registry.assign(Coord::new(2, 2), CellType::Source);
        let mut overlay = Overlay::default();
        overlay.mark_visited(Coord::new(2, 2));
        overlay.mark_on_path(Coord::new(2, 2));

        let grid = Grid::project(Dimensions::new(3, 4), &registry, &overlay);

        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.rows().count(), 3);
        let source = grid.get(Coord::new(2, 2)).expect("cell");
        assert_eq!(source.cell_type, CellType::Source);
        assert!(source.visited && source.on_path);
        assert_eq!(grid.get(Coord::new(0, 1)).map(|cell| cell.cell_type), Some(CellType::Wall));
        assert!(grid.get(Coord::new(3, 0)).is_none());
    }

    #[test]
    fn entries_outside_dimensions_are_not_projected() {
        let mut registry = NodeRegistry::new();
        registry.assign(Coord::new(9, 9), CellType::Weight);

        let grid = Grid::project(Dimensions::new(2, 2), &registry, &Overlay::default());

        assert!(grid.cells().iter().all(|cell| cell.cell_type == CellType::Empty));
        assert_eq!(registry.get(Coord::new(9, 9)), CellType::Weight);
    }

    #[test]
    fn set_marks_patches_one_cell() {
        let registry = NodeRegistry::new();
        let mut grid = Grid::project(Dimensions::new(2, 2), &registry, &Overlay::default());
        grid.set_marks(Coord::new(1, 0), true, false);

        assert!(grid.get(Coord::new(1, 0)).expect("cell").visited);
        assert_eq!(grid.cells().iter().filter(|cell| cell.visited).count(), 1);
    }
}
