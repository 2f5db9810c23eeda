// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::cell::CellType;
use super::coord::Coord;

/// Authoritative sparse store of cell assignments.
///
/// Keys are coordinates, not grid positions, so entries survive any change of grid dimensions
/// until [`NodeRegistry::reconcile`] drops the ones that no longer fit. `Empty` is never stored.
/// At most one coordinate holds `Source` and at most one holds `Target`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRegistry {
    nodes: BTreeMap<Coord, CellType>,
    source: Option<Coord>,
    target: Option<Coord>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: Coord) -> CellType {
        self.nodes.get(&coord).copied().unwrap_or_default()
    }

    /// Assigns `cell_type` to `coord`, replacing whatever was there.
    ///
    /// Assigning a role moves it: any other holder of `Source` (or `Target`) is cleared first.
    /// Assigning `Empty` is the same as [`NodeRegistry::clear`].
    pub fn assign(&mut self, coord: Coord, cell_type: CellType) {
        if cell_type.is_empty() {
            self.clear(coord);
            return;
        }

        if let Some(previous_holder) = self.role_holder(cell_type) {
            if previous_holder != coord {
                self.clear(previous_holder);
            }
        }

        let previous = self.nodes.insert(coord, cell_type).unwrap_or_default();
        self.forget_role(previous, coord);
        match cell_type {
            CellType::Source => self.source = Some(coord),
            CellType::Target => self.target = Some(coord),
            _ => {}
        }
    }

    /// Removes the assignment at `coord`, returning what it held.
    pub fn clear(&mut self, coord: Coord) -> CellType {
        let previous = self.nodes.remove(&coord).unwrap_or_default();
        self.forget_role(previous, coord);
        previous
    }

    /// Clears whichever coordinate holds `role` (`Source` or `Target`).
    pub fn clear_role(&mut self, role: CellType) -> Option<Coord> {
        let holder = self.role_holder(role)?;
        self.clear(holder);
        Some(holder)
    }

    pub fn clear_all(&mut self) {
        self.nodes.clear();
        self.source = None;
        self.target = None;
    }

    /// Drops every entry outside `[0, max_rows) x [0, max_cols)`; returns how many were removed.
    pub fn reconcile(&mut self, max_rows: usize, max_cols: usize) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|coord, _| coord.within(max_rows, max_cols));
        if self.source.is_some_and(|coord| !coord.within(max_rows, max_cols)) {
            self.source = None;
        }
        if self.target.is_some_and(|coord| !coord.within(max_rows, max_cols)) {
            self.target = None;
        }
        before - self.nodes.len()
    }

    pub fn source(&self) -> Option<Coord> {
        self.source
    }

    pub fn target(&self) -> Option<Coord> {
        self.target
    }

    pub fn walls(&self) -> impl Iterator<Item = Coord> + '_ {
        self.of_type(CellType::Wall)
    }

    pub fn weights(&self) -> impl Iterator<Item = Coord> + '_ {
        self.of_type(CellType::Weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellType)> + '_ {
        self.nodes.iter().map(|(coord, cell_type)| (*coord, *cell_type))
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn of_type(&self, wanted: CellType) -> impl Iterator<Item = Coord> + '_ {
        self.nodes
            .iter()
            .filter(move |(_, cell_type)| **cell_type == wanted)
            .map(|(coord, _)| *coord)
    }

    fn role_holder(&self, role: CellType) -> Option<Coord> {
        match role {
            CellType::Source => self.source,
            CellType::Target => self.target,
            _ => None,
        }
    }

    fn forget_role(&mut self, previous: CellType, coord: Coord) {
        match previous {
            CellType::Source if self.source == Some(coord) => self.source = None,
            CellType::Target if self.target == Some(coord) => self.target = None,
            _ => {}
        }
    }
}
