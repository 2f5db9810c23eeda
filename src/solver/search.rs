// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process grid search (A* and Dijkstra).
//!
//! Walls block; entering a weighted cell costs `weight_cost`, any other cell costs 1; diagonal
//! moves (when allowed) cost `sqrt(2)` times that. The visited order is the order in which cells
//! are settled, with ties broken by insertion order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::f64::consts::SQRT_2;

use super::{Algorithm, SearchResult, SolveRequest, Solver, SolverError};
use crate::model::Coord;

const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Runs the search on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSolver;

impl Solver for LocalSolver {
    fn solve(
        &self,
        algorithm: Algorithm,
        request: &SolveRequest,
    ) -> Result<SearchResult, SolverError> {
        search(algorithm, request)
    }
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    coord: Coord,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the max-heap pops the lowest priority, then the oldest entry.
        other.priority.total_cmp(&self.priority).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct SearchGrid {
    rows: usize,
    cols: usize,
    blocked: HashSet<Coord>,
    weighted: HashSet<Coord>,
    weight_cost: f64,
    allow_diagonal: bool,
}

impl SearchGrid {
    fn from_request(request: &SolveRequest) -> Self {
        Self {
            rows: request.num_rows,
            cols: request.num_cols,
            blocked: request.walls.iter().copied().collect(),
            weighted: request.weights.iter().copied().collect(),
            weight_cost: f64::from(request.weight_cost),
            allow_diagonal: request.allow_diagonal,
        }
    }

    fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Coord, bool)> + '_ {
        let diagonal: &[(isize, isize)] = if self.allow_diagonal { &DIAGONAL } else { &[] };
        ORTHOGONAL
            .iter()
            .map(|delta| (delta, false))
            .chain(diagonal.iter().map(|delta| (delta, true)))
            .filter_map(move |(&(d_row, d_col), is_diagonal)| {
                let next = coord.offset(d_row, d_col)?;
                (next.within(self.rows, self.cols) && !self.blocked.contains(&next))
                    .then_some((next, is_diagonal))
            })
    }

    fn step_cost(&self, to: Coord, is_diagonal: bool) -> f64 {
        let weight = if self.weighted.contains(&to) { self.weight_cost } else { 1.0 };
        if is_diagonal {
            SQRT_2 * weight
        } else {
            weight
        }
    }
}

fn euclidean(a: Coord, b: Coord) -> f64 {
    let d_row = a.row() as f64 - b.row() as f64;
    let d_col = a.col() as f64 - b.col() as f64;
    (d_row * d_row + d_col * d_col).sqrt()
}

fn validate(request: &SolveRequest) -> Result<(), SolverError> {
    if request.num_rows == 0 || request.num_cols == 0 {
        return Err(SolverError::Rejected("grid must have at least one row and column".into()));
    }
    for (name, coord) in [("source", request.source), ("target", request.target)] {
        if !coord.within(request.num_rows, request.num_cols) {
            return Err(SolverError::Rejected(format!(
                "{name} {coord} is outside the {}x{} grid",
                request.num_rows, request.num_cols
            )));
        }
    }
    if request.source == request.target {
        return Err(SolverError::Rejected("source and target are the same cell".into()));
    }
    Ok(())
}

/// Searches `request` with `algorithm`.
///
/// Node costs are `f = g + h` for A* (Euclidean `h`) and `g` for Dijkstra. An unreachable
/// target yields an empty path with zero cost and length.
pub fn search(algorithm: Algorithm, request: &SolveRequest) -> Result<SearchResult, SolverError> {
    validate(request)?;
    let grid = SearchGrid::from_request(request);
    let target = request.target;
    let heuristic = |coord: Coord| match algorithm {
        Algorithm::AStar => euclidean(coord, target),
        Algorithm::Dijkstra => 0.0,
    };

    let mut frontier = BinaryHeap::new();
    let mut best_g = HashMap::<Coord, f64>::new();
    let mut parents = HashMap::<Coord, (Coord, bool)>::new();
    let mut settled = HashSet::<Coord>::new();
    let mut result = SearchResult::default();
    // A cell keeps the sequence number of its first push, so improving its cost never moves
    // it behind cells with the same priority that were discovered later.
    let mut first_seq = HashMap::<Coord, u64>::new();

    best_g.insert(request.source, 0.0);
    first_seq.insert(request.source, 0);
    frontier.push(FrontierEntry {
        priority: heuristic(request.source),
        seq: 0,
        coord: request.source,
    });

    while let Some(entry) = frontier.pop() {
        if !settled.insert(entry.coord) {
            continue;
        }
        result.visited.push(entry.coord);
        result.node_costs.push(entry.priority);

        if entry.coord == target {
            let (path, path_length) = reconstruct(&parents, request.source, target);
            result.path = path;
            result.path_length = path_length;
            result.path_cost = best_g.get(&target).copied().unwrap_or_default();
            return Ok(result);
        }

        let g = best_g.get(&entry.coord).copied().unwrap_or_default();
        for (next, is_diagonal) in grid.neighbors(entry.coord) {
            if settled.contains(&next) {
                continue;
            }
            let candidate = g + grid.step_cost(next, is_diagonal);
            if best_g.get(&next).is_some_and(|known| *known <= candidate) {
                continue;
            }
            best_g.insert(next, candidate);
            parents.insert(next, (entry.coord, is_diagonal));
            let next_seq = first_seq.len() as u64;
            let seq = *first_seq.entry(next).or_insert(next_seq);
            frontier.push(FrontierEntry { priority: candidate + heuristic(next), seq, coord: next });
        }
    }

    Ok(result)
}

fn reconstruct(
    parents: &HashMap<Coord, (Coord, bool)>,
    source: Coord,
    target: Coord,
) -> (Vec<Coord>, f64) {
    let mut path = vec![target];
    let mut length = 0.0;
    let mut current = target;
    while current != source {
        let Some(&(parent, is_diagonal)) = parents.get(&current) else {
            break;
        };
        length += if is_diagonal { SQRT_2 } else { 1.0 };
        path.push(parent);
        current = parent;
    }
    path.reverse();
    (path, length)
}
