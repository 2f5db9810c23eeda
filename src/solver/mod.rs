// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Solver boundary: wire types, the [`Solver`] trait and its implementations.
//!
//! The board never searches by itself. It hands a [`SolveRequest`] to a solver, which is either
//! a remote HTTP service ([`HttpSolver`]) or the in-process search ([`LocalSolver`]). The same
//! search is exposed over HTTP by [`server`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Coord;

mod http;
pub mod search;
pub mod server;

pub use http::HttpSolver;
pub use search::LocalSolver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    #[default]
    AStar,
    Dijkstra,
}

impl Algorithm {
    /// Path segment of the solver operation for this algorithm.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Dijkstra => "dijkstra",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AStar => "A*",
            Self::Dijkstra => "Dijkstra's",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::AStar => Self::Dijkstra,
            Self::Dijkstra => Self::AStar,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown algorithm `{}` (expected astar or dijkstra)", self.0)
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            other => Err(ParseAlgorithmError(other.to_owned())),
        }
    }
}

/// Request body sent to `POST <base>/astar` and `POST <base>/dijkstra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub num_rows: usize,
    pub num_cols: usize,
    pub source: Coord,
    pub target: Coord,
    pub walls: Vec<Coord>,
    pub weights: Vec<Coord>,
    #[serde(rename = "weightCost")]
    pub weight_cost: u32,
    #[serde(rename = "allowDiagonal")]
    pub allow_diagonal: bool,
}

/// Solver response: exploration order, shortest path and costs.
///
/// `node_costs[i]` belongs to `visited[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub visited: Vec<Coord>,
    pub path: Vec<Coord>,
    pub node_costs: Vec<f64>,
    pub path_cost: f64,
    pub path_length: f64,
}

impl SearchResult {
    pub fn nodes_explored(&self) -> usize {
        self.visited.len()
    }

    pub fn found_path(&self) -> bool {
        !self.path.is_empty()
    }

    pub(crate) fn check_aligned(&self) -> Result<(), SolverError> {
        if self.node_costs.len() != self.visited.len() {
            return Err(SolverError::Malformed(format!(
                "node_costs has {} entries for {} visited cells",
                self.node_costs.len(),
                self.visited.len()
            )));
        }
        Ok(())
    }
}

/// Error body returned by the solver service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum SolverError {
    /// The request never produced a response (connection, timeout, client setup).
    Transport { endpoint: String, source: reqwest::Error },
    /// The service answered with a non-success status.
    Status { endpoint: String, status: u16, message: String },
    /// The response body was not a valid result.
    Decode { endpoint: String, source: reqwest::Error },
    /// The response decoded but is internally inconsistent.
    Malformed(String),
    /// The request itself cannot be solved (bad bounds, source equals target).
    Rejected(String),
    /// The solver task went away before reporting.
    Disconnected,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { endpoint, source } => {
                write!(f, "request to {endpoint} failed: {source}")
            }
            Self::Status { endpoint, status, message } => {
                write!(f, "{endpoint} answered {status}: {message}")
            }
            Self::Decode { endpoint, source } => {
                write!(f, "invalid response from {endpoint}: {source}")
            }
            Self::Malformed(message) => write!(f, "malformed search result: {message}"),
            Self::Rejected(message) => write!(f, "search rejected: {message}"),
            Self::Disconnected => f.write_str("solver stopped before returning a result"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport { source, .. } | Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Something that can answer a [`SolveRequest`].
///
/// Calls may block (network round trip); callers run them off the UI thread.
pub trait Solver: Send + Sync {
    fn solve(&self, algorithm: Algorithm, request: &SolveRequest)
        -> Result<SearchResult, SolverError>;
}
