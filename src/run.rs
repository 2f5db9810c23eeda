// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Run configuration and validation.
//!
//! A [`RunConfig`] is rebuilt from the registry and the current [`RunSettings`] on every run
//! request and is never stored.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::{Coord, Dimensions, NodeRegistry};
use crate::solver::{Algorithm, SolveRequest};

pub const MIN_SPEED: u32 = 10;
pub const MAX_SPEED: u32 = 200;
pub const SPEED_STEP: i32 = 10;
pub const DEFAULT_SPEED: u32 = 50;
pub const MAX_WEIGHT_COST: u32 = 20;
pub const DEFAULT_WEIGHT_COST: u32 = 5;

/// User-adjustable search and animation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    speed: u32,
    weight_cost: u32,
    allow_diagonal: bool,
    algorithm: Algorithm,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            weight_cost: DEFAULT_WEIGHT_COST,
            allow_diagonal: true,
            algorithm: Algorithm::AStar,
        }
    }
}

impl RunSettings {
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn weight_cost(&self) -> u32 {
        self.weight_cost
    }

    pub fn allow_diagonal(&self) -> bool {
        self.allow_diagonal
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    pub fn set_weight_cost(&mut self, weight_cost: u32) {
        self.weight_cost = weight_cost.min(MAX_WEIGHT_COST);
    }

    pub fn set_allow_diagonal(&mut self, allow_diagonal: bool) {
        self.allow_diagonal = allow_diagonal;
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Moves the speed by `steps` increments of 10, clamped to `[10, 200]`.
    pub fn step_speed(&mut self, steps: i32) {
        let speed = i64::from(self.speed) + i64::from(steps) * i64::from(SPEED_STEP);
        self.speed = speed.clamp(i64::from(MIN_SPEED), i64::from(MAX_SPEED)) as u32;
    }

    /// Moves the weight cost by `delta`, clamped to `[0, 20]`.
    pub fn step_weight_cost(&mut self, delta: i32) {
        let cost = i64::from(self.weight_cost) + i64::from(delta);
        self.weight_cost = cost.clamp(0, i64::from(MAX_WEIGHT_COST)) as u32;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunValidationError {
    MissingSource,
    MissingTarget,
    SourceIsTarget,
}

impl fmt::Display for RunValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSource => f.write_str("Please set a source node before running."),
            Self::MissingTarget => f.write_str("Please set a target node before running."),
            Self::SourceIsTarget => f.write_str("Source and target cannot be the same."),
        }
    }
}

impl std::error::Error for RunValidationError {}

/// Everything a solver needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dimensions: Dimensions,
    pub source: Coord,
    pub target: Coord,
    pub walls: BTreeSet<Coord>,
    pub weights: BTreeSet<Coord>,
    pub weight_cost: u32,
    pub allow_diagonal: bool,
    pub algorithm: Algorithm,
}

impl RunConfig {
    /// Validates the registry and assembles a config, checking in order: source set, target
    /// set, source distinct from target (by value).
    pub fn assemble(
        dimensions: Dimensions,
        registry: &NodeRegistry,
        settings: &RunSettings,
    ) -> Result<Self, RunValidationError> {
        let source = registry.source().ok_or(RunValidationError::MissingSource)?;
        let target = registry.target().ok_or(RunValidationError::MissingTarget)?;
        if source == target {
            return Err(RunValidationError::SourceIsTarget);
        }

        Ok(Self {
            dimensions,
            source,
            target,
            walls: registry.walls().collect(),
            weights: registry.weights().collect(),
            weight_cost: settings.weight_cost(),
            allow_diagonal: settings.allow_diagonal(),
            algorithm: settings.algorithm(),
        })
    }

    pub fn to_request(&self) -> SolveRequest {
        SolveRequest {
            num_rows: self.dimensions.rows,
            num_cols: self.dimensions.cols,
            source: self.source,
            target: self.target,
            walls: self.walls.iter().copied().collect(),
            weights: self.weights.iter().copied().collect(),
            weight_cost: self.weight_cost,
            allow_diagonal: self.allow_diagonal,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{RunConfig, RunSettings, RunValidationError};
    use crate::model::{CellType, Coord, Dimensions, NodeRegistry};
    use crate::solver::Algorithm;

    #[test]
    fn scenario_request_carries_exactly_the_placements() {
        let mut registry = NodeRegistry::new();
        registry.assign(Coord::new(0, 0), CellType::Source);
        registry.assign(Coord::new(0, 5), CellType::Target);
        registry.assign(Coord::new(0, 3), CellType::Wall);
        registry.assign(Coord::new(0, 2), CellType::Wall);
        let mut settings = RunSettings::default();
        settings.set_weight_cost(5);
        settings.set_allow_diagonal(false);

        let config = RunConfig::assemble(Dimensions::new(30, 30), &registry, &settings)
            .expect("valid config");
        let value = serde_json::to_value(config.to_request()).expect("serialize");

        assert_eq!(
            value,
            serde_json::json!({
                "num_rows": 30,
                "num_cols": 30,
                "source": [0, 0],
                "target": [0, 5],
                "walls": [[0, 2], [0, 3]],
                "weights": [],
                "weightCost": 5,
                "allowDiagonal": false,
            })
        );
        assert_eq!(config.algorithm, Algorithm::AStar);
    }

    #[test]
    fn validation_short_circuits_in_order() {
        let mut registry = NodeRegistry::new();
        let settings = RunSettings::default();
        let dims = Dimensions::default();

        assert_eq!(
            RunConfig::assemble(dims, &registry, &settings),
            Err(RunValidationError::MissingSource)
        );
        registry.assign(Coord::new(1, 1), CellType::Target);
        assert_eq!(
            RunConfig::assemble(dims, &registry, &settings),
            Err(RunValidationError::MissingSource)
        );
        registry.assign(Coord::new(2, 2), CellType::Source);
        registry.clear(Coord::new(1, 1));
        assert_eq!(
            RunConfig::assemble(dims, &registry, &settings),
            Err(RunValidationError::MissingTarget)
        );
    }

    #[test]
    fn validation_messages() {
        assert_eq!(
            RunValidationError::MissingSource.to_string(),
            "Please set a source node before running."
        );
        assert_eq!(
            RunValidationError::MissingTarget.to_string(),
            "Please set a target node before running."
        );
        assert_eq!(
            RunValidationError::SourceIsTarget.to_string(),
            "Source and target cannot be the same."
        );
    }

    #[rstest]
    #[case(50, 1, 60)]
    #[case(50, -1, 40)]
    #[case(200, 1, 200)]
    #[case(10, -1, 10)]
    #[case(15, -1, 10)]
    fn speed_steps_and_clamps(#[case] start: u32, #[case] steps: i32, #[case] expected: u32) {
        let mut settings = RunSettings::default();
        settings.set_speed(start);
        settings.step_speed(steps);
        assert_eq!(settings.speed(), expected);
    }

    #[rstest]
    #[case(5, 1, 6)]
    #[case(0, -1, 0)]
    #[case(20, 1, 20)]
    fn weight_cost_steps_and_clamps(#[case] start: u32, #[case] delta: i32, #[case] expected: u32) {
        let mut settings = RunSettings::default();
        settings.set_weight_cost(start);
        settings.step_weight_cost(delta);
        assert_eq!(settings.weight_cost(), expected);
    }
}
