// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pathgrid: interactive grid pathfinding (A* and Dijkstra) in the terminal.
//!
//! The [`board::Board`] owns the editable grid and the run/animation state machine, the
//! [`solver`] module answers searches (in-process or over HTTP) and [`tui`] draws it all.

pub mod anim;
pub mod board;
pub mod edit;
pub mod model;
pub mod run;
pub mod sizing;
pub mod solver;
pub mod tui;
pub mod ui;
