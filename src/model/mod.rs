// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The sparse [`NodeRegistry`] is the source of truth for placements; the dense [`Grid`] is
//! projected from it plus the animation [`Overlay`] and is never edited directly.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod registry;
pub mod tool;

pub use cell::{Cell, CellType};
pub use coord::Coord;
pub use grid::{Dimensions, Grid, Overlay};
pub use registry::NodeRegistry;
pub use tool::{Tool, ToolRegister};
