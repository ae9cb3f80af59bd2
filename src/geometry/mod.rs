// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Geometric types for braid and knot diagrams.
//!
//! - Cell: one glyph of the diagram grid
//! - Row: fixed-width sequence of cells
//! - Diagram: rows of one open braid or closed knot
//! - Point / SpaceCurve: the 3D encoding of a closed diagram

pub mod cell;
pub mod constants;
pub mod diagram;
pub mod point;
pub mod row;

pub use cell::{ArcCorner, Cell, TurnCorner};
pub use constants::*;
pub use diagram::{Diagram, DiagramKind};
pub use point::{Point, SpaceCurve};
pub use row::Row;
