// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Per-run state.
//!
//! Each stage of a run fills in one slot and later stages read the slots
//! filled before them:
//! - configuration: the initial rows
//! - braid: the open diagram
//! - knot: the closed diagram
//! - curve: the extracted space curve
//! - invariants: the engine's answer, if analysis ran

pub mod statistics;

use crate::geometry::{Diagram, Row, SpaceCurve};
use crate::invariants::Invariants;

#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub configuration: Vec<Row>,
    pub braid: Option<Diagram>,
    pub knot: Option<Diagram>,
    pub curve: Option<SpaceCurve>,
    pub invariants: Option<Invariants>,
}

impl RunState {
    pub fn new() -> Self {
        RunState::default()
    }
}
