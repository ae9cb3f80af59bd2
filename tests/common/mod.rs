// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use braid_knot::error::{Result, TumbleError};
use braid_knot::geometry::{Diagram, DiagramKind};
use braid_knot::invariants::{InvariantEngine, Invariants};
use braid_knot::SpaceCurve;

/// The closed diagram of a two-loop raymer braid with no moves.
pub const CLOSED_TWO_LOOPS: &str = concat!(
    " ┌───────┐ \n",
    " │ ┌───┐ │ \n",
    " │ │┌┐ │ │ \n",
    " │ │┃│ │ │ \n",
    " │ └┃┘ │ │ \n",
    " └──┃──┘ │ \n",
    "    └────┘ \n",
);

pub fn open(text: &str) -> Diagram {
    Diagram::parse(text, DiagramKind::Open).unwrap()
}

pub fn closed(text: &str) -> Diagram {
    Diagram::parse(text, DiagramKind::Closed).unwrap()
}

pub fn unknot() -> Invariants {
    Invariants {
        gauss_code: String::new(),
        crossing_number: 0,
        alexander_polynomial: "1".to_string(),
    }
}

/// Answers every curve with a crossing number equal to its point count.
#[derive(Debug, Default)]
pub struct CountingEngine {
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InvariantEngine for CountingEngine {
    fn analyze(&self, curve: &SpaceCurve) -> Result<Invariants> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Invariants {
            crossing_number: curve.len(),
            ..unknot()
        })
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Fails every second call with an engine error.
#[derive(Debug, Default)]
pub struct FlakyEngine {
    calls: AtomicUsize,
}

impl InvariantEngine for FlakyEngine {
    fn analyze(&self, _curve: &SpaceCurve) -> Result<Invariants> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
            Err(TumbleError::Engine("unusable answer".to_string()))
        } else {
            Ok(unknot())
        }
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Runs, but reports that its numeric backend is missing.
#[derive(Debug, Default)]
pub struct NoBackendEngine;

impl InvariantEngine for NoBackendEngine {
    fn analyze(&self, _curve: &SpaceCurve) -> Result<Invariants> {
        Err(TumbleError::MissingNumericDependency("sympy".to_string()))
    }

    fn name(&self) -> &str {
        "no-backend"
    }
}
