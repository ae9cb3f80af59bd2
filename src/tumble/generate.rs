// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Iterating the tumble step to grow an open braid diagram.

use tracing::trace;

use crate::draws::Draws;
use crate::error::{Result, TumbleError};
use crate::geometry::{Diagram, Row};
use crate::tumble::step::{step, Step};

/// Grow an open diagram from `initial` by `steps` tumble steps.
///
/// The result holds the initial rows, then a crossing row and a continuation
/// row per step: `initial.len() + 2 * steps` rows in all.
pub fn generate<D: Draws + ?Sized>(
    steps: usize,
    initial: &[Row],
    p_right: f64,
    p_above: f64,
    draws: &mut D,
) -> Result<Diagram> {
    generate_with(steps, initial, p_right, p_above, draws, |_| {})
}

/// As [`generate`], calling `observer` after every step.
pub fn generate_with<D, F>(
    steps: usize,
    initial: &[Row],
    p_right: f64,
    p_above: f64,
    draws: &mut D,
    mut observer: F,
) -> Result<Diagram>
where
    D: Draws + ?Sized,
    F: FnMut(&Step),
{
    let Some(last) = initial.last() else {
        return Err(TumbleError::InvalidConfiguration(
            "initial configuration has no rows".to_string(),
        ));
    };
    let mut current = last.clone();
    let mut rows = Vec::with_capacity(initial.len() + 2 * steps);
    rows.extend_from_slice(initial);

    for index in 0..steps {
        let step = step(&current, p_right, p_above, draws)?;
        trace!("row {}: {}", index, step.crossing);
        observer(&step);
        rows.push(step.crossing);
        rows.push(step.next.clone());
        current = step.next;
    }

    Ok(Diagram::open(rows))
}
