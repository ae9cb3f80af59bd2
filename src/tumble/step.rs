// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! A single tumble step: the active end crosses the nearest interactive loop.

use std::fmt;

use tracing::debug;

use crate::draws::Draws;
use crate::error::{Result, RowDefect, TumbleError};
use crate::geometry::{Cell, Row, TurnCorner};

/// Which way the active end moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Outcome of one step.
///
/// `crossing` records the move; `next` is the row the following step starts
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub crossing: Row,
    pub next: Row,
    pub direction: Direction,
    /// The end passed above the target loop.
    pub above: bool,
    /// Only one direction was available, so no direction draw was taken.
    pub forced: bool,
}

/// Move the active end of `prev` across its nearest interactive loop.
///
/// Draw order: the direction draw (skipped when forced), then the sense draw.
/// A draw `u` selects right when `u <= p_right` and above when `u <= p_above`.
pub fn step<D: Draws + ?Sized>(
    prev: &Row,
    p_right: f64,
    p_above: f64,
    draws: &mut D,
) -> Result<Step> {
    let end = prev.active_end()?;
    let cells = prev.cells();

    let left_target = cells[..end].iter().rposition(|&c| c == Cell::Loop);
    let right_target = cells[end + 1..]
        .iter()
        .position(|&c| c == Cell::Loop)
        .map(|offset| end + 1 + offset);

    let (direction, target, forced) = match (left_target, right_target) {
        (None, None) => {
            return Err(TumbleError::malformed(RowDefect::NoInteractiveLoop { end }));
        }
        (None, Some(right)) => (Direction::Right, right, true),
        (Some(left), None) => (Direction::Left, left, true),
        (Some(left), Some(right)) => {
            if draws.unit() <= p_right {
                (Direction::Right, right, false)
            } else {
                (Direction::Left, left, false)
            }
        }
    };
    let above = draws.unit() <= p_above;

    let mut crossing = prev.clone();
    let mut next = prev.clone();
    let span = match direction {
        Direction::Right => {
            let landing = target + 1;
            if landing >= prev.width() {
                return Err(TumbleError::malformed(RowDefect::LoopOnEdge { column: target }));
            }
            crossing[end] = Cell::Turn(TurnCorner::UpRight);
            crossing[landing] = Cell::Turn(TurnCorner::DownLeft);
            next[landing] = Cell::ActiveEnd;
            end + 1..landing
        }
        Direction::Left => {
            if target == 0 {
                return Err(TumbleError::malformed(RowDefect::LoopOnEdge { column: target }));
            }
            let landing = target - 1;
            crossing[end] = Cell::Turn(TurnCorner::UpLeft);
            crossing[landing] = Cell::Turn(TurnCorner::DownRight);
            next[landing] = Cell::ActiveEnd;
            target..end
        }
    };
    next[end] = Cell::Space;

    for column in span {
        let cell = crossing[column];
        if above || matches!(cell, Cell::Space | Cell::LockedLoop) {
            crossing[column] = Cell::Over;
        }
    }

    debug!(
        "step {} {} loop at column {}{}",
        direction,
        if above { "over" } else { "under" },
        target,
        if forced { " (forced)" } else { "" }
    );

    Ok(Step {
        crossing,
        next,
        direction,
        above,
        forced,
    })
}
