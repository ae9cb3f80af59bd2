// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the run context, and can be incremented by counting
//! stages, or by additional methods. A batch merges the statistics of all its runs.

use std::fmt;

use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};

use crate::context::RunContext;
use crate::engine::Stage;
use crate::error::{ErrorKind, Result};
use crate::tumble::{Direction, Step};

#[derive(Debug, EnumCountMacro, EnumIter, Display, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Counters {
    RightMoves,
    LeftMoves,
    OverCrossings,
    UnderCrossings,
    ForcedMoves,
    RunsCompleted,
    RunsFailed,
}

const COUNT: usize = Counters::COUNT + ErrorKind::COUNT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; COUNT],
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics { stats: [0; COUNT] }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// A stage that will increment the given counter, whenever a condition holds (or always).
    pub fn counting_stage(
        counter: Counters,
        filter: Option<fn(&RunContext) -> bool>,
    ) -> Box<dyn Stage> {
        Box::new(CountingStage {
            filter: filter.unwrap_or(|_ctx| true),
            counter,
        })
    }

    /// Increment the specified counter by 1.
    pub fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Count the direction, sense and forcing of one step.
    pub fn record_step(&mut self, step: &Step) {
        self.increment(match step.direction {
            Direction::Right => Counters::RightMoves,
            Direction::Left => Counters::LeftMoves,
        });
        self.increment(if step.above {
            Counters::OverCrossings
        } else {
            Counters::UnderCrossings
        });
        if step.forced {
            self.increment(Counters::ForcedMoves);
        }
    }

    /// Count a failed run under its error kind.
    pub fn record_failure(&mut self, kind: ErrorKind) {
        self.increment(Counters::RunsFailed);
        self.stats[Counters::COUNT + kind as usize] += 1;
    }

    /// Failed runs of one kind.
    pub fn failures(&self, kind: ErrorKind) -> u64 {
        self.stats[Counters::COUNT + kind as usize]
    }

    /// Add `other` into `self`.
    pub fn merge(&mut self, other: &Statistics) {
        for (mine, theirs) in self.stats.iter_mut().zip(other.stats.iter()) {
            *mine += theirs;
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for counter in Counters::iter() {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{}={}", counter, self.get(counter))?;
        }
        for kind in ErrorKind::iter() {
            let n = self.failures(kind);
            if n > 0 {
                write!(f, ", {}Failures={}", kind, n)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct CountingStage {
    filter: fn(&RunContext) -> bool,
    counter: Counters,
}

impl Stage for CountingStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        if (self.filter)(ctx) {
            ctx.statistics.increment(self.counter);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "Count"
    }
}
