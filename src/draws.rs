// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Random draw streams.
//!
//! Every random decision of a run is one uniform draw in `[0, 1)` taken from a
//! single sequential stream, in a fixed order: locked-loop selection while the
//! configuration is built, then per step the direction draw (only when the
//! direction is not forced) followed by the crossing-sense draw. Replaying the
//! same draws therefore replays the same run.

use std::collections::VecDeque;

use rand::Rng;

/// A sequential stream of uniform draws.
pub trait Draws {
    /// Next draw, uniform in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform index in `0..n`. `n` must be positive.
    fn index(&mut self, n: usize) -> usize {
        ((self.unit() * n as f64) as usize).min(n - 1)
    }
}

impl<R: Rng + ?Sized> Draws for R {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws.
///
/// # Panics
///
/// Panics when asked for more draws than it was given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        ScriptedDraws {
            values: values.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Draws for ScriptedDraws {
    fn unit(&mut self) -> f64 {
        let value = self
            .values
            .pop_front()
            .unwrap_or_else(|| panic!("scripted draws exhausted after {} draws", self.consumed));
        self.consumed += 1;
        value
    }
}

/// Records every draw taken from an inner stream, so a run can be replayed
/// with [`ScriptedDraws`].
#[derive(Debug, Clone)]
pub struct RecordingDraws<D> {
    inner: D,
    record: Vec<f64>,
}

impl<D: Draws> RecordingDraws<D> {
    pub fn new(inner: D) -> Self {
        RecordingDraws {
            inner,
            record: Vec::new(),
        }
    }

    pub fn record(&self) -> &[f64] {
        &self.record
    }

    /// A replay of everything drawn so far.
    pub fn replay(&self) -> ScriptedDraws {
        ScriptedDraws::new(self.record.iter().copied())
    }
}

impl<D: Draws> Draws for RecordingDraws<D> {
    fn unit(&mut self) -> f64 {
        let value = self.inner.unit();
        self.record.push(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scripted_draws_in_order() {
        let mut draws = ScriptedDraws::new([0.25, 0.75]);
        assert_eq!(draws.unit(), 0.25);
        assert_eq!(draws.consumed(), 1);
        assert_eq!(draws.unit(), 0.75);
        assert_eq!(draws.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "scripted draws exhausted")]
    fn test_scripted_draws_exhausted() {
        let mut draws = ScriptedDraws::new([]);
        draws.unit();
    }

    #[test]
    fn test_index_stays_in_range() {
        let mut draws = ScriptedDraws::new([0.0, 0.5, 0.999_999]);
        assert_eq!(draws.index(4), 0);
        assert_eq!(draws.index(4), 2);
        assert_eq!(draws.index(4), 3);
    }

    #[test]
    fn test_rng_draws_are_units() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_recording_replays_identically() {
        let mut recording = RecordingDraws::new(StdRng::seed_from_u64(7));
        let first: Vec<f64> = (0..5).map(|_| recording.unit()).collect();
        let mut replay = recording.replay();
        let second: Vec<f64> = (0..5).map(|_| replay.unit()).collect();
        assert_eq!(first, second);
    }
}
