// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Model parameters shared by every run.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::configuration::{LockedSpec, Topology};
use crate::error::{Result, TumbleError};
use crate::geometry::{DEFAULT_JITTER, DEFAULT_P_ABOVE, DEFAULT_P_RIGHT, MAX_JITTER};

/// Everything needed to generate one knot, apart from the random stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub topology: Topology,
    pub loops: usize,
    pub moves: usize,
    pub p_right: f64,
    pub p_above: f64,
    #[serde(default)]
    pub locked: LockedSpec,
    pub jitter: f64,
    /// Base seed. Run `n` uses `seed + n`; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ModelConfig {
    pub fn new(topology: Topology, loops: usize, moves: usize) -> Self {
        ModelConfig {
            topology,
            loops,
            moves,
            p_right: DEFAULT_P_RIGHT,
            p_above: DEFAULT_P_ABOVE,
            locked: LockedSpec::None,
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }

    pub fn with_probabilities(mut self, p_right: f64, p_above: f64) -> Self {
        self.p_right = p_right;
        self.p_above = p_above;
        self
    }

    pub fn with_locked(mut self, locked: LockedSpec) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject parameters that could never produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.loops == 0 {
            return Err(TumbleError::InvalidConfiguration(
                "at least one loop is required".to_string(),
            ));
        }
        for (name, p) in [("right", self.p_right), ("above", self.p_above)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TumbleError::InvalidConfiguration(format!(
                    "probability {} = {} is outside [0, 1]",
                    name, p
                )));
            }
        }
        if !(self.jitter > 0.0 && self.jitter < MAX_JITTER) {
            return Err(TumbleError::InvalidConfiguration(format!(
                "jitter {} must lie strictly between 0 and {}",
                self.jitter, MAX_JITTER
            )));
        }
        self.locked.validate(self.loops)
    }

    /// The random stream for run `run`.
    pub fn rng_for_run(&self, run: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(run)),
            None => StdRng::from_entropy(),
        }
    }

    /// The random stream for the starting rows shared by a batch: the one
    /// just before run 0's, so no run repeats its draws.
    pub fn configuration_rng(&self) -> StdRng {
        self.rng_for_run(u64::MAX)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig::new(Topology::Raymer, 3, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_is_valid() {
        ModelConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            ModelConfig::new(Topology::Raymer, 0, 5),
            ModelConfig::default().with_probabilities(1.5, 0.5),
            ModelConfig::default().with_probabilities(0.5, -0.1),
            ModelConfig::default().with_probabilities(f64::NAN, 0.5),
            ModelConfig::default().with_jitter(0.0),
            ModelConfig::default().with_jitter(0.5),
            ModelConfig::new(Topology::Twist, 2, 5).with_locked(LockedSpec::Count(3)),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(TumbleError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_probability_bounds_inclusive() {
        ModelConfig::default()
            .with_probabilities(0.0, 1.0)
            .validate()
            .unwrap();
    }

    #[test]
    fn test_seeded_runs_differ_and_repeat() {
        let config = ModelConfig::default().with_seed(11);
        let a: f64 = config.rng_for_run(0).gen();
        let b: f64 = config.rng_for_run(1).gen();
        let again: f64 = config.rng_for_run(0).gen();
        assert_ne!(a, b);
        assert_eq!(a, again);
    }

    #[test]
    fn test_configuration_rng_is_its_own_stream() {
        let config = ModelConfig::default().with_seed(10);
        let shared: f64 = config.configuration_rng().gen();
        assert_eq!(shared, config.configuration_rng().gen::<f64>());
        assert_eq!(shared, ModelConfig::default().with_seed(9).rng_for_run(0).gen::<f64>());
        assert_ne!(shared, config.rng_for_run(0).gen::<f64>());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = ModelConfig::new(Topology::Peppino, 4, 20)
            .with_locked(LockedSpec::Indices(vec![2]))
            .with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"peppino\""));
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
