// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run context combining shared configuration and per-run state.
//!
//! The RunContext is the core data structure that combines:
//! - the model configuration, shared read-only between runs
//! - the random draw stream owned by this run
//! - the run state filled in by the stages
//! - statistics for this run
//!
//! Parallel batches give each run its own context over the same configuration.

use std::fmt;
use std::sync::Arc;

use crate::config::ModelConfig;
use crate::draws::Draws;
use crate::state::statistics::Statistics;
use crate::state::RunState;

pub struct RunContext {
    pub config: Arc<ModelConfig>,
    /// Index of this run within its batch (0 for a single run).
    pub run: u64,
    pub draws: Box<dyn Draws + Send>,
    pub state: RunState,
    pub statistics: Statistics,
}

impl RunContext {
    /// A context drawing from the configuration's stream for `run`.
    pub fn new(config: Arc<ModelConfig>, run: u64) -> Self {
        let draws = Box::new(config.rng_for_run(run));
        Self::with_draws(config, run, draws)
    }

    /// A context drawing from `draws`, for replays and tests.
    pub fn with_draws(config: Arc<ModelConfig>, run: u64, draws: Box<dyn Draws + Send>) -> Self {
        RunContext {
            config,
            run,
            draws,
            state: RunState::new(),
            statistics: Statistics::new(),
        }
    }
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("config", &self.config)
            .field("run", &self.run)
            .field("state", &self.state)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}
