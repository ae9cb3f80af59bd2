// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sequential run engine.
//!
//! A run is a fixed sequence of stages over one [`RunContext`]: build the
//! configuration, tumble, close, extract, analyze. The engine calls each stage
//! in turn and stops at the first error, remembering how many stages had
//! completed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use braid_knot::config::ModelConfig;
//! use braid_knot::configuration::Topology;
//! use braid_knot::context::RunContext;
//! use braid_knot::engine::EngineBuilder;
//! use braid_knot::stages::{ConfigureStage, GenerateStage};
//!
//! let config = Arc::new(ModelConfig::new(Topology::Raymer, 2, 4).with_seed(1));
//! let mut ctx = RunContext::new(config, 0);
//! let mut engine = EngineBuilder::new()
//!     .add(Box::new(ConfigureStage))
//!     .add(Box::new(GenerateStage::default()))
//!     .build();
//! engine.run(&mut ctx).unwrap();
//! assert_eq!(ctx.state.braid.unwrap().len(), 1 + 2 * 4);
//! ```

pub mod stage;

pub use stage::Stage;

use tracing::debug;

use crate::context::RunContext;
use crate::error::Result;

/// Runs stages in sequence.
#[derive(Debug, Default)]
pub struct RunEngine {
    stages: Vec<Box<dyn Stage>>,
    /// Statistics: stages completed by the last run.
    executed: usize,
}

impl RunEngine {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        RunEngine {
            stages,
            executed: 0,
        }
    }

    /// Run every stage against `ctx`, stopping at the first error.
    pub fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        self.executed = 0;
        for stage in self.stages.iter_mut() {
            debug!("run {}: stage {}", ctx.run, stage.name());
            stage.run(ctx)?;
            self.executed += 1;
        }
        Ok(())
    }

    /// Stages completed by the last call to [`RunEngine::run`].
    pub fn executed(&self) -> usize {
        self.executed
    }

    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

/// Assembles a [`RunEngine`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    stages: Vec<Box<dyn Stage>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        EngineBuilder::default()
    }

    pub fn add(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> RunEngine {
        RunEngine::new(self.stages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::draws::ScriptedDraws;
    use crate::error::TumbleError;
    use crate::state::statistics::{Counters, Statistics};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Succeed;

    impl Stage for Succeed {
        fn run(&mut self, _ctx: &mut RunContext) -> Result<()> {
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Fail;

    impl Stage for Fail {
        fn run(&mut self, _ctx: &mut RunContext) -> Result<()> {
            Err(TumbleError::Engine("always fails".to_string()))
        }
    }

    fn ctx() -> RunContext {
        RunContext::with_draws(
            Arc::new(ModelConfig::default()),
            0,
            Box::new(ScriptedDraws::default()),
        )
    }

    #[test]
    fn test_runs_every_stage() {
        let mut ctx = ctx();
        let mut engine = EngineBuilder::new()
            .add(Box::new(Succeed))
            .add(Statistics::counting_stage(Counters::RunsCompleted, None))
            .build();
        engine.run(&mut ctx).unwrap();
        assert_eq!(engine.executed(), 2);
        assert_eq!(ctx.statistics.get(Counters::RunsCompleted), 1);
    }

    #[test]
    fn test_stops_at_first_error() {
        let mut ctx = ctx();
        let mut engine = EngineBuilder::new()
            .add(Box::new(Succeed))
            .add(Box::new(Fail))
            .add(Statistics::counting_stage(Counters::RunsCompleted, None))
            .build();
        assert!(engine.run(&mut ctx).is_err());
        assert_eq!(engine.executed(), 1);
        assert_eq!(ctx.statistics.get(Counters::RunsCompleted), 0);
    }

    #[test]
    fn test_counting_filter() {
        let mut ctx = ctx();
        let mut engine = EngineBuilder::new()
            .add(Statistics::counting_stage(
                Counters::RunsCompleted,
                Some(|ctx: &RunContext| ctx.state.braid.is_some()),
            ))
            .build();
        engine.run(&mut ctx).unwrap();
        assert_eq!(ctx.statistics.get(Counters::RunsCompleted), 0);
    }

    #[test]
    fn test_stage_names() {
        let engine = EngineBuilder::new()
            .add(Box::new(Succeed))
            .add(Box::new(Fail))
            .build();
        assert_eq!(engine.stage_names(), vec!["Succeed", "Fail"]);
        assert_eq!(engine.len(), 2);
    }
}
