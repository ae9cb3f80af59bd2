// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use tracing::debug;

use crate::configuration;
use crate::context::RunContext;
use crate::engine::Stage;
use crate::error::Result;

/// Builds the initial rows from the model configuration.
///
/// Locked loops chosen at random take their draws here, before any step.
/// Rows already in the state (shared by every run of a batch) are kept and
/// take no draws.
#[derive(Debug, Default)]
pub struct ConfigureStage;

impl Stage for ConfigureStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        ctx.config.validate()?;
        if !ctx.state.configuration.is_empty() {
            debug!("run {}: starting from the shared configuration", ctx.run);
            return Ok(());
        }
        let rows = configuration::build(
            ctx.config.topology,
            ctx.config.loops,
            &ctx.config.locked,
            ctx.draws.as_mut(),
        )?;
        debug!(
            "run {}: {} configuration with {} loops, {} rows",
            ctx.run,
            ctx.config.topology,
            ctx.config.loops,
            rows.len()
        );
        ctx.state.configuration = rows;
        Ok(())
    }

    fn name(&self) -> &str {
        "Configure"
    }
}
