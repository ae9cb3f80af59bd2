// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::path::PathBuf;

use tracing::debug;

use crate::context::RunContext;
use crate::engine::Stage;
use crate::error::{Result, TumbleError};
use crate::persist::write_braid;
use crate::render::Renderer;
use crate::tumble::generate_with;

/// Tumbles the active end `moves` times, leaving the open braid in the state.
///
/// Every step is counted in the run statistics and, if a renderer is set,
/// displayed as it is produced.
#[derive(Debug, Default)]
pub struct GenerateStage {
    renderer: Option<Renderer>,
}

impl GenerateStage {
    pub fn new(renderer: Option<Renderer>) -> Self {
        GenerateStage { renderer }
    }
}

impl Stage for GenerateStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        if ctx.state.configuration.is_empty() {
            return Err(TumbleError::StageOrder {
                stage: "Generate",
                needs: "a configuration",
            });
        }
        let renderer = self.renderer.as_ref();
        if let Some(renderer) = renderer {
            renderer.rows(&ctx.state.configuration);
        }

        let statistics = &mut ctx.statistics;
        let braid = generate_with(
            ctx.config.moves,
            &ctx.state.configuration,
            ctx.config.p_right,
            ctx.config.p_above,
            ctx.draws.as_mut(),
            |step| {
                statistics.record_step(step);
                if let Some(renderer) = renderer {
                    renderer.step(step);
                }
            },
        )?;
        debug!("run {}: braid of {} rows", ctx.run, braid.len());
        ctx.state.braid = Some(braid);
        Ok(())
    }

    fn name(&self) -> &str {
        "Generate"
    }
}

/// Writes the open braid to one file.
#[derive(Debug)]
pub struct SaveBraidStage {
    path: PathBuf,
}

impl SaveBraidStage {
    pub fn new(path: PathBuf) -> Self {
        SaveBraidStage { path }
    }
}

impl Stage for SaveBraidStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        let braid = ctx.state.braid.as_ref().ok_or(TumbleError::StageOrder {
            stage: "SaveBraid",
            needs: "a braid",
        })?;
        write_braid(&self.path, braid)?;
        debug!("run {}: braid saved to {}", ctx.run, self.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "SaveBraid"
    }
}
