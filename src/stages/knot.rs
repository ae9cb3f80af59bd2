// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::closure::close;
use crate::context::RunContext;
use crate::engine::Stage;
use crate::error::{Result, TumbleError};
use crate::extract::extract;
use crate::invariants::InvariantEngine;
use crate::render::Renderer;

/// Closes the braid into a knot diagram.
#[derive(Debug, Default)]
pub struct CloseStage {
    renderer: Option<Renderer>,
}

impl CloseStage {
    pub fn new(renderer: Option<Renderer>) -> Self {
        CloseStage { renderer }
    }
}

impl Stage for CloseStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        let braid = ctx.state.braid.as_ref().ok_or(TumbleError::StageOrder {
            stage: "Close",
            needs: "a braid",
        })?;
        let knot = close(braid)?;
        if let Some(renderer) = &self.renderer {
            renderer.diagram(&knot);
        }
        ctx.state.knot = Some(knot);
        Ok(())
    }

    fn name(&self) -> &str {
        "Close"
    }
}

/// Reads the knot diagram as a space curve.
#[derive(Debug, Default)]
pub struct ExtractStage;

impl Stage for ExtractStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        let knot = ctx.state.knot.as_ref().ok_or(TumbleError::StageOrder {
            stage: "Extract",
            needs: "a knot",
        })?;
        let curve = extract(knot, ctx.config.jitter)?;
        debug!(
            "run {}: curve of {} points, {} at crossings",
            ctx.run,
            curve.len(),
            curve.crossing_points()
        );
        ctx.state.curve = Some(curve);
        Ok(())
    }

    fn name(&self) -> &str {
        "Extract"
    }
}

/// Hands the curve to the invariant engine.
///
/// When `required` is false a missing engine (or a missing numeric backend)
/// is logged and the run carries on without invariants.
#[derive(Debug)]
pub struct AnalyzeStage {
    engine: Option<Arc<dyn InvariantEngine>>,
    required: bool,
    renderer: Option<Renderer>,
}

impl AnalyzeStage {
    pub fn required(engine: Option<Arc<dyn InvariantEngine>>) -> Self {
        AnalyzeStage {
            engine,
            required: true,
            renderer: None,
        }
    }

    pub fn optional(engine: Option<Arc<dyn InvariantEngine>>) -> Self {
        AnalyzeStage {
            engine,
            required: false,
            renderer: None,
        }
    }

    /// Print the invariants once computed.
    pub fn with_renderer(mut self, renderer: Option<Renderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

impl Stage for AnalyzeStage {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
        let curve = ctx.state.curve.as_ref().ok_or(TumbleError::StageOrder {
            stage: "Analyze",
            needs: "a space curve",
        })?;
        let answer = match &self.engine {
            Some(engine) => engine.analyze(curve),
            None => Err(TumbleError::MissingInvariantEngine(
                "no engine configured".to_string(),
            )),
        };
        match answer {
            Ok(invariants) => {
                debug!(
                    "run {}: crossing number {}",
                    ctx.run, invariants.crossing_number
                );
                if let Some(renderer) = &self.renderer {
                    renderer.invariants(&invariants);
                }
                ctx.state.invariants = Some(invariants);
                Ok(())
            }
            Err(err) if err.is_missing_engine() && !self.required => {
                warn!("run {}: analysis skipped: {}", ctx.run, err);
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn name(&self) -> &str {
        "Analyze"
    }
}
