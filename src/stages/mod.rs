// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stages of a run, and the pipelines built from them.
//!
//! | Mode      | Stages                                                       |
//! |-----------|--------------------------------------------------------------|
//! | `braid`   | configure, generate, [save braid]                            |
//! | `knot`    | ... close, [extract, analyze if an engine is given]          |
//! | `analyze` | ... close, extract, analyze (engine required)                |
//! | `model`   | as `analyze`, once per run of a batch                        |
//!
//! Every pipeline ends by counting the run as completed.

pub mod configure;
pub mod generate;
pub mod knot;

pub use configure::ConfigureStage;
pub use generate::{GenerateStage, SaveBraidStage};
pub use knot::{AnalyzeStage, CloseStage, ExtractStage};

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::engine::{EngineBuilder, RunEngine};
use crate::invariants::InvariantEngine;
use crate::render::Renderer;
use crate::state::statistics::{Counters, Statistics};

/// What a single invocation produces.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Generate and show a braid.
    Braid,
    /// Braid, then close it into a knot.
    Knot,
    /// Knot, then compute its invariants.
    Analyze,
    /// Many analyzed runs, written to a results file.
    Model,
}

impl Mode {
    pub fn closes(self) -> bool {
        !matches!(self, Mode::Braid)
    }

    /// Whether the invariant engine must be usable.
    pub fn requires_engine(self) -> bool {
        matches!(self, Mode::Analyze | Mode::Model)
    }
}

/// Everything a pipeline needs beyond the model configuration.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub engine: Option<Arc<dyn InvariantEngine>>,
    /// Save the open braid here.
    pub braid_path: Option<PathBuf>,
    /// Display for this run; `None` runs silently.
    pub renderer: Option<Renderer>,
}

/// The stages for one run in `mode`.
pub fn build_pipeline(mode: Mode, options: &PipelineOptions) -> RunEngine {
    let renderer = options.renderer.clone();
    let analyze = match mode {
        Mode::Braid => None,
        Mode::Knot => options
            .engine
            .as_ref()
            .map(|engine| AnalyzeStage::optional(Some(Arc::clone(engine)))),
        Mode::Analyze | Mode::Model => Some(AnalyzeStage::required(options.engine.clone())),
    };

    let mut builder = EngineBuilder::new()
        .add(Box::new(ConfigureStage))
        .add(Box::new(GenerateStage::new(renderer.clone())));
    if let Some(path) = &options.braid_path {
        builder = builder.add(Box::new(SaveBraidStage::new(path.clone())));
    }
    if mode.closes() {
        builder = builder.add(Box::new(CloseStage::new(renderer.clone())));
    }
    if let Some(analyze) = analyze {
        builder = builder
            .add(Box::new(ExtractStage))
            .add(Box::new(analyze.with_renderer(renderer)));
    }
    builder
        .add(Statistics::counting_stage(Counters::RunsCompleted, None))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invariants::Unavailable;

    fn names(mode: Mode, options: &PipelineOptions) -> Vec<String> {
        build_pipeline(mode, options).stage_names()
    }

    #[test]
    fn test_braid_pipeline() {
        assert_eq!(
            names(Mode::Braid, &PipelineOptions::default()),
            vec!["Configure", "Generate", "Count"]
        );
    }

    #[test]
    fn test_knot_pipeline_without_engine() {
        assert_eq!(
            names(Mode::Knot, &PipelineOptions::default()),
            vec!["Configure", "Generate", "Close", "Count"]
        );
    }

    #[test]
    fn test_analyze_pipeline_with_save() {
        let options = PipelineOptions {
            engine: Some(Arc::new(Unavailable)),
            braid_path: Some("braid.txt".into()),
            renderer: None,
        };
        assert_eq!(
            names(Mode::Analyze, &options),
            vec!["Configure", "Generate", "SaveBraid", "Close", "Extract", "Analyze", "Count"]
        );
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("model".parse::<Mode>().unwrap(), Mode::Model);
        assert_eq!(Mode::Analyze.to_string(), "analyze");
        assert!(Mode::Model.requires_engine());
        assert!(!Mode::Knot.requires_engine());
    }
}
