// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Many analyzed runs of the same model.
//!
//! Every run starts from the same rows, built once from the base seed, so a
//! batch studies one bundle with one set of locked loops. Past that, runs are
//! independent: each has its own context and its own random stream (seeded
//! from the base seed plus the run index), so they execute in parallel and the
//! batch is reproducible for a given seed. Results and braids are written in
//! run order once every run has finished.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::configuration;
use crate::context::RunContext;
use crate::error::{Result, TumbleError};
use crate::geometry::Diagram;
use crate::invariants::{InvariantEngine, Invariants};
use crate::persist::{braid_dir_for, braid_file, write_braid, ResultsWriter};
use crate::stages::{build_pipeline, Mode, PipelineOptions};
use crate::state::statistics::{Counters, Statistics};

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub runs: u64,
    /// Results CSV. Also names the braid directory.
    pub results_path: Option<PathBuf>,
    /// Keep each run's braid as `<results path without extension>/<n>.txt`.
    pub save_braids: bool,
}

/// Outcome of one run.
#[derive(Debug)]
pub struct RunRecord {
    pub run: u64,
    pub outcome: Result<Invariants>,
    /// The open braid, kept when braids are saved.
    pub braid: Option<Diagram>,
}

#[derive(Debug)]
pub struct BatchReport {
    /// One record per run, in run order.
    pub records: Vec<RunRecord>,
    pub statistics: Statistics,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn completed(&self) -> u64 {
        self.statistics.get(Counters::RunsCompleted)
    }

    pub fn failed(&self) -> u64 {
        self.statistics.get(Counters::RunsFailed)
    }
}

/// Run the analyze pipeline `options.runs` times.
///
/// A missing engine stops the batch before anything is written, whether it is
/// found before the runs or by one of them. Any other failure is logged and
/// counted against its run; the batch carries on and the run has no row in
/// the results file.
pub fn run_batch(
    config: &ModelConfig,
    engine: Arc<dyn InvariantEngine>,
    options: &BatchOptions,
) -> Result<BatchReport> {
    config.validate()?;
    if options.runs == 0 {
        return Err(TumbleError::InvalidConfiguration(
            "a batch needs at least one run".to_string(),
        ));
    }
    if options.save_braids && options.results_path.is_none() {
        return Err(TumbleError::InvalidConfiguration(
            "saving braids needs a results path to name their directory".to_string(),
        ));
    }
    engine.ensure_available()?;

    let start_rows = configuration::build(
        config.topology,
        config.loops,
        &config.locked,
        &mut config.configuration_rng(),
    )?;
    debug!(
        "batch starts from a {} configuration with {} loops, {} rows",
        config.topology,
        config.loops,
        start_rows.len()
    );

    let pipeline_options = PipelineOptions {
        engine: Some(engine),
        ..PipelineOptions::default()
    };
    let config = Arc::new(config.clone());
    let start = Instant::now();

    let outcomes: Vec<(RunRecord, Statistics)> = (0..options.runs)
        .into_par_iter()
        .map(|run| {
            let mut ctx = RunContext::new(Arc::clone(&config), run);
            ctx.state.configuration = start_rows.clone();
            let mut pipeline = build_pipeline(Mode::Model, &pipeline_options);
            let outcome = pipeline.run(&mut ctx).and_then(|()| {
                ctx.state.invariants.take().ok_or(TumbleError::StageOrder {
                    stage: "Batch",
                    needs: "invariants",
                })
            });
            match &outcome {
                Ok(invariants) => debug!(
                    "run {}: crossing number {}",
                    run, invariants.crossing_number
                ),
                Err(err) => {
                    warn!("run {} failed: {}", run, err);
                    ctx.statistics.record_failure(err.kind());
                }
            }
            let braid = if options.save_braids {
                ctx.state.braid.take()
            } else {
                None
            };
            (
                RunRecord {
                    run,
                    outcome,
                    braid,
                },
                ctx.statistics,
            )
        })
        .collect();

    let mut statistics = Statistics::new();
    let mut records = Vec::with_capacity(outcomes.len());
    for (record, run_statistics) in outcomes {
        statistics.merge(&run_statistics);
        records.push(record);
    }

    if let Some(index) = records
        .iter()
        .position(|r| matches!(&r.outcome, Err(err) if err.is_missing_engine()))
    {
        if let Err(err) = records.swap_remove(index).outcome {
            return Err(err);
        }
    }

    if let Some(path) = &options.results_path {
        if options.save_braids {
            let dir = braid_dir_for(path);
            fs::create_dir_all(&dir)?;
            for record in &records {
                if let Some(braid) = &record.braid {
                    write_braid(&braid_file(&dir, record.run), braid)?;
                }
            }
            debug!("braids saved to {}", dir.display());
        }

        let mut writer = ResultsWriter::<File>::create(path)?;
        for record in &records {
            if let Ok(invariants) = &record.outcome {
                writer.write(invariants)?;
            }
        }
        writer.flush()?;
    }

    let report = BatchReport {
        records,
        statistics,
        elapsed: start.elapsed(),
    };
    info!(
        "{} runs completed, {} failed in {:.1}s",
        report.completed(),
        report.failed(),
        report.elapsed.as_secs_f64()
    );
    info!("statistics: {}", report.statistics);
    Ok(report)
}
