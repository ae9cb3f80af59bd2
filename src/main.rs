// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `tbkm`: tumble a loop bundle into a braid, close it, and analyze the knot.
//!
//! ```text
//! tbkm braid raymer -l 3 -m 20 -c random -d 0.05
//! tbkm analyze twist -l 4 -m 40 -e knot-invariants
//! tbkm model peppino -l 5 -m 60 -n 1000 -p results.csv -s -e knot-invariants
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use braid_knot::batch::{run_batch, BatchOptions};
use braid_knot::configuration::{LockedSpec, Topology};
use braid_knot::invariants::{CommandEngine, InvariantEngine, Unavailable};
use braid_knot::render::{ColorChoice, RenderConfig};
use braid_knot::stages::{build_pipeline, Mode, PipelineOptions};
use braid_knot::{ModelConfig, RunContext};

#[derive(Parser, Debug)]
#[command(name = "tbkm", version, about = "Terminal braid knotting model")]
struct Cli {
    /// What to produce: braid, knot, analyze or model
    select: Mode,

    /// Starting configuration: raymer, peppino or twist
    configuration: Topology,

    /// Number of loops in the bundle
    #[arg(short, long)]
    loops: usize,

    /// Number of randomly chosen loops the end never interacts with
    #[arg(short, long, conflicts_with = "spec_inactive")]
    inactive: Option<usize>,

    /// Loops (1-based) the end never interacts with
    #[arg(short = 'I', long, num_args = 1..)]
    spec_inactive: Vec<usize>,

    /// Probability of moving right when both directions are possible
    #[arg(short, long, default_value_t = 0.5)]
    right: f64,

    /// Probability of crossing above
    #[arg(short, long, default_value_t = 0.5)]
    above: f64,

    /// Number of moves of the active end
    #[arg(short, long)]
    moves: usize,

    /// Do not print braids or knots
    #[arg(short, long)]
    quiet: bool,

    /// Colour of the active end: a colour name, random or none
    #[arg(short, long, default_value = "none")]
    color: ColorChoice,

    /// Seconds to pause after each displayed move
    #[arg(short, long)]
    delay: Option<f64>,

    /// Braid file (braid, knot, analyze) or results CSV (model)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Number of runs in model mode
    #[arg(short = 'n', long)]
    runs: Option<u64>,

    /// In model mode, keep every braid next to the results file
    #[arg(short, long)]
    save_braids: bool,

    /// Base seed; run n uses seed + n
    #[arg(long)]
    seed: Option<u64>,

    /// Displacement of points at crossings
    #[arg(long, default_value_t = braid_knot::geometry::DEFAULT_JITTER)]
    jitter: f64,

    /// Program that computes knot invariants from a curve on stdin
    #[arg(short, long)]
    engine: Option<PathBuf>,

    /// Extra argument for the engine program (repeatable)
    #[arg(long = "engine-arg", requires = "engine")]
    engine_args: Vec<String>,
}

impl Cli {
    fn model_config(&self) -> ModelConfig {
        let locked = match (self.inactive, self.spec_inactive.is_empty()) {
            (Some(count), _) => LockedSpec::Count(count),
            (None, false) => LockedSpec::Indices(self.spec_inactive.clone()),
            (None, true) => LockedSpec::None,
        };
        let config = ModelConfig::new(self.configuration, self.loops, self.moves)
            .with_probabilities(self.right, self.above)
            .with_locked(locked)
            .with_jitter(self.jitter);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn render_config(&self) -> Result<RenderConfig> {
        let delay = match self.delay {
            Some(seconds) => Some(
                Duration::try_from_secs_f64(seconds)
                    .with_context(|| format!("invalid delay {}", seconds))?,
            ),
            None => None,
        };
        Ok(RenderConfig {
            color: self.color,
            delay,
            quiet: self.quiet,
        })
    }

    fn engine(&self) -> Option<Arc<dyn InvariantEngine>> {
        self.engine.as_ref().map(|program| {
            Arc::new(CommandEngine::new(program).with_args(self.engine_args.iter().cloned()))
                as Arc<dyn InvariantEngine>
        })
    }
}

fn run_single(cli: &Cli, config: ModelConfig) -> Result<()> {
    let engine = match (cli.engine(), cli.select.requires_engine()) {
        (Some(engine), _) => Some(engine),
        (None, true) => Some(Arc::new(Unavailable) as Arc<dyn InvariantEngine>),
        (None, false) => None,
    };
    if let (Some(engine), true) = (&engine, cli.select.requires_engine()) {
        engine.ensure_available()?;
    }
    let options = PipelineOptions {
        engine,
        braid_path: cli.path.clone(),
        renderer: Some(cli.render_config()?.renderer()),
    };
    let mut pipeline = build_pipeline(cli.select, &options);
    let mut ctx = RunContext::new(Arc::new(config), 0);
    pipeline
        .run(&mut ctx)
        .with_context(|| format!("{} run failed", cli.select))?;
    info!("statistics: {}", ctx.statistics);
    Ok(())
}

fn run_model(cli: &Cli, config: ModelConfig) -> Result<()> {
    let Some(runs) = cli.runs else {
        bail!("model mode needs --runs");
    };
    let engine = cli
        .engine()
        .unwrap_or_else(|| Arc::new(Unavailable) as Arc<dyn InvariantEngine>);
    let options = BatchOptions {
        runs,
        results_path: cli.path.clone(),
        save_braids: cli.save_braids,
    };
    let report = run_batch(&config, engine, &options).context("model run failed")?;
    if !cli.quiet {
        println!(
            "{} of {} runs analyzed in {:.1}s",
            report.completed(),
            runs,
            report.elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.model_config();
    config.validate().context("invalid model parameters")?;
    if cli.save_braids && cli.select != Mode::Model {
        bail!("--save-braids only applies to model mode; use --path to save a single braid");
    }
    match cli.select {
        Mode::Model => run_model(cli, config),
        Mode::Braid | Mode::Knot | Mode::Analyze => run_single(cli, config),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,braid_knot=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tbkm: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
