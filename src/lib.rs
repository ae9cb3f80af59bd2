// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Terminal braid knotting model.
//!
//! A bundle of parallel loops has one free (active) end. The end tumbles
//! through the bundle, at each step crossing one neighbouring loop to the left
//! or right, above or below. The resulting braid is drawn as rows of
//! box-drawing glyphs, closed into a knot diagram, and read off as a closed
//! polygon in 3D whose invariants are computed by an external engine.
//!
//! # Architecture
//!
//! The core is pure and works on rows of cells:
//!
//! - [`configuration`]: initial rows (`raymer`, `peppino`, `twist`)
//! - [`tumble`]: one step of the active end, and a braid of many steps
//! - [`closure`]: nested arcs above and below the braid
//! - [`extract`]: the closed diagram as a [`geometry::SpaceCurve`]
//! - [`invariants`]: the engine seam
//!
//! Every random decision is a draw from a [`draws::Draws`] stream, so a run is
//! reproducible from its seed or from a recorded list of draws.
//!
//! Around the core, a run is a sequence of [`engine::Stage`]s over a
//! [`context::RunContext`]; [`stages`] builds the sequence for each mode and
//! [`batch`] runs many in parallel.
//!
//! # Example
//!
//! ```
//! use braid_knot::configuration::{build, LockedSpec, Topology};
//! use braid_knot::draws::ScriptedDraws;
//! use braid_knot::{close, extract, generate};
//!
//! let mut draws = ScriptedDraws::new([0.3, 0.2, 0.7]);
//! let start = build(Topology::Raymer, 2, &LockedSpec::None, &mut draws).unwrap();
//! let braid = generate(2, &start, 0.5, 0.5, &mut draws).unwrap();
//! assert_eq!(braid.len(), 5);
//! let knot = close(&braid).unwrap();
//! let curve = extract(&knot, 0.01).unwrap();
//! assert!(curve.len() > 12);
//! ```

pub mod batch;
pub mod closure;
pub mod config;
pub mod configuration;
pub mod context;
pub mod draws;
pub mod engine;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod invariants;
pub mod persist;
pub mod render;
pub mod stages;
pub mod state;
pub mod tumble;

// Re-export commonly used types
pub use closure::close;
pub use config::ModelConfig;
pub use context::RunContext;
pub use error::{Result, TumbleError};
pub use extract::{extract, extract_text};
pub use geometry::{Cell, Diagram, Point, Row, SpaceCurve};
pub use tumble::{generate, step};
