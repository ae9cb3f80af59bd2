// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stage trait for the run pipeline.
//!
//! The run engine works by running stages in sequence. Each stage reads what
//! earlier stages left in the [`RunContext`] and adds its own product.
//!
//! # Example
//!
//! ```
//! use braid_knot::context::RunContext;
//! use braid_knot::engine::Stage;
//! use braid_knot::error::Result;
//!
//! #[derive(Debug)]
//! struct Announce;
//!
//! impl Stage for Announce {
//!     fn run(&mut self, ctx: &mut RunContext) -> Result<()> {
//!         println!("run {}", ctx.run);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Announce"
//!     }
//! }
//! ```

use std::fmt::Debug;

use crate::context::RunContext;
use crate::error::Result;

/// One step of a run.
///
/// Returning an error ends the run; no later stage is called.
pub trait Stage: Debug + Send {
    fn run(&mut self, ctx: &mut RunContext) -> Result<()>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Stage")
    }
}
