// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The tumble model: the active end repeatedly crosses one neighbouring loop,
//! left or right, above or below.

pub mod generate;
pub mod step;

pub use generate::{generate, generate_with};
pub use step::{step, Direction, Step};
