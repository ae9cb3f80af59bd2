// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for building, tumbling, closing and analysing braids.

use std::fmt;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TumbleError>;

/// What is wrong with a row handed to the step engine or the parsers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowDefect {
    /// Row has no active end.
    MissingActiveEnd,

    /// Row has more than one active end.
    DuplicateActiveEnd { count: usize },

    /// Active end has no interactive loop on either side, so it cannot move.
    NoInteractiveLoop { end: usize },

    /// Target loop sits on the edge of the row, leaving no column beyond it.
    LoopOnEdge { column: usize },

    /// Character that is not part of the glyph set.
    UnknownGlyph { glyph: char, column: usize },

    /// Row width differs from the rest of its diagram.
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Row or diagram with no cells at all.
    Empty,
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowDefect::MissingActiveEnd => write!(f, "no active end"),
            RowDefect::DuplicateActiveEnd { count } => {
                write!(f, "{} active ends (expected exactly one)", count)
            }
            RowDefect::NoInteractiveLoop { end } => {
                write!(
                    f,
                    "active end at column {} has no interactive loop on either side",
                    end
                )
            }
            RowDefect::LoopOnEdge { column } => {
                write!(f, "target loop at column {} has no room beyond it", column)
            }
            RowDefect::UnknownGlyph { glyph, column } => {
                write!(f, "unknown glyph {:?} at column {}", glyph, column)
            }
            RowDefect::WidthMismatch {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "row {} has width {} but the diagram width is {}",
                    row, found, expected
                )
            }
            RowDefect::Empty => write!(f, "empty row"),
        }
    }
}

/// Errors raised by the model.
#[derive(Debug, Error)]
pub enum TumbleError {
    /// Bad model parameters, detected before any row is built.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A row violates the step engine's preconditions.
    #[error("malformed row: {defect}")]
    MalformedRow { defect: RowDefect },

    /// Closure (or extraction of a closed diagram) could not find its anchor.
    #[error("closure failed: {0}")]
    ClosureError(String),

    /// A stage ran before the stage that produces its input.
    #[error("stage {stage} needs {needs}, which no earlier stage produced")]
    StageOrder {
        stage: &'static str,
        needs: &'static str,
    },

    #[error("no invariant engine available: {0}")]
    MissingInvariantEngine(String),

    #[error("invariant engine is missing a numeric dependency: {0}")]
    MissingNumericDependency(String),

    /// The engine ran but its answer was unusable.
    #[error("invariant engine failed: {0}")]
    Engine(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TumbleError {
    pub fn malformed(defect: RowDefect) -> Self {
        TumbleError::MalformedRow { defect }
    }

    /// Coarse classification, used for failure statistics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TumbleError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            TumbleError::MalformedRow { .. } => ErrorKind::MalformedRow,
            TumbleError::ClosureError(_) => ErrorKind::Closure,
            TumbleError::StageOrder { .. } => ErrorKind::Pipeline,
            TumbleError::MissingInvariantEngine(_) => ErrorKind::MissingInvariantEngine,
            TumbleError::MissingNumericDependency(_) => ErrorKind::MissingNumericDependency,
            TumbleError::Engine(_) | TumbleError::Json(_) => ErrorKind::Engine,
            TumbleError::Io(_) | TumbleError::Csv(_) => ErrorKind::Io,
        }
    }

    /// True for the two "engine not usable" conditions.
    pub fn is_missing_engine(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::MissingInvariantEngine | ErrorKind::MissingNumericDependency
        )
    }
}

/// Classification of [`TumbleError`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCountMacro)]
#[repr(u8)]
pub enum ErrorKind {
    InvalidConfiguration,
    MalformedRow,
    Closure,
    Pipeline,
    MissingInvariantEngine,
    MissingNumericDependency,
    Engine,
    Io,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defect_messages() {
        let err = TumbleError::malformed(RowDefect::DuplicateActiveEnd { count: 2 });
        assert_eq!(
            err.to_string(),
            "malformed row: 2 active ends (expected exactly one)"
        );
        assert_eq!(err.kind(), ErrorKind::MalformedRow);
    }

    #[test]
    fn test_io_errors_classify_as_io() {
        let err: TumbleError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!err.is_missing_engine());
    }

    #[test]
    fn test_missing_engine_kinds() {
        assert!(TumbleError::MissingInvariantEngine("x".into()).is_missing_engine());
        assert!(TumbleError::MissingNumericDependency("sympy".into()).is_missing_engine());
        assert!(!TumbleError::Engine("boom".into()).is_missing_engine());
    }
}
