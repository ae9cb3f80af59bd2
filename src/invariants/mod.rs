// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Knot invariants, computed by an external engine.
//!
//! The crate only produces the space curve. Computing the Gauss code, the
//! crossing number and the Alexander polynomial is delegated to an
//! [`InvariantEngine`]. [`CommandEngine`] runs an external program that reads
//! the curve as JSON on stdin and answers with JSON on stdout:
//!
//! ```text
//! stdin:  [[x, y, z], ...]
//! stdout: {"gauss_code": "...", "crossing_number": 3, "alexander_polynomial": "..."}
//!     or: {"error": "missing_dependency", "detail": "..."}
//! ```

use std::env;
use std::fmt;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TumbleError};
use crate::geometry::SpaceCurve;

/// The invariants recorded for each knot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invariants {
    pub gauss_code: String,
    pub crossing_number: usize,
    pub alexander_polynomial: String,
}

impl fmt::Display for Invariants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gauss code: {}", self.gauss_code)?;
        writeln!(f, "Crossing number: {}", self.crossing_number)?;
        write!(f, "Alexander polynomial: {}", self.alexander_polynomial)
    }
}

/// Something that can compute [`Invariants`] for a closed space curve.
///
/// The curve is closed: its last point joins its first.
pub trait InvariantEngine: Send + Sync + fmt::Debug {
    fn analyze(&self, curve: &SpaceCurve) -> Result<Invariants>;

    /// Fail early if the engine cannot run at all.
    fn ensure_available(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Stands in when no engine was configured.
#[derive(Debug, Clone, Default)]
pub struct Unavailable;

impl InvariantEngine for Unavailable {
    fn analyze(&self, _curve: &SpaceCurve) -> Result<Invariants> {
        Err(self.missing())
    }

    fn ensure_available(&self) -> Result<()> {
        Err(self.missing())
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

impl Unavailable {
    fn missing(&self) -> TumbleError {
        TumbleError::MissingInvariantEngine(
            "no engine configured; pass --engine with a program that computes knot invariants"
                .to_string(),
        )
    }
}

/// Runs an external program once per curve.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: PathBuf,
    args: Vec<String>,
}

/// What the program may answer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply {
    Ok(Invariants),
    Failed {
        error: String,
        #[serde(default)]
        detail: String,
    },
}

impl CommandEngine {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        CommandEngine {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Resolve the program: a path is used as is, a bare name is looked up
    /// on `PATH`.
    fn resolve(&self) -> Option<PathBuf> {
        if self.program.components().count() > 1 {
            return self.program.is_file().then(|| self.program.clone());
        }
        let path = env::var_os("PATH")?;
        env::split_paths(&path)
            .map(|dir| dir.join(&self.program))
            .find(|candidate| candidate.is_file())
    }

    fn not_found(&self) -> TumbleError {
        TumbleError::MissingInvariantEngine(format!(
            "engine program {} not found",
            self.program.display()
        ))
    }
}

impl InvariantEngine for CommandEngine {
    fn analyze(&self, curve: &SpaceCurve) -> Result<Invariants> {
        let input = serde_json::to_vec(curve)?;
        debug!(
            "sending {} points to {}",
            curve.len(),
            self.program.display()
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                IoErrorKind::NotFound => self.not_found(),
                _ => TumbleError::Io(err),
            })?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&input)?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(TumbleError::Engine(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let reply: Reply = serde_json::from_slice(&output.stdout).map_err(|err| {
            TumbleError::Engine(format!(
                "unreadable answer from {}: {}",
                self.program.display(),
                err
            ))
        })?;
        match reply {
            Reply::Ok(invariants) => Ok(invariants),
            Reply::Failed { error, detail } if error == "missing_dependency" => {
                Err(TumbleError::MissingNumericDependency(detail))
            }
            Reply::Failed { error, detail } => {
                Err(TumbleError::Engine(format!("{}: {}", error, detail)))
            }
        }
    }

    fn ensure_available(&self) -> Result<()> {
        self.resolve().map(|_| ()).ok_or_else(|| self.not_found())
    }

    fn name(&self) -> &str {
        self.program
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("command")
    }
}
