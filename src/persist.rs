// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Files written by a run or a batch.
//!
//! - braid files: the open diagram, one row per line
//! - results file: CSV with header `gauss,crossingnum,alexander`, one row per knot

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::Diagram;
use crate::invariants::Invariants;

/// Header of the results file.
pub const RESULTS_HEADER: [&str; 3] = ["gauss", "crossingnum", "alexander"];

/// Write `diagram` to `path`, replacing any existing file.
pub fn write_braid(path: &Path, diagram: &Diagram) -> Result<()> {
    fs::write(path, diagram.to_string())?;
    Ok(())
}

/// Directory holding per-run braid files for a batch writing `results`:
/// the results path with its extension removed.
pub fn braid_dir_for(results: &Path) -> PathBuf {
    results.with_extension("")
}

/// Braid file for run `run` (0-based) of a batch. Files are numbered from 1.
pub fn braid_file(dir: &Path, run: u64) -> PathBuf {
    dir.join(format!("{}.txt", run + 1))
}

/// Writes one CSV row of invariants per knot.
pub struct ResultsWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ResultsWriter<File> {
    /// Create (or truncate) `path` and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        ResultsWriter::new(File::create(path)?)
    }
}

impl<W: Write> ResultsWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(RESULTS_HEADER)?;
        Ok(ResultsWriter { writer })
    }

    pub fn write(&mut self, invariants: &Invariants) -> Result<()> {
        let crossings = invariants.crossing_number.to_string();
        self.writer.write_record([
            invariants.gauss_code.as_str(),
            crossings.as_str(),
            invariants.alexander_polynomial.as_str(),
        ])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| std::io::Error::new(err.error().kind(), err.error().to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DiagramKind;

    #[test]
    fn test_braid_dir_strips_extension() {
        assert_eq!(braid_dir_for(Path::new("out/knots.csv")), PathBuf::from("out/knots"));
        assert_eq!(braid_dir_for(Path::new("knots")), PathBuf::from("knots"));
        assert_eq!(braid_file(Path::new("knots"), 0), PathBuf::from("knots/1.txt"));
    }

    #[test]
    fn test_write_braid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("braid.txt");
        let diagram = Diagram::parse(" │ │┃\n │┏━┛\n │┃│ \n", DiagramKind::Open).unwrap();
        write_braid(&path, &diagram).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), " │ │┃\n │┏━┛\n │┃│ \n");
    }

    #[test]
    fn test_results_rows() {
        let mut writer = ResultsWriter::new(Vec::new()).unwrap();
        writer
            .write(&Invariants {
                gauss_code: "1+c,2-c,3+c,1-c,2+c,3-c".to_string(),
                crossing_number: 3,
                alexander_polynomial: "t**2 - t + 1".to_string(),
            })
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "gauss,crossingnum,alexander\n\"1+c,2-c,3+c,1-c,2+c,3-c\",3,t**2 - t + 1\n"
        );
    }
}
