// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Diagrams: ordered sequences of equal-width rows.

use std::fmt;

use crate::error::{Result, RowDefect, TumbleError};
use crate::geometry::row::Row;

/// Whether a diagram is still an open braid or has been closed into a knot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Open,
    Closed,
}

/// An ordered sequence of rows.
///
/// The text form is one row per line, each line terminated by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    kind: DiagramKind,
    rows: Vec<Row>,
}

impl Diagram {
    pub fn open(rows: Vec<Row>) -> Self {
        Diagram {
            kind: DiagramKind::Open,
            rows,
        }
    }

    pub fn closed(rows: Vec<Row>) -> Self {
        Diagram {
            kind: DiagramKind::Closed,
            rows,
        }
    }

    /// Parse the text format, rejecting unknown glyphs and ragged rows.
    ///
    /// Blank lines are ignored.
    pub fn parse(text: &str, kind: DiagramKind) -> Result<Self> {
        let rows = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::parse::<Row>)
            .collect::<Result<Vec<_>>>()?;
        if rows.is_empty() {
            return Err(TumbleError::malformed(RowDefect::Empty));
        }
        let diagram = Diagram { kind, rows };
        diagram.check_width()?;
        Ok(diagram)
    }

    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the first row (all rows share it once checked).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Row::width)
    }

    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&Row> {
        self.rows.last()
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Fail unless every row has the width of the first.
    pub fn check_width(&self) -> Result<()> {
        let expected = self.width();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.width() != expected)
        {
            Some((row, found)) => Err(TumbleError::malformed(RowDefect::WidthMismatch {
                row,
                expected,
                found: found.width(),
            })),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_round_trip_keeps_trailing_newline() {
        let text = " │ │┃\n┏━━━┛\n┃│ │ \n";
        let diagram = Diagram::parse(text, DiagramKind::Open).unwrap();
        assert_eq!(diagram.len(), 3);
        assert_eq!(diagram.width(), 5);
        assert_eq!(diagram.to_string(), text);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Diagram::parse(" │┃\n │ │┃\n", DiagramKind::Open).unwrap_err();
        assert!(matches!(
            err,
            TumbleError::MalformedRow {
                defect: RowDefect::WidthMismatch {
                    row: 1,
                    expected: 3,
                    found: 5
                }
            }
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(Diagram::parse("\n\n", DiagramKind::Closed).is_err());
    }
}
