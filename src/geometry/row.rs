// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Fixed-width rows of cells.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::{Result, RowDefect, TumbleError};
use crate::geometry::cell::Cell;

/// An ordered, fixed-length sequence of cells.
///
/// Loop `i` (1-based, left to right) lives at column `2i - 1`; even columns
/// are the gaps the active end moves through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row(Vec<Cell>);

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row(cells)
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.0
    }

    pub fn get(&self, column: usize) -> Option<Cell> {
        self.0.get(column).copied()
    }

    /// Column of the first cell equal to `cell`.
    pub fn position(&self, cell: Cell) -> Option<usize> {
        self.0.iter().position(|&c| c == cell)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.0.iter().filter(|&&c| c == cell).count()
    }

    /// Number of loop strands, interactive and locked.
    pub fn loop_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_loop()).count()
    }

    pub fn turn_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_turn()).count()
    }

    /// Column of the single active end.
    ///
    /// Fails if the row has no active end or more than one.
    pub fn active_end(&self) -> Result<usize> {
        let mut found = None;
        let mut count = 0;
        for (column, &cell) in self.0.iter().enumerate() {
            if cell == Cell::ActiveEnd {
                count += 1;
                found.get_or_insert(column);
            }
        }
        match (found, count) {
            (Some(column), 1) => Ok(column),
            (None, _) => Err(TumbleError::malformed(RowDefect::MissingActiveEnd)),
            (Some(_), count) => Err(TumbleError::malformed(RowDefect::DuplicateActiveEnd {
                count,
            })),
        }
    }

    /// Append cells on the right.
    pub fn extend<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        self.0.extend(cells);
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for Row {
    type Output = Cell;

    fn index(&self, column: usize) -> &Cell {
        &self.0[column]
    }
}

impl IndexMut<usize> for Row {
    fn index_mut(&mut self, column: usize) -> &mut Cell {
        &mut self.0[column]
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row(cells)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.glyph())?;
        }
        Ok(())
    }
}

impl FromStr for Row {
    type Err = TumbleError;

    fn from_str(text: &str) -> Result<Self> {
        text.chars()
            .enumerate()
            .map(|(column, glyph)| {
                Cell::from_glyph(glyph).ok_or(TumbleError::malformed(RowDefect::UnknownGlyph {
                    glyph,
                    column,
                }))
            })
            .collect::<Result<Vec<_>>>()
            .map(Row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let row: Row = " │ ┆┃".parse().unwrap();
        assert_eq!(row.width(), 5);
        assert_eq!(row[3], Cell::LockedLoop);
        assert_eq!(row.to_string(), " │ ┆┃");
        assert_eq!(row.loop_count(), 2);
    }

    #[test]
    fn test_parse_reports_column() {
        let err = " │x".parse::<Row>().unwrap_err();
        assert!(matches!(
            err,
            TumbleError::MalformedRow {
                defect: RowDefect::UnknownGlyph { glyph: 'x', column: 2 }
            }
        ));
    }

    #[test]
    fn test_active_end() {
        let row: Row = " │┃│ ".parse().unwrap();
        assert_eq!(row.active_end().unwrap(), 2);

        let none: Row = " │ │ ".parse().unwrap();
        assert!(matches!(
            none.active_end(),
            Err(TumbleError::MalformedRow {
                defect: RowDefect::MissingActiveEnd
            })
        ));

        let two: Row = "┃│┃│ ".parse().unwrap();
        assert!(matches!(
            two.active_end(),
            Err(TumbleError::MalformedRow {
                defect: RowDefect::DuplicateActiveEnd { count: 2 }
            })
        ));
    }

    #[test]
    fn test_counts() {
        let row: Row = "┗━┓│ ".parse().unwrap();
        assert_eq!(row.turn_count(), 2);
        assert_eq!(row.count(Cell::Over), 1);
        assert_eq!(row.position(Cell::Loop), Some(3));
    }
}
