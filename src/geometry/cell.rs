// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Cell type for diagram glyphs.
//!
//! A braid diagram is a grid of box-drawing glyphs, one [`Cell`] per column.
//! Thick glyphs are drawn by the mobile end while it tumbles; the thin corner
//! and connector glyphs only appear once the braid has been closed.

use std::fmt;

use strum_macros::EnumIter;

use crate::error::{RowDefect, TumbleError};

/// Orientation of a thick turn corner drawn by the mobile end.
///
/// Names give the two directions the corner connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TurnCorner {
    /// `┏`
    DownRight,
    /// `┓`
    DownLeft,
    /// `┗`
    UpRight,
    /// `┛`
    UpLeft,
}

/// Orientation of a thin closure arc corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ArcCorner {
    /// `┌`
    TopLeft,
    /// `┐`
    TopRight,
    /// `└`
    BottomLeft,
    /// `┘`
    BottomRight,
}

/// One symbolic unit of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// ` `
    Space,
    /// `│` a loop the active end may cross over or under.
    Loop,
    /// `┆` a loop the active end always passes over.
    LockedLoop,
    /// `┃`
    ActiveEnd,
    Turn(TurnCorner),
    /// `━` the active end running over whatever is beneath it.
    Over,
    Arc(ArcCorner),
    /// `─`
    ArcConnector,
}

impl Cell {
    /// The glyph drawn for this cell.
    pub const fn glyph(self) -> char {
        match self {
            Cell::Space => ' ',
            Cell::Loop => '│',
            Cell::LockedLoop => '┆',
            Cell::ActiveEnd => '┃',
            Cell::Turn(TurnCorner::DownRight) => '┏',
            Cell::Turn(TurnCorner::DownLeft) => '┓',
            Cell::Turn(TurnCorner::UpRight) => '┗',
            Cell::Turn(TurnCorner::UpLeft) => '┛',
            Cell::Over => '━',
            Cell::Arc(ArcCorner::TopLeft) => '┌',
            Cell::Arc(ArcCorner::TopRight) => '┐',
            Cell::Arc(ArcCorner::BottomLeft) => '└',
            Cell::Arc(ArcCorner::BottomRight) => '┘',
            Cell::ArcConnector => '─',
        }
    }

    /// Parse a glyph, returning None for characters outside the glyph set.
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let cell = match glyph {
            ' ' => Cell::Space,
            '│' => Cell::Loop,
            '┆' => Cell::LockedLoop,
            '┃' => Cell::ActiveEnd,
            '┏' => Cell::Turn(TurnCorner::DownRight),
            '┓' => Cell::Turn(TurnCorner::DownLeft),
            '┗' => Cell::Turn(TurnCorner::UpRight),
            '┛' => Cell::Turn(TurnCorner::UpLeft),
            '━' => Cell::Over,
            '┌' => Cell::Arc(ArcCorner::TopLeft),
            '┐' => Cell::Arc(ArcCorner::TopRight),
            '└' => Cell::Arc(ArcCorner::BottomLeft),
            '┘' => Cell::Arc(ArcCorner::BottomRight),
            '─' => Cell::ArcConnector,
            _ => return None,
        };
        Some(cell)
    }

    /// Interactive or locked loop strand.
    pub fn is_loop(self) -> bool {
        matches!(self, Cell::Loop | Cell::LockedLoop)
    }

    pub fn is_turn(self) -> bool {
        matches!(self, Cell::Turn(_))
    }

    /// Glyphs drawn by the mobile end (coloured by the renderer).
    pub fn is_mobile(self) -> bool {
        matches!(self, Cell::ActiveEnd | Cell::Turn(_) | Cell::Over)
    }
}

impl TryFrom<char> for Cell {
    type Error = TumbleError;

    fn try_from(glyph: char) -> Result<Self, Self::Error> {
        Cell::from_glyph(glyph).ok_or(TumbleError::malformed(RowDefect::UnknownGlyph {
            glyph,
            column: 0,
        }))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn all_cells() -> Vec<Cell> {
        let mut cells = vec![
            Cell::Space,
            Cell::Loop,
            Cell::LockedLoop,
            Cell::ActiveEnd,
            Cell::Over,
            Cell::ArcConnector,
        ];
        cells.extend(TurnCorner::iter().map(Cell::Turn));
        cells.extend(ArcCorner::iter().map(Cell::Arc));
        cells
    }

    #[test]
    fn test_glyphs_are_distinct_and_parse_back() {
        let cells = all_cells();
        assert_eq!(cells.len(), 14);
        for cell in &cells {
            assert_eq!(Cell::from_glyph(cell.glyph()), Some(*cell));
        }
        let mut glyphs: Vec<char> = cells.iter().map(|c| c.glyph()).collect();
        glyphs.sort();
        glyphs.dedup();
        assert_eq!(glyphs.len(), 14);
    }

    #[test]
    fn test_unknown_glyph() {
        assert_eq!(Cell::from_glyph('x'), None);
        assert!(matches!(
            Cell::try_from('x'),
            Err(TumbleError::MalformedRow {
                defect: RowDefect::UnknownGlyph { glyph: 'x', .. }
            })
        ));
    }

    #[test]
    fn test_classification() {
        assert!(Cell::Loop.is_loop());
        assert!(Cell::LockedLoop.is_loop());
        assert!(!Cell::ActiveEnd.is_loop());
        assert!(Cell::Turn(TurnCorner::UpLeft).is_turn());
        assert!(!Cell::Arc(ArcCorner::TopLeft).is_turn());
        assert!(Cell::Over.is_mobile());
        assert!(!Cell::ArcConnector.is_mobile());
    }
}
