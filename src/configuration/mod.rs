// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Initial configurations of the loop bundle and its mobile end.
//!
//! Three starting topologies are supported:
//!
//! ```text
//! raymer     peppino    twist
//!  │ │ │┃     │ │ │┃     │ │ │┃
//!            ┏━━━━━┛    ┏━━━━━┛
//!            ┃│ │ │     ┃│ │ │
//!                       ┗━┓│ │
//!                        │┃│ │
//!                       ┏│┛│ │
//!                       ┃│ │ │
//! ```
//!
//! In `raymer` the end starts inside the bundle; in `peppino` it has already
//! wrapped around the outside; `twist` adds one full twist around loop 1.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::draws::Draws;
use crate::error::{Result, TumbleError};
use crate::geometry::{braid_width, loop_column, Cell, Row, TurnCorner};

/// Which loops the active end can never interact with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LockedSpec {
    /// Every loop is interactive.
    #[default]
    None,
    /// This many loops, chosen at random.
    Count(usize),
    /// These loops (1-based, from the left).
    Indices(Vec<usize>),
}

impl LockedSpec {
    /// Check the locked loops against a loop count without drawing anything.
    pub fn validate(&self, loop_count: usize) -> Result<()> {
        match self {
            LockedSpec::None => Ok(()),
            LockedSpec::Count(k) => {
                if *k >= loop_count {
                    return Err(TumbleError::InvalidConfiguration(format!(
                        "{} non-interacting loops requested but there are only {} loops; \
                         non-interacting loops must be fewer than total loops",
                        k, loop_count
                    )));
                }
                Ok(())
            }
            LockedSpec::Indices(indices) => {
                if indices.len() >= loop_count {
                    return Err(TumbleError::InvalidConfiguration(format!(
                        "{} non-interacting loops listed but there are only {} loops; \
                         non-interacting loops must be fewer than total loops",
                        indices.len(),
                        loop_count
                    )));
                }
                let mut seen = HashSet::new();
                for &index in indices {
                    if index == 0 || index > loop_count {
                        return Err(TumbleError::InvalidConfiguration(format!(
                            "non-interacting loop {} is outside loops 1..={}",
                            index, loop_count
                        )));
                    }
                    if !seen.insert(index) {
                        return Err(TumbleError::InvalidConfiguration(format!(
                            "non-interacting loop {} listed more than once",
                            index
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// Named starting topology.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Raymer,
    Peppino,
    Twist,
}

/// Build the initial rows for `topology`.
pub fn build<D: Draws + ?Sized>(
    topology: Topology,
    loop_count: usize,
    locked: &LockedSpec,
    draws: &mut D,
) -> Result<Vec<Row>> {
    match topology {
        Topology::Raymer => Ok(vec![build_raymer(loop_count, locked, draws)?]),
        Topology::Peppino => build_peppino(loop_count, locked, draws),
        Topology::Twist => build_twist(loop_count, locked, draws),
    }
}

/// A row of loops and gaps, `" │ │ … │ "`, with the requested loops locked.
pub fn build_blank_row<D: Draws + ?Sized>(
    loop_count: usize,
    locked: &LockedSpec,
    draws: &mut D,
) -> Result<Row> {
    if loop_count == 0 {
        return Err(TumbleError::InvalidConfiguration(
            "at least one loop is required".to_string(),
        ));
    }
    locked.validate(loop_count)?;

    let mut row = Row::new(
        (0..braid_width(loop_count))
            .map(|column| if column % 2 == 0 { Cell::Space } else { Cell::Loop })
            .collect(),
    );

    match locked {
        LockedSpec::None => {}
        LockedSpec::Count(k) => {
            // Redraw until k distinct loops are locked.
            while row.count(Cell::LockedLoop) < *k {
                let index = 1 + draws.index(loop_count);
                row[loop_column(index)] = Cell::LockedLoop;
            }
        }
        LockedSpec::Indices(indices) => {
            for &index in indices {
                row[loop_column(index)] = Cell::LockedLoop;
            }
        }
    }
    Ok(row)
}

/// `" │ │ │┃"`: the end starts in the rightmost gap.
pub fn build_raymer<D: Draws + ?Sized>(
    loop_count: usize,
    locked: &LockedSpec,
    draws: &mut D,
) -> Result<Row> {
    let mut row = build_blank_row(loop_count, locked, draws)?;
    let last = row.width() - 1;
    row[last] = Cell::ActiveEnd;
    Ok(row)
}

/// Raymer row, the end's pass over the whole bundle, then the end in the
/// leftmost gap.
pub fn build_peppino<D: Draws + ?Sized>(
    loop_count: usize,
    locked: &LockedSpec,
    draws: &mut D,
) -> Result<Vec<Row>> {
    let start = build_raymer(loop_count, locked, draws)?;
    let width = start.width();

    let mut wrap = Row::new(vec![Cell::Over; width]);
    wrap[0] = Cell::Turn(TurnCorner::DownRight);
    wrap[width - 1] = Cell::Turn(TurnCorner::UpLeft);

    let mut outside = start.clone();
    outside[0] = Cell::ActiveEnd;
    outside[width - 1] = Cell::Space;

    Ok(vec![start, wrap, outside])
}

/// Peppino followed by one crossing over loop 1 and one back under it.
pub fn build_twist<D: Draws + ?Sized>(
    loop_count: usize,
    locked: &LockedSpec,
    draws: &mut D,
) -> Result<Vec<Row>> {
    let mut rows = build_peppino(loop_count, locked, draws)?;
    let outside = rows[2].clone();

    let mut over = outside.clone();
    over[0] = Cell::Turn(TurnCorner::UpRight);
    over[1] = Cell::Over;
    over[2] = Cell::Turn(TurnCorner::DownLeft);

    let mut inside = outside.clone();
    inside[0] = Cell::Space;
    inside[2] = Cell::ActiveEnd;

    // Loop 1 keeps its own glyph here, locked or not.
    let mut under = outside.clone();
    under[0] = Cell::Turn(TurnCorner::DownRight);
    under[2] = Cell::Turn(TurnCorner::UpLeft);

    rows.extend([over, inside, under, outside]);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draws::ScriptedDraws;

    fn text(rows: &[Row]) -> Vec<String> {
        rows.iter().map(Row::to_string).collect()
    }

    #[test]
    fn test_blank_row_shape() {
        let mut draws = ScriptedDraws::default();
        for loops in 1..10 {
            let row = build_blank_row(loops, &LockedSpec::None, &mut draws).unwrap();
            assert_eq!(row.width(), 2 * loops + 1);
            for (column, cell) in row.iter().enumerate() {
                let expected = if column % 2 == 0 { Cell::Space } else { Cell::Loop };
                assert_eq!(cell, expected);
            }
        }
        assert_eq!(draws.consumed(), 0);
    }

    #[test]
    fn test_raymer_two_loops() {
        let row = build_raymer(2, &LockedSpec::None, &mut ScriptedDraws::default()).unwrap();
        assert_eq!(row.to_string(), " │ │┃");
    }

    #[test]
    fn test_peppino_rows() {
        let rows = build_peppino(3, &LockedSpec::None, &mut ScriptedDraws::default()).unwrap();
        assert_eq!(text(&rows), vec![" │ │ │┃", "┏━━━━━┛", "┃│ │ │ "]);
    }

    #[test]
    fn test_twist_rows() {
        let rows = build_twist(3, &LockedSpec::None, &mut ScriptedDraws::default()).unwrap();
        assert_eq!(
            text(&rows),
            vec![
                " │ │ │┃", "┏━━━━━┛", "┃│ │ │ ", "┗━┓│ │ ", " │┃│ │ ", "┏│┛│ │ ", "┃│ │ │ ",
            ]
        );
    }

    #[test]
    fn test_twist_keeps_locked_first_loop() {
        let locked = LockedSpec::Indices(vec![1]);
        let rows = build_twist(2, &locked, &mut ScriptedDraws::default()).unwrap();
        assert_eq!(rows[4].to_string(), " ┆┃│ ");
        assert_eq!(rows[5].to_string(), "┏┆┛│ ");
        assert_eq!(rows[3].to_string(), "┗━┓│ ");
    }

    #[test]
    fn test_locked_indices() {
        let locked = LockedSpec::Indices(vec![1, 3]);
        let row = build_blank_row(4, &locked, &mut ScriptedDraws::default()).unwrap();
        assert_eq!(row.to_string(), " ┆ │ ┆ │ ");
    }

    #[test]
    fn test_locked_count_redraws_duplicates() {
        // 0.1 and 0.2 both pick loop 1; 0.9 picks loop 4.
        let mut draws = ScriptedDraws::new([0.1, 0.2, 0.9]);
        let row = build_blank_row(4, &LockedSpec::Count(2), &mut draws).unwrap();
        assert_eq!(row.to_string(), " ┆ │ │ ┆ ");
        assert_eq!(draws.consumed(), 3);
    }

    #[test]
    fn test_locked_count_too_large() {
        let err = build_blank_row(2, &LockedSpec::Count(3), &mut ScriptedDraws::default());
        assert!(matches!(err, Err(TumbleError::InvalidConfiguration(_))));
        let err = build_blank_row(2, &LockedSpec::Count(2), &mut ScriptedDraws::default());
        assert!(matches!(err, Err(TumbleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_locked_indices_rejected() {
        for bad in [vec![0], vec![4], vec![2, 2], vec![1, 2, 3]] {
            let err = LockedSpec::Indices(bad.clone()).validate(3);
            assert!(
                matches!(err, Err(TumbleError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_zero_loops_rejected() {
        let err = build_raymer(0, &LockedSpec::None, &mut ScriptedDraws::default());
        assert!(matches!(err, Err(TumbleError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_topology_names() {
        assert_eq!("Peppino".parse::<Topology>().unwrap(), Topology::Peppino);
        assert_eq!(Topology::Twist.to_string(), "twist");
        assert!("spiral".parse::<Topology>().is_err());
    }
}
