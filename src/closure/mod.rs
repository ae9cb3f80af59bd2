// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Closing an open braid into a knot diagram.
//!
//! Every loop strand is given a return strand on the right, and nested arcs
//! are added above and below the braid to join each loop to its return. The
//! active end is threaded into the outermost arc at each side: at the top it
//! becomes the innermost arc, at the bottom it runs over the arcs it meets and
//! joins the final one.
//!
//! For two loops and no moves:
//!
//! ```text
//!  ┌───────┐
//!  │ ┌───┐ │
//!  │ │┌┐ │ │
//!  │ │┃│ │ │
//!  │ └┃┘ │ │
//!  └──┃──┘ │
//!     └────┘
//! ```

use crate::error::{Result, TumbleError};
use crate::geometry::{ArcCorner, Cell, Diagram, Row};

/// The two corner columns of one closure arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcPair {
    pub left: usize,
    pub right: usize,
}

impl ArcPair {
    pub fn new(left: usize, right: usize) -> Self {
        ArcPair { left, right }
    }

    /// The next arc out at the top: to the loop strand on the left, the
    /// return strand on the right.
    fn widen_top(self, row: &Row) -> Result<Self> {
        let left = if self.left >= 2 && row[self.left - 1] == Cell::Space {
            self.left - 2
        } else {
            self.left.checked_sub(1).ok_or_else(|| {
                TumbleError::ClosureError("top arcs ran past the left edge".to_string())
            })?
        };
        Ok(ArcPair::new(left, self.right + 2))
    }
}

/// Close `open` into a knot diagram.
///
/// Adds `L + 1` arc rows above and below, where `L` is the number of loops in
/// the first row, and widens every row by `2(L + 1)` columns. The cells of the
/// braid rows are unchanged.
pub fn close(open: &Diagram) -> Result<Diagram> {
    let first = open
        .first()
        .ok_or_else(|| TumbleError::ClosureError("diagram has no rows".to_string()))?;
    open.check_width()?;

    let loops = first.loop_count();
    if loops == 0 {
        return Err(TumbleError::ClosureError(
            "first row has no loops to close".to_string(),
        ));
    }
    let arcs = loops + 1;

    let mut body: Vec<Row> = open.rows().to_vec();
    for row in &mut body {
        for _ in 0..arcs {
            row.extend([Cell::Loop, Cell::Space]);
        }
    }

    let top = top_arcs(&body[0], arcs)?;
    let bottom = bottom_arcs(&body[body.len() - 1], loops, arcs)?;

    let mut rows = Vec::with_capacity(body.len() + 2 * arcs);
    rows.extend(top);
    rows.extend(body);
    rows.extend(bottom);
    Ok(Diagram::closed(rows))
}

/// Arc rows for the top, outermost first.
fn top_arcs(first: &Row, arcs: usize) -> Result<Vec<Row>> {
    let mut rows = Vec::with_capacity(arcs);
    let mut template = first.clone();
    let mut pair: Option<ArcPair> = None;

    for _ in 0..arcs {
        let mut row = template.clone();
        let next = match pair {
            None => {
                let anchor = row.active_end().map_err(|err| {
                    TumbleError::ClosureError(format!("no anchor for the top arcs: {}", err))
                })?;
                ArcPair::new(anchor, anchor + 1)
            }
            Some(prev) => prev.widen_top(&row)?,
        };
        draw_arc(&mut row, next, ArcCorner::TopLeft, ArcCorner::TopRight)?;
        rows.push(row.clone());
        template = row;
        pair = Some(next);
    }

    rows.reverse();
    Ok(rows)
}

/// Arc rows for the bottom, innermost first. The last one collects the
/// active end.
fn bottom_arcs(last: &Row, loops: usize, arcs: usize) -> Result<Vec<Row>> {
    let mut rows = Vec::with_capacity(arcs);
    let mut template = last.clone();
    let mut pair: Option<ArcPair> = None;

    for _ in 0..arcs {
        let mut row = template.clone();
        let next = match pair {
            None => ArcPair::new(2 * loops - 1, 2 * loops + 1),
            Some(prev) if prev.left <= 1 => {
                let end = row.active_end().map_err(|err| {
                    TumbleError::ClosureError(format!("no active end for the final arc: {}", err))
                })?;
                for column in 0..end {
                    row[column] = Cell::Space;
                }
                ArcPair::new(end, prev.right + 2)
            }
            Some(prev) => ArcPair::new(prev.left - 2, prev.right + 2),
        };
        draw_arc(&mut row, next, ArcCorner::BottomLeft, ArcCorner::BottomRight)?;
        rows.push(row.clone());
        template = row;
        pair = Some(next);
    }

    Ok(rows)
}

/// Write the corners of `pair` and join them, leaving the active end on top.
fn draw_arc(row: &mut Row, pair: ArcPair, left: ArcCorner, right: ArcCorner) -> Result<()> {
    if pair.right >= row.width() || pair.left >= pair.right {
        return Err(TumbleError::ClosureError(format!(
            "arc {}..{} does not fit a row of width {}",
            pair.left,
            pair.right,
            row.width()
        )));
    }
    row[pair.left] = Cell::Arc(left);
    row[pair.right] = Cell::Arc(right);
    for column in pair.left + 1..pair.right {
        if row[column] != Cell::ActiveEnd {
            row[column] = Cell::ArcConnector;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DiagramKind;

    fn open(text: &str) -> Diagram {
        Diagram::parse(text, DiagramKind::Open).unwrap()
    }

    #[test]
    fn test_close_single_row() {
        let closed = close(&open(" │ │┃\n")).unwrap();
        assert_eq!(closed.kind(), DiagramKind::Closed);
        assert_eq!(
            closed.to_string(),
            concat!(
                " ┌───────┐ \n",
                " │ ┌───┐ │ \n",
                " │ │┌┐ │ │ \n",
                " │ │┃│ │ │ \n",
                " │ └┃┘ │ │ \n",
                " └──┃──┘ │ \n",
                "    └────┘ \n",
            )
        );
    }

    #[test]
    fn test_close_end_outside_bundle() {
        let closed = close(&open(" │┃\n┏━┛\n┃│ \n")).unwrap();
        assert_eq!(
            closed.to_string(),
            concat!(
                " ┌───┐ \n",
                " │┌┐ │ \n",
                " │┃│ │ \n",
                "┏━┛│ │ \n",
                "┃│ │ │ \n",
                "┃└─┘ │ \n",
                "└────┘ \n",
            )
        );
    }

    #[test]
    fn test_top_widening_skips_gap() {
        let row: Row = " │ │ │ ".parse().unwrap();
        assert_eq!(ArcPair::new(3, 4).widen_top(&row).unwrap(), ArcPair::new(1, 6));
        assert_eq!(ArcPair::new(4, 5).widen_top(&row).unwrap(), ArcPair::new(3, 7));
    }

    #[test]
    fn test_zero_loops_rejected() {
        let err = close(&open("┃\n")).unwrap_err();
        assert!(matches!(err, TumbleError::ClosureError(_)));
    }

    #[test]
    fn test_missing_anchor_rejected() {
        let err = close(&open(" │ │ \n")).unwrap_err();
        assert!(matches!(err, TumbleError::ClosureError(_)));
    }
}
