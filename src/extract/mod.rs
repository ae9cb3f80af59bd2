// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Reading a closed diagram as a 3D polygon.
//!
//! Rows are read top to bottom with `y` the row index. Only the path of the
//! active end is sampled from the glyphs; the loop strands and closure arcs
//! are added afterwards as a closing tail that runs back up the return strands
//! and around the top arcs to the start.
//!
//! Coordinates sampled from cells are offset by a small jitter so that no two
//! segments meet at a vertex. Tail coordinates sit on the integer grid except
//! where they continue a jittered row.

use tracing::debug;

use crate::error::{Result, TumbleError};
use crate::geometry::{
    ArcCorner, Cell, Diagram, DiagramKind, Point, Row, SpaceCurve, TurnCorner, MAX_JITTER,
};

/// Convert a closed diagram into a space curve.
pub fn extract(closed: &Diagram, jitter: f64) -> Result<SpaceCurve> {
    check_jitter(jitter)?;
    closed.check_width()?;
    let width = closed.width();
    if width < 7 || (width + 1) % 4 != 0 {
        return Err(TumbleError::ClosureError(format!(
            "width {} is not the width of a closed diagram",
            width
        )));
    }

    let mut points = Vec::new();
    for (y, row) in closed.rows().iter().enumerate() {
        row_points(row, y as f64, jitter, &mut points)?;
    }
    let content = points.len();
    let Some(&last) = points.last() else {
        return Err(TumbleError::ClosureError(
            "diagram has no active end to follow".to_string(),
        ));
    };

    closing_tail(last, width, &mut points);
    debug!(
        "extracted {} points ({} from cells, {} in the tail)",
        points.len(),
        content,
        points.len() - content
    );
    Ok(SpaceCurve::new(points))
}

/// Parse the text form of a closed diagram and extract it.
pub fn extract_text(text: &str, jitter: f64) -> Result<SpaceCurve> {
    extract(&Diagram::parse(text, DiagramKind::Closed)?, jitter)
}

fn check_jitter(jitter: f64) -> Result<()> {
    if jitter > 0.0 && jitter < MAX_JITTER {
        Ok(())
    } else {
        Err(TumbleError::InvalidConfiguration(format!(
            "jitter {} must lie strictly between 0 and {}",
            jitter, MAX_JITTER
        )))
    }
}

fn row_points(row: &Row, y: f64, jitter: f64, points: &mut Vec<Point>) -> Result<()> {
    if let Some(x) = row.position(Cell::ActiveEnd) {
        let left = x.checked_sub(1).and_then(|column| row.get(column));
        let right = row.get(x + 1);
        let over_arc = matches!(
            left,
            Some(Cell::ArcConnector | Cell::Arc(ArcCorner::BottomLeft))
        ) || matches!(
            right,
            Some(Cell::ArcConnector | Cell::Arc(ArcCorner::BottomRight))
        );
        let z = if over_arc { 1.0 } else { 0.0 };
        points.push(Point::new(x as f64 + jitter, y + jitter, z));
        return Ok(());
    }

    if row.turn_count() == 0 {
        return Ok(());
    }

    let (left, reverse) = match row.position(Cell::Turn(TurnCorner::DownRight)) {
        Some(column) => (column, true),
        None => match row.position(Cell::Turn(TurnCorner::UpRight)) {
            Some(column) => (column, false),
            None => {
                return Err(TumbleError::ClosureError(format!(
                    "crossing row {} has no left turn",
                    y
                )))
            }
        },
    };
    let right = row
        .position(Cell::Turn(TurnCorner::DownLeft))
        .or_else(|| row.position(Cell::Turn(TurnCorner::UpLeft)))
        .ok_or_else(|| TumbleError::ClosureError(format!("crossing row {} has no right turn", y)))?;
    if right < left {
        return Err(TumbleError::ClosureError(format!(
            "crossing row {} turns right of where it ends",
            y
        )));
    }

    let mut crossing: Vec<Point> = (left..=right)
        .filter_map(|x| {
            let z = match row[x] {
                Cell::Turn(_) => 0.0,
                Cell::Over | Cell::ArcConnector => 1.0,
                Cell::Loop => -1.0,
                _ => return None,
            };
            Some(Point::new(x as f64 + jitter, y + jitter, z))
        })
        .collect();
    if reverse {
        crossing.reverse();
    }
    points.extend(crossing);
    Ok(())
}

/// Run from the bottom of the end's path around the return strands and top
/// arcs back to the start.
fn closing_tail(last: Point, width: usize, points: &mut Vec<Point>) {
    let arcs = (width + 1) / 4;
    let mut bottom_y = last.y + 1.0;
    let mut right_x = (width - 2) as f64;

    points.push(Point::new(last.x, bottom_y, 0.0));
    points.push(Point::new(right_x, bottom_y, 0.0));

    for j in 0..arcs {
        let top_y = j as f64;
        points.push(Point::new(right_x, top_y, 0.0));
        let innermost = j + 1 == arcs;
        let left_x = if innermost { 2 * j } else { 2 * j + 1 };
        let left_x = left_x as f64;
        points.push(Point::new(left_x, top_y, 0.0));
        if !innermost {
            bottom_y -= 1.0;
            right_x -= 2.0;
            points.push(Point::new(left_x, bottom_y, 0.0));
            points.push(Point::new(right_x, bottom_y, 0.0));
        }
    }
}
