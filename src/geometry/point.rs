// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Points and space curves handed to the invariant engine.

use serde::{Deserialize, Serialize};

/// A point in 3D. `z` is -1 (under), 0 (corner or plain strand) or 1 (over).
///
/// Serializes as an `[x, y, z]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z }
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point { x, y, z }
    }
}

impl From<Point> for [f64; 3] {
    fn from(p: Point) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Ordered polyline. The last point implicitly joins the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpaceCurve(Vec<Point>);

impl SpaceCurve {
    pub fn new(points: Vec<Point>) -> Self {
        SpaceCurve(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    /// Points that sit over (`z > 0`) or under (`z < 0`) another strand.
    pub fn crossing_points(&self) -> usize {
        self.0.iter().filter(|p| p.z != 0.0).count()
    }
}
