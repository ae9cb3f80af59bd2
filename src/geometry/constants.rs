// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Default model parameters and grid arithmetic.

/// Default probability that an unforced step moves right.
pub const DEFAULT_P_RIGHT: f64 = 0.5;

/// Default probability that a step crosses above its target loop.
pub const DEFAULT_P_ABOVE: f64 = 0.5;

/// Default offset added to coordinates read off diagram cells.
///
/// Keeps the mobile end's vertices off the integer strand lines, so that every
/// crossing lies strictly inside both segments.
pub const DEFAULT_JITTER: f64 = 0.01;

/// Jitter must stay below half a grid unit or neighbouring columns blur.
pub const MAX_JITTER: f64 = 0.5;

/// Width of a braid row with `loops` loops.
pub const fn braid_width(loops: usize) -> usize {
    2 * loops + 1
}

/// Column of loop `index` (1-based).
pub const fn loop_column(index: usize) -> usize {
    2 * index - 1
}

/// Width of the closed diagram for a braid with `loops` loops.
pub const fn closed_width(loops: usize) -> usize {
    braid_width(loops) + 2 * (loops + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(braid_width(2), 5);
        assert_eq!(closed_width(2), 11);
        assert_eq!(closed_width(1), 7);
        assert_eq!(loop_column(1), 1);
        assert_eq!(loop_column(3), 5);
    }
}
