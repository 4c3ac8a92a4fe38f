//! Swap validation - lookahead for "would this swap match?"
//!
//! The validator performs the swap, checks both new positions, and swaps back.
//! It never leaves a trace on the grid. Adjacency is the caller's concern.

use crate::error::GridError;
use crate::grid::Grid;
use crate::matcher::{check_seed, MatchSet};
use crate::types::Pos;

/// Whether swapping `a` and `b` would create at least one qualifying run.
///
/// Fails only when a position is out of bounds, in which case the grid is untouched.
pub fn would_match(grid: &mut Grid, a: Pos, b: Pos, match_min: u8) -> Result<bool, GridError> {
    Ok(!preview_swap(grid, a, b, match_min)?.is_empty())
}

/// Matches the swap of `a` and `b` would produce, evaluated on the swapped grid.
pub fn preview_swap(
    grid: &mut Grid,
    a: Pos,
    b: Pos,
    match_min: u8,
) -> Result<MatchSet, GridError> {
    grid.swap(a, b)?;
    let mut set = MatchSet::new();
    check_seed(grid, a, match_min, &mut set);
    check_seed(grid, b, match_min, &mut set);
    // Same positions that just succeeded; cannot fail.
    grid.swap(a, b)?;
    Ok(set)
}

/// Every adjacent pair whose swap would match, scanning right and up neighbours.
pub fn legal_swaps(grid: &mut Grid, match_min: u8) -> Vec<(Pos, Pos)> {
    let mut out = Vec::new();
    for_each_adjacent_pair(grid, |grid, a, b| {
        if would_match(grid, a, b, match_min).unwrap_or(false) {
            out.push((a, b));
        }
        true
    });
    out
}

/// First adjacent pair whose swap would match, if any.
pub fn find_legal_swap(grid: &mut Grid, match_min: u8) -> Option<(Pos, Pos)> {
    let mut found = None;
    for_each_adjacent_pair(grid, |grid, a, b| {
        if would_match(grid, a, b, match_min).unwrap_or(false) {
            found = Some((a, b));
            return false;
        }
        true
    });
    found
}

/// Visit each unordered adjacent pair once; stop when `f` returns false.
fn for_each_adjacent_pair(grid: &mut Grid, mut f: impl FnMut(&mut Grid, Pos, Pos) -> bool) {
    let (columns, rows) = (grid.columns(), grid.rows());
    for row in 0..rows {
        for col in 0..columns {
            let a = Pos::new(col, row);
            if col + 1 < columns && !f(grid, a, Pos::new(col + 1, row)) {
                return;
            }
            if row + 1 < rows && !f(grid, a, Pos::new(col, row + 1)) {
                return;
            }
        }
    }
}
