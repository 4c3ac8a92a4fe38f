//! Match detection - finds qualifying runs through seed cells
//!
//! For each seed the detector walks outward in all four cardinal directions,
//! collecting the maximal horizontal and vertical runs of the seed's kind. A run
//! qualifies when its length reaches `match_min`. Results are a set: a token
//! reached from several seeds (or from both axes) appears once.
//!
//! Runs are reported at their maximal extent, so the same run found from two of
//! its members is recorded once, which keeps scoring per run rather than per seed.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{Axis, Pos, TokenKind, MAX_GRID_DIM};

/// A maximal contiguous same-kind line of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Run {
    pub axis: Axis,
    /// Lowest-coordinate cell (leftmost or bottommost).
    pub start: Pos,
    pub len: u8,
    pub kind: TokenKind,
}

impl Run {
    /// Cells covered by this run, from `start` outward.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let (dc, dr) = self.axis.step();
        (0..self.len).map(move |i| {
            Pos::new(
                self.start.col + (dc as u8) * i,
                self.start.row + (dr as u8) * i,
            )
        })
    }

    pub fn contains(&self, pos: Pos) -> bool {
        match self.axis {
            Axis::Horizontal => {
                pos.row == self.start.row
                    && pos.col >= self.start.col
                    && pos.col < self.start.col + self.len
            }
            Axis::Vertical => {
                pos.col == self.start.col
                    && pos.row >= self.start.row
                    && pos.row < self.start.row + self.len
            }
        }
    }
}

/// Tokens belonging to qualifying runs, plus the runs themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    cells: BTreeSet<Pos>,
    runs: BTreeSet<Run>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of distinct matched tokens
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Matched positions in `(col, row)` order
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().copied()
    }

    /// Distinct qualifying runs
    pub fn runs(&self) -> impl Iterator<Item = &Run> + '_ {
        self.runs.iter()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    fn add_run(&mut self, run: Run) {
        if self.runs.insert(run) {
            self.cells.extend(run.cells());
        }
    }
}

/// Walk from `seed` along `(dc, dr)` while cells hold `kind`, pushing each one.
fn extend_line(
    grid: &Grid,
    seed: Pos,
    dc: i8,
    dr: i8,
    kind: TokenKind,
    out: &mut ArrayVec<Pos, MAX_GRID_DIM>,
) {
    let mut cur = seed;
    while let Some(next) = cur.offset(dc, dr) {
        if grid.kind_at(next) != Some(kind) {
            break;
        }
        // A line can never exceed the grid dimension, which is bounded by the capacity.
        if out.try_push(next).is_err() {
            break;
        }
        cur = next;
    }
}

/// Maximal run of the seed's kind through `seed` along `axis`.
///
/// Returns `None` for an empty or out-of-bounds seed. The run may be shorter
/// than any match threshold; callers decide whether it qualifies.
pub fn scan_run(grid: &Grid, seed: Pos, axis: Axis) -> Option<Run> {
    let kind = grid.kind_at(seed)?;
    let (dc, dr) = axis.step();

    let mut line: ArrayVec<Pos, MAX_GRID_DIM> = ArrayVec::new();
    line.push(seed);
    extend_line(grid, seed, dc, dr, kind, &mut line);
    extend_line(grid, seed, -dc, -dr, kind, &mut line);

    let start = line.iter().copied().min()?;
    Some(Run {
        axis,
        start,
        len: line.len() as u8,
        kind,
    })
}

/// Find every qualifying run passing through any of `seeds`.
///
/// Seeds on empty cells contribute nothing; seeds outside the grid are ignored.
pub fn find_matches<I>(grid: &Grid, seeds: I, match_min: u8) -> MatchSet
where
    I: IntoIterator<Item = Pos>,
{
    let mut set = MatchSet::new();
    for seed in seeds {
        check_seed(grid, seed, match_min, &mut set);
    }
    set
}

/// Find every qualifying run on the grid.
pub fn find_all_matches(grid: &Grid, match_min: u8) -> MatchSet {
    find_matches(grid, grid.positions(), match_min)
}

/// Evaluate both axes through one seed, adding qualifying runs to `set`.
pub fn check_seed(grid: &Grid, seed: Pos, match_min: u8, set: &mut MatchSet) {
    for axis in [Axis::Horizontal, Axis::Vertical] {
        if let Some(run) = scan_run(grid, seed, axis) {
            if run.len >= match_min {
                set.add_run(run);
            }
        }
    }
}
