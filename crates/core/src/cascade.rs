//! Cascade resolution - clear, compact, refill, re-match until stable
//!
//! One iteration:
//!
//! 1. Detect runs through the frontier. None found: the grid is stable, stop.
//! 2. Clear every matched token and score every distinct run.
//! 3. Compact each affected column toward row 0, keeping relative order.
//! 4. Refill every empty cell with a freshly drawn kind.
//! 5. Build the next frontier according to [`RecheckScope`] and repeat.
//!
//! Each iteration is committed synchronously and recorded as a [`CascadeStep`]
//! with before/after grids, so presentation layers can animate without
//! looking at resolver internals. A configurable ceiling turns a runaway
//! cascade into [`CascadeError::DidNotStabilize`] instead of looping forever.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::{GridConfig, RecheckScope};
use crate::error::CascadeError;
use crate::grid::{DropMove, Grid};
use crate::matcher::{find_matches, MatchSet, Run};
use crate::rng::TokenSource;
use crate::scoring::run_score;
use crate::types::{Pos, TokenKind, MAX_GRID_DIM};

/// A token placed at or removed from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub pos: Pos,
    pub kind: TokenKind,
}

/// A cleared run and the points it earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRun {
    pub run: Run,
    pub points: u32,
}

/// Everything that happened during one cascade iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// Zero-based iteration index within the resolution.
    pub index: u32,
    pub runs: Vec<ScoredRun>,
    pub cleared: Vec<Placement>,
    pub moves: Vec<DropMove>,
    pub refills: Vec<Placement>,
    pub score: u32,
    /// Grid at the start of the iteration, matched tokens still present.
    pub before: Grid,
    /// Grid after refill.
    pub after: Grid,
}

/// Outcome of draining a cascade to a stable grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub steps: Vec<CascadeStep>,
    pub total_score: u32,
}

impl CascadeReport {
    /// Number of iterations that cleared something
    pub fn iterations(&self) -> u32 {
        self.steps.len() as u32
    }

    pub fn cleared_count(&self) -> usize {
        self.steps.iter().map(|s| s.cleared.len()).sum()
    }

    /// True when nothing was cleared
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Mark every matched cell empty, returning what was removed (in position order).
pub fn clear_matches(grid: &mut Grid, matches: &MatchSet) -> Vec<Placement> {
    let mut cleared = Vec::with_capacity(matches.len());
    for pos in matches.cells() {
        if let Some(kind) = grid.kind_at(pos) {
            // Matched positions come from this grid, so they are in bounds.
            if grid.set(pos, None).is_ok() {
                cleared.push(Placement { pos, kind });
            }
        }
    }
    cleared
}

/// Compact the given columns, returning every move made.
pub fn compact_columns(grid: &mut Grid, columns: &BTreeSet<u8>) -> Vec<DropMove> {
    let mut moves = Vec::new();
    for &col in columns {
        grid.compact_column(col, &mut moves);
    }
    moves
}

/// Fill every empty cell with a drawn kind, bottom row first.
pub fn refill(grid: &mut Grid, token_kinds: u8, source: &mut dyn TokenSource) -> Vec<Placement> {
    let empty: Vec<Pos> = grid
        .positions()
        .filter(|&p| grid.kind_at(p).is_none())
        .collect();

    let mut placed = Vec::with_capacity(empty.len());
    for pos in empty {
        let kind = source.draw_kind(token_kinds);
        if grid.set(pos, Some(kind)).is_ok() {
            placed.push(Placement { pos, kind });
        }
    }
    placed
}

/// Seeds for the next detection pass.
pub fn next_frontier(
    grid: &Grid,
    scope: RecheckScope,
    moves: &[DropMove],
    refills: &[Placement],
) -> BTreeSet<Pos> {
    match scope {
        RecheckScope::FullGrid => grid.positions().collect(),
        RecheckScope::ChangedCells => moves
            .iter()
            .map(|m| m.to)
            .chain(refills.iter().map(|p| p.pos))
            .collect(),
        RecheckScope::Radius(radius) => {
            let r = (radius as i16).min(MAX_GRID_DIM as i16);
            let mut out = BTreeSet::new();
            for p in refills {
                for dr in -r..=r {
                    for dc in -r..=r {
                        let col = p.pos.col as i16 + dc;
                        let row = p.pos.row as i16 + dr;
                        if col < 0 || row < 0 {
                            continue;
                        }
                        let pos = Pos::new(col as u8, row as u8);
                        if grid.in_bounds(pos) {
                            out.insert(pos);
                        }
                    }
                }
            }
            out
        }
    }
}

/// Drives clear-compact-refill iterations to a fixed point.
pub struct CascadeResolver<'a> {
    config: &'a GridConfig,
    source: &'a mut dyn TokenSource,
}

impl<'a> CascadeResolver<'a> {
    pub fn new(config: &'a GridConfig, source: &'a mut dyn TokenSource) -> Self {
        Self { config, source }
    }

    /// Run one iteration seeded by `frontier`.
    ///
    /// Returns `None` when the frontier yields no qualifying run; the grid is untouched then.
    pub fn step(
        &mut self,
        grid: &mut Grid,
        frontier: &BTreeSet<Pos>,
        index: u32,
    ) -> Option<(CascadeStep, BTreeSet<Pos>)> {
        let min = self.config.match_min_count;
        let matches = find_matches(grid, frontier.iter().copied(), min);
        if matches.is_empty() {
            return None;
        }

        let before = grid.clone();
        let runs: Vec<ScoredRun> = matches
            .runs()
            .map(|run| ScoredRun {
                run: *run,
                points: run_score(run.len as u32, min),
            })
            .collect();
        let score = runs
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.points));

        let cleared = clear_matches(grid, &matches);
        let columns: BTreeSet<u8> = cleared.iter().map(|p| p.pos.col).collect();
        let moves = compact_columns(grid, &columns);
        let refills = refill(grid, self.config.token_kinds, &mut *self.source);
        let frontier = next_frontier(grid, self.config.recheck, &moves, &refills);

        debug!(
            index,
            cleared = cleared.len(),
            runs = runs.len(),
            moved = moves.len(),
            refilled = refills.len(),
            score,
            next_frontier = frontier.len(),
            "cascade iteration"
        );

        let step = CascadeStep {
            index,
            runs,
            cleared,
            moves,
            refills,
            score,
            before,
            after: grid.clone(),
        };
        Some((step, frontier))
    }

    /// Drain the cascade starting from `frontier`.
    ///
    /// On success the grid is stable with respect to the configured recheck scope
    /// and has no empty cells. Any empty cells present on entry are refilled first.
    pub fn resolve<I>(&mut self, grid: &mut Grid, frontier: I) -> Result<CascadeReport, CascadeError>
    where
        I: IntoIterator<Item = Pos>,
    {
        let mut report = CascadeReport::default();
        self.resolve_into(grid, frontier, &mut report)?;
        Ok(report)
    }

    /// Like [`resolve`](Self::resolve), but records into `report`.
    ///
    /// On error `report` keeps every iteration committed before the ceiling
    /// tripped, so callers can account for the grid changes already made.
    pub fn resolve_into<I>(
        &mut self,
        grid: &mut Grid,
        frontier: I,
        report: &mut CascadeReport,
    ) -> Result<(), CascadeError>
    where
        I: IntoIterator<Item = Pos>,
    {
        let mut frontier: BTreeSet<Pos> = frontier.into_iter().collect();
        if !grid.is_full() {
            let refills = refill(grid, self.config.token_kinds, &mut *self.source);
            frontier.extend(refills.iter().map(|p| p.pos));
        }

        let ceiling = self.config.max_cascade_iterations;
        let mut index: u32 = 0;

        loop {
            if index >= ceiling {
                // Only trip when there is still work left to do.
                let min = self.config.match_min_count;
                let pending = find_matches(grid, frontier.iter().copied(), min);
                if pending.is_empty() {
                    return Ok(());
                }
                error!(iterations = index, "cascade exceeded iteration ceiling");
                return Err(CascadeError::DidNotStabilize { iterations: index });
            }

            let Some((step, next)) = self.step(grid, &frontier, index) else {
                return Ok(());
            };
            report.total_score = report.total_score.saturating_add(step.score);
            report.steps.push(step);
            frontier = next;
            index += 1;
        }
    }
}

/// Convenience wrapper around [`CascadeResolver::resolve`].
pub fn resolve<I>(
    grid: &mut Grid,
    frontier: I,
    config: &GridConfig,
    source: &mut dyn TokenSource,
) -> Result<CascadeReport, CascadeError>
where
    I: IntoIterator<Item = Pos>,
{
    CascadeResolver::new(config, source).resolve(grid, frontier)
}
