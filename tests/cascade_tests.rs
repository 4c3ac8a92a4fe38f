//! Cascade resolution tests

mod common;

use std::collections::BTreeSet;

use tui_match3::core::cascade::{clear_matches, compact_columns};
use tui_match3::core::{
    cascade, find_all_matches, find_matches, CascadeError, Grid, GridConfig, RandomTokens,
    RecheckScope, ScriptedTokens,
};
use tui_match3::types::{Pos, TokenKind};

fn column_with_bottom_triple() -> Grid {
    // Bottom three are Cat; the rest never repeat twice in a row.
    Grid::from_rows(&["D", "P", "D", "P", "D", "P", "D", "C", "C", "C"]).unwrap()
}

#[test]
fn test_column_clear_leaves_top_three_empty_before_refill() {
    let mut grid = column_with_bottom_triple();
    let matches = find_matches(&grid, [Pos::new(0, 0)], 3);
    assert_eq!(matches.len(), 3);

    let cleared = clear_matches(&mut grid, &matches);
    assert_eq!(cleared.len(), 3);
    let moves = compact_columns(&mut grid, &BTreeSet::from([0u8]));

    assert_eq!(moves.len(), 7);
    assert_eq!(grid.empty_count(), 3);
    for row in 7..10 {
        assert_eq!(grid.kind_at(Pos::new(0, row)), None);
    }
    assert_eq!(grid.kind_at(Pos::new(0, 0)), Some(TokenKind::Dog));
}

#[test]
fn test_column_clear_resolves_to_full_stable_column() {
    for seed in 0..32 {
        let mut grid = column_with_bottom_triple();
        let config = GridConfig::new(1, 10, 3, 5);
        let mut source = RandomTokens::new(seed);

        let report = cascade::resolve(&mut grid, [Pos::new(0, 1)], &config, &mut source).unwrap();
        assert!(report.iterations() >= 1);
        assert!(grid.is_full());
        assert!(find_all_matches(&grid, 3).is_empty());
    }
}

#[test]
fn test_reference_grid_refresh_scores_80() {
    use TokenKind::*;
    let mut grid = common::reference_grid_with_bottom_triple();
    let config = GridConfig::default();
    let mut source = ScriptedTokens::new(vec![Cat, Dog, Cat]);

    let report = cascade::resolve(&mut grid, [Pos::new(1, 0)], &config, &mut source).unwrap();
    assert_eq!(report.iterations(), 1);
    assert_eq!(report.total_score, 80);
    assert_eq!(report.steps[0].cleared.len(), 3);
    assert_eq!(report.steps[0].refills.len(), 3);
    assert!(report.steps[0].refills.iter().all(|p| p.pos.row == 9));
    assert!(grid.is_full());
}

#[test]
fn test_every_recheck_scope_reaches_no_holes() {
    for scope in [
        RecheckScope::ChangedCells,
        RecheckScope::FullGrid,
        RecheckScope::Radius(1),
    ] {
        let mut grid = common::reference_grid_with_bottom_triple();
        let config = GridConfig::default().with_recheck(scope);
        let mut source = RandomTokens::new(3);
        let report = cascade::resolve(&mut grid, [Pos::new(0, 0)], &config, &mut source).unwrap();
        assert!(report.total_score >= 80);
        assert!(grid.is_full());
    }
}

#[test]
fn test_runaway_cascade_is_reported() {
    // A single kind refills into another run every time.
    let mut grid = Grid::from_rows(&["CCC", "CCC", "CCC"]).unwrap();
    let config = GridConfig::new(3, 3, 3, 2).with_max_cascade_iterations(4);
    let mut source = ScriptedTokens::new(vec![TokenKind::Cat]);

    let frontier: Vec<Pos> = grid.positions().collect();
    let err = cascade::resolve(&mut grid, frontier, &config, &mut source).unwrap_err();
    assert_eq!(err, CascadeError::DidNotStabilize { iterations: 4 });
    assert_eq!(err.code(), "cascade_did_not_stabilize");
}
