//! Match detection and scoring tests

mod common;

use tui_match3::core::{calculate_score, find_all_matches, find_matches, run_score, Grid};
use tui_match3::types::{Axis, Pos, TokenKind};

#[test]
fn test_detect_reference_triple() {
    let grid = common::reference_grid_with_bottom_triple();
    assert_eq!(find_all_matches(&grid, 3).len(), 3);

    let set = find_matches(&grid, [Pos::new(1, 0)], 3);
    let cells: Vec<Pos> = set.cells().collect();
    assert_eq!(cells, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);
    assert_eq!(calculate_score(set.runs(), 3).total, 80);
}

#[test]
fn test_run_of_min_minus_one_never_matches() {
    let grid = Grid::from_rows(&["DPRD", "CCDP"]).unwrap();
    assert!(find_all_matches(&grid, 3).is_empty());
}

#[test]
fn test_long_run_is_not_capped() {
    let grid = Grid::from_rows(&["DPRDPRDPR", "MMMMMMMMM"]).unwrap();
    let set = find_matches(&grid, [Pos::new(8, 0)], 3);
    assert_eq!(set.len(), 9);

    let run = set.runs().next().unwrap();
    assert_eq!(run.axis, Axis::Horizontal);
    assert_eq!(run.start, Pos::new(0, 0));
    assert_eq!(run.len, 9);
    assert_eq!(run.kind, TokenKind::Monkey);
    assert_eq!(run_score(9, 3), 3 * 50 + 9 * 10);
}

#[test]
fn test_l_shape_is_two_runs_sharing_a_corner() {
    let grid = Grid::from_rows(&["CDP", "CPD", "CCC"]).unwrap();
    let set = find_matches(&grid, [Pos::new(0, 0)], 3);
    assert_eq!(set.run_count(), 2);
    assert_eq!(set.len(), 5);
    assert_eq!(calculate_score(set.runs(), 3).total, 160);
}

#[test]
fn test_empty_and_outside_seeds_contribute_nothing() {
    let grid = Grid::from_rows(&["...", "CCC"]).unwrap();
    assert!(find_matches(&grid, [Pos::new(1, 1)], 3).is_empty());
    assert!(find_matches(&grid, [Pos::new(7, 7)], 3).is_empty());
}
