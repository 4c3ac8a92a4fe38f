//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use tui_match3::core::Grid;
use tui_match3::types::{Pos, TokenKind};

/// 9x10 grid with no two equal neighbours in any row or column
/// (`kind = (col + 2 * row) mod 5`), except that the bottom-left three cells
/// are all `Cat`.
pub fn reference_grid_with_bottom_triple() -> Grid {
    let mut grid = Grid::new(9, 10);
    let positions: Vec<Pos> = grid.positions().collect();
    for pos in positions {
        let index = (pos.col as u32 + 2 * pos.row as u32) % 5;
        grid.set(pos, TokenKind::from_index(index as u8)).unwrap();
    }
    for col in 0..3 {
        grid.set(Pos::new(col, 0), Some(TokenKind::Cat)).unwrap();
    }
    grid
}
