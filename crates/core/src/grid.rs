//! Grid module - the authoritative cell array
//!
//! The grid is `columns x rows` cells, each empty or holding one token kind.
//! Uses a flat row-major vector (`row * columns + col`) for cache locality.
//! Coordinates: (col, row) where row 0 is the bottom; gravity pulls toward row 0.
//!
//! The grid enforces bounds only. Game rules (adjacency, legality) belong to callers.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::rng::TokenSource;
use crate::types::{Cell, Pos, TokenKind, MAX_GRID_DIM};

/// A token moved down a column by compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropMove {
    pub from: Pos,
    pub to: Pos,
    pub kind: TokenKind,
}

/// The game grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    columns: u8,
    rows: u8,
    /// Flat array of cells, row-major order (row * columns + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Dimensions are clamped to `1..=MAX_GRID_DIM`; validated configs never hit the clamp.
    pub fn new(columns: u8, rows: u8) -> Self {
        let columns = columns.clamp(1, MAX_GRID_DIM as u8);
        let rows = rows.clamp(1, MAX_GRID_DIM as u8);
        Self {
            columns,
            rows,
            cells: vec![None; columns as usize * rows as usize],
        }
    }

    /// Create a fully populated grid that avoids forming runs of `match_min` while filling.
    ///
    /// Each cell draws among the kinds that would not complete a run with the
    /// `match_min - 1` cells to its left or below. When every kind is excluded
    /// (only possible with two kinds) any kind is drawn.
    pub fn generate(
        columns: u8,
        rows: u8,
        match_min: u8,
        token_kinds: u8,
        source: &mut dyn TokenSource,
    ) -> Self {
        let mut grid = Self::new(columns, rows);
        let mut candidates: ArrayVec<TokenKind, { TokenKind::COUNT as usize }> = ArrayVec::new();

        for row in 0..grid.rows {
            for col in 0..grid.columns {
                let pos = Pos::new(col, row);
                let left = grid.repeated_kind_before(pos, -1, 0, match_min);
                let below = grid.repeated_kind_before(pos, 0, -1, match_min);

                candidates.clear();
                for kind in TokenKind::ALL.iter().take(token_kinds as usize) {
                    if Some(*kind) != left && Some(*kind) != below {
                        candidates.push(*kind);
                    }
                }

                let kind = if candidates.is_empty() {
                    source.draw_kind(token_kinds)
                } else {
                    candidates[source.next_index(candidates.len() as u8) as usize]
                };
                let idx = grid.idx(col, row);
                grid.cells[idx] = Some(kind);
            }
        }
        grid
    }

    /// Kind shared by the `match_min - 1` cells preceding `pos` along `(dc, dr)`, if any.
    fn repeated_kind_before(&self, pos: Pos, dc: i8, dr: i8, match_min: u8) -> Option<TokenKind> {
        let need = match_min.saturating_sub(1);
        if need == 0 {
            return None;
        }
        let mut kind = None;
        let mut cur = pos;
        for _ in 0..need {
            cur = cur.offset(dc, dr)?;
            let k = self.kind_at(cur)?;
            match kind {
                None => kind = Some(k),
                Some(prev) if prev != k => return None,
                Some(_) => {}
            }
        }
        kind
    }

    /// Build a grid from rows of letters, top row first.
    ///
    /// Letters follow [`TokenKind::letter`]; `.` is an empty cell. All rows must
    /// have the same length. Intended for fixtures and tooling.
    ///
    /// ```
    /// use tui_match3_core::Grid;
    /// use tui_match3_types::{Pos, TokenKind};
    ///
    /// let grid = Grid::from_rows(&["DC.", "CCP"]).unwrap();
    /// assert_eq!(grid.get(Pos::new(0, 0)), Ok(Some(TokenKind::Cat)));
    /// assert_eq!(grid.get(Pos::new(2, 1)), Ok(None));
    /// ```
    pub fn from_rows(rows_top_first: &[&str]) -> Option<Self> {
        let rows = rows_top_first.len();
        let columns = rows_top_first.first()?.chars().count();
        if rows == 0 || columns == 0 || rows > MAX_GRID_DIM || columns > MAX_GRID_DIM {
            return None;
        }

        let mut grid = Self::new(columns as u8, rows as u8);
        for (i, line) in rows_top_first.iter().enumerate() {
            if line.chars().count() != columns {
                return None;
            }
            let row = (rows - 1 - i) as u8;
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(TokenKind::from_letter(other)?),
                };
                let idx = grid.idx(col as u8, row);
                grid.cells[idx] = cell;
            }
        }
        Some(grid)
    }

    /// Render back to fixture rows, top row first.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.rows)
            .rev()
            .map(|row| {
                (0..self.columns)
                    .map(|col| match self.cells[self.idx(col, row)] {
                        Some(kind) => kind.letter(),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn idx(&self, col: u8, row: u8) -> usize {
        (row as usize) * (self.columns as usize) + (col as usize)
    }

    #[inline(always)]
    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.col >= self.columns || pos.row >= self.rows {
            return None;
        }
        Some(self.idx(pos.col, pos.row))
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    fn check(&self, pos: Pos) -> Result<usize, GridError> {
        self.index(pos).ok_or(GridError::OutOfBounds {
            col: pos.col,
            row: pos.row,
        })
    }

    /// Get the cell at `pos`.
    pub fn get(&self, pos: Pos) -> Result<Cell, GridError> {
        self.check(pos).map(|idx| self.cells[idx])
    }

    /// Set the cell at `pos`. No rule validation.
    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GridError> {
        let idx = self.check(pos)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Exchange the contents of two cells.
    ///
    /// Both positions are checked before anything is written, so a failed
    /// swap leaves the grid untouched.
    pub fn swap(&mut self, a: Pos, b: Pos) -> Result<(), GridError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Token kind at `pos`; `None` when empty or out of bounds.
    #[inline]
    pub fn kind_at(&self, pos: Pos) -> Option<TokenKind> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// Check that no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// All positions, row by row from the bottom.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| Pos::new(col, row)))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of one column, bottom to top.
    pub fn column(&self, col: u8) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).map(move |row| self.kind_at(Pos::new(col, row)))
    }

    /// Apply gravity to one column.
    ///
    /// Occupied cells slide toward row 0 keeping their relative order; the freed
    /// rows at the top are left empty. Moves are appended to `moves`. Returns the
    /// first empty row (equal to `rows` when the column is full).
    pub fn compact_column(&mut self, col: u8, moves: &mut Vec<DropMove>) -> u8 {
        if col >= self.columns {
            return self.rows;
        }

        // Two-pointer pass from the bottom, same shape as a stable partition.
        let mut write_row: u8 = 0;
        for read_row in 0..self.rows {
            let read_idx = self.idx(col, read_row);
            let Some(kind) = self.cells[read_idx] else {
                continue;
            };
            if write_row != read_row {
                let write_idx = self.idx(col, write_row);
                self.cells[write_idx] = Some(kind);
                self.cells[read_idx] = None;
                moves.push(DropMove {
                    from: Pos::new(col, read_row),
                    to: Pos::new(col, write_row),
                    kind,
                });
            }
            write_row += 1;
        }
        write_row
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
