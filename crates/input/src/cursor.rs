//! Keyboard cursor over the grid.

use crate::types::{Direction, Pos};

/// Cell the player is pointing at, clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Pos,
    columns: u8,
    rows: u8,
}

impl Cursor {
    /// Cursor at the centre of a `columns x rows` grid.
    pub fn new(columns: u8, rows: u8) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            pos: Pos::new(columns / 2, rows / 2),
            columns,
            rows,
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Move one cell; stays put at the edges. Returns whether it moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        let (dc, dr) = match direction {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        };
        match self.pos.offset(dc, dr) {
            Some(next) if next.col < self.columns && next.row < self.rows => {
                self.pos = next;
                true
            }
            _ => false,
        }
    }

    pub fn jump_to(&mut self, pos: Pos) {
        self.pos = Pos::new(pos.col.min(self.columns - 1), pos.row.min(self.rows - 1));
    }
}
