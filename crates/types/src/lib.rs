//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, making them usable in any
//! context (grid resolution, engine events, terminal rendering).
//!
//! # Coordinates
//!
//! Cells are addressed by `(column, row)`:
//!
//! - **Column**: `0..columns`, left to right
//! - **Row**: `0..rows`, bottom to top (row 0 is the floor gravity pulls toward)
//!
//! # Reference Configuration
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_COLUMNS` | 9 | Grid width |
//! | `DEFAULT_ROWS` | 10 | Grid height |
//! | `DEFAULT_MATCH_MIN` | 3 | Shortest run that clears |
//! | `DEFAULT_TOKEN_KINDS` | 5 | Distinct token kinds in play |
//! | `MAX_GRID_DIM` | 32 | Upper bound for either dimension |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{Pos, TokenKind, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! let a = Pos::new(3, 4);
//! assert!(a.is_adjacent(Pos::new(3, 5)));
//! assert!(!a.is_adjacent(Pos::new(4, 5)));
//!
//! assert_eq!(TokenKind::from_str("panda"), Some(TokenKind::Panda));
//! assert_eq!(TokenKind::from_index(0), Some(TokenKind::Cat));
//!
//! assert_eq!(DEFAULT_COLUMNS, 9);
//! assert_eq!(DEFAULT_ROWS, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Reference grid width (9 columns)
pub const DEFAULT_COLUMNS: u8 = 9;

/// Reference grid height (10 rows)
pub const DEFAULT_ROWS: u8 = 10;

/// Shortest same-kind run that qualifies for clearing
pub const DEFAULT_MATCH_MIN: u8 = 3;

/// Number of token kinds drawn from in the reference game
pub const DEFAULT_TOKEN_KINDS: u8 = 5;

/// Largest supported column or row count.
///
/// Keeps per-axis scratch buffers on the stack.
pub const MAX_GRID_DIM: usize = 32;

/// Combo bonus awarded per full `match_min` multiple in a run
pub const COMBO_POINTS: u32 = 50;

/// Linear bonus awarded per token in a run
pub const TOKEN_POINTS: u32 = 10;

/// The closed set of token kinds.
///
/// The first five are the reference set; configurations may enable up to
/// [`TokenKind::COUNT`] kinds. Kinds are enabled in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Cat,
    Dog,
    Monkey,
    Panda,
    Rabbit,
    Fox,
    Owl,
    Bear,
}

impl TokenKind {
    /// Total number of defined kinds
    pub const COUNT: u8 = 8;

    /// All kinds in declaration order
    pub const ALL: [TokenKind; 8] = [
        TokenKind::Cat,
        TokenKind::Dog,
        TokenKind::Monkey,
        TokenKind::Panda,
        TokenKind::Rabbit,
        TokenKind::Fox,
        TokenKind::Owl,
        TokenKind::Bear,
    ];

    /// Look up a kind by its declaration index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Declaration index of this kind
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_match3_types::TokenKind;
    ///
    /// assert_eq!(TokenKind::from_str("Cat"), Some(TokenKind::Cat));
    /// assert_eq!(TokenKind::from_str("owl"), Some(TokenKind::Owl));
    /// assert_eq!(TokenKind::from_str("dragon"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cat" => Some(TokenKind::Cat),
            "dog" => Some(TokenKind::Dog),
            "monkey" => Some(TokenKind::Monkey),
            "panda" => Some(TokenKind::Panda),
            "rabbit" => Some(TokenKind::Rabbit),
            "fox" => Some(TokenKind::Fox),
            "owl" => Some(TokenKind::Owl),
            "bear" => Some(TokenKind::Bear),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Cat => "cat",
            TokenKind::Dog => "dog",
            TokenKind::Monkey => "monkey",
            TokenKind::Panda => "panda",
            TokenKind::Rabbit => "rabbit",
            TokenKind::Fox => "fox",
            TokenKind::Owl => "owl",
            TokenKind::Bear => "bear",
        }
    }

    /// Single uppercase letter used in grid fixtures and terminal glyphs
    pub fn letter(&self) -> char {
        match self {
            TokenKind::Cat => 'C',
            TokenKind::Dog => 'D',
            TokenKind::Monkey => 'M',
            TokenKind::Panda => 'P',
            TokenKind::Rabbit => 'R',
            TokenKind::Fox => 'F',
            TokenKind::Owl => 'O',
            TokenKind::Bear => 'B',
        }
    }

    /// Inverse of [`TokenKind::letter`] (case-insensitive)
    pub fn from_letter(ch: char) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.letter() == ch.to_ascii_uppercase())
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell (only observable mid-cascade)
/// - `Some(TokenKind)`: Cell occupied by a token of that kind
pub type Cell = Option<TokenKind>;

/// Logical grid coordinate.
///
/// A token's position is always the cell that holds it; nothing else caches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub col: u8,
    pub row: u8,
}

impl Pos {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Manhattan distance between two positions
    pub fn manhattan(self, other: Pos) -> u16 {
        (self.col.abs_diff(other.col) as u16) + (self.row.abs_diff(other.row) as u16)
    }

    /// Two positions are adjacent iff they differ by exactly one step on one axis.
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.manhattan(other) == 1
    }

    /// Step one cell along `(dc, dr)`, returning `None` below zero.
    ///
    /// The upper bound is the grid's concern.
    pub fn offset(self, dc: i8, dr: i8) -> Option<Pos> {
        let col = self.col as i16 + dc as i16;
        let row = self.row as i16 + dr as i16;
        if col < 0 || row < 0 || col > u8::MAX as i16 || row > u8::MAX as i16 {
            return None;
        }
        Some(Pos::new(col as u8, row as u8))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Along a row (column varies)
    Horizontal,
    /// Along a column (row varies)
    Vertical,
}

impl Axis {
    /// Unit step `(dc, dr)` in the positive direction
    pub fn step(self) -> (i8, i8) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
        }
    }
}

/// Screen direction for cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    /// Toward the top row
    Up,
    /// Toward row 0
    Down,
}

/// Front-end actions produced by input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    MoveCursor(Direction),
    /// Tap the cell under the cursor
    Select,
    /// Drop the current selection
    Cancel,
    /// Show a legal swap
    Hint,
    Restart,
}
