//! Error types for grid access, configuration, and cascade resolution.

use thiserror::Error;

/// Coordinate access outside the grid extent.
///
/// Always a caller bug; never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({col}, {row}) is outside the grid")]
    OutOfBounds { col: u8, row: u8 },
}

impl GridError {
    pub fn code(self) -> &'static str {
        match self {
            GridError::OutOfBounds { .. } => "out_of_bounds",
        }
    }
}

/// Invalid static configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid dimension {name}={value} must be within 1..={max}")]
    Dimension {
        name: &'static str,
        value: u8,
        max: usize,
    },
    #[error("match_min_count={0} must be at least 2 and fit the grid")]
    MatchMin(u8),
    #[error("token_kinds={0} must be within 2..={max}", max = tui_match3_types::TokenKind::COUNT)]
    TokenKinds(u8),
    #[error("max_cascade_iterations must be positive")]
    IterationCeiling,
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        "invalid_config"
    }
}

/// Failure while draining a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CascadeError {
    /// The resolver hit its iteration ceiling without reaching a stable grid.
    ///
    /// Indicates a configuration where matches are statistically unavoidable
    /// (for example too few token kinds for the grid size).
    #[error("cascade did not stabilize after {iterations} iterations")]
    DidNotStabilize { iterations: u32 },
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl CascadeError {
    pub fn code(self) -> &'static str {
        match self {
            CascadeError::DidNotStabilize { .. } => "cascade_did_not_stabilize",
            CascadeError::Grid(e) => e.code(),
        }
    }
}
