use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CascadeError, ConfigError, GridError};

/// A swap request the engine declined.
///
/// Rejections are ordinary outcomes, reported to the caller as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapRejected {
    /// Another thread holds the engine through [`SharedEngine`](crate::SharedEngine).
    Busy,
    /// The two positions are not orthogonal neighbours.
    NotAdjacent,
    /// One of the positions holds no token.
    EmptyCell,
}

impl SwapRejected {
    pub fn code(self) -> &'static str {
        match self {
            SwapRejected::Busy => "busy_rejected",
            SwapRejected::NotAdjacent | SwapRejected::EmptyCell => "invalid_swap_request",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SwapRejected::Busy => "a cascade is still resolving",
            SwapRejected::NotAdjacent => "positions are not adjacent",
            SwapRejected::EmptyCell => "position holds no token",
        }
    }
}

/// Failures surfaced loudly. Anything here is a caller bug or a broken configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("position ({col}, {row}) is outside the grid")]
    OutOfBounds { col: u8, row: u8 },
    #[error("cascade did not stabilize after {iterations} iterations")]
    CascadeDidNotStabilize { iterations: u32 },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds { .. } => "out_of_bounds",
            EngineError::CascadeDidNotStabilize { .. } => "cascade_did_not_stabilize",
            EngineError::Config(e) => e.code(),
        }
    }
}

impl From<GridError> for EngineError {
    fn from(value: GridError) -> Self {
        match value {
            GridError::OutOfBounds { col, row } => EngineError::OutOfBounds { col, row },
        }
    }
}

impl From<CascadeError> for EngineError {
    fn from(value: CascadeError) -> Self {
        match value {
            CascadeError::DidNotStabilize { iterations } => {
                EngineError::CascadeDidNotStabilize { iterations }
            }
            CascadeError::Grid(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_codes() {
        assert_eq!(SwapRejected::Busy.code(), "busy_rejected");
        assert_eq!(SwapRejected::NotAdjacent.code(), "invalid_swap_request");
        assert_eq!(SwapRejected::EmptyCell.code(), "invalid_swap_request");
    }

    #[test]
    fn core_errors_convert() {
        let e: EngineError = GridError::OutOfBounds { col: 9, row: 0 }.into();
        assert_eq!(e, EngineError::OutOfBounds { col: 9, row: 0 });
        assert_eq!(e.code(), "out_of_bounds");

        let e: EngineError = CascadeError::DidNotStabilize { iterations: 900 }.into();
        assert_eq!(e.code(), "cascade_did_not_stabilize");
    }
}
