//! Static grid configuration.
//!
//! Supplied once at construction; there is no runtime reconfiguration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{
    TokenKind, DEFAULT_COLUMNS, DEFAULT_MATCH_MIN, DEFAULT_ROWS, DEFAULT_TOKEN_KINDS, MAX_GRID_DIM,
};

/// Cascade iteration ceiling as a multiple of the grid's cell count.
pub const ITERATION_CEILING_FACTOR: u32 = 10;

/// Which cells seed the match pass that follows a refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecheckScope {
    /// Every cell whose content changed during compaction or refill.
    ///
    /// Any new run must contain a changed cell, so nothing is missed.
    ChangedCells,
    /// Every cell on the grid.
    FullGrid,
    /// Refilled cells plus a square neighbourhood of the given radius.
    ///
    /// Can miss runs formed purely by compaction shifts further away.
    Radius(u8),
}

impl RecheckScope {
    /// Parse `changed`, `full`, or `radius:N`.
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "changed" => Some(RecheckScope::ChangedCells),
            "full" => Some(RecheckScope::FullGrid),
            _ => s
                .strip_prefix("radius:")
                .and_then(|r| r.parse().ok())
                .map(RecheckScope::Radius),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub columns: u8,
    pub rows: u8,
    pub match_min_count: u8,
    pub token_kinds: u8,
    pub recheck: RecheckScope,
    pub max_cascade_iterations: u32,
}

impl GridConfig {
    pub fn new(columns: u8, rows: u8, match_min_count: u8, token_kinds: u8) -> Self {
        Self {
            columns,
            rows,
            match_min_count,
            token_kinds,
            recheck: RecheckScope::ChangedCells,
            max_cascade_iterations: default_ceiling(columns, rows),
        }
    }

    pub fn with_recheck(mut self, recheck: RecheckScope) -> Self {
        self.recheck = recheck;
        self
    }

    pub fn with_max_cascade_iterations(mut self, max: u32) -> Self {
        self.max_cascade_iterations = max;
        self
    }

    /// Read overrides from `MATCH3_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the reference defaults.
    pub fn from_env() -> Self {
        use std::env;

        let num = |key: &str, default: u8| -> u8 {
            env::var(key)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let columns = num("MATCH3_COLUMNS", DEFAULT_COLUMNS);
        let rows = num("MATCH3_ROWS", DEFAULT_ROWS);
        let match_min_count = num("MATCH3_MATCH_MIN", DEFAULT_MATCH_MIN);
        let token_kinds = num("MATCH3_TOKEN_KINDS", DEFAULT_TOKEN_KINDS);
        let recheck = env::var("MATCH3_RECHECK")
            .ok()
            .and_then(|s| RecheckScope::from_str(&s))
            .unwrap_or(RecheckScope::ChangedCells);

        Self::new(columns, rows, match_min_count, token_kinds).with_recheck(recheck)
    }

    pub fn cell_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("columns", self.columns), ("rows", self.rows)] {
            if value == 0 || value as usize > MAX_GRID_DIM {
                return Err(ConfigError::Dimension {
                    name,
                    value,
                    max: MAX_GRID_DIM,
                });
            }
        }
        if self.match_min_count < 2
            || (self.match_min_count > self.columns && self.match_min_count > self.rows)
        {
            return Err(ConfigError::MatchMin(self.match_min_count));
        }
        if self.token_kinds < 2 || self.token_kinds > TokenKind::COUNT {
            return Err(ConfigError::TokenKinds(self.token_kinds));
        }
        if self.max_cascade_iterations == 0 {
            return Err(ConfigError::IterationCeiling);
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_COLUMNS,
            DEFAULT_ROWS,
            DEFAULT_MATCH_MIN,
            DEFAULT_TOKEN_KINDS,
        )
    }
}

fn default_ceiling(columns: u8, rows: u8) -> u32 {
    (columns as u32 * rows as u32)
        .max(1)
        .saturating_mul(ITERATION_CEILING_FACTOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference() {
        let c = GridConfig::default();
        assert_eq!((c.columns, c.rows), (9, 10));
        assert_eq!(c.match_min_count, 3);
        assert_eq!(c.token_kinds, 5);
        assert_eq!(c.recheck, RecheckScope::ChangedCells);
        assert_eq!(c.max_cascade_iterations, 900);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_dimensions() {
        assert!(matches!(
            GridConfig::new(0, 10, 3, 5).validate(),
            Err(ConfigError::Dimension { name: "columns", .. })
        ));
        assert!(matches!(
            GridConfig::new(9, 33, 3, 5).validate(),
            Err(ConfigError::Dimension { name: "rows", .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_match_min_and_kinds() {
        assert_eq!(
            GridConfig::new(9, 10, 1, 5).validate(),
            Err(ConfigError::MatchMin(1))
        );
        assert_eq!(
            GridConfig::new(4, 4, 5, 5).validate(),
            Err(ConfigError::MatchMin(5))
        );
        assert_eq!(
            GridConfig::new(9, 10, 3, 1).validate(),
            Err(ConfigError::TokenKinds(1))
        );
        assert_eq!(
            GridConfig::new(9, 10, 3, 9).validate(),
            Err(ConfigError::TokenKinds(9))
        );
        assert_eq!(
            GridConfig::default()
                .with_max_cascade_iterations(0)
                .validate(),
            Err(ConfigError::IterationCeiling)
        );
    }

    #[test]
    fn recheck_scope_parsing() {
        assert_eq!(RecheckScope::from_str("changed"), Some(RecheckScope::ChangedCells));
        assert_eq!(RecheckScope::from_str(" FULL "), Some(RecheckScope::FullGrid));
        assert_eq!(RecheckScope::from_str("radius:2"), Some(RecheckScope::Radius(2)));
        assert_eq!(RecheckScope::from_str("radius:x"), None);
        assert_eq!(RecheckScope::from_str("everything"), None);
    }

    #[test]
    fn from_env_does_not_panic() {
        let _ = GridConfig::from_env();
    }
}
