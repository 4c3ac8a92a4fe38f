//! Core grid logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 resolution rules: the authoritative grid,
//! match detection, swap lookahead, scoring, and the cascade loop. It has
//! **no dependencies** on terminal I/O or the engine's event plumbing:
//!
//! - **Deterministic**: Same seed produces identical refills
//! - **Testable**: Token sources can be scripted for exact cascades
//! - **Portable**: Runs headless, in the terminal front-end, or in benches
//!
//! # Module Structure
//!
//! - [`grid`]: bounds-checked cell storage, swap, per-column compaction
//! - [`matcher`]: qualifying-run detection from seed cells
//! - [`swap`]: side-effect-free "would this swap match?" lookahead
//! - [`scoring`]: `floor(n / m) * 50 + n * 10` per cleared run
//! - [`cascade`]: clear, compact, refill, re-match until stable
//! - [`rng`]: seeded and scripted token sources
//! - [`config`]: static grid configuration
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{cascade, find_matches, Grid, GridConfig, ScriptedTokens};
//! use tui_match3_types::{Pos, TokenKind};
//!
//! let mut grid = Grid::from_rows(&["DPR", "RDP", "CCC"]).unwrap();
//! let config = GridConfig::new(3, 3, 3, 5);
//!
//! let matches = find_matches(&grid, [Pos::new(1, 0)], 3);
//! assert_eq!(matches.len(), 3);
//!
//! let mut source = ScriptedTokens::new(vec![TokenKind::Monkey, TokenKind::Cat, TokenKind::Monkey]);
//! let report = cascade::resolve(&mut grid, [Pos::new(1, 0)], &config, &mut source).unwrap();
//! assert_eq!(report.total_score, 80);
//! assert!(grid.is_full());
//! ```

pub mod cascade;
pub mod config;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod swap;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use cascade::{CascadeReport, CascadeResolver, CascadeStep, Placement, ScoredRun};
pub use config::{GridConfig, RecheckScope};
pub use error::{CascadeError, ConfigError, GridError};
pub use grid::{DropMove, Grid};
pub use matcher::{find_all_matches, find_matches, MatchSet, Run};
pub use rng::{RandomTokens, ScriptedTokens, TokenSource};
pub use scoring::{calculate_score, run_score, ScoreResult};
pub use swap::{find_legal_swap, legal_swaps, would_match};
