//! TUI Match-3 (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `tui_match3::{types, core, engine, input, term}`
//! and hosts the pieces shared by the binary and the integration tests.

pub mod autoplay;
pub mod logging;
pub mod playback;

pub use tui_match3_core as core;
pub use tui_match3_engine as engine;
pub use tui_match3_input as input;
pub use tui_match3_term as term;
pub use tui_match3_types as types;
