//! Terminal input module.
//!
//! Independent of the engine. Maps `crossterm` key events into
//! [`crate::types::UiAction`] and tracks the keyboard cursor.

pub mod cursor;
pub mod map;

pub use tui_match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit};
