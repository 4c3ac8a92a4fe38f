//! Terminal rendering for the match-3 front-end.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is flushed to
//! the terminal with run-length diffs:
//!
//! - [`GameView`] turns an engine snapshot into cells (pure, testable)
//! - [`TerminalRenderer`] encodes frames with crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_match3_engine as engine;
pub use tui_match3_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
