//! Engine - the single owner of grid state
//!
//! Wraps the core rules with everything a front-end needs:
//!
//! - swap requests with validation outcomes ([`Engine::request_swap`])
//! - two-tap selection ([`Engine::select`])
//! - event fan-out for animation and logging ([`Engine::subscribe`], [`Engine::on_event`])
//! - score, move, and hint bookkeeping
//!
//! All mutation goes through `&mut Engine`, so resolutions never interleave.
//! [`SharedEngine`] adds busy rejection for callers on other threads.

pub mod engine;
pub mod error;
pub mod events;
pub mod shared;
pub mod snapshot;

pub use tui_match3_core as core;
pub use tui_match3_types as types;

pub use engine::{Engine, SelectOutcome, SwapOutcome, MAX_RESHUFFLE_ATTEMPTS};
pub use error::{EngineError, SwapRejected};
pub use events::{EngineEvent, EventBus, Listener, ResolutionSummary};
pub use shared::SharedEngine;
pub use snapshot::EngineSnapshot;
