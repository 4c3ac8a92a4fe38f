//! Replays cascade steps for the terminal front-end.
//!
//! The engine commits a whole resolution at once; this queue turns each
//! [`CascadeStep`] into two timed frames (matched cells flashing on the
//! `before` grid, then the refilled `after` grid) so the player can follow it.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::core::CascadeStep;
use crate::engine::EngineSnapshot;

pub const FLASH_MS: u64 = 180;
pub const SETTLE_MS: u64 = 120;

#[derive(Debug, Default)]
pub struct Playback {
    frames: VecDeque<(EngineSnapshot, Duration)>,
    /// When the front frame became visible.
    shown_at: Option<Instant>,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the frames for `step`. `base` supplies the counters shown alongside.
    pub fn push_step(&mut self, base: &EngineSnapshot, step: &CascadeStep) {
        let mut flash = base.clone();
        flash.grid.clone_from(&step.before);
        flash.flash = step.cleared.iter().map(|p| p.pos).collect();
        flash.selected = None;
        flash.busy = true;
        self.frames
            .push_back((flash, Duration::from_millis(FLASH_MS)));

        let mut settled = base.clone();
        settled.grid.clone_from(&step.after);
        settled.flash.clear();
        settled.selected = None;
        settled.busy = true;
        self.frames
            .push_back((settled, Duration::from_millis(SETTLE_MS)));
    }

    /// Drop frames whose time is up.
    pub fn advance(&mut self, now: Instant) {
        while let Some(hold) = self.frames.front().map(|(_, hold)| *hold) {
            let shown_at = *self.shown_at.get_or_insert(now);
            if now.saturating_duration_since(shown_at) < hold {
                return;
            }
            self.frames.pop_front();
            self.shown_at = Some(shown_at + hold);
        }
        self.shown_at = None;
    }

    /// Frame to draw instead of the live snapshot, if any.
    pub fn frame(&self) -> Option<&EngineSnapshot> {
        self.frames.front().map(|(snap, _)| snap)
    }

    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.shown_at = None;
    }
}
