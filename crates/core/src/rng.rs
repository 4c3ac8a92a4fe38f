//! RNG module - token kind sources for fill and refill
//!
//! Refills draw uniformly among the enabled kinds. The source sits behind a
//! trait so play uses a seeded PCG stream while tests script exact kinds.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::types::TokenKind;

/// Supplier of token kinds.
pub trait TokenSource {
    /// Uniform index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: u8) -> u8;

    /// Draw one of the first `kinds` token kinds.
    fn draw_kind(&mut self, kinds: u8) -> TokenKind {
        let kinds = kinds.clamp(1, TokenKind::COUNT);
        TokenKind::from_index(self.next_index(kinds)).unwrap_or(TokenKind::Cat)
    }
}

/// Seeded PCG source. Same seed, same stream.
#[derive(Debug, Clone)]
pub struct RandomTokens {
    rng: Pcg64,
    seed: u64,
}

impl RandomTokens {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl TokenSource for RandomTokens {
    fn next_index(&mut self, bound: u8) -> u8 {
        self.rng.gen_range(0..bound.max(1))
    }
}

/// Replays a fixed sequence of kinds, cycling when exhausted.
///
/// Used by tests that need deterministic refills.
#[derive(Debug, Clone)]
pub struct ScriptedTokens {
    queue: VecDeque<TokenKind>,
    drawn: usize,
}

impl ScriptedTokens {
    pub fn new(kinds: Vec<TokenKind>) -> Self {
        Self {
            queue: kinds.into(),
            drawn: 0,
        }
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl TokenSource for ScriptedTokens {
    fn next_index(&mut self, bound: u8) -> u8 {
        let Some(kind) = self.queue.pop_front() else {
            return 0;
        };
        self.queue.push_back(kind);
        self.drawn += 1;
        kind.index() % bound.max(1)
    }
}
