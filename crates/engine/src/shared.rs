use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use tracing::warn;

use crate::engine::{Engine, SelectOutcome, SwapOutcome};
use crate::error::{EngineError, SwapRejected};
use crate::snapshot::EngineSnapshot;
use crate::types::Pos;

/// Cloneable handle for driving one engine from several threads.
///
/// Requests that arrive while another thread holds the engine (that is, while
/// a cascade is resolving and its listeners run) are rejected as busy
/// instead of queued.
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn request_swap(&self, a: Pos, b: Pos) -> Result<SwapOutcome, EngineError> {
        match self.try_engine() {
            Some(mut engine) => engine.request_swap(a, b),
            None => {
                warn!(?a, ?b, "swap rejected while resolving");
                Ok(SwapOutcome::Rejected(SwapRejected::Busy))
            }
        }
    }

    pub fn select(&self, pos: Pos) -> Result<SelectOutcome, EngineError> {
        match self.try_engine() {
            Some(mut engine) => engine.select(pos),
            None => Ok(SelectOutcome::Swap(SwapOutcome::Rejected(
                SwapRejected::Busy,
            ))),
        }
    }

    /// True while another thread holds the engine.
    pub fn is_busy(&self) -> bool {
        self.try_engine().is_none()
    }

    /// Blocks until the engine is free.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.with(|engine| engine.snapshot())
    }

    /// Run `f` with exclusive access, blocking until the engine is free.
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }

    fn try_engine(&self) -> Option<MutexGuard<'_, Engine>> {
        match self.inner.try_lock() {
            Ok(engine) => Some(engine),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}
