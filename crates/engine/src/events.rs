//! Engine events and the fan-out bus that delivers them.
//!
//! Every listener sees every event, in emission order. Two kinds of listener:
//! channel subscribers (`subscribe`) and callbacks (`on_event`). Channel
//! subscribers whose receiver was dropped are pruned on the next publish.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::core::{CascadeStep, Grid};
use crate::types::Pos;

/// Summary of one committed player action.
///
/// Exactly one is published per resolution, carrying the cumulative score delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// The swapped pair; `None` for a refresh not triggered by a swap.
    pub swapped: Option<(Pos, Pos)>,
    pub iterations: u32,
    pub cleared: u32,
    pub score_delta: u32,
    pub total_score: u32,
    pub moves: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// One clear-compact-refill iteration.
    CascadeStep(CascadeStep),
    /// A resolution finished.
    Resolved(ResolutionSummary),
    /// The grid had no legal swap and was regenerated.
    Reshuffled { attempts: u32, grid: Grid },
}

pub type Listener = Box<dyn FnMut(&EngineEvent) + Send>;

#[derive(Default)]
pub struct EventBus {
    senders: Vec<mpsc::Sender<EngineEvent>>,
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a channel subscriber.
    pub fn subscribe(&mut self) -> mpsc::Receiver<EngineEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Register a callback listener.
    pub fn on_event(&mut self, listener: impl FnMut(&EngineEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn publish(&mut self, event: EngineEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.len() + self.listeners.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("senders", &self.senders.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn summary(score_delta: u32) -> EngineEvent {
        EngineEvent::Resolved(ResolutionSummary {
            swapped: None,
            iterations: 1,
            cleared: 3,
            score_delta,
            total_score: score_delta,
            moves: 0,
        })
    }

    #[test]
    fn every_subscriber_receives_every_event() {
        let mut bus = EventBus::new();
        let rx1 = bus.subscribe();
        let rx2 = bus.subscribe();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.on_event(move |e| sink.lock().unwrap().push(e.clone()));

        bus.publish(summary(80));
        bus.publish(summary(90));

        for rx in [rx1, rx2] {
            let got: Vec<EngineEvent> = rx.try_iter().collect();
            assert_eq!(got, vec![summary(80), summary(90)]);
        }
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn dropped_receivers_are_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);
        let _keep = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(summary(80));
        assert_eq!(bus.subscriber_count(), 1);
    }
}
