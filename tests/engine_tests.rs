//! Engine-level tests: swap requests, events, busy handling.

mod common;

use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use tui_match3::core::{find_all_matches, Grid, GridConfig, ScriptedTokens};
use tui_match3::engine::{
    Engine, EngineError, EngineEvent, SharedEngine, SwapOutcome, SwapRejected,
};
use tui_match3::types::{Pos, TokenKind};

fn fixture(grid: Grid, refills: Vec<TokenKind>) -> Engine {
    let mut engine =
        Engine::from_grid(GridConfig::default(), grid, Box::new(ScriptedTokens::new(refills)))
            .unwrap();
    engine.set_reshuffle_when_stuck(false);
    engine
}

#[test]
fn reference_refresh_yields_80_and_one_summary() {
    use TokenKind::*;
    let mut engine = fixture(common::reference_grid_with_bottom_triple(), vec![Cat, Dog, Cat]);
    let events = engine.subscribe();

    let matched = engine.detect([Pos::new(1, 0)]);
    assert_eq!(matched.len(), 3);

    let summary = engine.refresh([Pos::new(1, 0)]).unwrap();
    assert_eq!(summary.score_delta, 80);
    assert_eq!(engine.score(), 80);
    assert_eq!(engine.last_gain(), 80);

    let events: Vec<EngineEvent> = events.try_iter().collect();
    let resolved = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::Resolved(_)))
        .count();
    assert_eq!(resolved, 1);
    assert_eq!(events.last(), Some(&EngineEvent::Resolved(summary)));
}

#[test]
fn non_matching_swap_is_accepted_but_not_committed() {
    let mut engine = fixture(common::reference_grid_with_bottom_triple(), vec![TokenKind::Cat]);
    let before = engine.grid().clone();

    // (5,5) and (6,5) hold different kinds and no run forms either way.
    let outcome = engine.request_swap(Pos::new(5, 5), Pos::new(6, 5)).unwrap();
    assert_eq!(outcome, SwapOutcome::NoMatch);
    assert!(outcome.is_accepted());
    assert_eq!(engine.grid(), &before);
    assert_eq!(engine.moves(), 0);
}

#[test]
fn out_of_bounds_request_is_an_error() {
    let mut engine = Engine::new(GridConfig::default(), 5).unwrap();
    let err = engine.request_swap(Pos::new(8, 9), Pos::new(8, 10)).unwrap_err();
    assert_eq!(err, EngineError::OutOfBounds { col: 8, row: 10 });
    assert_eq!(err.code(), "out_of_bounds");
}

#[test]
fn hint_swap_commits_and_keeps_grid_settled() {
    let mut engine = Engine::new(GridConfig::default(), 11).unwrap();
    let events = engine.subscribe();

    for _ in 0..10 {
        let (a, b) = engine.hint().expect("engine keeps a legal swap available");
        let outcome = engine.request_swap(a, b).unwrap();
        assert!(matches!(outcome, SwapOutcome::Resolved(_)));
        assert!(engine.grid().is_full());
        assert!(find_all_matches(engine.grid(), 3).is_empty());
    }
    assert_eq!(engine.moves(), 10);

    let summaries: Vec<_> = events
        .try_iter()
        .filter_map(|e| match e {
            EngineEvent::Resolved(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(summaries.len(), 10);
    let total: u32 = summaries.iter().map(|s| s.score_delta).sum();
    assert_eq!(total, engine.score());
}

#[test]
fn every_listener_sees_the_same_events() {
    let mut engine = Engine::new(GridConfig::default(), 21).unwrap();
    let first = engine.subscribe();
    let second = engine.subscribe();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    engine.on_event(move |e| sink.lock().unwrap().push(e.clone()));

    let (a, b) = engine.hint().unwrap();
    engine.request_swap(a, b).unwrap();

    let first: Vec<EngineEvent> = first.try_iter().collect();
    let second: Vec<EngineEvent> = second.try_iter().collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(*seen.lock().unwrap(), first);
}

#[test]
fn cascade_steps_carry_before_and_after_grids() {
    let mut engine = Engine::new(GridConfig::default(), 33).unwrap();
    let events = engine.subscribe();
    let start = engine.grid().clone();

    let (a, b) = engine.hint().unwrap();
    engine.request_swap(a, b).unwrap();

    let steps: Vec<_> = events
        .try_iter()
        .filter_map(|e| match e {
            EngineEvent::CascadeStep(step) => Some(step),
            _ => None,
        })
        .collect();
    assert!(!steps.is_empty());

    let mut swapped = start;
    swapped.swap(a, b).unwrap();
    assert_eq!(steps[0].before, swapped);
    for pair in steps.windows(2) {
        assert_eq!(pair[0].after, pair[1].before);
    }
    for step in &steps {
        assert_eq!(step.cleared.len(), step.refills.len());
        assert!(step.after.is_full());
    }
}

#[test]
fn concurrent_request_during_resolution_is_busy() {
    use TokenKind::*;
    let mut engine = fixture(common::reference_grid_with_bottom_triple(), vec![Cat, Dog, Cat]);

    let entered = Arc::new(Barrier::new(2));
    let release = Arc::new(Barrier::new(2));
    let (e, r) = (Arc::clone(&entered), Arc::clone(&release));
    engine.on_event(move |event| {
        if matches!(event, EngineEvent::CascadeStep(_)) {
            e.wait();
            r.wait();
        }
    });

    let shared = SharedEngine::new(engine);
    let worker = {
        let shared = shared.clone();
        thread::spawn(move || shared.with(|engine| engine.refresh([Pos::new(1, 0)])))
    };

    entered.wait();
    let outcome = shared.request_swap(Pos::new(4, 4), Pos::new(5, 4)).unwrap();
    assert_eq!(outcome, SwapOutcome::Rejected(SwapRejected::Busy));
    assert_eq!(SwapRejected::Busy.code(), "busy_rejected");
    release.wait();

    let summary = worker.join().unwrap().unwrap();
    assert_eq!(summary.score_delta, 80);
    assert!(!shared.is_busy());
}
