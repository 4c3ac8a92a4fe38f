//! Terminal match-3 runner (default binary).
//!
//! `tui-match3` plays interactively with crossterm input and the
//! framebuffer renderer. `tui-match3 autoplay [...]` runs headless and prints
//! engine events as JSON lines.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use tui_match3::autoplay::{parse_autoplay_args, run_autoplay, seed_from_env};
use tui_match3::core::GridConfig;
use tui_match3::engine::{Engine, EngineEvent, SelectOutcome, SwapOutcome};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::logging;
use tui_match3::playback::Playback;
use tui_match3::term::{FrameBuffer, GameView, Overlay, TerminalRenderer, Viewport};
use tui_match3::types::{Pos, UiAction};

const IDLE_POLL: Duration = Duration::from_millis(250);
const PLAYBACK_POLL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Some(config) = parse_autoplay_args(&args)? {
        logging::init_stderr_logging()?;
        let stdout = io::stdout();
        let mut out = io::BufWriter::new(stdout.lock());
        run_autoplay(&config, &mut out)?;
        return Ok(());
    }

    logging::init_file_logging()?;
    let seed = seed_from_env();
    let engine = Engine::new(GridConfig::from_env(), seed).context("engine setup")?;
    info!(seed, "starting interactive session");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Front-end state that is not part of the engine.
struct Ui {
    cursor: Cursor,
    hint: Option<(Pos, Pos)>,
    message: Option<String>,
    playback: Playback,
}

fn run(term: &mut TerminalRenderer, mut engine: Engine) -> Result<()> {
    let events = engine.subscribe();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut ui = Ui {
        cursor: Cursor::new(engine.config().columns, engine.config().rows),
        hint: None,
        message: None,
        playback: Playback::new(),
    };

    loop {
        // Queue animation frames for whatever the engine just published.
        let live = engine.snapshot();
        for event in events.try_iter() {
            match &event {
                EngineEvent::CascadeStep(step) => ui.playback.push_step(&live, step),
                EngineEvent::Resolved(summary) => {
                    ui.message = Some(format!(
                        "+{} in {} cascade(s)",
                        summary.score_delta, summary.iterations
                    ));
                }
                EngineEvent::Reshuffled { .. } => {
                    ui.message = Some("No moves left - reshuffled".to_string());
                }
            }
        }
        ui.playback.advance(Instant::now());

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snap = ui.playback.frame().unwrap_or(&live);
        let overlay = Overlay {
            cursor: Some(ui.cursor.pos()),
            hint: ui.hint,
            message: ui.message.as_deref(),
        };
        view.render_into(snap, &overlay, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = if ui.playback.is_active() {
            PLAYBACK_POLL
        } else {
            IDLE_POLL
        };
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                // Input waits until the cascade has been shown.
                if ui.playback.is_active() {
                    continue;
                }
                if let Some(action) = handle_key_event(key) {
                    apply_action(&mut engine, &mut ui, action)?;
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn apply_action(engine: &mut Engine, ui: &mut Ui, action: UiAction) -> Result<()> {
    debug!(?action, "ui action");
    match action {
        UiAction::MoveCursor(direction) => {
            ui.cursor.step(direction);
        }
        UiAction::Select => {
            ui.message = match engine.select(ui.cursor.pos())? {
                SelectOutcome::Selected(_) | SelectOutcome::Deselected => None,
                SelectOutcome::Swap(SwapOutcome::Rejected(reason)) => {
                    Some(reason.message().to_string())
                }
                SelectOutcome::Swap(SwapOutcome::NoMatch) => Some("No match".to_string()),
                // The Resolved event fills in the message.
                SelectOutcome::Swap(SwapOutcome::Resolved(_)) => {
                    ui.hint = None;
                    None
                }
            };
        }
        UiAction::Cancel => {
            engine.clear_selection();
            ui.message = None;
        }
        UiAction::Hint => {
            ui.hint = engine.hint();
            if let Some((a, _)) = ui.hint {
                ui.cursor.jump_to(a);
            }
        }
        UiAction::Restart => {
            engine.restart()?;
            ui.playback.clear();
            ui.hint = None;
            ui.message = Some("New game".to_string());
        }
    }
    Ok(())
}
