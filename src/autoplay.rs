//! Headless autoplay: plays hint moves on a seeded engine and prints every
//! engine event as one JSON line.
//!
//! ```text
//! tui-match3 autoplay --seed 7 --moves 50 --columns 9 --rows 10 --recheck full
//! ```

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::core::{GridConfig, RecheckScope};
use crate::engine::Engine;

pub const DEFAULT_AUTOPLAY_MOVES: u32 = 20;
pub const DEFAULT_SEED: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    pub grid: GridConfig,
    pub seed: u64,
    pub moves: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplayReport {
    /// Swaps that were committed.
    pub moves: u32,
    pub score: u32,
    /// JSON lines written.
    pub events: usize,
}

/// Seed from `MATCH3_SEED`, falling back to [`DEFAULT_SEED`].
pub fn seed_from_env() -> u64 {
    std::env::var("MATCH3_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_SEED)
}

/// `Ok(None)` when the arguments are not an `autoplay` invocation.
///
/// Grid flags override the `MATCH3_*` environment.
pub fn parse_autoplay_args(args: &[String]) -> Result<Option<AutoplayConfig>> {
    if args.first().map(String::as_str) != Some("autoplay") {
        return Ok(None);
    }

    let mut grid = GridConfig::from_env();
    let mut seed = seed_from_env();
    let mut moves = DEFAULT_AUTOPLAY_MOVES;

    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let mut value = || {
            rest.next()
                .map(String::as_str)
                .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))
        };
        match flag.as_str() {
            "--seed" => seed = parse_num(flag, value()?)?,
            "--moves" => moves = parse_num(flag, value()?)?,
            "--columns" => grid.columns = parse_num(flag, value()?)?,
            "--rows" => grid.rows = parse_num(flag, value()?)?,
            "--match-min" => grid.match_min_count = parse_num(flag, value()?)?,
            "--kinds" => grid.token_kinds = parse_num(flag, value()?)?,
            "--recheck" => {
                let v = value()?;
                grid.recheck = RecheckScope::from_str(v)
                    .ok_or_else(|| anyhow!("autoplay: invalid --recheck value: {}", v))?;
            }
            other => return Err(anyhow!("autoplay: unknown argument: {}", other)),
        }
    }

    // Dimensions may have changed; keep the ceiling proportional.
    let grid = GridConfig::new(grid.columns, grid.rows, grid.match_min_count, grid.token_kinds)
        .with_recheck(grid.recheck);
    Ok(Some(AutoplayConfig { grid, seed, moves }))
}

fn parse_num<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("autoplay: invalid {} value: {}", flag, value))
}

/// Play up to `config.moves` hinted swaps, writing each engine event to `out`.
pub fn run_autoplay<W: Write>(config: &AutoplayConfig, out: &mut W) -> Result<AutoplayReport> {
    let mut engine = Engine::new(config.grid, config.seed).context("autoplay: engine setup")?;
    let events = engine.subscribe();
    let mut report = AutoplayReport::default();

    for _ in 0..config.moves {
        let Some((a, b)) = engine.hint() else {
            warn!("no legal swap left");
            break;
        };
        let outcome = engine.request_swap(a, b)?;
        if outcome.summary().is_some() {
            report.moves += 1;
        }
        for event in events.try_iter() {
            serde_json::to_writer(&mut *out, &event)?;
            out.write_all(b"\n")?;
            report.events += 1;
        }
    }
    out.flush()?;

    report.score = engine.score();
    info!(
        seed = config.seed,
        moves = report.moves,
        score = report.score,
        "autoplay finished"
    );
    Ok(report)
}
