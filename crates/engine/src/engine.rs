use std::sync::mpsc;

use tracing::{debug, info, instrument, warn};

use crate::core::{
    find_legal_swap, find_matches, would_match, CascadeReport, CascadeResolver, Grid, GridConfig,
    MatchSet, RandomTokens, TokenSource,
};
use crate::error::{EngineError, SwapRejected};
use crate::events::{EngineEvent, EventBus, ResolutionSummary};
use crate::snapshot::EngineSnapshot;
use crate::types::Pos;

/// Regeneration attempts before giving up on finding a grid with a legal swap.
pub const MAX_RESHUFFLE_ATTEMPTS: u32 = 16;

/// Result of a swap request that did not fail loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Declined without touching the grid.
    Rejected(SwapRejected),
    /// Valid pair, but the swap forms no run; the grid is unchanged.
    NoMatch,
    /// The swap was committed and the cascade drained.
    Resolved(ResolutionSummary),
}

impl SwapOutcome {
    /// True when the request passed validation, whether or not it matched.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, SwapOutcome::Rejected(_))
    }

    pub fn summary(&self) -> Option<&ResolutionSummary> {
        match self {
            SwapOutcome::Resolved(s) => Some(s),
            _ => None,
        }
    }
}

/// Result of a tap on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First tap; the cell is now selected.
    Selected(Pos),
    /// Second tap on the selected cell.
    Deselected,
    /// Second tap on another cell; a swap was attempted and the selection cleared.
    Swap(SwapOutcome),
}

/// Owns the authoritative grid and serializes every mutation of it.
///
/// Between resolutions the grid is fully occupied and, for engines built with
/// [`Engine::new`], free of runs. Every committed action publishes its cascade
/// steps followed by exactly one [`EngineEvent::Resolved`].
pub struct Engine {
    config: GridConfig,
    grid: Grid,
    source: Box<dyn TokenSource + Send>,
    bus: EventBus,
    selected: Option<Pos>,
    score: u32,
    moves: u32,
    last_gain: u32,
    reshuffle_when_stuck: bool,
}

impl Engine {
    /// Build an engine with a seeded token stream and a settled starting grid.
    pub fn new(config: GridConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_source(config, Box::new(RandomTokens::new(seed)))
    }

    /// Like [`Engine::new`] with a caller-supplied token source.
    pub fn with_source(
        config: GridConfig,
        mut source: Box<dyn TokenSource + Send>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let grid = settled_grid(&config, source.as_mut())?;
        let mut engine = Self::assemble(config, grid, source);
        engine.ensure_playable()?;
        info!(
            columns = config.columns,
            rows = config.rows,
            kinds = config.token_kinds,
            "engine ready"
        );
        Ok(engine)
    }

    /// Adopt an existing grid as-is. Dimensions come from the grid.
    ///
    /// Runs already on the grid stay until something seeds them; holes are
    /// filled by the next resolution.
    pub fn from_grid(
        config: GridConfig,
        grid: Grid,
        source: Box<dyn TokenSource + Send>,
    ) -> Result<Self, EngineError> {
        let config = GridConfig {
            columns: grid.columns(),
            rows: grid.rows(),
            ..config
        };
        config.validate()?;
        Ok(Self::assemble(config, grid, source))
    }

    fn assemble(config: GridConfig, grid: Grid, source: Box<dyn TokenSource + Send>) -> Self {
        Self {
            config,
            grid,
            source,
            bus: EventBus::new(),
            selected: None,
            score: 0,
            moves: 0,
            last_gain: 0,
            reshuffle_when_stuck: true,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn last_gain(&self) -> u32 {
        self.last_gain
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Regenerate the grid when a resolution leaves no legal swap. On by default.
    pub fn set_reshuffle_when_stuck(&mut self, enabled: bool) {
        self.reshuffle_when_stuck = enabled;
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<EngineEvent> {
        self.bus.subscribe()
    }

    /// Register a callback. It runs synchronously on the resolving thread, before
    /// the call that triggered the event returns.
    pub fn on_event(&mut self, listener: impl FnMut(&EngineEvent) + Send + 'static) {
        self.bus.on_event(listener);
    }

    /// Some adjacent pair whose swap would match.
    pub fn hint(&self) -> Option<(Pos, Pos)> {
        let mut scratch = self.grid.clone();
        find_legal_swap(&mut scratch, self.config.match_min_count)
    }

    /// Runs through `seeds` on the current grid, without clearing anything.
    ///
    /// Out-of-bounds seeds are ignored.
    pub fn detect<I>(&self, seeds: I) -> MatchSet
    where
        I: IntoIterator<Item = Pos>,
    {
        find_matches(&self.grid, seeds, self.config.match_min_count)
    }

    /// Swap two adjacent tokens if the swap forms a run, then drain the cascade.
    ///
    /// If the cascade hits the iteration ceiling, the steps already committed are
    /// still published and scored before [`EngineError::CascadeDidNotStabilize`]
    /// is returned; no [`EngineEvent::Resolved`] follows.
    #[instrument(level = "debug", skip(self))]
    pub fn request_swap(&mut self, a: Pos, b: Pos) -> Result<SwapOutcome, EngineError> {
        let first = self.grid.get(a)?;
        let second = self.grid.get(b)?;
        if !a.is_adjacent(b) {
            debug!("positions not adjacent");
            return Ok(SwapOutcome::Rejected(SwapRejected::NotAdjacent));
        }
        if first.is_none() || second.is_none() {
            debug!("swap touches an empty cell");
            return Ok(SwapOutcome::Rejected(SwapRejected::EmptyCell));
        }

        if !would_match(&mut self.grid, a, b, self.config.match_min_count)? {
            debug!("swap forms no run");
            return Ok(SwapOutcome::NoMatch);
        }

        self.grid.swap(a, b)?;
        let summary = self.resolve_from(Some((a, b)), [a, b])?;
        Ok(SwapOutcome::Resolved(summary))
    }

    /// Two-tap selection: the first tap selects, the second attempts a swap with it.
    ///
    /// A second tap on a non-adjacent cell cancels the selection.
    pub fn select(&mut self, pos: Pos) -> Result<SelectOutcome, EngineError> {
        self.grid.get(pos)?;

        match self.selected.take() {
            None => {
                self.selected = Some(pos);
                Ok(SelectOutcome::Selected(pos))
            }
            Some(prev) if prev == pos => Ok(SelectOutcome::Deselected),
            Some(prev) => self.request_swap(prev, pos).map(SelectOutcome::Swap),
        }
    }

    /// Resolve whatever runs pass through `seeds`, scoring them like a swap.
    ///
    /// Does not count as a move. A refresh that finds nothing still publishes
    /// its [`EngineEvent::Resolved`] summary.
    pub fn refresh<I>(&mut self, seeds: I) -> Result<ResolutionSummary, EngineError>
    where
        I: IntoIterator<Item = Pos>,
    {
        self.resolve_from(None, seeds)
    }

    /// Start over on a freshly generated grid.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.grid = settled_grid(&self.config, self.source.as_mut())?;
        self.selected = None;
        self.score = 0;
        self.moves = 0;
        self.last_gain = 0;
        self.ensure_playable()?;
        info!("engine restarted");
        Ok(())
    }

    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        out.grid.clone_from(&self.grid);
        out.selected = self.selected;
        out.score = self.score;
        out.moves = self.moves;
        out.last_gain = self.last_gain;
        out.busy = false;
        out.flash.clear();
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut s = EngineSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn resolve_from<I>(
        &mut self,
        swapped: Option<(Pos, Pos)>,
        seeds: I,
    ) -> Result<ResolutionSummary, EngineError>
    where
        I: IntoIterator<Item = Pos>,
    {
        let mut report = CascadeReport::default();
        let resolved = CascadeResolver::new(&self.config, self.source.as_mut()).resolve_into(
            &mut self.grid,
            seeds,
            &mut report,
        );

        if swapped.is_some() {
            self.moves += 1;
        }
        self.score = self.score.saturating_add(report.total_score);
        self.last_gain = report.total_score;
        let iterations = report.iterations();
        let cleared = report.cleared_count() as u32;
        for step in report.steps {
            self.bus.publish(EngineEvent::CascadeStep(step));
        }
        if let Err(e) = resolved {
            warn!(iterations, gain = self.last_gain, "resolution stopped at the ceiling");
            return Err(e.into());
        }

        let summary = ResolutionSummary {
            swapped,
            iterations,
            cleared,
            score_delta: report.total_score,
            total_score: self.score,
            moves: self.moves,
        };
        self.bus.publish(EngineEvent::Resolved(summary));
        self.ensure_playable()?;

        info!(
            iterations = summary.iterations,
            cleared = summary.cleared,
            gain = summary.score_delta,
            score = summary.total_score,
            "resolution complete"
        );
        Ok(summary)
    }

    /// Regenerate until some swap is legal, publishing `Reshuffled` when the grid changes.
    fn ensure_playable(&mut self) -> Result<(), EngineError> {
        if !self.reshuffle_when_stuck || self.hint().is_some() {
            return Ok(());
        }

        let mut attempts = 0;
        while attempts < MAX_RESHUFFLE_ATTEMPTS {
            attempts += 1;
            self.grid = settled_grid(&self.config, self.source.as_mut())?;
            if self.hint().is_some() {
                break;
            }
        }

        if self.hint().is_some() {
            info!(attempts, "reshuffled deadlocked grid");
        } else {
            warn!(attempts, "no playable grid found");
        }
        self.bus.publish(EngineEvent::Reshuffled {
            attempts,
            grid: self.grid.clone(),
        });
        Ok(())
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("grid", &self.grid.to_rows())
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("moves", &self.moves)
            .field("bus", &self.bus)
            .finish()
    }
}

/// Generate a grid and resolve anything generation left behind, discarding the score.
fn settled_grid(config: &GridConfig, source: &mut dyn TokenSource) -> Result<Grid, EngineError> {
    let mut grid = Grid::generate(
        config.columns,
        config.rows,
        config.match_min_count,
        config.token_kinds,
        source,
    );
    let everything: Vec<Pos> = grid.positions().collect();
    CascadeResolver::new(config, source).resolve(&mut grid, everything)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{find_all_matches, ScriptedTokens};
    use crate::types::TokenKind;

    fn scripted(kinds: &[TokenKind]) -> Box<dyn TokenSource + Send> {
        Box::new(ScriptedTokens::new(kinds.to_vec()))
    }

    fn fixture(rows: &[&str], refills: &[TokenKind]) -> Engine {
        let grid = Grid::from_rows(rows).unwrap();
        let mut engine = Engine::from_grid(GridConfig::default(), grid, scripted(refills)).unwrap();
        engine.set_reshuffle_when_stuck(false);
        engine
    }

    #[test]
    fn test_matching_swap_resolves_and_scores() {
        use TokenKind::*;
        let mut engine = fixture(&["DRC", "CCP"], &[Monkey, Cat, Monkey]);
        let rx = engine.subscribe();

        let outcome = engine.request_swap(Pos::new(2, 0), Pos::new(2, 1)).unwrap();
        let summary = *outcome.summary().unwrap();
        assert_eq!(summary.score_delta, 80);
        assert_eq!(summary.iterations, 1);
        assert_eq!(summary.cleared, 3);
        assert_eq!(engine.score(), 80);
        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.grid().to_rows(), vec!["MCM", "DRP"]);
        assert!(!engine.snapshot().busy);

        let events: Vec<EngineEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], EngineEvent::CascadeStep(_)));
        assert_eq!(events[1], EngineEvent::Resolved(summary));
    }

    #[test]
    fn test_non_matching_swap_leaves_grid_unchanged() {
        let mut engine = fixture(&["DRC", "CPD"], &[TokenKind::Cat]);
        let rx = engine.subscribe();
        let before = engine.grid().clone();

        let outcome = engine.request_swap(Pos::new(0, 0), Pos::new(1, 0)).unwrap();
        assert_eq!(outcome, SwapOutcome::NoMatch);
        assert!(outcome.is_accepted());
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.moves(), 0);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_requests() {
        let mut engine = fixture(&["DR.", "CPD"], &[TokenKind::Cat]);

        assert_eq!(
            engine.request_swap(Pos::new(0, 0), Pos::new(2, 0)).unwrap(),
            SwapOutcome::Rejected(SwapRejected::NotAdjacent)
        );
        assert_eq!(
            engine.request_swap(Pos::new(1, 1), Pos::new(2, 1)).unwrap(),
            SwapOutcome::Rejected(SwapRejected::EmptyCell)
        );
        assert_eq!(
            engine.request_swap(Pos::new(2, 0), Pos::new(3, 0)),
            Err(EngineError::OutOfBounds { col: 3, row: 0 })
        );
    }

    #[test]
    fn test_select_flow() {
        use TokenKind::*;
        let mut engine = fixture(&["DRC", "CCP"], &[Monkey, Cat, Monkey]);

        assert_eq!(
            engine.select(Pos::new(0, 0)).unwrap(),
            SelectOutcome::Selected(Pos::new(0, 0))
        );
        assert_eq!(engine.select(Pos::new(0, 0)).unwrap(), SelectOutcome::Deselected);
        assert_eq!(engine.selected(), None);

        engine.select(Pos::new(0, 0)).unwrap();
        assert_eq!(
            engine.select(Pos::new(2, 1)).unwrap(),
            SelectOutcome::Swap(SwapOutcome::Rejected(SwapRejected::NotAdjacent))
        );
        assert_eq!(engine.selected(), None);

        engine.select(Pos::new(2, 0)).unwrap();
        let outcome = engine.select(Pos::new(2, 1)).unwrap();
        assert!(matches!(outcome, SelectOutcome::Swap(SwapOutcome::Resolved(_))));
        assert_eq!(engine.selected(), None);
    }

    #[test]
    fn test_refresh_scores_without_counting_a_move() {
        use TokenKind::*;
        let mut engine = fixture(&["DPR", "RDP", "CCC"], &[Monkey, Cat, Monkey]);

        let found = engine.detect([Pos::new(1, 0)]);
        assert_eq!(found.len(), 3);

        let summary = engine.refresh([Pos::new(1, 0)]).unwrap();
        assert_eq!(summary.score_delta, 80);
        assert_eq!(summary.swapped, None);
        assert_eq!(engine.moves(), 0);
        assert_eq!(engine.score(), 80);
    }

    #[test]
    fn test_new_engine_is_settled_and_playable() {
        let engine = Engine::new(GridConfig::default(), 7).unwrap();
        assert!(engine.grid().is_full());
        assert!(find_all_matches(engine.grid(), 3).is_empty());
        assert!(engine.hint().is_some());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = Engine::new(GridConfig::default(), 42).unwrap();
        let b = Engine::new(GridConfig::default(), 42).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GridConfig::new(9, 10, 3, 1);
        assert!(matches!(
            Engine::new(config, 1),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_ceiling_publishes_committed_steps() {
        let grid = Grid::from_rows(&["CCC", "CCC", "CCC"]).unwrap();
        let config = GridConfig::new(3, 3, 3, 2).with_max_cascade_iterations(4);
        let mut engine = Engine::from_grid(config, grid, scripted(&[TokenKind::Cat])).unwrap();
        let rx = engine.subscribe();

        let frontier: Vec<Pos> = engine.grid().positions().collect();
        let err = engine.refresh(frontier).unwrap_err();
        assert_eq!(err, EngineError::CascadeDidNotStabilize { iterations: 4 });

        let events: Vec<EngineEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| matches!(e, EngineEvent::CascadeStep(_))));
        // Six runs of three per pass.
        assert_eq!(engine.score(), 4 * 6 * 80);
        assert_eq!(engine.last_gain(), engine.score());
        match events.last() {
            Some(EngineEvent::CascadeStep(step)) => assert_eq!(&step.after, engine.grid()),
            other => panic!("unexpected event {other:?}"),
        }
    }
}
