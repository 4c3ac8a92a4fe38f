use serde::{Deserialize, Serialize};

use crate::core::Grid;
use crate::types::Pos;

/// Read-only view of the engine for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub grid: Grid,
    pub selected: Option<Pos>,
    pub score: u32,
    pub moves: u32,
    pub last_gain: u32,
    /// True while a front-end replays a cascade. Engine snapshots are taken
    /// between resolutions and always report false.
    pub busy: bool,
    /// Cells to highlight as just-cleared. The engine always reports none;
    /// front-ends fill this in while replaying cascade steps.
    pub flash: Vec<Pos>,
}

impl EngineSnapshot {
    pub fn clear(&mut self) {
        self.grid.clear();
        self.selected = None;
        self.score = 0;
        self.moves = 0;
        self.last_gain = 0;
        self.busy = false;
        self.flash.clear();
    }

    pub fn is_flashing(&self, pos: Pos) -> bool {
        self.flash.contains(&pos)
    }
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            grid: Grid::new(
                crate::types::DEFAULT_COLUMNS,
                crate::types::DEFAULT_ROWS,
            ),
            selected: None,
            score: 0,
            moves: 0,
            last_gain: 0,
            busy: false,
            flash: Vec::new(),
        }
    }
}
