//! Read-only views of engine state handed to render sinks.

use serde::{Deserialize, Serialize};

use crate::game::GameOverReport;
use crate::pieces::ActivePiece;
use crate::types::{Cell, Direction, GameKind, Point, RunState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    pub board_size: u8,
    /// Head first
    pub snake: Vec<Point>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub speed_level: u32,
    pub interval_ms: u32,
    pub state: RunState,
    /// How the last game ended; `None` until the first game over after a reset
    pub last_result: Option<GameOverReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    /// Settled cells, `board[y][x]`
    pub board: Vec<Vec<Cell>>,
    pub active: Option<ActivePiece>,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub interval_ms: u32,
    pub state: RunState,
    pub last_result: Option<GameOverReport>,
}

impl BlockSnapshot {
    /// Cell as drawn: the active piece on top of settled cells
    pub fn cell_at(&self, x: i8, y: i8) -> Cell {
        if let Some(piece) = &self.active {
            if piece.cells().any(|(px, py)| px == x && py == y) {
                return Some(piece.kind);
            }
        }
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Snapshot {
    Snake(SnakeSnapshot),
    Blocks(BlockSnapshot),
}

impl Snapshot {
    pub fn kind(&self) -> GameKind {
        match self {
            Snapshot::Snake(_) => GameKind::Snake,
            Snapshot::Blocks(_) => GameKind::Blocks,
        }
    }

    pub fn state(&self) -> RunState {
        match self {
            Snapshot::Snake(s) => s.state,
            Snapshot::Blocks(s) => s.state,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            Snapshot::Snake(s) => s.score,
            Snapshot::Blocks(s) => s.score,
        }
    }

    pub fn high_score(&self) -> u32 {
        match self {
            Snapshot::Snake(s) => s.high_score,
            Snapshot::Blocks(s) => s.high_score,
        }
    }
}
