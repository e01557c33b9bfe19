//! Block-Stack engine
//!
//! Falling 4x4 pieces on a 10x20 board. Gravity is one row per tick; a piece that
//! cannot fall locks immediately, full rows are removed and the next piece spawns at
//! (3, 0). Rows above the board are always open, so a piece may hang partly above the
//! top edge.

use crate::board::Board;
use crate::game::{CueBuffer, Cues, Game, GameOverReport, Outcome};
use crate::pieces::ActivePiece;
use crate::rng::SimpleRng;
use crate::scoring::{block_interval_ms, hard_drop_points, level_for_lines, line_clear_points};
use crate::snapshot::{BlockSnapshot, Snapshot};
use crate::types::{Command, GameKind, RunState, SoundCue, BOARD_HEIGHT, BOARD_WIDTH, WALL_KICKS};

#[derive(Debug, Clone)]
pub struct BlockEngine {
    board: Board,
    active: Option<ActivePiece>,
    score: u32,
    level: u32,
    lines: u32,
    high_score: u32,
    state: RunState,
    last_result: Option<GameOverReport>,
    /// Set by `clear_lines` when the level went up, consumed by the landing sequence
    speed_changed: bool,
    rng: SimpleRng,
    cues: CueBuffer,
}

impl BlockEngine {
    /// Build an idle engine. Nothing spawns until `reset_state` or `start`.
    pub fn new(high_score: u32, seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            score: 0,
            level: 1,
            lines: 0,
            high_score,
            state: RunState::NotStarted,
            last_result: None,
            speed_changed: false,
            rng: SimpleRng::new(seed),
            cues: CueBuffer::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Whether `piece`, shifted by (dx, dy), fits.
    ///
    /// Cells must stay inside the side walls and above the floor. Only cells on a
    /// visible row are checked against settled cells.
    pub fn is_valid_position(&self, piece: &ActivePiece, dx: i8, dy: i8) -> bool {
        piece.cells().all(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.board.is_occupied(x, y)
        })
    }

    /// Draw a random kind and place it at the spawn anchor.
    ///
    /// Returns the game-over report when the new piece does not fit.
    pub fn spawn_piece(&mut self) -> Option<GameOverReport> {
        let piece = ActivePiece::spawn(self.rng.next_piece());
        self.active = Some(piece);

        if self.is_valid_position(&piece, 0, 0) {
            None
        } else {
            Some(self.end_game())
        }
    }

    /// Shift the active piece if the target position is valid
    pub fn move_piece(&mut self, dx: i8, dy: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        if !self.is_valid_position(&piece, dx, dy) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        });
        true
    }

    /// Rotate clockwise, falling back to the wall kicks in order.
    ///
    /// When nothing fits the piece is left exactly as it was.
    pub fn rotate_piece(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };

        let rotated = piece.rotated();
        let kick = std::iter::once((0, 0))
            .chain(WALL_KICKS)
            .find(|&(dx, dy)| self.is_valid_position(&rotated, dx, dy));

        let Some((dx, dy)) = kick else {
            return false;
        };

        self.active = Some(ActivePiece {
            x: rotated.x + dx,
            y: rotated.y + dy,
            ..rotated
        });
        self.cues.push(SoundCue::Rotate);
        true
    }

    /// Write the active piece into the board. Cells above the top edge are dropped.
    pub fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        for (x, y) in piece.cells() {
            self.board.set(x, y, Some(piece.kind));
        }
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// After a removal the same row index is examined again, since the row above has
    /// just slid into it. Scores the pass and updates lines and level.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize;

        while y > 0 {
            if self.board.is_row_full(y - 1) {
                self.board.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(line_clear_points(cleared, self.level));
            self.lines += cleared as u32;

            let level = level_for_lines(self.lines);
            if level > self.level {
                self.level = level;
                self.speed_changed = true;
                self.cues.push(SoundCue::LevelUp);
                log::debug!(
                    "block level {} (interval {}ms)",
                    level,
                    block_interval_ms(level)
                );
            }
        }

        cleared
    }

    /// Drop straight down, award the bonus, then land.
    pub fn hard_drop(&mut self) -> Outcome {
        if self.state != RunState::Running || self.active.is_none() {
            return Outcome::unchanged();
        }

        let mut distance = 0;
        while self.move_piece(0, 1) {
            distance += 1;
        }
        self.score = self.score.saturating_add(hard_drop_points(distance));

        self.land()
    }

    /// Lock, clear, spawn.
    fn land(&mut self) -> Outcome {
        self.lock_piece();

        if self.clear_lines() > 0 {
            self.cues.push(SoundCue::LineClear);
        }

        let mut outcome = Outcome::changed();
        if std::mem::take(&mut self.speed_changed) {
            outcome.new_interval_ms = Some(self.tick_interval_ms());
        }
        outcome.game_over = self.spawn_piece();
        outcome
    }

    fn end_game(&mut self) -> GameOverReport {
        self.state = RunState::GameOver;
        self.cues.push(SoundCue::GameOver);
        let report = GameOverReport::settle(self.score, &mut self.high_score);
        self.last_result = Some(report);
        log::info!(
            "block game over: score {} lines {} level {} (new high score: {})",
            report.final_score,
            self.lines,
            self.level,
            report.new_high_score
        );
        report
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: Option<ActivePiece>) {
        self.active = piece;
    }
}

impl Default for BlockEngine {
    fn default() -> Self {
        Self::new(0, 1)
    }
}

impl Game for BlockEngine {
    fn kind(&self) -> GameKind {
        GameKind::Blocks
    }

    fn reset_state(&mut self) {
        self.board.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.speed_changed = false;
        self.last_result = None;
        self.state = RunState::Running;
        let _ = self.spawn_piece();
    }

    fn start(&mut self) {
        if self.state == RunState::NotStarted {
            self.reset_state();
        }
    }

    fn advance_tick(&mut self) -> Outcome {
        if self.state != RunState::Running {
            return Outcome::unchanged();
        }

        if self.move_piece(0, 1) {
            return Outcome::changed();
        }

        self.land()
    }

    fn handle_input(&mut self, command: Command) -> Outcome {
        if self.state != RunState::Running {
            return Outcome::unchanged();
        }

        match command {
            Command::Left | Command::Right => {
                let dx = if command == Command::Left { -1 } else { 1 };
                let moved = self.move_piece(dx, 0);
                if moved {
                    self.cues.push(SoundCue::Move);
                }
                Outcome::from_changed(moved)
            }
            Command::Down => Outcome::from_changed(self.move_piece(0, 1)),
            Command::Up => Outcome::from_changed(self.rotate_piece()),
            Command::Drop => self.hard_drop(),
            Command::Pause | Command::Cancel | Command::Restart => Outcome::unchanged(),
        }
    }

    fn halt(&mut self) {
        if self.state.is_running() {
            self.state = RunState::NotStarted;
        }
    }

    fn toggle_pause(&mut self) -> bool {
        match self.state {
            RunState::Running => self.state = RunState::Paused,
            RunState::Paused => self.state = RunState::Running,
            _ => return false,
        }
        true
    }

    fn state(&self) -> RunState {
        self.state
    }

    fn tick_interval_ms(&self) -> u32 {
        block_interval_ms(self.level)
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn high_score(&self) -> u32 {
        self.high_score
    }

    fn take_cues(&mut self) -> Cues {
        self.cues.take()
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Blocks(BlockSnapshot {
            board: self.board.to_rows(),
            active: self.active,
            score: self.score,
            high_score: self.high_score,
            level: self.level,
            lines: self.lines,
            interval_ms: self.tick_interval_ms(),
            state: self.state,
            last_result: self.last_result,
        })
    }
}
