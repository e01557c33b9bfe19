//! The capability shared by both engines and the values they report back.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::snapshot::Snapshot;
use crate::types::{Command, GameKind, RunState, SoundCue};

/// Upper bound on cues a single engine call can raise before they are drained.
pub const CUE_CAPACITY: usize = 8;

/// Cues raised since the last drain, oldest first
pub type Cues = ArrayVec<SoundCue, CUE_CAPACITY>;

/// Final result of a game, produced once on the transition into `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub final_score: u32,
    pub new_high_score: bool,
}

impl GameOverReport {
    /// Compare `score` against the stored best and raise it when beaten.
    pub fn settle(score: u32, high_score: &mut u32) -> Self {
        let new_high_score = score > *high_score;
        if new_high_score {
            *high_score = score;
        }
        Self {
            final_score: score,
            new_high_score,
        }
    }
}

/// What an engine call did, as far as its driver is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Visible state changed and should be redrawn
    pub changed: bool,
    /// The tick timer must be restarted at this period
    pub new_interval_ms: Option<u32>,
    /// The call ended the game
    pub game_over: Option<GameOverReport>,
}

impl Outcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }
}

/// Fixed-capacity cue queue owned by an engine.
#[derive(Debug, Clone, Default)]
pub struct CueBuffer {
    cues: Cues,
}

impl CueBuffer {
    pub fn push(&mut self, cue: SoundCue) {
        if self.cues.try_push(cue).is_err() {
            log::warn!("cue buffer full, dropping '{}'", cue.as_str());
        }
    }

    pub fn take(&mut self) -> Cues {
        std::mem::take(&mut self.cues)
    }

    pub fn as_slice(&self) -> &[SoundCue] {
        &self.cues
    }
}

/// A discrete-time single-player game.
///
/// Engines never block, never touch I/O and never fail: rejected moves are no-ops,
/// collisions are state transitions. Drivers call these one at a time and then drain
/// [`Game::take_cues`] and pull [`Game::snapshot`].
pub trait Game: Send {
    fn kind(&self) -> GameKind;

    /// Return to a fresh board with zeroed score.
    fn reset_state(&mut self);

    /// Enter `Running` from `NotStarted`. Inert in any other state.
    fn start(&mut self);

    /// One simulation step. No-op unless `Running`.
    fn advance_tick(&mut self) -> Outcome;

    /// Apply a command. Ignored unless `Running`; unknown commands are ignored.
    fn handle_input(&mut self, command: Command) -> Outcome;

    /// Drop back to `NotStarted` from `Running` or `Paused`, e.g. when the player
    /// leaves the game. The board is kept; a finished game stays `GameOver`.
    fn halt(&mut self);

    /// Flip between `Running` and `Paused`. Returns false when inert.
    fn toggle_pause(&mut self) -> bool;

    fn state(&self) -> RunState;

    fn is_over(&self) -> bool {
        self.state() == RunState::GameOver
    }

    /// Period the driver should tick at right now
    fn tick_interval_ms(&self) -> u32;

    fn score(&self) -> u32;

    fn high_score(&self) -> u32;

    /// Drain cues raised since the last call
    fn take_cues(&mut self) -> Cues;

    fn snapshot(&self) -> Snapshot;
}
