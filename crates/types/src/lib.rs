//! Core types module - shared data structures and constants
//!
//! Everything in here is plain data used by both engines, the session controller
//! and the terminal front end. Nothing in this crate performs I/O.
//!
//! # Board Dimensions
//!
//! - **Block-Stack**: 10 columns x 20 rows, pieces spawn with their 4x4 matrix at (3, 0)
//! - **Snake**: square board, 20 x 20 by default
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SNAKE_BASE_INTERVAL_MS` | 150 | Snake tick interval after reset |
//! | `SNAKE_MIN_INTERVAL_MS` | 50 | Fastest snake tick interval |
//! | `SNAKE_SPEEDUP_STEP_MS` | 10 | Interval reduction per speed-up |
//! | `BLOCK_BASE_INTERVAL_MS` | 1000 | Block-Stack gravity at level 1 |
//! | `BLOCK_INTERVAL_STEP_MS` | 100 | Gravity reduction per level |
//! | `BLOCK_MIN_INTERVAL_MS` | 100 | Fastest gravity |
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{Command, Direction, SoundCue};
//!
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert_eq!(Command::from_key("ArrowUp"), Some(Command::Up));
//! assert_eq!(Command::from_key("W"), Some(Command::Up));
//! assert_eq!(SoundCue::from_str("lineclear"), Some(SoundCue::LineClear));
//! ```

use serde::{Deserialize, Serialize};

/// Block-Stack board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Block-Stack board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Anchor column for freshly spawned pieces
pub const SPAWN_X: i8 = 3;

/// Anchor row for freshly spawned pieces
pub const SPAWN_Y: i8 = 0;

/// Default snake board edge length
pub const SNAKE_BOARD_SIZE: u8 = 20;

/// Snake tick interval after reset
pub const SNAKE_BASE_INTERVAL_MS: u32 = 150;

/// Snake tick interval floor
pub const SNAKE_MIN_INTERVAL_MS: u32 = 50;

/// Snake interval reduction applied on each speed-up
pub const SNAKE_SPEEDUP_STEP_MS: u32 = 10;

/// The snake speeds up whenever the score is an exact multiple of this value
pub const SNAKE_SPEEDUP_EVERY: u32 = 50;

/// Points for each piece of food
pub const FOOD_POINTS: u32 = 10;

/// Block-Stack gravity at level 1
pub const BLOCK_BASE_INTERVAL_MS: u32 = 1000;

/// Gravity reduction per level
pub const BLOCK_INTERVAL_STEP_MS: u32 = 100;

/// Block-Stack gravity floor
pub const BLOCK_MIN_INTERVAL_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Bonus per row travelled during a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table, indexed by lines cleared in one pass.
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Offsets tried in order when a rotation collides.
pub const WALL_KICKS: [(i8, i8); 7] = [(1, 0), (-1, 0), (0, -1), (1, -1), (-1, -1), (2, 0), (-2, 0)];

/// Store key for the snake high score
pub const SNAKE_HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Store key for the Block-Stack high score
pub const BLOCKS_HIGH_SCORE_KEY: &str = "tetrisHighScore";

/// Store key for the sound toggle
pub const SOUND_ENABLED_KEY: &str = "soundEnabled";

/// Store key for the sound volume
pub const SOUND_VOLUME_KEY: &str = "soundVolume";

/// Volume used when nothing is stored yet
pub const DEFAULT_VOLUME: f32 = 0.4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(SNAKE_BASE_INTERVAL_MS, 150);
        assert_eq!(SNAKE_MIN_INTERVAL_MS, 50);
        assert_eq!(BLOCK_BASE_INTERVAL_MS, 1000);
        assert_eq!(BLOCK_MIN_INTERVAL_MS, 100);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn command_keys() {
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::Left));
        assert_eq!(Command::from_key("a"), Some(Command::Left));
        assert_eq!(Command::from_key("D"), Some(Command::Right));
        assert_eq!(Command::from_key("s"), Some(Command::Down));
        assert_eq!(Command::from_key(" "), Some(Command::Pause));
        assert_eq!(Command::from_key("Space"), Some(Command::Pause));
        assert_eq!(Command::from_key("Escape"), Some(Command::Cancel));
        assert_eq!(Command::from_key("Enter"), Some(Command::Drop));
        assert_eq!(Command::from_key("r"), Some(Command::Restart));
        assert_eq!(Command::from_key("x"), None);
        assert_eq!(Command::from_key(""), None);
    }

    #[test]
    fn direction_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn cue_names_round_trip() {
        for cue in SoundCue::ALL {
            assert_eq!(SoundCue::from_str(cue.as_str()), Some(cue));
        }
        assert_eq!(SoundCue::from_str("explosion"), None);
    }
}

/// The seven block piece kinds
///
/// The kind doubles as the colour tag written into settled board cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in spawn-table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// A cell on the Block-Stack board
///
/// - `None`: empty
/// - `Some(kind)`: settled cell tagged with the kind of the piece that locked there
pub type Cell = Option<PieceKind>;

/// Snake heading. Diagonals do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step in board coordinates (y grows downwards).
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Integer grid coordinate used by the snake board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Game-agnostic command vocabulary
///
/// Keyboard and touch-style sources both resolve to these before reaching the
/// engines. Each engine decides what a directional command means for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Snake: turn up. Block-Stack: rotate clockwise.
    Up,
    /// Snake: turn down. Block-Stack: soft drop one row.
    Down,
    Left,
    Right,
    /// Block-Stack hard drop; ignored by the snake
    Drop,
    /// Universal pause toggle
    Pause,
    /// Universal cancel: leave the active game
    Cancel,
    /// Start the active game over
    Restart,
}

impl Command {
    /// Translate a raw key identifier into a command.
    ///
    /// Identifiers follow the browser `KeyboardEvent.key` naming (`ArrowUp`, `Escape`,
    /// single characters). Unknown identifiers resolve to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Command::Up),
            "ArrowDown" | "s" | "S" => Some(Command::Down),
            "ArrowLeft" | "a" | "A" => Some(Command::Left),
            "ArrowRight" | "d" | "D" => Some(Command::Right),
            " " | "Space" => Some(Command::Pause),
            "Escape" => Some(Command::Cancel),
            "Enter" => Some(Command::Drop),
            "r" | "R" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Direction carried by a directional command.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Named sound effect request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Move,
    Eat,
    Rotate,
    LineClear,
    LevelUp,
    GameOver,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Move,
        SoundCue::Eat,
        SoundCue::Rotate,
        SoundCue::LineClear,
        SoundCue::LevelUp,
        SoundCue::GameOver,
    ];

    /// Parse a cue name. Unknown names resolve to `None`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "move" => Some(SoundCue::Move),
            "eat" => Some(SoundCue::Eat),
            "rotate" => Some(SoundCue::Rotate),
            "lineclear" => Some(SoundCue::LineClear),
            "levelup" => Some(SoundCue::LevelUp),
            "gameover" => Some(SoundCue::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Move => "move",
            SoundCue::Eat => "eat",
            SoundCue::Rotate => "rotate",
            SoundCue::LineClear => "lineclear",
            SoundCue::LevelUp => "levelup",
            SoundCue::GameOver => "gameover",
        }
    }
}

/// Which game a session is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Snake,
    Blocks,
}

impl GameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Snake => "snake",
            GameKind::Blocks => "blocks",
        }
    }

    /// Persistence key holding this game's high score
    pub fn high_score_key(&self) -> &'static str {
        match self {
            GameKind::Snake => SNAKE_HIGH_SCORE_KEY,
            GameKind::Blocks => BLOCKS_HIGH_SCORE_KEY,
        }
    }
}

/// Engine lifecycle
///
/// `NotStarted -> Running <-> Paused -> GameOver`; `GameOver` holds until reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }
}
