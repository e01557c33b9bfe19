//! Core game logic module - pure, deterministic, and testable
//!
//! Both arcade engines live here. They have **zero dependencies** on terminals,
//! timers, storage or audio:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Synchronous**: Every call returns immediately with an [`Outcome`]
//! - **Side-effect free**: Sound cues are buffered and drained by the driver
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 settled-cell grid with row removal
//! - [`blocks`]: Block-Stack engine (falling pieces, line clears, levels)
//! - [`game`]: The [`Game`] capability shared by both engines
//! - [`pieces`]: 4x4 piece templates and clockwise rotation
//! - [`rng`]: Seeded LCG used for piece and food placement
//! - [`scoring`]: Points, levels and tick intervals
//! - [`snake`]: Snake engine
//! - [`snapshot`]: Serializable read-only views for renderers
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::{Game, SnakeEngine};
//! use tui_arcade_core::types::{Command, RunState};
//!
//! let mut snake = SnakeEngine::new(20, 0, 12345);
//! snake.start();
//! assert_eq!(snake.state(), RunState::Running);
//!
//! snake.handle_input(Command::Up);
//! let outcome = snake.advance_tick();
//! assert!(outcome.changed);
//! ```
//!
//! # Timing
//!
//! Engines do not keep time. The driver ticks them at [`Game::tick_interval_ms`] and
//! restarts its timer whenever an outcome carries `new_interval_ms`:
//! - **Snake**: 150ms, 10ms faster every 50 points, floor 50ms
//! - **Block-Stack**: `1000 - (level - 1) * 100`ms, floor 100ms

pub mod blocks;
pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snake;
pub mod snapshot;

pub use tui_arcade_types as types;

// Re-export commonly used types for convenience
pub use blocks::BlockEngine;
pub use board::Board;
pub use game::{Cues, Game, GameOverReport, Outcome};
pub use pieces::{rotate_cw, template, ActivePiece, ShapeMatrix};
pub use rng::SimpleRng;
pub use snake::SnakeEngine;
pub use snapshot::{BlockSnapshot, SnakeSnapshot, Snapshot};
