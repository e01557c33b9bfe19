//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play: snapshots are drawn into a plain
//! framebuffer which is then diffed and flushed through crossterm. No widget toolkit.
//!
//! - [`fb`]: styled cell framebuffer
//! - [`game_view`]: pure mapping from snapshots and the menu to a framebuffer
//! - [`renderer`]: [`TerminalRenderer`], the session's terminal render sink

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_arcade_core as core;
pub use tui_arcade_session as session;
pub use tui_arcade_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{ArcadeView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
