//! Terminal input module (session-facing).
//!
//! Translates `crossterm` key events into the raw key identifiers the session
//! understands ("ArrowUp", "Escape", "w", ...) and from there into
//! [`crate::types::Command`]. The quit keys are checked separately since they never
//! reach the session.

pub mod map;

pub use tui_arcade_types as types;

pub use map::{handle_key_event, key_name, should_quit, KeyName};
