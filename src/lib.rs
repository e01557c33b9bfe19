//! TUI Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration tests
//! and benches can use `tui_arcade::{core,input,session,term,types}`.

pub use tui_arcade_core as core;
pub use tui_arcade_input as input;
pub use tui_arcade_session as session;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;
