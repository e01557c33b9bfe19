//! Session module - everything between the engines and the outside world
//!
//! # Module Structure
//!
//! - [`controller`]: [`Session`], owner of both engines and the active game
//! - [`scheduler`]: Cancellable tick timer with stale-tick detection
//! - [`runtime`]: Single-task event loop over a tokio mpsc channel
//! - [`cues`]: Sound cue sink, sound preferences and players
//! - [`render`]: Render sink trait and the JSON-lines observation sink
//! - [`store`]: Key-value persistence for high scores and preferences
//! - [`config`]: Environment-driven runtime configuration

pub mod config;
pub mod controller;
pub mod cues;
pub mod render;
pub mod runtime;
pub mod scheduler;
pub mod store;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use config::ArcadeConfig;
pub use controller::Session;
pub use cues::{BellPlayer, ChannelPlayer, CuePlayer, CueSink, SoundBoard};
pub use render::{JsonLinesSink, MenuView, NullSink, RenderSink, TeeSink};
pub use runtime::{dispatch, event_channel, run_session, Event};
pub use scheduler::{ManualTicker, TickScheduler, TokioTicker};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
