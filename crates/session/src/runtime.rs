//! Session event loop.
//!
//! The session lives on a single task and handles one [`Event`] at a time, so the
//! engines are never touched concurrently. Key reader, tick timer and focus tracking
//! all post into the same channel.

use tokio::sync::mpsc;

use crate::controller::Session;
use crate::types::GameKind;

/// Channel depth between producers and the session task
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Key that flips sound on or off from anywhere
pub const SOUND_TOGGLE_KEY: &str = "m";

/// Volume change per `+`/`-` press
pub const VOLUME_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Raw key identifier, e.g. `"ArrowLeft"`
    Key(String),
    /// Timer tick stamped with its generation
    Tick(u64),
    /// The player looked away; pause if running
    Suspend,
    /// Screen needs repainting, e.g. after a resize
    Redraw,
    Quit,
}

pub fn event_channel() -> (mpsc::Sender<Event>, mpsc::Receiver<Event>) {
    mpsc::channel(EVENT_QUEUE_CAPACITY)
}

/// Game picked on the selection screen
pub fn menu_choice(key: &str) -> Option<GameKind> {
    match key {
        "1" => Some(GameKind::Snake),
        "2" => Some(GameKind::Blocks),
        _ => None,
    }
}

/// Apply one event. Returns false once the loop should stop.
pub fn dispatch(session: &mut Session, event: Event) -> bool {
    match event {
        Event::Key(key) if key == SOUND_TOGGLE_KEY => {
            session.toggle_sound();
        }
        Event::Key(key) if key == "+" || key == "=" => {
            session.change_volume(VOLUME_STEP);
        }
        Event::Key(key) if key == "-" => {
            session.change_volume(-VOLUME_STEP);
        }
        Event::Key(key) => match session.active_kind() {
            Some(_) => {
                session.route_input(&key);
            }
            None => {
                if let Some(kind) = menu_choice(&key) {
                    session.select_game(kind);
                }
            }
        },
        Event::Tick(generation) => {
            session.on_tick(generation);
        }
        Event::Suspend => session.suspend(),
        Event::Redraw => session.redraw(),
        Event::Quit => return false,
    }
    true
}

/// Drive `session` until `Quit` arrives or every sender is gone.
pub async fn run_session(mut session: Session, mut events: mpsc::Receiver<Event>) -> Session {
    while let Some(event) = events.recv().await {
        if !dispatch(&mut session, event) {
            break;
        }
    }
    session.shutdown();
    log::info!("session loop stopped");
    session
}
