//! Terminal arcade runner (default binary).
//!
//! Starts on the game-selection screen. Keys are read on a dedicated thread and,
//! together with timer ticks, funnelled into the single session task.

use std::fs::File;
use std::io::BufWriter;
use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as TermEvent};
use tokio::sync::mpsc;

use tui_arcade::input::{key_name, should_quit};
use tui_arcade::session::{
    event_channel, run_session, ArcadeConfig, BellPlayer, ChannelPlayer, Event, JsonFileStore,
    JsonLinesSink, KeyValueStore, MemoryStore, RenderSink, Session, SoundBoard, TeeSink,
    TokioTicker,
};
use tui_arcade::term::TerminalRenderer;
use tui_arcade::types::DEFAULT_VOLUME;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ArcadeConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    // Dropping the renderer (inside the session) restores the terminal.
    let result = run(config, term).await;
    if let Err(err) = &result {
        log::error!("arcade stopped: {:#}", err);
    }
    result
}

async fn run(config: ArcadeConfig, term: TerminalRenderer) -> Result<()> {
    let store = open_store(&config);

    let player = ChannelPlayer::spawn(BellPlayer);
    let sounds = if config.sound_disabled {
        SoundBoard::new(player, false, DEFAULT_VOLUME)
    } else {
        SoundBoard::from_store(player, store.as_ref())
    };

    let renderer: Box<dyn RenderSink> = match &config.observe_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating observation log {}", path.display()))?;
            Box::new(TeeSink::new(vec![
                Box::new(term),
                Box::new(JsonLinesSink::new(BufWriter::new(file))),
            ]))
        }
        None => Box::new(term),
    };

    let (events, inbox) = event_channel();
    let mut session = Session::new(
        &config,
        store,
        Box::new(TokioTicker::new(events.clone())),
        Box::new(sounds),
        renderer,
    );
    session.redraw();

    spawn_key_reader(events);
    let session = run_session(session, inbox).await;
    drop(session);
    Ok(())
}

fn open_store(config: &ArcadeConfig) -> Box<dyn KeyValueStore> {
    let Some(path) = &config.store_path else {
        return Box::new(MemoryStore::new());
    };
    match JsonFileStore::open(path) {
        Ok(store) => Box::new(store),
        Err(err) => {
            log::warn!("{:#}; high scores will not be saved", err);
            Box::new(MemoryStore::new())
        }
    }
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging(config: &ArcadeConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Blocking crossterm reader feeding the session channel until quit.
fn spawn_key_reader(events: mpsc::Sender<Event>) {
    thread::spawn(move || loop {
        let outgoing = match event::read() {
            Ok(TermEvent::Key(key)) if should_quit(key) => Event::Quit,
            Ok(TermEvent::Key(key)) => match key_name(key) {
                Some(name) => Event::Key(name.to_string()),
                None => continue,
            },
            Ok(TermEvent::FocusLost) => Event::Suspend,
            Ok(TermEvent::Resize(..)) => Event::Redraw,
            Ok(_) => continue,
            Err(err) => {
                log::error!("reading terminal input failed: {}", err);
                Event::Quit
            }
        };

        let quitting = outgoing == Event::Quit;
        if events.blocking_send(outgoing).is_err() || quitting {
            return;
        }
    });
}
