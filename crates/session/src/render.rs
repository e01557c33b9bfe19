//! Render sinks: where the session pushes what should be on screen.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::core::Snapshot;

/// What the game-selection screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub snake_high_score: u32,
    pub blocks_high_score: u32,
    pub sound_enabled: bool,
}

/// Presentation collaborator. Failures are logged by the session and never stop it.
pub trait RenderSink: Send {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()>;

    fn render_menu(&mut self, _menu: &MenuView) -> Result<()> {
        Ok(())
    }
}

/// Sink that drops everything, for headless runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
struct Frame<'a, T: Serialize> {
    seq: u64,
    #[serde(flatten)]
    view: &'a T,
}

#[derive(Serialize)]
struct MenuFrame<'a> {
    seq: u64,
    game: &'static str,
    #[serde(flatten)]
    menu: &'a MenuView,
}

/// Writes one JSON object per rendered frame.
///
/// Game frames carry the snapshot's `"game"` tag, menu frames `"game": "menu"`. Every
/// frame has a monotonically increasing `seq`.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    out: W,
    seq: u64,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, seq: 0 }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

impl<W: Write + Send> RenderSink for JsonLinesSink<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let seq = self.next_seq();
        self.write_line(&Frame {
            seq,
            view: snapshot,
        })
    }

    fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
        let seq = self.next_seq();
        self.write_line(&MenuFrame {
            seq,
            game: "menu",
            menu,
        })
    }
}

/// Fans a frame out to several sinks. Every sink is tried; the first error is returned.
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Box<dyn RenderSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Box<dyn RenderSink>>) -> Self {
        Self { sinks }
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn RenderSink) -> Result<()>) -> Result<()> {
        let mut first_err = None;
        for sink in &mut self.sinks {
            if let Err(err) = f(sink.as_mut()) {
                first_err.get_or_insert(err);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl RenderSink for TeeSink {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.each(|sink| sink.render(snapshot))
    }

    fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
        self.each(|sink| sink.render_menu(menu))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Game, SnakeEngine};

    #[test]
    fn test_json_lines_frames() {
        let mut snake = SnakeEngine::new(20, 0, 7);
        snake.start();

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.render(&snake.snapshot()).unwrap();
        sink.render_menu(&MenuView {
            snake_high_score: 50,
            blocks_high_score: 0,
            sound_enabled: true,
        })
        .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["seq"], 1);
        assert_eq!(lines[0]["game"], "snake");
        assert_eq!(lines[0]["snake"][0]["x"], 10);
        assert_eq!(lines[1]["seq"], 2);
        assert_eq!(lines[1]["game"], "menu");
        assert_eq!(lines[1]["snake_high_score"], 50);
    }

    struct Failing;

    impl RenderSink for Failing {
        fn render(&mut self, _snapshot: &Snapshot) -> Result<()> {
            anyhow::bail!("terminal gone")
        }
    }

    #[test]
    fn test_tee_tries_every_sink() {
        let snake = SnakeEngine::new(20, 0, 7);
        let mut tee = TeeSink::new(vec![
            Box::new(Failing),
            Box::new(JsonLinesSink::new(Vec::new())),
        ]);
        assert!(tee.render(&snake.snapshot()).is_err());
        assert!(tee.render_menu(&MenuView {
            snake_high_score: 0,
            blocks_high_score: 0,
            sound_enabled: false,
        })
        .is_ok());
    }
}
