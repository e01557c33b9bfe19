//! TerminalRenderer: the session's render sink for a real terminal.
//!
//! Each frame is drawn into a framebuffer and only the cells that differ from the
//! previous frame are written out. A size change forces a full redraw.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor, event,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::Snapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{ArcadeView, Viewport};
use crate::session::{MenuView, RenderSink};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: ArcadeView,
    next: FrameBuffer,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
    entered: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            view: ArcadeView::default(),
            next: FrameBuffer::new(0, 0),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            entered: false,
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.entered = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(event::EnableFocusChange)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    /// Restore the terminal. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(event::DisableFocusChange)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    fn viewport() -> Result<Viewport> {
        let (width, height) = terminal::size()?;
        Ok(Viewport::new(width, height))
    }

    /// Write `self.next` to the terminal and keep it as the diff base.
    fn present(&mut self) -> Result<()> {
        self.buf.clear();
        match &self.last {
            Some(prev) if prev.width() == self.next.width() && prev.height() == self.next.height() => {
                encode_diff_into(prev, &self.next, &mut self.buf)?
            }
            _ => encode_full_into(&self.next, &mut self.buf)?,
        }
        self.flush_buf()?;

        // Swap buffers instead of cloning; `next` is fully redrawn every frame.
        let prev = self
            .last
            .take()
            .unwrap_or_else(|| FrameBuffer::new(self.next.width(), self.next.height()));
        self.last = Some(std::mem::replace(&mut self.next, prev));
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let viewport = Self::viewport()?;
        self.view.render_into(snapshot, viewport, &mut self.next);
        self.present()
    }

    fn render_menu(&mut self, menu: &MenuView) -> Result<()> {
        let viewport = Self::viewport()?;
        self.view.render_menu_into(menu, viewport, &mut self.next);
        self.present()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a whole frame into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            pen.print(out, fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish(out)
}

/// Encode only the cells of `next` that differ from `prev`.
///
/// Adjacent changed cells on a row are written as one run after a single cursor move.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x + len {
            pen.print(out, next.get(cx, y).unwrap_or_default())?;
        }
    }
    pen.finish(out)
}

/// Tracks the active style so it is only re-sent when it changes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: crate::fb::Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            let style = cell.style;
            out.queue(SetAttribute(Attribute::Reset))?;
            out.queue(SetForegroundColor(to_color(style.fg)))?;
            out.queue(SetBackgroundColor(to_color(style.bg)))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` runs of differing cells, row by row. Frames must be the same size.
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let mut start = None;
        for x in 0..=next.width() {
            let differs = x < next.width() && prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = a.clone();
        for x in 1..=3 {
            b.put_char(x, 0, 'X', style);
        }
        b.put_char(5, 1, 'Y', style);

        assert_eq!(changed_runs(&a, &b), vec![(1, 0, 3), (5, 1, 1)]);
        assert!(changed_runs(&a, &a).is_empty());
    }

    #[test]
    fn test_diff_encoding_only_writes_changes() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(10, 3);
        let mut b = a.clone();
        b.put_str(2, 1, "hi", style);

        let mut diff = Vec::new();
        encode_diff_into(&a, &b, &mut diff).unwrap();
        let mut full = Vec::new();
        encode_full_into(&b, &mut full).unwrap();

        let diff_text = String::from_utf8_lossy(&diff);
        assert!(diff_text.contains("hi"));
        assert!(diff.len() < full.len());

        let mut none = Vec::new();
        encode_diff_into(&a, &a, &mut none).unwrap();
        assert!(!String::from_utf8_lossy(&none).contains(' '));
    }
}
