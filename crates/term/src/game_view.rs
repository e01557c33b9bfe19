//! ArcadeView: maps snapshots and the menu into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{BlockSnapshot, GameOverReport, SnakeSnapshot, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::session::MenuView;
use crate::types::{PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const GRID: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
const HINT: CellStyle = CellStyle::new(Rgb::new(150, 150, 150), SCREEN_BG).dim();
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();

const SNAKE_HEAD: CellStyle = CellStyle::new(Rgb::new(140, 255, 140), PLAY_BG).bold();
const SNAKE_BODY: CellStyle = CellStyle::new(Rgb::new(60, 190, 80), PLAY_BG);
const FOOD: CellStyle = CellStyle::new(Rgb::new(230, 70, 70), PLAY_BG).bold();

/// Where a board sits on screen, in terminal cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal drawing for both games and the selection screen.
pub struct ArcadeView {
    /// Board cell width in terminal columns
    cell_w: u16,
}

impl Default for ArcadeView {
    fn default() -> Self {
        // Two columns per cell keeps board cells roughly square.
        Self { cell_w: 2 }
    }
}

impl ArcadeView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Draw a game frame into a reusable framebuffer.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        prepare(fb, viewport);
        match snap {
            Snapshot::Snake(s) => self.draw_snake(s, viewport, fb),
            Snapshot::Blocks(b) => self.draw_blocks(b, viewport, fb),
        }
    }

    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Draw the game-selection screen.
    pub fn render_menu_into(&self, menu: &MenuView, viewport: Viewport, fb: &mut FrameBuffer) {
        prepare(fb, viewport);

        let lines: [(&str, String); 5] = [
            ("TUI ARCADE", String::new()),
            ("1", format!("Snake        best {}", menu.snake_high_score)),
            ("2", format!("Block-Stack  best {}", menu.blocks_high_score)),
            (
                "m",
                format!("Sound        {}", if menu.sound_enabled { "on" } else { "off" }),
            ),
            ("q", "Quit".to_string()),
        ];

        let block_w = 30;
        let x = viewport.width.saturating_sub(block_w) / 2;
        let mut y = viewport.height.saturating_sub(lines.len() as u16 * 2) / 2;

        for (i, (key, text)) in lines.iter().enumerate() {
            if i == 0 {
                fb.put_str(x, y, key, OVERLAY);
            } else {
                fb.put_str(x, y, key, LABEL);
                fb.put_str(x + 4, y, text, VALUE);
            }
            y = y.saturating_add(2);
        }
    }

    pub fn render_menu(&self, menu: &MenuView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_menu_into(menu, viewport, &mut fb);
        fb
    }

    fn draw_blocks(&self, snap: &BlockSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let frame = self.place_board(BOARD_WIDTH as u16, BOARD_HEIGHT as u16, viewport);
        self.draw_frame(fb, frame);

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match snap.cell_at(x, y) {
                    Some(kind) => {
                        let style = CellStyle::new(piece_colour(kind), PLAY_BG).bold();
                        self.fill_cell(fb, frame, x as u16, y as u16, '█', style);
                    }
                    None => self.fill_cell(fb, frame, x as u16, y as u16, '·', GRID),
                }
            }
        }

        let panel = [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ];
        let hints = [
            "←→ move  ↓ soft drop",
            "↑ rotate  Enter drop",
            "Space pause  R restart",
            "Esc menu",
        ];
        draw_panel(fb, frame, viewport, &panel, &hints);
        draw_state_overlay(fb, frame, snap.state, snap.last_result);
    }

    fn draw_snake(&self, snap: &SnakeSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let size = u16::from(snap.board_size);
        let frame = self.place_board(size, size, viewport);
        self.draw_frame(fb, frame);

        for y in 0..size {
            for x in 0..size {
                self.fill_cell(fb, frame, x, y, '·', GRID);
            }
        }

        if let Some(food) = snap.food {
            if let (Ok(x), Ok(y)) = (u16::try_from(food.x), u16::try_from(food.y)) {
                self.fill_cell(fb, frame, x, y, '█', FOOD);
            }
        }

        // Body first so the head always wins.
        for (i, seg) in snap.snake.iter().enumerate().rev() {
            let (Ok(x), Ok(y)) = (u16::try_from(seg.x), u16::try_from(seg.y)) else {
                continue;
            };
            if x >= size || y >= size {
                continue;
            }
            let (ch, style) = if i == 0 {
                ('█', SNAKE_HEAD)
            } else {
                ('▓', SNAKE_BODY)
            };
            self.fill_cell(fb, frame, x, y, ch, style);
        }

        let panel = [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("SPEED", snap.speed_level),
            ("LENGTH", snap.snake.len() as u32),
        ];
        let hints = ["←↑→↓ / WASD turn", "Space pause  R restart", "Esc menu"];
        draw_panel(fb, frame, viewport, &panel, &hints);
        draw_state_overlay(fb, frame, snap.state, snap.last_result);
    }

    /// Centre a `cols` x `rows` board (plus border) in the viewport.
    fn place_board(&self, cols: u16, rows: u16, viewport: Viewport) -> Frame {
        let w = cols.saturating_mul(self.cell_w).saturating_add(2);
        let h = rows.saturating_add(2);
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, f: Frame) {
        if f.w < 2 || f.h < 2 {
            return;
        }
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', BORDER);
            fb.put_char(x, bottom, '─', BORDER);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', BORDER);
            fb.put_char(right, y, '│', BORDER);
        }
        fb.put_char(f.x, f.y, '┌', BORDER);
        fb.put_char(right, f.y, '┐', BORDER);
        fb.put_char(f.x, bottom, '└', BORDER);
        fb.put_char(right, bottom, '┘', BORDER);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, f: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = f.x + 1 + x * self.cell_w;
        fb.fill_rect(px, f.y + 1 + y, self.cell_w, 1, ch, style);
    }
}

fn prepare(fb: &mut FrameBuffer, viewport: Viewport) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().cell(' '));
}

/// Labels with values, then key hints, to the right of the board.
fn draw_panel(
    fb: &mut FrameBuffer,
    board: Frame,
    viewport: Viewport,
    values: &[(&str, u32)],
    hints: &[&str],
) {
    let x = board.x.saturating_add(board.w).saturating_add(2);
    if x.saturating_add(10) > viewport.width {
        return;
    }

    let mut y = board.y;
    for &(label, value) in values {
        fb.put_str(x, y, label, LABEL);
        fb.put_u32(x, y.saturating_add(1), value, VALUE);
        y = y.saturating_add(3);
    }
    for hint in hints {
        fb.put_str(x, y, hint, HINT);
        y = y.saturating_add(1);
    }
}

fn draw_state_overlay(
    fb: &mut FrameBuffer,
    board: Frame,
    state: RunState,
    last_result: Option<GameOverReport>,
) {
    let mut lines = Vec::with_capacity(3);
    match state {
        RunState::Paused => lines.push("PAUSED".to_string()),
        RunState::GameOver => {
            lines.push("GAME OVER".to_string());
            if let Some(report) = last_result {
                lines.push(format!("FINAL SCORE {}", report.final_score));
                if report.new_high_score {
                    lines.push("NEW HIGH SCORE!".to_string());
                }
            }
        }
        RunState::NotStarted | RunState::Running => return,
    }

    let mut y = board.y.saturating_add(board.h / 2);
    for text in &lines {
        let text_w = text.chars().count() as u16;
        let x = board.x.saturating_add(board.w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, OVERLAY);
        y = y.saturating_add(1);
    }
}

fn piece_colour(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockEngine, Game, SnakeEngine};
    use crate::types::Command;

    const VIEW: Viewport = Viewport {
        width: 80,
        height: 30,
    };

    #[test]
    fn test_snake_frame_shows_head_and_score() {
        let mut snake = SnakeEngine::new(20, 70, 3);
        snake.start();
        let fb = ArcadeView::default().render(&snake.snapshot(), VIEW);

        // 20 cells * 2 columns + border = 42 wide, centred in 80.
        let board_x = (80 - 42) / 2;
        let board_y = (30 - 22) / 2;
        let head = fb.get(board_x + 1 + 10 * 2, board_y + 1 + 10).unwrap();
        assert_eq!(head.ch, '█');
        assert_eq!(head.style, SNAKE_HEAD);

        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("70"));
        assert!(!fb.contains_text("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut snake = SnakeEngine::new(20, 0, 3);
        snake.start();
        snake.toggle_pause();
        let fb = ArcadeView::default().render(&snake.snapshot(), VIEW);
        assert!(fb.contains_text("PAUSED"));
    }

    #[test]
    fn test_blocks_frame_draws_active_piece() {
        let mut blocks = BlockEngine::new(0, 9);
        blocks.start();
        let snap = blocks.snapshot();
        let fb = ArcadeView::default().render(&snap, VIEW);

        let Snapshot::Blocks(view) = &snap else {
            panic!("expected blocks snapshot");
        };
        let (x, y) = view.active.unwrap().cells().next().unwrap();
        let board_x = (80 - 22) / 2;
        let board_y = (30 - 22) / 2;
        let cell = fb
            .get(board_x + 1 + x as u16 * 2, board_y + 1 + y as u16)
            .unwrap();
        assert_eq!(cell.ch, '█');
        assert!(fb.contains_text("LINES"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut blocks = BlockEngine::new(0, 9);
        blocks.start();
        while !blocks.is_over() {
            blocks.handle_input(Command::Drop);
        }
        let fb = ArcadeView::default().render(&blocks.snapshot(), VIEW);
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text(&format!("FINAL SCORE {}", blocks.score())));
        assert!(fb.contains_text("NEW HIGH SCORE!"));
    }

    #[test]
    fn test_game_over_without_new_high_score() {
        let mut blocks = BlockEngine::new(1_000_000, 9);
        blocks.start();
        while !blocks.is_over() {
            blocks.handle_input(Command::Drop);
        }
        let fb = ArcadeView::default().render(&blocks.snapshot(), VIEW);
        assert!(fb.contains_text("FINAL SCORE"));
        assert!(!fb.contains_text("NEW HIGH SCORE!"));
    }

    #[test]
    fn test_menu_lists_games_and_scores() {
        let menu = MenuView {
            snake_high_score: 120,
            blocks_high_score: 4300,
            sound_enabled: false,
        };
        let fb = ArcadeView::default().render_menu(&menu, VIEW);
        assert!(fb.contains_text("Snake        best 120"));
        assert!(fb.contains_text("Block-Stack  best 4300"));
        assert!(fb.contains_text("off"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let mut snake = SnakeEngine::new(20, 0, 3);
        snake.start();
        let fb = ArcadeView::default().render(&snake.snapshot(), Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
