//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! | Phase | Screen |
//! |-------|--------|
//! | Menu | title, "Press SPACE to start", controls |
//! | Running | bordered field, score and next piece panel |
//! | Paused | the running screen with a "PAUSED" overlay |
//! | Lost | final score and "Press SPACE to begin again." |

use crate::core::{occupied_offsets, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb, BLACK, FIELD_BG};
use crate::types::{Phase, Rotation, Shape, FIELD_COLUMNS, FIELD_ROWS};

pub const TITLE: &str = "PIXEL TETRIS";
pub const START_PROMPT: &str = "Press SPACE to start";
pub const RESTART_PROMPT: &str = "Press SPACE to begin again.";
pub const PAUSED_TEXT: &str = "PAUSED";
pub const SCORE_LABEL: &str = "Score:";
pub const NEXT_LABEL: &str = "Next Piece";

const CONTROLS: [&str; 6] = [
    "Left arrow: move left",
    "Right arrow: move right",
    "Down arrow: fall faster",
    "Up arrow: rotate",
    "Esc: pause",
    "q: quit",
];

const LOST_PREFIX: &str = "You Lost! Your score was ";

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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

/// Where the field frame lands in the framebuffer
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    /// Cell sizes are clamped to `1..=MAX_CELL_SIZE`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when the
    /// viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::blank(CellStyle::default()));

        match snap.phase {
            Phase::Menu => self.draw_menu(fb, viewport),
            Phase::Lost => self.draw_lost(fb, snap, viewport),
            Phase::Running | Phase::Paused => {
                let frame = self.draw_field(fb, snap, viewport);
                self.draw_side_panel(fb, snap, viewport, frame);
                if snap.paused() {
                    let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
                    fb.put_str_centered(frame.x, frame.w, frame.y + frame.h / 2, PAUSED_TEXT, style);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let lines = 4 + CONTROLS.len() as u16;
        let mut y = viewport.height.saturating_sub(lines) / 2;

        let title = CellStyle::fg(shape_color(Shape::T)).bold();
        let text = CellStyle::default();
        let hint = CellStyle::default().dim();

        fb.put_str_centered(0, viewport.width, y, TITLE, title);
        y = y.saturating_add(2);
        fb.put_str_centered(0, viewport.width, y, START_PROMPT, text);
        y = y.saturating_add(2);
        for line in CONTROLS {
            fb.put_str_centered(0, viewport.width, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_lost(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) {
        let y = viewport.height.saturating_sub(3) / 2;
        let text = CellStyle::default().bold();

        // "You Lost! Your score was N." without building a String.
        let len = LOST_PREFIX.len() as u16 + digit_count(snap.score) + 1;
        let x = viewport.width.saturating_sub(len) / 2;
        fb.put_str(x, y, LOST_PREFIX, text);
        let num_x = x.saturating_add(LOST_PREFIX.len() as u16);
        fb.put_u32(num_x, y, snap.score, text);
        fb.put_char(num_x.saturating_add(digit_count(snap.score)), y, '.', text);

        fb.put_str_centered(0, viewport.width, y.saturating_add(2), RESTART_PROMPT, CellStyle::default());
    }

    fn draw_field(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport) -> Frame {
        let inner_w = FIELD_COLUMNS as u16 * self.cell_w;
        let inner_h = FIELD_ROWS as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(inner_w + 2 + PANEL_W) / 2,
            y: viewport.height.saturating_sub(inner_h + 2) / 2,
            w: inner_w + 2,
            h: inner_h + 2,
        };

        self.draw_border(fb, frame, CellStyle::fg(Rgb::new(200, 200, 200)));

        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(shape) => self.draw_block(fb, frame, x as u16, y as u16, *shape),
                    None => {
                        let dot = CellStyle::fg(Rgb::new(90, 90, 100)).on(FIELD_BG).dim();
                        self.fill_cell(fb, frame, x as u16, y as u16, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in active.cells.iter() {
                if (0..FIELD_COLUMNS as i8).contains(&x) && (0..FIELD_ROWS as i8).contains(&y) {
                    self.draw_block(fb, frame, x as u16, y as u16, active.shape);
                }
            }
        }

        frame
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, shape: Shape) {
        let style = CellStyle::fg(shape_color(shape)).on(FIELD_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x.saturating_add(1).saturating_add(x.saturating_mul(self.cell_w));
        let py = frame.y.saturating_add(1).saturating_add(y.saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(NEXT_LABEL.len() as u16) > viewport.width {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = frame.y;
        fb.put_str(panel_x, y, SCORE_LABEL, label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, NEXT_LABEL, label);
        y = y.saturating_add(2);
        if let Some(next) = snap.next {
            let style = CellStyle::fg(shape_color(next)).on(BLACK).bold();
            for (dx, dy) in occupied_offsets(next, Rotation::North) {
                let px = panel_x.saturating_add(dx as u16 * self.cell_w);
                let py = y.saturating_add(dy as u16 * self.cell_h);
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        }
    }
}

/// Columns reserved to the right of the field for the side panel
const PANEL_W: u16 = 14;

/// Largest cell width or height in terminal cells
const MAX_CELL_SIZE: u16 = 8;

/// Display color of a shape
pub fn shape_color(shape: Shape) -> Rgb {
    match shape {
        Shape::Long => Rgb::new(80, 220, 220),
        Shape::T => Rgb::new(200, 120, 220),
        Shape::Square => Rgb::new(240, 220, 80),
        Shape::ZLeft => Rgb::new(220, 80, 80),
        Shape::ZRight => Rgb::new(100, 220, 120),
        Shape::LLeft => Rgb::new(80, 120, 220),
        Shape::LRight => Rgb::new(255, 165, 0),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
