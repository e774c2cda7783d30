//! GameView: maps a [`RenderFrame`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::RenderFrame;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, EMPTY};

/// Shown over the field while the game is paused.
pub const PAUSED_MESSAGE: &str = "Press enter key to start";

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered field in terminal cells
    pub fn frame_size(&self, frame: &RenderFrame) -> (u16, u16) {
        let w = (frame.field.width() as u16).saturating_mul(self.cell_w);
        let h = (frame.field.height() as u16).saturating_mul(self.cell_h);
        (w.saturating_add(2), h.saturating_add(2))
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, frame: &RenderFrame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let (frame_w, frame_h) = self.frame_size(frame);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let empty = Style::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        for (y, row) in frame.field.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                let (ch, style) = if cell == EMPTY {
                    ('·', empty)
                } else {
                    ('█', Style::new(cell_color(cell), FIELD_BG).bold())
                };
                let px = start_x + 1 + x as u16 * self.cell_w;
                let py = start_y + 1 + y as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        if frame.is_paused {
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            let text_w = PAUSED_MESSAGE.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, start_y.saturating_add(frame_h / 2), PAUSED_MESSAGE, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &RenderFrame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put(x, y, '┌', style);
    fb.put(x + w - 1, y, '┐', style);
    fb.put(x, y + h - 1, '└', style);
    fb.put(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', style);
        fb.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', style);
        fb.put(x + w - 1, y + dy, '│', style);
    }
}

/// Palette for catalog colours 1..=7; anything else renders grey
fn cell_color(cell: Cell) -> Rgb {
    match cell {
        1 => Rgb::new(80, 220, 220),
        2 => Rgb::new(240, 220, 80),
        3 => Rgb::new(200, 120, 220),
        4 => Rgb::new(100, 220, 120),
        5 => Rgb::new(220, 80, 80),
        6 => Rgb::new(80, 120, 220),
        7 => Rgb::new(255, 165, 0),
        _ => Rgb::new(160, 160, 160),
    }
}
