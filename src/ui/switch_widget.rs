//! Ratatui binding for [`LabelSwitch`].
//!
//! One terminal column is one pixel horizontally and one row is one pixel
//! vertically; text occupies the row above its baseline.  The selected
//! background is painted with Unicode `▀` half-blocks (two image rows per
//! cell).

use image::{imageops::FilterType, RgbaImage};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    text::Span,
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::draw::{Canvas, Paint};
use crate::core::geometry::{Bounds, Insets};
use crate::core::style::Argb;
use crate::core::LabelSwitch;

use super::theme::Theme;

// ───────────────────────────────────────── canvas ────────────

/// [`Canvas`] over a region of a Ratatui buffer.  Coordinates are relative
/// to `area`; anything outside it is clipped.
pub struct BufferCanvas<'b> {
    buf: &'b mut Buffer,
    area: Rect,
}

impl<'b> BufferCanvas<'b> {
    pub fn new(buf: &'b mut Buffer, area: Rect) -> Self {
        Self { buf, area }
    }

    fn cell_at(&mut self, col: i32, row: i32) -> Option<&mut ratatui::buffer::Cell> {
        if col < 0 || row < 0 || col >= self.area.width as i32 || row >= self.area.height as i32 {
            return None;
        }
        self.buf.cell_mut(Position::new(
            self.area.x + col as u16,
            self.area.y + row as u16,
        ))
    }
}

impl Canvas for BufferCanvas<'_> {
    fn measure_text(&self, text: &str, _text_size: f32) -> f32 {
        Span::raw(text).width() as f32
    }

    fn font_ascent(&self, _text_size: f32) -> f32 {
        -1.0
    }

    fn draw_text(&mut self, text: &str, x: f32, baseline: f32, paint: &Paint) {
        let row = baseline as i32 - 1;
        let fg = Theme::blend(paint.color, paint.alpha);
        let mut col = x.round() as i32;
        let mut scratch = [0u8; 4];
        for ch in text.chars() {
            let symbol: &str = ch.encode_utf8(&mut scratch);
            let width = Span::raw(symbol).width() as i32;
            if width == 0 {
                continue;
            }
            if let Some(cell) = self.cell_at(col, row) {
                cell.set_symbol(symbol).set_fg(fg);
            }
            col += width;
        }
    }

    fn draw_bitmap(&mut self, bitmap: &RgbaImage, left: f32, top: f32) {
        let (w, rows) = (bitmap.width(), bitmap.height());
        if w == 0 || rows == 0 {
            return;
        }
        let scaled = image::imageops::resize(bitmap, w, rows * 2, FilterType::Triangle);
        let (left, top) = (left.round() as i32, top.round() as i32);

        for row in 0..rows {
            for col in 0..w {
                let t = scaled.get_pixel(col, row * 2);
                let b = scaled.get_pixel(col, row * 2 + 1);
                if t[3] == 0 && b[3] == 0 {
                    continue;
                }
                let blend = |p: &image::Rgba<u8>| {
                    let argb = Argb::from_rgb(p[0], p[1], p[2]);
                    Theme::blend(argb, p[3])
                };
                let (fg, bg) = (blend(t), blend(b));
                if let Some(cell) = self.cell_at(left + col as i32, top + row as i32) {
                    cell.set_char('▀').set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

// ───────────────────────────────────────── widget ────────────

/// The switch widget, created fresh each frame.  The switch is its state.
#[derive(Default)]
pub struct LabelSwitchWidget<'a> {
    block: Option<Block<'a>>,
    padding: Insets,
}

impl<'a> LabelSwitchWidget<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Padding inside the block, in cells.
    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }
}

impl StatefulWidget for LabelSwitchWidget<'_> {
    type State = LabelSwitch;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        buf.set_style(inner, Style::default().bg(Theme::backdrop()));

        state.set_bounds(Bounds {
            width: inner.width as i32,
            height: inner.height as i32,
            padding: self.padding,
        });
        let mut canvas = BufferCanvas::new(buf, inner);
        state.draw(&mut canvas);
    }
}
