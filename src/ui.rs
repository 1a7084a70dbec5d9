//! UiFrame: a thin wrapper around a `ratatui` buffer that clamps drawing to
//! the visible area and centralizes clipping logic.
//!
//! Widget surfaces are composited onto the form canvas at positions computed
//! by layout, and those positions can drift partially or fully outside the
//! canvas (a centered overlay on a narrow terminal, a container bigger than
//! the screen). Writing out-of-bounds into a `Buffer` panics, so every
//! composite goes through `UiFrame`, which clips to its area.
//!
//! Blitting treats `Color::Reset` backgrounds in the source as transparent:
//! the destination background shows through, which lets labels and images
//! sit on top of the form or container background.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

/// Wrapper around a `ratatui` buffer that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    ///
    /// This powers offscreen rendering paths where widgets draw into their
    /// own surface before being composited onto the form canvas.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    /// Copy the cells of `src` that overlap this frame, keeping their
    /// coordinates.
    pub fn blit_from(&mut self, src: &Buffer, src_area: Rect) {
        let Some(overlap) = self.clip_rect(src_area) else {
            return;
        };
        for y in overlap.y..overlap.y.saturating_add(overlap.height) {
            for x in overlap.x..overlap.x.saturating_add(overlap.width) {
                if let (Some(src_cell), Some(dst_cell)) =
                    (src.cell((x, y)), self.buffer.cell_mut((x, y)))
                {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }

    /// Composite the whole of `src` with its top-left corner at `(x, y)`.
    ///
    /// Returns the rectangle actually covered, clipped to this frame. The
    /// rectangle is empty when nothing landed inside.
    pub fn blit_at(&mut self, src: &Buffer, x: u16, y: u16) -> Rect {
        let dest = Rect {
            x,
            y,
            width: src.area.width,
            height: src.area.height,
        };
        let Some(covered) = self.clip_rect(dest) else {
            return Rect {
                x,
                y,
                width: 0,
                height: 0,
            };
        };
        for dy in covered.y..covered.y.saturating_add(covered.height) {
            for dx in covered.x..covered.x.saturating_add(covered.width) {
                let sx = src.area.x + (dx - x);
                let sy = src.area.y + (dy - y);
                if let (Some(src_cell), Some(dst_cell)) =
                    (src.cell((sx, sy)), self.buffer.cell_mut((dx, dy)))
                {
                    let below = dst_cell.bg;
                    *dst_cell = src_cell.clone();
                    if dst_cell.bg == Color::Reset {
                        dst_cell.bg = below;
                    }
                }
            }
        }
        covered
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Width of `value` in cells, one per char.
pub(crate) fn text_width(value: &str) -> u16 {
    u16::try_from(value.chars().count()).unwrap_or(u16::MAX)
}
