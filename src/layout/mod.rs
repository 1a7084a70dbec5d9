//! Layout, compositing and the per-frame hit-test table.

pub mod compositor;

pub use compositor::{Level, LayoutPass, Placement, compose};

use ratatui::layout::Rect;

use crate::widgets::{Action, CLICK, Hotspots};

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitEntry {
    pub rect: Rect,
    pub actions: Hotspots,
}

/// Clickable rectangles in draw order.
///
/// Rebuilt wholesale by every layout pass and only valid until the next
/// one; a later entry was drawn on top of an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitTable {
    entries: Vec<HitEntry>,
}

impl HitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HitEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Record `actions` for `rect`. Rectangles that ended up off screen are
    /// dropped.
    pub fn push(&mut self, rect: Rect, actions: Hotspots) {
        if rect.is_empty() {
            return;
        }
        self.entries.push(HitEntry { rect, actions });
    }

    /// Merge a nested table drawn with its origin at `clip`'s corner,
    /// clipping each rectangle to `clip`.
    pub fn extend_translated(&mut self, nested: HitTable, clip: Rect) {
        for entry in nested.entries {
            let rect = translate(entry.rect, clip.x, clip.y).intersection(clip);
            self.push(rect, entry.actions);
        }
    }

    /// Every `action` bound under a rectangle containing the point, in
    /// table order.
    pub fn actions_at(&self, action: &str, column: u16, row: u16) -> Vec<Action> {
        self.entries
            .iter()
            .filter(|entry| rect_contains(entry.rect, column, row))
            .filter_map(|entry| entry.actions.get(action).cloned())
            .collect()
    }

    pub fn click_actions(&self, column: u16, row: u16) -> Vec<Action> {
        self.actions_at(CLICK, column, row)
    }
}

pub(crate) fn translate(rect: Rect, dx: u16, dy: u16) -> Rect {
    Rect {
        x: rect.x.saturating_add(dx),
        y: rect.y.saturating_add(dy),
        ..rect
    }
}
