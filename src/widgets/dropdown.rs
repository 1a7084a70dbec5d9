use std::ops::Range;

use crossterm::event::KeyEvent;
use ratatui::layout::Size;

use super::{Action, CLICK, Hotspots, KeyOutcome, Value, WidgetBehavior};
use crate::constants::{
    DEFAULT_FIELD_WIDTH, DROPDOWN_ARROW_WIDTH, DROPDOWN_VISIBLE_OPTIONS, SCROLL_BAR_WIDTH,
};
use crate::error::{FormError, Result};
use crate::keybindings::{Action as KeyAction, KeyBindings};
use crate::style::BoxStyle;
use crate::theme;
use crate::ui::text_width;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub name: String,
    pub value: Value,
}

/// A select box: an ordered option list, an optional highlighted option and
/// an expanded flag.
///
/// Enter toggles between collapsed and expanded. While expanded, Up/Down
/// move the highlight without wrapping, and collapsing commits the value.
#[derive(Debug, Clone, Default)]
pub struct Dropdown {
    options: Vec<DropdownOption>,
    highlighted: Option<usize>,
    default: Option<usize>,
    expanded: bool,
}

impl Dropdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `index` highlighted; reset returns to it.
    pub fn with_selected(mut self, index: Option<usize>) -> Self {
        self.default = index;
        self.highlighted = index;
        self
    }

    pub fn default_style() -> BoxStyle {
        BoxStyle {
            bg_color: theme::field_bg(),
            fg_color: theme::field_fg(),
            ..BoxStyle::default()
        }
    }

    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Insert an option at `at` (appending when `None` or past the end).
    /// Returns its index.
    pub fn add_option(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        at: Option<usize>,
    ) -> Result<usize> {
        let name = name.into();
        if self.options.iter().any(|option| option.name == name) {
            return Err(FormError::duplicate("dropdown", &name));
        }
        let index = at.unwrap_or(self.options.len()).min(self.options.len());
        self.options.insert(
            index,
            DropdownOption {
                name,
                value: value.into(),
            },
        );
        let shift =
            |slot: Option<usize>| -> Option<usize> { slot.map(|h| if h >= index { h + 1 } else { h }) };
        self.highlighted = shift(self.highlighted);
        self.default = shift(self.default);
        Ok(index)
    }

    /// Remove the named option, or the last one when `name` is `None`.
    pub fn remove_option(&mut self, name: Option<&str>) -> Result<DropdownOption> {
        let index = match name {
            Some(name) => self
                .options
                .iter()
                .position(|option| option.name == name)
                .ok_or_else(|| FormError::not_found("dropdown", name))?,
            None => self
                .options
                .len()
                .checked_sub(1)
                .ok_or_else(|| FormError::not_found("dropdown", "last option"))?,
        };
        let removed = self.options.remove(index);
        let remaining = self.options.len();
        let shift = |slot: Option<usize>| -> Option<usize> {
            slot.map(|h| if h > index { h - 1 } else { h })
                .and_then(|h| remaining.checked_sub(1).map(|last| h.min(last)))
        };
        self.highlighted = shift(self.highlighted);
        self.default = shift(self.default);
        Ok(removed)
    }

    /// Flip between collapsed and expanded. Returns `true` when this call
    /// collapsed the list.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        tracing::debug!(expanded = self.expanded, "dropdown toggled");
        !self.expanded
    }

    /// Move the highlight by `delta`, clamped to the option list. Moving up
    /// with nothing highlighted keeps nothing highlighted.
    pub fn move_highlight(&mut self, delta: isize) {
        let Some(last) = self.options.len().checked_sub(1) else {
            return;
        };
        self.highlighted = match self.highlighted {
            None if delta > 0 => Some((delta.unsigned_abs() - 1).min(last)),
            None => None,
            Some(h) => Some(h.saturating_add_signed(delta).min(last)),
        };
    }

    /// Option indices shown while expanded: at most five, centered on the
    /// highlight when possible and clamped at both ends of the list.
    pub fn visible_window(&self) -> Range<usize> {
        let total = self.options.len();
        let count = DROPDOWN_VISIBLE_OPTIONS;
        if total <= count {
            return 0..total;
        }
        match self.highlighted {
            Some(h) if h >= 2 && h + 2 >= total => total - count..total,
            Some(h) if h >= 2 => h - 2..h + 3,
            _ => 0..count,
        }
    }

    /// Scrollbar thumb as `(offset, length)` within a track of `track`
    /// cells. Length is proportional to visible/total, offset to
    /// highlighted/total.
    pub fn scroll_thumb(&self, track: u16) -> (u16, u16) {
        let total = self.options.len().max(1);
        let visible = self.visible_window().len();
        let track_cells = usize::from(track);
        let len = (track_cells * visible / total).clamp(1, track_cells.max(1));
        let offset = track_cells * self.highlighted.unwrap_or(0) / total;
        let offset = offset.min(track_cells.saturating_sub(len));
        (offset as u16, len as u16)
    }

    /// Inner width, wide enough for the longest option plus the scrollbar.
    pub fn content_width(&self, style: &BoxStyle) -> u16 {
        let longest = self
            .options
            .iter()
            .map(|option| text_width(&option.name))
            .max()
            .unwrap_or(0);
        style
            .width
            .unwrap_or(DEFAULT_FIELD_WIDTH)
            .max(longest + 2 + SCROLL_BAR_WIDTH)
    }

    pub fn collapsed_height(&self, style: &BoxStyle) -> u16 {
        1 + style.border() * 2
    }
}

impl WidgetBehavior for Dropdown {
    fn measure(&self, style: &BoxStyle) -> Size {
        let border = style.border() * 2;
        let rows = if self.expanded {
            self.visible_window().len().max(1) as u16
        } else {
            1
        };
        Size::new(
            self.content_width(style) + border + DROPDOWN_ARROW_WIDTH,
            rows + border,
        )
    }

    fn value(&self) -> Option<Value> {
        self.highlighted
            .and_then(|h| self.options.get(h))
            .map(|option| option.value.clone())
    }

    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> KeyOutcome {
        if keys.matches(KeyAction::Confirm, key) {
            if self.toggle() {
                KeyOutcome::Changed
            } else {
                KeyOutcome::Consumed
            }
        } else if self.expanded && keys.matches(KeyAction::OptionUp, key) {
            self.move_highlight(-1);
            KeyOutcome::Consumed
        } else if self.expanded && keys.matches(KeyAction::OptionDown, key) {
            self.move_highlight(1);
            KeyOutcome::Consumed
        } else {
            KeyOutcome::Ignored
        }
    }

    fn reset(&mut self) {
        self.highlighted = self.default;
    }

    fn hotspots(&self, name: &str) -> Option<Hotspots> {
        Some(Hotspots::from([(CLICK, Action::Toggle(name.to_string()))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn with_options(count: usize) -> Dropdown {
        let mut dropdown = Dropdown::new();
        for i in 0..count {
            dropdown
                .add_option(format!("option{}", i), i as i64, None)
                .unwrap();
        }
        dropdown
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn window_centers_then_clamps() {
        let mut dropdown = with_options(6);
        dropdown.highlighted = Some(4);
        assert_eq!(dropdown.visible_window(), 1..6);

        dropdown.highlighted = Some(0);
        assert_eq!(dropdown.visible_window(), 0..5);
        dropdown.highlighted = None;
        assert_eq!(dropdown.visible_window(), 0..5);

        let mut long = with_options(10);
        long.highlighted = Some(5);
        assert_eq!(long.visible_window(), 3..8);
        long.highlighted = Some(9);
        assert_eq!(long.visible_window(), 5..10);

        assert_eq!(with_options(3).visible_window(), 0..3);
    }

    #[test]
    fn highlight_clamps_without_wrapping() {
        let mut dropdown = with_options(3);
        dropdown.move_highlight(-1);
        assert_eq!(dropdown.highlighted(), None);
        dropdown.move_highlight(1);
        assert_eq!(dropdown.highlighted(), Some(0));
        dropdown.move_highlight(-1);
        assert_eq!(dropdown.highlighted(), Some(0));
        for _ in 0..5 {
            dropdown.move_highlight(1);
        }
        assert_eq!(dropdown.highlighted(), Some(2));
    }

    #[test]
    fn confirm_toggles_and_collapse_reports_change() {
        let mut dropdown = with_options(3);
        assert_eq!(dropdown.handle_key(&key(KeyCode::Down), &KeyBindings::default()), KeyOutcome::Ignored);
        assert_eq!(dropdown.handle_key(&key(KeyCode::Enter), &KeyBindings::default()), KeyOutcome::Consumed);
        assert!(dropdown.is_expanded());
        assert_eq!(dropdown.handle_key(&key(KeyCode::Down), &KeyBindings::default()), KeyOutcome::Consumed);
        assert_eq!(dropdown.handle_key(&key(KeyCode::Down), &KeyBindings::default()), KeyOutcome::Consumed);
        assert_eq!(dropdown.handle_key(&key(KeyCode::Enter), &KeyBindings::default()), KeyOutcome::Changed);
        assert!(!dropdown.is_expanded());
        assert_eq!(dropdown.value(), Some(Value::Integer(1)));
    }

    #[test]
    fn duplicate_options_are_rejected() {
        let mut dropdown = with_options(2);
        let err = dropdown.add_option("option1", 9_i64, None).unwrap_err();
        assert!(matches!(err, FormError::DuplicateName { .. }));
        assert_eq!(dropdown.len(), 2);
    }

    #[test]
    fn insert_at_front_keeps_highlighted_option() {
        let mut dropdown = with_options(2).with_selected(Some(1));
        assert_eq!(dropdown.add_option("first", 100_i64, Some(0)).unwrap(), 0);
        assert_eq!(dropdown.options()[0].name, "first");
        assert_eq!(dropdown.value(), Some(Value::Integer(1)));
    }

    #[test]
    fn remove_defaults_to_last_and_clamps_highlight() {
        let mut dropdown = with_options(3);
        dropdown.highlighted = Some(2);
        let removed = dropdown.remove_option(None).unwrap();
        assert_eq!(removed.name, "option2");
        assert_eq!(dropdown.highlighted(), Some(1));

        dropdown.remove_option(Some("option0")).unwrap();
        assert_eq!(dropdown.highlighted(), Some(0));
        assert_eq!(dropdown.options()[0].name, "option1");

        assert!(matches!(
            dropdown.remove_option(Some("missing")),
            Err(FormError::NotFound { .. })
        ));
        dropdown.remove_option(None).unwrap();
        assert_eq!(dropdown.highlighted(), None);
        assert!(dropdown.remove_option(None).is_err());
    }

    #[test]
    fn thumb_tracks_size_and_highlight() {
        let mut dropdown = with_options(10);
        dropdown.highlighted = Some(0);
        assert_eq!(dropdown.scroll_thumb(5), (0, 2));
        dropdown.highlighted = Some(9);
        assert_eq!(dropdown.scroll_thumb(5), (3, 2));
        assert_eq!(with_options(3).scroll_thumb(3), (0, 3));
    }

    #[test]
    fn reset_restores_default_highlight() {
        let mut dropdown = with_options(4).with_selected(Some(2));
        dropdown.move_highlight(1);
        dropdown.reset();
        assert_eq!(dropdown.value(), Some(Value::Integer(2)));
    }

    #[test]
    fn width_grows_with_longest_option() {
        let mut dropdown = Dropdown::new();
        dropdown
            .add_option("a rather long option label", 1_i64, None)
            .unwrap();
        let style = Dropdown::default_style();
        assert_eq!(dropdown.content_width(&style), 26 + 2 + SCROLL_BAR_WIDTH);
        assert_eq!(
            dropdown.measure(&style).width,
            26 + 2 + SCROLL_BAR_WIDTH + DROPDOWN_ARROW_WIDTH
        );
    }
}
