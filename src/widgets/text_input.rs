use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Size;

use super::{Action, CLICK, Hotspots, KeyOutcome, Value, WidgetBehavior};
use crate::constants::{DEFAULT_FIELD_WIDTH, DEFAULT_MAX_CHARS};
use crate::keybindings::{Action as KeyAction, KeyBindings};
use crate::style::BoxStyle;
use crate::theme;

/// Blink phase of the text cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBlink {
    pub visible: bool,
    next_switch: Option<Instant>,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self {
            visible: true,
            next_switch: None,
        }
    }
}

impl CursorBlink {
    /// Show the cursor and restart the interval on the next tick.
    pub fn reset(&mut self) {
        self.visible = true;
        self.next_switch = None;
    }

    /// Toggle at most once per elapsed `interval`.
    pub fn tick(&mut self, now: Instant, interval: Duration) {
        match self.next_switch {
            None => self.next_switch = Some(now + interval),
            Some(at) if now >= at => {
                self.visible = !self.visible;
                self.next_switch = Some(now + interval);
            }
            Some(_) => {}
        }
    }
}

/// A single-line editable text field.
///
/// The cursor is a char index. A field whose value still equals its default
/// is emptied on focus so the default acts as a placeholder, and a blank
/// field gets its default back on blur.
#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    default: String,
    max_chars: usize,
    cursor: usize,
    blink: CursorBlink,
}

impl TextInput {
    pub fn new(default: impl Into<String>) -> Self {
        let default = default.into();
        let cursor = default.chars().count();
        Self {
            value: default.clone(),
            default,
            max_chars: DEFAULT_MAX_CHARS,
            cursor,
            blink: CursorBlink::default(),
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn default_style() -> BoxStyle {
        BoxStyle {
            bg_color: theme::field_bg(),
            fg_color: theme::field_fg(),
            ..BoxStyle::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_visible(&self) -> bool {
        self.blink.visible
    }

    pub fn tick(&mut self, now: Instant, interval: Duration) {
        self.blink.tick(now, interval);
    }

    /// First visible char when `width` cells are available, keeping the
    /// cursor cell on screen.
    pub fn scroll_offset(&self, width: u16) -> usize {
        let width = usize::from(width.max(1));
        (self.cursor + 1).saturating_sub(width)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) -> KeyOutcome {
        if self.len() >= self.max_chars {
            return KeyOutcome::Consumed;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        KeyOutcome::Changed
    }

    fn backspace(&mut self) -> KeyOutcome {
        if self.cursor == 0 {
            return KeyOutcome::Consumed;
        }
        let at = self.byte_index(self.cursor - 1);
        self.value.remove(at);
        self.cursor -= 1;
        KeyOutcome::Changed
    }

    pub(crate) fn inner_width(style: &BoxStyle) -> u16 {
        style.width.unwrap_or(DEFAULT_FIELD_WIDTH)
    }
}

impl WidgetBehavior for TextInput {
    fn measure(&self, style: &BoxStyle) -> Size {
        let border = style.border() * 2;
        Size::new(Self::inner_width(style) + border, 1 + border)
    }

    fn value(&self) -> Option<Value> {
        if self.value.is_empty() {
            None
        } else {
            Some(Value::Text(self.value.clone()))
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> KeyOutcome {
        let outcome = if keys.matches(KeyAction::Confirm, key) {
            // Left to the form so Enter can submit.
            return KeyOutcome::Ignored;
        } else if keys.matches(KeyAction::CursorLeft, key) {
            self.cursor = self.cursor.saturating_sub(1);
            KeyOutcome::Consumed
        } else if keys.matches(KeyAction::CursorRight, key) {
            self.cursor = (self.cursor + 1).min(self.len());
            KeyOutcome::Consumed
        } else if keys.matches(KeyAction::DeleteBack, key) {
            self.backspace()
        } else {
            match key.code {
                KeyCode::Char(c)
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.insert(c)
                }
                _ => return KeyOutcome::Ignored,
            }
        };
        self.blink.reset();
        outcome
    }

    fn focus(&mut self) {
        if self.value == self.default {
            self.value.clear();
            self.cursor = 0;
        }
        self.blink.reset();
    }

    fn blur(&mut self) {
        if self.value.trim().is_empty() {
            self.value = self.default.clone();
            self.cursor = self.len();
        }
    }

    fn reset(&mut self) {
        self.value = self.default.clone();
        self.cursor = self.len();
    }

    fn hotspots(&self, name: &str) -> Option<Hotspots> {
        Some(Hotspots::from([(CLICK, Action::Focus(name.to_string()))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(input: &mut TextInput, code: KeyCode) -> KeyOutcome {
        input.handle_key(&key(code), &KeyBindings::default())
    }

    fn typed(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            press(input, KeyCode::Char(c));
        }
    }

    #[test]
    fn default_is_a_placeholder() {
        let mut input = TextInput::new("name");
        assert_eq!(input.value(), Some(Value::from("name")));
        input.focus();
        assert_eq!(input.text(), "");
        input.blur();
        assert_eq!(input.text(), "name");

        input.focus();
        typed(&mut input, "bob");
        input.blur();
        assert_eq!(input.text(), "bob");
        // no longer the default, so focusing keeps it
        input.focus();
        assert_eq!(input.text(), "bob");
    }

    #[test]
    fn edits_at_cursor() {
        let mut input = TextInput::new("");
        typed(&mut input, "ac");
        press(&mut input, KeyCode::Left);
        typed(&mut input, "b");
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);

        press(&mut input, KeyCode::Right);
        press(&mut input, KeyCode::Right);
        assert_eq!(input.cursor(), 3);
        assert_eq!(press(&mut input, KeyCode::Backspace), KeyOutcome::Changed);
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut input = TextInput::new("");
        typed(&mut input, "xy");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Left);
        assert_eq!(press(&mut input, KeyCode::Backspace), KeyOutcome::Consumed);
        assert_eq!(input.text(), "xy");
    }

    #[test]
    fn respects_max_chars() {
        let mut input = TextInput::new("").with_max_chars(3);
        typed(&mut input, "abcd");
        assert_eq!(input.text(), "abc");
    }

    #[test]
    fn enter_and_control_keys_are_ignored() {
        let mut input = TextInput::new("");
        assert_eq!(press(&mut input, KeyCode::Enter), KeyOutcome::Ignored);
        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(&ctrl_a, &KeyBindings::default()), KeyOutcome::Ignored);
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(input.handle_key(&shifted, &KeyBindings::default()), KeyOutcome::Changed);
        assert_eq!(input.text(), "A");
    }

    #[test]
    fn multibyte_chars_edit_cleanly() {
        let mut input = TextInput::new("");
        typed(&mut input, "añb");
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn empty_value_is_absent() {
        let mut input = TextInput::new("");
        assert_eq!(input.value(), None);
        typed(&mut input, " ");
        assert_eq!(input.value(), Some(Value::from(" ")));
    }

    #[test]
    fn blink_toggles_once_per_interval() {
        let interval = Duration::from_millis(700);
        let start = Instant::now();
        let mut blink = CursorBlink::default();
        blink.tick(start, interval);
        assert!(blink.visible);
        blink.tick(start + Duration::from_millis(100), interval);
        assert!(blink.visible);
        blink.tick(start + interval, interval);
        assert!(!blink.visible);
        // a long stall still toggles only once
        blink.tick(start + interval * 5, interval);
        assert!(blink.visible);
        blink.reset();
        assert!(blink.visible);
    }

    #[test]
    fn scroll_keeps_cursor_visible() {
        let mut input = TextInput::new("");
        typed(&mut input, "0123456789");
        assert_eq!(input.scroll_offset(4), 7);
        assert_eq!(input.scroll_offset(20), 0);
    }
}
