use crossterm::event::KeyEvent;
use ratatui::layout::Size;

use super::{Action, CLICK, Hotspots, KeyOutcome, Label, TextInput, Value, WidgetBehavior};
use crate::constants::LABEL_GAP;
use crate::keybindings::KeyBindings;
use crate::style::BoxStyle;
use crate::ui::text_width;

/// A label followed by a text field on the same row. Keys, focus and reset
/// go to the field; the value is the field's value.
#[derive(Debug, Clone)]
pub struct LabeledInput {
    label: Label,
    input: TextInput,
}

impl LabeledInput {
    pub fn new(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            label: Label::new(label),
            input: TextInput::new(default),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut TextInput {
        &mut self.input
    }

    /// Columns taken by the label and the gap after it.
    pub fn label_width(&self) -> u16 {
        text_width(self.label.text()) + LABEL_GAP
    }
}

impl WidgetBehavior for LabeledInput {
    fn measure(&self, style: &BoxStyle) -> Size {
        let field = self.input.measure(style);
        Size::new(self.label_width() + field.width, field.height)
    }

    fn value(&self) -> Option<Value> {
        self.input.value()
    }

    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> KeyOutcome {
        self.input.handle_key(key, keys)
    }

    fn focus(&mut self) {
        self.input.focus();
    }

    fn blur(&mut self) {
        self.input.blur();
    }

    fn reset(&mut self) {
        self.input.reset();
    }

    fn hotspots(&self, name: &str) -> Option<Hotspots> {
        Some(Hotspots::from([(CLICK, Action::Focus(name.to_string()))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn forwards_to_the_field() {
        let mut input = LabeledInput::new("Name:", "anon");
        input.focus();
        input.handle_key(&KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE), &KeyBindings::default());
        assert_eq!(input.value(), Some(Value::from("z")));
        input.reset();
        assert_eq!(input.value(), Some(Value::from("anon")));
    }

    #[test]
    fn measures_label_gap_and_field() {
        let input = LabeledInput::new("Name:", "");
        let style = BoxStyle {
            width: Some(10),
            ..BoxStyle::default()
        };
        assert_eq!(input.measure(&style), Size::new(5 + LABEL_GAP + 10, 1));
    }
}
