use std::fmt;

use crossterm::event::KeyEvent;
use ratatui::layout::Size;

use super::{Action, CLICK, FormCommand, Hotspots, KeyOutcome, WidgetBehavior};
use crate::keybindings::{Action as KeyAction, KeyBindings};
use crate::style::BoxStyle;
use crate::theme;
use crate::ui::text_width;

pub enum ButtonAction {
    Submit,
    Clear,
    Callback(Box<dyn FnMut()>),
}

impl ButtonAction {
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        ButtonAction::Callback(Box::new(callback))
    }
}

impl fmt::Debug for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonAction::Submit => f.write_str("Submit"),
            ButtonAction::Clear => f.write_str("Clear"),
            ButtonAction::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// Runs its action on Enter or click.
#[derive(Debug)]
pub struct Button {
    text: String,
    action: ButtonAction,
}

impl Button {
    pub fn new(text: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }

    pub fn default_style() -> BoxStyle {
        BoxStyle {
            bg_color: theme::button_bg(),
            fg_color: theme::button_fg(),
            ..BoxStyle::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Run a callback action; structural actions are returned to the caller.
    pub fn trigger(&mut self) -> Option<FormCommand> {
        match &mut self.action {
            ButtonAction::Submit => Some(FormCommand::Submit),
            ButtonAction::Clear => Some(FormCommand::Clear),
            ButtonAction::Callback(callback) => {
                callback();
                None
            }
        }
    }
}

impl WidgetBehavior for Button {
    fn measure(&self, style: &BoxStyle) -> Size {
        // `[ text ]` without a border, ` text ` inside one.
        let natural = text_width(&self.text) + 4 - style.border() * 2;
        let border = style.border() * 2;
        Size::new(
            style.width.unwrap_or(0).max(natural) + border,
            style.height.unwrap_or(1) + border,
        )
    }

    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> KeyOutcome {
        if keys.matches(KeyAction::Confirm, key) {
            KeyOutcome::Activate
        } else {
            KeyOutcome::Ignored
        }
    }

    fn hotspots(&self, name: &str) -> Option<Hotspots> {
        Some(Hotspots::from([(CLICK, Action::Activate(name.to_string()))]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn enter_activates() {
        let mut button = Button::new("Go", ButtonAction::Submit);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(button.handle_key(&enter, &KeyBindings::default()), KeyOutcome::Activate);
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(button.handle_key(&other, &KeyBindings::default()), KeyOutcome::Ignored);
        assert_eq!(button.trigger(), Some(FormCommand::Submit));
    }

    #[test]
    fn callbacks_run_in_place() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut button = Button::new(
            "Count",
            ButtonAction::callback(move || counter.set(counter.get() + 1)),
        );
        assert_eq!(button.trigger(), None);
        assert_eq!(button.trigger(), None);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn measures_with_and_without_border() {
        let button = Button::new("Go", ButtonAction::Clear);
        assert_eq!(button.measure(&BoxStyle::default()), Size::new(6, 1));
        let bordered = BoxStyle {
            border_width: 1,
            ..BoxStyle::default()
        };
        assert_eq!(button.measure(&bordered), Size::new(6, 3));
    }
}
