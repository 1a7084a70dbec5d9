use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Smooths over terminal differences in raw key events before a form sees
/// them.
///
/// - `Shift+Tab` arrives as `Tab` with the shift bit on some terminals.
/// - A bare line feed or carriage return (`Ctrl+J`, `Ctrl+M`) means Enter.
/// - Releases are dropped everywhere; Windows repeats are dropped too, since
///   a held Enter would otherwise submit over and over.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        let Event::Key(key) = evt else {
            return Some(evt);
        };
        match key.kind {
            KeyEventKind::Release => return None,
            KeyEventKind::Repeat if cfg!(windows) => return None,
            _ => {}
        }
        Some(Event::Key(normalize_key(key)))
    }
}

fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        KeyCode::Char('\n' | '\r') => {
            key.code = KeyCode::Enter;
        }
        KeyCode::Char('j' | 'm') if key.modifiers == KeyModifiers::CONTROL => {
            key.code = KeyCode::Enter;
            key.modifiers = KeyModifiers::NONE;
        }
        _ => {}
    }
    key
}
