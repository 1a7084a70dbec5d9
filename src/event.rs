use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// The discrete inputs a form reacts to.
///
/// Keys are passed through as they are; the form resolves them, quit
/// combos included, against its own [`KeyBindings`](crate::keybindings::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// External quit signal.
    Quit,
    Key(KeyEvent),
    /// Left button released at a cell.
    Click { column: u16, row: u16 },
}

impl FormEvent {
    /// Map a terminal event, dropping everything a form does not handle
    /// (key releases, drags, hover, resize).
    pub fn from_terminal(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(FormEvent::Key(*key)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Up(MouseButton::Left) => {
                Some(FormEvent::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn keys_pass_through_unresolved() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(
            FormEvent::from_terminal(&Event::Key(ctrl_q)),
            Some(FormEvent::Key(ctrl_q))
        );
    }

    #[test]
    fn left_release_is_a_click() {
        assert_eq!(
            FormEvent::from_terminal(&mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(FormEvent::Click { column: 4, row: 7 })
        );
        assert_eq!(
            FormEvent::from_terminal(&mouse(MouseEventKind::Down(MouseButton::Left))),
            None
        );
        assert_eq!(FormEvent::from_terminal(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn key_releases_and_resizes_are_dropped() {
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(FormEvent::from_terminal(&Event::Key(key)), None);
        assert_eq!(FormEvent::from_terminal(&Event::Resize(80, 24)), None);
    }
}
