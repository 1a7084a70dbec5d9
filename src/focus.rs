//! Keyboard focus over a flat traversal order.

use crate::widgets::Widget;

/// A slot-indexed sequence of widgets the controller can walk.
pub trait FocusTarget {
    fn slot_count(&self) -> usize;
    fn widget_at_mut(&mut self, slot: usize) -> Option<&mut Widget>;
}

/// Result of a focus step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Moved(usize),
    /// The focused widget is an open dropdown; its highlight moved instead.
    Forwarded,
    /// Nothing focusable, or focus was already there.
    Unchanged,
}

/// Tracks the focused slot.
///
/// Steps wrap around both ends and pass over skip-marked widgets. Every
/// widget passed over is focused and blurred on the way, so its hooks see
/// the traversal. A full lap without a focusable widget ends where it
/// started and reports [`FocusMove::Unchanged`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusController {
    selected: usize,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn advance<T: FocusTarget + ?Sized>(&mut self, target: &mut T) -> FocusMove {
        self.step(target, 1)
    }

    pub fn retreat<T: FocusTarget + ?Sized>(&mut self, target: &mut T) -> FocusMove {
        self.step(target, -1)
    }

    /// Focus slot 0, moving on when it is skip-marked.
    pub fn initial<T: FocusTarget + ?Sized>(&mut self, target: &mut T) -> FocusMove {
        self.selected = 0;
        self.refocus(target)
    }

    /// Focus the widget at the current slot again, moving on when it is
    /// skip-marked.
    pub fn refocus<T: FocusTarget + ?Sized>(&mut self, target: &mut T) -> FocusMove {
        let Some(widget) = target.widget_at_mut(self.selected) else {
            return FocusMove::Unchanged;
        };
        widget.focus();
        if widget.state.skip {
            return self.advance(target);
        }
        FocusMove::Moved(self.selected)
    }

    /// Move focus straight to `slot`, e.g. for a click.
    pub fn focus_slot<T: FocusTarget + ?Sized>(&mut self, target: &mut T, slot: usize) -> FocusMove {
        match target.widget_at_mut(slot) {
            Some(widget) if !widget.state.skip => {}
            _ => return FocusMove::Unchanged,
        }
        if slot == self.selected {
            return FocusMove::Unchanged;
        }
        if let Some(current) = target.widget_at_mut(self.selected) {
            current.blur();
        }
        if let Some(widget) = target.widget_at_mut(slot) {
            widget.focus();
        }
        self.selected = slot;
        tracing::debug!(slot, "focus set");
        FocusMove::Moved(slot)
    }

    /// Account for `inserted` slots spliced in at `slot`, keeping focus on
    /// the same widget.
    pub fn on_inserted(&mut self, slot: usize, inserted: usize, count_before: usize) {
        if count_before > 0 && slot <= self.selected {
            self.selected += inserted;
        }
    }

    /// Account for `removed` slots taken out starting at `slot`.
    ///
    /// Returns `true` when the focused widget was among them; focus then
    /// sits at `slot`, clamped to the new last slot, and the caller should
    /// [`refocus`](Self::refocus).
    pub fn on_removed(&mut self, slot: usize, removed: usize, count_after: usize) -> bool {
        if count_after == 0 {
            self.selected = 0;
            return false;
        }
        if self.selected >= slot + removed {
            self.selected -= removed;
            false
        } else if self.selected < slot {
            false
        } else {
            self.selected = slot.min(count_after - 1);
            true
        }
    }

    fn step<T: FocusTarget + ?Sized>(&mut self, target: &mut T, delta: isize) -> FocusMove {
        let count = target.slot_count();
        if count == 0 {
            return FocusMove::Unchanged;
        }
        if let Some(widget) = target.widget_at_mut(self.selected)
            && widget.is_expanded_overlay()
        {
            if let Some(dropdown) = widget.as_dropdown_mut() {
                dropdown.move_highlight(delta);
            }
            return FocusMove::Forwarded;
        }

        let start = self.selected;
        let mut slot = start;
        for _ in 0..count {
            if let Some(widget) = target.widget_at_mut(slot) {
                widget.blur();
            }
            slot = (slot as isize + delta).rem_euclid(count as isize) as usize;
            let Some(widget) = target.widget_at_mut(slot) else {
                continue;
            };
            widget.focus();
            if !widget.state.skip {
                self.selected = slot;
                tracing::debug!(from = start, to = slot, "focus moved");
                return FocusMove::Moved(slot);
            }
        }
        FocusMove::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Dropdown;

    struct Slots(Vec<Widget>);

    impl FocusTarget for Slots {
        fn slot_count(&self) -> usize {
            self.0.len()
        }

        fn widget_at_mut(&mut self, slot: usize) -> Option<&mut Widget> {
            self.0.get_mut(slot)
        }
    }

    fn focused(slots: &Slots) -> Vec<usize> {
        slots
            .0
            .iter()
            .enumerate()
            .filter(|(_, w)| w.state.focused)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn advancing_count_times_wraps_to_start() {
        let mut slots = Slots((0..4).map(|_| Widget::text_input("")).collect());
        let mut focus = FocusController::new();
        focus.initial(&mut slots);
        for _ in 0..4 {
            assert!(matches!(focus.advance(&mut slots), FocusMove::Moved(_)));
        }
        assert_eq!(focus.selected(), 0);
        assert_eq!(focused(&slots), vec![0]);
    }

    #[test]
    fn skip_marked_widgets_are_passed_over() {
        let mut slots = Slots(vec![
            Widget::text_input(""),
            Widget::label("static"),
            Widget::text_input(""),
        ]);
        let mut focus = FocusController::new();
        focus.initial(&mut slots);
        assert_eq!(focus.advance(&mut slots), FocusMove::Moved(2));
        assert_eq!(focus.advance(&mut slots), FocusMove::Moved(0));
        assert_eq!(focus.retreat(&mut slots), FocusMove::Moved(2));
        assert_eq!(focused(&slots), vec![2]);
    }

    #[test]
    fn initial_focus_moves_off_a_skip_marked_first_slot() {
        let mut slots = Slots(vec![Widget::label("title"), Widget::text_input("")]);
        let mut focus = FocusController::new();
        assert_eq!(focus.initial(&mut slots), FocusMove::Moved(1));
        assert_eq!(focused(&slots), vec![1]);
    }

    #[test]
    fn nothing_focusable_terminates_without_moving() {
        let mut slots = Slots(vec![Widget::label("a"), Widget::label("b")]);
        let mut focus = FocusController::new();
        assert_eq!(focus.initial(&mut slots), FocusMove::Unchanged);
        assert_eq!(focus.advance(&mut slots), FocusMove::Unchanged);
        assert_eq!(focus.retreat(&mut slots), FocusMove::Unchanged);
        assert_eq!(focus.selected(), 0);
    }

    #[test]
    fn open_dropdown_takes_the_step() {
        let mut dropdown = Dropdown::new();
        for name in ["a", "b", "c"] {
            dropdown.add_option(name, name, None).unwrap();
        }
        let mut slots = Slots(vec![
            Widget::dropdown(dropdown.with_selected(Some(0))),
            Widget::text_input(""),
        ]);
        let mut focus = FocusController::new();
        focus.initial(&mut slots);
        slots.0[0].toggle();

        assert_eq!(focus.advance(&mut slots), FocusMove::Forwarded);
        assert_eq!(focus.selected(), 0);
        assert_eq!(slots.0[0].as_dropdown().unwrap().highlighted(), Some(1));
        assert_eq!(focus.retreat(&mut slots), FocusMove::Forwarded);
        assert_eq!(slots.0[0].as_dropdown().unwrap().highlighted(), Some(0));
    }

    #[test]
    fn empty_target_is_a_no_op() {
        let mut slots = Slots(Vec::new());
        let mut focus = FocusController::new();
        assert_eq!(focus.initial(&mut slots), FocusMove::Unchanged);
        assert_eq!(focus.advance(&mut slots), FocusMove::Unchanged);
    }

    #[test]
    fn click_focus_skips_static_widgets() {
        let mut slots = Slots(vec![
            Widget::text_input(""),
            Widget::label("x"),
            Widget::text_input(""),
        ]);
        let mut focus = FocusController::new();
        focus.initial(&mut slots);
        assert_eq!(focus.focus_slot(&mut slots, 1), FocusMove::Unchanged);
        assert_eq!(focus.focus_slot(&mut slots, 2), FocusMove::Moved(2));
        assert_eq!(focused(&slots), vec![2]);
    }

    #[test]
    fn insertions_and_removals_keep_focus_on_its_widget() {
        let mut focus = FocusController::new();
        focus.selected = 2;
        focus.on_inserted(1, 3, 4);
        assert_eq!(focus.selected(), 5);
        focus.on_inserted(6, 1, 7);
        assert_eq!(focus.selected(), 5);

        assert!(!focus.on_removed(0, 2, 6));
        assert_eq!(focus.selected(), 3);
        assert!(!focus.on_removed(4, 1, 5));
        assert_eq!(focus.selected(), 3);
    }

    #[test]
    fn removing_the_focused_slot_clamps() {
        let mut focus = FocusController::new();
        focus.selected = 4;
        assert!(focus.on_removed(4, 1, 4));
        assert_eq!(focus.selected(), 3);

        focus.selected = 1;
        assert!(focus.on_removed(0, 3, 2));
        assert_eq!(focus.selected(), 0);

        assert!(!focus.on_removed(0, 2, 0));
        assert_eq!(focus.selected(), 0);
    }
}
