//! Named lifecycle hooks.
//!
//! Every widget and the form own a [`HookRegistry`]. A registry holds at most
//! one callback per name, and running a list of candidate names fires only
//! the first candidate that is registered. Hooks are never broadcast.
//!
//! Names encode the callback shape: `__name__` hooks are *bound* and receive
//! the owner, `_name` hooks are *unbound* and receive nothing. Any arguments
//! a callback needs are captured by the closure itself.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{FormError, Result};

pub const FOCUS: &str = "__focus__";
pub const BLUR: &str = "__blur__";
pub const FOCUS_SWITCH: &str = "__focus_switch__";
pub const UPDATE: &str = "__update__";
pub const CHANGE_VALUE: &str = "__change_value__";
pub const NEXT: &str = "__next__";
pub const PREVIOUS: &str = "__previous__";
pub const DRAW: &str = "__draw__";
pub const CLEAR: &str = "__clear__";
pub const CLICK: &str = "__click__";

pub enum Hook<T> {
    Bound(Box<dyn FnMut(&mut T)>),
    Unbound(Box<dyn FnMut()>),
}

impl<T> fmt::Debug for Hook<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hook::Bound(_) => f.write_str("Hook::Bound"),
            Hook::Unbound(_) => f.write_str("Hook::Unbound"),
        }
    }
}

pub struct HookRegistry<T> {
    hooks: HashMap<String, Hook<T>>,
    /// Names detached by a run in progress.
    running: HashSet<String>,
    /// Running names removed before they could be put back.
    dropped: HashSet<String>,
}

impl<T> Default for HookRegistry<T> {
    fn default() -> Self {
        Self {
            hooks: HashMap::new(),
            running: HashSet::new(),
            dropped: HashSet::new(),
        }
    }
}

impl<T> fmt::Debug for HookRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.hooks.keys().collect();
        names.sort();
        f.debug_struct("HookRegistry").field("hooks", &names).finish()
    }
}

impl<T> HookRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook that receives its owner. Replaces any earlier hook of
    /// the same name.
    pub fn add_bound<F>(&mut self, name: &str, hook: F) -> Result<()>
    where
        F: FnMut(&mut T) + 'static,
    {
        if !name.starts_with("__") {
            return Err(FormError::InvalidHookName {
                name: name.to_string(),
                expected: "`__`",
            });
        }
        self.dropped.remove(name);
        self.hooks.insert(name.to_string(), Hook::Bound(Box::new(hook)));
        Ok(())
    }

    /// Register a hook that takes no arguments. Replaces any earlier hook of
    /// the same name.
    pub fn add_unbound<F>(&mut self, name: &str, hook: F) -> Result<()>
    where
        F: FnMut() + 'static,
    {
        if !name.starts_with('_') || name.starts_with("__") {
            return Err(FormError::InvalidHookName {
                name: name.to_string(),
                expected: "a single `_`",
            });
        }
        self.dropped.remove(name);
        self.hooks
            .insert(name.to_string(), Hook::Unbound(Box::new(hook)));
        Ok(())
    }

    /// Unregister `name`. A hook removing itself while it runs is gone once
    /// it returns, and `None` is returned since it is still executing.
    pub fn remove(&mut self, name: &str) -> Option<Hook<T>> {
        if self.running.contains(name) {
            self.dropped.insert(name.to_string());
        }
        self.hooks.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Detach the first registered hook among `candidates`, in order.
    pub(crate) fn take_first(&mut self, candidates: &[&str]) -> Option<(String, Hook<T>)> {
        let (name, hook) = candidates
            .iter()
            .find_map(|name| self.hooks.remove_entry(*name))?;
        self.running.insert(name.clone());
        Some((name, hook))
    }

    /// Put back a hook detached by [`take_first`](Self::take_first). A hook
    /// registered under the same name while it was detached wins, and one
    /// removed meanwhile stays removed.
    pub(crate) fn restore(&mut self, name: String, hook: Hook<T>) {
        self.running.remove(&name);
        if self.dropped.remove(&name) {
            return;
        }
        self.hooks.entry(name).or_insert(hook);
    }
}

/// Something that owns a [`HookRegistry`] over itself.
pub trait HookOwner: Sized {
    fn hooks_mut(&mut self) -> &mut HookRegistry<Self>;

    /// Fire the first registered hook among `candidates`. Returns the name of
    /// the hook that ran, if any.
    fn run_hooks(&mut self, candidates: &[&str]) -> Option<String> {
        let (name, mut hook) = self.hooks_mut().take_first(candidates)?;
        match &mut hook {
            Hook::Bound(callback) => callback(self),
            Hook::Unbound(callback) => callback(),
        }
        self.hooks_mut().restore(name.clone(), hook);
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counter {
        hits: Vec<&'static str>,
        hooks: HookRegistry<Counter>,
    }

    impl HookOwner for Counter {
        fn hooks_mut(&mut self) -> &mut HookRegistry<Self> {
            &mut self.hooks
        }
    }

    #[test]
    fn only_first_candidate_fires() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(FOCUS, |c: &mut Counter| c.hits.push("focus"))
            .unwrap();
        owner
            .hooks
            .add_bound(FOCUS_SWITCH, |c: &mut Counter| c.hits.push("switch"))
            .unwrap();

        let fired = owner.run_hooks(&[FOCUS, FOCUS_SWITCH]);
        assert_eq!(fired.as_deref(), Some(FOCUS));
        assert_eq!(owner.hits, vec!["focus"]);
        // still registered for the next run
        assert!(owner.hooks.contains(FOCUS));
    }

    #[test]
    fn falls_through_to_later_candidates() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(FOCUS_SWITCH, |c: &mut Counter| c.hits.push("switch"))
            .unwrap();
        owner.run_hooks(&[BLUR, FOCUS_SWITCH]);
        assert_eq!(owner.hits, vec!["switch"]);
        assert_eq!(owner.run_hooks(&[BLUR]), None);
    }

    #[test]
    fn last_registration_wins() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(UPDATE, |c: &mut Counter| c.hits.push("first"))
            .unwrap();
        owner
            .hooks
            .add_bound(UPDATE, |c: &mut Counter| c.hits.push("second"))
            .unwrap();
        owner.run_hooks(&[UPDATE]);
        assert_eq!(owner.hits, vec!["second"]);
    }

    #[test]
    fn unbound_hooks_capture_their_arguments() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut owner = Counter::default();
        owner
            .hooks
            .add_unbound("_log", move || sink.borrow_mut().push(42))
            .unwrap();
        owner.run_hooks(&["_log"]);
        assert_eq!(*seen.borrow(), vec![42]);
    }

    #[test]
    fn names_must_match_shape() {
        let mut registry: HookRegistry<Counter> = HookRegistry::new();
        assert!(matches!(
            registry.add_bound("focus", |_| {}),
            Err(FormError::InvalidHookName { .. })
        ));
        assert!(matches!(
            registry.add_unbound("__focus__", || {}),
            Err(FormError::InvalidHookName { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn hook_can_replace_itself_while_running() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(DRAW, |c: &mut Counter| {
                c.hits.push("old");
                c.hooks
                    .add_bound(DRAW, |c: &mut Counter| c.hits.push("new"))
                    .unwrap();
            })
            .unwrap();
        owner.run_hooks(&[DRAW]);
        owner.run_hooks(&[DRAW]);
        assert_eq!(owner.hits, vec!["old", "new"]);
    }

    #[test]
    fn hook_can_remove_itself_while_running() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(CLEAR, |c: &mut Counter| {
                c.hits.push("once");
                c.hooks.remove(CLEAR);
            })
            .unwrap();
        assert_eq!(owner.run_hooks(&[CLEAR]).as_deref(), Some(CLEAR));
        assert!(!owner.hooks.contains(CLEAR));
        assert_eq!(owner.run_hooks(&[CLEAR]), None);
        assert_eq!(owner.hits, vec!["once"]);
    }

    #[test]
    fn removed_then_replaced_while_running_keeps_the_replacement() {
        let mut owner = Counter::default();
        owner
            .hooks
            .add_bound(UPDATE, |c: &mut Counter| {
                c.hits.push("old");
                c.hooks.remove(UPDATE);
                c.hooks
                    .add_bound(UPDATE, |c: &mut Counter| c.hits.push("new"))
                    .unwrap();
            })
            .unwrap();
        owner.run_hooks(&[UPDATE]);
        owner.run_hooks(&[UPDATE]);
        assert_eq!(owner.hits, vec!["old", "new"]);
    }
}
