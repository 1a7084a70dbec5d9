//! Widget ownership and traversal order.
//!
//! A tree level is two maps: a [`WidgetStore`] that owns widgets by unique
//! name, and a [`SlotOrder`] that lists names by dense, zero-based slot. The
//! slot order is a plain `Vec`, so it is contiguous by construction:
//! inserting at slot `k` shifts later names up by one and removing shifts
//! them down by one.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::{FormError, Result};
use crate::widgets::Widget;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotOrder {
    names: Vec<String>,
}

impl SlotOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Insert at `at`, appending when `at` is `None` or past the end.
    /// Returns the slot the name landed in.
    pub fn insert(&mut self, name: impl Into<String>, at: Option<usize>) -> usize {
        let slot = at.unwrap_or(self.names.len()).min(self.names.len());
        self.names.insert(slot, name.into());
        slot
    }

    /// Remove `name`, returning the slot it held.
    pub fn remove(&mut self, name: &str) -> Option<usize> {
        let slot = self.slot_of(name)?;
        self.names.remove(slot);
        Some(slot)
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn name_at(&self, slot: usize) -> Option<&str> {
        self.names.get(slot).map(String::as_str)
    }
}

/// Owns widgets by name. Lookups through [`find`](Self::find) also search
/// nested containers.
#[derive(Debug, Default)]
pub struct WidgetStore {
    widgets: HashMap<String, Widget>,
}

impl WidgetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn insert(&mut self, name: impl Into<String>, widget: Widget) -> Option<Widget> {
        self.widgets.insert(name.into(), widget)
    }

    pub fn remove(&mut self, name: &str) -> Option<Widget> {
        self.widgets.remove(name)
    }

    /// Direct child only.
    pub fn get(&self, name: &str) -> Option<&Widget> {
        self.widgets.get(name)
    }

    /// Direct child only.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(name)
    }

    pub fn find(&self, name: &str) -> Option<&Widget> {
        self.widgets.get(name).or_else(|| {
            self.widgets
                .values()
                .find_map(|widget| widget.as_container().and_then(|c| c.find(name)))
        })
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Widget> {
        if self.widgets.contains_key(name) {
            return self.widgets.get_mut(name);
        }
        self.widgets
            .values_mut()
            .find_map(|widget| widget.as_container_mut().and_then(|c| c.find_mut(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.widgets.iter().map(|(name, widget)| (name.as_str(), widget))
    }
}

/// Names `widget` would bring into a tree under `name`: itself, then its
/// descendants depth first. Fails on a collision with `store` or within
/// the list itself.
pub(crate) fn incoming_names(
    owner: &str,
    store: &WidgetStore,
    name: &str,
    widget: &Widget,
) -> Result<Vec<String>> {
    let mut names = vec![name.to_string()];
    names.extend(widget.descendant_names());
    let mut seen = HashSet::new();
    for candidate in &names {
        if !seen.insert(candidate.as_str()) || store.contains(candidate) {
            return Err(FormError::duplicate(owner, candidate));
        }
    }
    Ok(names)
}

/// One self-contained tree level, as kept by a container.
#[derive(Debug, Default)]
pub struct WidgetTree {
    owner: Option<String>,
    store: WidgetStore,
    order: SlotOrder,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used in diagnostics: the owning container once adopted.
    pub fn owner(&self) -> &str {
        self.owner.as_deref().unwrap_or("container")
    }

    pub(crate) fn set_owner(&mut self, owner: &str) {
        self.owner = Some(owner.to_string());
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn store(&self) -> &WidgetStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut WidgetStore {
        &mut self.store
    }

    pub fn order(&self) -> &SlotOrder {
        &self.order
    }

    pub fn add(&mut self, name: &str, mut widget: Widget, at: Option<usize>) -> Result<usize> {
        incoming_names(self.owner(), &self.store, name, &widget)?;
        if let Some(owner) = &self.owner {
            widget.state.owner = Some(owner.clone());
        }
        if let Some(container) = widget.as_container_mut() {
            container.adopt(name);
        }
        let slot = self.order.insert(name, at);
        self.store.insert(name, widget);
        tracing::debug!(owner = self.owner(), name, slot, "widget added");
        Ok(slot)
    }

    pub fn remove(&mut self, name: &str) -> Result<Widget> {
        let widget = self
            .store
            .remove(name)
            .ok_or_else(|| FormError::not_found(self.owner(), name))?;
        self.order.remove(name);
        tracing::debug!(owner = self.owner(), name, "widget removed");
        Ok(widget)
    }

    /// Direct children in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.order
            .names()
            .iter()
            .filter_map(|name| self.store.get(name).map(|widget| (name.as_str(), widget)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(names: &[&str]) -> SlotOrder {
        let mut order = SlotOrder::new();
        for name in names {
            order.insert(*name, None);
        }
        order
    }

    #[test]
    fn insert_shifts_later_slots() {
        let mut order = order_of(&["a", "b", "c"]);
        assert_eq!(order.insert("x", Some(1)), 1);
        assert_eq!(order.names(), ["a", "x", "b", "c"]);
        // slot 0 is a real position, not "append"
        assert_eq!(order.insert("y", Some(0)), 0);
        assert_eq!(order.name_at(0), Some("y"));
        assert_eq!(order.insert("z", Some(99)), 5);
    }

    #[test]
    fn remove_keeps_slots_contiguous() {
        let mut order = order_of(&["a", "b", "c"]);
        assert_eq!(order.remove("c"), Some(2));
        assert_eq!(order.remove("a"), Some(0));
        assert_eq!(order.names(), ["b"]);
        assert_eq!(order.slot_of("b"), Some(0));
        assert_eq!(order.remove("missing"), None);
    }

    #[test]
    fn tree_rejects_duplicates_and_unknown_names() {
        let mut tree = WidgetTree::new();
        tree.add("a", Widget::label("a"), None).unwrap();
        assert!(matches!(
            tree.add("a", Widget::label("again"), None),
            Err(FormError::DuplicateName { .. })
        ));
        assert!(matches!(
            tree.remove("b"),
            Err(FormError::NotFound { ref owner, .. }) if owner == "container"
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn find_reaches_into_nested_containers() {
        let mut inner = Widget::container(4, 4, 0, 0);
        inner
            .as_container_mut()
            .unwrap()
            .add("deep", Widget::text_input("d"), None)
            .unwrap();
        let mut store = WidgetStore::new();
        store.insert("inner", inner);

        assert!(store.get("deep").is_none());
        assert!(store.find("deep").is_some());
        store.find_mut("deep").unwrap().state.skip = true;
        assert!(store.find("deep").unwrap().state.skip);
    }
}
