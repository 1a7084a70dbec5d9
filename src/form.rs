//! The form: top-level widget tree, focus, hit-testing and frame hooks.
//!
//! A `Form` owns its top-level widgets; containers own their children. The
//! form additionally keeps one flat [`SlotOrder`] over *every* widget,
//! nested ones included: adding a container splices its descendants in
//! right after it, depth first. Focus traversal walks that flat order while
//! layout walks each level on its own.

use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::layout::Size;
use ratatui::style::Color;

use crate::animation::AnimationRegistry;
use crate::constants::{CURSOR_BLINK_INTERVAL, FORM_TOP_MARGIN, FPS};
use crate::error::{FormError, Result};
use crate::event::FormEvent;
use crate::focus::{FocusController, FocusMove, FocusTarget};
use crate::hooks::{self, HookOwner, HookRegistry};
use crate::keybindings::{Action as KeyAction, KeyBindings};
use crate::layout::{HitTable, LayoutPass, Level, compose};
use crate::render::Renderer;
use crate::style::BoxStyle;
use crate::theme;
use crate::tree::{SlotOrder, WidgetStore, incoming_names};
use crate::widgets::{Action, FormCommand, KeyOutcome, Value, Widget, WidgetKind};

const FORM: &str = "form";

#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    /// Enter submits when the focused widget does not use it.
    pub auto_submit: bool,
    pub fps: u32,
    /// Row the layout cursor starts at.
    pub top_margin: u16,
    pub background: Color,
    pub cursor_blink: Duration,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            auto_submit: true,
            fps: FPS,
            top_margin: FORM_TOP_MARGIN,
            background: theme::form_bg(),
            cursor_blink: CURSOR_BLINK_INTERVAL,
        }
    }
}

impl FormConfig {
    /// Time allotted to one frame.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

/// Submitted values in traversal order. Widgets without a value are left
/// out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormResult {
    entries: Vec<(String, Value)>,
}

impl FormResult {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for FormResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{name}:\t{value}")?;
        }
        Ok(())
    }
}

/// Flat slot view over the form's widgets, nested ones included.
struct FlatView<'a> {
    store: &'a mut WidgetStore,
    order: &'a SlotOrder,
}

impl FocusTarget for FlatView<'_> {
    fn slot_count(&self) -> usize {
        self.order.len()
    }

    fn widget_at_mut(&mut self, slot: usize) -> Option<&mut Widget> {
        let name = self.order.name_at(slot)?;
        self.store.find_mut(name)
    }
}

#[derive(Debug)]
pub struct Form {
    store: WidgetStore,
    order: SlotOrder,
    focus: FocusController,
    hooks: HookRegistry<Form>,
    layout: LayoutPass,
    animations: AnimationRegistry,
    keys: KeyBindings,
    config: FormConfig,
    presented: bool,
    running: bool,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl HookOwner for Form {
    fn hooks_mut(&mut self) -> &mut HookRegistry<Self> {
        &mut self.hooks
    }
}

impl Form {
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    pub fn with_config(config: FormConfig) -> Self {
        Self {
            store: WidgetStore::new(),
            order: SlotOrder::new(),
            focus: FocusController::new(),
            hooks: HookRegistry::new(),
            layout: LayoutPass::default(),
            animations: AnimationRegistry::new(),
            keys: KeyBindings::default(),
            config,
            presented: false,
            running: true,
        }
    }

    pub fn with_keybindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn hooks(&mut self) -> &mut HookRegistry<Form> {
        &mut self.hooks
    }

    /// Number of slots, nested widgets included.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &SlotOrder {
        &self.order
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    /// Add `widget` at slot `at` (appending when `None` or past the end).
    ///
    /// A container's descendants take the slots right after it. Names must
    /// be unique across the whole form.
    pub fn add(&mut self, name: &str, mut widget: Widget, at: Option<usize>) -> Result<usize> {
        let names = incoming_names(FORM, &self.store, name, &widget)?;
        widget.state.owner = None;
        if let Some(container) = widget.as_container_mut() {
            container.adopt(name);
        }

        let count_before = self.order.len();
        let slot = at.unwrap_or(count_before).min(count_before);
        self.store.insert(name, widget);
        self.splice(name, &names, slot, count_before);
        tracing::debug!(name, slot, slots = names.len(), "widget added to form");
        Ok(slot)
    }

    /// Add `widget` to the container `container` at local slot `at`.
    ///
    /// The new widget joins the flat order right after whatever precedes it
    /// inside the container. Returns its flat slot.
    pub fn add_into(
        &mut self,
        container: &str,
        name: &str,
        widget: Widget,
        at: Option<usize>,
    ) -> Result<usize> {
        let names = incoming_names(FORM, &self.store, name, &widget)?;
        let container_slot = self
            .order
            .slot_of(container)
            .ok_or_else(|| FormError::not_found(FORM, container))?;
        let target = self
            .store
            .find_mut(container)
            .ok_or_else(|| FormError::not_found(FORM, container))?;
        target
            .as_container_mut()
            .ok_or_else(|| FormError::NotAContainer {
                name: container.to_string(),
            })?
            .add(name, widget, at)?;

        let preceding = target
            .descendant_names()
            .iter()
            .position(|entry| entry == name)
            .unwrap_or_default();
        let slot = container_slot + 1 + preceding;
        let count_before = self.order.len();
        self.splice(name, &names, slot, count_before);
        tracing::debug!(container, name, slot, slots = names.len(), "widget added to container");
        Ok(slot)
    }

    /// Enter `names` into the flat order from `slot` on, once the widget
    /// `name` is already stored.
    fn splice(&mut self, name: &str, names: &[String], slot: usize, count_before: usize) {
        for (offset, entry) in names.iter().enumerate() {
            self.order.insert(entry.as_str(), Some(slot + offset));
        }
        if let Some(widget) = self.store.find(name) {
            let animations = &mut self.animations;
            widget.walk(name, &mut |entry: &str, w: &Widget| {
                if matches!(w.kind(), WidgetKind::Image(image) if image.auto_scroll()) {
                    animations.register(entry);
                }
            });
        }
        self.focus.on_inserted(slot, names.len(), count_before);
        if count_before == 0 && self.presented {
            let mut view = FlatView {
                store: &mut self.store,
                order: &self.order,
            };
            self.focus.refocus(&mut view);
        }
    }

    /// Detach `name` and everything nested in it.
    ///
    /// A nested widget is also removed from the container that owns it. When
    /// the focused widget goes away, focus lands on the slot it left,
    /// clamped to the last slot.
    pub fn remove(&mut self, name: &str) -> Result<Widget> {
        let owner = self
            .store
            .find(name)
            .ok_or_else(|| FormError::not_found(FORM, name))?
            .state
            .owner
            .clone();
        let mut removed = match owner {
            Some(owner) => self
                .store
                .find_mut(&owner)
                .and_then(Widget::as_container_mut)
                .ok_or_else(|| FormError::not_found(FORM, &owner))?
                .remove(name)?,
            None => self
                .store
                .remove(name)
                .ok_or_else(|| FormError::not_found(FORM, name))?,
        };
        removed.state.owner = None;

        let mut names = vec![name.to_string()];
        names.extend(removed.descendant_names());
        let mut refocus = false;
        for entry in &names {
            if let Some(slot) = self.order.remove(entry) {
                refocus |= self.focus.on_removed(slot, 1, self.order.len());
            }
            self.animations.unregister(entry);
        }
        tracing::debug!(name, slots = names.len(), "widget removed from form");

        if refocus && self.presented {
            let mut view = FlatView {
                store: &mut self.store,
                order: &self.order,
            };
            self.focus.refocus(&mut view);
        }
        Ok(removed)
    }

    pub fn widget(&self, name: &str) -> Option<&Widget> {
        self.store.find(name)
    }

    pub fn widget_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.store.find_mut(name)
    }

    /// The current value of `name`; `Ok(None)` means the field is not
    /// present in results.
    pub fn value(&self, name: &str) -> Result<Option<Value>> {
        self.store
            .find(name)
            .map(Widget::value)
            .ok_or_else(|| FormError::not_found(FORM, name))
    }

    pub fn result(&self) -> FormResult {
        let entries = self
            .order
            .names()
            .iter()
            .filter_map(|name| {
                let value = self.store.find(name)?.value()?;
                Some((name.clone(), value))
            })
            .collect();
        FormResult { entries }
    }

    pub fn focused_slot(&self) -> Option<usize> {
        (self.presented && !self.order.is_empty()).then(|| self.focus.selected())
    }

    pub fn focused_name(&self) -> Option<&str> {
        self.order.name_at(self.focused_slot()?)
    }

    /// Show the form: focus the first focusable widget.
    pub fn present(&mut self) -> Result<()> {
        if self.order.is_empty() {
            return Err(FormError::empty_tree(FORM));
        }
        self.presented = true;
        self.running = true;
        let mut view = FlatView {
            store: &mut self.store,
            order: &self.order,
        };
        self.focus.initial(&mut view);
        Ok(())
    }

    pub fn focus_next(&mut self) -> FocusMove {
        let mut view = FlatView {
            store: &mut self.store,
            order: &self.order,
        };
        let moved = self.focus.advance(&mut view);
        self.run_hooks(&[hooks::NEXT, hooks::FOCUS_SWITCH]);
        moved
    }

    pub fn focus_prev(&mut self) -> FocusMove {
        let mut view = FlatView {
            store: &mut self.store,
            order: &self.order,
        };
        let moved = self.focus.retreat(&mut view);
        self.run_hooks(&[hooks::PREVIOUS, hooks::FOCUS_SWITCH]);
        moved
    }

    /// Move focus to `name`. Skip-marked widgets cannot be focused.
    pub fn focus_widget(&mut self, name: &str) -> Result<FocusMove> {
        let slot = self
            .order
            .slot_of(name)
            .ok_or_else(|| FormError::not_found(FORM, name))?;
        let mut view = FlatView {
            store: &mut self.store,
            order: &self.order,
        };
        Ok(self.focus.focus_slot(&mut view, slot))
    }

    /// Apply one input event.
    pub fn update(&mut self, event: FormEvent) -> Result<()> {
        match event {
            FormEvent::Quit => {
                tracing::debug!("quit requested");
                self.running = false;
            }
            FormEvent::Key(key) => self.handle_key(&key)?,
            FormEvent::Click { column, row } => self.dispatch_click(column, row)?,
        }
        self.run_hooks(&[hooks::UPDATE]);
        Ok(())
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Result<()> {
        if self.keys.matches(KeyAction::Quit, key) {
            tracing::debug!("quit key pressed");
            self.running = false;
            return Ok(());
        }
        if self.keys.matches(KeyAction::FocusNext, key) {
            self.focus_next();
            return Ok(());
        }
        if self.keys.matches(KeyAction::FocusPrev, key) {
            self.focus_prev();
            return Ok(());
        }
        let Some(name) = self.focused_name().map(str::to_string) else {
            return Ok(());
        };
        let outcome = self
            .store
            .find_mut(&name)
            .map_or(KeyOutcome::Ignored, |widget| widget.handle_key(key, &self.keys));
        match outcome {
            KeyOutcome::Activate => self.activate(&name)?,
            KeyOutcome::Ignored
                if self.config.auto_submit && self.keys.matches(KeyAction::Confirm, key) =>
            {
                self.submit();
            }
            _ => {}
        }
        Ok(())
    }

    /// Run the click action of every hotspot under the point, in draw order,
    /// using the table built by the last [`draw`](Self::draw).
    pub fn dispatch_click(&mut self, column: u16, row: u16) -> Result<()> {
        let actions = self.layout.hits.click_actions(column, row);
        if actions.is_empty() {
            return Ok(());
        }
        self.run_hooks(&[hooks::CLICK]);
        for action in actions {
            match action {
                Action::Activate(name) => {
                    self.focus_widget(&name)?;
                    self.activate(&name)?;
                }
                Action::Toggle(name) => self.toggle(&name)?,
                Action::Focus(name) => {
                    self.focus_widget(&name)?;
                }
            }
        }
        Ok(())
    }

    /// Run a button's action.
    pub fn activate(&mut self, name: &str) -> Result<()> {
        let command = self
            .store
            .find_mut(name)
            .ok_or_else(|| FormError::not_found(FORM, name))?
            .trigger();
        match command {
            Some(FormCommand::Submit) => self.submit(),
            Some(FormCommand::Clear) => self.clear(),
            None => {}
        }
        Ok(())
    }

    /// Focus a dropdown and open or close it.
    pub fn toggle(&mut self, name: &str) -> Result<()> {
        self.focus_widget(name)?;
        if let Some(widget) = self.store.find_mut(name) {
            widget.toggle();
        }
        Ok(())
    }

    /// Reset every widget to its default value.
    pub fn clear(&mut self) {
        for name in self.order.names() {
            if let Some(widget) = self.store.find_mut(name) {
                widget.reset();
            }
        }
        tracing::debug!("form cleared");
        self.run_hooks(&[hooks::CLEAR]);
    }

    /// Stop the run loop; values stay as they are.
    pub fn submit(&mut self) {
        tracing::debug!("form submitted");
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Per-frame timers: advance animated images and cursor blink.
    pub fn tick(&mut self, now: Instant) {
        for name in self.animations.iter() {
            if let Some(widget) = self.store.find_mut(name) {
                widget.advance_frame();
            }
        }
        if let Some(name) = self.focused_name().map(str::to_string)
            && let Some(widget) = self.store.find_mut(&name)
        {
            widget.tick_cursor(now, self.config.cursor_blink);
        }
    }

    /// Lay out and draw every widget onto a fresh canvas of `size`.
    ///
    /// The hit table is replaced by the one this pass builds. On failure it
    /// is left empty and nothing should be presented.
    pub fn draw<R: Renderer>(&mut self, renderer: &mut R, size: Size) -> Result<R::Surface> {
        self.layout = LayoutPass::default();
        let background = BoxStyle {
            bg_color: self.config.background,
            ..BoxStyle::default()
        };
        let mut canvas = renderer.canvas(size, &background);
        self.layout = compose(
            renderer,
            &mut canvas,
            Level {
                owner: None,
                store: &self.store,
                order: &self.order,
                cursor_start: self.config.top_margin,
            },
        )?;
        self.run_hooks(&[hooks::DRAW]);
        Ok(canvas)
    }

    /// Placements and hotspots of the last draw.
    pub fn layout(&self) -> &LayoutPass {
        &self.layout
    }

    pub fn hit_table(&self) -> &HitTable {
        &self.layout.hits
    }
}
