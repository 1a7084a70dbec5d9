//! Form widgets.
//!
//! A [`Widget`] is the named, stateful unit a form is built from. Shared
//! state (focus, skip flag, owner back-reference, style, hooks) lives on
//! `Widget`; per-kind state lives in the [`WidgetKind`] variant, and every
//! variant implements [`WidgetBehavior`]. `Widget::behavior` /
//! `Widget::behavior_mut` are the only places that match on the kind to
//! reach that capability.

pub mod button;
pub mod container;
pub mod dropdown;
pub mod image;
pub mod label;
pub mod labeled_input;
pub mod separator;
pub mod text_input;

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::layout::Size;

pub use button::{Button, ButtonAction};
pub use container::Container;
pub use dropdown::{Dropdown, DropdownOption};
pub use image::{Image, ImageFrame};
pub use label::Label;
pub use labeled_input::LabeledInput;
pub use separator::Separator;
pub use text_input::TextInput;

use crate::error::{FormError, Result};
use crate::hooks::{self, HookOwner, HookRegistry};
use crate::keybindings::KeyBindings;
use crate::style::BoxStyle;

/// Hotspot action name fired by a pointer click.
pub const CLICK: &str = "click";

/// A resolved widget value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

/// What a widget did with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; the form may act on it (e.g. auto-submit on Enter).
    Ignored,
    Consumed,
    /// Handled and the value changed.
    Changed,
    /// The widget asks the form to run its action.
    Activate,
}

/// What a clicked hotspot asks the form to do, keyed by widget name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Activate(String),
    Toggle(String),
    Focus(String),
}

pub type Hotspots = BTreeMap<&'static str, Action>;

/// Structural command raised by a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    Submit,
    Clear,
}

/// Per-kind capability set.
pub trait WidgetBehavior {
    /// Size of the surface this widget renders to.
    fn measure(&self, style: &BoxStyle) -> Size;

    fn value(&self) -> Option<Value> {
        None
    }

    fn handle_key(&mut self, _key: &KeyEvent, _keys: &KeyBindings) -> KeyOutcome {
        KeyOutcome::Ignored
    }

    fn focus(&mut self) {}

    fn blur(&mut self) {}

    /// Restore the default value.
    fn reset(&mut self) {}

    fn hotspots(&self, _name: &str) -> Option<Hotspots> {
        None
    }
}

#[derive(Debug)]
pub enum WidgetKind {
    Label(Label),
    TextInput(TextInput),
    LabeledInput(LabeledInput),
    Button(Button),
    Dropdown(Dropdown),
    Image(Image),
    Separator(Separator),
    Container(Container),
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Label(_) => "label",
            WidgetKind::TextInput(_) => "text input",
            WidgetKind::LabeledInput(_) => "labeled input",
            WidgetKind::Button(_) => "button",
            WidgetKind::Dropdown(_) => "dropdown",
            WidgetKind::Image(_) => "image",
            WidgetKind::Separator(_) => "separator",
            WidgetKind::Container(_) => "container",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetState {
    pub focused: bool,
    /// Excluded from Tab traversal.
    pub skip: bool,
    /// Name of the container that owns this widget, if nested.
    pub owner: Option<String>,
}

#[derive(Debug)]
pub struct Widget {
    pub state: WidgetState,
    pub style: BoxStyle,
    kind: WidgetKind,
    hooks: HookRegistry<Widget>,
}

impl HookOwner for Widget {
    fn hooks_mut(&mut self) -> &mut HookRegistry<Self> {
        &mut self.hooks
    }
}

impl Widget {
    pub fn new(kind: WidgetKind, style: BoxStyle, skip: bool) -> Self {
        Self {
            state: WidgetState {
                skip,
                ..WidgetState::default()
            },
            style,
            kind,
            hooks: HookRegistry::new(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(
            WidgetKind::Label(Label::new(text)),
            BoxStyle::default(),
            true,
        )
    }

    pub fn text_input(default: impl Into<String>) -> Self {
        Self::new(
            WidgetKind::TextInput(TextInput::new(default)),
            TextInput::default_style(),
            false,
        )
    }

    pub fn labeled_input(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(
            WidgetKind::LabeledInput(LabeledInput::new(label, default)),
            TextInput::default_style(),
            false,
        )
    }

    pub fn button(text: impl Into<String>, action: ButtonAction) -> Self {
        Self::new(
            WidgetKind::Button(Button::new(text, action)),
            Button::default_style(),
            false,
        )
    }

    pub fn dropdown(dropdown: Dropdown) -> Self {
        Self::new(
            WidgetKind::Dropdown(dropdown),
            Dropdown::default_style(),
            false,
        )
    }

    pub fn image(image: Image) -> Self {
        Self::new(WidgetKind::Image(image), BoxStyle::default(), true)
    }

    pub fn separator(separator: Separator) -> Self {
        Self::new(
            WidgetKind::Separator(separator),
            Separator::default_style(),
            true,
        )
    }

    /// A fixed-size container placed at column `x`, row `y`.
    pub fn container(width: u16, height: u16, x: u16, y: u16) -> Self {
        Self::new(
            WidgetKind::Container(Container::new()),
            Container::default_style(width, height, x, y),
            true,
        )
    }

    /// Apply `key=value` style overrides, see [`BoxStyle::with_overrides`].
    pub fn with_style<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.style = self.style.with_overrides(overrides)?;
        Ok(self)
    }

    /// Append `child` to a container that is not yet part of a form.
    pub fn with_child(mut self, name: &str, child: Widget) -> Result<Self> {
        let kind = self.kind.name();
        self.as_container_mut()
            .ok_or_else(|| FormError::NotAContainer {
                name: kind.to_string(),
            })?
            .add(name, child, None)?;
        Ok(self)
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.state.skip = skip;
        self
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut WidgetKind {
        &mut self.kind
    }

    pub fn hooks(&mut self) -> &mut HookRegistry<Widget> {
        &mut self.hooks
    }

    fn behavior(&self) -> &dyn WidgetBehavior {
        match &self.kind {
            WidgetKind::Label(w) => w,
            WidgetKind::TextInput(w) => w,
            WidgetKind::LabeledInput(w) => w,
            WidgetKind::Button(w) => w,
            WidgetKind::Dropdown(w) => w,
            WidgetKind::Image(w) => w,
            WidgetKind::Separator(w) => w,
            WidgetKind::Container(w) => w,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn WidgetBehavior {
        match &mut self.kind {
            WidgetKind::Label(w) => w,
            WidgetKind::TextInput(w) => w,
            WidgetKind::LabeledInput(w) => w,
            WidgetKind::Button(w) => w,
            WidgetKind::Dropdown(w) => w,
            WidgetKind::Image(w) => w,
            WidgetKind::Separator(w) => w,
            WidgetKind::Container(w) => w,
        }
    }

    pub fn measure(&self) -> Size {
        self.behavior().measure(&self.style)
    }

    /// Current value; `None` means the field is absent from form results.
    pub fn value(&self) -> Option<Value> {
        self.behavior().value()
    }

    pub fn hotspots(&self, name: &str) -> Option<Hotspots> {
        self.behavior().hotspots(name)
    }

    pub fn focus(&mut self) {
        self.run_hooks(&[hooks::FOCUS, hooks::FOCUS_SWITCH]);
        self.state.focused = true;
        self.behavior_mut().focus();
    }

    /// Drop focus. An expanded dropdown collapses, committing its value.
    pub fn blur(&mut self) {
        self.run_hooks(&[hooks::BLUR, hooks::FOCUS_SWITCH]);
        self.state.focused = false;
        let collapsed = match &mut self.kind {
            WidgetKind::Dropdown(dropdown) if dropdown.is_expanded() => dropdown.toggle(),
            _ => false,
        };
        self.behavior_mut().blur();
        if collapsed {
            self.run_hooks(&[hooks::CHANGE_VALUE]);
        }
    }

    /// Offer `key` to the widget, matched against `keys`.
    pub fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> KeyOutcome {
        self.run_hooks(&[hooks::UPDATE]);
        let outcome = self.behavior_mut().handle_key(key, keys);
        if outcome == KeyOutcome::Changed {
            self.run_hooks(&[hooks::CHANGE_VALUE]);
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.behavior_mut().reset();
        self.run_hooks(&[hooks::CHANGE_VALUE]);
    }

    /// Expand or collapse a dropdown. Collapsing fires `__change_value__`.
    pub fn toggle(&mut self) {
        if let WidgetKind::Dropdown(dropdown) = &mut self.kind
            && dropdown.toggle()
        {
            self.run_hooks(&[hooks::CHANGE_VALUE]);
        }
    }

    /// Show the next frame of an image.
    pub fn advance_frame(&mut self) {
        if let WidgetKind::Image(image) = &mut self.kind {
            image.advance();
            self.run_hooks(&[hooks::CHANGE_VALUE]);
        }
    }

    pub fn tick_cursor(&mut self, now: Instant, interval: Duration) {
        match &mut self.kind {
            WidgetKind::TextInput(input) => input.tick(now, interval),
            WidgetKind::LabeledInput(input) => input.input_mut().tick(now, interval),
            _ => {}
        }
    }

    /// Run a button's action. Structural actions are handed back to the form.
    pub fn trigger(&mut self) -> Option<FormCommand> {
        match &mut self.kind {
            WidgetKind::Button(button) => button.trigger(),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.kind {
            WidgetKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.kind {
            WidgetKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn as_dropdown(&self) -> Option<&Dropdown> {
        match &self.kind {
            WidgetKind::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        }
    }

    pub fn as_dropdown_mut(&mut self) -> Option<&mut Dropdown> {
        match &mut self.kind {
            WidgetKind::Dropdown(dropdown) => Some(dropdown),
            _ => None,
        }
    }

    /// An open dropdown, drawn after its siblings.
    pub fn is_expanded_overlay(&self) -> bool {
        self.as_dropdown().is_some_and(Dropdown::is_expanded)
    }

    /// Height the widget takes in the layout flow while collapsed.
    pub fn collapsed_height(&self) -> u16 {
        match &self.kind {
            WidgetKind::Dropdown(dropdown) => dropdown.collapsed_height(&self.style),
            _ => self.measure().height,
        }
    }

    /// Fail when a composite has nothing to draw.
    pub fn check_renderable(&self, name: &str) -> Result<()> {
        let empty = match &self.kind {
            WidgetKind::Dropdown(dropdown) => dropdown.is_empty(),
            WidgetKind::Container(container) => container.is_empty(),
            WidgetKind::Image(image) => image.is_empty(),
            _ => false,
        };
        if empty {
            return Err(FormError::EmptyWidget {
                kind: self.kind.name(),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Names of every nested widget, depth first in local slot order.
    pub fn descendant_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(container) = self.as_container() {
            container.collect_names(&mut names);
        }
        names
    }

    /// Visit this widget and every nested widget, depth first.
    pub fn walk<F>(&self, name: &str, f: &mut F)
    where
        F: FnMut(&str, &Widget),
    {
        f(name, self);
        if let Some(container) = self.as_container() {
            for (child_name, child) in container.iter() {
                child.walk(child_name, f);
            }
        }
    }
}
