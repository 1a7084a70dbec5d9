//! Keyboard and mouse driven forms for terminal applications.
//!
//! A [`Form`] owns a tree of named [`Widget`]s, lays them out with a flat
//! box model, tracks keyboard focus over one flattened traversal order and
//! hit-tests clicks against the rectangles of the last frame. Drawing goes
//! through the [`Renderer`] trait; [`BufferRenderer`] draws into ratatui
//! buffers and [`run_form`] drives a form on a terminal.

pub mod animation;
pub mod clock;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event;
pub mod event_loop;
pub mod focus;
pub mod form;
pub mod hooks;
pub mod keybindings;
pub mod layout;
pub mod render;
pub mod runner;
pub mod style;
pub mod theme;
pub mod tracing_sub;
pub mod tree;
pub mod ui;
pub mod widgets;

pub use error::{FormError, Result};
pub use event::FormEvent;
pub use form::{Form, FormConfig, FormResult};
pub use hooks::{HookOwner, HookRegistry};
pub use render::{BufferRenderer, RenderContext, Renderer};
pub use runner::run_form;
pub use style::BoxStyle;
pub use widgets::{Value, Widget};
