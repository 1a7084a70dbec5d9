//! Shared crate-wide constants.

use std::time::Duration;

/// Target frame rate of the form run loop.
///
/// The run loop polls for input at most once per frame budget, then ticks
/// animations and redraws when nothing arrived in time.
pub const FPS: u32 = 25;

/// How long the text cursor stays in one blink phase.
///
/// The cursor toggles once per elapsed interval, independent of how many
/// frames were drawn in between.
pub const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(700);

/// Width (in terminal columns) of the scrollbar drawn inside an expanded
/// dropdown.
pub const SCROLL_BAR_WIDTH: u16 = 1;

/// Maximum number of option rows an expanded dropdown shows at once.
pub const DROPDOWN_VISIBLE_OPTIONS: usize = 5;

/// Columns reserved to the right of a dropdown for its arrow marker.
pub const DROPDOWN_ARROW_WIDTH: u16 = 2;

/// Rows left blank above the first relatively positioned widget of a form.
pub const FORM_TOP_MARGIN: u16 = 1;

/// Default rows above a relatively positioned widget.
pub const WIDGET_MARGIN_TOP: u16 = 0;

/// Default rows below a relatively positioned widget.
pub const WIDGET_MARGIN_BOTTOM: u16 = 1;

/// Default left offset (in columns) of a widget.
pub const WIDGET_MARGIN_LEFT: u16 = 2;

/// Columns between the label and the field of a labeled input.
pub const LABEL_GAP: u16 = 1;

/// Inner width of text fields, dropdowns and separators without an
/// explicit `width` style.
pub const DEFAULT_FIELD_WIDTH: u16 = 20;

/// Maximum number of characters a text input accepts by default.
pub const DEFAULT_MAX_CHARS: usize = 25;
