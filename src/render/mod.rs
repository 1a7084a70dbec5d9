//! Drawing seam between the compositor and whatever produces pixels.
//!
//! Layout never looks inside a surface. It asks a [`Renderer`] for one per
//! widget, for blank canvases to composite containers into, and to blit a
//! surface onto another; the rectangle `blit` reports is used verbatim for
//! hit-testing.

pub mod buffer;

use ratatui::layout::{Rect, Size};

use crate::style::BoxStyle;
use crate::widgets::Widget;

pub use buffer::BufferRenderer;

/// Context passed to [`Renderer::render`] describing UI state.
///
/// - `focused`: whether the widget holds keyboard focus.
/// - `overlay`: whether the widget is being drawn as the deferred overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    focused: bool,
    overlay: bool,
}

impl RenderContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            overlay: false,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}

pub trait Renderer {
    type Surface;

    /// Draw `widget` into a fresh surface of its measured size.
    fn render(&mut self, widget: &Widget, ctx: RenderContext) -> Self::Surface;

    /// A blank surface painted with `style`'s background and border.
    fn canvas(&mut self, size: Size, style: &BoxStyle) -> Self::Surface;

    fn size(&self, surface: &Self::Surface) -> Size;

    /// Composite `src` onto `dst` with its top-left corner at `(x, y)` and
    /// return the rectangle of `dst` actually covered.
    fn blit(&mut self, src: &Self::Surface, dst: &mut Self::Surface, x: u16, y: u16) -> Rect;
}
