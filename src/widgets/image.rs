use ratatui::layout::Size;

use super::WidgetBehavior;
use crate::style::BoxStyle;
use crate::ui::text_width;

/// One frame of text art.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    lines: Vec<String>,
}

impl ImageFrame {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a block of text on newlines.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn size(&self) -> Size {
        let width = self.lines.iter().map(|l| text_width(l)).max().unwrap_or(0);
        let height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        Size::new(width, height)
    }
}

/// A text-art image with one or more frames. Auto-scrolling images advance
/// one frame per form tick.
#[derive(Debug, Clone)]
pub struct Image {
    frames: Vec<ImageFrame>,
    index: usize,
    auto_scroll: bool,
}

impl Image {
    pub fn new(frames: Vec<ImageFrame>, start: usize, auto_scroll: bool) -> Self {
        let index = if frames.is_empty() {
            0
        } else {
            start.min(frames.len() - 1)
        };
        Self {
            frames,
            index,
            auto_scroll,
        }
    }

    pub fn still(frame: ImageFrame) -> Self {
        Self::new(vec![frame], 0, false)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&ImageFrame> {
        self.frames.get(self.index)
    }

    pub fn advance(&mut self) {
        if !self.frames.is_empty() {
            self.index = (self.index + 1) % self.frames.len();
        }
    }
}

impl WidgetBehavior for Image {
    // Sized to the largest frame so animation does not shift the layout.
    fn measure(&self, style: &BoxStyle) -> Size {
        let natural = self.frames.iter().map(ImageFrame::size).fold(
            Size::new(0, 0),
            |acc, size| Size::new(acc.width.max(size.width), acc.height.max(size.height)),
        );
        let border = style.border() * 2;
        Size::new(
            style.width.unwrap_or(natural.width) + border,
            style.height.unwrap_or(natural.height) + border,
        )
    }
}
