use ratatui::layout::Size;

use super::WidgetBehavior;
use crate::style::BoxStyle;
use crate::ui::text_width;

/// Static text. Has no value and is skipped by Tab.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl WidgetBehavior for Label {
    fn measure(&self, style: &BoxStyle) -> Size {
        let border = style.border() * 2;
        Size::new(
            style.width.unwrap_or_else(|| text_width(&self.text)) + border,
            style.height.unwrap_or(1) + border,
        )
    }
}
