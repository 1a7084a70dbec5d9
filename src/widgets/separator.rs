use ratatui::layout::Size;

use super::WidgetBehavior;
use crate::constants::DEFAULT_FIELD_WIDTH;
use crate::style::{BoxStyle, HorizontalAlign};

/// A horizontal rule, centered by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separator {
    thickness: u16,
}

impl Default for Separator {
    fn default() -> Self {
        Self { thickness: 1 }
    }
}

impl Separator {
    pub fn new(thickness: u16) -> Self {
        Self {
            thickness: thickness.max(1),
        }
    }

    pub fn default_style() -> BoxStyle {
        BoxStyle {
            left: HorizontalAlign::Centered,
            ..BoxStyle::default()
        }
    }

    pub fn thickness(&self) -> u16 {
        self.thickness
    }
}

impl WidgetBehavior for Separator {
    fn measure(&self, style: &BoxStyle) -> Size {
        Size::new(
            style.width.unwrap_or(DEFAULT_FIELD_WIDTH),
            style.height.unwrap_or(self.thickness),
        )
    }
}
