//! Flat box-model style record shared by every widget.
//!
//! A `BoxStyle` only carries the handful of attributes layout needs
//! (position mode, margins, size) plus the colors the renderer paints with.
//! Defaults differ per widget kind; callers tweak them with plain key/value
//! overrides, see [`BoxStyle::with_overrides`].

use std::str::FromStr;

use ratatui::style::Color;

use crate::constants::{WIDGET_MARGIN_BOTTOM, WIDGET_MARGIN_LEFT, WIDGET_MARGIN_TOP};
use crate::error::{FormError, Result};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Placed at the running layout cursor, which it then advances.
    #[default]
    Relative,
    /// Placed at the fixed `top` row; the layout cursor is left untouched.
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Offset(u16),
    Centered,
}

impl HorizontalAlign {
    /// Resolve to a column inside a canvas `canvas_width` wide.
    pub fn resolve(self, canvas_width: u16, widget_width: u16) -> u16 {
        match self {
            HorizontalAlign::Offset(x) => x,
            HorizontalAlign::Centered => canvas_width.saturating_sub(widget_width) / 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub position: Position,
    pub top: u16,
    pub bottom: u16,
    pub left: HorizontalAlign,
    pub right: u16,
    /// Inner width; `None` lets the widget size itself.
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub border_width: u16,
    pub border_color: Color,
    pub bg_color: Color,
    pub fg_color: Color,
    pub focus_bg_color: Color,
    pub scroll_color: Color,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            position: Position::Relative,
            top: WIDGET_MARGIN_TOP,
            bottom: WIDGET_MARGIN_BOTTOM,
            left: HorizontalAlign::Offset(WIDGET_MARGIN_LEFT),
            right: 0,
            width: None,
            height: None,
            border_width: 0,
            border_color: theme::border(),
            bg_color: Color::Reset,
            fg_color: theme::text_fg(),
            focus_bg_color: theme::focus_bg(),
            scroll_color: theme::scroll_thumb(),
        }
    }
}

impl BoxStyle {
    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// Border thickness in cells. Terminal borders are a single line, so any
    /// non-zero width draws one.
    pub fn border(&self) -> u16 {
        self.border_width.min(1)
    }

    /// Apply `key=value` overrides on top of this style.
    ///
    /// Unknown keys are ignored with a warning; values that cannot be parsed
    /// for a known key fail with [`FormError::InvalidStyle`].
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (key, value) in overrides {
            let value = value.trim();
            match key {
                "position" => {
                    self.position = match value {
                        "relative" => Position::Relative,
                        "absolute" => Position::Absolute,
                        _ => return Err(invalid(key, value)),
                    }
                }
                "top" => self.top = parse_cells(key, value)?,
                "bottom" => self.bottom = parse_cells(key, value)?,
                "right" => self.right = parse_cells(key, value)?,
                "left" => {
                    self.left = match value {
                        "centered" | "center" => HorizontalAlign::Centered,
                        _ => HorizontalAlign::Offset(parse_cells(key, value)?),
                    }
                }
                "width" => self.width = parse_auto(key, value)?,
                "height" => self.height = parse_auto(key, value)?,
                "border_width" => self.border_width = parse_cells(key, value)?,
                "border_color" => self.border_color = parse_color(key, value)?,
                "bg_color" => self.bg_color = parse_color(key, value)?,
                "fg_color" => self.fg_color = parse_color(key, value)?,
                "focus_bg_color" => self.focus_bg_color = parse_color(key, value)?,
                "scroll_color" => self.scroll_color = parse_color(key, value)?,
                _ => tracing::warn!(key, value, "ignoring unknown style key"),
            }
        }
        Ok(self)
    }
}

fn invalid(key: &str, value: &str) -> FormError {
    FormError::InvalidStyle {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_cells(key: &str, value: &str) -> Result<u16> {
    value.parse().map_err(|_| invalid(key, value))
}

fn parse_auto(key: &str, value: &str) -> Result<Option<u16>> {
    if value == "auto" {
        return Ok(None);
    }
    parse_cells(key, value).map(Some)
}

fn parse_color(key: &str, value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| invalid(key, value))
}
