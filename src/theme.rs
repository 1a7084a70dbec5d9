use ratatui::style::Color;

// Centralized form colors. Widgets pick these up as style defaults, so any
// of them can still be overridden per widget through style overrides.

pub fn form_bg() -> Color {
    Color::Reset
}

pub fn text_fg() -> Color {
    Color::White
}

// Fields
pub fn field_bg() -> Color {
    Color::DarkGray
}
pub fn field_fg() -> Color {
    Color::White
}

// Buttons
pub fn button_bg() -> Color {
    Color::Gray
}
pub fn button_fg() -> Color {
    Color::Black
}

// Focus
pub fn focus_bg() -> Color {
    Color::Magenta
}

pub fn border() -> Color {
    Color::Gray
}

// Dropdown internals
pub fn scroll_thumb() -> Color {
    Color::Magenta
}
pub fn arrow_bg() -> Color {
    Color::Gray
}
