use ratatui::buffer::Buffer;
use ratatui::layout::{Margin, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget as _};

use super::{RenderContext, Renderer};
use crate::constants::{DROPDOWN_ARROW_WIDTH, SCROLL_BAR_WIDTH};
use crate::layout::rect_contains;
use crate::style::BoxStyle;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, text_width};
use crate::widgets::{Button, Dropdown, Image, LabeledInput, TextInput, Widget, WidgetKind};

/// Renders widgets into offscreen `ratatui` buffers.
///
/// Every surface has its origin at `(0, 0)`; `blit` places it on the
/// destination. Cells painted with `Color::Reset` stay transparent when
/// composited.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferRenderer;

impl BufferRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for BufferRenderer {
    type Surface = Buffer;

    fn render(&mut self, widget: &Widget, ctx: RenderContext) -> Buffer {
        let mut buf = blank(widget.measure());
        let area = buf.area;
        let style = &widget.style;
        match widget.kind() {
            WidgetKind::Label(label) => draw_text(&mut buf, area, label.text(), style),
            WidgetKind::TextInput(input) => draw_input(&mut buf, area, input, style, ctx),
            WidgetKind::LabeledInput(input) => draw_labeled(&mut buf, area, input, style, ctx),
            WidgetKind::Button(button) => draw_button(&mut buf, area, button, style, ctx),
            WidgetKind::Dropdown(dropdown) => draw_dropdown(&mut buf, area, dropdown, style, ctx),
            WidgetKind::Image(image) => draw_image(&mut buf, area, image, style),
            WidgetKind::Separator(_) => draw_rule(&mut buf, area, style),
            WidgetKind::Container(_) => {
                paint_box(&mut buf, area, style, style.bg_color);
            }
        }
        buf
    }

    fn canvas(&mut self, size: Size, style: &BoxStyle) -> Buffer {
        let mut buf = blank(size);
        let area = buf.area;
        paint_box(&mut buf, area, style, style.bg_color);
        buf
    }

    fn size(&self, surface: &Buffer) -> Size {
        surface.area.as_size()
    }

    fn blit(&mut self, src: &Buffer, dst: &mut Buffer, x: u16, y: u16) -> Rect {
        let area = dst.area;
        UiFrame::from_parts(area, dst).blit_at(src, x, y)
    }
}

fn blank(size: Size) -> Buffer {
    Buffer::empty(Rect::new(0, 0, size.width, size.height))
}

/// Paint the background and border, returning the area inside the border.
fn paint_box(buf: &mut Buffer, area: Rect, style: &BoxStyle, bg: Color) -> Rect {
    buf.set_style(area, Style::default().bg(bg));
    if style.border() == 0 {
        return area;
    }
    Block::bordered()
        .border_style(Style::default().fg(style.border_color))
        .render(area, buf);
    area.inner(Margin::new(1, 1))
}

fn draw_text(buf: &mut Buffer, area: Rect, text: &str, style: &BoxStyle) {
    let inner = paint_box(buf, area, style, style.bg_color);
    safe_set_string(
        buf,
        inner,
        inner.x,
        inner.y,
        text,
        Style::default().fg(style.fg_color),
    );
}

fn draw_input(buf: &mut Buffer, area: Rect, input: &TextInput, style: &BoxStyle, ctx: RenderContext) {
    let inner = paint_box(buf, area, style, style.bg_color);
    let offset = input.scroll_offset(inner.width);
    let visible: String = input
        .text()
        .chars()
        .skip(offset)
        .take(usize::from(inner.width))
        .collect();
    safe_set_string(
        buf,
        inner,
        inner.x,
        inner.y,
        &visible,
        Style::default().fg(style.fg_color),
    );
    if !(ctx.focused() && input.cursor_visible()) {
        return;
    }
    let column = u16::try_from(input.cursor() - offset)
        .map(|dx| inner.x.saturating_add(dx))
        .unwrap_or(u16::MAX);
    if rect_contains(inner, column, inner.y)
        && let Some(cell) = buf.cell_mut((column, inner.y))
    {
        cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
    }
}

fn draw_labeled(
    buf: &mut Buffer,
    area: Rect,
    input: &LabeledInput,
    style: &BoxStyle,
    ctx: RenderContext,
) {
    let label_width = input.label_width().min(area.width);
    safe_set_string(
        buf,
        area,
        area.x,
        area.y + style.border(),
        input.label().text(),
        Style::default().fg(theme::text_fg()),
    );
    let field = Rect::new(
        area.x + label_width,
        area.y,
        area.width - label_width,
        area.height,
    );
    draw_input(buf, field, input.input(), style, ctx);
}

fn draw_button(buf: &mut Buffer, area: Rect, button: &Button, style: &BoxStyle, ctx: RenderContext) {
    let bg = if ctx.focused() {
        style.focus_bg_color
    } else {
        style.bg_color
    };
    let inner = paint_box(buf, area, style, bg);
    let text = if style.border() > 0 {
        format!(" {} ", button.text())
    } else {
        format!("[ {} ]", button.text())
    };
    let x = inner.x + inner.width.saturating_sub(text_width(&text)) / 2;
    let y = inner.y + inner.height.saturating_sub(1) / 2;
    safe_set_string(buf, inner, x, y, &text, Style::default().fg(style.fg_color));
}

fn draw_dropdown(
    buf: &mut Buffer,
    area: Rect,
    dropdown: &Dropdown,
    style: &BoxStyle,
    ctx: RenderContext,
) {
    let inner = paint_box(buf, area, style, style.bg_color);
    let text_style = Style::default().fg(style.fg_color);
    let arrow_style = Style::default().fg(theme::button_fg()).bg(theme::arrow_bg());
    let arrow_x = inner.right().saturating_sub(DROPDOWN_ARROW_WIDTH).max(inner.x);
    buf.set_style(
        Rect::new(arrow_x, inner.y, inner.right() - arrow_x, inner.height),
        arrow_style,
    );

    if !dropdown.is_expanded() {
        let row = Rect::new(inner.x, inner.y, arrow_x - inner.x, 1);
        if ctx.focused() {
            buf.set_style(row, Style::default().bg(style.focus_bg_color));
        }
        if let Some(option) = dropdown.highlighted().and_then(|h| dropdown.options().get(h)) {
            safe_set_string(buf, row, row.x + 1, row.y, &option.name, text_style);
        }
        safe_set_string(buf, inner, arrow_x, inner.y, " ▼", arrow_style);
        return;
    }

    let bar_x = arrow_x.saturating_sub(SCROLL_BAR_WIDTH).max(inner.x);
    for (row, index) in dropdown.visible_window().enumerate() {
        let Some(option) = dropdown.options().get(index) else {
            break;
        };
        let line = Rect::new(inner.x, inner.y + row as u16, bar_x - inner.x, 1);
        if dropdown.highlighted() == Some(index) {
            buf.set_style(line, Style::default().bg(style.focus_bg_color));
        }
        safe_set_string(buf, line, line.x + 1, line.y, &option.name, text_style);
    }

    let (thumb, len) = dropdown.scroll_thumb(inner.height);
    for row in 0..inner.height {
        let (symbol, color) = if (thumb..thumb + len).contains(&row) {
            ("█", style.scroll_color)
        } else {
            ("│", style.border_color)
        };
        safe_set_string(
            buf,
            inner,
            bar_x,
            inner.y + row,
            symbol,
            Style::default().fg(color),
        );
    }
    safe_set_string(buf, inner, arrow_x, inner.y, " ▲", arrow_style);
}

fn draw_image(buf: &mut Buffer, area: Rect, image: &Image, style: &BoxStyle) {
    let inner = paint_box(buf, area, style, style.bg_color);
    let Some(frame) = image.current() else {
        return;
    };
    let size = frame.size();
    let x = inner.x + inner.width.saturating_sub(size.width) / 2;
    let y = inner.y + inner.height.saturating_sub(size.height) / 2;
    for (row, line) in frame.lines().iter().enumerate() {
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        safe_set_string(
            buf,
            inner,
            x,
            y.saturating_add(row),
            line,
            Style::default().fg(style.fg_color),
        );
    }
}

fn draw_rule(buf: &mut Buffer, area: Rect, style: &BoxStyle) {
    let rule = "─".repeat(usize::from(area.width));
    for y in area.top()..area.bottom() {
        safe_set_string(buf, area, area.x, y, &rule, Style::default().fg(style.fg_color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{ButtonAction, Separator};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use crate::keybindings::KeyBindings;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(""))
            .collect()
    }

    fn focused() -> RenderContext {
        RenderContext::new(true)
    }

    #[test]
    fn button_draws_brackets_and_focus() {
        let widget = Widget::button("Go", ButtonAction::Submit);
        let mut renderer = BufferRenderer::new();

        let idle = renderer.render(&widget, RenderContext::default());
        assert_eq!(row(&idle, 0), "[ Go ]");
        assert_eq!(idle.cell((0, 0)).unwrap().bg, theme::button_bg());

        let active = renderer.render(&widget, focused());
        assert_eq!(active.cell((0, 0)).unwrap().bg, theme::focus_bg());
    }

    #[test]
    fn bordered_label_sits_inside_its_frame() {
        let widget = Widget::label("hi")
            .with_style([("border_width", "1")])
            .unwrap();
        let buf = BufferRenderer::new().render(&widget, RenderContext::default());
        assert_eq!(buf.area, Rect::new(0, 0, 4, 3));
        assert_eq!(row(&buf, 0), "┌──┐");
        assert_eq!(row(&buf, 1), "│hi│");
        assert_eq!(row(&buf, 2), "└──┘");
    }

    #[test]
    fn label_background_stays_transparent() {
        let buf = BufferRenderer::new().render(&Widget::label("x"), RenderContext::default());
        assert_eq!(buf.cell((0, 0)).unwrap().bg, Color::Reset);
    }

    #[test]
    fn focused_input_shows_cursor_cell() {
        let mut widget = Widget::text_input("");
        widget.focus();
        widget.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), &KeyBindings::default());
        widget.handle_key(&KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE), &KeyBindings::default());

        let mut renderer = BufferRenderer::new();
        let buf = renderer.render(&widget, focused());
        assert!(row(&buf, 0).starts_with("ab "));
        let cursor = buf.cell((2, 0)).unwrap();
        assert!(cursor.modifier.contains(Modifier::REVERSED));

        let idle = renderer.render(&widget, RenderContext::default());
        assert!(!idle.cell((2, 0)).unwrap().modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn collapsed_dropdown_shows_selection_and_arrow() {
        let mut dropdown = Dropdown::new();
        dropdown.add_option("red", "r", None).unwrap();
        dropdown.add_option("green", "g", None).unwrap();
        let widget = Widget::dropdown(dropdown.with_selected(Some(1)));

        let buf = BufferRenderer::new().render(&widget, RenderContext::default());
        let line = row(&buf, 0);
        assert!(line.starts_with(" green"));
        assert!(line.ends_with(" ▼"));
        assert_eq!(buf.area.height, 1);
    }

    #[test]
    fn expanded_dropdown_draws_window_and_thumb() {
        let mut dropdown = Dropdown::new();
        for i in 0..6_i64 {
            dropdown.add_option(format!("opt{i}"), i, None).unwrap();
        }
        let mut widget = Widget::dropdown(dropdown.with_selected(Some(4)));
        widget.toggle();

        let buf = BufferRenderer::new().render(&widget, RenderContext::new(true).with_overlay(true));
        assert_eq!(buf.area.height, 5);
        assert!(row(&buf, 0).starts_with(" opt1"));
        assert!(row(&buf, 4).starts_with(" opt5"));
        assert!(row(&buf, 0).ends_with(" ▲"));

        let bar_x = buf.area.width - DROPDOWN_ARROW_WIDTH - SCROLL_BAR_WIDTH;
        let symbols: Vec<&str> = (0..5)
            .map(|y| buf.cell((bar_x, y)).unwrap().symbol())
            .collect();
        assert_eq!(symbols, vec!["│", "█", "█", "█", "█"]);
        // highlighted option 4 is the fourth visible row
        assert_eq!(buf.cell((0, 3)).unwrap().bg, theme::focus_bg());
    }

    #[test]
    fn separator_fills_its_width() {
        let widget = Widget::separator(Separator::default())
            .with_style([("width", "5")])
            .unwrap();
        let buf = BufferRenderer::new().render(&widget, RenderContext::default());
        assert_eq!(row(&buf, 0), "─────");
    }

    #[test]
    fn blit_reports_covered_rect() {
        let mut renderer = BufferRenderer::new();
        let mut canvas = renderer.canvas(Size::new(8, 2), &BoxStyle::default());
        let surface = renderer.render(&Widget::button("Go", ButtonAction::Submit), RenderContext::default());
        let rect = renderer.blit(&surface, &mut canvas, 4, 1);
        assert_eq!(rect, Rect::new(4, 1, 4, 1));
        assert_eq!(row(&canvas, 1), "    [ Go");
    }
}
