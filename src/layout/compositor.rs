//! Single-pass flow layout.
//!
//! Walks one tree level in slot order with a running row cursor. Relative
//! widgets are placed at the cursor plus their top margin and push it down
//! by `top + height + bottom`; absolute widgets sit at their `top` row and
//! leave it alone. Containers are composed recursively into their own
//! surface first. An expanded dropdown is deferred and drawn after every
//! other widget of its level, while reserving only its collapsed height in
//! the flow.

use ratatui::layout::Rect;

use super::{HitTable, translate};
use crate::error::{FormError, Result};
use crate::render::{RenderContext, Renderer};
use crate::style::BoxStyle;
use crate::tree::{SlotOrder, WidgetStore};
use crate::widgets::Widget;

/// Where a widget landed in the last pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub rect: Rect,
    /// Drawn as the deferred overlay of its level.
    pub overlay: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutPass {
    /// In draw order, nested placements translated to canvas coordinates.
    pub placements: Vec<Placement>,
    pub hits: HitTable,
}

impl LayoutPass {
    pub fn placement(&self, name: &str) -> Option<&Placement> {
        self.placements.iter().find(|placement| placement.name == name)
    }
}

/// One tree level to lay out.
#[derive(Debug, Clone, Copy)]
pub struct Level<'a> {
    /// Container whose children this level holds; `None` for the form.
    pub owner: Option<&'a str>,
    pub store: &'a WidgetStore,
    pub order: &'a SlotOrder,
    /// Initial row cursor.
    pub cursor_start: u16,
}

struct Deferred<'a> {
    name: &'a str,
    widget: &'a Widget,
    x: u16,
    y: u16,
}

/// Lay out and draw `level` onto `canvas`.
///
/// Any failure aborts the whole pass; the caller must not present a canvas
/// from a failed pass.
pub fn compose<R: Renderer>(
    renderer: &mut R,
    canvas: &mut R::Surface,
    level: Level<'_>,
) -> Result<LayoutPass> {
    let tree_name = level.owner.unwrap_or("form");
    if level.order.is_empty() {
        return Err(FormError::empty_tree(tree_name));
    }
    let canvas_width = renderer.size(canvas).width;
    let mut pass = LayoutPass::default();
    let mut cy = level.cursor_start;
    let mut overlay: Option<Deferred<'_>> = None;

    for name in level.order.names() {
        let widget = level
            .store
            .find(name)
            .ok_or_else(|| FormError::not_found(tree_name, name))?;
        // Drawn as part of its own container's surface.
        if widget.state.owner.as_deref() != level.owner {
            continue;
        }
        widget.check_renderable(name)?;

        let style = &widget.style;
        let size = widget.measure();
        let x = style.left.resolve(canvas_width, size.width);
        let row_top = if style.is_absolute() {
            style.top
        } else {
            cy.saturating_add(style.top)
        };

        if widget.is_expanded_overlay() {
            let collapsed = widget.collapsed_height();
            let y = row_top.saturating_sub(size.height.saturating_sub(collapsed) / 2);
            let deferred = Deferred {
                name,
                widget,
                x,
                y,
            };
            if let Some(earlier) = overlay.replace(deferred) {
                draw_overlay(renderer, canvas, &mut pass, earlier);
            }
            if !style.is_absolute() {
                cy = advance(cy, style, collapsed);
            }
            continue;
        }

        if let Some(container) = widget.as_container() {
            let mut surface = renderer.canvas(size, style);
            let nested = compose(
                renderer,
                &mut surface,
                Level {
                    owner: Some(name),
                    store: container.tree().store(),
                    order: container.tree().order(),
                    cursor_start: style.border(),
                },
            )?;
            let rect = renderer.blit(&surface, canvas, x, row_top);
            pass.placements.push(Placement {
                name: name.clone(),
                rect,
                overlay: false,
            });
            pass.placements
                .extend(nested.placements.into_iter().map(|placement| Placement {
                    rect: translate(placement.rect, rect.x, rect.y).intersection(rect),
                    ..placement
                }));
            pass.hits.extend_translated(nested.hits, rect);
        } else {
            let ctx = RenderContext::new(widget.state.focused);
            let surface = renderer.render(widget, ctx);
            let rect = renderer.blit(&surface, canvas, x, row_top);
            if let Some(actions) = widget.hotspots(name) {
                pass.hits.push(rect, actions);
            }
            pass.placements.push(Placement {
                name: name.clone(),
                rect,
                overlay: false,
            });
        }

        if !style.is_absolute() {
            cy = advance(cy, style, size.height);
        }
    }

    if let Some(deferred) = overlay {
        draw_overlay(renderer, canvas, &mut pass, deferred);
    }
    Ok(pass)
}

fn advance(cy: u16, style: &BoxStyle, height: u16) -> u16 {
    cy.saturating_add(style.top)
        .saturating_add(height)
        .saturating_add(style.bottom)
}

fn draw_overlay<R: Renderer>(
    renderer: &mut R,
    canvas: &mut R::Surface,
    pass: &mut LayoutPass,
    deferred: Deferred<'_>,
) {
    let ctx = RenderContext::new(deferred.widget.state.focused).with_overlay(true);
    let surface = renderer.render(deferred.widget, ctx);
    let rect = renderer.blit(&surface, canvas, deferred.x, deferred.y);
    if let Some(actions) = deferred.widget.hotspots(deferred.name) {
        pass.hits.push(rect, actions);
    }
    pass.placements.push(Placement {
        name: deferred.name.to_string(),
        rect,
        overlay: true,
    });
}
