use ratatui::layout::Size;

use super::{Widget, WidgetBehavior};
use crate::error::Result;
use crate::style::{BoxStyle, HorizontalAlign, Position};
use crate::tree::WidgetTree;

/// A fixed-size box with its own widget tree, rendered as one surface.
///
/// Children keep their own slot order for rendering. When the container is
/// added to a form, its children are also spliced into the form's traversal
/// order right after the container. Once attached, children are added
/// through [`Form::add_into`](crate::Form::add_into) so the form's order
/// follows along.
#[derive(Debug, Default)]
pub struct Container {
    tree: WidgetTree,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_style(width: u16, height: u16, x: u16, y: u16) -> BoxStyle {
        BoxStyle {
            position: Position::Absolute,
            top: y,
            bottom: 0,
            left: HorizontalAlign::Offset(x),
            width: Some(width),
            height: Some(height),
            ..BoxStyle::default()
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub(crate) fn add(&mut self, name: &str, widget: Widget, at: Option<usize>) -> Result<usize> {
        self.tree.add(name, widget, at)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<Widget> {
        self.tree.remove(name)
    }

    pub fn find(&self, name: &str) -> Option<&Widget> {
        self.tree.store().find(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Widget> {
        self.tree.store_mut().find_mut(name)
    }

    /// Direct children in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Widget)> {
        self.tree.iter()
    }

    /// Point every direct child's owner at `owner`, and recurse into nested
    /// containers with their own names.
    pub(crate) fn adopt(&mut self, owner: &str) {
        self.tree.set_owner(owner);
        for name in self.tree.order().names().to_vec() {
            if let Some(child) = self.tree.store_mut().get_mut(&name) {
                child.state.owner = Some(owner.to_string());
                if let Some(nested) = child.as_container_mut() {
                    nested.adopt(&name);
                }
            }
        }
    }

    pub(crate) fn collect_names(&self, names: &mut Vec<String>) {
        for (name, child) in self.iter() {
            names.push(name.to_string());
            if let Some(nested) = child.as_container() {
                nested.collect_names(names);
            }
        }
    }
}

impl WidgetBehavior for Container {
    fn measure(&self, style: &BoxStyle) -> Size {
        Size::new(style.width.unwrap_or(0), style.height.unwrap_or(0))
    }
}
