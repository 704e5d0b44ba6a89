//! A panel that keeps children where they were put.

use trellis_core::{Insets, TrellisResult};

use super::{size_if_resizable, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::{BackgroundPainter, Panel, Placement, Widget, WidgetBase};

/// Absolute positioning.
///
/// Accepts [`Placement::At`], [`Placement::Bounds`] (the size applies only to
/// resizable children) and [`Placement::Auto`], which puts the child at the
/// inset origin. Layout never moves a child; it only grows the panel.
#[derive(Debug, Clone)]
pub struct PlainPanel {
    base: WidgetBase,
    insets: Insets,
    background: Option<BackgroundPainter>,
}

impl PlainPanel {
    /// An empty panel with no insets and no background.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            insets: Insets::NONE,
            background: None,
        }
    }

    /// Set the padding (builder pattern).
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Set the background painter (builder pattern).
    pub fn with_background(mut self, background: BackgroundPainter) -> Self {
        self.background = Some(background);
        self
    }

    /// Set the panel's own position (builder pattern).
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.base.set_location(x, y);
        self
    }
}

impl Default for PlainPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for PlainPanel {
    panel_widget_plumbing!();
}

impl Panel for PlainPanel {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        match placement {
            Placement::Auto => child.set_location(self.insets.left(), self.insets.top()),
            Placement::At { x, y } => child.set_location(x, y),
            Placement::Bounds {
                x,
                y,
                width,
                height,
            } => {
                child.set_location(x, y);
                size_if_resizable(child, width, height)?;
            }
            other => return Err(unsupported("PlainPanel", other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::Label;
    use crate::widget::WidgetTree;
    use trellis_core::HostHandle;

    #[test]
    fn test_bounds_size_only_resizable_children() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(PlainPanel::new());
        let resizable = tree
            .add(panel, Label::new("a"), Placement::Bounds { x: 2, y: 3, width: 30, height: 12 })
            .unwrap();
        let fixed = tree
            .add(
                panel,
                PlainPanel::new(),
                Placement::Bounds { x: 5, y: 5, width: 30, height: 12 },
            )
            .unwrap();

        let label = tree.widget(resizable).unwrap();
        assert_eq!((label.x(), label.y(), label.width(), label.height()), (2, 3, 30, 12));
        let inner = tree.widget(fixed).unwrap();
        assert_eq!((inner.x(), inner.y(), inner.width(), inner.height()), (5, 5, 0, 0));
    }

    #[test]
    fn test_auto_uses_inset_origin() {
        let mut tree = WidgetTree::new();
        let insets = Insets::uniform(7).unwrap();
        let panel = tree.insert(PlainPanel::new().with_insets(insets));
        let child = tree.add(panel, Label::new("x"), Placement::Auto).unwrap();
        assert_eq!(tree.widget(child).unwrap().bounds().origin(), trellis_core::Point::new(7, 7));
    }

    #[test]
    fn test_cell_placement_rejected() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(PlainPanel::new());
        let err = tree.add(panel, Label::new("x"), Placement::cell(0, 0)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(tree.children(panel).is_empty());
    }

    #[test]
    fn test_layout_grows_with_insets() {
        let mut tree = WidgetTree::new();
        let insets = Insets::new(0, 0, 3, 5).unwrap();
        let panel = tree.insert(PlainPanel::new().with_insets(insets));
        tree.add(panel, Label::new("x"), Placement::Bounds { x: 10, y: 10, width: 20, height: 20 })
            .unwrap();
        tree.validate(panel, HostHandle::next()).unwrap();
        let size = tree.widget(panel).unwrap().widget_base().size();
        assert_eq!((size.width(), size.height()), (35, 33));
    }
}
