//! Box panel: children stacked along one axis.
//!
//! `BoxPanel` places its visible children one after another along its
//! [`Axis`], with a fixed spacing between consecutive children. The run as a
//! whole is aligned along the main axis, and each child individually along
//! the cross axis.
//!
//! # Algorithm
//!
//! 1. Lay out child panels so their sizes are final.
//! 2. occupied = `spacing * (n - 1) + sum(child main size)`; grow the panel
//!    to fit the run and the largest cross size plus insets.
//! 3. Start the run at `insets.start + main_alignment.offset(available,
//!    occupied)` and advance by each child's size plus spacing.
//!
//! Centering floors the halved remainder.

use trellis_core::{Alignment, Axis, Insets, TrellisError, TrellisResult, WidgetId};

use super::{DEFAULT_CHILD_SIZE, DEFAULT_SPACING, size_if_resizable, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::{BackgroundPainter, LayoutContext, Panel, Placement, Widget, WidgetBase};

/// Stacks children horizontally or vertically.
///
/// Accepts [`Placement::Auto`], which sizes resizable children to
/// [`DEFAULT_CHILD_SIZE`] square, and [`Placement::Sized`].
#[derive(Debug, Clone)]
pub struct BoxPanel {
    base: WidgetBase,
    axis: Axis,
    spacing: i32,
    main_alignment: Alignment,
    cross_alignment: Alignment,
    insets: Insets,
    background: Option<BackgroundPainter>,
}

impl BoxPanel {
    /// An empty box along `axis` with the default spacing, start-aligned.
    pub fn new(axis: Axis) -> Self {
        Self {
            base: WidgetBase::new(),
            axis,
            spacing: DEFAULT_SPACING,
            main_alignment: Alignment::Start,
            cross_alignment: Alignment::Start,
            insets: Insets::NONE,
            background: None,
        }
    }

    /// A left-to-right box.
    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// A top-to-bottom box.
    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the gap between children (builder pattern). Must not be negative.
    pub fn with_spacing(mut self, spacing: i32) -> TrellisResult<Self> {
        if spacing < 0 {
            return Err(TrellisError::invalid_argument(format!(
                "negative box spacing: {spacing}"
            )));
        }
        self.spacing = spacing;
        Ok(self)
    }

    /// Set the main- and cross-axis alignment (builder pattern).
    pub fn with_alignment(mut self, main: Alignment, cross: Alignment) -> Self {
        self.main_alignment = main;
        self.cross_alignment = cross;
        self
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

    /// The stacking axis.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The gap between children.
    #[inline]
    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Alignment of the run along the axis.
    #[inline]
    pub fn main_alignment(&self) -> Alignment {
        self.main_alignment
    }

    /// Alignment of each child across the axis.
    #[inline]
    pub fn cross_alignment(&self) -> Alignment {
        self.cross_alignment
    }

    /// Change the alignments. Takes effect on the next layout.
    pub fn set_alignment(&mut self, main: Alignment, cross: Alignment) {
        self.main_alignment = main;
        self.cross_alignment = cross;
    }

    /// (start, end) insets along `axis`.
    fn padding(&self, axis: Axis) -> (i32, i32) {
        axis.choose(
            (self.insets.left(), self.insets.right()),
            (self.insets.top(), self.insets.bottom()),
        )
    }

    fn extent(&self, axis: Axis) -> i32 {
        axis.choose(self.width(), self.height())
    }
}

impl Widget for BoxPanel {
    panel_widget_plumbing!();
}

impl Panel for BoxPanel {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        match placement {
            Placement::Auto => size_if_resizable(child, DEFAULT_CHILD_SIZE, DEFAULT_CHILD_SIZE),
            Placement::Sized { width, height } => size_if_resizable(child, width, height),
            other => Err(unsupported("BoxPanel", other)),
        }
    }

    fn layout(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let main = self.axis;
        let cross = main.cross();

        let mut items: Vec<(WidgetId, i32, i32)> = Vec::new();
        for child in cx.children() {
            cx.layout_child(child)?;
            let Some(widget) = cx.child(child) else {
                continue;
            };
            if !widget.is_visible() {
                continue;
            }
            let size = (widget.width(), widget.height());
            items.push((child, main.choose(size.0, size.1), cross.choose(size.0, size.1)));
        }

        let gaps = i32::try_from(items.len().saturating_sub(1)).unwrap_or(i32::MAX);
        let occupied = self.spacing * gaps + items.iter().map(|&(_, len, _)| len).sum::<i32>();
        let thickest = items.iter().map(|&(_, _, len)| len).max().unwrap_or(0);

        let (main_start, main_end) = self.padding(main);
        let (cross_start, cross_end) = self.padding(cross);
        let need_main = main_start + occupied + main_end;
        let need_cross = cross_start + thickest + cross_end;
        self.base
            .expand_to(main.choose(need_main, need_cross), main.choose(need_cross, need_main));

        let available_main = self.extent(main) - main_start - main_end;
        let available_cross = self.extent(cross) - cross_start - cross_end;
        let mut cursor = main_start + self.main_alignment.offset(available_main, occupied);
        for (child, length, thickness) in items {
            let across = cross_start + self.cross_alignment.offset(available_cross, thickness);
            if let Some(widget) = cx.child_mut(child) {
                widget.set_location(main.choose(cursor, across), main.choose(across, cursor));
            }
            cursor += length + self.spacing;
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

    fn positions(tree: &WidgetTree, ids: &[WidgetId]) -> Vec<(i32, i32)> {
        ids.iter()
            .map(|&id| {
                let widget = tree.widget(id).unwrap();
                (widget.x(), widget.y())
            })
            .collect()
    }

    #[test]
    fn test_horizontal_stack_with_spacing() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(BoxPanel::horizontal());
        let a = tree.add(panel, Label::new("a"), Placement::Auto).unwrap();
        let b = tree
            .add(panel, Label::new("b"), Placement::Sized { width: 30, height: 10 })
            .unwrap();
        let c = tree.add(panel, Label::new("c"), Placement::Auto).unwrap();
        tree.validate(panel, HostHandle::next()).unwrap();

        assert_eq!(positions(&tree, &[a, b, c]), vec![(0, 0), (22, 0), (56, 0)]);
        let size = tree.widget(panel).unwrap().widget_base().size();
        assert_eq!((size.width(), size.height()), (74, 18));
    }

    #[test]
    fn test_center_alignment_floors() {
        let mut tree = WidgetTree::new();
        let mut panel = BoxPanel::vertical()
            .with_spacing(0)
            .unwrap()
            .with_alignment(Alignment::Center, Alignment::Center);
        panel.widget_base_mut().set_size(41, 41).unwrap();
        let panel = tree.insert(panel);
        let child = tree
            .add(panel, Label::new("x"), Placement::Sized { width: 20, height: 20 })
            .unwrap();
        tree.validate(panel, HostHandle::next()).unwrap();

        // (41 - 20) / 2 floors to 10 on both axes.
        assert_eq!(positions(&tree, &[child]), vec![(10, 10)]);
    }

    #[test]
    fn test_end_alignment_and_hidden_children() {
        let mut tree = WidgetTree::new();
        let mut panel = BoxPanel::horizontal().with_alignment(Alignment::End, Alignment::End);
        panel.widget_base_mut().set_size(100, 30).unwrap();
        let panel = tree.insert(panel);
        let a = tree.add(panel, Label::new("a"), Placement::Auto).unwrap();
        let hidden = tree.add(panel, Label::new("h"), Placement::Auto).unwrap();
        let b = tree.add(panel, Label::new("b"), Placement::Auto).unwrap();
        tree.widget_mut(hidden).unwrap().set_visible(false);
        tree.validate(panel, HostHandle::next()).unwrap();

        // occupied = 18 + 4 + 18 = 40
        assert_eq!(positions(&tree, &[a, b]), vec![(60, 12), (82, 12)]);
    }

    #[test]
    fn test_rejects_positions() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(BoxPanel::vertical());
        let err = tree
            .add(panel, Label::new("x"), Placement::At { x: 1, y: 1 })
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(BoxPanel::vertical().with_spacing(-1).is_err());
    }
}
