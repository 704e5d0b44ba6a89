//! Card panel: one visible child at a time.
//!
//! Every card sits at the panel's inset origin. Only the selected card is
//! visible; the others stay in the tree but are skipped by paint,
//! hit-testing and focus cycling. The selected card is sized to the content
//! area if it is resizable.
//!
//! # Show/hide notifications
//!
//! [`CardPanel::select`] sends [`WidgetEvent::Shown`] to the newly selected
//! card and [`WidgetEvent::Hidden`] to the card it replaces, but only if that
//! card was itself announced as shown. The card visible before the first
//! selection receives nothing, so every `Hidden` follows a `Shown`.

use trellis_core::logging::targets;
use trellis_core::{Insets, TrellisError, TrellisResult, WidgetId};

use super::{size_if_resizable, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::{
    BackgroundPainter, EventContext, HostRequest, LayoutContext, Panel, Placement, Widget,
    WidgetBase, WidgetEvent,
};

/// Shows one of its children.
///
/// Accepts [`Placement::Auto`] only.
#[derive(Debug, Clone)]
pub struct CardPanel {
    base: WidgetBase,
    insets: Insets,
    background: Option<BackgroundPainter>,
    cards: Vec<WidgetId>,
    selected: usize,
    /// The card last sent `Shown`.
    shown: Option<WidgetId>,
}

impl CardPanel {
    /// An empty card panel. Index 0 is selected once a card is added.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            insets: Insets::NONE,
            background: None,
            cards: Vec::new(),
            selected: 0,
            shown: None,
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

    /// The cards in insertion order.
    #[inline]
    pub fn cards(&self) -> &[WidgetId] {
        &self.cards
    }

    /// The number of cards.
    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check whether the panel has no cards.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the visible card.
    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// The visible card.
    #[inline]
    pub fn selected_card(&self) -> Option<WidgetId> {
        self.cards.get(self.selected).copied()
    }

    /// Show the card at `index` of the card panel `panel`.
    ///
    /// Fails with `InvalidState` for an out-of-range index and with
    /// `InvalidArgument` if `panel` is not a card panel. The panel is laid
    /// out again once the current handler returns, and focus held inside a
    /// card that gets hidden is released.
    pub fn select(cx: &mut EventContext<'_>, panel: WidgetId, index: usize) -> TrellisResult<()> {
        let Some(cards) = cx.tree_mut().get_as_mut::<CardPanel>(panel) else {
            return Err(TrellisError::invalid_argument(format!(
                "widget {panel:?} is not a card panel"
            )));
        };
        let Some(&card) = cards.cards.get(index) else {
            return Err(TrellisError::invalid_state(format!(
                "card index {index} out of range for {} cards",
                cards.cards.len()
            )));
        };

        let previous = cards.shown.filter(|&shown| shown != card);
        let announce = cards.shown != Some(card);
        cards.selected = index;
        cards.shown = Some(card);
        let all = cards.cards.clone();
        tracing::debug!(target: targets::LAYOUT, ?panel, index, "card selected");

        for &id in &all {
            if let Some(widget) = cx.tree_mut().widget_mut(id) {
                widget.set_visible(id == card);
            }
        }
        // Focus inside a card that is now hidden has to go.
        if let Some(focused) = cx.focused() {
            let hidden = all
                .iter()
                .any(|&id| id != card && cx.tree().is_ancestor_or_self(id, focused));
            if hidden {
                cx.tree_mut().push_request(HostRequest::ReleaseFocus(focused));
            }
        }
        if let Some(old) = previous {
            if cx.tree().contains(old) {
                cx.send_event(old, &WidgetEvent::Hidden)?;
            }
        }
        if announce {
            cx.send_event(card, &WidgetEvent::Shown)?;
        }
        cx.request_layout(panel);
        Ok(())
    }
}

impl Default for CardPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for CardPanel {
    panel_widget_plumbing!();
}

impl Panel for CardPanel {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        if placement != Placement::Auto {
            return Err(unsupported("CardPanel", placement));
        }
        child.set_location(self.insets.left(), self.insets.top());
        child.set_visible(self.cards.len() == self.selected);
        Ok(())
    }

    fn child_added(&mut self, child: WidgetId) {
        self.cards.push(child);
    }

    fn child_removed(&mut self, child: WidgetId) {
        let Some(index) = self.cards.iter().position(|&card| card == child) else {
            return;
        };
        self.cards.remove(index);
        if index < self.selected {
            self.selected -= 1;
        }
        self.selected = self.selected.min(self.cards.len().saturating_sub(1));
        if self.shown == Some(child) {
            self.shown = None;
        }
    }

    fn validate(&mut self, _cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        if self.cards.is_empty() {
            return Err(TrellisError::invalid_state("card panel has no cards"));
        }
        Ok(())
    }

    fn layout(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let insets = self.insets;
        for (index, &card) in self.cards.iter().enumerate() {
            if let Some(widget) = cx.child_mut(card) {
                widget.set_location(insets.left(), insets.top());
                widget.set_visible(index == self.selected);
            }
        }
        for &card in &self.cards {
            cx.layout_child(card)?;
            if let Some(bounds) = cx.child_bounds(card) {
                self.base
                    .expand_to(bounds.right() + insets.right(), bounds.bottom() + insets.bottom());
            }
        }

        let width = (self.width() - insets.horizontal()).max(0);
        let height = (self.height() - insets.vertical()).max(0);
        if let Some(card) = self.selected_card() {
            if let Some(widget) = cx.child_mut(card) {
                size_if_resizable(widget, width, height)?;
            }
            cx.layout_child(card)?;
        }
        Ok(())
    }
}
