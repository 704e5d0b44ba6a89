//! Tab panel: a strip of tab buttons above a card panel.
//!
//! A `TabPanel` is a composite. When attached to a tree it creates two
//! internal children: a horizontal [`BoxPanel`] holding one button per tab,
//! and a [`CardPanel`] holding the tab contents. Layout gives the strip the
//! panel's width and [`TAB_HEIGHT`], and the card panel the remaining
//! height. Clicking a tab button selects the matching card.
//!
//! Tabs are added with [`TabPanel::add_tab`]; plain `add` is rejected.

use trellis_core::logging::targets;
use trellis_core::{Insets, TrellisError, TrellisResult, WidgetId};
use trellis_render::{Color, monospace_width};

use super::{BoxPanel, CardPanel, TAB_HEIGHT, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::{
    BackgroundPainter, EventContext, EventResult, LayoutContext, MouseButton, PaintContext, Panel,
    Placement, Widget, WidgetBase, WidgetEvent, WidgetTree,
};

/// Horizontal padding on each side of a tab title.
const TAB_PADDING: i32 = 8;

/// Tabbed pages.
#[derive(Debug, Clone)]
pub struct TabPanel {
    base: WidgetBase,
    strip: Option<WidgetId>,
    cards: Option<WidgetId>,
    buttons: Vec<WidgetId>,
    background: Option<BackgroundPainter>,
}

impl TabPanel {
    /// An empty tab panel.
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_resizable(true);
        Self {
            base,
            strip: None,
            cards: None,
            buttons: Vec::new(),
            background: None,
        }
    }

    /// Set the background painter (builder pattern).
    pub fn with_background(mut self, background: BackgroundPainter) -> Self {
        self.background = Some(background);
        self
    }

    /// The internal button strip, once attached.
    #[inline]
    pub fn strip(&self) -> Option<WidgetId> {
        self.strip
    }

    /// The internal card panel, once attached.
    #[inline]
    pub fn cards(&self) -> Option<WidgetId> {
        self.cards
    }

    /// The tab buttons in order.
    #[inline]
    pub fn buttons(&self) -> &[WidgetId] {
        &self.buttons
    }

    /// Add a tab titled `title` showing `content`. Returns the content's id.
    ///
    /// Fails with `InvalidArgument` if `panel` is not a tab panel.
    pub fn add_tab<W: Widget>(
        tree: &mut WidgetTree,
        panel: WidgetId,
        title: impl Into<String>,
        content: W,
    ) -> TrellisResult<WidgetId> {
        tree.attach(panel)?;
        let Some(tabs) = tree.get_as::<TabPanel>(panel) else {
            return Err(TrellisError::invalid_argument(format!(
                "widget {panel:?} is not a tab panel"
            )));
        };
        let (Some(strip), Some(cards)) = (tabs.strip, tabs.cards) else {
            return Err(TrellisError::invalid_state("tab panel has no internal panels"));
        };
        let index = tree.children(cards).len();

        let card = tree.add(cards, content, Placement::Auto)?;
        let button = tree.add(strip, TabButton::new(title, cards, index), Placement::Auto)?;
        if let Some(tabs) = tree.get_as_mut::<TabPanel>(panel) {
            tabs.buttons.push(button);
        }
        tracing::debug!(target: targets::LAYOUT, ?panel, index, "tab added");
        Ok(card)
    }
}

impl Default for TabPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TabPanel {
    panel_widget_plumbing!();
}

impl Panel for TabPanel {
    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, _child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        Err(unsupported("TabPanel (use TabPanel::add_tab)", placement))
    }

    fn on_attached(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let strip = cx.add_internal(BoxPanel::horizontal().with_spacing(0)?)?;
        let cards = cx.add_internal(CardPanel::new())?;
        if let Some(widget) = cx.child_mut(cards) {
            widget.set_location(0, TAB_HEIGHT);
        }
        self.strip = Some(strip);
        self.cards = Some(cards);
        Ok(())
    }

    fn layout(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let width = self.width();
        let content_height = (self.height() - TAB_HEIGHT).max(0);
        for (panel, y, height) in [(self.strip, 0, TAB_HEIGHT), (self.cards, TAB_HEIGHT, content_height)] {
            let Some(panel) = panel else {
                continue;
            };
            if let Some(widget) = cx.child_mut(panel) {
                widget.set_location(0, y);
                widget.widget_base_mut().set_size(width, height)?;
            }
            cx.layout_child(panel)?;
            if let Some(bounds) = cx.child_bounds(panel) {
                self.expand_to_fit(bounds, Insets::NONE);
            }
        }
        Ok(())
    }
}

/// One button of a tab strip.
#[derive(Debug, Clone)]
struct TabButton {
    base: WidgetBase,
    title: String,
    cards: WidgetId,
    index: usize,
    selected: bool,
}

impl TabButton {
    fn new(title: impl Into<String>, cards: WidgetId, index: usize) -> Self {
        let title = title.into();
        let mut base = WidgetBase::new();
        base.expand_to(monospace_width(&title) + 2 * TAB_PADDING, TAB_HEIGHT);
        Self {
            base,
            title,
            cards,
            index,
            selected: index == 0,
        }
    }
}

impl Widget for TabButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_size(&mut self, width: i32, _height: i32) -> TrellisResult<()> {
        self.base.set_size(width, TAB_HEIGHT)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mouse_x: i32, _mouse_y: i32) {
        let fill = match (self.selected, self.base.is_hovered()) {
            (true, _) => Color::PANEL,
            (false, true) => Color::from_argb(0xFFDA_DADA),
            (false, false) => Color::from_argb(0xFFA8_A8A8),
        };
        ctx.fill_rect(x, y, self.width(), self.height(), fill);
        let color = ctx.text_color();
        let text_y = y + (self.height() - trellis_render::DEFAULT_LINE_HEIGHT) / 2;
        ctx.draw_text(&self.title, x + TAB_PADDING, text_y, color);
    }

    fn event(&mut self, event: &WidgetEvent, cx: &mut EventContext<'_>) -> EventResult {
        let WidgetEvent::Click {
            button: MouseButton::Left,
            ..
        } = event
        else {
            return EventResult::Ignored;
        };
        if let Err(error) = CardPanel::select(cx, self.cards, self.index) {
            tracing::warn!(target: targets::INPUT, %error, index = self.index, "tab selection failed");
            return EventResult::Handled;
        }
        self.selected = true;
        if let Some(strip) = cx.parent() {
            let me = cx.id();
            for sibling in cx.tree().children(strip).to_vec() {
                if sibling == me {
                    continue;
                }
                if let Some(button) = cx.tree_mut().get_as_mut::<TabButton>(sibling) {
                    button.selected = false;
                }
            }
        }
        EventResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::widgets::Label;
    use crate::widget::{FocusManager, HostRequest};
    use trellis_core::HostHandle;

    #[test]
    fn test_layout_splits_height() {
        let mut tree = WidgetTree::new();
        let mut tabs = TabPanel::new();
        tabs.set_size(120, 100).unwrap();
        let panel = tree.insert(tabs);
        TabPanel::add_tab(&mut tree, panel, "One", Label::new("first")).unwrap();
        TabPanel::add_tab(&mut tree, panel, "Two", Label::new("second")).unwrap();
        tree.validate(panel, HostHandle::next()).unwrap();

        let tabs = tree.get_as::<TabPanel>(panel).unwrap();
        let strip = tree.widget(tabs.strip().unwrap()).unwrap().bounds();
        let cards = tree.widget(tabs.cards().unwrap()).unwrap().bounds();
        assert_eq!((strip.y(), strip.width(), strip.height()), (0, 120, TAB_HEIGHT));
        assert_eq!((cards.y(), cards.width(), cards.height()), (TAB_HEIGHT, 120, 70));
        assert_eq!(tabs.buttons().len(), 2);
    }

    #[test]
    fn test_tab_button_sized_from_title() {
        let mut tree = WidgetTree::new();
        let cards = tree.insert(CardPanel::new());
        let button = TabButton::new("Two", cards, 1);
        assert_eq!(button.width(), monospace_width("Two") + 2 * TAB_PADDING);
        assert_eq!(button.height(), TAB_HEIGHT);
        assert!(!button.selected);

        let untitled = TabButton::new("", cards, 0);
        assert_eq!((untitled.width(), untitled.height()), (2 * TAB_PADDING, TAB_HEIGHT));
    }

    #[test]
    fn test_plain_add_rejected() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(TabPanel::new());
        let err = tree.add(panel, Label::new("x"), Placement::Auto).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_zero_tabs_fail_validation() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(TabPanel::new());
        assert!(tree.validate(panel, HostHandle::next()).unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_click_selects_card() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(TabPanel::new());
        let first = TabPanel::add_tab(&mut tree, panel, "One", Label::new("a")).unwrap();
        let second = TabPanel::add_tab(&mut tree, panel, "Two", Label::new("b")).unwrap();
        tree.validate(panel, HostHandle::next()).unwrap();
        let buttons = tree.get_as::<TabPanel>(panel).unwrap().buttons().to_vec();
        let cards = tree.get_as::<TabPanel>(panel).unwrap().cards().unwrap();

        let click = WidgetEvent::Click { x: 1, y: 1, button: MouseButton::Left };
        let focus = FocusManager::new();
        assert!(tree.send_event(&focus, buttons[1], &click).unwrap().is_handled());

        assert!(!tree.widget(first).unwrap().is_visible());
        assert!(tree.widget(second).unwrap().is_visible());
        assert!(!tree.get_as::<TabButton>(buttons[0]).unwrap().selected);
        assert!(tree.get_as::<TabButton>(buttons[1]).unwrap().selected);
        assert_eq!(tree.take_requests(), vec![HostRequest::Relayout(cards)]);
    }
}
