//! Scroll panel: a clipped viewport over one content widget.
//!
//! A `ScrollPanel` keeps a fixed viewport size (set by its parent or at
//! construction) and never grows to its content. Two internal
//! [`ScrollBar`]s are created when the panel is attached to a tree; their
//! ranges are recomputed on every layout from the content and viewport
//! sizes, and the content is translated by the bars' values.
//!
//! Child order is `[content, horizontal bar, vertical bar]`, so the bars are
//! painted over the content and win hit-tests against it.

use trellis_core::logging::targets;
use trellis_core::{Axis, Insets, Point, Rect, TrellisError, TrellisResult, WidgetId};

use super::{SCROLL_BAR_SIZE, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::widgets::{DEFAULT_SCROLL_SPEED, ScrollBar};
use crate::widget::{
    BackgroundPainter, EventContext, EventResult, LayoutContext, Panel, Placement, Widget,
    WidgetBase, WidgetEvent,
};

/// When a scroll bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBehavior {
    /// Only when the content overflows the viewport on that axis.
    #[default]
    Auto,
    /// Always.
    Always,
    /// Never; the axis can still be scrolled programmatically.
    Never,
}

impl ScrollBehavior {
    fn shows(self, overflows: bool) -> bool {
        match self {
            Self::Auto => overflows,
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// A scrolled viewport.
///
/// Accepts a single content widget through [`Placement::Auto`]; a second
/// one fails with `InvalidState`.
#[derive(Debug, Clone)]
pub struct ScrollPanel {
    base: WidgetBase,
    content: Option<WidgetId>,
    horizontal_bar: Option<WidgetId>,
    vertical_bar: Option<WidgetId>,
    horizontal: ScrollBehavior,
    vertical: ScrollBehavior,
    scroll_speed: i32,
    scroll: Point,
    background: Option<BackgroundPainter>,
}

impl ScrollPanel {
    /// A viewport of the given size.
    pub fn new(width: i32, height: i32) -> TrellisResult<Self> {
        let mut base = WidgetBase::new();
        base.set_size(width, height)?;
        base.set_resizable(true);
        Ok(Self {
            base,
            content: None,
            horizontal_bar: None,
            vertical_bar: None,
            horizontal: ScrollBehavior::Auto,
            vertical: ScrollBehavior::Auto,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            scroll: Point::ZERO,
            background: None,
        })
    }

    /// Set the scroll bar policies (builder pattern).
    pub fn with_behavior(mut self, horizontal: ScrollBehavior, vertical: ScrollBehavior) -> Self {
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    /// Set the wheel speed (builder pattern).
    pub fn with_scroll_speed(mut self, speed: i32) -> Self {
        self.scroll_speed = speed;
        self
    }

    /// Set the background painter (builder pattern).
    pub fn with_background(mut self, background: BackgroundPainter) -> Self {
        self.background = Some(background);
        self
    }

    /// The content widget.
    #[inline]
    pub fn content(&self) -> Option<WidgetId> {
        self.content
    }

    /// The internal horizontal bar, once attached.
    #[inline]
    pub fn horizontal_bar(&self) -> Option<WidgetId> {
        self.horizontal_bar
    }

    /// The internal vertical bar, once attached.
    #[inline]
    pub fn vertical_bar(&self) -> Option<WidgetId> {
        self.vertical_bar
    }

    /// The offset applied at the last layout.
    #[inline]
    pub fn scroll_offset(&self) -> Point {
        self.scroll
    }

    /// Wheel speed applied to the vertical bar.
    #[inline]
    pub fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }

    /// Set both bar policies.
    pub fn set_behavior(&mut self, horizontal: ScrollBehavior, vertical: ScrollBehavior) {
        self.horizontal = horizontal;
        self.vertical = vertical;
    }

    /// Scroll `panel` so the content offset is `(x, y)`, clamped.
    ///
    /// Fails with `InvalidArgument` if `panel` is not a scroll panel.
    pub fn scroll_to(cx: &mut EventContext<'_>, panel: WidgetId, x: i32, y: i32) -> TrellisResult<()> {
        let Some(scroll) = cx.tree().get_as::<ScrollPanel>(panel) else {
            return Err(TrellisError::invalid_argument(format!(
                "widget {panel:?} is not a scroll panel"
            )));
        };
        let bars = [(scroll.horizontal_bar, x), (scroll.vertical_bar, y)];
        for (bar, value) in bars {
            if let Some(bar) = bar.and_then(|bar| cx.tree_mut().get_as_mut::<ScrollBar>(bar)) {
                bar.set_value(value);
            }
        }
        cx.request_layout(panel);
        Ok(())
    }

    /// Size, range and show one bar; returns its value.
    fn place_bar(
        cx: &mut LayoutContext<'_>,
        bar: Option<WidgetId>,
        shown: bool,
        bounds: Rect,
        content: i32,
        window: i32,
    ) -> TrellisResult<i32> {
        let Some(bar) = bar.and_then(|bar| cx.get_as_mut::<ScrollBar>(bar)) else {
            return Ok(0);
        };
        bar.set_visible(shown);
        bar.set_location(bounds.x(), bounds.y());
        bar.set_size(bounds.width(), bounds.height())?;
        bar.set_range(content, window);
        Ok(bar.value())
    }
}

impl Widget for ScrollPanel {
    panel_widget_plumbing!();

    fn event(&mut self, event: &WidgetEvent, cx: &mut EventContext<'_>) -> EventResult {
        let WidgetEvent::MouseScroll { amount, .. } = *event else {
            return EventResult::Ignored;
        };
        let speed = self.scroll_speed;
        let Some(bar) = self
            .vertical_bar
            .and_then(|bar| cx.tree_mut().get_as_mut::<ScrollBar>(bar))
        else {
            return EventResult::Ignored;
        };
        if !bar.can_scroll() {
            return EventResult::Ignored;
        }
        bar.set_scroll_speed(speed);
        if bar.scroll_by(amount) {
            let panel = cx.id();
            cx.request_layout(panel);
        }
        EventResult::Handled
    }
}

impl Panel for ScrollPanel {
    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        if placement != Placement::Auto {
            return Err(unsupported("ScrollPanel", placement));
        }
        if self.content.is_some() {
            return Err(TrellisError::invalid_state("scroll panel already has content"));
        }
        child.set_location(0, 0);
        Ok(())
    }

    fn insertion_index(&self, _child_count: usize) -> usize {
        0
    }

    fn on_attached(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let horizontal = cx.add_internal(ScrollBar::new(Axis::Horizontal))?;
        let vertical = cx.add_internal(ScrollBar::new(Axis::Vertical))?;
        for bar in [horizontal, vertical] {
            if let Some(widget) = cx.child_mut(bar) {
                widget.set_visible(false);
            }
        }
        self.horizontal_bar = Some(horizontal);
        self.vertical_bar = Some(vertical);
        Ok(())
    }

    fn child_added(&mut self, child: WidgetId) {
        self.content = Some(child);
    }

    fn child_removed(&mut self, child: WidgetId) {
        if self.content == Some(child) {
            self.content = None;
        }
    }

    fn layout(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let (content_width, content_height) = match self.content {
            Some(content) => {
                cx.layout_child(content)?;
                cx.child(content)
                    .map_or((0, 0), |widget| (widget.width(), widget.height()))
            }
            None => (0, 0),
        };
        let (width, height) = (self.width(), self.height());
        let bar = SCROLL_BAR_SIZE;

        let mut show_vertical = self.vertical.shows(content_height > height);
        let show_horizontal = self
            .horizontal
            .shows(content_width > width - if show_vertical { bar } else { 0 });
        if !show_vertical {
            show_vertical = self
                .vertical
                .shows(content_height > height - if show_horizontal { bar } else { 0 });
        }
        let view_width = (width - if show_vertical { bar } else { 0 }).max(0);
        let view_height = (height - if show_horizontal { bar } else { 0 }).max(0);

        let scroll_x = Self::place_bar(
            cx,
            self.horizontal_bar,
            show_horizontal,
            Rect::new(0, (height - bar).max(0), view_width, bar)?,
            content_width,
            view_width,
        )?;
        let scroll_y = Self::place_bar(
            cx,
            self.vertical_bar,
            show_vertical,
            Rect::new((width - bar).max(0), 0, bar, view_height)?,
            content_height,
            view_height,
        )?;

        self.scroll = Point::new(scroll_x, scroll_y);
        if let Some(content) = self.content.and_then(|content| cx.child_mut(content)) {
            content.set_location(-scroll_x, -scroll_y);
        }
        tracing::trace!(
            target: targets::LAYOUT,
            scroll_x,
            scroll_y,
            show_horizontal,
            show_vertical,
            "scroll panel laid out"
        );
        Ok(())
    }

    /// The viewport keeps its own size whatever the content.
    fn expand_to_fit(&mut self, _child: Rect, _insets: Insets) {}

    fn clips_children(&self) -> bool {
        true
    }
}
