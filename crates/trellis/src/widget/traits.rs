//! Core widget trait definitions.
//!
//! # Key Types
//!
//! - [`Widget`] - Base trait for all UI elements
//! - [`Panel`] - Capability trait for widgets that own and arrange children
//! - [`Placement`] - How a child is positioned when added to a panel
//! - [`PaintContext`] - Rendering context passed to [`Widget::paint`]

use std::any::Any;

use trellis_core::{Insets, Rect, TrellisResult, WidgetId};
use trellis_render::{Color, Renderer};

use super::base::WidgetBase;
use super::events::{EventResult, WidgetEvent};
use super::painting::BackgroundPainter;
use super::tree::{EventContext, LayoutContext};

/// Context provided during widget painting.
///
/// Wraps the render backend together with the per-frame state widgets need
/// to pick their look: the dark-mode flag and which widget holds focus.
pub struct PaintContext<'a> {
    /// The renderer to draw with.
    renderer: &'a mut dyn Renderer,
    /// Whether the session paints its dark variant.
    dark_mode: bool,
    /// The focused widget, if any.
    focused: Option<WidgetId>,
    /// The widget currently being painted.
    current: Option<WidgetId>,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut dyn Renderer) -> Self {
        Self {
            renderer,
            dark_mode: false,
            focused: None,
            current: None,
        }
    }

    /// Set the dark mode flag (builder pattern).
    #[inline]
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// Set the focused widget (builder pattern).
    #[inline]
    pub fn with_focused(mut self, focused: Option<WidgetId>) -> Self {
        self.focused = focused;
        self
    }

    /// Get the renderer.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Check whether the dark variant is being painted.
    #[inline]
    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Check whether the widget being painted holds focus.
    #[inline]
    pub fn should_show_focus(&self) -> bool {
        self.current.is_some() && self.current == self.focused
    }

    /// The default text color for the current mode.
    #[inline]
    pub fn text_color(&self) -> Color {
        if self.dark_mode {
            Color::TEXT_DARK
        } else {
            Color::TEXT
        }
    }

    pub(crate) fn set_current(&mut self, id: WidgetId) {
        self.current = Some(id);
    }

    /// Fill a rectangle. Empty or negative areas draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        if width <= 0 || height <= 0 {
            return;
        }
        if let Ok(rect) = Rect::new(x, y, width, height) {
            self.renderer.fill_rect(rect, color);
        }
    }

    /// Draw a line of text with its top-left corner at `(x, y)`.
    #[inline]
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.renderer.draw_text(text, x, y, color);
    }

    /// Width of `text` as the backend measures it.
    #[inline]
    pub fn text_width(&self, text: &str) -> i32 {
        self.renderer.text_width(text)
    }

    /// Draw the standard focus outline around a widget's box.
    pub fn draw_focus_indicator(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if let Ok(rect) = Rect::new(x, y, width.max(0), height.max(0)) {
            self.renderer.stroke_rect(rect, Color::HIGHLIGHT);
        }
    }
}

/// The core trait for all widgets.
///
/// A widget owns nothing but its own state. Parent, children and host live
/// in the [`WidgetTree`](super::WidgetTree) node that holds the widget, and
/// the tree drives every recursive operation (validation, layout, paint,
/// hit-testing, focus cycling). Concrete types are recovered from a
/// `&dyn Widget` through [`Any`].
///
/// # Required Methods
///
/// - [`widget_base`](Self::widget_base) / [`widget_base_mut`](Self::widget_base_mut)
///
/// Everything else has a default that reads or writes the base.
pub trait Widget: Any {
    /// Get a reference to the widget's base state.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base state.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The concrete type name, for debug output.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Set the local position. No constraints, no side effects.
    fn set_location(&mut self, x: i32, y: i32) {
        self.widget_base_mut().set_location(x, y);
    }

    /// Set the size.
    ///
    /// Fails with `InvalidArgument` on a negative extent. This is the main
    /// per-widget customization hook: single-line controls override it to
    /// force their height.
    fn set_size(&mut self, width: i32, height: i32) -> TrellisResult<()> {
        self.widget_base_mut().set_size(width, height)
    }

    /// Local x position.
    fn x(&self) -> i32 {
        self.widget_base().position().x
    }

    /// Local y position.
    fn y(&self) -> i32 {
        self.widget_base().position().y
    }

    /// Width.
    fn width(&self) -> i32 {
        self.widget_base().size().width()
    }

    /// Height.
    fn height(&self) -> i32 {
        self.widget_base().size().height()
    }

    /// Bounding box in the parent's coordinate space.
    fn bounds(&self) -> Rect {
        self.widget_base().bounds()
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Check whether a container may size this widget.
    fn can_resize(&self) -> bool {
        self.widget_base().is_resizable()
    }

    /// Check whether this widget can hold keyboard focus.
    fn can_focus(&self) -> bool {
        self.widget_base().is_focusable()
    }

    /// Check whether the widget takes part in paint, hit-testing and focus
    /// cycling.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Show or hide the widget.
    fn set_visible(&mut self, visible: bool) {
        self.widget_base_mut().set_visible(visible);
    }

    /// Local-space containment test.
    ///
    /// Defaults to `0 <= x < width && 0 <= y < height`. Widgets with a
    /// non-rectangular active region override this.
    fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    // =========================================================================
    // Behavior
    // =========================================================================

    /// Paint the widget itself at `(x, y)` in target space.
    ///
    /// `mouse_x`/`mouse_y` are the pointer position in the widget's local
    /// space. Children are painted by the tree afterwards.
    fn paint(&self, _ctx: &mut PaintContext<'_>, _x: i32, _y: i32, _mouse_x: i32, _mouse_y: i32) {}

    /// Handle an event.
    ///
    /// Returning [`EventResult::Ignored`] lets a pointer event bubble to the
    /// parent.
    fn event(&mut self, _event: &WidgetEvent, _cx: &mut EventContext<'_>) -> EventResult {
        EventResult::Ignored
    }

    /// Per-frame update hook.
    fn tick(&mut self) {}

    // =========================================================================
    // Capability queries
    // =========================================================================

    /// This widget as a panel, if it is one.
    fn as_panel(&self) -> Option<&dyn Panel> {
        None
    }

    /// This widget as a mutable panel, if it is one.
    fn as_panel_mut(&mut self) -> Option<&mut dyn Panel> {
        None
    }
}

/// How a child is positioned when added to a panel.
///
/// Each panel understands a subset of these and rejects the rest with
/// `InvalidArgument`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Let the panel decide.
    #[default]
    Auto,
    /// A fixed local position; size untouched.
    At {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
    },
    /// A fixed local position and, for resizable children, a size.
    Bounds {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// Width applied to resizable children.
        width: i32,
        /// Height applied to resizable children.
        height: i32,
    },
    /// A grid cell and span.
    Cell {
        /// Column index.
        column: i32,
        /// Row index.
        row: i32,
        /// Columns spanned.
        width: i32,
        /// Rows spanned.
        height: i32,
    },
    /// Panel-chosen position with an explicit size for resizable children.
    Sized {
        /// Width applied to resizable children.
        width: i32,
        /// Height applied to resizable children.
        height: i32,
    },
}

impl Placement {
    /// A single grid cell.
    pub const fn cell(column: i32, row: i32) -> Self {
        Self::Cell {
            column,
            row,
            width: 1,
            height: 1,
        }
    }
}

/// Capability trait for widgets that own and arrange children.
///
/// A panel is reached through [`Widget::as_panel`]. The tree calls the hooks
/// below at fixed points:
///
/// 1. [`place_child`](Self::place_child) and
///    [`insertion_index`](Self::insertion_index) when a child is added,
///    followed by [`expand_to_fit`](Self::expand_to_fit) and
///    [`child_added`](Self::child_added)
/// 2. [`on_attached`](Self::on_attached) once the panel itself is in a tree
/// 3. [`validate`](Self::validate) then [`layout`](Self::layout) during
///    validation, and `layout` again whenever a relayout is requested
pub trait Panel: Widget {
    /// Padding between the panel's edges and its children.
    fn insets(&self) -> Insets {
        Insets::NONE
    }

    /// The painter drawn before the panel's children.
    fn background(&self) -> Option<BackgroundPainter> {
        None
    }

    /// Apply this panel's positioning and sizing policy to a new child.
    ///
    /// Resizable children are sized by the policy; others keep their size.
    /// Fails with `InvalidArgument` for a placement the panel does not
    /// understand.
    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()>;

    /// Where in the child list a new child lands.
    fn insertion_index(&self, child_count: usize) -> usize {
        child_count
    }

    /// Called once after the panel is inserted into a tree.
    fn on_attached(&mut self, _cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        Ok(())
    }

    /// Called after a child added through [`place_child`](Self::place_child)
    /// has its id.
    fn child_added(&mut self, _child: WidgetId) {}

    /// Called after a child was removed from the tree.
    fn child_removed(&mut self, _child: WidgetId) {}

    /// Check the preconditions for layout.
    fn validate(&mut self, _cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        Ok(())
    }

    /// Arrange the children.
    ///
    /// The default lays out every child panel and grows to fit each child
    /// at the position it was given when added.
    fn layout(&mut self, cx: &mut LayoutContext<'_>) -> TrellisResult<()> {
        let insets = self.insets();
        for child in cx.children() {
            cx.layout_child(child)?;
            if let Some(bounds) = cx.child_bounds(child) {
                self.expand_to_fit(bounds, insets);
            }
        }
        Ok(())
    }

    /// Grow so that `child` plus the right/bottom insets fits. Never shrinks.
    fn expand_to_fit(&mut self, child: Rect, insets: Insets) {
        self.widget_base_mut()
            .expand_to(child.right() + insets.right(), child.bottom() + insets.bottom());
    }

    /// Check whether painting clips children to the panel's box.
    fn clips_children(&self) -> bool {
        false
    }
}

/// Implements the `Widget` plumbing shared by every panel: base access and
/// the `as_panel` capability queries.
macro_rules! panel_widget_plumbing {
    () => {
        fn widget_base(&self) -> &$crate::widget::WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut $crate::widget::WidgetBase {
            &mut self.base
        }

        fn as_panel(&self) -> Option<&dyn $crate::widget::Panel> {
            Some(self)
        }

        fn as_panel_mut(&mut self) -> Option<&mut dyn $crate::widget::Panel> {
            Some(self)
        }
    };
}

pub(crate) use panel_widget_plumbing;
