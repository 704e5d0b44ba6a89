//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the per-widget state every widget
//! embeds: local position, size, capability flags and visibility. Tree
//! relationships (parent, children, host) are not stored here; they belong
//! to the [`WidgetTree`](super::WidgetTree) arena node that holds the widget.

use trellis_core::{Point, Rect, Size, TrellisResult};

/// The base state shared by all widgets.
///
/// Widget implementations include this as a field and return it from
/// [`Widget::widget_base`](super::Widget::widget_base); the default methods
/// of the `Widget` trait read and write it.
///
/// # Example
///
/// ```
/// use trellis::widget::{Widget, WidgetBase};
///
/// struct Swatch {
///     base: WidgetBase,
/// }
///
/// impl Widget for Swatch {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
/// }
///
/// let mut swatch = Swatch { base: WidgetBase::new() };
/// swatch.set_size(18, 18)?;
/// assert!(swatch.is_within_bounds(17, 0));
/// assert!(!swatch.is_within_bounds(18, 0));
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetBase {
    /// Position relative to the parent's origin.
    position: Point,

    /// Width and height, never negative.
    size: Size,

    /// Whether containers may size this widget.
    resizable: bool,

    /// Whether the widget can hold keyboard focus.
    focusable: bool,

    /// Whether the widget is painted, hit-tested and focus-cycled.
    visible: bool,

    /// Whether the pointer is currently over this widget.
    hovered: bool,
}

impl WidgetBase {
    /// Create a new widget base: zero-sized at the origin, visible, neither
    /// resizable nor focusable.
    pub fn new() -> Self {
        Self {
            position: Point::ZERO,
            size: Size::ZERO,
            resizable: false,
            focusable: false,
            visible: true,
            hovered: false,
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Local position.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Set the local position. No constraints apply.
    #[inline]
    pub fn set_location(&mut self, x: i32, y: i32) {
        self.position = Point::new(x, y);
    }

    /// The size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the size.
    ///
    /// Fails with `InvalidArgument` on a negative extent, leaving the size
    /// unchanged.
    pub fn set_size(&mut self, width: i32, height: i32) -> TrellisResult<()> {
        self.size = Size::new(width, height)?;
        Ok(())
    }

    /// Grow the size so it is at least `width` by `height`. Never shrinks.
    pub fn expand_to(&mut self, width: i32, height: i32) {
        self.size = self.size.max(Size::new(width.max(0), height.max(0)).unwrap_or_default());
    }

    /// The bounding box in the parent's coordinate space.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Check whether containers may resize this widget.
    #[inline]
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Set whether containers may resize this widget.
    #[inline]
    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    /// Check whether the widget can hold keyboard focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Set whether the widget can hold keyboard focus.
    #[inline]
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    // =========================================================================
    // Visibility & hover
    // =========================================================================

    /// Check whether the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the widget.
    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check whether the pointer is over the widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state. Maintained by the input dispatcher.
    #[inline]
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}
