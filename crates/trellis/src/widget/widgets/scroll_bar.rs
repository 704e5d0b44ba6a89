//! ScrollBar widget implementation.
//!
//! A [`ScrollBar`] controls one axis of a scrolled view. Its state is three
//! integers:
//!
//! - `max_value`: the length of the content
//! - `window`: the length of the visible part
//! - `value`: the offset of the visible part, clamped to
//!   `0..=max(max_value - window, 0)`
//!
//! The thumb is drawn proportional to `window / max_value`. Pressing the
//! track pages by one window; dragging the thumb maps pointer travel to value
//! travel; the scroll wheel moves by `scroll_speed` per unit. Every change
//! asks the parent panel to lay out again, so a
//! [`ScrollPanel`](crate::widget::layout::ScrollPanel) picks up the new offset.

use trellis_core::{Axis, Rect};
use trellis_render::Color;

use crate::widget::{
    EventContext, EventResult, MouseButton, PaintContext, Widget, WidgetBase, WidgetEvent,
};

/// Smallest thumb length in pixels.
const MIN_THUMB: i32 = 6;

/// Default value change per scroll-wheel unit.
pub const DEFAULT_SCROLL_SPEED: i32 = 4;

/// Which part of the bar a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Thumb,
    TrackBefore,
    TrackAfter,
}

/// A scroll bar along one axis.
#[derive(Debug, Clone)]
pub struct ScrollBar {
    base: WidgetBase,
    axis: Axis,
    value: i32,
    max_value: i32,
    window: i32,
    scroll_speed: i32,
    /// Pointer position and value when the thumb drag started.
    drag: Option<(i32, i32)>,
    track_color: Color,
    thumb_color: Color,
}

impl ScrollBar {
    /// An empty bar: nothing to scroll.
    pub fn new(axis: Axis) -> Self {
        let mut base = WidgetBase::new();
        base.set_resizable(true);
        Self {
            base,
            axis,
            value: 0,
            max_value: 0,
            window: 0,
            scroll_speed: DEFAULT_SCROLL_SPEED,
            drag: None,
            track_color: Color::from_argb(0xFF8B_8B8B),
            thumb_color: Color::from_argb(0xFFC6_C6C6),
        }
    }

    /// Set the range (builder pattern).
    pub fn with_range(mut self, max_value: i32, window: i32) -> Self {
        self.set_range(max_value, window);
        self
    }

    /// Set the wheel speed (builder pattern).
    pub fn with_scroll_speed(mut self, speed: i32) -> Self {
        self.scroll_speed = speed;
        self
    }

    /// The axis the bar scrolls.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The current offset.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// The content length.
    #[inline]
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// The visible length.
    #[inline]
    pub fn window(&self) -> i32 {
        self.window
    }

    /// The wheel speed.
    #[inline]
    pub fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }

    /// Set the wheel speed.
    pub fn set_scroll_speed(&mut self, speed: i32) {
        self.scroll_speed = speed;
    }

    /// The largest reachable value.
    #[inline]
    pub fn travel(&self) -> i32 {
        (self.max_value - self.window).max(0)
    }

    /// Check whether the content is longer than the window.
    #[inline]
    pub fn can_scroll(&self) -> bool {
        self.travel() > 0
    }

    /// Set content and window length. The value is re-clamped.
    pub fn set_range(&mut self, max_value: i32, window: i32) {
        self.max_value = max_value.max(0);
        self.window = window.max(0);
        self.value = self.value.clamp(0, self.travel());
    }

    /// Set the offset, clamped to the travel range. Returns whether it
    /// changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(0, self.travel());
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Scroll by wheel units; positive amounts scroll toward the start.
    pub fn scroll_by(&mut self, amount: f64) -> bool {
        let delta = (amount * f64::from(self.scroll_speed)).round() as i32;
        self.set_value(self.value - delta)
    }

    fn along(&self, x: i32, y: i32) -> i32 {
        self.axis.choose(x, y)
    }

    fn track_length(&self) -> i32 {
        self.along(self.width(), self.height())
    }

    /// (start, length) of the thumb along the axis.
    fn thumb(&self) -> (i32, i32) {
        let track = self.track_length();
        if self.max_value <= 0 || !self.can_scroll() {
            return (0, track);
        }
        let length = (i64::from(track) * i64::from(self.window) / i64::from(self.max_value)) as i32;
        let length = length.clamp(MIN_THUMB.min(track), track);
        let free = track - length;
        let start = (i64::from(self.value) * i64::from(free) / i64::from(self.travel())) as i32;
        (start, length)
    }

    fn part_at(&self, x: i32, y: i32) -> Part {
        let (start, length) = self.thumb();
        let position = self.along(x, y);
        if position < start {
            Part::TrackBefore
        } else if position >= start + length {
            Part::TrackAfter
        } else {
            Part::Thumb
        }
    }

    /// Value reached by dragging the thumb `delta` pixels from `origin`.
    fn drag_value(&self, origin: i32, delta: i32) -> i32 {
        let (_, length) = self.thumb();
        let free = self.track_length() - length;
        if free <= 0 {
            return origin;
        }
        origin + (i64::from(delta) * i64::from(self.travel()) / i64::from(free)) as i32
    }

    fn changed(&self, cx: &mut EventContext<'_>) {
        if let Some(parent) = cx.parent() {
            cx.request_layout(parent);
        }
    }
}

impl Widget for ScrollBar {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mouse_x: i32, _mouse_y: i32) {
        ctx.fill_rect(x, y, self.width(), self.height(), self.track_color);
        let (start, length) = self.thumb();
        let thumb = match self.axis {
            Axis::Horizontal => Rect::new(x + start, y, length, self.height()),
            Axis::Vertical => Rect::new(x, y + start, self.width(), length),
        };
        if let Ok(thumb) = thumb {
            ctx.fill_rect(thumb.x(), thumb.y(), thumb.width(), thumb.height(), self.thumb_color);
        }
    }

    fn event(&mut self, event: &WidgetEvent, cx: &mut EventContext<'_>) -> EventResult {
        match *event {
            WidgetEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                let changed = match self.part_at(x, y) {
                    Part::Thumb => {
                        self.drag = Some((self.along(x, y), self.value));
                        false
                    }
                    Part::TrackBefore => self.set_value(self.value - self.window),
                    Part::TrackAfter => self.set_value(self.value + self.window),
                };
                if changed {
                    self.changed(cx);
                }
                EventResult::Handled
            }
            WidgetEvent::MouseDrag { x, y, .. } => {
                let Some((origin, start_value)) = self.drag else {
                    return EventResult::Ignored;
                };
                let target = self.drag_value(start_value, self.along(x, y) - origin);
                if self.set_value(target) {
                    self.changed(cx);
                }
                EventResult::Handled
            }
            WidgetEvent::MouseUp { .. } => {
                if self.drag.take().is_some() {
                    EventResult::Handled
                } else {
                    EventResult::Ignored
                }
            }
            WidgetEvent::MouseScroll { amount, .. } => {
                if !self.can_scroll() {
                    return EventResult::Ignored;
                }
                if self.scroll_by(amount) {
                    self.changed(cx);
                }
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{FocusManager, HostRequest, WidgetTree};

    fn bar(length: i32) -> ScrollBar {
        let mut bar = ScrollBar::new(Axis::Vertical).with_range(200, 50);
        bar.set_size(8, length).unwrap();
        bar
    }

    #[test]
    fn test_value_is_clamped_to_travel() {
        let mut bar = bar(100);
        assert!(bar.set_value(500));
        assert_eq!(bar.value(), 150);
        assert!(bar.set_value(-3));
        assert_eq!(bar.value(), 0);
        assert!(!bar.set_value(0));

        bar.set_value(150);
        bar.set_range(120, 50);
        assert_eq!(bar.value(), 70);
        bar.set_range(10, 50);
        assert_eq!(bar.value(), 0);
        assert!(!bar.can_scroll());
    }

    #[test]
    fn test_thumb_proportional() {
        let mut bar = bar(100);
        assert_eq!(bar.thumb(), (0, 25));
        bar.set_value(150);
        assert_eq!(bar.thumb(), (75, 25));
    }

    #[test]
    fn test_track_press_pages_and_requests_layout() {
        let mut tree = WidgetTree::new();
        let panel = tree.insert(crate::widget::layout::PlainPanel::new());
        let id = tree.add(panel, bar(100), crate::widget::Placement::Auto).unwrap();
        let focus = FocusManager::new();

        let press = WidgetEvent::MouseDown { x: 2, y: 90, button: MouseButton::Left };
        assert!(tree.send_event(&focus, id, &press).unwrap().is_handled());
        assert_eq!(tree.get_as::<ScrollBar>(id).unwrap().value(), 50);
        assert_eq!(tree.take_requests(), vec![HostRequest::Relayout(panel)]);
    }

    #[test]
    fn test_thumb_drag_maps_travel() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(bar(100));
        let focus = FocusManager::new();

        let press = WidgetEvent::MouseDown { x: 2, y: 5, button: MouseButton::Left };
        tree.send_event(&focus, id, &press).unwrap();
        let drag = WidgetEvent::MouseDrag {
            x: 2,
            y: 30,
            button: MouseButton::Left,
            delta_x: 0.0,
            delta_y: 25.0,
        };
        tree.send_event(&focus, id, &drag).unwrap();
        // 25 of 75 free pixels is a third of 150.
        assert_eq!(tree.get_as::<ScrollBar>(id).unwrap().value(), 50);

        let release = WidgetEvent::MouseUp { x: 2, y: 30, button: MouseButton::Left };
        assert!(tree.send_event(&focus, id, &release).unwrap().is_handled());
        assert!(!tree.send_event(&focus, id, &drag).unwrap().is_handled());
    }

    #[test]
    fn test_wheel_scrolls_by_speed() {
        let mut bar = bar(100);
        bar.set_value(20);
        assert!(bar.scroll_by(1.0));
        assert_eq!(bar.value(), 16);
        assert!(bar.scroll_by(-2.0));
        assert_eq!(bar.value(), 24);
    }
}
