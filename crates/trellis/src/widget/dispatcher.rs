//! Input dispatch for widget trees.
//!
//! [`InputDispatcher`] turns raw pointer and keyboard input into widget
//! events. One dispatcher exists per rendered screen and carries the state
//! of the current gesture across calls.
//!
//! # Event Flow
//!
//! Pointer input arrives in the root panel's parent coordinate space:
//!
//! 1. **Hit-test**: the root resolves the point to its most specific
//!    visible widget. Points outside the root resolve to the root itself.
//! 2. **Bubbling**: the event is delivered to that widget in its local
//!    coordinates; while the result is [`EventResult::Ignored`] it is
//!    retried on each ancestor, re-based into the ancestor's space.
//! 3. **Host requests**: focus and relayout requests queued by handlers are
//!    applied once delivery finishes.
//!
//! Keyboard input skips hit-testing and goes straight to the focused
//! widget.
//!
//! # Gestures
//!
//! The widget that received a mouse-down becomes the *last responder*. Drag
//! and release events go to it even when the pointer has left its bounds,
//! and a release inside the screen also produces a click along the same
//! bubble path.

use trellis_core::logging::targets;
use trellis_core::{Point, TrellisError, TrellisResult, WidgetId};

use super::events::{EventResult, Key, KeyboardModifiers, MouseButton, WidgetEvent};
use crate::host::Host;

/// Routes raw input for one screen.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputDispatcher {
    /// The widget that received the current gesture's mouse-down.
    last_responder: Option<WidgetId>,
    /// The widget currently under the pointer.
    hovered: Option<WidgetId>,
}

impl InputDispatcher {
    /// Create a dispatcher with no gesture in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget tracking the current gesture.
    #[inline]
    pub fn last_responder(&self) -> Option<WidgetId> {
        self.last_responder
    }

    /// The widget under the pointer.
    #[inline]
    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// A mouse button was pressed.
    ///
    /// Releases focus when the press lands outside the focused widget. The
    /// first press of a gesture hit-tests and records the responder; further
    /// presses before the release reuse it.
    pub fn on_mouse_down(
        &mut self,
        host: &mut Host,
        x: i32,
        y: i32,
        button: MouseButton,
    ) -> TrellisResult<EventResult> {
        let root = root_of(host)?;
        let point = Point::new(x, y);

        if let Some(focused) = host.focused() {
            let inside = host
                .tree()
                .absolute_bounds(focused)
                .is_ok_and(|bounds| self.within(host, focused, bounds.origin(), point));
            if !inside {
                host.release_focus(focused)?;
            }
        }

        let target = match self.live_responder(host) {
            Some(responder) => responder,
            None => {
                let target = hit(host, root, point)?;
                self.last_responder = Some(target);
                target
            }
        };
        tracing::trace!(target: targets::INPUT, ?target, x, y, ?button, "mouse down");

        let result = bubble(host, target, point, WidgetEvent::MouseDown { x, y, button })?;
        host.flush()?;
        Ok(result)
    }

    /// The pointer moved with a button held.
    pub fn on_mouse_drag(
        &mut self,
        host: &mut Host,
        x: i32,
        y: i32,
        button: MouseButton,
        delta_x: f64,
        delta_y: f64,
    ) -> TrellisResult<EventResult> {
        let root = root_of(host)?;
        let point = Point::new(x, y);
        let target = match self.live_responder(host) {
            Some(responder) => responder,
            None => hit(host, root, point)?,
        };

        let event = WidgetEvent::MouseDrag {
            x,
            y,
            button,
            delta_x,
            delta_y,
        };
        let result = bubble(host, target, point, event)?;
        host.flush()?;
        Ok(result)
    }

    /// A mouse button was released.
    ///
    /// With a gesture in progress, `MouseUp` bubbles from the responder and,
    /// if the release is within the root's bounds, `Click` follows along
    /// the same path. The gesture always ends here.
    pub fn on_mouse_up(
        &mut self,
        host: &mut Host,
        x: i32,
        y: i32,
        button: MouseButton,
    ) -> TrellisResult<EventResult> {
        let root = root_of(host)?;
        let point = Point::new(x, y);
        let responder = self.live_responder(host);
        self.last_responder = None;

        let result = match responder {
            Some(target) => {
                let up = bubble(host, target, point, WidgetEvent::MouseUp { x, y, button })?;
                let in_viewport = host
                    .tree()
                    .widget(root)
                    .is_some_and(|widget| widget.bounds().contains(point));
                if in_viewport {
                    tracing::trace!(target: targets::INPUT, ?target, x, y, "click");
                    up.or(bubble(host, target, point, WidgetEvent::Click { x, y, button })?)
                } else {
                    up
                }
            }
            None => {
                let target = hit(host, root, point)?;
                bubble(host, target, point, WidgetEvent::MouseUp { x, y, button })?
            }
        };
        host.flush()?;
        Ok(result)
    }

    /// The pointer moved with no button held.
    ///
    /// Bubbles `MouseMove` from the widget under the pointer, then moves the
    /// hover state: the previous widget gets `HoverExit`, the new one
    /// `HoverEnter`.
    pub fn on_mouse_move(&mut self, host: &mut Host, x: i32, y: i32) -> TrellisResult<EventResult> {
        let root = root_of(host)?;
        let point = Point::new(x, y);
        let target = hit(host, root, point)?;
        let result = bubble(host, target, point, WidgetEvent::MouseMove { x, y })?;

        let previous = self.hovered.filter(|&id| host.tree().contains(id));
        if previous != Some(target) {
            if let Some(old) = previous {
                set_hovered(host, old, false);
                host.send_event(old, &WidgetEvent::HoverExit)?;
            }
            set_hovered(host, target, true);
            host.send_event(target, &WidgetEvent::HoverEnter)?;
            self.hovered = Some(target);
        }

        host.flush()?;
        Ok(result)
    }

    /// The scroll wheel turned over the screen.
    pub fn on_mouse_scroll(
        &mut self,
        host: &mut Host,
        x: i32,
        y: i32,
        amount: f64,
    ) -> TrellisResult<EventResult> {
        let root = root_of(host)?;
        let point = Point::new(x, y);
        let target = hit(host, root, point)?;
        let result = bubble(host, target, point, WidgetEvent::MouseScroll { x, y, amount })?;
        host.flush()?;
        Ok(result)
    }

    // =========================================================================
    // Keyboard input
    // =========================================================================

    /// A key was pressed.
    ///
    /// Delivered to the focused widget only. When it ignores Tab (or nothing
    /// is focused) and the host allows it, Tab cycles focus forward and
    /// Shift+Tab backward.
    pub fn on_key_pressed(
        &mut self,
        host: &mut Host,
        key: Key,
        modifiers: KeyboardModifiers,
    ) -> TrellisResult<EventResult> {
        let result = self.deliver_to_focus(host, WidgetEvent::KeyPressed { key, modifiers })?;
        if result.is_handled() || key != Key::Tab || !host.config().tab_cycles_focus {
            return Ok(result);
        }
        let moved = host.cycle_focus(!modifiers.shift)?;
        Ok(EventResult::from(moved.is_some()))
    }

    /// A key was released.
    pub fn on_key_released(
        &mut self,
        host: &mut Host,
        key: Key,
        modifiers: KeyboardModifiers,
    ) -> TrellisResult<EventResult> {
        self.deliver_to_focus(host, WidgetEvent::KeyReleased { key, modifiers })
    }

    /// A character was typed.
    pub fn on_char_typed(&mut self, host: &mut Host, ch: char) -> TrellisResult<EventResult> {
        self.deliver_to_focus(host, WidgetEvent::CharTyped { ch })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn deliver_to_focus(&mut self, host: &mut Host, event: WidgetEvent) -> TrellisResult<EventResult> {
        let Some(focused) = host.focused().filter(|&id| host.tree().contains(id)) else {
            tracing::trace!(target: targets::INPUT, %event, "no focused widget");
            return Ok(EventResult::Ignored);
        };
        let result = host.send_event(focused, &event)?;
        host.flush()?;
        Ok(result)
    }

    fn live_responder(&self, host: &Host) -> Option<WidgetId> {
        self.last_responder.filter(|&id| host.tree().contains(id))
    }

    fn within(&self, host: &Host, id: WidgetId, origin: Point, point: Point) -> bool {
        host.tree()
            .widget(id)
            .is_some_and(|widget| widget.is_within_bounds(point.x - origin.x, point.y - origin.y))
    }
}

fn root_of(host: &Host) -> TrellisResult<WidgetId> {
    host.root()
        .ok_or_else(|| TrellisError::invalid_state("input dispatched to a host without a root panel"))
}

/// Hit-test from the root with a point in the root's parent space.
fn hit(host: &Host, root: WidgetId, point: Point) -> TrellisResult<WidgetId> {
    let origin = host.tree().absolute_position(root)?;
    Ok(host.tree().hit(root, point.x - origin.x, point.y - origin.y))
}

fn bubble(host: &mut Host, target: WidgetId, point: Point, event: WidgetEvent) -> TrellisResult<EventResult> {
    let (tree, focus) = host.split_mut();
    tree.bubble_event(focus, target, point, &event)
}

fn set_hovered(host: &mut Host, id: WidgetId, hovered: bool) {
    if let Some(widget) = host.tree_mut().widget_mut(id) {
        widget.widget_base_mut().set_hovered(hovered);
    }
}
