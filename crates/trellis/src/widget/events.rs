//! Widget event types.
//!
//! Every notification a widget can receive arrives through
//! [`Widget::event`](super::Widget::event) as one [`WidgetEvent`]. Pointer
//! events carry coordinates in the receiving widget's local space; the
//! dispatcher re-bases them for every ancestor while bubbling.

use std::fmt;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    #[inline]
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
    /// Any other button, by backend code.
    Other(u16),
}

/// Keys the toolkit itself reacts to.
///
/// Printable input arrives separately as [`WidgetEvent::CharTyped`]; keys
/// without a named variant are passed through as [`Key::Other`] with the
/// backend's key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab.
    Tab,
    /// Enter or Return.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Space bar.
    Space,
    /// Any other key, by backend key code.
    Other(u32),
}

/// The outcome of delivering an event to one widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventResult {
    /// The widget consumed the event; bubbling stops.
    Handled,
    /// The widget did not use the event.
    #[default]
    Ignored,
}

impl EventResult {
    /// Check if the event was consumed.
    #[inline]
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }

    /// `Handled` if either result is.
    #[inline]
    pub fn or(self, other: Self) -> Self {
        if self.is_handled() { self } else { other }
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled { Self::Handled } else { Self::Ignored }
    }
}

/// An event delivered to a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A mouse button was pressed over the widget.
    MouseDown {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// The pressed button.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseUp {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// The released button.
        button: MouseButton,
    },
    /// A press and release completed inside the screen.
    Click {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// The clicked button.
        button: MouseButton,
    },
    /// The pointer moved while a button was held.
    MouseDrag {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// The held button.
        button: MouseButton,
        /// Horizontal movement since the last drag event.
        delta_x: f64,
        /// Vertical movement since the last drag event.
        delta_y: f64,
    },
    /// The pointer moved with no button held.
    MouseMove {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
    },
    /// The scroll wheel turned. Positive amounts scroll up.
    MouseScroll {
        /// Local x.
        x: i32,
        /// Local y.
        y: i32,
        /// Signed scroll amount.
        amount: f64,
    },
    /// The pointer entered the widget.
    HoverEnter,
    /// The pointer left the widget.
    HoverExit,
    /// A key was pressed while the widget had focus.
    KeyPressed {
        /// The key.
        key: Key,
        /// Held modifiers.
        modifiers: KeyboardModifiers,
    },
    /// A key was released while the widget had focus.
    KeyReleased {
        /// The key.
        key: Key,
        /// Held modifiers.
        modifiers: KeyboardModifiers,
    },
    /// A character was typed while the widget had focus.
    CharTyped {
        /// The character.
        ch: char,
    },
    /// The widget became the focus holder.
    FocusGained,
    /// The widget stopped being the focus holder.
    FocusLost,
    /// The widget became the visible card of a card panel.
    Shown,
    /// The widget stopped being the visible card of a card panel.
    Hidden,
}

impl WidgetEvent {
    /// Check whether an unhandled event is retried on the parent.
    ///
    /// Pointer events bubble; keyboard, focus, hover and visibility
    /// notifications are delivered to their target only.
    pub fn should_bubble(&self) -> bool {
        matches!(
            self,
            Self::MouseDown { .. }
                | Self::MouseUp { .. }
                | Self::Click { .. }
                | Self::MouseDrag { .. }
                | Self::MouseMove { .. }
                | Self::MouseScroll { .. }
        )
    }

    /// The local pointer position, for pointer events.
    pub fn position(&self) -> Option<(i32, i32)> {
        match *self {
            Self::MouseDown { x, y, .. }
            | Self::MouseUp { x, y, .. }
            | Self::Click { x, y, .. }
            | Self::MouseDrag { x, y, .. }
            | Self::MouseMove { x, y }
            | Self::MouseScroll { x, y, .. } => Some((x, y)),
            _ => None,
        }
    }

    /// The same event with its pointer position replaced.
    ///
    /// Used when re-basing a bubbling event into an ancestor's space.
    /// Non-pointer events are returned unchanged.
    pub fn at(&self, new_x: i32, new_y: i32) -> Self {
        let mut event = self.clone();
        match &mut event {
            Self::MouseDown { x, y, .. }
            | Self::MouseUp { x, y, .. }
            | Self::Click { x, y, .. }
            | Self::MouseDrag { x, y, .. }
            | Self::MouseMove { x, y }
            | Self::MouseScroll { x, y, .. } => {
                *x = new_x;
                *y = new_y;
            }
            _ => {}
        }
        event
    }

    /// A short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MouseDown { .. } => "mouse-down",
            Self::MouseUp { .. } => "mouse-up",
            Self::Click { .. } => "click",
            Self::MouseDrag { .. } => "mouse-drag",
            Self::MouseMove { .. } => "mouse-move",
            Self::MouseScroll { .. } => "mouse-scroll",
            Self::HoverEnter => "hover-enter",
            Self::HoverExit => "hover-exit",
            Self::KeyPressed { .. } => "key-pressed",
            Self::KeyReleased { .. } => "key-released",
            Self::CharTyped { .. } => "char-typed",
            Self::FocusGained => "focus-gained",
            Self::FocusLost => "focus-lost",
            Self::Shown => "shown",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for WidgetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position() {
            Some((x, y)) => write!(f, "{} at ({x}, {y})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_events_bubble() {
        let down = WidgetEvent::MouseDown {
            x: 1,
            y: 2,
            button: MouseButton::Left,
        };
        assert!(down.should_bubble());
        assert!(!WidgetEvent::FocusGained.should_bubble());
        assert!(
            !WidgetEvent::KeyPressed {
                key: Key::Tab,
                modifiers: KeyboardModifiers::NONE
            }
            .should_bubble()
        );
    }

    #[test]
    fn test_rebase_position() {
        let scroll = WidgetEvent::MouseScroll {
            x: 10,
            y: 10,
            amount: -1.0,
        };
        let moved = scroll.at(3, 4);
        assert_eq!(moved.position(), Some((3, 4)));
        assert_eq!(WidgetEvent::Shown.at(1, 1), WidgetEvent::Shown);
        assert_eq!(moved.to_string(), "mouse-scroll at (3, 4)");
    }

    #[test]
    fn test_event_result() {
        assert!(EventResult::from(true).is_handled());
        assert_eq!(
            EventResult::Ignored.or(EventResult::Handled),
            EventResult::Handled
        );
        assert_eq!(EventResult::default(), EventResult::Ignored);
        assert!(KeyboardModifiers::SHIFT.any());
        assert!(!KeyboardModifiers::NONE.any());
    }
}
