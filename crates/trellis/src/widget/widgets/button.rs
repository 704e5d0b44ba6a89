//! Button widget implementation.
//!
//! A [`Button`] runs a callback when it is clicked, or when Enter or Space is
//! pressed while it holds focus. Its height is fixed at [`BUTTON_HEIGHT`];
//! panels may change its width.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use trellis::widget::widgets::Button;
//!
//! let presses = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&presses);
//! let button = Button::new("Start").with_on_click(move |_cx| counter.set(counter.get() + 1));
//! assert_eq!(button.text(), "Start");
//! ```

use trellis_core::{Alignment, TrellisResult};
use trellis_render::{Color, DEFAULT_LINE_HEIGHT, monospace_width};

use crate::widget::{
    EventContext, EventResult, Key, MouseButton, PaintContext, Widget, WidgetBase, WidgetEvent,
};

/// Fixed height of every button.
pub const BUTTON_HEIGHT: i32 = 20;

/// Horizontal padding on each side of the text.
const PADDING: i32 = 6;

type ClickHandler = Box<dyn FnMut(&mut EventContext<'_>)>;

/// A clickable, focusable button.
pub struct Button {
    base: WidgetBase,
    text: String,
    pressed: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// A button sized to `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = WidgetBase::new();
        base.set_focusable(true);
        base.set_resizable(true);
        base.expand_to(monospace_width(&text) + 2 * PADDING, BUTTON_HEIGHT);
        Self {
            base,
            text,
            pressed: false,
            on_click: None,
        }
    }

    /// Set the click callback (builder pattern).
    pub fn with_on_click(mut self, handler: impl FnMut(&mut EventContext<'_>) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Replace the click callback.
    pub fn set_on_click(&mut self, handler: impl FnMut(&mut EventContext<'_>) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    /// The button text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The size is left alone.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check whether the pointer is holding the button down.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn activate(&mut self, cx: &mut EventContext<'_>) -> EventResult {
        tracing::trace!(target: trellis_core::logging::targets::INPUT, text = %self.text, "button activated");
        if let Some(handler) = self.on_click.as_mut() {
            handler(cx);
        }
        EventResult::Handled
    }
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("bounds", &self.base.bounds())
            .field("pressed", &self.pressed)
            .field("has_handler", &self.on_click.is_some())
            .finish()
    }
}

impl Widget for Button {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn set_size(&mut self, width: i32, _height: i32) -> TrellisResult<()> {
        self.base.set_size(width, BUTTON_HEIGHT)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mouse_x: i32, _mouse_y: i32) {
        let fill = if self.pressed {
            Color::from_argb(0xFF6F_6F6F)
        } else if self.base.is_hovered() {
            Color::from_argb(0xFFB4_B4D8)
        } else {
            Color::from_argb(0xFF9A_9A9A)
        };
        ctx.fill_rect(x, y, self.width(), self.height(), fill);

        let color = ctx.text_color();
        let text_x = x + Alignment::Center.offset(self.width(), ctx.text_width(&self.text));
        let text_y = y + Alignment::Center.offset(self.height(), DEFAULT_LINE_HEIGHT);
        ctx.draw_text(&self.text, text_x, text_y, color);

        if ctx.should_show_focus() {
            ctx.draw_focus_indicator(x, y, self.width(), self.height());
        }
    }

    fn event(&mut self, event: &WidgetEvent, cx: &mut EventContext<'_>) -> EventResult {
        match event {
            WidgetEvent::MouseDown {
                button: MouseButton::Left,
                ..
            } => {
                self.pressed = true;
                EventResult::Handled
            }
            WidgetEvent::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                self.pressed = false;
                EventResult::Handled
            }
            WidgetEvent::Click {
                button: MouseButton::Left,
                ..
            } => self.activate(cx),
            WidgetEvent::KeyPressed {
                key: Key::Enter | Key::Space,
                ..
            } => self.activate(cx),
            WidgetEvent::HoverExit => {
                self.pressed = false;
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }
}
