//! Label widget implementation.
//!
//! A [`Label`] draws one line of text. It starts at the size of its text and
//! is resizable, so panels may stretch it; the text is aligned horizontally
//! within its box and centered vertically.
//!
//! # Example
//!
//! ```
//! use trellis::widget::widgets::Label;
//! use trellis::widget::Widget;
//! use trellis::HorizontalAlignment;
//!
//! let label = Label::new("Burn time").with_alignment(HorizontalAlignment::Right);
//! assert_eq!(label.text(), "Burn time");
//! assert!(label.can_resize());
//! ```

use trellis_core::{Alignment, HorizontalAlignment};
use trellis_render::{Color, DEFAULT_LINE_HEIGHT, monospace_width};

use crate::widget::{PaintContext, Widget, WidgetBase};

/// A single line of text.
#[derive(Debug, Clone)]
pub struct Label {
    base: WidgetBase,
    text: String,
    alignment: HorizontalAlignment,
    /// Overrides the mode's default text color.
    color: Option<Color>,
}

impl Label {
    /// A label sized to `text`.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut base = WidgetBase::new();
        base.set_resizable(true);
        base.expand_to(monospace_width(&text), DEFAULT_LINE_HEIGHT);
        Self {
            base,
            text,
            alignment: HorizontalAlignment::Left,
            color: None,
        }
    }

    /// The displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The size is left alone.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Set the horizontal alignment (builder pattern).
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set a fixed text color (builder pattern).
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// The horizontal alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Set the horizontal alignment.
    pub fn set_alignment(&mut self, alignment: HorizontalAlignment) {
        self.alignment = alignment;
    }
}

impl Widget for Label {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mouse_x: i32, _mouse_y: i32) {
        let color = self.color.unwrap_or_else(|| ctx.text_color());
        let text_x = x + Alignment::from(self.alignment).offset(self.width(), ctx.text_width(&self.text));
        let text_y = y + Alignment::Center.offset(self.height(), DEFAULT_LINE_HEIGHT);
        ctx.draw_text(&self.text, text_x, text_y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::{DrawCommand, RecordingRenderer};

    #[test]
    fn test_initial_size_follows_text() {
        let label = Label::new("abcd");
        assert_eq!((label.width(), label.height()), (24, DEFAULT_LINE_HEIGHT));
    }

    #[test]
    fn test_right_alignment() {
        let mut label = Label::new("ab").with_alignment(HorizontalAlignment::Right);
        label.set_size(40, 19).unwrap();
        let mut renderer = RecordingRenderer::new();
        {
            let mut ctx = PaintContext::new(&mut renderer);
            label.paint(&mut ctx, 100, 50, 0, 0);
        }
        assert_eq!(renderer.texts(), vec!["ab"]);
        let [DrawCommand::Text { x, y, .. }] = renderer.commands() else {
            panic!("expected one text command: {:?}", renderer.commands());
        };
        assert_eq!((*x, *y), (128, 55));
    }
}
