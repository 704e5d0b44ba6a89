//! A headless renderer that records draw calls.

use trellis_core::Rect;

use crate::color::Color;
use crate::renderer::{Renderer, TextureRegion};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A solid rectangle.
    FillRect {
        /// Target rectangle.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// A textured rectangle.
    Texture {
        /// Target rectangle.
        rect: Rect,
        /// Sampled region.
        region: TextureRegion,
        /// Tint.
        color: Color,
    },
    /// A line of text.
    Text {
        /// The string.
        text: String,
        /// Left edge.
        x: i32,
        /// Top edge.
        y: i32,
        /// Text color.
        color: Color,
    },
    /// A clip region was pushed.
    PushClip(Rect),
    /// A clip region was popped.
    PopClip,
}

/// Renderer that stores every call in order instead of drawing.
///
/// Used by tests to assert paint order and coordinates, and by hosts that
/// want to hand a whole frame to another thread as plain data.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded calls.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current clip nesting depth.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// The text strings drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The filled rectangles, in order.
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_texture(&mut self, rect: Rect, region: TextureRegion, color: Color) {
        self.commands.push(DrawCommand::Texture {
            rect,
            region,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            tracing::warn!(target: "trellis::render", "pop_clip without matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }
}
