//! The render backend interface consumed by the widget tree.
//!
//! Widgets never talk to a graphics API. They draw through [`Renderer`],
//! which only needs to place three kinds of primitive at integer
//! coordinates: filled rectangles, textured rectangles and text. Any backend
//! that can do that (a GPU batcher, a software rasterizer, a terminal, or
//! the [`RecordingRenderer`](crate::RecordingRenderer) used in tests) can
//! host a Trellis tree.

use trellis_core::Rect;

use crate::color::Color;

/// Advance width of one glyph for backends that do not measure text.
pub const DEFAULT_GLYPH_WIDTH: i32 = 6;

/// Line height of text drawn with the default font.
pub const DEFAULT_LINE_HEIGHT: i32 = 9;

/// Approximate the width of `text` with a fixed advance per character.
///
/// Layout code that has no renderer at hand (tab strips, labels sized before
/// the first frame) uses this so that sizing stays deterministic.
pub fn monospace_width(text: &str) -> i32 {
    i32::try_from(text.chars().count())
        .unwrap_or(i32::MAX / DEFAULT_GLYPH_WIDTH)
        .saturating_mul(DEFAULT_GLYPH_WIDTH)
}

/// Identifier of a texture known to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A region of a texture, in normalized UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureRegion {
    /// The texture to sample.
    pub texture: TextureId,
    /// Left edge (0.0 to 1.0).
    pub u1: f32,
    /// Top edge (0.0 to 1.0).
    pub v1: f32,
    /// Right edge (0.0 to 1.0).
    pub u2: f32,
    /// Bottom edge (0.0 to 1.0).
    pub v2: f32,
}

impl TextureRegion {
    /// The whole texture.
    pub const fn full(texture: TextureId) -> Self {
        Self {
            texture,
            u1: 0.0,
            v1: 0.0,
            u2: 1.0,
            v2: 1.0,
        }
    }
}

/// The 2D drawing interface.
///
/// All coordinates are absolute in the backend's target space; the widget
/// tree has already added every ancestor offset by the time a call arrives.
pub trait Renderer {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a textured rectangle, tinted by `color`.
    fn draw_texture(&mut self, rect: Rect, region: TextureRegion, color: Color);

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);

    /// Width of `text` in logical pixels.
    fn text_width(&self, text: &str) -> i32 {
        monospace_width(text)
    }

    /// Restrict subsequent drawing to `rect` (intersected with any current
    /// clip) until the matching [`pop_clip`](Self::pop_clip).
    fn push_clip(&mut self, _rect: Rect) {}

    /// Undo the most recent [`push_clip`](Self::push_clip).
    fn pop_clip(&mut self) {}

    /// Draw a one-pixel rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let (x, y, w, h) = (rect.x(), rect.y(), rect.width(), rect.height());
        if w == 0 || h == 0 {
            return;
        }
        for edge in [
            Rect::new(x, y, w, 1),
            Rect::new(x, y + h - 1, w, 1),
            Rect::new(x, y, 1, h),
            Rect::new(x + w - 1, y, 1, h),
        ]
        .into_iter()
        .flatten()
        {
            self.fill_rect(edge, color);
        }
    }
}
