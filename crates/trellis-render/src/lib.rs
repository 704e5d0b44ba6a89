//! Render backend interface for Trellis.
//!
//! The widget tree draws through the [`Renderer`] trait and nothing else. This
//! crate defines that trait, the [`Color`] type every draw call carries, and a
//! [`RecordingRenderer`] that stores calls instead of drawing them.
//!
//! # Example
//!
//! ```
//! use trellis_core::Rect;
//! use trellis_render::{Color, DrawCommand, RecordingRenderer, Renderer};
//!
//! let mut renderer = RecordingRenderer::new();
//! renderer.fill_rect(Rect::new(0, 0, 16, 16)?, Color::PANEL);
//! renderer.draw_text("Inventory", 8, 6, Color::TEXT);
//!
//! assert!(matches!(renderer.commands()[1], DrawCommand::Text { x: 8, y: 6, .. }));
//! # Ok::<(), trellis_core::TrellisError>(())
//! ```

mod color;
mod recording;
mod renderer;

pub use color::Color;
pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::{
    DEFAULT_GLYPH_WIDTH, DEFAULT_LINE_HEIGHT, Renderer, TextureId, TextureRegion, monospace_width,
};
