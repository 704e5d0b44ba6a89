//! Trellis - a retained-mode widget tree for games and tools.
//!
//! This is the main umbrella crate. It re-exports the core value types and
//! holds the widget tree, the panel layouts, focus and input routing, and
//! the [`Host`] session that ties them together. Drawing goes through the
//! backend-agnostic [`render::Renderer`] trait.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//! use trellis::render::RecordingRenderer;
//!
//! fn main() -> Result<(), TrellisError> {
//!     let mut host = Host::new(HostConfig::default());
//!     let root = host.create_root(host.root_grid()?)?;
//!     host.add(root, Label::new("Fuel"), Placement::cell(0, 0))?;
//!     let button = host.add(root, Button::new("Burn"), Placement::cell(1, 0))?;
//!     host.validate()?;
//!
//!     let mut dispatcher = InputDispatcher::new();
//!     dispatcher.on_key_pressed(&mut host, Key::Tab, KeyboardModifiers::NONE)?;
//!     assert!(host.is_focused(button));
//!
//!     let mut renderer = RecordingRenderer::new();
//!     host.paint(&mut renderer, 0, 0);
//!     assert!(renderer.texts().contains(&"Burn"));
//!     Ok(())
//! }
//! ```

pub use trellis_core::*;

mod config;
mod host;
pub mod prelude;
pub mod widget;

pub use config::{ConfigError, HostConfig};
pub use host::Host;

/// Render backend interface.
pub mod render {
    pub use trellis_render::*;
}

static_assertions::assert_impl_all!(HostConfig: Clone, Send, Sync, Default);
static_assertions::assert_impl_all!(widget::HostRequest: Copy, Eq, std::hash::Hash);
static_assertions::assert_impl_all!(widget::WidgetEvent: Clone, PartialEq);
