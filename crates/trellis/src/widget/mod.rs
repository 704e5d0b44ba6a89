//! Widget system for Trellis.
//!
//! This module provides the retained widget tree and everything that walks
//! it:
//!
//! - [`Widget`] trait: The base trait for all UI elements
//! - [`Panel`] trait: Widgets that own, place and lay out children
//! - [`WidgetTree`]: The arena owning every widget of a session
//! - [`WidgetBase`]: Common state (bounds, flags) embedded in each widget
//! - [`FocusManager`] and [`InputDispatcher`]: Focus and input routing
//! - [`TreeDebug`]: Text dumps of a subtree
//!
//! # Creating a Widget
//!
//! To create a custom widget:
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `Widget` trait
//! 3. Override `paint()` and `event()` as needed
//!
//! ```
//! use trellis::widget::*;
//! use trellis::render::Color;
//!
//! struct Swatch {
//!     base: WidgetBase,
//!     color: Color,
//!     clicks: u32,
//! }
//!
//! impl Swatch {
//!     fn new(color: Color) -> Self {
//!         let mut base = WidgetBase::new();
//!         base.expand_to(16, 16);
//!         Self { base, color, clicks: 0 }
//!     }
//! }
//!
//! impl Widget for Swatch {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>, x: i32, y: i32, _mx: i32, _my: i32) {
//!         ctx.fill_rect(x, y, self.width(), self.height(), self.color);
//!     }
//!
//!     fn event(&mut self, event: &WidgetEvent, _cx: &mut EventContext<'_>) -> EventResult {
//!         match event {
//!             WidgetEvent::Click { .. } => {
//!                 self.clicks += 1;
//!                 EventResult::Handled
//!             }
//!             _ => EventResult::Ignored,
//!         }
//!     }
//! }
//!
//! let mut tree = WidgetTree::new();
//! let swatch = tree.insert(Swatch::new(Color::WHITE));
//! assert_eq!(tree.get_as::<Swatch>(swatch).unwrap().clicks, 0);
//! ```
//!
//! # Widget Tree
//!
//! Widgets never hold references to each other. Parents, children and the
//! host handle live in the [`WidgetTree`] and are addressed by
//! [`WidgetId`](trellis_core::WidgetId). A panel's children are ordered:
//! painting goes front to back in that order and hit-testing back to front,
//! so later children are on top.

mod base;
mod debug;
mod dispatcher;
mod events;
mod focus;
pub mod layout;
mod painting;
mod traits;
mod tree;
pub mod widgets;

#[cfg(test)]
mod tests;

pub use base::WidgetBase;
pub use debug::{TreeDebug, TreeFormatOptions, TreeStyle};
pub use dispatcher::InputDispatcher;
pub use events::{EventResult, Key, KeyboardModifiers, MouseButton, WidgetEvent};
pub use focus::FocusManager;
pub use painting::BackgroundPainter;
pub use traits::{PaintContext, Panel, Placement, Widget};
pub use tree::{EventContext, HostRequest, LayoutContext, WidgetTree};
