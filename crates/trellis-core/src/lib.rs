//! Core value types for Trellis.
//!
//! This crate provides the pieces every other Trellis crate builds on:
//!
//! - **Geometry**: integer [`Point`], [`Size`], [`Rect`] and [`Insets`], plus
//!   the [`Axis`] and [`Alignment`] vocabulary used by layouts
//! - **Identifiers**: [`WidgetId`] arena handles and [`HostHandle`] session ids
//! - **Errors**: the [`TrellisError`] taxonomy and [`TrellisResult`] alias
//! - **Logging**: `tracing` target names and [`PerfSpan`]
//!
//! # Example
//!
//! ```
//! use trellis_core::{Insets, Rect, Point};
//!
//! let padding = Insets::uniform(4)?;
//! let rect = Rect::new(0, 0, 40, 20)?;
//! assert!(rect.contains(Point::new(padding.left(), padding.top())));
//!
//! // Negative extents are rejected rather than clamped.
//! assert!(Insets::new(-1, 0, 0, 0).is_err());
//! # Ok::<(), trellis_core::TrellisError>(())
//! ```

mod error;
mod geometry;
mod id;
pub mod logging;

pub use error::{TrellisError, TrellisResult};
pub use geometry::{Alignment, Axis, HorizontalAlignment, Insets, Point, Rect, Size};
pub use id::{HostHandle, WidgetId};
pub use logging::PerfSpan;

static_assertions::assert_impl_all!(WidgetId: Copy, Send, Sync, std::hash::Hash);
static_assertions::assert_impl_all!(HostHandle: Copy, Send, Sync);
static_assertions::const_assert!(Insets::ROOT_PANEL.top() > 0);
