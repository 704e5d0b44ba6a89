//! Prelude module for Trellis.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use trellis::prelude::*;
//! ```
//!
//! This provides access to:
//! - The host session (`Host`, `HostConfig`)
//! - Widget foundation (`Widget`, `Panel`, `WidgetBase`, `PaintContext`)
//! - Standard widgets and panels
//! - Input types and the dispatcher
//! - Geometry types (`Point`, `Size`, `Rect`, `Insets`)

// ============================================================================
// Host
// ============================================================================

pub use crate::{ConfigError, Host, HostConfig};

// ============================================================================
// Errors & Identifiers
// ============================================================================

pub use crate::{HostHandle, TrellisError, TrellisResult, WidgetId};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    BackgroundPainter, EventContext, LayoutContext, PaintContext, Panel, Placement, Widget,
    WidgetBase, WidgetTree,
};

// ============================================================================
// Input
// ============================================================================

pub use crate::widget::{
    EventResult, InputDispatcher, Key, KeyboardModifiers, MouseButton, WidgetEvent,
};

// ============================================================================
// Widgets & Panels
// ============================================================================

pub use crate::widget::layout::{
    BoxPanel, CardPanel, GridPanel, PlainPanel, ScrollBehavior, ScrollPanel, TabPanel,
};
pub use crate::widget::widgets::{Button, Label, ScrollBar, TextField};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::{Alignment, Axis, HorizontalAlignment, Insets, Point, Rect, Size};
pub use crate::render::Color;
