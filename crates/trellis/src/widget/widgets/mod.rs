//! Standard widgets for Trellis.
//!
//! This module provides the leaf widgets most screens are built from:
//!
//! - [`Label`]: One line of text
//! - [`Button`]: Clickable, focusable button with a callback
//! - [`TextField`]: Single-line text input
//! - [`ScrollBar`]: One-axis scroll control, also used by
//!   [`ScrollPanel`](super::layout::ScrollPanel)

mod button;
mod label;
mod scroll_bar;
mod text_field;

pub use button::{BUTTON_HEIGHT, Button};
pub use label::Label;
pub use scroll_bar::{DEFAULT_SCROLL_SPEED, ScrollBar};
pub use text_field::{TEXT_FIELD_HEIGHT, TextField};
