//! Built-in panels.
//!
//! Every panel implements [`Panel`](super::Panel): a placement policy applied
//! when a child is added, and a layout pass run during validation and on
//! relayout requests.
//!
//! # Built-in Panels
//!
//! - [`PlainPanel`] - Children stay where they were put
//! - [`GridPanel`] - Children snap to a fixed cell grid
//! - [`BoxPanel`] - Children stack along an axis with spacing and alignment
//! - [`CardPanel`] - One visible child at a time
//! - [`ScrollPanel`] - A clipped viewport over one content widget
//! - [`TabPanel`] - A strip of tab buttons above a card panel
//!
//! # Layout Contract
//!
//! After a panel's layout runs, every child's local position is final for the
//! pass, and the panel is at least as large as the union of its children
//! plus its right/bottom insets. Panels grow but never shrink on their own.
//!
//! # Example
//!
//! ```
//! use trellis::widget::layout::GridPanel;
//! use trellis::widget::widgets::Label;
//! use trellis::widget::{Placement, WidgetTree};
//! use trellis::HostHandle;
//!
//! let mut tree = WidgetTree::new();
//! let grid = tree.insert(GridPanel::new());
//! let label = tree.add(grid, Label::new("Fuel"), Placement::Cell {
//!     column: 2,
//!     row: 1,
//!     width: 2,
//!     height: 1,
//! })?;
//! tree.validate(grid, HostHandle::next())?;
//!
//! let bounds = tree.widget(label).unwrap().bounds();
//! assert_eq!((bounds.x(), bounds.y()), (36, 18));
//! assert_eq!((bounds.width(), bounds.height()), (36, 18));
//! # Ok::<(), trellis::TrellisError>(())
//! ```

mod box_panel;
mod card;
mod grid;
mod plain;
mod scroll;
mod tab;

pub use box_panel::BoxPanel;
pub use card::CardPanel;
pub use grid::GridPanel;
pub use plain::PlainPanel;
pub use scroll::{ScrollBehavior, ScrollPanel};
pub use tab::TabPanel;

use trellis_core::{TrellisError, TrellisResult};

use super::traits::Placement;

/// Edge length of one grid cell.
pub const DEFAULT_CELL_SIZE: i32 = 18;

/// Gap between consecutive children of a box panel.
pub const DEFAULT_SPACING: i32 = 4;

/// Size given to resizable children added to a box panel without an
/// explicit size.
pub const DEFAULT_CHILD_SIZE: i32 = 18;

/// Height of a tab panel's button strip.
pub const TAB_HEIGHT: i32 = 30;

/// Thickness of a scroll panel's scroll bars.
pub const SCROLL_BAR_SIZE: i32 = 8;

fn unsupported(panel: &str, placement: Placement) -> TrellisError {
    TrellisError::invalid_argument(format!("{panel} does not support {placement:?}"))
}

/// Apply `width` by `height` to a resizable widget; others keep their size.
fn size_if_resizable(
    child: &mut dyn super::Widget,
    width: i32,
    height: i32,
) -> TrellisResult<()> {
    if child.can_resize() {
        child.set_size(width, height)?;
    }
    Ok(())
}
