//! Grid panel: children snap to a fixed cell grid.
//!
//! `GridPanel` positions each child at a cell and, for resizable children,
//! sizes it to cover its span:
//!
//! ```text
//! x      = column * (cell + hgap) + insets.left
//! y      = row * (cell + vgap) + insets.top
//! width  = span_w * cell + (span_w - 1) * hgap
//! height = span_h * cell + (span_h - 1) * vgap
//! ```
//!
//! The grid does not reflow: positions are fixed when a child is added and
//! layout only grows the panel to fit.

use trellis_core::{Insets, TrellisError, TrellisResult};

use super::{DEFAULT_CELL_SIZE, size_if_resizable, unsupported};
use crate::widget::traits::panel_widget_plumbing;
use crate::widget::{BackgroundPainter, Panel, Placement, Widget, WidgetBase};

/// A fixed cell grid.
#[derive(Debug, Clone)]
pub struct GridPanel {
    base: WidgetBase,
    cell_size: i32,
    horizontal_gap: i32,
    vertical_gap: i32,
    insets: Insets,
    background: Option<BackgroundPainter>,
}

impl GridPanel {
    /// A grid with the default cell size and no gaps.
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            cell_size: DEFAULT_CELL_SIZE,
            horizontal_gap: 0,
            vertical_gap: 0,
            insets: Insets::NONE,
            background: None,
        }
    }

    /// A grid with square cells of `cell_size`. Must be positive.
    pub fn with_cell_size(cell_size: i32) -> TrellisResult<Self> {
        if cell_size <= 0 {
            return Err(TrellisError::invalid_argument(format!(
                "grid cell size must be positive: {cell_size}"
            )));
        }
        Ok(Self {
            cell_size,
            ..Self::new()
        })
    }

    /// Set the gaps between columns and rows (builder pattern).
    pub fn with_gaps(mut self, horizontal: i32, vertical: i32) -> TrellisResult<Self> {
        if horizontal < 0 || vertical < 0 {
            return Err(TrellisError::invalid_argument(format!(
                "negative grid gap: {horizontal}x{vertical}"
            )));
        }
        self.horizontal_gap = horizontal;
        self.vertical_gap = vertical;
        Ok(self)
    }

    /// Set the padding (builder pattern).
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// Set the background painter (builder pattern).
    pub fn with_background(mut self, background: BackgroundPainter) -> Self {
        self.background = Some(background);
        self
    }

    /// Edge length of one cell.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Gap between columns.
    #[inline]
    pub fn horizontal_gap(&self) -> i32 {
        self.horizontal_gap
    }

    /// Gap between rows.
    #[inline]
    pub fn vertical_gap(&self) -> i32 {
        self.vertical_gap
    }

    fn span(&self, cells: i32, gap: i32) -> i32 {
        cells * self.cell_size + (cells - 1) * gap
    }
}

impl Default for GridPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for GridPanel {
    panel_widget_plumbing!();
}

impl Panel for GridPanel {
    fn insets(&self) -> Insets {
        self.insets
    }

    fn background(&self) -> Option<BackgroundPainter> {
        self.background
    }

    fn place_child(&mut self, child: &mut dyn Widget, placement: Placement) -> TrellisResult<()> {
        let Placement::Cell {
            column,
            row,
            width,
            height,
        } = placement
        else {
            return Err(unsupported("GridPanel", placement));
        };
        if column < 0 || row < 0 {
            return Err(TrellisError::invalid_argument(format!(
                "negative grid cell: ({column}, {row})"
            )));
        }
        if width < 1 || height < 1 {
            return Err(TrellisError::invalid_argument(format!(
                "grid span must cover at least one cell: {width}x{height}"
            )));
        }

        child.set_location(
            column * (self.cell_size + self.horizontal_gap) + self.insets.left(),
            row * (self.cell_size + self.vertical_gap) + self.insets.top(),
        );
        size_if_resizable(
            child,
            self.span(width, self.horizontal_gap),
            self.span(height, self.vertical_gap),
        )
    }
}
