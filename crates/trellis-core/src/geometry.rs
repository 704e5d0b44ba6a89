//! Integer geometry value types.
//!
//! All coordinates and sizes in Trellis are whole logical pixels. Positions
//! may be negative (a scrolled widget sits above its viewport), sizes may not:
//! [`Size`], [`Rect`] and [`Insets`] reject negative extents at construction
//! with [`TrellisError::InvalidArgument`] instead of clamping them.

use serde::Deserialize;

use crate::error::{TrellisError, TrellisResult};

/// A point in some widget's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by an offset.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Zero size. Valid, and means "invisible".
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    ///
    /// Fails with `InvalidArgument` when either extent is negative.
    pub fn new(width: i32, height: i32) -> TrellisResult<Self> {
        check_extent("width", width)?;
        check_extent("height", height)?;
        Ok(Self { width, height })
    }

    /// The width.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// The height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Component-wise maximum of two sizes.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

/// An axis-aligned rectangle with a non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a new rectangle.
    ///
    /// Fails with `InvalidArgument` when width or height is negative.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> TrellisResult<Self> {
        let size = Size::new(width, height)?;
        Ok(Self::from_origin_size(Point::new(x, y), size))
    }

    /// Create a rectangle from an already validated origin and size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Left edge.
    #[inline]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Width.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Check whether a point lies inside. The right and bottom edges are
    /// exclusive, so an empty rectangle contains nothing.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// The same rectangle moved by an offset.
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Padding between a panel's edges and its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "[i32; 4]")]
pub struct Insets {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
}

impl Insets {
    /// No padding.
    pub const NONE: Self = Self {
        top: 0,
        left: 0,
        bottom: 0,
        right: 0,
    };

    /// The default padding of a root panel.
    pub const ROOT_PANEL: Self = Self {
        top: 7,
        left: 7,
        bottom: 7,
        right: 7,
    };

    /// Create insets, failing with `InvalidArgument` on a negative component.
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> TrellisResult<Self> {
        for (name, value) in [("top", top), ("left", left), ("bottom", bottom), ("right", right)] {
            if value < 0 {
                return Err(TrellisError::invalid_argument(format!(
                    "negative inset: {name} = {value}"
                )));
            }
        }
        Ok(Self {
            top,
            left,
            bottom,
            right,
        })
    }

    /// The same padding on every side.
    pub fn uniform(size: i32) -> TrellisResult<Self> {
        Self::new(size, size, size, size)
    }

    /// Top padding.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.top
    }

    /// Left padding.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.left
    }

    /// Bottom padding.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Right padding.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.right
    }

    /// Combined left and right padding.
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Combined top and bottom padding.
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}

impl TryFrom<[i32; 4]> for Insets {
    type Error = TrellisError;

    fn try_from([top, left, bottom, right]: [i32; 4]) -> TrellisResult<Self> {
        Self::new(top, left, bottom, right)
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Left to right.
    #[default]
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// Pick the value that belongs to this axis.
    #[inline]
    pub fn choose<T>(self, horizontal: T, vertical: T) -> T {
        match self {
            Self::Horizontal => horizontal,
            Self::Vertical => vertical,
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Self {
        self.choose(Self::Vertical, Self::Horizontal)
    }
}

/// Placement of content along one axis of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left or top.
    #[default]
    Start,
    /// Centered; odd remainders bias toward the start.
    Center,
    /// Right or bottom.
    End,
}

impl Alignment {
    /// Offset of content of length `occupied` inside `available`.
    ///
    /// Centering floors the halved remainder, so content that overflows is
    /// pushed toward the start by the extra pixel.
    #[inline]
    pub fn offset(self, available: i32, occupied: i32) -> i32 {
        match self {
            Self::Start => 0,
            Self::Center => (available - occupied).div_euclid(2),
            Self::End => available - occupied,
        }
    }
}

/// Horizontal placement of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Self::Start,
            HorizontalAlignment::Center => Self::Center,
            HorizontalAlignment::Right => Self::End,
        }
    }
}

fn check_extent(name: &str, value: i32) -> TrellisResult<()> {
    if value < 0 {
        Err(TrellisError::invalid_argument(format!(
            "negative {name}: {value}"
        )))
    } else {
        Ok(())
    }
}
