//! ARGB colors.

use std::fmt;

/// A 32-bit color packed as `0xAARRGGBB`.
///
/// This is the format render backends receive: every draw call carries one
/// color and the backend is free to convert it to whatever it needs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Default text color on a light panel.
    pub const TEXT: Self = Self(0xFF40_4040);
    /// Default text color on a dark panel.
    pub const TEXT_DARK: Self = Self(0xFFBC_BCBC);
    /// Light panel body.
    pub const PANEL: Self = Self(0xFFC6_C6C6);
    /// Dark panel body.
    pub const PANEL_DARK: Self = Self(0xFF3C_3C3C);
    /// Widget highlight used for focus and hover outlines.
    pub const HIGHLIGHT: Self = Self(0xFF00_78D7);

    /// Create a color from a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[inline]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(0xFF00_0000 | (rgb & 0x00FF_FFFF))
    }

    /// Create a color from 8-bit components.
    #[inline]
    pub const fn from_argb8(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed `0xAARRGGBB` value.
    #[inline]
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha component.
    #[inline]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red component.
    #[inline]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green component.
    #[inline]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self(((alpha as u32) << 24) | (self.0 & 0x00FF_FFFF))
    }

    /// Check whether drawing with this color has no visible effect.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08X})", self.0)
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Self(argb)
    }
}
