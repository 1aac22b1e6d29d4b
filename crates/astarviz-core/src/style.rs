//! Visual styling: [`Color`], [`AttrMask`], and [`Style`].

use std::ops::BitOr;

/// An RGB colour packed into a `u32` (0x00RRGGBB). Zero means "terminal
/// default".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// The default / unset colour.
    pub const DEFAULT: Self = Self(0);

    /// Construct from individual RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

/// Bitmask of text attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrMask(pub u32);

impl AttrMask {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const REVERSE: Self = Self(1 << 1);
    pub const DIM: Self = Self(1 << 2);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AttrMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Complete visual style for a single screen cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: AttrMask,
}

impl Style {
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    pub const fn with_attrs(mut self, attrs: AttrMask) -> Self {
        self.attrs = attrs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_components() {
        let c = Color::from_rgb(0x0f, 0xff, 0x33);
        assert_eq!((c.r(), c.g(), c.b()), (0x0f, 0xff, 0x33));
        assert_ne!(c, Color::DEFAULT);
    }

    #[test]
    fn style_builder() {
        let s = Style::default()
            .with_bg(Color::from_rgb(0x66, 0x66, 0x66))
            .with_attrs(AttrMask::BOLD | AttrMask::DIM);
        assert_eq!(s.fg, Color::DEFAULT);
        assert!(s.attrs.contains(AttrMask::DIM));
        assert!(!s.attrs.contains(AttrMask::REVERSE));
    }
}
