//! ARGB colors as stored by the personalization store and used for surfaces.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A 32-bit ARGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Alpha component.
    pub a: u8,
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates an opaque color from its red, green and blue components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Creates a color from all four components.
    #[inline]
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Decodes a packed `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Packs the color as `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Packs the color as a GDI `COLORREF` (`0x00BBGGRR`). Alpha is dropped.
    #[inline]
    pub const fn to_colorref(self) -> u32 {
        (self.b as u32) << 16 | (self.g as u32) << 8 | self.r as u32
    }

    /// Returns true if the color reads as light.
    ///
    /// Uses the integer luminance approximation `5G + 2R + B > 8 * 128`.
    #[inline]
    pub const fn is_light(self) -> bool {
        5 * self.g as u32 + 2 * self.r as u32 + self.b as u32 > 8 * 128
    }

    /// Returns a color safe to use as a transparency color key.
    ///
    /// Colors whose red and blue channels are equal get the low bit of the
    /// packed value set; other colors are returned unchanged.
    #[inline]
    pub const fn transparent_key(self) -> Self {
        if self.r != self.b {
            self
        } else {
            Self::from_argb(self.to_argb() | 0x1)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses `#RRGGBB` (opaque) or `#AARRGGBB`. The leading `#` is optional.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::invalid_color(s));
        }
        let packed = u32::from_str_radix(hex, 16).map_err(|_| Error::invalid_color(s))?;
        match hex.len() {
            6 => Ok(Self::from_argb(0xFF00_0000 | packed)),
            8 => Ok(Self::from_argb(packed)),
            _ => Err(Error::invalid_color(s)),
        }
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_argb(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}
