//! Surface palette and process-wide settings.
//!
//! Settings are read-only once installed. A host that wants its own palette
//! or default effect installs it once at startup, before any window effects
//! are applied; everything else falls back to the built-in defaults.

use crate::color::Color;
use crate::fluent::EffectRequest;
use std::sync::OnceLock;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Foreground, background and color key for a transparent surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceColors {
    /// Text color drawn on the surface.
    pub foreground: Color,
    /// Background fill.
    pub background: Color,
    /// Pixels of exactly this color are composited as transparent.
    pub transparency_key: Color,
}

/// Near-white and near-black surface colors.
///
/// Neither color is pure white or black, so ordinary content drawn in those
/// colors is not mistaken for the transparency key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Surface color for the light theme.
    pub light: Color,
    /// Surface color for the dark theme.
    pub dark: Color,
}

impl Palette {
    /// The built-in palette.
    pub const DEFAULT: Self = Self {
        light: Color::rgb(233, 233, 234),
        dark: Color::rgb(22, 22, 21),
    };

    /// Creates a palette from explicit colors.
    pub const fn new(light: Color, dark: Color) -> Self {
        Self { light, dark }
    }

    /// Returns the surface colors for the dark (`true`) or light theme.
    ///
    /// The background doubles as the transparency key, so it is passed
    /// through [`Color::transparent_key`] first.
    pub const fn surface(&self, dark: bool) -> SurfaceColors {
        let (base, foreground) = if dark {
            (self.dark, self.light)
        } else {
            (self.light, self.dark)
        };
        let key = base.transparent_key();
        SurfaceColors {
            foreground,
            background: key,
            transparency_key: key,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Process-wide defaults for window effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Palette used for transparent surfaces.
    pub palette: Palette,
    /// The request every configure session starts from.
    pub request: EffectRequest,
}

impl Settings {
    /// The built-in settings.
    pub const DEFAULT: Self = Self {
        palette: Palette::DEFAULT,
        request: EffectRequest::DEFAULT,
    };

    /// Sets the palette.
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the default request.
    pub fn request(mut self, request: EffectRequest) -> Self {
        self.request = request;
        self
    }

    /// Installs these settings for the rest of the process.
    ///
    /// Settings can be installed once. A second call returns the rejected
    /// settings unchanged.
    pub fn install(self) -> std::result::Result<(), Settings> {
        SETTINGS.set(self)?;
        log::debug!("installed window effect settings: {:?}", self);
        Ok(())
    }

    /// Returns the installed settings, or the built-in defaults.
    pub fn global() -> &'static Settings {
        SETTINGS.get_or_init(|| Settings::DEFAULT)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surfaces() {
        let dark = Palette::DEFAULT.surface(true);
        assert_eq!(dark.background, Color::rgb(22, 22, 21));
        assert_eq!(dark.transparency_key, Color::rgb(22, 22, 21));
        assert_eq!(dark.foreground, Color::rgb(233, 233, 234));

        let light = Palette::DEFAULT.surface(false);
        assert_eq!(light.background, Color::rgb(233, 233, 234));
        assert_eq!(light.foreground, Color::rgb(22, 22, 21));
    }

    #[test]
    fn test_gray_palette_key_adjusted() {
        let palette = Palette::new(Color::rgb(240, 240, 240), Color::rgb(20, 20, 20));
        let dark = palette.surface(true);
        assert_eq!(dark.transparency_key, Color::rgb(20, 20, 21));
        assert_eq!(dark.background, dark.transparency_key);
    }

    #[test]
    fn test_global_is_stable() {
        let first = Settings::global();
        let second = Settings::global();
        assert!(std::ptr::eq(first, second));
        // already initialized by the first read
        assert!(Settings::DEFAULT.install().is_err());
    }
}
