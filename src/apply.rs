//! Applying and removing effects on a window.
//!
//! [`EffectApplicator`] turns effect requests into calls on a [`Compositor`],
//! the seam to the native window. Each operation is idempotent and has a
//! matching cancel operation.

use crate::codec::{Attribute, BackdropKind, EncodedAttribute};
use crate::config::{Palette, SurfaceColors};
use crate::error::Result;
use crate::fluent::Step;
use crate::handle::WindowHandle;

/// The native operations effects are built from.
///
/// On Windows, [`crate::dwm::DwmCompositor`] implements this with
/// `DwmSetWindowAttribute` and layered-window color keys.
pub trait Compositor {
    /// Sets one window attribute.
    fn set_attribute(&mut self, window: WindowHandle, attribute: EncodedAttribute) -> Result<()>;

    /// Paints the window surface and enables its transparency color key.
    fn paint_surface(&mut self, window: WindowHandle, colors: SurfaceColors) -> Result<()>;

    /// Removes the transparency color key. Surface colors are left as they are.
    fn clear_transparency_key(&mut self, window: WindowHandle) -> Result<()>;
}

impl<C: Compositor + ?Sized> Compositor for &mut C {
    fn set_attribute(&mut self, window: WindowHandle, attribute: EncodedAttribute) -> Result<()> {
        (**self).set_attribute(window, attribute)
    }

    fn paint_surface(&mut self, window: WindowHandle, colors: SurfaceColors) -> Result<()> {
        (**self).paint_surface(window, colors)
    }

    fn clear_transparency_key(&mut self, window: WindowHandle) -> Result<()> {
        (**self).clear_transparency_key(window)
    }
}

/// Applies and cancels individual effects.
#[derive(Debug)]
pub struct EffectApplicator<C> {
    compositor: C,
    palette: Palette,
}

impl<C: Compositor> EffectApplicator<C> {
    /// Creates an applicator with the given compositor and surface palette.
    pub fn new(compositor: C, palette: Palette) -> Self {
        Self {
            compositor,
            palette,
        }
    }

    /// Returns the surface palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Returns the compositor.
    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    /// Returns the compositor mutably.
    pub fn compositor_mut(&mut self) -> &mut C {
        &mut self.compositor
    }

    /// Consumes the applicator and returns its compositor.
    pub fn into_compositor(self) -> C {
        self.compositor
    }

    /// Sets the system backdrop material. [`BackdropKind::None`] cancels the backdrop.
    pub fn set_backdrop(&mut self, window: WindowHandle, kind: BackdropKind) -> Result<()> {
        if kind == BackdropKind::None {
            return self.cancel_backdrop(window);
        }
        log::debug!("{}: backdrop {}", window, kind);
        self.compositor
            .set_attribute(window, Attribute::SystemBackdrop(kind).encode())
    }

    /// Renders the titlebar dark (`true`) or light.
    pub fn set_theme(&mut self, window: WindowHandle, dark: bool) -> Result<()> {
        log::debug!("{}: immersive dark mode {}", window, dark);
        self.compositor
            .set_attribute(window, Attribute::ImmersiveDarkMode(dark).encode())
    }

    /// Fills the window with the palette color for the theme and makes that
    /// color transparent, so the backdrop material shows through.
    pub fn set_transparency(&mut self, window: WindowHandle, dark: bool) -> Result<()> {
        let colors = self.palette.surface(dark);
        log::debug!(
            "{}: transparency key {} (foreground {})",
            window,
            colors.transparency_key,
            colors.foreground
        );
        self.compositor.paint_surface(window, colors)
    }

    /// Restores the system backdrop attribute to 0.
    pub fn cancel_backdrop(&mut self, window: WindowHandle) -> Result<()> {
        log::debug!("{}: backdrop reset", window);
        self.compositor
            .set_attribute(window, Attribute::ResetBackdrop.encode())
    }

    /// Removes the transparency color key.
    pub fn cancel_transparency(&mut self, window: WindowHandle) -> Result<()> {
        log::debug!("{}: transparency key cleared", window);
        self.compositor.clear_transparency_key(window)
    }

    /// Executes one resolved step.
    pub fn execute(&mut self, window: WindowHandle, step: Step) -> Result<()> {
        match step {
            Step::SetBackdrop(kind) => self.set_backdrop(window, kind),
            Step::CancelBackdrop => self.cancel_backdrop(window),
            Step::SetTheme { dark } => self.set_theme(window, dark),
            Step::SetTransparency { dark } => self.set_transparency(window, dark),
            Step::CancelTransparency => self.cancel_transparency(window),
        }
    }
}
