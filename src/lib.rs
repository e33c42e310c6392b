//! # Fluent Backdrop
//!
//! Fluent Design window effects for Windows desktop applications.
//!
//! This crate applies Desktop Window Manager effects to top-level windows
//! owned by any toolkit, and reads the user's personalization settings:
//!
//! - **Backdrops**: Mica, Acrylic and Tabbed system backdrop materials
//! - **Titlebar theme**: dark or light non-client area
//! - **Transparency**: color-key transparency so the backdrop shows through
//! - **Personalization**: light/dark theme flags, accent colors, recent colors
//! - **Configuration**: a builder that composes the above and commits it in order
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn demo(hwnd: windows::Win32::Foundation::HWND) -> fluent_backdrop::error::Result<()> {
//! use fluent_backdrop::prelude::*;
//!
//! let window = WindowHandle::try_from(hwnd)?;
//! let mut fluent = Fluent::native();
//!
//! // Mica, theme read from the system, transparent surface
//! fluent.mica(window)?;
//!
//! // Acrylic with a light titlebar, no transparency
//! fluent.configure(window).acrylic().light().no_transparency().apply()?;
//!
//! // Titlebar theme only
//! fluent.configure(window).auto().to_title_bar().apply()?;
//!
//! // Remove everything
//! fluent.reset(window)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Personalization
//!
//! ```no_run
//! # #[cfg(windows)]
//! # {
//! use fluent_backdrop::registry::CurrentUserRegistry;
//! use fluent_backdrop::theme::ThemeQuery;
//!
//! let theme = ThemeQuery::new(CurrentUserRegistry);
//! if let Some(accent) = theme.accent_color() {
//!     println!("Accent: {} (light: {})", accent, accent.is_light());
//! }
//! # }
//! ```
//!
//! ## Custom palettes
//!
//! The transparent surface uses a near-black or near-white color. Install a
//! different palette once at startup:
//!
//! ```
//! use fluent_backdrop::color::Color;
//! use fluent_backdrop::config::{Palette, Settings};
//!
//! let palette = Palette::new(Color::rgb(243, 243, 243), Color::rgb(32, 32, 31));
//! Settings::DEFAULT.palette(palette).install().ok();
//! ```
//!
//! ## Threading
//!
//! Window effects must be applied from the thread that owns the window.
//! Nothing in this crate spawns threads or blocks.

#![warn(missing_docs)]

// Core modules
pub mod color;
pub mod config;
pub mod error;
pub mod handle;

// Effects
pub mod apply;
pub mod codec;
pub mod fluent;
pub mod theme;

// Native implementations
#[cfg(windows)]
pub mod dwm;
#[cfg(windows)]
pub mod registry;

#[cfg(test)]
mod testing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::apply::{Compositor, EffectApplicator};
    pub use crate::codec::{Attribute, BackdropKind, WindowAttribute};
    pub use crate::color::Color;
    pub use crate::config::{Palette, Settings, SurfaceColors};
    pub use crate::error::{Error, Result};
    pub use crate::fluent::{Configure, EffectRequest, Fluent, Step, Target, Theme};
    pub use crate::handle::WindowHandle;
    pub use crate::theme::{PersonalizationStore, ThemeQuery, ThemeSnapshot};

    #[cfg(windows)]
    pub use crate::dwm::DwmCompositor;
    #[cfg(windows)]
    pub use crate::error::ResultExt;
    #[cfg(windows)]
    pub use crate::registry::CurrentUserRegistry;
}
