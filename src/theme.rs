//! Windows personalization reads: light/dark flags, accent colors and the
//! recent color history.
//!
//! Reads are best effort. The personalization store is OS state outside this
//! crate's control, so absent keys, absent values and store errors all fall
//! back to defaults instead of failing. Errors are logged at `warn` level.
//! Nothing is cached; every call re-reads the store.

use crate::color::Color;
use crate::error::Result;
use std::fmt;

/// Key holding the light theme flags.
pub const PERSONALIZE: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize";

/// Value under [`PERSONALIZE`]: nonzero when apps use the light theme.
pub const APPS_USE_LIGHT_THEME: &str = "AppsUseLightTheme";

/// Value under [`PERSONALIZE`]: nonzero when the shell uses the light theme.
pub const SYSTEM_USES_LIGHT_THEME: &str = "SystemUsesLightTheme";

/// Key holding recently used colors, one ARGB value each.
pub const COLOR_HISTORY: &str = r"Software\Microsoft\Windows\CurrentVersion\Themes\History\Colors";

/// Key holding the DWM colors.
pub const DWM: &str = r"Software\Microsoft\Windows\DWM";

/// Value under [`DWM`]: the accent color.
pub const ACCENT_COLOR: &str = "AccentColor";

/// Value under [`DWM`]: the window colorization color.
pub const COLORIZATION_COLOR: &str = "ColorizationColor";

/// Value under [`DWM`]: the colorization afterglow color.
pub const COLORIZATION_AFTERGLOW: &str = "ColorizationAfterglow";

/// Read access to the current user's personalization values.
///
/// Paths are relative to the current user's root. Implementations return
/// `Ok(None)` for an absent key or value and reserve `Err` for real failures.
pub trait PersonalizationStore {
    /// Reads a 32-bit value.
    fn read_u32(&self, path: &str, name: &str) -> Result<Option<u32>>;

    /// Lists the value names under a key, in the store's enumeration order.
    fn value_names(&self, path: &str) -> Result<Option<Vec<String>>>;
}

impl<S: PersonalizationStore + ?Sized> PersonalizationStore for &S {
    fn read_u32(&self, path: &str, name: &str) -> Result<Option<u32>> {
        (**self).read_u32(path, name)
    }

    fn value_names(&self, path: &str) -> Result<Option<Vec<String>>> {
        (**self).value_names(path)
    }
}

/// A point-in-time read of the OS theme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    /// Apps use the light theme.
    pub app_light: bool,
    /// The shell uses the light theme.
    pub system_light: bool,
    /// Accent color, if set.
    pub accent: Option<Color>,
    /// Colorization color, if set.
    pub colorization: Option<Color>,
    /// Colorization afterglow, if set.
    pub afterglow: Option<Color>,
    /// Recently used colors in store order.
    pub recent: Vec<Color>,
}

impl fmt::Display for ThemeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn color(c: &Option<Color>) -> String {
            c.map(|c| c.to_string()).unwrap_or_else(|| "(unset)".to_string())
        }
        let theme = |light: bool| if light { "light" } else { "dark" };

        writeln!(f, "App theme:      {}", theme(self.app_light))?;
        writeln!(f, "System theme:   {}", theme(self.system_light))?;
        writeln!(f, "Accent:         {}", color(&self.accent))?;
        writeln!(f, "Colorization:   {}", color(&self.colorization))?;
        writeln!(f, "Afterglow:      {}", color(&self.afterglow))?;
        write!(f, "Recent colors: ")?;
        for c in &self.recent {
            write!(f, " {}", c)?;
        }
        Ok(())
    }
}

/// Best-effort theme queries over a [`PersonalizationStore`].
#[derive(Debug)]
pub struct ThemeQuery<S> {
    store: S,
}

impl<S: PersonalizationStore> ThemeQuery<S> {
    /// Creates a query over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns true unless the app theme flag is present and zero.
    pub fn is_app_theme_light(&self) -> bool {
        self.read_flag(PERSONALIZE, APPS_USE_LIGHT_THEME)
    }

    /// Returns true unless the system theme flag is present and zero.
    pub fn is_system_theme_light(&self) -> bool {
        self.read_flag(PERSONALIZE, SYSTEM_USES_LIGHT_THEME)
    }

    /// Returns the accent color, or `None` if it is not set.
    pub fn accent_color(&self) -> Option<Color> {
        self.read_color(DWM, ACCENT_COLOR)
    }

    /// Returns the colorization color, or `None` if it is not set.
    pub fn colorization_color(&self) -> Option<Color> {
        self.read_color(DWM, COLORIZATION_COLOR)
    }

    /// Returns the colorization afterglow, or `None` if it is not set.
    pub fn colorization_afterglow(&self) -> Option<Color> {
        self.read_color(DWM, COLORIZATION_AFTERGLOW)
    }

    /// Returns the recently used colors.
    ///
    /// The order is whatever the store enumerates and carries no meaning.
    /// Values that are absent or not 32-bit integers are skipped.
    pub fn recent_colors(&self) -> Vec<Color> {
        let names = match self.store.value_names(COLOR_HISTORY) {
            Ok(Some(names)) => names,
            Ok(None) => {
                log::debug!("{} is absent, no recent colors", COLOR_HISTORY);
                return Vec::new();
            }
            Err(e) => {
                log::warn!("failed to enumerate {}: {}", COLOR_HISTORY, e);
                return Vec::new();
            }
        };

        names
            .iter()
            .filter_map(|name| self.read_color(COLOR_HISTORY, name))
            .collect()
    }

    /// Reads every theme fact at once.
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            app_light: self.is_app_theme_light(),
            system_light: self.is_system_theme_light(),
            accent: self.accent_color(),
            colorization: self.colorization_color(),
            afterglow: self.colorization_afterglow(),
            recent: self.recent_colors(),
        }
    }

    fn read(&self, path: &str, name: &str) -> Option<u32> {
        match self.store.read_u32(path, name) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                log::debug!(r"{}\{} is absent, using default", path, name);
                None
            }
            Err(e) => {
                log::warn!(r"failed to read {}\{}: {}", path, name, e);
                None
            }
        }
    }

    fn read_flag(&self, path: &str, name: &str) -> bool {
        self.read(path, name).map_or(true, |v| v != 0)
    }

    fn read_color(&self, path: &str, name: &str) -> Option<Color> {
        self.read(path, name).map(Color::from_argb)
    }
}
