//! Composing effects: presets and the `configure` builder.
//!
//! A [`Configure`] session accumulates an [`EffectRequest`] through chained
//! setters and commits it with [`Configure::apply`]. Later setters override
//! earlier ones field by field. Targeting the titlebar only leaves the
//! backdrop and transparency fields dormant; switching back to the full
//! window brings them back.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn demo(window: fluent_backdrop::handle::WindowHandle) -> fluent_backdrop::error::Result<()> {
//! use fluent_backdrop::fluent::Fluent;
//!
//! let mut fluent = Fluent::native();
//!
//! // One-shot preset, theme follows the system
//! fluent.mica(window)?;
//!
//! // Composed configuration
//! fluent.configure(window).acrylic().dark().transparency().apply()?;
//! # Ok(())
//! # }
//! ```

use crate::apply::{Compositor, EffectApplicator};
use crate::codec::BackdropKind;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::handle::WindowHandle;
use crate::theme::{PersonalizationStore, ThemeQuery};
use std::fmt;

/// Which part of the window effects apply to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Target {
    /// Only the titlebar theme.
    TitleBar,
    /// Backdrop, titlebar theme and transparency.
    #[default]
    FullWindow,
}

/// Titlebar and surface theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Dark titlebar and surface.
    Dark,
    /// Light titlebar and surface.
    Light,
    /// Follow the app theme from the personalization store.
    #[default]
    System,
}

/// One native operation of a commit, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Select a backdrop material.
    SetBackdrop(BackdropKind),
    /// Reset the backdrop attribute.
    CancelBackdrop,
    /// Set the titlebar theme.
    SetTheme {
        /// Dark titlebar.
        dark: bool,
    },
    /// Paint the surface and enable the transparency key.
    SetTransparency {
        /// Use the dark surface colors.
        dark: bool,
    },
    /// Remove the transparency key.
    CancelTransparency,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let theme = |dark: bool| if dark { "dark" } else { "light" };
        match self {
            Step::SetBackdrop(kind) => write!(f, "set backdrop ({})", kind),
            Step::CancelBackdrop => f.write_str("cancel backdrop"),
            Step::SetTheme { dark } => write!(f, "set titlebar theme ({})", theme(*dark)),
            Step::SetTransparency { dark } => write!(f, "set transparency ({})", theme(*dark)),
            Step::CancelTransparency => f.write_str("cancel transparency"),
        }
    }
}

/// The desired end state of a window's effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectRequest {
    /// Backdrop material, used only while `backdrop_enabled` is set.
    pub backdrop: BackdropKind,
    /// Whether a backdrop is drawn at all.
    pub backdrop_enabled: bool,
    /// Dark titlebar and surface.
    pub dark: bool,
    /// Which part of the window the request applies to.
    pub target: Target,
    /// Whether the surface is made transparent.
    pub transparency: bool,
}

impl EffectRequest {
    /// Mica, dark, full window, no transparency.
    pub const DEFAULT: Self = Self {
        backdrop: BackdropKind::MainWindow,
        backdrop_enabled: true,
        dark: true,
        target: Target::FullWindow,
        transparency: false,
    };

    /// Selects a backdrop material. [`BackdropKind::None`] disables the backdrop.
    pub const fn with_backdrop(mut self, kind: BackdropKind) -> Self {
        self.backdrop = kind;
        self.backdrop_enabled = !matches!(kind, BackdropKind::None);
        self
    }

    /// Sets a dark (`true`) or light theme.
    pub const fn with_dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Sets the target.
    pub const fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Enables or disables transparency.
    pub const fn with_transparency(mut self, transparency: bool) -> Self {
        self.transparency = transparency;
        self
    }

    /// Resolves the request into the ordered steps that commit it.
    pub fn plan(&self) -> Vec<Step> {
        let theme = Step::SetTheme { dark: self.dark };
        if self.target == Target::TitleBar {
            return vec![theme];
        }

        let backdrop = if self.backdrop_enabled {
            Step::SetBackdrop(self.backdrop)
        } else {
            Step::CancelBackdrop
        };
        let transparency = if self.transparency {
            Step::SetTransparency { dark: self.dark }
        } else {
            Step::CancelTransparency
        };
        vec![backdrop, theme, transparency]
    }
}

impl Default for EffectRequest {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Entry point for window effects: presets, one-shot operations and
/// configure sessions.
#[derive(Debug)]
pub struct Fluent<C, S> {
    applicator: EffectApplicator<C>,
    theme: ThemeQuery<S>,
    defaults: EffectRequest,
}

#[cfg(windows)]
impl Fluent<crate::dwm::DwmCompositor, crate::registry::CurrentUserRegistry> {
    /// Creates an instance backed by DWM and the current user's registry,
    /// using the process-wide [`Settings`].
    pub fn native() -> Self {
        Self::new(
            crate::dwm::DwmCompositor::new(),
            crate::registry::CurrentUserRegistry,
        )
    }
}

impl<C: Compositor, S: PersonalizationStore> Fluent<C, S> {
    /// Creates an instance using the process-wide [`Settings`].
    pub fn new(compositor: C, store: S) -> Self {
        Self::with_settings(compositor, store, Settings::global())
    }

    /// Creates an instance using explicit settings.
    pub fn with_settings(compositor: C, store: S, settings: &Settings) -> Self {
        Self {
            applicator: EffectApplicator::new(compositor, settings.palette),
            theme: ThemeQuery::new(store),
            defaults: settings.request,
        }
    }

    /// Returns the effect applicator.
    pub fn applicator(&self) -> &EffectApplicator<C> {
        &self.applicator
    }

    /// Returns the effect applicator mutably.
    pub fn applicator_mut(&mut self) -> &mut EffectApplicator<C> {
        &mut self.applicator
    }

    /// Returns the theme query.
    pub fn theme_query(&self) -> &ThemeQuery<S> {
        &self.theme
    }

    /// Returns true if the theme should be dark according to the app theme flag.
    pub fn system_prefers_dark(&self) -> bool {
        !self.theme.is_app_theme_light()
    }

    /// Starts a configure session from the default request.
    pub fn configure(&mut self, window: WindowHandle) -> Configure<'_, C, S> {
        let request = self.defaults;
        Configure {
            fluent: self,
            window,
            request,
        }
    }

    /// Commits a request: runs its steps in order and stops at the first
    /// failure, reporting which step failed.
    pub fn apply_request(&mut self, window: WindowHandle, request: &EffectRequest) -> Result<()> {
        let plan = request.plan();
        log::debug!("{}: applying {:?}", window, plan);
        for step in plan {
            self.applicator
                .execute(window, step)
                .map_err(|e| Error::step(step, e))?;
        }
        Ok(())
    }

    /// Applies a backdrop preset with transparency enabled.
    pub fn preset(
        &mut self,
        window: WindowHandle,
        kind: BackdropKind,
        theme: Theme,
        target: Target,
    ) -> Result<()> {
        self.configure(window)
            .backdrop(kind)
            .theme(theme)
            .target(target)
            .transparency()
            .apply()
    }

    /// Applies Mica to the full window, following the system theme.
    pub fn mica(&mut self, window: WindowHandle) -> Result<()> {
        self.mica_with(window, Theme::System, Target::FullWindow)
    }

    /// Applies Mica with an explicit theme and target.
    pub fn mica_with(&mut self, window: WindowHandle, theme: Theme, target: Target) -> Result<()> {
        self.preset(window, BackdropKind::MICA, theme, target)
    }

    /// Applies Acrylic to the full window, following the system theme.
    pub fn acrylic(&mut self, window: WindowHandle) -> Result<()> {
        self.acrylic_with(window, Theme::System, Target::FullWindow)
    }

    /// Applies Acrylic with an explicit theme and target.
    pub fn acrylic_with(
        &mut self,
        window: WindowHandle,
        theme: Theme,
        target: Target,
    ) -> Result<()> {
        self.preset(window, BackdropKind::ACRYLIC, theme, target)
    }

    /// Applies the tabbed material to the full window, following the system theme.
    pub fn tabbed(&mut self, window: WindowHandle) -> Result<()> {
        self.tabbed_with(window, Theme::System, Target::FullWindow)
    }

    /// Applies the tabbed material with an explicit theme and target.
    pub fn tabbed_with(&mut self, window: WindowHandle, theme: Theme, target: Target) -> Result<()> {
        self.preset(window, BackdropKind::TABBED, theme, target)
    }

    /// Applies Mica with the theme read from the system.
    pub fn auto(&mut self, window: WindowHandle) -> Result<()> {
        self.mica(window)
    }

    /// Removes the backdrop and the transparency key.
    pub fn reset(&mut self, window: WindowHandle) -> Result<()> {
        self.remove_backdrop(window)?;
        self.remove_transparency(window)
    }

    /// Re-reads the system theme and applies it to the titlebar and surface.
    pub fn update_theme(&mut self, window: WindowHandle) -> Result<()> {
        let dark = self.system_prefers_dark();
        self.apply_theme(window, dark)?;
        self.apply_transparency(window, dark)
    }

    /// Sets the backdrop material only.
    pub fn apply_backdrop(&mut self, window: WindowHandle, kind: BackdropKind) -> Result<()> {
        let step = Step::SetBackdrop(kind);
        self.applicator
            .execute(window, step)
            .map_err(|e| Error::step(step, e))
    }

    /// Sets the titlebar theme only.
    pub fn apply_theme(&mut self, window: WindowHandle, dark: bool) -> Result<()> {
        let step = Step::SetTheme { dark };
        self.applicator
            .execute(window, step)
            .map_err(|e| Error::step(step, e))
    }

    /// Makes the surface transparent with the colors for the theme.
    pub fn apply_transparency(&mut self, window: WindowHandle, dark: bool) -> Result<()> {
        let step = Step::SetTransparency { dark };
        self.applicator
            .execute(window, step)
            .map_err(|e| Error::step(step, e))
    }

    /// Removes the backdrop.
    pub fn remove_backdrop(&mut self, window: WindowHandle) -> Result<()> {
        self.applicator
            .execute(window, Step::CancelBackdrop)
            .map_err(|e| Error::step(Step::CancelBackdrop, e))
    }

    /// Removes the transparency key.
    pub fn remove_transparency(&mut self, window: WindowHandle) -> Result<()> {
        self.applicator
            .execute(window, Step::CancelTransparency)
            .map_err(|e| Error::step(Step::CancelTransparency, e))
    }
}

/// A configure session for one window.
///
/// Created by [`Fluent::configure`]. Nothing touches the window until
/// [`apply`](Self::apply) is called.
#[must_use = "effects are only committed by `apply`"]
#[derive(Debug)]
pub struct Configure<'a, C, S> {
    fluent: &'a mut Fluent<C, S>,
    window: WindowHandle,
    request: EffectRequest,
}

impl<'a, C: Compositor, S: PersonalizationStore> Configure<'a, C, S> {
    /// Returns the request accumulated so far.
    pub fn request(&self) -> &EffectRequest {
        &self.request
    }

    /// Selects a backdrop material.
    pub fn backdrop(mut self, kind: BackdropKind) -> Self {
        self.request = self.request.with_backdrop(kind);
        self
    }

    /// Lets DWM choose the backdrop material.
    pub fn auto_backdrop(self) -> Self {
        self.backdrop(BackdropKind::Auto)
    }

    /// Disables the backdrop.
    pub fn none(self) -> Self {
        self.backdrop(BackdropKind::None)
    }

    /// Selects Mica.
    pub fn mica(self) -> Self {
        self.backdrop(BackdropKind::MICA)
    }

    /// Selects Acrylic.
    pub fn acrylic(self) -> Self {
        self.backdrop(BackdropKind::ACRYLIC)
    }

    /// Selects the tabbed material.
    pub fn tabbed(self) -> Self {
        self.backdrop(BackdropKind::TABBED)
    }

    /// Sets the theme. [`Theme::System`] reads the app theme flag now.
    pub fn theme(self, theme: Theme) -> Self {
        match theme {
            Theme::Dark => self.dark(),
            Theme::Light => self.light(),
            Theme::System => self.auto(),
        }
    }

    /// Uses the dark theme.
    pub fn dark(mut self) -> Self {
        self.request = self.request.with_dark(true);
        self
    }

    /// Uses the light theme.
    pub fn light(mut self) -> Self {
        self.request = self.request.with_dark(false);
        self
    }

    /// Uses the dark theme unless apps are set to the light theme.
    pub fn auto(mut self) -> Self {
        let dark = self.fluent.system_prefers_dark();
        self.request = self.request.with_dark(dark);
        self
    }

    /// Sets the target.
    pub fn target(mut self, target: Target) -> Self {
        self.request = self.request.with_target(target);
        self
    }

    /// Applies to the titlebar only.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_title_bar(self) -> Self {
        self.target(Target::TitleBar)
    }

    /// Applies to the full window.
    #[allow(clippy::wrong_self_convention)]
    pub fn to_full_window(self) -> Self {
        self.target(Target::FullWindow)
    }

    /// Enables transparency.
    pub fn transparency(mut self) -> Self {
        self.request = self.request.with_transparency(true);
        self
    }

    /// Disables transparency.
    pub fn no_transparency(mut self) -> Self {
        self.request = self.request.with_transparency(false);
        self
    }

    /// Commits the request to the window.
    pub fn apply(self) -> Result<()> {
        self.fluent.apply_request(self.window, &self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WindowAttribute;
    use crate::config::Palette;
    use crate::testing::{window, Call, MemoryStore, RecordingCompositor};
    use crate::theme::{APPS_USE_LIGHT_THEME, PERSONALIZE};

    const BACKDROP: WindowAttribute = WindowAttribute::SystemBackdropType;
    const DARK_MODE: WindowAttribute = WindowAttribute::UseImmersiveDarkMode;

    fn fluent_with(store: MemoryStore) -> Fluent<RecordingCompositor, MemoryStore> {
        Fluent::with_settings(RecordingCompositor::default(), store, &Settings::DEFAULT)
    }

    fn fluent() -> Fluent<RecordingCompositor, MemoryStore> {
        fluent_with(MemoryStore::new())
    }

    fn calls(fluent: &Fluent<RecordingCompositor, MemoryStore>) -> &[Call] {
        &fluent.applicator().compositor().calls
    }

    #[test]
    fn test_mica_dark_full_window() {
        let mut fx = fluent();
        fx.configure(window())
            .mica()
            .dark()
            .to_full_window()
            .apply()
            .unwrap();
        assert_eq!(
            calls(&fx),
            &[
                Call::Attribute(BACKDROP, 2),
                Call::Attribute(DARK_MODE, 1),
                Call::ClearKey,
            ]
        );
    }

    #[test]
    fn test_none_cancels_backdrop() {
        let mut fx = fluent();
        fx.configure(window()).none().apply().unwrap();
        assert_eq!(
            calls(&fx),
            &[
                Call::Attribute(BACKDROP, 0),
                Call::Attribute(DARK_MODE, 1),
                Call::ClearKey,
            ]
        );
    }

    #[test]
    fn test_title_bar_sets_theme_only() {
        let requests = [
            EffectRequest::DEFAULT,
            EffectRequest::DEFAULT.with_transparency(true),
            EffectRequest::DEFAULT.with_backdrop(BackdropKind::None),
            EffectRequest::DEFAULT
                .with_backdrop(BackdropKind::TABBED)
                .with_dark(false)
                .with_transparency(true),
        ];
        for request in requests {
            let request = request.with_target(Target::TitleBar);
            assert_eq!(request.plan(), vec![Step::SetTheme { dark: request.dark }]);

            let mut fx = fluent();
            fx.apply_request(window(), &request).unwrap();
            assert_eq!(calls(&fx), &[Call::Attribute(DARK_MODE, request.dark as i32)]);
        }
    }

    #[test]
    fn test_title_bar_keeps_dormant_fields() {
        let mut fx = fluent();
        let session = fx
            .configure(window())
            .acrylic()
            .transparency()
            .to_title_bar()
            .to_full_window();
        assert_eq!(session.request().backdrop, BackdropKind::ACRYLIC);
        assert!(session.request().transparency);
        session.apply().unwrap();
        assert_eq!(calls(&fx).len(), 3);
        assert_eq!(calls(&fx)[0], Call::Attribute(BACKDROP, 3));
        assert_eq!(calls(&fx)[2], Call::Paint(Palette::DEFAULT.surface(true)));
    }

    #[test]
    fn test_last_write_wins() {
        let mut fx = fluent();
        let session = fx
            .configure(window())
            .none()
            .tabbed()
            .light()
            .dark()
            .transparency()
            .no_transparency();
        assert_eq!(
            *session.request(),
            EffectRequest {
                backdrop: BackdropKind::TABBED,
                backdrop_enabled: true,
                dark: true,
                target: Target::FullWindow,
                transparency: false,
            }
        );
    }

    #[test]
    fn test_auto_backdrop_enables() {
        let request = EffectRequest::DEFAULT
            .with_backdrop(BackdropKind::None)
            .with_backdrop(BackdropKind::Auto);
        assert!(request.backdrop_enabled);
        assert_eq!(request.plan()[0], Step::SetBackdrop(BackdropKind::Auto));
    }

    #[test]
    fn test_auto_theme_negates_light_flag() {
        let light = MemoryStore::new().with(PERSONALIZE, APPS_USE_LIGHT_THEME, 1);
        let mut fx = fluent_with(light);
        assert!(!fx.configure(window()).auto().request().dark);

        let dark = MemoryStore::new().with(PERSONALIZE, APPS_USE_LIGHT_THEME, 0);
        let mut fx = fluent_with(dark);
        assert!(fx.configure(window()).light().auto().request().dark);
    }

    #[test]
    fn test_setters_do_not_apply() {
        let mut fx = fluent();
        let _ = fx.configure(window()).mica().transparency().no_transparency();
        assert!(calls(&fx).is_empty());
    }

    #[test]
    fn test_preset_enables_transparency() {
        let store = MemoryStore::new().with(PERSONALIZE, APPS_USE_LIGHT_THEME, 1);
        let mut fx = fluent_with(store);
        fx.acrylic(window()).unwrap();
        assert_eq!(
            calls(&fx),
            &[
                Call::Attribute(BACKDROP, 3),
                Call::Attribute(DARK_MODE, 0),
                Call::Paint(Palette::DEFAULT.surface(false)),
            ]
        );
    }

    #[test]
    fn test_preset_title_bar() {
        let mut fx = fluent();
        fx.tabbed_with(window(), Theme::Dark, Target::TitleBar)
            .unwrap();
        assert_eq!(calls(&fx), &[Call::Attribute(DARK_MODE, 1)]);
    }

    #[test]
    fn test_auto_is_mica_with_system_theme() {
        let store = MemoryStore::new().with(PERSONALIZE, APPS_USE_LIGHT_THEME, 0);
        let mut fx = fluent_with(store);
        fx.auto(window()).unwrap();
        assert_eq!(calls(&fx)[0], Call::Attribute(BACKDROP, 2));
        assert_eq!(calls(&fx)[1], Call::Attribute(DARK_MODE, 1));
    }

    #[test]
    fn test_reset() {
        let mut fx = fluent();
        fx.mica_with(window(), Theme::Light, Target::FullWindow)
            .unwrap();
        fx.reset(window()).unwrap();
        let compositor = fx.applicator().compositor();
        assert_eq!(compositor.backdrop(window()), Some(0));
        assert_eq!(compositor.transparency_key(window()), None);
        assert_eq!(
            &compositor.calls[3..],
            &[Call::Attribute(BACKDROP, 0), Call::ClearKey]
        );
    }

    #[test]
    fn test_update_theme() {
        let store = MemoryStore::new().with(PERSONALIZE, APPS_USE_LIGHT_THEME, 1);
        let mut fx = fluent_with(store);
        fx.update_theme(window()).unwrap();
        assert_eq!(
            calls(&fx),
            &[
                Call::Attribute(DARK_MODE, 0),
                Call::Paint(Palette::DEFAULT.surface(false)),
            ]
        );
    }

    #[test]
    fn test_failure_reports_first_step() {
        let mut fx = Fluent::with_settings(
            RecordingCompositor::failing(),
            MemoryStore::new(),
            &Settings::DEFAULT,
        );
        let err = fx.configure(window()).tabbed().apply().unwrap_err();
        assert_eq!(
            err.failed_step(),
            Some(Step::SetBackdrop(BackdropKind::TABBED))
        );

        let err = fx.configure(window()).to_title_bar().apply().unwrap_err();
        assert_eq!(err.failed_step(), Some(Step::SetTheme { dark: true }));
    }

    #[test]
    fn test_settings_default_request() {
        let settings = Settings::DEFAULT.request(
            EffectRequest::DEFAULT
                .with_backdrop(BackdropKind::ACRYLIC)
                .with_transparency(true),
        );
        let mut fx =
            Fluent::with_settings(RecordingCompositor::default(), MemoryStore::new(), &settings);
        fx.configure(window()).apply().unwrap();
        assert_eq!(calls(&fx)[0], Call::Attribute(BACKDROP, 3));
        assert!(matches!(calls(&fx)[2], Call::Paint(_)));
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::SetBackdrop(BackdropKind::MICA).to_string(), "set backdrop (mica)");
        assert_eq!(Step::SetTransparency { dark: false }.to_string(), "set transparency (light)");
        assert_eq!(Step::CancelTransparency.to_string(), "cancel transparency");
    }
}
