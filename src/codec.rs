//! Mapping from effect kinds to native DWM attribute IDs and payloads.
//!
//! Every effect in this crate ends up as one `DwmSetWindowAttribute` call
//! with a 32-bit integer payload. This module is the only place that knows
//! the native numbers.

use std::fmt;

/// DWM window attributes, with their native `DWMWINDOWATTRIBUTE` IDs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum WindowAttribute {
    /// Whether non-client rendering is enabled (read only).
    NcRenderingEnabled = 1,
    /// Non-client rendering policy.
    NcRenderingPolicy = 2,
    /// Disables window transitions.
    TransitionsForceDisabled = 3,
    /// Allows painting in the non-client area.
    AllowNcPaint = 4,
    /// Caption button bounds (read only).
    CaptionButtonBounds = 5,
    /// Right-to-left non-client layout.
    NonClientRtlLayout = 6,
    /// Forces an iconic thumbnail representation.
    ForceIconicRepresentation = 7,
    /// Flip3D policy.
    Flip3DPolicy = 8,
    /// Extended frame bounds (read only).
    ExtendedFrameBounds = 9,
    /// The window provides a bitmap for iconic thumbnails.
    HasIconicBitmap = 10,
    /// Disallows Aero Peek.
    DisallowPeek = 11,
    /// Excludes the window from Aero Peek.
    ExcludedFromPeek = 12,
    /// Cloaks the window.
    Cloak = 13,
    /// Cloaked state (read only).
    Cloaked = 14,
    /// Freezes the live thumbnail.
    FreezeRepresentation = 15,
    /// Passive update mode.
    PassiveUpdateMode = 16,
    /// Uses the host backdrop brush.
    UseHostBackdropBrush = 17,
    /// Dark or light rendering of the titlebar.
    UseImmersiveDarkMode = 20,
    /// Rounded corner preference.
    WindowCornerPreference = 33,
    /// Window border color.
    BorderColor = 34,
    /// Caption background color.
    CaptionColor = 35,
    /// Caption text color.
    TextColor = 36,
    /// Visible frame border thickness (read only).
    VisibleFrameBorderThickness = 37,
    /// System-drawn backdrop material.
    SystemBackdropType = 38,
    /// Undocumented Mica toggle used by early Windows 11 builds.
    MicaEffect = 1029,
}

impl WindowAttribute {
    /// Returns the native attribute ID.
    #[inline]
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Returns a short description of the attribute.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NcRenderingEnabled => "Whether non-client rendering is enabled",
            Self::NcRenderingPolicy => "Non-client rendering policy",
            Self::TransitionsForceDisabled => "Disable or enable window transitions",
            Self::AllowNcPaint => "Allow content rendered in the non-client area to be visible",
            Self::CaptionButtonBounds => "Bounds of the caption button area",
            Self::NonClientRtlLayout => "Right-to-left non-client layout",
            Self::ForceIconicRepresentation => "Force a static iconic thumbnail",
            Self::Flip3DPolicy => "How the window is treated by Flip3D",
            Self::ExtendedFrameBounds => "Extended frame bounds in screen space",
            Self::HasIconicBitmap => "The window provides its own iconic thumbnail bitmap",
            Self::DisallowPeek => "Do not show peek preview for the window",
            Self::ExcludedFromPeek => "Prevent the window from fading during peek",
            Self::Cloak => "Cloak the window",
            Self::Cloaked => "Whether the window is cloaked",
            Self::FreezeRepresentation => "Freeze the window's thumbnail image",
            Self::PassiveUpdateMode => "Update the window only when desktop composition runs",
            Self::UseHostBackdropBrush => "Use the host backdrop brush",
            Self::UseImmersiveDarkMode => "Draw the non-client area in dark mode colors",
            Self::WindowCornerPreference => "Rounded corner preference",
            Self::BorderColor => "Window border color",
            Self::CaptionColor => "Caption background color",
            Self::TextColor => "Caption text color",
            Self::VisibleFrameBorderThickness => "Width of the outer border",
            Self::SystemBackdropType => "System-drawn backdrop material",
            Self::MicaEffect => "Legacy Mica toggle for early Windows 11 builds",
        }
    }

    /// Returns the reference documentation URL for attributes of this enum.
    pub const fn docs_url(self) -> &'static str {
        "https://learn.microsoft.com/windows/win32/api/dwmapi/ne-dwmapi-dwmwindowattribute"
    }
}

/// System backdrop materials, with their native `DWM_SYSTEMBACKDROP_TYPE` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BackdropKind {
    /// Let DWM decide the backdrop material.
    Auto = 0,
    /// No backdrop.
    None = 1,
    /// Mica: material for long-lived windows.
    #[default]
    MainWindow = 2,
    /// Acrylic: material for transient windows.
    TransientWindow = 3,
    /// Material for windows with a tabbed title bar.
    TabbedWindow = 4,
}

impl BackdropKind {
    /// All backdrop kinds in native order.
    pub const ALL: [BackdropKind; 5] = [
        Self::Auto,
        Self::None,
        Self::MainWindow,
        Self::TransientWindow,
        Self::TabbedWindow,
    ];

    /// The Mica material.
    pub const MICA: Self = Self::MainWindow;

    /// The Acrylic material.
    pub const ACRYLIC: Self = Self::TransientWindow;

    /// The tabbed material.
    pub const TABBED: Self = Self::TabbedWindow;

    /// Returns the native payload value.
    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Returns a short name for the material.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::None => "none",
            Self::MainWindow => "mica",
            Self::TransientWindow => "acrylic",
            Self::TabbedWindow => "tabbed",
        }
    }

    /// Returns a description of the material.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Auto => "Let the Desktop Window Manager decide the system-drawn backdrop material",
            Self::None => "Do not draw any system backdrop",
            Self::MainWindow => "Draw the backdrop material for a long-lived window",
            Self::TransientWindow => "Draw the backdrop material for a transient window",
            Self::TabbedWindow => "Draw the backdrop material for a window with a tabbed title bar",
        }
    }
}

impl fmt::Display for BackdropKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical attribute value to set on a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    /// Select a system backdrop material.
    SystemBackdrop(BackdropKind),
    /// Restore the system backdrop attribute to 0.
    ResetBackdrop,
    /// Dark (`true`) or light (`false`) titlebar.
    ImmersiveDarkMode(bool),
}

/// A native attribute ID with its 32-bit payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedAttribute {
    /// The attribute to set.
    pub attribute: WindowAttribute,
    /// The payload passed by pointer to the native call.
    pub value: i32,
}

impl EncodedAttribute {
    /// Returns the native attribute ID.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.attribute.id()
    }
}

impl Attribute {
    /// Encodes the attribute into the native ID and payload.
    pub const fn encode(self) -> EncodedAttribute {
        match self {
            Self::SystemBackdrop(kind) => EncodedAttribute {
                attribute: WindowAttribute::SystemBackdropType,
                value: kind.value(),
            },
            Self::ResetBackdrop => EncodedAttribute {
                attribute: WindowAttribute::SystemBackdropType,
                value: 0,
            },
            Self::ImmersiveDarkMode(dark) => EncodedAttribute {
                attribute: WindowAttribute::UseImmersiveDarkMode,
                value: dark as i32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_values() {
        let values: Vec<i32> = BackdropKind::ALL.iter().map(|k| k.value()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
        assert_eq!(BackdropKind::default(), BackdropKind::MICA);
    }

    #[test]
    fn test_encode_backdrop() {
        let encoded = Attribute::SystemBackdrop(BackdropKind::ACRYLIC).encode();
        assert_eq!(encoded.id(), 38);
        assert_eq!(encoded.value, 3);

        let reset = Attribute::ResetBackdrop.encode();
        assert_eq!(reset.id(), 38);
        assert_eq!(reset.value, 0);
    }

    #[test]
    fn test_encode_dark_mode() {
        assert_eq!(Attribute::ImmersiveDarkMode(true).encode().value, 1);
        assert_eq!(Attribute::ImmersiveDarkMode(false).encode().value, 0);
        assert_eq!(Attribute::ImmersiveDarkMode(true).encode().id(), 20);
    }

    #[test]
    fn test_descriptions() {
        for kind in BackdropKind::ALL {
            assert!(!kind.description().is_empty());
        }
        assert_eq!(BackdropKind::TABBED.to_string(), "tabbed");
        assert_eq!(WindowAttribute::MicaEffect.id(), 1029);
        assert!(WindowAttribute::SystemBackdropType.docs_url().starts_with("https://"));
    }
}
