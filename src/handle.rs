//! Non-owning window handles.
//!
//! Effects are applied to windows owned by the host toolkit. This crate never
//! creates or destroys a window, it only borrows the handle for the duration
//! of a call.

use crate::error::{Error, Result};
#[cfg(windows)]
use windows::Win32::Foundation::HWND;

/// An opaque, non-owning reference to a native top-level window.
///
/// The handle is stored as a pointer-sized integer so it can be passed around
/// freely. All calls that use it must happen on the thread that owns the
/// window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowHandle(isize);

impl WindowHandle {
    /// Creates a `WindowHandle` from a raw handle value.
    ///
    /// Returns an error if the value is null.
    #[inline]
    pub fn from_raw(raw: isize) -> Result<Self> {
        if raw == 0 {
            return Err(Error::invalid_handle("Cannot create WindowHandle from null"));
        }
        Ok(Self(raw))
    }

    /// Returns the raw handle value.
    #[inline]
    pub fn as_raw(&self) -> isize {
        self.0
    }

    /// Returns the handle as an `HWND`.
    #[cfg(windows)]
    #[inline]
    pub fn hwnd(&self) -> HWND {
        HWND(self.0 as *mut core::ffi::c_void)
    }
}

#[cfg(windows)]
impl TryFrom<HWND> for WindowHandle {
    type Error = Error;

    fn try_from(hwnd: HWND) -> Result<Self> {
        Self::from_raw(hwnd.0 as isize)
    }
}

impl std::fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
