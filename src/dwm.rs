//! Native compositor: DWM window attributes and layered-window color keys.
//!
//! Backdrops and titlebar themes are DWM window attributes. Transparency is
//! faked with a color key: the window background is filled with the key
//! color and `WS_EX_LAYERED` + `LWA_COLORKEY` make exactly that color see
//! through, so the backdrop material shows wherever nothing else is drawn.
//!
//! The background fill belongs to the single window it was painted on. It
//! is kept in a window property and drawn by a window subclass on
//! `WM_ERASEBKGND`; the window class is never modified.
//!
//! All calls must be made on the thread that owns the window.

use crate::apply::Compositor;
use crate::codec::EncodedAttribute;
use crate::color::Color;
use crate::config::SurfaceColors;
use crate::error::{check_last_error, last_error, Error, Result, ResultExt};
use crate::handle::WindowHandle;
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{
    SetLastError, COLORREF, HANDLE, HWND, LPARAM, LRESULT, RECT, WIN32_ERROR, WPARAM,
};
use windows::Win32::Graphics::Dwm::{DwmSetWindowAttribute, DWMWINDOWATTRIBUTE};
use windows::Win32::Graphics::Gdi::{
    CreateSolidBrush, DeleteObject, FillRect, InvalidateRect, HBRUSH, HDC, HGDIOBJ,
};
use windows::Win32::UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass};
use windows::Win32::UI::WindowsAndMessaging::{
    GetClientRect, GetPropW, GetWindowLongPtrW, IsWindow, RemovePropW, SetLayeredWindowAttributes,
    SetPropW, SetWindowLongPtrW, GWL_EXSTYLE, LWA_COLORKEY, WM_ERASEBKGND, WM_NCDESTROY,
    WS_EX_LAYERED,
};

/// Window property holding the background brush this crate created.
const BRUSH_PROP: PCWSTR = w!("FluentBackdrop.Brush");

/// Window property holding the surface foreground as ARGB.
///
/// Only meaningful while [`BRUSH_PROP`] is set, so a zero foreground is
/// still distinguishable from "never painted".
const FOREGROUND_PROP: PCWSTR = w!("FluentBackdrop.Foreground");

/// Subclass ID of [`surface_proc`].
const SURFACE_SUBCLASS_ID: usize = 0x464C_5542;

/// Applies effects through DWM and the window's layered attributes.
///
/// Each painted window owns one background brush, released when the window
/// is destroyed or by [`release_surface`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DwmCompositor;

impl DwmCompositor {
    /// Creates the native compositor.
    pub fn new() -> Self {
        Self
    }
}

fn checked_hwnd(window: WindowHandle) -> Result<HWND> {
    let hwnd = window.hwnd();
    // SAFETY: IsWindow accepts any value and only reports whether it names
    // an existing window.
    if unsafe { IsWindow(hwnd) }.as_bool() {
        Ok(hwnd)
    } else {
        Err(Error::invalid_handle("window does not exist"))
    }
}

fn is_layered(hwnd: HWND) -> bool {
    // SAFETY: GWL_EXSTYLE is a valid index for any window.
    let ex_style = unsafe { GetWindowLongPtrW(hwnd, GWL_EXSTYLE) };
    (ex_style & WS_EX_LAYERED.0 as isize) != 0
}

fn set_layered(hwnd: HWND, layered: bool) -> Result<()> {
    // SAFETY: hwnd was checked with IsWindow; GWL_EXSTYLE is a valid index.
    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        let flag = WS_EX_LAYERED.0 as isize;
        let new_style = if layered {
            ex_style | flag
        } else {
            ex_style & !flag
        };
        if new_style == ex_style {
            return Ok(());
        }
        SetLastError(WIN32_ERROR(0));
        if SetWindowLongPtrW(hwnd, GWL_EXSTYLE, new_style) == 0 {
            // 0 is also a legitimate previous style, so consult the last error.
            check_last_error()?;
        }
    }
    Ok(())
}

fn repaint(hwnd: HWND) {
    // SAFETY: hwnd was checked with IsWindow; a None rect invalidates the
    // whole client area.
    unsafe {
        let _ = InvalidateRect(hwnd, None, true);
    }
}

fn delete_brush(brush: HANDLE) {
    if !brush.0.is_null() {
        // SAFETY: the brush was created by paint_surface and is no longer
        // referenced by any window property.
        unsafe {
            let _ = DeleteObject(HGDIOBJ(brush.0));
        }
    }
}

/// Removes the subclass and both properties, returning the detached brush.
///
/// # Safety
///
/// Must be called on the thread that owns `hwnd`.
unsafe fn detach_surface(hwnd: HWND) -> HANDLE {
    let _ = RemoveWindowSubclass(hwnd, Some(surface_proc), SURFACE_SUBCLASS_ID);
    let _ = RemovePropW(hwnd, FOREGROUND_PROP);
    RemovePropW(hwnd, BRUSH_PROP).unwrap_or_default()
}

unsafe extern "system" fn surface_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _id: usize,
    _data: usize,
) -> LRESULT {
    match msg {
        WM_ERASEBKGND => {
            let brush = GetPropW(hwnd, BRUSH_PROP);
            let mut client_rect = RECT::default();
            if !brush.0.is_null() && GetClientRect(hwnd, &mut client_rect).is_ok() {
                let hdc = HDC(wparam.0 as *mut core::ffi::c_void);
                FillRect(hdc, &client_rect, HBRUSH(brush.0));
                return LRESULT(1);
            }
        }
        WM_NCDESTROY => delete_brush(detach_surface(hwnd)),
        _ => {}
    }
    DefSubclassProc(hwnd, msg, wparam, lparam)
}

/// Surface state of a window before a paint, restored if the paint fails.
struct PreviousSurface {
    brush: HANDLE,
    foreground: HANDLE,
    layered: bool,
}

impl PreviousSurface {
    fn read(hwnd: HWND) -> Self {
        // SAFETY: GetPropW returns a null handle for unset properties.
        let (brush, foreground) =
            unsafe { (GetPropW(hwnd, BRUSH_PROP), GetPropW(hwnd, FOREGROUND_PROP)) };
        Self {
            brush,
            foreground,
            layered: is_layered(hwnd),
        }
    }

    fn restore(&self, hwnd: HWND) {
        let _ = set_layered(hwnd, self.layered);
        // SAFETY: hwnd is a live window owned by this thread.
        unsafe {
            if self.brush.0.is_null() {
                detach_surface(hwnd);
            } else {
                let _ = SetPropW(hwnd, BRUSH_PROP, self.brush);
                let _ = SetPropW(hwnd, FOREGROUND_PROP, self.foreground);
            }
        }
    }
}

fn install_surface(hwnd: HWND, brush: HBRUSH, colors: SurfaceColors) -> Result<()> {
    // SAFETY: hwnd is a live window owned by this thread. The brush stays
    // alive while it is recorded in BRUSH_PROP.
    unsafe {
        SetPropW(hwnd, BRUSH_PROP, HANDLE(brush.0)).to_result()?;
        SetPropW(
            hwnd,
            FOREGROUND_PROP,
            HANDLE(colors.foreground.to_argb() as usize as *mut _),
        )
        .to_result()?;
        if !SetWindowSubclass(hwnd, Some(surface_proc), SURFACE_SUBCLASS_ID, 0).as_bool() {
            return Err(Error::custom("SetWindowSubclass failed"));
        }
    }

    set_layered(hwnd, true)?;
    // SAFETY: hwnd is a live layered window.
    unsafe {
        SetLayeredWindowAttributes(
            hwnd,
            COLORREF(colors.transparency_key.to_colorref()),
            255,
            LWA_COLORKEY,
        )
        .to_result()?;
    }
    Ok(())
}

impl Compositor for DwmCompositor {
    fn set_attribute(&mut self, window: WindowHandle, attribute: EncodedAttribute) -> Result<()> {
        let hwnd = checked_hwnd(window)?;
        let value = attribute.value;

        // SAFETY: value lives for the duration of the call and its size is
        // passed alongside the pointer.
        unsafe {
            DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute.id() as i32),
                &value as *const i32 as *const _,
                std::mem::size_of::<i32>() as u32,
            )
            .to_result()
        }
    }

    fn paint_surface(&mut self, window: WindowHandle, colors: SurfaceColors) -> Result<()> {
        let hwnd = checked_hwnd(window)?;

        // SAFETY: CreateSolidBrush has no preconditions.
        let brush = unsafe { CreateSolidBrush(COLORREF(colors.background.to_colorref())) };
        if brush.is_invalid() {
            return Err(last_error());
        }

        let previous = PreviousSurface::read(hwnd);
        match install_surface(hwnd, brush, colors) {
            Ok(()) => {
                delete_brush(previous.brush);
                repaint(hwnd);
                Ok(())
            }
            Err(err) => {
                log::warn!("restoring surface of window {} after failed paint", window);
                previous.restore(hwnd);
                delete_brush(HANDLE(brush.0));
                Err(err)
            }
        }
    }

    fn clear_transparency_key(&mut self, window: WindowHandle) -> Result<()> {
        let hwnd = checked_hwnd(window)?;
        // Dropping the layered style discards the color key.
        set_layered(hwnd, false)?;
        repaint(hwnd);
        Ok(())
    }
}

/// Returns the surface foreground last set on the window by
/// [`DwmCompositor`], for hosts that draw their own text.
pub fn foreground_color(window: WindowHandle) -> Option<Color> {
    let hwnd = window.hwnd();
    // SAFETY: GetPropW returns a null handle for unknown windows or
    // properties.
    unsafe {
        if GetPropW(hwnd, BRUSH_PROP).0.is_null() {
            return None;
        }
        let value = GetPropW(hwnd, FOREGROUND_PROP);
        Some(Color::from_argb(value.0 as usize as u32))
    }
}

/// Removes the background fill this crate attached to the window and
/// deletes its brush.
///
/// Destroying the window does the same, so this is only needed to give a
/// still-living window its own background back.
pub fn release_surface(window: WindowHandle) -> Result<()> {
    let hwnd = checked_hwnd(window)?;
    // SAFETY: hwnd is a live window. The subclass is removed before the
    // brush it draws with is deleted.
    let brush = unsafe { detach_surface(hwnd) };
    delete_brush(brush);
    repaint(hwnd);
    Ok(())
}
