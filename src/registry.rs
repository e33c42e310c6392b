//! Read-only access to the current user's registry.
//!
//! Only what the personalization reads need: open a key, read 32-bit
//! values and enumerate value names. Missing keys and values are reported as
//! `None` rather than as errors.

use crate::error::{Error, Result};
use crate::theme::PersonalizationStore;
use windows::core::{HSTRING, PCWSTR, PWSTR};
use windows::Win32::Foundation::{
    ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS, ERROR_SUCCESS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    RegCloseKey, RegEnumValueW, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_CURRENT_USER,
    KEY_READ, REG_DWORD, REG_VALUE_TYPE,
};

/// Longest value name the registry allows, plus the terminator.
const MAX_VALUE_NAME: usize = 16_384;

/// Helper to convert WIN32_ERROR to Result
fn check_error(err: WIN32_ERROR) -> Result<()> {
    if err == ERROR_SUCCESS {
        Ok(())
    } else {
        Err(Error::Windows(windows::core::Error::from(err)))
    }
}

/// An opened registry key, closed on drop.
#[derive(Debug)]
pub struct Key {
    hkey: HKEY,
}

impl Key {
    /// Opens a key under `HKEY_CURRENT_USER` for reading.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    pub fn open_current_user(path: &str) -> Result<Option<Self>> {
        let path = HSTRING::from(path);
        let mut hkey = HKEY::default();

        // SAFETY: HKEY_CURRENT_USER is a predefined root key, path is a valid
        // null-terminated wide string that outlives the call, hkey is a valid
        // output parameter.
        let err = unsafe {
            RegOpenKeyExW(
                HKEY_CURRENT_USER,
                PCWSTR(path.as_ptr()),
                0,
                KEY_READ,
                &mut hkey,
            )
        };
        if err == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        check_error(err)?;

        Ok(Some(Self { hkey }))
    }

    /// Reads a `REG_DWORD` value.
    ///
    /// Returns `Ok(None)` if the value does not exist and an error if it
    /// exists with another type.
    pub fn get_u32(&self, name: &str) -> Result<Option<u32>> {
        let name_wide = HSTRING::from(name);
        let mut value_type = REG_VALUE_TYPE::default();
        let mut buffer = [0u8; 4];
        let mut size = buffer.len() as u32;

        // SAFETY: self.hkey is an open key we own, name_wide outlives the
        // call, buffer is valid for `size` bytes.
        let err = unsafe {
            RegQueryValueExW(
                self.hkey,
                PCWSTR(name_wide.as_ptr()),
                None,
                Some(&mut value_type),
                Some(buffer.as_mut_ptr()),
                Some(&mut size),
            )
        };

        if err == ERROR_FILE_NOT_FOUND {
            return Ok(None);
        }
        if err == ERROR_MORE_DATA {
            return Err(Error::unsupported_value(format!(
                "{} is {:?}, expected REG_DWORD",
                name, value_type
            )));
        }
        check_error(err)?;

        if value_type != REG_DWORD || size != 4 {
            return Err(Error::unsupported_value(format!(
                "{} is {:?}, expected REG_DWORD",
                name, value_type
            )));
        }
        Ok(Some(u32::from_le_bytes(buffer)))
    }

    /// Enumerates the value names of this key in registry order.
    pub fn value_names(&self) -> Result<Vec<String>> {
        let mut result = Vec::new();
        let mut index = 0u32;
        let mut name_buffer = vec![0u16; MAX_VALUE_NAME];

        loop {
            let mut name_len = name_buffer.len() as u32;

            // SAFETY: self.hkey is an open key, name_buffer is valid for
            // name_len UTF-16 units.
            let err = unsafe {
                RegEnumValueW(
                    self.hkey,
                    index,
                    PWSTR(name_buffer.as_mut_ptr()),
                    &mut name_len,
                    None,
                    None,
                    None,
                    None,
                )
            };

            if err == ERROR_SUCCESS {
                result.push(String::from_utf16_lossy(&name_buffer[..name_len as usize]));
                index += 1;
            } else if err == ERROR_NO_MORE_ITEMS {
                break;
            } else {
                return Err(Error::Windows(windows::core::Error::from(err)));
            }
        }

        Ok(result)
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        // SAFETY: We own this key handle and it's valid. After this call,
        // self.hkey is not used again.
        unsafe {
            let _ = RegCloseKey(self.hkey);
        }
    }
}

/// The personalization store backed by `HKEY_CURRENT_USER`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentUserRegistry;

impl PersonalizationStore for CurrentUserRegistry {
    fn read_u32(&self, path: &str, name: &str) -> Result<Option<u32>> {
        match Key::open_current_user(path)? {
            Some(key) => key.get_u32(name),
            None => Ok(None),
        }
    }

    fn value_names(&self, path: &str) -> Result<Option<Vec<String>>> {
        match Key::open_current_user(path)? {
            Some(key) => key.value_names().map(Some),
            None => Ok(None),
        }
    }
}
