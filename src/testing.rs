//! Test doubles for the compositor and personalization store.

use crate::apply::Compositor;
use crate::codec::{EncodedAttribute, WindowAttribute};
use crate::color::Color;
use crate::config::SurfaceColors;
use crate::error::{Error, Result};
use crate::handle::WindowHandle;
use crate::theme::PersonalizationStore;
use std::collections::HashMap;

/// The window every test uses.
pub fn window() -> WindowHandle {
    WindowHandle::from_raw(0x10_0042).unwrap()
}

/// One recorded compositor call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Attribute(WindowAttribute, i32),
    Paint(SurfaceColors),
    ClearKey,
}

/// Records calls and tracks the resulting window state.
#[derive(Debug, Default)]
pub struct RecordingCompositor {
    pub calls: Vec<Call>,
    attributes: HashMap<(WindowHandle, WindowAttribute), i32>,
    keys: HashMap<WindowHandle, Color>,
    fail: bool,
}

impl RecordingCompositor {
    /// A compositor whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn backdrop(&self, window: WindowHandle) -> Option<i32> {
        self.attributes
            .get(&(window, WindowAttribute::SystemBackdropType))
            .copied()
    }

    pub fn transparency_key(&self, window: WindowHandle) -> Option<Color> {
        self.keys.get(&window).copied()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(Error::custom("compositor unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Compositor for RecordingCompositor {
    fn set_attribute(&mut self, window: WindowHandle, attribute: EncodedAttribute) -> Result<()> {
        self.check()?;
        self.calls
            .push(Call::Attribute(attribute.attribute, attribute.value));
        self.attributes
            .insert((window, attribute.attribute), attribute.value);
        Ok(())
    }

    fn paint_surface(&mut self, window: WindowHandle, colors: SurfaceColors) -> Result<()> {
        self.check()?;
        self.calls.push(Call::Paint(colors));
        self.keys.insert(window, colors.transparency_key);
        Ok(())
    }

    fn clear_transparency_key(&mut self, window: WindowHandle) -> Result<()> {
        self.check()?;
        self.calls.push(Call::ClearKey);
        self.keys.remove(&window);
        Ok(())
    }
}

/// An in-memory personalization store that keeps insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Vec<(String, String, Option<u32>)>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every read fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Adds a 32-bit value.
    pub fn with(mut self, path: &str, name: &str, value: u32) -> Self {
        self.entries.push((path.into(), name.into(), Some(value)));
        self
    }

    /// Adds a value of some other type.
    pub fn with_other(mut self, path: &str, name: &str) -> Self {
        self.entries.push((path.into(), name.into(), None));
        self
    }
}

impl PersonalizationStore for MemoryStore {
    fn read_u32(&self, path: &str, name: &str) -> Result<Option<u32>> {
        if self.fail {
            return Err(Error::custom("store unavailable"));
        }
        match self.entries.iter().find(|(p, n, _)| p == path && n == name) {
            Some((_, _, Some(value))) => Ok(Some(*value)),
            Some((_, _, None)) => Err(Error::unsupported_value(format!("{} is not a DWORD", name))),
            None => Ok(None),
        }
    }

    fn value_names(&self, path: &str) -> Result<Option<Vec<String>>> {
        if self.fail {
            return Err(Error::custom("store unavailable"));
        }
        let names: Vec<String> = self
            .entries
            .iter()
            .filter(|(p, _, _)| p == path)
            .map(|(_, n, _)| n.clone())
            .collect();
        Ok((!names.is_empty()).then_some(names))
    }
}
