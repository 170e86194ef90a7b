#![forbid(unsafe_code)]

//! Persisted light/dark preference.
//!
//! The preference is one string slot (`"dark"` or `"light"`) under a fixed
//! key. [`ThemeStore`] is the only writer; everything else reads the mode it
//! reports.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::Result;

/// Default storage key.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Class applied to the page body in dark mode.
pub const DARK_MODE_CLASS: &str = "dark-mode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Interpret a stored value. Only `"dark"` selects dark mode.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Toggle icon: the mode a click would switch to.
    #[must_use]
    pub const fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }
}

/// A persistent key-value slot.
pub trait PreferenceSlot {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory slot, for tests and hosts without persistent storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_owned(), value.to_owned());
        self
    }
}

impl PreferenceSlot for MemorySlot {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: PreferenceSlot + ?Sized> PreferenceSlot for Box<S> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Owner of the theme preference.
#[derive(Debug)]
pub struct ThemeStore<S> {
    slot: S,
    key: String,
    mode: ThemeMode,
}

impl<S: PreferenceSlot> ThemeStore<S> {
    /// Read the persisted mode from `slot`.
    pub fn load(slot: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mode = ThemeMode::from_stored(slot.read(&key).as_deref());
        debug!(key = %key, mode = mode.as_str(), "theme preference loaded");
        Self { slot, key, mode }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }

    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Flip the mode and persist it. A failed write is logged; the mode still flips.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(err) = self.slot.write(&self.key, self.mode.as_str()) {
            warn!(key = %self.key, error = %err, "failed to persist theme preference");
        }
        self.mode
    }
}
