//! Durable key/value preference storage.
//!
//! The theme store persists its selections as plain strings under a small
//! set of keys. Two backends are provided: an in-memory map for tests and
//! embedding, and a flat TOML file written atomically.

mod file;
mod memory;


pub use file::FileStorage;
pub use memory::MemoryStorage;

use folio_common::ConfigError;

/// Key holding the explicitly chosen theme mode.
pub const THEME_MODE_KEY: &str = "themeMode";
/// Key holding the accent color.
pub const ACCENT_COLOR_KEY: &str = "accentColor";
/// Key holding the background effect.
pub const BACKGROUND_KEY: &str = "backgroundType";
/// Older builds stored the mode under this key.
pub const LEGACY_THEME_MODE_KEY: &str = "theme";
/// Older builds stored the background effect under this key.
pub const LEGACY_BACKGROUND_KEY: &str = "background";

/// A string-to-string preference map that survives restarts.
pub trait PreferenceStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;

    fn remove(&mut self, key: &str) -> Result<(), ConfigError>;

    /// Re-read the backing store after an external change.
    fn refresh(&mut self) -> Result<(), ConfigError> {
        Ok(())
    }
}

impl<S: PreferenceStorage + ?Sized> PreferenceStorage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        (**self).remove(key)
    }

    fn refresh(&mut self) -> Result<(), ConfigError> {
        (**self).refresh()
    }
}
