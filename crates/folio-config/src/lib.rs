//! Folio configuration and theme state.
//!
//! Two kinds of durable state live here. `folio.toml` holds render and
//! background tuning with full validation and live reload. The user's
//! theme selections (mode, accent, background effect) live in a small
//! key/value preference store owned by [`ThemeStore`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use folio_config::{load_config, FileStorage, ThemeStore};
//!
//! let config = load_config().expect("failed to load config");
//! let prefs = folio_config::toml_loader::default_preferences_path().unwrap();
//! let store = ThemeStore::load(FileStorage::open(prefs), false);
//! println!("{:?} {:?}", config.background, store.palette());
//! ```

pub mod colors;
pub mod reload;
pub mod schema;
pub mod storage;
pub mod theme;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{FolioConfig, CONFIG_SCHEMA_VERSION};
pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};
pub use theme::{derive_palette, DerivedPalette, ThemeStore};
pub use toml_writer::{save_config, save_config_to_path};
pub use watcher::FileWatcher;

use folio_common::ConfigError;

/// Load config from the platform default path and validate it.
///
/// Creates a commented default file if none exists.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FolioConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
