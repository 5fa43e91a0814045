//! The theme store: single source of truth for mode, accent and background.

use std::str::FromStr;

use folio_common::types::{AccentColor, BackgroundEffect, ThemeMode, ThemeState};
use folio_common::{ConfigError, Event, EventBus};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::palette::{derive_palette, DerivedPalette};
use crate::storage::{
    PreferenceStorage, ACCENT_COLOR_KEY, BACKGROUND_KEY, LEGACY_BACKGROUND_KEY,
    LEGACY_THEME_MODE_KEY, THEME_MODE_KEY,
};

/// Owns the user's theme selections and their persistence.
///
/// Constructed once at startup and handed to consumers by reference.
/// Every change is written to storage synchronously and announced as
/// [`Event::ThemeChanged`] on the store's [`EventBus`].
///
/// The mode follows the ambient light/dark preference until the user
/// picks one explicitly; from then on ambient changes are ignored.
#[derive(Debug)]
pub struct ThemeStore<S: PreferenceStorage> {
    storage: S,
    state: ThemeState,
    ambient_dark: bool,
    mode_latched: bool,
    bus: EventBus,
}

impl<S: PreferenceStorage> ThemeStore<S> {
    /// Load selections from `storage`, falling back to `prefers_dark` for
    /// the mode and to defaults for everything else.
    pub fn load(storage: S, prefers_dark: bool) -> Self {
        Self::with_bus(storage, prefers_dark, EventBus::default())
    }

    /// Like [`ThemeStore::load`], publishing on an existing bus.
    pub fn with_bus(mut storage: S, prefers_dark: bool, bus: EventBus) -> Self {
        migrate_legacy_keys(&mut storage);
        let (state, mode_latched) = read_state(&storage, prefers_dark);
        info!(
            mode = %state.mode,
            accent = %state.accent_color,
            background = %state.background_effect,
            explicit_mode = mode_latched,
            "theme store loaded"
        );
        Self {
            storage,
            state,
            ambient_dark: prefers_dark,
            mode_latched,
            bus,
        }
    }

    pub fn state(&self) -> ThemeState {
        self.state
    }

    pub fn palette(&self) -> DerivedPalette {
        derive_palette(self.state.mode, self.state.accent_color)
    }

    pub fn is_dark(&self) -> bool {
        self.state.mode.is_dark()
    }

    /// Whether the user has chosen a mode, which stops ambient tracking.
    pub fn is_mode_latched(&self) -> bool {
        self.mode_latched
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn toggle_mode(&mut self) {
        let next = self.state.mode.toggled();
        self.set_mode(next);
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        if !self.mode_latched {
            debug!("explicit mode choice, ambient preference no longer followed");
        }
        self.mode_latched = true;
        self.persist(THEME_MODE_KEY, mode.as_str());
        self.update(|state| state.mode = mode);
    }

    pub fn set_accent_color(&mut self, color: AccentColor) {
        self.persist(ACCENT_COLOR_KEY, color.as_str());
        self.update(|state| state.accent_color = color);
    }

    pub fn set_background_effect(&mut self, effect: BackgroundEffect) {
        self.persist(BACKGROUND_KEY, effect.as_str());
        self.update(|state| state.background_effect = effect);
    }

    /// Apply a raw `key = value` pair from a UI or CLI surface.
    ///
    /// Values outside the key's enum are rejected and leave state untouched.
    pub fn apply_preference(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        match key {
            THEME_MODE_KEY | LEGACY_THEME_MODE_KEY => self.set_mode(raw.parse()?),
            ACCENT_COLOR_KEY => self.set_accent_color(raw.parse()?),
            BACKGROUND_KEY | LEGACY_BACKGROUND_KEY => self.set_background_effect(raw.parse()?),
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "preference key",
                    value: other.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Ambient light/dark preference changed.
    pub fn on_ambient_change(&mut self, prefers_dark: bool) {
        self.ambient_dark = prefers_dark;
        if self.mode_latched {
            debug!(prefers_dark, "ignoring ambient preference, mode chosen explicitly");
            return;
        }
        self.update(|state| state.mode = ThemeMode::from_prefers_dark(prefers_dark));
    }

    /// Re-read storage after something outside this store changed it.
    ///
    /// Returns whether the visible state changed.
    pub fn reload_from_storage(&mut self) -> bool {
        if let Err(e) = self.storage.refresh() {
            warn!("failed to refresh preference storage: {e}");
        }
        migrate_legacy_keys(&mut self.storage);

        let (mut next, persisted_mode) = read_state(&self.storage, self.ambient_dark);
        if self.mode_latched && !persisted_mode {
            next.mode = self.state.mode;
        }
        self.mode_latched |= persisted_mode;

        let changed = self.update(|state| *state = next);
        self.bus.publish(Event::PreferencesReloaded);
        changed
    }

    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            warn!("failed to persist {key} = {value}: {e}");
        }
    }

    fn update(&mut self, apply: impl FnOnce(&mut ThemeState)) -> bool {
        let before = self.state;
        apply(&mut self.state);
        if self.state == before {
            return false;
        }
        let receivers = self.bus.publish(Event::ThemeChanged(self.state));
        debug!(receivers, state = ?self.state, "theme changed");
        true
    }
}

/// Returns the state plus whether the mode came from storage.
fn read_state<S: PreferenceStorage>(storage: &S, prefers_dark: bool) -> (ThemeState, bool) {
    let mode = read_pref::<ThemeMode, _>(storage, THEME_MODE_KEY);
    let persisted_mode = mode.is_some();
    let state = ThemeState {
        mode: mode.unwrap_or_else(|| ThemeMode::from_prefers_dark(prefers_dark)),
        accent_color: read_pref(storage, ACCENT_COLOR_KEY).unwrap_or_default(),
        background_effect: read_pref(storage, BACKGROUND_KEY).unwrap_or_default(),
    };
    (state, persisted_mode)
}

fn read_pref<T: FromStr, S: PreferenceStorage>(storage: &S, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring invalid stored preference {key} = {raw:?}, using default");
            None
        }
    }
}

fn migrate_legacy_keys<S: PreferenceStorage>(storage: &mut S) {
    migrate_key::<ThemeMode, _>(storage, LEGACY_THEME_MODE_KEY, THEME_MODE_KEY);
    migrate_key::<BackgroundEffect, _>(storage, LEGACY_BACKGROUND_KEY, BACKGROUND_KEY);
}

/// Move a valid value from `legacy` to `canonical` unless `canonical` is
/// already set, then drop `legacy`.
fn migrate_key<T: FromStr, S: PreferenceStorage>(storage: &mut S, legacy: &str, canonical: &str) {
    let Some(value) = storage.get(legacy) else {
        return;
    };

    if storage.get(canonical).is_none() {
        if value.parse::<T>().is_ok() {
            if let Err(e) = storage.set(canonical, &value) {
                warn!("failed to migrate preference {legacy} -> {canonical}: {e}");
                return;
            }
            info!("migrated preference {legacy} -> {canonical}");
        } else {
            warn!("dropping invalid legacy preference {legacy} = {value:?}");
        }
    }

    if let Err(e) = storage.remove(legacy) {
        warn!("failed to remove legacy preference {legacy}: {e}");
    }
}
