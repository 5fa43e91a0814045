//! Startup wiring shared by every subcommand.

use std::path::{Path, PathBuf};

use folio_common::types::{BackgroundEffect, Viewport};
use folio_common::FolioError;
use folio_config::{toml_loader, validation, FileStorage, FolioConfig, ThemeStore};
use folio_renderer::RenderSettings;
use tracing::info;

/// Preference file name, kept next to `folio.toml`.
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// Loaded config plus the theme store backed by the preference file.
#[derive(Debug)]
pub struct AppContext {
    pub config_path: PathBuf,
    pub config: FolioConfig,
    pub store: ThemeStore<FileStorage>,
}

impl AppContext {
    /// Load (or create) the config and open the preference store next to it.
    pub fn open(config_override: Option<&Path>, prefers_dark: bool) -> Result<Self, FolioError> {
        let config_path = match config_override {
            Some(path) => {
                info!("using config override: {}", path.display());
                path.to_path_buf()
            }
            None => toml_loader::default_config_path()?,
        };

        let config = toml_loader::load_or_create(&config_path)?;
        validation::validate(&config)?;

        let store = ThemeStore::load(
            FileStorage::open(preferences_path(&config_path)),
            prefers_dark,
        );

        Ok(Self {
            config_path,
            config,
            store,
        })
    }

    pub fn preferences_path(&self) -> &Path {
        self.store.storage().path()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.config.render.width,
            height: self.config.render.height,
            pixel_ratio: self.config.render.pixel_ratio as f32,
        }
    }

    /// Settings for the renderer from the current theme and config.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings::from_theme(
            &self.store.state(),
            &self.store.palette(),
            &self.config.background,
        )
    }

    /// Like [`render_settings`](Self::render_settings) with the effect replaced.
    pub fn render_settings_for(&self, effect: Option<BackgroundEffect>) -> RenderSettings {
        let settings = self.render_settings();
        match effect {
            Some(effect) => settings.with_effect(effect),
            None => settings,
        }
    }
}

pub fn preferences_path(config_path: &Path) -> PathBuf {
    config_path.with_file_name(PREFERENCES_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::types::{AccentColor, ThemeMode};

    #[test]
    fn open_creates_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");

        let ctx = AppContext::open(Some(&path), false).unwrap();
        assert!(path.exists());
        assert_eq!(ctx.config, FolioConfig::default());
        assert_eq!(ctx.preferences_path(), dir.path().join(PREFERENCES_FILE));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[render]\nfps = 0\n").unwrap();

        let err = AppContext::open(Some(&path), false).unwrap_err();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn ambient_dark_applies_to_fresh_preferences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");

        let ctx = AppContext::open(Some(&path), true).unwrap();
        let state = ctx.store.state();
        assert_eq!(state.mode, ThemeMode::Dark);
        assert_eq!(state.accent_color, AccentColor::Orange);
        assert_eq!(state.background_effect, BackgroundEffect::Gradient);
    }

    #[test]
    fn selections_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");

        let mut ctx = AppContext::open(Some(&path), true).unwrap();
        ctx.store.set_accent_color(AccentColor::Purple);
        drop(ctx);

        let ctx = AppContext::open(Some(&path), true).unwrap();
        assert_eq!(ctx.store.state().accent_color, AccentColor::Purple);
        assert_eq!(ctx.store.state().mode, ThemeMode::Dark);
    }

    #[test]
    fn viewport_and_settings_follow_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "[render]\nwidth = 320\nheight = 200\n").unwrap();

        let ctx = AppContext::open(Some(&path), false).unwrap();
        assert_eq!(ctx.viewport(), Viewport::new(320, 200));
        assert_eq!(
            ctx.render_settings_for(Some(BackgroundEffect::Net)).effect,
            BackgroundEffect::Net
        );
        assert_eq!(ctx.render_settings().effect, BackgroundEffect::Gradient);
    }
}
