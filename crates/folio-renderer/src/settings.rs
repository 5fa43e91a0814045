//! Everything an effect needs to construct itself.
//!
//! Built from the theme state, its derived palette, and the background
//! section of `folio.toml`. The renderer compares successive settings to
//! decide whether the running effect must be rebuilt.

use std::time::Duration;

use folio_common::types::{BackgroundEffect, Color, ThemeState};
use folio_config::colors::parse_color;
use folio_config::schema::BackgroundConfig;
use folio_config::DerivedPalette;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSettings {
    pub path: String,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub playback_rate: f32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            path: "assets/background-video.mp4".into(),
            max_retries: 3,
            retry_delay: Duration::from_secs(2),
            playback_rate: 0.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientSettings {
    pub angle_deg: f32,
    pub cycle_secs: f32,
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self {
            angle_deg: 135.0,
            cycle_secs: 15.0,
        }
    }
}

/// Inputs for one effect instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub effect: BackgroundEffect,
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub density: u32,
    pub speed: f32,
    pub interactive: bool,
    pub opacity: f32,
    pub video: VideoSettings,
    pub gradient: GradientSettings,
}

impl RenderSettings {
    pub fn from_theme(state: &ThemeState, palette: &DerivedPalette, config: &BackgroundConfig) -> Self {
        let secondary = match config.secondary_color.as_deref() {
            Some(raw) => parse_color(raw).unwrap_or_else(|e| {
                warn!("ignoring background.secondary_color: {e}");
                palette.secondary
            }),
            None => palette.secondary,
        };

        Self {
            effect: state.background_effect,
            primary: palette.primary,
            secondary,
            background: palette.background,
            density: config.density,
            speed: finite_or(config.speed as f32, 1.0),
            interactive: config.interactive,
            opacity: finite_or(config.opacity as f32, 1.0).clamp(0.0, 1.0),
            video: VideoSettings {
                path: config.video.path.clone(),
                max_retries: config.video.max_retries,
                retry_delay: Duration::from_millis(config.video.retry_delay_ms),
                playback_rate: finite_or(config.video.playback_rate as f32, 0.75),
            },
            gradient: GradientSettings {
                angle_deg: config.gradient.angle as f32,
                cycle_secs: finite_or(config.gradient.cycle_secs as f32, 15.0),
            },
        }
    }

    /// Same settings with a different effect selected.
    pub fn with_effect(mut self, effect: BackgroundEffect) -> Self {
        self.effect = effect;
        self
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        let state = ThemeState::default();
        let palette = folio_config::derive_palette(state.mode, state.accent_color);
        Self::from_theme(&state, &palette, &BackgroundConfig::default())
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
