//! Background effect tuning.

use serde::{Deserialize, Serialize};

/// Video loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoBackgroundConfig {
    pub path: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub playback_rate: f64,
}

impl Default for VideoBackgroundConfig {
    fn default() -> Self {
        Self {
            path: "assets/background-video.mp4".into(),
            max_retries: 3,
            retry_delay_ms: 2000,
            playback_rate: 0.75,
        }
    }
}

/// Declarative gradient settings handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientBackgroundConfig {
    pub angle: u32,
    pub cycle_secs: f64,
}

impl Default for GradientBackgroundConfig {
    fn default() -> Self {
        Self {
            angle: 135,
            cycle_secs: 15.0,
        }
    }
}

/// Settings shared by every animated background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Particle count for the particle field; node count scales from it.
    pub density: u32,
    pub speed: f64,
    /// Whether the pointer pushes particles and nodes around.
    pub interactive: bool,
    pub opacity: f64,
    /// Overrides the palette's secondary color when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    pub video: VideoBackgroundConfig,
    pub gradient: GradientBackgroundConfig,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            density: 500,
            speed: 1.0,
            interactive: true,
            opacity: 0.6,
            secondary_color: None,
            video: VideoBackgroundConfig::default(),
            gradient: GradientBackgroundConfig::default(),
        }
    }
}
