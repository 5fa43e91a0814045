//! Theme selection enums shared by the store and the renderer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Light or dark page mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 2] = [ThemeMode::Light, ThemeMode::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(ConfigError::InvalidValue {
                field: "themeMode",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single highlight hue, chosen from a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Orange,
    Blue,
    Purple,
    Green,
    Pink,
}

impl AccentColor {
    pub const ALL: [AccentColor; 5] = [
        AccentColor::Orange,
        AccentColor::Blue,
        AccentColor::Purple,
        AccentColor::Green,
        AccentColor::Pink,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccentColor::Orange => "orange",
            AccentColor::Blue => "blue",
            AccentColor::Purple => "purple",
            AccentColor::Green => "green",
            AccentColor::Pink => "pink",
        }
    }

    /// Hex value used as the palette's primary color.
    pub fn hex(&self) -> &'static str {
        match self {
            AccentColor::Orange => "#f97316",
            AccentColor::Blue => "#3b82f6",
            AccentColor::Purple => "#a855f7",
            AccentColor::Green => "#22c55e",
            AccentColor::Pink => "#ec4899",
        }
    }
}

impl FromStr for AccentColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccentColor::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "accentColor",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which animated background is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundEffect {
    Particles,
    Waves,
    #[default]
    Gradient,
    Net,
    Live,
    Video,
}

impl BackgroundEffect {
    pub const ALL: [BackgroundEffect; 6] = [
        BackgroundEffect::Particles,
        BackgroundEffect::Waves,
        BackgroundEffect::Gradient,
        BackgroundEffect::Net,
        BackgroundEffect::Live,
        BackgroundEffect::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundEffect::Particles => "particles",
            BackgroundEffect::Waves => "waves",
            BackgroundEffect::Gradient => "gradient",
            BackgroundEffect::Net => "net",
            BackgroundEffect::Live => "live",
            BackgroundEffect::Video => "video",
        }
    }

    /// Human-facing label shown in the control panel.
    pub fn label(&self) -> &'static str {
        match self {
            BackgroundEffect::Particles => "Particles",
            BackgroundEffect::Waves => "Waves",
            BackgroundEffect::Gradient => "Gradient",
            BackgroundEffect::Net => "Network",
            BackgroundEffect::Live => "Interactive",
            BackgroundEffect::Video => "Video",
        }
    }
}

impl FromStr for BackgroundEffect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackgroundEffect::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "backgroundType",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for BackgroundEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the user's theme selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub accent_color: AccentColor,
    pub background_effect: BackgroundEffect,
}
