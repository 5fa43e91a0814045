//! Configuration schema types for Folio.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod background;
mod contact;
mod render;

pub use background::*;
pub use contact::*;
pub use render::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration, read from `folio.toml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub background: BackgroundConfig,
    pub render: RenderConfig,
    pub contact: ContactConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FolioConfig::default();
        assert_eq!(config.background.density, 500);
        assert!((config.background.speed - 1.0).abs() < f64::EPSILON);
        assert!(config.background.interactive);
        assert_eq!(config.background.video.max_retries, 3);
        assert_eq!(config.background.video.retry_delay_ms, 2000);
        assert_eq!(config.render.fps, 60);
        assert_eq!(config.contact.bind, "127.0.0.1:5000");
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config: FolioConfig = toml::from_str("").unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: FolioConfig = toml::from_str(
            r#"
[background]
density = 120

[background.video]
max_retries = 5
"#,
        )
        .unwrap();
        assert_eq!(config.background.density, 120);
        assert!(config.background.interactive);
        assert_eq!(config.background.video.max_retries, 5);
        assert!((config.background.video.playback_rate - 0.75).abs() < f64::EPSILON);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn secondary_color_omitted_when_unset() {
        let toml_str = toml::to_string_pretty(&FolioConfig::default()).unwrap();
        assert!(!toml_str.contains("secondary_color"));
    }
}
