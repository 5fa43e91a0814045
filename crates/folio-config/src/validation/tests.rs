//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&FolioConfig::default()).is_ok());
}

#[test]
fn catches_density_out_of_range() {
    let mut config = FolioConfig::default();
    config.background.density = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("background.density"));
}

#[test]
fn catches_nan_speed() {
    let mut config = FolioConfig::default();
    config.background.speed = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("background.speed"));
}

#[test]
fn catches_bad_secondary_color() {
    let mut config = FolioConfig::default();
    config.background.secondary_color = Some("sky blue".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("background.secondary_color"));
}

#[test]
fn accepts_valid_secondary_color() {
    let mut config = FolioConfig::default();
    config.background.secondary_color = Some("#0ea5e9".into());
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_video_retry_limits() {
    let mut config = FolioConfig::default();
    config.background.video.max_retries = 11;
    config.background.video.playback_rate = 0.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("background.video.max_retries"));
    assert!(err.contains("background.video.playback_rate"));
}

#[test]
fn catches_render_fps_zero() {
    let mut config = FolioConfig::default();
    config.render.fps = 0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("render.fps"));
}

#[test]
fn catches_bad_bind_address() {
    let mut config = FolioConfig::default();
    config.contact.bind = "localhost".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("contact.bind"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = FolioConfig::default();
    config.background.opacity = 2.0;
    config.render.width = 0;
    config.background.gradient.angle = 400;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("background.opacity"));
    assert!(err.contains("render.width"));
    assert!(err.contains("background.gradient.angle"));
    assert!(matches!(
        validate(&config).unwrap_err(),
        ConfigError::ValidationError(_)
    ));
}
