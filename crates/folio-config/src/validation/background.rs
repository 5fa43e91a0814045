//! Background sub-config validation (tuning, video, gradient).

use crate::colors::validate_color;
use crate::schema::FolioConfig;

use super::helpers::{validate_range, validate_range_f64};

/// Validate all background-related constraints.
pub(crate) fn validate_background(errors: &mut Vec<String>, config: &FolioConfig) {
    let bg = &config.background;
    validate_range(errors, "background.density", bg.density, 10, 5000);
    validate_range_f64(errors, "background.speed", bg.speed, 0.0, 5.0);
    validate_range_f64(errors, "background.opacity", bg.opacity, 0.0, 1.0);

    if let Some(color) = &bg.secondary_color {
        if !validate_color(color) {
            errors.push(format!(
                "background.secondary_color = {color:?} is not a valid color"
            ));
        }
    }

    validate_range(
        errors,
        "background.video.max_retries",
        bg.video.max_retries,
        0,
        10,
    );
    validate_range(
        errors,
        "background.video.retry_delay_ms",
        bg.video.retry_delay_ms,
        0,
        60_000,
    );
    validate_range_f64(
        errors,
        "background.video.playback_rate",
        bg.video.playback_rate,
        0.1,
        4.0,
    );
    validate_range(
        errors,
        "background.gradient.angle",
        bg.gradient.angle,
        0,
        360,
    );
    validate_range_f64(
        errors,
        "background.gradient.cycle_secs",
        bg.gradient.cycle_secs,
        1.0,
        600.0,
    );
}
