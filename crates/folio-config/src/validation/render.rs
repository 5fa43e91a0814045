//! Render surface and contact endpoint validation.

use std::net::SocketAddr;

use crate::schema::FolioConfig;

use super::helpers::{validate_range, validate_range_f64};

pub(crate) fn validate_render(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_range(errors, "render.width", config.render.width, 1, 8192);
    validate_range(errors, "render.height", config.render.height, 1, 8192);
    validate_range_f64(
        errors,
        "render.pixel_ratio",
        config.render.pixel_ratio,
        0.5,
        4.0,
    );
    validate_range(errors, "render.fps", config.render.fps, 1, 240);
}

pub(crate) fn validate_contact(errors: &mut Vec<String>, config: &FolioConfig) {
    if config.contact.bind.parse::<SocketAddr>().is_err() {
        errors.push(format!(
            "contact.bind = {:?} is not a socket address",
            config.contact.bind
        ));
    }
}
