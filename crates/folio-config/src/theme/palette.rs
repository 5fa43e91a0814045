//! Palette derivation from (mode, accent).

use folio_common::types::{AccentColor, Color, ThemeMode};
use serde::{Deserialize, Serialize};

/// Colors derived from the current selections. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPalette {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub accent: Color,
}

const DARK_SECONDARY: Color = Color::from_rgba(0x33, 0x33, 0x33, 255);
const DARK_BACKGROUND: Color = Color::from_rgba(0x11, 0x11, 0x11, 255);
const DARK_TEXT: Color = Color::from_rgba(0xff, 0xff, 0xff, 255);
const DARK_TEXT_SECONDARY: Color = Color::from_rgba(0xcc, 0xcc, 0xcc, 255);

const LIGHT_SECONDARY: Color = Color::from_rgba(0xf5, 0xf5, 0xf5, 255);
const LIGHT_BACKGROUND: Color = Color::from_rgba(0xff, 0xff, 0xff, 255);
const LIGHT_TEXT: Color = Color::from_rgba(0x11, 0x11, 0x11, 255);
const LIGHT_TEXT_SECONDARY: Color = Color::from_rgba(0x66, 0x66, 0x66, 255);

/// RGB value behind [`AccentColor::hex`].
pub fn accent_rgb(accent: AccentColor) -> Color {
    match accent {
        AccentColor::Orange => Color::from_rgba(0xf9, 0x73, 0x16, 255),
        AccentColor::Blue => Color::from_rgba(0x3b, 0x82, 0xf6, 255),
        AccentColor::Purple => Color::from_rgba(0xa8, 0x55, 0xf7, 255),
        AccentColor::Green => Color::from_rgba(0x22, 0xc5, 0x5e, 255),
        AccentColor::Pink => Color::from_rgba(0xec, 0x48, 0x99, 255),
    }
}

/// Pure function of its inputs: same inputs, same palette.
pub fn derive_palette(mode: ThemeMode, accent: AccentColor) -> DerivedPalette {
    let primary = accent_rgb(accent);
    match mode {
        ThemeMode::Dark => DerivedPalette {
            primary,
            secondary: DARK_SECONDARY,
            background: DARK_BACKGROUND,
            text: DARK_TEXT,
            text_secondary: DARK_TEXT_SECONDARY,
            accent: primary,
        },
        ThemeMode::Light => DerivedPalette {
            primary,
            secondary: LIGHT_SECONDARY,
            background: LIGHT_BACKGROUND,
            text: LIGHT_TEXT,
            text_secondary: LIGHT_TEXT_SECONDARY,
            accent: primary,
        },
    }
}
