//! Theme selection, persistence and palette derivation.

mod palette;
mod store;


pub use palette::{accent_rgb, derive_palette, DerivedPalette};
pub use store::ThemeStore;
