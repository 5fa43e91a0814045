//! The background renderer state machine.
//!
//! Holds at most one running effect. Switching effects tears the old one
//! down completely (listeners, buffers, surface) before the next is built.

mod renderer;

#[cfg(test)]
mod tests;

pub use renderer::{BackgroundRenderer, RendererStatus};
