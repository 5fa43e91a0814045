//! Effect trait and construction context.

use folio_common::types::{BackgroundEffect, Viewport};
use rand::rngs::StdRng;

use super::video::VideoSourceFactory;
use crate::surface::Canvas;

/// Per-frame input handed to [`Effect::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// Resources available while an effect is being built.
pub struct InitContext<'a> {
    pub viewport: Viewport,
    pub rng: &'a mut StdRng,
    pub video: &'a VideoSourceFactory,
}

/// A running background simulation.
///
/// Coordinates passed to pointer methods are surface pixels.
pub trait Effect: Send {
    fn kind(&self) -> BackgroundEffect;

    /// Advance one frame.
    fn update(&mut self, frame: &FrameContext);

    /// Recompute viewport-dependent values, keeping simulation state.
    fn resize(&mut self, viewport: Viewport);

    fn paint(&self, canvas: &mut dyn Canvas);

    fn pointer_moved(&mut self, _x: f32, _y: f32) {}

    fn pointer_left(&mut self) {}

    /// Release external resources before the effect is dropped.
    fn teardown(&mut self) {}

    /// Message to show in place of the effect after it gave up.
    fn fallback_message(&self) -> Option<&'static str> {
        None
    }
}
