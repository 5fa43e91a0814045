//! Animated background rendering.
//!
//! [`BackgroundRenderer`] owns exactly one effect simulation at a time and
//! paints it into a software [`RasterSurface`]. Effects are selected
//! through a static strategy table keyed by [`BackgroundEffect`]; the host
//! drives frames from an [`AnimationClock`].
//!
//! [`BackgroundEffect`]: folio_common::types::BackgroundEffect

pub mod background;
pub mod camera;
pub mod clock;
pub mod effects;
pub mod listeners;
pub mod perf;
pub mod settings;
pub mod surface;

pub use background::{BackgroundRenderer, RendererStatus};
pub use clock::{AnimationClock, FrameTick};
pub use effects::{strategy_for, Effect, EffectStrategy};
pub use listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
pub use perf::FrameTimer;
pub use settings::{GradientSettings, RenderSettings, VideoSettings};
pub use surface::{Canvas, RasterSurface, SurfaceProvider};
