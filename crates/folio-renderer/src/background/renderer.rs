use folio_common::types::{BackgroundEffect, Color, Viewport};
use folio_common::{Event, EventBus};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::effects::video::{default_factory, VideoSourceFactory};
use crate::effects::{strategy_for, Effect, FrameContext, InitContext};
use crate::listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
use crate::settings::RenderSettings;
use crate::surface::{Canvas, OffscreenSurfaces, RasterSurface, SurfaceProvider};

/// Externally visible renderer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererStatus {
    Uninitialized,
    Running(BackgroundEffect),
    TearingDown,
}

/// The live effect plus everything it holds. Dropping this releases the
/// effect's listeners.
struct ActiveEffect {
    settings: RenderSettings,
    effect: Box<dyn Effect>,
    surface: RasterSurface,
    frame_listener: Option<ListenerGuard>,
    pointer_listener: Option<ListenerGuard>,
    resize_listener: ListenerGuard,
    fallback_reported: bool,
}

enum State {
    Uninitialized,
    Running(ActiveEffect),
    TearingDown,
}

/// Owns the single running background effect.
///
/// Lifecycle: [`mount`](Self::mount) builds the effect selected by the
/// settings; [`configure`](Self::configure) rebuilds it when the settings
/// change; [`unmount`](Self::unmount) tears it down. Host events
/// (`frame`, `pointer_moved`, `resize`) are ignored unless an effect is
/// running. Without a surface the renderer stays idle and retries on the
/// next resize.
pub struct BackgroundRenderer {
    state: State,
    /// Last requested settings, kept while idle for a later retry.
    requested: Option<RenderSettings>,
    viewport: Viewport,
    listeners: ListenerRegistry,
    surfaces: Box<dyn SurfaceProvider>,
    video: VideoSourceFactory,
    rng: StdRng,
    bus: Option<EventBus>,
}

impl BackgroundRenderer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: State::Uninitialized,
            requested: None,
            viewport,
            listeners: ListenerRegistry::new(),
            surfaces: Box::new(OffscreenSurfaces),
            video: default_factory(),
            rng: StdRng::from_entropy(),
            bus: None,
        }
    }

    pub fn with_surface_provider(mut self, provider: impl SurfaceProvider + 'static) -> Self {
        self.surfaces = Box::new(provider);
        self
    }

    pub fn with_video_sources(mut self, factory: VideoSourceFactory) -> Self {
        self.video = factory;
        self
    }

    /// Deterministic seeding for reproducible frames.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Publish effect switches and video fallback on `bus`.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn status(&self) -> RendererStatus {
        match &self.state {
            State::Uninitialized => RendererStatus::Uninitialized,
            State::Running(active) => RendererStatus::Running(active.effect.kind()),
            State::TearingDown => RendererStatus::TearingDown,
        }
    }

    pub fn active_effect(&self) -> Option<BackgroundEffect> {
        match self.status() {
            RendererStatus::Running(effect) => Some(effect),
            _ => None,
        }
    }

    pub fn settings(&self) -> Option<&RenderSettings> {
        self.requested.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Observer for the listener counts this renderer registers.
    pub fn listeners(&self) -> ListenerRegistry {
        self.listeners.clone()
    }

    /// Whether the running effect wants per-frame callbacks.
    pub fn wants_frames(&self) -> bool {
        matches!(&self.state, State::Running(active) if active.frame_listener.is_some())
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        match &self.state {
            State::Running(active) => Some(&active.surface),
            _ => None,
        }
    }

    /// Message the host should show in place of the effect, if any.
    pub fn fallback_message(&self) -> Option<&'static str> {
        match &self.state {
            State::Running(active) => active.effect.fallback_message(),
            _ => None,
        }
    }

    /// First configuration. Equivalent to [`configure`](Self::configure).
    pub fn mount(&mut self, settings: RenderSettings) {
        self.configure(settings);
    }

    /// Apply new settings, rebuilding the effect if anything changed.
    pub fn configure(&mut self, settings: RenderSettings) {
        if let State::Running(active) = &self.state {
            if active.settings == settings {
                return;
            }
        }
        self.requested = Some(settings.clone());
        let previous = self.active_effect();
        self.teardown();
        self.start(settings, previous);
    }

    pub fn unmount(&mut self) {
        self.requested = None;
        self.teardown();
    }

    /// Advance the running effect by `dt` seconds and repaint.
    pub fn frame(&mut self, dt: f32) {
        let State::Running(active) = &mut self.state else {
            return;
        };
        if active.frame_listener.is_none() {
            return;
        }
        active.effect.update(&FrameContext { dt });
        repaint(&*active.effect, &mut active.surface);

        if !active.fallback_reported && active.effect.fallback_message().is_some() {
            active.fallback_reported = true;
            if let Some(bus) = &self.bus {
                bus.publish(Event::VideoFallback);
            }
        }
    }

    /// Pointer position in viewport (CSS) pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let ratio = self.pixel_ratio();
        if let State::Running(active) = &mut self.state {
            if active.pointer_listener.is_some() {
                active.effect.pointer_moved(x * ratio, y * ratio);
            }
        }
    }

    pub fn pointer_left(&mut self) {
        if let State::Running(active) = &mut self.state {
            if active.pointer_listener.is_some() {
                active.effect.pointer_left();
            }
        }
    }

    /// Adopt a new viewport without resetting the simulation.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let State::Running(active) = &mut self.state {
            let (width, height) = viewport.pixel_size();
            active.surface.resize(width, height);
            active.effect.resize(viewport);
            repaint(&*active.effect, &mut active.surface);
            debug!(width, height, "background resized");
            return;
        }
        if matches!(self.state, State::Uninitialized) {
            if let Some(settings) = self.requested.clone() {
                self.start(settings, None);
            }
        }
    }

    fn pixel_ratio(&self) -> f32 {
        let ratio = self.viewport.pixel_ratio;
        if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            1.0
        }
    }

    /// Release the running effect, its listeners and its surface.
    fn teardown(&mut self) {
        let State::Running(active) = std::mem::replace(&mut self.state, State::TearingDown) else {
            self.state = State::Uninitialized;
            return;
        };
        let ActiveEffect {
            mut effect,
            surface,
            frame_listener,
            pointer_listener,
            resize_listener,
            ..
        } = active;

        drop(frame_listener);
        drop(pointer_listener);
        drop(resize_listener);
        effect.teardown();
        let kind = effect.kind();
        drop(effect);
        self.surfaces.release(surface);

        debug!(effect = %kind, "background effect torn down");
        self.state = State::Uninitialized;
    }

    fn start(&mut self, settings: RenderSettings, previous: Option<BackgroundEffect>) {
        let Some(mut surface) = self.surfaces.acquire(self.viewport) else {
            debug!(effect = %settings.effect, "no render surface, background idle");
            return;
        };

        let strategy = strategy_for(settings.effect);
        let mut ctx = InitContext {
            viewport: self.viewport,
            rng: &mut self.rng,
            video: &self.video,
        };
        let mut effect = (strategy.init)(&settings, &mut ctx);

        let frame_listener = strategy
            .wants_frames
            .then(|| self.listeners.register(ListenerKind::Frame));
        let pointer_listener = (strategy.wants_pointer && settings.interactive)
            .then(|| self.listeners.register(ListenerKind::Pointer));
        let resize_listener = self.listeners.register(ListenerKind::Resize);

        effect.resize(self.viewport);
        repaint(&*effect, &mut surface);

        info!(effect = %settings.effect, "background effect started");
        if let Some(bus) = &self.bus {
            bus.publish(Event::EffectSwitched {
                from: previous,
                to: settings.effect,
            });
        }

        self.state = State::Running(ActiveEffect {
            settings,
            effect,
            surface,
            frame_listener,
            pointer_listener,
            resize_listener,
            fallback_reported: false,
        });
    }
}

fn repaint(effect: &dyn Effect, surface: &mut RasterSurface) {
    surface.clear(Color::TRANSPARENT);
    effect.paint(surface);
}

impl Drop for BackgroundRenderer {
    fn drop(&mut self) {
        self.teardown();
    }
}
