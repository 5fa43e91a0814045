use folio_common::types::{BackgroundEffect, Viewport};
use folio_common::{Event, EventBus};
use tokio::sync::broadcast;

use super::*;
use crate::effects::video::scripted::ScriptHandle;
use crate::listeners::ListenerKind;
use crate::settings::RenderSettings;
use crate::surface::{NoSurface, RasterSurface, SurfaceProvider};

fn renderer() -> BackgroundRenderer {
    BackgroundRenderer::new(Viewport::new(160, 90)).with_seed(11)
}

fn settings(effect: BackgroundEffect) -> RenderSettings {
    RenderSettings::default().with_effect(effect)
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Declines the first `failures` requests, then allocates normally.
struct FlakySurfaces {
    failures: u32,
}

impl SurfaceProvider for FlakySurfaces {
    fn acquire(&mut self, viewport: Viewport) -> Option<RasterSurface> {
        if self.failures > 0 {
            self.failures -= 1;
            return None;
        }
        let (w, h) = viewport.pixel_size();
        Some(RasterSurface::new(w, h))
    }
}

#[test]
fn starts_uninitialized() {
    let r = renderer();
    assert_eq!(r.status(), RendererStatus::Uninitialized);
    assert!(r.surface().is_none());
    assert!(!r.wants_frames());
}

#[test]
fn mount_registers_listeners_for_animated_effects() {
    let mut r = renderer();
    r.mount(settings(BackgroundEffect::Particles));
    let listeners = r.listeners();

    assert_eq!(r.status(), RendererStatus::Running(BackgroundEffect::Particles));
    assert_eq!(listeners.active(ListenerKind::Frame), 1);
    assert_eq!(listeners.active(ListenerKind::Pointer), 1);
    assert_eq!(listeners.active(ListenerKind::Resize), 1);
    assert_eq!(r.surface().map(|s| (s.width(), s.height())), Some((160, 90)));
}

#[test]
fn gradient_has_no_frame_subscription() {
    let mut r = renderer();
    r.mount(settings(BackgroundEffect::Gradient));
    assert!(!r.wants_frames());
    assert_eq!(r.listeners().active(ListenerKind::Frame), 0);

    let before = r.surface().map(|s| s.as_bytes().to_vec());
    r.frame(0.016);
    assert_eq!(r.surface().map(|s| s.as_bytes().to_vec()), before);
}

#[test]
fn switching_never_leaks_listeners() {
    let mut r = renderer();
    let listeners = r.listeners();
    for round in 0..5 {
        for effect in BackgroundEffect::ALL {
            r.configure(settings(effect));
            r.frame(0.016);
            r.pointer_moved(40.0, 30.0);
            assert!(listeners.active(ListenerKind::Frame) <= 1, "round {round} {effect}");
            assert!(listeners.active(ListenerKind::Pointer) <= 1, "round {round} {effect}");
            assert_eq!(listeners.active(ListenerKind::Resize), 1);
            assert_eq!(r.active_effect(), Some(effect));
        }
    }
}

#[test]
fn unmount_releases_everything() {
    let mut r = renderer();
    let listeners = r.listeners();
    r.mount(settings(BackgroundEffect::Live));
    r.unmount();

    assert_eq!(r.status(), RendererStatus::Uninitialized);
    assert!(r.surface().is_none());
    assert!(r.settings().is_none());
    for kind in [ListenerKind::Frame, ListenerKind::Pointer, ListenerKind::Resize] {
        assert_eq!(listeners.active(kind), 0);
    }
}

#[test]
fn dropping_the_renderer_releases_listeners() {
    let mut r = renderer();
    let listeners = r.listeners();
    r.mount(settings(BackgroundEffect::Particles));
    drop(r);
    assert_eq!(listeners.active(ListenerKind::Frame), 0);
    assert_eq!(listeners.active(ListenerKind::Pointer), 0);
}

#[test]
fn identical_settings_do_not_rebuild() {
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    let mut r = renderer().with_event_bus(bus);

    r.mount(settings(BackgroundEffect::Waves));
    r.configure(settings(BackgroundEffect::Waves));
    assert_eq!(
        drain(&mut rx),
        vec![Event::EffectSwitched {
            from: None,
            to: BackgroundEffect::Waves
        }]
    );
}

#[test]
fn changed_tuning_rebuilds_the_same_effect() {
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    let mut r = renderer().with_event_bus(bus);

    r.mount(settings(BackgroundEffect::Net));
    drain(&mut rx);

    let mut faster = settings(BackgroundEffect::Net);
    faster.speed = 2.5;
    r.configure(faster);
    assert_eq!(
        drain(&mut rx),
        vec![Event::EffectSwitched {
            from: Some(BackgroundEffect::Net),
            to: BackgroundEffect::Net
        }]
    );
}

#[test]
fn non_interactive_effects_skip_pointer_listener() {
    let mut r = renderer();
    let mut s = settings(BackgroundEffect::Live);
    s.interactive = false;
    r.mount(s);
    assert_eq!(r.listeners().active(ListenerKind::Pointer), 0);
    assert_eq!(r.listeners().active(ListenerKind::Frame), 1);
}

#[test]
fn missing_surface_is_a_no_op() {
    let mut r = renderer().with_surface_provider(NoSurface);
    let listeners = r.listeners();
    r.mount(settings(BackgroundEffect::Particles));

    assert_eq!(r.status(), RendererStatus::Uninitialized);
    r.frame(0.016);
    r.pointer_moved(10.0, 10.0);
    r.pointer_left();
    r.resize(Viewport::new(320, 180));
    assert_eq!(r.status(), RendererStatus::Uninitialized);
    assert_eq!(listeners.active(ListenerKind::Frame), 0);
    assert_eq!(listeners.active(ListenerKind::Resize), 0);
}

#[test]
fn resize_retries_mount_once_a_surface_appears() {
    let mut r = renderer().with_surface_provider(FlakySurfaces { failures: 1 });
    r.mount(settings(BackgroundEffect::Waves));
    assert_eq!(r.status(), RendererStatus::Uninitialized);

    r.resize(Viewport::new(200, 100));
    assert_eq!(r.status(), RendererStatus::Running(BackgroundEffect::Waves));
    assert_eq!(r.surface().map(|s| s.width()), Some(200));
}

#[test]
fn resize_keeps_the_running_simulation() {
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    let mut r = renderer().with_event_bus(bus);
    r.mount(settings(BackgroundEffect::Live));
    for _ in 0..10 {
        r.frame(0.016);
    }
    drain(&mut rx);

    r.resize(Viewport::new(320, 240));
    assert!(drain(&mut rx).is_empty(), "resize must not rebuild the effect");
    assert_eq!(r.status(), RendererStatus::Running(BackgroundEffect::Live));
    assert_eq!(r.surface().map(|s| (s.width(), s.height())), Some((320, 240)));
    assert_eq!(r.listeners().active(ListenerKind::Resize), 1);
}

#[test]
fn pixel_ratio_scales_the_surface() {
    let viewport = Viewport {
        pixel_ratio: 2.0,
        ..Viewport::new(100, 50)
    };
    let mut r = BackgroundRenderer::new(viewport).with_seed(3);
    r.mount(settings(BackgroundEffect::Particles));
    assert_eq!(r.surface().map(|s| (s.width(), s.height())), Some((200, 100)));
}

#[test]
fn frames_repaint_the_surface() {
    let mut r = renderer();
    r.mount(settings(BackgroundEffect::Waves));
    let before = r.surface().map(|s| s.as_bytes().to_vec());
    for _ in 0..30 {
        r.frame(0.016);
    }
    assert_ne!(r.surface().map(|s| s.as_bytes().to_vec()), before);
}

#[test]
fn video_fallback_is_reported_once() {
    let handle = ScriptHandle::default();
    let bus = EventBus::default();
    let mut rx = bus.subscribe();
    let mut r = renderer()
        .with_video_sources(handle.factory())
        .with_event_bus(bus);
    r.mount(settings(BackgroundEffect::Video));
    drain(&mut rx);

    for _ in 0..3 {
        handle.fail();
        r.frame(0.016);
        r.frame(2.0);
    }
    assert_eq!(r.fallback_message(), Some("Video background unavailable"));

    handle.fail();
    r.frame(0.016);
    r.frame(2.0);
    let events = drain(&mut rx);
    assert_eq!(events, vec![Event::VideoFallback]);
    assert_eq!(r.status(), RendererStatus::Running(BackgroundEffect::Video));
}

#[test]
fn switching_away_from_video_releases_the_source() {
    let handle = ScriptHandle::default();
    let mut r = renderer().with_video_sources(handle.factory());
    r.mount(settings(BackgroundEffect::Video));
    assert!(!handle.released());

    r.configure(settings(BackgroundEffect::Gradient));
    assert!(handle.released());
    assert_eq!(r.fallback_message(), None);
}
