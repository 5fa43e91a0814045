//! Looping background video with bounded retry.
//!
//! Decoding is the host's job; this effect drives a [`VideoSource`]
//! handle, paints the dimming and edge overlays, and falls back to a
//! static backdrop after repeated failures. It never surfaces errors to
//! the renderer.

use std::collections::VecDeque;
use std::path::PathBuf;

use folio_common::types::{BackgroundEffect, Color, Viewport};
use folio_common::RenderError;
use tracing::{debug, info, warn};

use super::{Effect, FrameContext, InitContext};
use crate::settings::{RenderSettings, VideoSettings};
use crate::surface::{Canvas, GradientStop, Rect};

pub const FALLBACK_MESSAGE: &str = "Video background unavailable";

/// Brightness multiplier applied over the video.
const DIMMING: f32 = 0.6;
const OVERLAY_OPACITY: f32 = 0.7;
/// Height of each edge overlay as a fraction of the surface.
const OVERLAY_EXTENT: f32 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    CanPlay,
    Error(String),
}

/// Host playback handle. The source loops muted; only the rate is tunable.
pub trait VideoSource: Send {
    fn load(&mut self, path: &str) -> Result<(), RenderError>;
    fn play(&mut self) -> Result<(), RenderError>;
    fn set_playback_rate(&mut self, rate: f32);
    /// Next pending playback event, if any.
    fn poll_event(&mut self) -> Option<PlaybackEvent>;
    fn release(&mut self) {}
}

pub type VideoSourceFactory = Box<dyn Fn() -> Box<dyn VideoSource> + Send + Sync>;

/// Factory producing [`FileVideoSource`]s.
pub fn default_factory() -> VideoSourceFactory {
    Box::new(|| Box::new(FileVideoSource::default()))
}

/// Checks that the video asset exists and reports it playable.
///
/// Stands in for a decoder in headless runs.
#[derive(Debug, Default)]
pub struct FileVideoSource {
    loaded: Option<PathBuf>,
    rate: f32,
    events: VecDeque<PlaybackEvent>,
}

impl VideoSource for FileVideoSource {
    fn load(&mut self, path: &str) -> Result<(), RenderError> {
        let path = PathBuf::from(path);
        if !path.is_file() {
            self.loaded = None;
            return Err(RenderError::Video(format!("video not found: {}", path.display())));
        }
        self.loaded = Some(path);
        Ok(())
    }

    fn play(&mut self) -> Result<(), RenderError> {
        if self.loaded.is_none() {
            return Err(RenderError::Video("no video loaded".into()));
        }
        self.events.push_back(PlaybackEvent::CanPlay);
        Ok(())
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.rate = rate;
    }

    fn poll_event(&mut self) -> Option<PlaybackEvent> {
        self.events.pop_front()
    }

    fn release(&mut self) {
        self.loaded = None;
        self.events.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStatus {
    Loading,
    Playing,
    /// Waiting to make retry number `attempt`.
    Retrying { attempt: u32 },
    /// Gave up; the static fallback is shown.
    Unavailable,
}

pub struct VideoLoop {
    source: Option<Box<dyn VideoSource>>,
    settings: VideoSettings,
    status: VideoStatus,
    retries: u32,
    has_error: bool,
    /// Seconds until the pending retry fires.
    retry_in: Option<f32>,
    background: Color,
    size: (u32, u32),
}

pub(super) fn init(settings: &RenderSettings, ctx: &mut InitContext<'_>) -> Box<dyn Effect> {
    Box::new(VideoLoop::new(settings, ctx.viewport, (ctx.video)()))
}

impl VideoLoop {
    pub fn new(settings: &RenderSettings, viewport: Viewport, source: Box<dyn VideoSource>) -> Self {
        let mut video = Self {
            source: Some(source),
            settings: settings.video.clone(),
            status: VideoStatus::Loading,
            retries: 0,
            has_error: false,
            retry_in: None,
            background: settings.background,
            size: viewport.pixel_size(),
        };
        video.start();
        video
    }

    pub fn status(&self) -> VideoStatus {
        self.status
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub fn is_fallback(&self) -> bool {
        self.status == VideoStatus::Unavailable
    }

    fn start(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        let result = source.load(&self.settings.path).and_then(|()| {
            source.set_playback_rate(self.settings.playback_rate);
            source.play()
        });
        match result {
            Ok(()) => {
                if self.status != VideoStatus::Playing {
                    self.status = VideoStatus::Loading;
                }
                debug!(path = %self.settings.path, "video load requested");
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    fn on_error(&mut self, message: String) {
        self.has_error = true;
        if self.status == VideoStatus::Unavailable || self.retry_in.is_some() {
            return;
        }
        if self.retries < self.settings.max_retries {
            let attempt = self.retries + 1;
            warn!(
                attempt,
                max = self.settings.max_retries,
                "video playback failed, retrying: {message}"
            );
            self.retry_in = Some(self.settings.retry_delay.as_secs_f32());
            self.status = VideoStatus::Retrying { attempt };
        } else {
            self.give_up(&message);
        }
    }

    fn give_up(&mut self, message: &str) {
        warn!(
            retries = self.retries,
            "video background unavailable, showing fallback: {message}"
        );
        self.status = VideoStatus::Unavailable;
        self.retry_in = None;
        if let Some(mut source) = self.source.take() {
            source.release();
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.source.as_mut().and_then(|s| s.poll_event()) {
            match event {
                PlaybackEvent::CanPlay => {
                    if self.has_error {
                        info!(retries = self.retries, "video playback recovered");
                    }
                    self.has_error = false;
                    self.status = VideoStatus::Playing;
                }
                PlaybackEvent::Error(message) => self.on_error(message),
            }
        }
    }
}

impl Effect for VideoLoop {
    fn kind(&self) -> BackgroundEffect {
        BackgroundEffect::Video
    }

    fn update(&mut self, frame: &FrameContext) {
        if self.status == VideoStatus::Unavailable {
            return;
        }
        self.drain_events();

        let Some(remaining) = self.retry_in else {
            return;
        };
        let remaining = remaining - frame.dt.max(0.0);
        if remaining > 0.0 {
            self.retry_in = Some(remaining);
            return;
        }
        self.retry_in = None;
        self.retries += 1;
        if self.has_error && self.retries >= self.settings.max_retries {
            self.give_up("retry limit reached");
        } else {
            self.start();
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        self.size = viewport.pixel_size();
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.status == VideoStatus::Unavailable {
            canvas.clear(self.background);
            return;
        }
        canvas.clear(self.background.scaled(DIMMING));

        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        let edge = h * OVERLAY_EXTENT;
        let stops = [
            GradientStop::new(0.0, self.background.with_alpha(OVERLAY_OPACITY)),
            GradientStop::new(1.0, self.background.with_alpha(0.0)),
        ];
        canvas.fill_linear_gradient(Rect::new(0.0, 0.0, w, edge), 180.0, &stops);
        canvas.fill_linear_gradient(Rect::new(0.0, h - edge, w, edge), 0.0, &stops);
    }

    fn teardown(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
        }
        self.retry_in = None;
    }

    fn fallback_message(&self) -> Option<&'static str> {
        self.is_fallback().then_some(FALLBACK_MESSAGE)
    }
}
