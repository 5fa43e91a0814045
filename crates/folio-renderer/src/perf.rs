//! Frame timing over a rolling window.

use std::collections::VecDeque;
use std::time::Duration;

/// Rolling window of frame durations for FPS and frame-time reporting.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    total_frames: u64,
}

impl FrameTimer {
    /// Default 120-sample window (two seconds at 60 fps).
    pub fn new() -> Self {
        Self::with_window(120)
    }

    pub fn with_window(max_samples: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            total_frames: 0,
        }
    }

    /// Record one frame that took `dt`.
    pub fn record(&mut self, dt: Duration) {
        self.total_frames += 1;
        self.frame_times.push_back(dt);
        while self.frame_times.len() > self.max_samples {
            self.frame_times.pop_front();
        }
    }

    /// Average frames per second over the window.
    pub fn fps(&self) -> f64 {
        let total = self.window_secs();
        if total <= 0.0 {
            return 0.0;
        }
        self.frame_times.len() as f64 / total
    }

    /// Average frame time in milliseconds.
    pub fn frame_time_ms(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.window_secs() / self.frame_times.len() as f64 * 1000.0
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Frames recorded since creation, including those outside the window.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    fn window_secs(&self) -> f64 {
        self.frame_times.iter().map(Duration::as_secs_f64).sum()
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
