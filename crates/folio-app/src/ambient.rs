//! Ambient light/dark preference, followed while the app runs.
//!
//! The startup value comes from `--prefers-dark`. After that, changes to
//! the desktop appearance are polled and handed to the theme store, which
//! ignores them once the user has picked a mode.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How often the desktop appearance is sampled.
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Something that can report whether the host prefers a dark appearance.
pub trait AmbientSource: Send + 'static {
    /// `None` when the host does not say.
    fn prefers_dark(&mut self) -> Option<bool>;
}

/// The desktop appearance setting.
#[derive(Debug, Default)]
pub struct SystemAppearance;

impl AmbientSource for SystemAppearance {
    fn prefers_dark(&mut self) -> Option<bool> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Some(true),
            Ok(dark_light::Mode::Light) => Some(false),
            Ok(dark_light::Mode::Unspecified) => None,
            Err(e) => {
                debug!("appearance detection failed: {e}");
                None
            }
        }
    }
}

/// Turns a stream of readings into changes.
///
/// The first reading is the baseline and is not reported; unknown
/// readings never are.
#[derive(Debug, Default)]
pub struct AmbientTracker {
    last: Option<bool>,
}

impl AmbientTracker {
    pub fn observe(&mut self, reading: Option<bool>) -> Option<bool> {
        let reading = reading?;
        match self.last.replace(reading) {
            Some(previous) if previous != reading => Some(reading),
            _ => None,
        }
    }
}

/// Poll `source` every `period` on a blocking thread and send each change
/// until `token` is cancelled.
pub fn spawn_watcher(
    source: impl AmbientSource,
    period: Duration,
    token: CancellationToken,
) -> mpsc::Receiver<bool> {
    let (tx, rx) = mpsc::channel(4);
    let mut source: Box<dyn AmbientSource> = Box::new(source);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut tracker = AmbientTracker::default();

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }

            let sampled = tokio::task::spawn_blocking(move || {
                let reading = source.prefers_dark();
                (source, reading)
            })
            .await;
            let reading = match sampled {
                Ok((returned, reading)) => {
                    source = returned;
                    reading
                }
                Err(e) => {
                    warn!("ambient preference sampling failed: {e}");
                    break;
                }
            };

            if let Some(prefers_dark) = tracker.observe(reading) {
                debug!(prefers_dark, "ambient preference changed");
                if tx.send(prefers_dark).await.is_err() {
                    break;
                }
            }
        }
    });

    rx
}
