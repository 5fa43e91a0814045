//! Cooperative animation clock.
//!
//! A tokio task ticks at a fixed interval and hands [`FrameTick`]s to the
//! owner over a small channel until its [`CancellationToken`] fires.
//! Ticks are dropped, not queued, when the consumer falls behind.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// One scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Sequence number starting at 1.
    pub frame: u64,
    /// Time since the previous tick.
    pub dt: Duration,
}

/// Handle to the running clock task. Cancels the task on drop.
#[derive(Debug)]
pub struct AnimationClock {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl AnimationClock {
    /// Spawn a clock ticking `fps` times per second on the current runtime.
    pub fn start(fps: u32) -> (Self, mpsc::Receiver<FrameTick>) {
        Self::start_with_token(fps, CancellationToken::new())
    }

    /// Like [`AnimationClock::start`], stopping when `token` (or a parent
    /// of it) is cancelled.
    pub fn start_with_token(fps: u32, token: CancellationToken) -> (Self, mpsc::Receiver<FrameTick>) {
        let period = Duration::from_secs_f64(1.0 / f64::from(fps.max(1)));
        let (tx, rx) = mpsc::channel(2);
        let cancelled = token.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = Instant::now();
            let mut frame = 0u64;

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    now = interval.tick() => {
                        frame += 1;
                        let tick = FrameTick { frame, dt: now - last };
                        last = now;
                        match tx.try_send(tick) {
                            Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                            Err(mpsc::error::TrySendError::Closed(_)) => break,
                        }
                    }
                }
            }
            debug!(frames = frame, "animation clock stopped");
        });

        debug!(?period, "animation clock started");
        (
            Self {
                token,
                task: Some(task),
                period,
            },
            rx,
        )
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel and wait for the task to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for AnimationClock {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
