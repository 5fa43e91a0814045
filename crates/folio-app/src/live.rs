//! Long-running modes: the live background loop and the contact server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use folio_common::types::ThemeState;
use folio_common::{Event, FolioError};
use folio_config::{FileWatcher, ReloadManager};
use folio_contact::MemoryContactStorage;
use folio_renderer::{AnimationClock, BackgroundRenderer, FrameTimer};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cli::RunArgs;
use crate::context::AppContext;

/// Seconds between frame-rate log lines.
const STATS_INTERVAL_SECS: u32 = 5;

/// Serve `POST /api/contact` until `shutdown` is cancelled.
pub async fn serve_contact(addr: SocketAddr, shutdown: CancellationToken) -> Result<(), FolioError> {
    let storage = Arc::new(MemoryContactStorage::new());
    folio_contact::serve(addr, storage, async move { shutdown.cancelled().await }).await?;
    info!("contact endpoint stopped");
    Ok(())
}

/// Resolve the contact bind address from an override or `[contact].bind`.
pub fn contact_addr(ctx: &AppContext, bind: Option<SocketAddr>) -> Result<SocketAddr, FolioError> {
    match bind {
        Some(addr) => Ok(addr),
        None => ctx.config.contact.bind.parse().map_err(|e| {
            FolioError::Other(format!(
                "invalid contact bind address {:?}: {e}",
                ctx.config.contact.bind
            ))
        }),
    }
}

/// What a live run did, reported on exit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    pub fps: f64,
    pub theme: ThemeState,
}

/// Drive the background from the animation clock until `shutdown` fires
/// or the optional duration elapses.
///
/// Config edits reconfigure the renderer in place. Preference edits made
/// by another process are reloaded into the store, ambient light/dark
/// changes arrive on `ambient`, and the renderer follows the store's
/// change notifications.
pub async fn run(
    mut ctx: AppContext,
    args: RunArgs,
    shutdown: CancellationToken,
    mut ambient: mpsc::Receiver<bool>,
) -> Result<RunReport, FolioError> {
    let (_, mut config_rx) = ReloadManager::start(ctx.config_path.clone()).await;

    let (prefs_tx, mut prefs_rx) = broadcast::channel::<()>(16);
    let prefs_watcher = FileWatcher::new(ctx.preferences_path().to_path_buf())?;
    let prefs_task = tokio::spawn(async move {
        if let Err(e) = prefs_watcher.watch(prefs_tx).await {
            error!("preference watcher error: {e}");
        }
    });

    let contact_task = if args.contact {
        let addr = contact_addr(&ctx, None)?;
        let token = shutdown.child_token();
        Some(tokio::spawn(serve_contact(addr, token)))
    } else {
        None
    };

    let bus = ctx.store.event_bus().clone();
    let mut events = bus.subscribe();

    let mut renderer = BackgroundRenderer::new(ctx.viewport()).with_event_bus(bus.clone());
    renderer.mount(ctx.render_settings());

    let mut fps = ctx.config.render.fps;
    let (mut clock, mut ticks) = AnimationClock::start_with_token(fps, shutdown.child_token());
    let mut timer = FrameTimer::new();

    let stop_after = deadline(args.duration_secs);
    tokio::pin!(stop_after);

    info!(fps, effect = ?renderer.active_effect(), "live background running");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = &mut stop_after => {
                debug!("run duration elapsed");
                break;
            }
            Some(tick) = ticks.recv() => {
                timer.record(tick.dt);
                renderer.frame(tick.dt.as_secs_f32());
                if timer.total_frames() % u64::from(fps.max(1) * STATS_INTERVAL_SECS) == 0 {
                    debug!(
                        fps = format_args!("{:.1}", timer.fps()),
                        frame_ms = format_args!("{:.2}", timer.frame_time_ms()),
                        "frame stats"
                    );
                }
            }
            changed = config_rx.changed() => {
                if changed.is_err() {
                    warn!("config reload channel closed");
                    continue;
                }
                ctx.config = config_rx.borrow_and_update().clone();
                renderer.resize(ctx.viewport());
                renderer.configure(ctx.render_settings());
                if ctx.config.render.fps != fps {
                    fps = ctx.config.render.fps;
                    clock.stop().await;
                    (clock, ticks) = AnimationClock::start_with_token(fps, shutdown.child_token());
                    info!(fps, "animation clock restarted");
                }
                bus.publish(Event::ConfigReloaded);
            }
            Some(prefers_dark) = ambient.recv() => {
                ctx.store.on_ambient_change(prefers_dark);
            }
            Ok(()) = prefs_rx.recv() => {
                if !ctx.store.reload_from_storage() {
                    debug!("preference file touched, theme unchanged");
                }
            }
            Ok(event) = events.recv() => match event {
                Event::ThemeChanged(state) => {
                    info!(
                        mode = %state.mode,
                        accent = %state.accent_color,
                        background = %state.background_effect,
                        "theme changed"
                    );
                    renderer.configure(ctx.render_settings());
                }
                Event::EffectSwitched { from, to } => {
                    debug!(from = ?from, to = %to, "background switched");
                }
                Event::VideoFallback => {
                    warn!("{}", renderer.fallback_message().unwrap_or("video unavailable"));
                }
                _ => {}
            },
            else => break,
        }
    }

    if let Some(path) = &args.snapshot {
        match renderer.surface() {
            Some(surface) => {
                surface.save_png(path)?;
                info!(path = %path.display(), "snapshot written");
            }
            None => warn!("no surface to snapshot"),
        }
    }

    renderer.unmount();
    clock.stop().await;
    prefs_task.abort();
    bus.publish(Event::Shutdown);

    if let Some(task) = contact_task {
        shutdown.cancel();
        match task.await {
            Ok(result) => result?,
            Err(e) => error!("contact task failed: {e}"),
        }
    }

    let report = RunReport {
        frames: timer.total_frames(),
        fps: timer.fps(),
        theme: ctx.store.state(),
    };
    info!(frames = report.frames, "live background stopped");
    Ok(report)
}

async fn deadline(duration_secs: Option<f64>) {
    match duration_secs {
        Some(secs) if secs.is_finite() && secs >= 0.0 => {
            tokio::time::sleep(Duration::from_secs_f64(secs)).await
        }
        _ => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::types::{BackgroundEffect, ThemeMode};

    fn context(dir: &tempfile::TempDir) -> AppContext {
        AppContext::open(Some(&dir.path().join("folio.toml")), false).unwrap()
    }

    fn no_ambient() -> mpsc::Receiver<bool> {
        mpsc::channel(1).1
    }

    fn ambient_sending(prefers_dark: bool) -> mpsc::Receiver<bool> {
        let (tx, rx) = mpsc::channel(1);
        tx.try_send(prefers_dark).unwrap();
        rx
    }

    fn short_run() -> RunArgs {
        RunArgs {
            duration_secs: Some(0.2),
            ..RunArgs::default()
        }
    }

    #[test]
    fn contact_addr_prefers_override() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        let default = contact_addr(&ctx, None).unwrap();
        assert_eq!(default, "127.0.0.1:5000".parse().unwrap());

        let custom: SocketAddr = "0.0.0.0:9000".parse().unwrap();
        assert_eq!(contact_addr(&ctx, Some(custom)).unwrap(), custom);
    }

    #[test]
    fn bad_bind_address_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        ctx.config.contact.bind = "not an address".into();
        assert!(contact_addr(&ctx, None).is_err());
    }

    #[tokio::test]
    async fn run_stops_after_duration_and_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        ctx.config.render.width = 64;
        ctx.config.render.height = 48;
        ctx.config.render.fps = 30;
        ctx.store.set_background_effect(BackgroundEffect::Waves);

        let snapshot = dir.path().join("live.png");
        let args = RunArgs {
            duration_secs: Some(0.2),
            snapshot: Some(snapshot.clone()),
            contact: false,
        };

        run(ctx, args, CancellationToken::new(), no_ambient())
            .await
            .unwrap();
        let bytes = std::fs::read(&snapshot).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn run_stops_when_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        let token = CancellationToken::new();
        token.cancel();

        let report = run(ctx, RunArgs::default(), token, no_ambient())
            .await
            .unwrap();
        assert!(report.frames < 5);
    }

    #[tokio::test]
    async fn ambient_change_applies_before_a_mode_is_chosen() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);
        assert_eq!(ctx.store.state().mode, ThemeMode::Light);

        let report = run(ctx, short_run(), CancellationToken::new(), ambient_sending(true))
            .await
            .unwrap();
        assert_eq!(report.theme.mode, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn ambient_change_is_ignored_after_set_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir);
        ctx.store.set_mode(ThemeMode::Light);

        let report = run(ctx, short_run(), CancellationToken::new(), ambient_sending(true))
            .await
            .unwrap();
        assert_eq!(report.theme.mode, ThemeMode::Light);
    }

    #[tokio::test]
    async fn serve_contact_returns_after_cancel() {
        let token = CancellationToken::new();
        token.cancel();
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        serve_contact(addr, token).await.unwrap();
    }
}
