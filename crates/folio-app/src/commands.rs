//! One-shot subcommands: inspect and change the theme, render a frame.

use std::path::PathBuf;

use folio_common::types::{AccentColor, BackgroundEffect, ThemeMode, ThemeState, Viewport};
use folio_common::{FolioError, RenderError};
use folio_config::DerivedPalette;
use folio_renderer::effects::gradient::{GradientBackdrop, GradientDescription};
use folio_renderer::BackgroundRenderer;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::RenderArgs;
use crate::context::AppContext;

/// Everything `folio show` prints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeReport {
    pub state: ThemeState,
    pub palette: DerivedPalette,
    pub is_dark: bool,
    pub mode_latched: bool,
    pub gradient: GradientDescription,
    pub gradient_css: String,
    pub config_path: PathBuf,
    pub preferences_path: PathBuf,
}

pub fn show(ctx: &AppContext) -> ThemeReport {
    let backdrop = GradientBackdrop::new(&ctx.render_settings(), ctx.viewport());
    let gradient = backdrop.description();
    ThemeReport {
        state: ctx.store.state(),
        palette: ctx.store.palette(),
        is_dark: ctx.store.is_dark(),
        mode_latched: ctx.store.is_mode_latched(),
        gradient_css: gradient.css(),
        gradient,
        config_path: ctx.config_path.clone(),
        preferences_path: ctx.preferences_path().to_path_buf(),
    }
}

pub fn toggle(ctx: &mut AppContext) -> ThemeMode {
    ctx.store.toggle_mode();
    ctx.store.state().mode
}

pub fn set_mode(ctx: &mut AppContext, mode: ThemeMode) {
    ctx.store.set_mode(mode);
}

pub fn set_accent(ctx: &mut AppContext, accent: AccentColor) {
    ctx.store.set_accent_color(accent);
}

pub fn set_background(ctx: &mut AppContext, effect: BackgroundEffect) {
    ctx.store.set_background_effect(effect);
}

/// Outcome of an offscreen render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub effect: BackgroundEffect,
    pub frames: u32,
    pub width: u32,
    pub height: u32,
    pub fallback: Option<&'static str>,
}

/// Mount the background offscreen, advance it `frames` times and save the
/// final surface as PNG.
pub fn render(ctx: &AppContext, args: &RenderArgs) -> Result<RenderSummary, FolioError> {
    let base = ctx.viewport();
    let viewport = Viewport {
        width: args.width.unwrap_or(base.width),
        height: args.height.unwrap_or(base.height),
        pixel_ratio: base.pixel_ratio,
    };
    let settings = ctx.render_settings_for(args.effect);
    let effect = settings.effect;

    let mut renderer = BackgroundRenderer::new(viewport);
    if let Some(seed) = args.seed {
        renderer = renderer.with_seed(seed);
    }
    renderer.mount(settings);
    if renderer.active_effect().is_none() {
        return Err(RenderError::SurfaceUnavailable.into());
    }

    let dt = 1.0 / ctx.config.render.fps.max(1) as f32;
    for _ in 0..args.frames {
        renderer.frame(dt);
    }

    let fallback = renderer.fallback_message();
    if let Some(message) = fallback {
        warn!(effect = %effect, "{message}");
    }

    let surface = renderer
        .surface()
        .ok_or(RenderError::SurfaceUnavailable)?;
    surface.save_png(&args.out)?;
    info!(path = %args.out.display(), effect = %effect, frames = args.frames, "snapshot written");

    let summary = RenderSummary {
        effect,
        frames: args.frames,
        width: surface.width(),
        height: surface.height(),
        fallback,
    };
    renderer.unmount();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::types::Color;

    fn context(dir: &tempfile::TempDir, prefers_dark: bool) -> AppContext {
        AppContext::open(Some(&dir.path().join("folio.toml")), prefers_dark).unwrap()
    }

    fn render_args(out: PathBuf) -> RenderArgs {
        RenderArgs {
            out,
            frames: 3,
            effect: None,
            width: Some(48),
            height: Some(32),
            seed: Some(7),
        }
    }

    #[test]
    fn show_reports_state_and_gradient() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, true);
        let report = show(&ctx);

        assert!(report.is_dark);
        assert!(!report.mode_latched);
        assert_eq!(report.palette.background, Color::from_hex("#111111").unwrap());
        assert!(report.gradient_css.starts_with("linear-gradient(135deg"));

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("state").is_some());
        assert!(json.get("gradientCss").is_some());
        assert_eq!(json["isDark"], serde_json::Value::Bool(true));
    }

    #[test]
    fn toggle_latches_the_mode() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, false);

        assert_eq!(toggle(&mut ctx), ThemeMode::Dark);
        assert!(ctx.store.is_mode_latched());
        ctx.store.on_ambient_change(false);
        assert_eq!(ctx.store.state().mode, ThemeMode::Dark);
    }

    #[test]
    fn setters_update_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context(&dir, false);

        set_mode(&mut ctx, ThemeMode::Dark);
        set_accent(&mut ctx, AccentColor::Green);
        set_background(&mut ctx, BackgroundEffect::Waves);

        let state = ctx.store.state();
        assert_eq!(state.mode, ThemeMode::Dark);
        assert_eq!(state.accent_color, AccentColor::Green);
        assert_eq!(state.background_effect, BackgroundEffect::Waves);
    }

    #[test]
    fn render_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, false);
        let out = dir.path().join("frame.png");

        let summary = render(&ctx, &render_args(out.clone())).unwrap();
        assert_eq!(summary.effect, BackgroundEffect::Gradient);
        assert_eq!((summary.width, summary.height), (48, 32));
        assert_eq!(summary.fallback, None);

        let bytes = std::fs::read(&out).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn render_honours_effect_override() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, false);
        let args = RenderArgs {
            effect: Some(BackgroundEffect::Particles),
            ..render_args(dir.path().join("particles.png"))
        };

        let summary = render(&ctx, &args).unwrap();
        assert_eq!(summary.effect, BackgroundEffect::Particles);
        assert_eq!(summary.frames, 3);
        assert_eq!(ctx.store.state().background_effect, BackgroundEffect::Gradient);
    }

    #[test]
    fn render_rejects_empty_viewport() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir, false);
        let args = RenderArgs {
            width: Some(0),
            ..render_args(dir.path().join("empty.png"))
        };

        let err = render(&ctx, &args).unwrap_err();
        assert!(matches!(err, FolioError::Render(RenderError::SurfaceUnavailable)));
    }
}
