use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use folio_common::types::{AccentColor, BackgroundEffect, ThemeMode};

/// Largest surface edge `render` accepts, matching `[render]` validation.
const MAX_DIMENSION: i64 = 8192;

/// Themed animated backgrounds and the portfolio contact endpoint.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Ambient light/dark preference, used until a mode is chosen explicitly.
    #[arg(long, global = true, env = "FOLIO_PREFERS_DARK")]
    pub prefers_dark: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the theme state, palette and background description as JSON.
    Show,

    /// Flip between light and dark mode.
    Toggle,

    /// Choose the theme mode explicitly.
    SetMode { mode: ThemeMode },

    /// Choose the accent color.
    SetAccent { accent: AccentColor },

    /// Choose the background effect.
    SetBackground { effect: BackgroundEffect },

    /// Render the background offscreen and write the last frame as PNG.
    Render(RenderArgs),

    /// Serve the contact endpoint.
    Serve {
        /// Address override for `[contact].bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Drive the background live, following config and preference edits.
    Run(RunArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Output PNG path.
    #[arg(short, long, default_value = "folio-background.png")]
    pub out: PathBuf,

    /// Number of frames to simulate before capturing.
    #[arg(long, default_value_t = 60)]
    pub frames: u32,

    /// Render this effect instead of the stored one.
    #[arg(long)]
    pub effect: Option<BackgroundEffect>,

    /// Surface width override in CSS pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub width: Option<u32>,

    /// Surface height override in CSS pixels.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION))]
    pub height: Option<u32>,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Stop after this many seconds instead of waiting for Ctrl-C.
    #[arg(long)]
    pub duration_secs: Option<f64>,

    /// Write the final frame to this PNG on exit.
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Also serve the contact endpoint.
    #[arg(long)]
    pub contact: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_from(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("folio").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let args = parse_from(&[]);
        assert_eq!(args.command, None);
        assert!(args.config.is_none());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = parse_from(&["show", "--config", "/tmp/folio.toml", "--prefers-dark"]);
        assert_eq!(args.command, Some(Command::Show));
        assert_eq!(args.config.as_deref(), Some("/tmp/folio.toml"));
        assert!(args.prefers_dark);
    }

    #[test]
    fn setters_parse_enum_values() {
        assert_eq!(
            parse_from(&["set-mode", "dark"]).command,
            Some(Command::SetMode {
                mode: ThemeMode::Dark
            })
        );
        assert_eq!(
            parse_from(&["set-accent", "purple"]).command,
            Some(Command::SetAccent {
                accent: AccentColor::Purple
            })
        );
        assert_eq!(
            parse_from(&["set-background", "net"]).command,
            Some(Command::SetBackground {
                effect: BackgroundEffect::Net
            })
        );
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(Args::try_parse_from(["folio", "set-accent", "teal"]).is_err());
        assert!(Args::try_parse_from(["folio", "set-background", "stars"]).is_err());
    }

    #[test]
    fn render_defaults() {
        let Some(Command::Render(render)) = parse_from(&["render"]).command else {
            panic!("expected render");
        };
        assert_eq!(render.frames, 60);
        assert_eq!(render.out, PathBuf::from("folio-background.png"));
        assert_eq!(render.effect, None);
    }

    #[test]
    fn render_accepts_overrides() {
        let Some(Command::Render(render)) = parse_from(&[
            "render", "--effect", "waves", "--frames", "5", "--width", "64", "--height", "48", "-o",
            "out.png",
        ])
        .command
        else {
            panic!("expected render");
        };
        assert_eq!(render.effect, Some(BackgroundEffect::Waves));
        assert_eq!((render.frames, render.width, render.height), (5, Some(64), Some(48)));
        assert_eq!(render.out, PathBuf::from("out.png"));
    }

    #[test]
    fn render_size_overrides_are_bounded() {
        for (flag, value) in [("--width", "100000"), ("--height", "8193"), ("--width", "0")] {
            assert!(
                Args::try_parse_from(["folio", "render", flag, value]).is_err(),
                "{flag} {value}"
            );
        }

        let Some(Command::Render(render)) =
            parse_from(&["render", "--width", "8192", "--height", "1"]).command
        else {
            panic!("expected render");
        };
        assert_eq!((render.width, render.height), (Some(8192), Some(1)));
    }

    #[test]
    fn serve_bind_must_be_an_address() {
        let args = parse_from(&["serve", "--bind", "0.0.0.0:8080"]);
        assert_eq!(
            args.command,
            Some(Command::Serve {
                bind: Some("0.0.0.0:8080".parse().unwrap())
            })
        );
        assert!(Args::try_parse_from(["folio", "serve", "--bind", "nowhere"]).is_err());
    }
}
