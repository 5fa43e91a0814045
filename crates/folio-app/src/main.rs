mod ambient;
mod cli;
mod commands;
mod context;
mod live;

use std::path::Path;
use std::process::ExitCode;

use folio_common::FolioError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command, RunArgs};
use context::AppContext;

const DEFAULT_LOG_DIRECTIVE: &str = "folio=info";

fn init_logging(level: Option<&str>) {
    let directive: Result<Directive, _> = level
        .unwrap_or(DEFAULT_LOG_DIRECTIVE)
        .parse()
        .or_else(|_| DEFAULT_LOG_DIRECTIVE.parse());
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = directive {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("Folio v{} starting...", env!("CARGO_PKG_VERSION"));

    match dispatch(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("folio: {e}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(args: Args) -> Result<(), FolioError> {
    let mut ctx = AppContext::open(args.config.as_deref().map(Path::new), args.prefers_dark)?;

    match args.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Show => {
            let report = commands::show(&ctx);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| FolioError::Other(format!("failed to serialize report: {e}")))?;
            println!("{json}");
        }
        Command::Toggle => {
            let mode = commands::toggle(&mut ctx);
            println!("mode = {mode}");
        }
        Command::SetMode { mode } => {
            commands::set_mode(&mut ctx, mode);
            println!("mode = {mode}");
        }
        Command::SetAccent { accent } => {
            commands::set_accent(&mut ctx, accent);
            println!("accent = {accent}");
        }
        Command::SetBackground { effect } => {
            commands::set_background(&mut ctx, effect);
            println!("background = {effect}");
        }
        Command::Render(render) => {
            let summary = commands::render(&ctx, &render)?;
            println!(
                "{} frame(s) of {} at {}x{} -> {}",
                summary.frames,
                summary.effect,
                summary.width,
                summary.height,
                render.out.display()
            );
            if let Some(message) = summary.fallback {
                println!("{message}");
            }
        }
        Command::Serve { bind } => {
            let addr = live::contact_addr(&ctx, bind)?;
            block_on_with_shutdown(|token| live::serve_contact(addr, token))?;
        }
        Command::Run(run) => {
            let report = block_on_with_shutdown(|token| {
                let ambient = ambient::spawn_watcher(
                    ambient::SystemAppearance,
                    ambient::POLL_INTERVAL,
                    token.child_token(),
                );
                live::run(ctx, run, token, ambient)
            })?;
            tracing::info!(
                frames = report.frames,
                fps = format_args!("{:.1}", report.fps),
                "shutdown complete"
            );
        }
    }
    Ok(())
}

/// Run `task` on a fresh runtime, cancelling its token on Ctrl-C.
fn block_on_with_shutdown<F, Fut, T>(task: F) -> Result<T, FolioError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: std::future::Future<Output = Result<T, FolioError>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let token = CancellationToken::new();
        let signal_token = token.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("interrupt received, shutting down");
                    signal_token.cancel();
                }
                Err(e) => tracing::warn!("failed to listen for Ctrl-C: {e}"),
            }
        });
        task(token).await
    })
}
