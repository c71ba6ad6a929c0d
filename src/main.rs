use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use introboard::headless::{self, Format, HeadlessOptions};
use introboard_core::{config::Config, Route};
use introboard_feeds::Loader;

#[derive(Parser)]
#[command(name = "introboard", about = "Student introductions board for the terminal")]
struct Cli {
    /// Write debug logs to /tmp/introboard-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Print one page to stdout instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Local JSON file tried before the remote source.
    #[arg(long, value_name = "PATH")]
    local: Option<PathBuf>,

    /// Remote JSON endpoint used when the local file is unusable.
    #[arg(long, value_name = "URL")]
    remote: Option<String>,

    /// Page to open: `/`, `/introduction`, `/contract` or `/introductions`.
    #[arg(long, value_name = "PATH", value_parser = parse_route)]
    page: Option<Route>,

    /// Initial name filter.
    #[arg(long)]
    query: Option<String>,

    /// Start in slideshow mode. Headless output shows slide N (1-based).
    #[arg(long, value_name = "N")]
    slideshow: Option<usize>,

    /// Comma-separated card sections to hide (e.g. `mascot,links`).
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,

    /// Headless output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn parse_route(s: &str) -> Result<Route, String> {
    Route::from_path(s).ok_or_else(|| format!("unknown page {s:?}"))
}

fn init_debug_log() -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("/tmp/introboard-debug.log")?;
    tracing_subscriber::fmt()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();
    tracing::info!("introboard debug log started; tail -f /tmp/introboard-debug.log");
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        init_debug_log()?;
    }

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::defaults()
    });
    if let Some(local) = cli.local {
        config.data.local_path = local;
    }
    if let Some(remote) = cli.remote {
        config.data.remote_url = remote;
    }
    config.ui.hidden_sections.extend(cli.hide);
    if cli.slideshow.is_some() {
        config.ui.slideshow = true;
    }

    if cli.headless {
        let opts = HeadlessOptions {
            route: cli.page,
            query: cli.query,
            slide: cli.slideshow.or(config.ui.slideshow.then_some(1)),
            toggles: config.ui.toggles(),
            format: cli.format,
        };
        let loader = Loader::from_config(&config.data)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        return Ok(match runtime.block_on(headless::run(&loader, &opts)) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(msg) => {
                eprintln!("{msg}");
                ExitCode::FAILURE
            }
        });
    }

    introboard_tui::run(introboard_tui::Options {
        config,
        route: cli.page.unwrap_or(Route::Introductions),
        query: cli.query,
    })?;
    Ok(ExitCode::SUCCESS)
}
