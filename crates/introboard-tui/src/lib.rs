//! introboard TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};

use introboard_core::{config::Config, Route};
use introboard_feeds::Loader;

/// Startup options resolved by the CLI.
#[derive(Debug, Clone)]
pub struct Options {
    pub config: Config,
    pub route: Route,
    pub query: Option<String>,
}

/// Start the TUI. Blocks until the user quits.
pub fn run(opts: Options) -> anyhow::Result<()> {
    let loader = Loader::from_config(&opts.config.data)?;
    let theme = theme::Theme::load_default();
    let mut state = AppState::new(opts.config, theme, opts.route);
    if let Some(query) = opts.query.as_deref() {
        state = state.with_query(query);
    }
    App::new(state, loader)?.run()
}
