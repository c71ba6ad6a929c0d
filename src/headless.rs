//! Headless mode — run the loader once and print a page to stdout.
//!
//! [`render`] is pure so harnesses can call it on a hand-built
//! [`LoadState`]; [`run`] wires it to a real [`Loader`].

use introboard_core::{CardView, LoadState, ResolvedCard, Route, Toggles, ViewState, Visible};
use introboard_feeds::Loader;
use introboard_tui::widgets::card_list::{NO_MATCH_TEXT, NO_RECORDS_TEXT};
use introboard_tui::widgets::page::page_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    /// Resolved cards as a JSON array.
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct HeadlessOptions {
    pub route: Option<Route>,
    pub query: Option<String>,
    /// 1-based slide to show. `None` shows every matching card.
    pub slide: Option<usize>,
    pub toggles: Toggles,
    pub format: Format,
}

/// Render the introductions page for a finished load.
///
/// `Err` carries the user-visible load error; it is the only thing a caller
/// should print in that case.
pub fn render(load: &LoadState, opts: &HeadlessOptions) -> Result<String, String> {
    let data = match load {
        LoadState::Failed(msg) => return Err(msg.clone()),
        LoadState::Loading => return Err("introductions are still loading".to_string()),
        LoadState::Ready(data) => data,
    };

    let mut view = ViewState::new(data.records.clone())
        .with_toggles(opts.toggles)
        .with_slideshow(opts.slide.is_some());
    if let Some(query) = &opts.query {
        view.set_query(query.as_str());
    }
    if let Some(slide) = opts.slide {
        view.go_to(slide.saturating_sub(1));
    }

    let origin = data.origin.as_deref();
    let positions = match view.visible() {
        Visible::NoRecords => Vec::new(),
        Visible::Single(pos) => vec![pos],
        Visible::All(positions) => positions,
    };
    let cards: Vec<ResolvedCard> = positions
        .into_iter()
        .filter_map(|pos| view.record(pos))
        .map(|record| record.resolve(origin))
        .collect();
    tracing::debug!(cards = cards.len(), format = ?opts.format, "headless render");

    match opts.format {
        Format::Json => serde_json::to_string_pretty(&cards).map_err(|e| e.to_string()),
        Format::Text if cards.is_empty() => Ok(if view.records().is_empty() {
            NO_RECORDS_TEXT.to_string()
        } else {
            NO_MATCH_TEXT.to_string()
        }),
        Format::Text => Ok(cards
            .iter()
            .map(|card| CardView::build(card, view.toggles()).to_plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

/// Run headless mode. Returns the text to print, or the load error.
pub async fn run(loader: &Loader, opts: &HeadlessOptions) -> Result<String, String> {
    match opts.route {
        Some(route) if route != Route::Introductions => {
            let text = page_text(route).unwrap_or_default();
            Ok(format!("{}\n\n{}", route.title(), text.trim_end()))
        }
        _ => {
            let load = loader.load().await;
            render(&load, opts)
        }
    }
}
