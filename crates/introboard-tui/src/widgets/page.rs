//! Static page widget — Home, Introduction and Contract.
//!
//! Page text is embedded at compile time. Lines starting with `# ` render as
//! headings; `- ` lines render as bullets.

use crate::theme::Theme;
use introboard_core::Route;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

const HOME: &str = include_str!("../pages/home.txt");
const INTRODUCTION: &str = include_str!("../pages/introduction.txt");
const CONTRACT: &str = include_str!("../pages/contract.txt");

/// Embedded text for a static route. The introductions page is dynamic and
/// has none.
pub fn page_text(route: Route) -> Option<&'static str> {
    match route {
        Route::Home => Some(HOME),
        Route::Introduction => Some(INTRODUCTION),
        Route::Contract => Some(CONTRACT),
        Route::Introductions => None,
    }
}

pub fn page_lines<'a>(text: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    text.lines()
        .map(|line| {
            if let Some(heading) = line.strip_prefix("# ") {
                Line::from(Span::styled(heading, theme.heading))
            } else if let Some(item) = line.strip_prefix("- ") {
                Line::from(vec![
                    Span::styled("  • ", theme.label),
                    Span::styled(item, theme.body),
                ])
            } else {
                Line::from(Span::styled(line, theme.body))
            }
        })
        .collect()
}

pub struct StaticPage<'a> {
    route: Route,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> StaticPage<'a> {
    pub fn new(route: Route, scroll: u16, theme: &'a Theme) -> Self {
        Self {
            route,
            scroll,
            theme,
        }
    }
}

impl Widget for StaticPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(format!(" {} ", self.route.title()))
            .border_style(self.theme.border_unfocused);
        let lines = page_text(self.route)
            .map(|text| page_lines(text, self.theme))
            .unwrap_or_default();
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
