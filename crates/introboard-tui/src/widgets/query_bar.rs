//! Query bar widget — the name filter at the bottom of the introductions page.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The right edge shows the match count and, in slideshow mode, the current
//! slide position.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    pub query: String,
    /// Byte offset of the cursor within `query`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Apply an editing event. Returns true if the query text changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.query.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = prev_boundary(&self.query, self.cursor);
                self.query.remove(prev);
                self.cursor = prev;
                tracing::debug!(query = %self.query, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = prev_boundary(&self.query, self.cursor);
                false
            }
            AppEvent::Nav(Direction::Right) => {
                self.cursor = next_boundary(&self.query, self.cursor);
                false
            }
            _ => false,
        }
    }
}

fn prev_boundary(s: &str, at: usize) -> usize {
    s[..at].char_indices().last().map(|(i, _)| i).unwrap_or(0)
}

fn next_boundary(s: &str, at: usize) -> usize {
    s[at..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| at + i)
        .unwrap_or(s.len())
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Counters shown at the right edge of the bar.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryStatus {
    pub matched: usize,
    pub total: usize,
    /// `(index, count)` when slideshow mode is on and something matched.
    pub slide: Option<(usize, usize)>,
    pub slideshow: bool,
}

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    status: QueryStatus,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        status: QueryStatus,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            status,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.state.query[..self.state.cursor].chars().count() as u16;
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

fn status_text(status: &QueryStatus) -> String {
    let mode = match (status.slideshow, status.slide) {
        (true, Some((i, n))) => format!("slide {}/{}", i + 1, n),
        (true, None) => "slide -/0".to_string(),
        (false, _) => "all".to_string(),
    };
    format!("{}/{} · {}", status.matched, status.total, mode)
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Search by name")
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(24)])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        Paragraph::new(Line::from(status_text(&self.status)).right_aligned())
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> QueryBarState {
        let mut state = QueryBarState::default();
        for c in s.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn insert_and_backspace() {
        let mut state = typed("adá");
        assert_eq!(state.query, "adá");
        assert!(state.handle(&AppEvent::Backspace));
        assert_eq!(state.query, "ad");
        assert_eq!(state.cursor, 2);
    }

    #[test]
    fn cursor_moves_without_changing_query() {
        let mut state = typed("ab");
        assert!(!state.handle(&AppEvent::Nav(Direction::Left)));
        state.handle(&AppEvent::Char('x'));
        assert_eq!(state.query, "axb");
        state.handle(&AppEvent::Nav(Direction::Right));
        state.handle(&AppEvent::Nav(Direction::Right));
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut state = QueryBarState::default();
        assert!(!state.handle(&AppEvent::Backspace));
    }

    #[test]
    fn status_reports_slide_position() {
        let status = QueryStatus {
            matched: 3,
            total: 10,
            slide: Some((1, 3)),
            slideshow: true,
        };
        assert_eq!(status_text(&status), "3/10 · slide 2/3");
        let status = QueryStatus {
            slideshow: false,
            ..status
        };
        assert_eq!(status_text(&status), "3/10 · all");
    }
}
