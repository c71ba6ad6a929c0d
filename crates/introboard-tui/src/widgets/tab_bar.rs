//! Tab bar widget — one tab per site route, at the top of the screen.

use crate::theme::Theme;
use introboard_core::Route;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Tabs, Widget},
};

/// Renders the 1-line route strip. The active route is highlighted; the
/// course name and keybinding hints (`q:quit  ?:help`) are right-aligned in
/// the same row.
pub struct TabBar<'a> {
    active: Route,
    course: &'a str,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(active: Route, course: &'a str, theme: &'a Theme) -> Self {
        Self {
            active,
            course,
            theme,
        }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = Route::ALL
            .iter()
            .map(|route| Line::from(format!(" {}:{} ", route.index() + 1, route.title())))
            .collect();

        Tabs::new(labels)
            .select(self.active.index())
            .highlight_style(self.theme.border_focused.add_modifier(Modifier::REVERSED))
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );

        if !self.course.is_empty() {
            let course = format!(" {} ", self.course);
            let course_x = hint_x.saturating_sub(course.chars().count() as u16);
            buf.set_string(course_x, area.y, course, self.theme.heading);
        }
    }
}
