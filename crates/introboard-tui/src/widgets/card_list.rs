//! Card list widget — the body of the Student Introductions page.
//!
//! Maps each [`CardView`] block to styled lines. Shows exactly one of the
//! loading message, the load error, a "no records" notice, or the cards
//! (all of them, or the current slide).

use crate::theme::Theme;
use introboard_core::card::TRAILING_RULE;
use introboard_core::image::{ImageSlot, ImageStatus};
use introboard_core::{CardBlock, CardView, LoadState, ViewState, Visible};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

pub const LOADING_TEXT: &str = "Loading introductions…";
pub const NO_RECORDS_TEXT: &str = "No introductions to show.";
pub const NO_MATCH_TEXT: &str = "No introductions match your search.";

// ---------------------------------------------------------------------------
// Line building
// ---------------------------------------------------------------------------

/// Split `text` into spans, highlighting case-insensitive matches of `needle`.
fn highlighted(text: &str, needle: &str, base: Style, hl: Style) -> Vec<Span<'static>> {
    let lower = text.to_lowercase();
    // Lowercasing must not shift byte offsets for the slices below to line up.
    if needle.is_empty() || lower.len() != text.len() {
        return vec![Span::styled(text.to_string(), base)];
    }
    let mut spans = Vec::new();
    let mut at = 0;
    while let Some(found) = lower[at..].find(needle) {
        let start = at + found;
        let end = start + needle.len();
        if start > at {
            spans.push(Span::styled(text[at..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), hl));
        at = end;
    }
    if at < text.len() {
        spans.push(Span::styled(text[at..].to_string(), base));
    }
    spans
}

fn labelled(label: &str, text: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label),
        Span::styled(text.to_string(), theme.body),
    ])
}

fn image_status_text(status: ImageStatus) -> &'static str {
    match status {
        ImageStatus::Pending => "checking…",
        ImageStatus::Loaded => "ok",
        ImageStatus::Broken => "unavailable",
    }
}

/// Styled lines for one card. `needle` is the normalised search query.
pub fn card_lines(
    card: &CardView,
    image: Option<&ImageSlot>,
    needle: &str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in &card.blocks {
        match block {
            CardBlock::Heading {
                name,
                divider,
                mascot,
            } => {
                let mut spans = Vec::new();
                if let Some(name) = name {
                    spans.extend(highlighted(
                        name,
                        needle,
                        theme.name_style(name),
                        theme.search_highlight,
                    ));
                }
                if let Some(divider) = divider {
                    spans.push(Span::styled(format!(" {divider} "), theme.divider));
                }
                if let Some(mascot) = mascot {
                    if name.is_some() && divider.is_none() {
                        spans.push(Span::raw(" "));
                    }
                    spans.push(Span::styled(mascot.clone(), theme.mascot));
                }
                lines.push(Line::from(spans));
            }
            CardBlock::Image { src, alt, caption } => {
                let (url, status) = match image {
                    Some(slot) => (slot.current(), Some(slot.status())),
                    None => (src.as_str(), None),
                };
                let mut spans = vec![
                    Span::styled("[image] ", theme.label),
                    Span::styled(alt.clone(), theme.body),
                    Span::styled(format!("  {url}"), theme.caption),
                ];
                if let Some(status) = status {
                    spans.push(Span::styled(
                        format!("  ({})", image_status_text(status)),
                        theme.image_style(status),
                    ));
                }
                lines.push(Line::from(spans));
                if let Some(caption) = caption {
                    lines.push(Line::from(Span::styled(format!("  {caption}"), theme.caption)));
                }
            }
            CardBlock::Statement(text) => lines.push(labelled("Personal Statement", text, theme)),
            CardBlock::Background { label, text } => lines.push(labelled(label, text, theme)),
            CardBlock::Device(text) => lines.push(labelled("Primary Computer", text, theme)),
            CardBlock::FunFact(text) => lines.push(labelled("Fun Fact", text, theme)),
            CardBlock::Courses(courses) => {
                lines.push(Line::from(Span::styled(
                    "Courses I'm Taking and Why:",
                    theme.label,
                )));
                for course in courses {
                    let mut spans = vec![
                        Span::styled("  • ", theme.divider),
                        Span::styled(course.label().to_string(), theme.heading),
                    ];
                    if let Some(reason) = course.reason() {
                        spans.push(Span::styled(format!(": {reason}"), theme.body));
                    }
                    lines.push(Line::from(spans));
                }
            }
            CardBlock::Quote { text, author } => {
                lines.push(Line::from(vec![
                    Span::styled("Quote: ", theme.label),
                    Span::styled(format!("\"{text}\""), theme.quote),
                ]));
                if let Some(author) = author {
                    lines.push(Line::from(Span::styled(format!("  — {author}"), theme.caption)));
                }
            }
            CardBlock::Links(links) => {
                let mut spans = vec![Span::styled("Links: ", theme.label)];
                for (i, link) in links.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(" | ", theme.divider));
                    }
                    spans.push(Span::styled(link.label.clone(), theme.link));
                    spans.push(Span::styled(format!(" <{}>", link.url), theme.caption));
                }
                lines.push(Line::from(spans));
            }
            CardBlock::Divider => {
                lines.push(Line::from(Span::styled(TRAILING_RULE, theme.divider)))
            }
        }
    }
    lines
}

/// All body lines for the current load state and view.
pub fn body_lines(
    load: &LoadState,
    view: &ViewState,
    images: &[Option<ImageSlot>],
    theme: &Theme,
) -> Vec<Line<'static>> {
    let data = match load {
        LoadState::Loading => return vec![Line::from(Span::styled(LOADING_TEXT, theme.loading))],
        LoadState::Failed(msg) => {
            return vec![Line::from(Span::styled(msg.clone(), theme.error))];
        }
        LoadState::Ready(data) => data,
    };

    let origin = data.origin.as_deref();
    let needle = introboard_core::search::normalize_query(view.query());
    let render = |pos: usize| -> Vec<Line<'static>> {
        let Some(record) = view.record(pos) else {
            return Vec::new();
        };
        let card = CardView::build(&record.resolve(origin), view.toggles());
        let slot = images.get(pos).and_then(Option::as_ref);
        card_lines(&card, slot, &needle, theme)
    };

    match view.visible() {
        Visible::NoRecords => {
            let text = if view.records().is_empty() {
                NO_RECORDS_TEXT
            } else {
                NO_MATCH_TEXT
            };
            vec![Line::from(Span::styled(text, theme.empty))]
        }
        Visible::Single(pos) => {
            let (i, n) = (view.current_index().unwrap_or(0), view.filtered().len());
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("Slide {} of {}   ← h  previous · next  l →", i + 1, n),
                    theme.caption,
                )),
                Line::default(),
            ];
            lines.extend(render(pos));
            lines
        }
        Visible::All(positions) => {
            let mut lines = Vec::new();
            for pos in positions {
                lines.extend(render(pos));
                lines.push(Line::default());
            }
            lines
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CardList<'a> {
    load: &'a LoadState,
    view: &'a ViewState,
    images: &'a [Option<ImageSlot>],
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> CardList<'a> {
    pub fn new(
        load: &'a LoadState,
        view: &'a ViewState,
        images: &'a [Option<ImageSlot>],
        scroll: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            load,
            view,
            images,
            scroll,
            theme,
        }
    }
}

impl Widget for CardList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.load {
            LoadState::Ready(data) => format!(
                " Student Introductions ({} from {}) ",
                data.records.len(),
                data.source
            ),
            _ => " Student Introductions ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border_unfocused);

        Paragraph::new(body_lines(self.load, self.view, self.images, self.theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
