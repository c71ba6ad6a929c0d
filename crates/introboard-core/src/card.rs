//! Card model — a resolved record laid out as toggleable sections.
//!
//! [`CardView::build`] is the single place that decides which blocks a card
//! shows. The TUI maps blocks to styled lines; headless mode uses
//! [`CardView::to_plain_text`]. A missing field drops only its own block.

use serde::Serialize;

use crate::resolve::ResolvedCard;
use crate::types::{CourseEntry, Link};

/// Shown between name and mascot when the record carries no `divider`.
pub const DEFAULT_DIVIDER: &str = "~";

/// Rule drawn after a card when both name and mascot are shown.
pub const TRAILING_RULE: &str = "────────────────────────────────";

const SECTION_COUNT: usize = 10;

// ---------------------------------------------------------------------------
// Sections and toggles
// ---------------------------------------------------------------------------

/// Independently toggleable parts of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Section {
    Name,
    Mascot,
    Image,
    Statement,
    Backgrounds,
    Device,
    FunFact,
    Courses,
    Quote,
    Links,
}

static SECTION_NAMES: phf::Map<&'static str, Section> = phf::phf_map! {
    "name" => Section::Name,
    "mascot" => Section::Mascot,
    "image" => Section::Image,
    "photo" => Section::Image,
    "statement" => Section::Statement,
    "bio" => Section::Statement,
    "background" => Section::Backgrounds,
    "backgrounds" => Section::Backgrounds,
    "device" => Section::Device,
    "computer" => Section::Device,
    "funfact" => Section::FunFact,
    "fun-fact" => Section::FunFact,
    "fun_fact" => Section::FunFact,
    "course" => Section::Courses,
    "courses" => Section::Courses,
    "quote" => Section::Quote,
    "link" => Section::Links,
    "links" => Section::Links,
};

impl Section {
    pub const ALL: [Section; SECTION_COUNT] = [
        Section::Name,
        Section::Mascot,
        Section::Image,
        Section::Statement,
        Section::Backgrounds,
        Section::Device,
        Section::FunFact,
        Section::Courses,
        Section::Quote,
        Section::Links,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Name => "Name",
            Section::Mascot => "Mascot",
            Section::Image => "Image",
            Section::Statement => "Personal Statement",
            Section::Backgrounds => "Backgrounds",
            Section::Device => "Primary Computer",
            Section::FunFact => "Fun Fact",
            Section::Courses => "Courses",
            Section::Quote => "Quote",
            Section::Links => "Links",
        }
    }

    /// Parse a user-facing section name (`"fun-fact"`, `"Courses"`, …).
    pub fn from_name(name: &str) -> Option<Section> {
        SECTION_NAMES.get(name.trim().to_ascii_lowercase().as_str()).copied()
    }

    /// Digit key bound to this section: `1`–`9`, then `0`.
    pub fn hotkey(self) -> char {
        let idx = self as usize;
        if idx == 9 {
            '0'
        } else {
            char::from(b'1' + idx as u8)
        }
    }

    pub fn from_hotkey(c: char) -> Option<Section> {
        match c {
            '0' => Some(Section::Links),
            '1'..='9' => Section::ALL.get(c as usize - '1' as usize).copied(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Show/hide switch per [`Section`]. Everything is visible by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    visible: [bool; SECTION_COUNT],
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            visible: [true; SECTION_COUNT],
        }
    }
}

impl Toggles {
    /// Build from a list of section names to hide. Unknown names are skipped.
    pub fn with_hidden<S: AsRef<str>>(names: &[S]) -> Self {
        let mut toggles = Self::default();
        for name in names {
            match Section::from_name(name.as_ref()) {
                Some(section) => toggles.set(section, false),
                None => tracing::warn!(name = name.as_ref(), "unknown section name ignored"),
            }
        }
        toggles
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.visible[section as usize]
    }

    pub fn set(&mut self, section: Section, visible: bool) {
        self.visible[section as usize] = visible;
    }

    /// Flip a section; returns its new visibility.
    pub fn toggle(&mut self, section: Section) -> bool {
        let slot = &mut self.visible[section as usize];
        *slot = !*slot;
        *slot
    }
}

// ---------------------------------------------------------------------------
// Card blocks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBlock {
    /// Name and/or mascot. `divider` is set only when both are shown.
    Heading {
        name: Option<String>,
        divider: Option<String>,
        mascot: Option<String>,
    },
    Image {
        src: String,
        alt: String,
        caption: Option<String>,
    },
    Statement(String),
    Background {
        label: &'static str,
        text: String,
    },
    Device(String),
    FunFact(String),
    Courses(Vec<CourseEntry>),
    Quote {
        text: String,
        author: Option<String>,
    },
    Links(Vec<Link>),
    /// Rule between cards; mirrors the heading divider rule.
    Divider,
}

/// One card, ready to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub key: String,
    pub blocks: Vec<CardBlock>,
}

impl CardView {
    pub fn build(card: &ResolvedCard, toggles: &Toggles) -> Self {
        let mut blocks = Vec::new();

        let name = toggles
            .is_visible(Section::Name)
            .then(|| card.name.clone());
        let mascot = card
            .mascot
            .clone()
            .filter(|_| toggles.is_visible(Section::Mascot));
        let both = name.is_some() && mascot.is_some();

        if name.is_some() || mascot.is_some() {
            let divider = both.then(|| {
                card.divider
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DIVIDER.to_string())
            });
            blocks.push(CardBlock::Heading { name, divider, mascot });
        }

        if toggles.is_visible(Section::Image) {
            if let Some(img) = &card.image {
                blocks.push(CardBlock::Image {
                    src: img.src.clone(),
                    alt: img.alt.clone(),
                    caption: img.caption.clone(),
                });
            }
        }

        if toggles.is_visible(Section::Statement) {
            if let Some(text) = &card.statement {
                blocks.push(CardBlock::Statement(text.clone()));
            }
        }

        if toggles.is_visible(Section::Backgrounds) {
            blocks.extend(card.backgrounds.entries().into_iter().map(|(label, text)| {
                CardBlock::Background {
                    label,
                    text: text.to_string(),
                }
            }));
        }

        if toggles.is_visible(Section::Device) {
            if let Some(device) = &card.device {
                blocks.push(CardBlock::Device(device.clone()));
            }
        }

        if toggles.is_visible(Section::FunFact) {
            if let Some(fact) = &card.fun_fact {
                blocks.push(CardBlock::FunFact(fact.clone()));
            }
        }

        if toggles.is_visible(Section::Courses) && !card.courses.is_empty() {
            blocks.push(CardBlock::Courses(card.courses.clone()));
        }

        if toggles.is_visible(Section::Quote) {
            if let Some(quote) = &card.quote {
                blocks.push(CardBlock::Quote {
                    text: quote.text.clone(),
                    author: quote.author.clone(),
                });
            }
        }

        if toggles.is_visible(Section::Links) && !card.links.is_empty() {
            blocks.push(CardBlock::Links(card.links.clone()));
        }

        if both {
            blocks.push(CardBlock::Divider);
        }

        Self {
            key: card.key.clone(),
            blocks,
        }
    }

    pub fn heading(&self) -> Option<&CardBlock> {
        self.blocks
            .iter()
            .find(|b| matches!(b, CardBlock::Heading { .. }))
    }

    pub fn has_trailing_divider(&self) -> bool {
        matches!(self.blocks.last(), Some(CardBlock::Divider))
    }

    /// Plain-text rendering used by headless output.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                CardBlock::Heading { name, divider, mascot } => {
                    let parts: Vec<&str> = [name, divider, mascot]
                        .into_iter()
                        .filter_map(|p| p.as_deref())
                        .collect();
                    out.push(parts.join(" "));
                }
                CardBlock::Image { src, alt, caption } => {
                    out.push(format!("[image: {alt}] {src}"));
                    if let Some(caption) = caption {
                        out.push(format!("  {caption}"));
                    }
                }
                CardBlock::Statement(text) => out.push(format!("Personal Statement: {text}")),
                CardBlock::Background { label, text } => out.push(format!("{label}: {text}")),
                CardBlock::Device(text) => out.push(format!("Primary Computer: {text}")),
                CardBlock::FunFact(text) => out.push(format!("Fun Fact: {text}")),
                CardBlock::Courses(courses) => {
                    out.push("Courses I'm Taking and Why:".to_string());
                    out.extend(courses.iter().map(|c| format!("  - {c}")));
                }
                CardBlock::Quote { text, author } => {
                    out.push(format!("Quote: \"{text}\""));
                    if let Some(author) = author {
                        out.push(format!("  - {author}"));
                    }
                }
                CardBlock::Links(links) => {
                    let joined: Vec<String> = links
                        .iter()
                        .map(|l| format!("{} <{}>", l.label, l.url))
                        .collect();
                    out.push(format!("Links: {}", joined.join(" | ")));
                }
                CardBlock::Divider => out.push(TRAILING_RULE.to_string()),
            }
        }
        out.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Record;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn card(value: serde_json::Value) -> ResolvedCard {
        Record::new(&value, 0).resolve(None)
    }

    #[test]
    fn section_names_and_hotkeys() {
        assert_eq!(Section::from_name("Fun-Fact"), Some(Section::FunFact));
        assert_eq!(Section::from_name(" photo "), Some(Section::Image));
        assert_eq!(Section::from_name("nope"), None);
        for section in Section::ALL {
            assert_eq!(Section::from_hotkey(section.hotkey()), Some(section));
        }
        assert_eq!(Section::Links.hotkey(), '0');
    }

    #[test]
    fn toggles_with_hidden() {
        let t = Toggles::with_hidden(&["mascot", "bogus", "LINKS"]);
        assert!(!t.is_visible(Section::Mascot));
        assert!(!t.is_visible(Section::Links));
        assert!(t.is_visible(Section::Name));
    }

    #[test]
    fn heading_divider_needs_name_and_mascot() {
        let c = card(json!({"name": "Ada", "mascot": "Owl", "divider": "*"}));
        let view = CardView::build(&c, &Toggles::default());
        assert_eq!(
            view.heading(),
            Some(&CardBlock::Heading {
                name: Some("Ada".into()),
                divider: Some("*".into()),
                mascot: Some("Owl".into()),
            })
        );
        assert!(view.has_trailing_divider());
    }

    #[test]
    fn name_hidden_keeps_mascot_without_divider() {
        let c = card(json!({"name": "Ada", "mascot": "Owl"}));
        let mut toggles = Toggles::default();
        toggles.set(Section::Name, false);
        let view = CardView::build(&c, &toggles);
        assert_eq!(
            view.heading(),
            Some(&CardBlock::Heading {
                name: None,
                divider: None,
                mascot: Some("Owl".into()),
            })
        );
        assert!(!view.has_trailing_divider());
    }

    #[test]
    fn missing_mascot_suppresses_dividers() {
        let view = CardView::build(&card(json!({"name": "Ada"})), &Toggles::default());
        assert!(matches!(
            view.heading(),
            Some(CardBlock::Heading { divider: None, .. })
        ));
        assert!(!view.has_trailing_divider());
    }

    #[test]
    fn absent_fields_drop_only_their_block() {
        let c = card(json!({"name": "Ada", "courses": "Math, CS", "quote": "Hi"}));
        let view = CardView::build(&c, &Toggles::default());
        // heading, courses, quote; no mascot means no trailing divider
        assert_eq!(view.blocks.len(), 3);
        assert!(view.to_plain_text().contains("  - Math\n  - CS"));
    }

    #[test]
    fn plain_text_quote_and_links() {
        let c = card(json!({
            "name": "Ada",
            "quote": {"text": "Imagine", "author": "Ada"},
            "links": {"GitHub": "https://gh/ada", "Site": "https://ada.dev"}
        }));
        let text = CardView::build(&c, &Toggles::default()).to_plain_text();
        assert_eq!(
            text,
            "Ada\nQuote: \"Imagine\"\n  - Ada\nLinks: GitHub <https://gh/ada> | Site <https://ada.dev>"
        );
    }
}
