//! Colour theme for the introboard TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::load_default`] at startup and pass the result through
//! the application as a shared reference.
//!
//! # Name colours
//!
//! Student names are hashed to a stable index into the palette so the same
//! student always gets the same heading colour, regardless of where the card
//! sits after filtering.

use config::{Config, File, FileFormat};
use introboard_core::image::ImageStatus;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        for (on, modifier) in [
            (self.bold, Modifier::BOLD),
            (self.dim, Modifier::DIM),
            (self.italic, Modifier::ITALIC),
            (self.underlined, Modifier::UNDERLINED),
        ] {
            if on {
                style = style.add_modifier(modifier);
            }
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawCard {
    heading: RawStyle,
    mascot: RawStyle,
    divider: RawStyle,
    label: RawStyle,
    body: RawStyle,
    quote: RawStyle,
    link: RawStyle,
    caption: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    loading: RawStyle,
    error: RawStyle,
    empty: RawStyle,
    image_ok: RawStyle,
    image_pending: RawStyle,
    image_broken: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawNames {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    card: RawCard,
    status: RawStatus,
    borders: RawBorders,
    search: RawSearch,
    names: RawNames,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    pub heading: Style,
    pub mascot: Style,
    pub divider: Style,
    /// Section labels ("Personal Statement:", "Fun Fact:", …).
    pub label: Style,
    pub body: Style,
    pub quote: Style,
    pub link: Style,
    pub caption: Style,

    pub loading: Style,
    pub error: Style,
    pub empty: Style,
    pub image_ok: Style,
    pub image_pending: Style,
    pub image_broken: Style,

    pub border_focused: Style,
    pub border_command_bar: Style,
    pub border_unfocused: Style,

    /// Applied to the matched part of a heading while a query is active.
    pub search_highlight: Style,

    name_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str("default", DEFAULT_THEME_SRC)
            .expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str("gruvbox", GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Look up a built-in theme by name. Unknown names yield `None`.
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(name: &'static str, src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            name,
            heading: raw.card.heading.into_style(),
            mascot: raw.card.mascot.into_style(),
            divider: raw.card.divider.into_style(),
            label: raw.card.label.into_style(),
            body: raw.card.body.into_style(),
            quote: raw.card.quote.into_style(),
            link: raw.card.link.into_style(),
            caption: raw.card.caption.into_style(),
            loading: raw.status.loading.into_style(),
            error: raw.status.error.into_style(),
            empty: raw.status.empty.into_style(),
            image_ok: raw.status.image_ok.into_style(),
            image_pending: raw.status.image_pending.into_style(),
            image_broken: raw.status.image_broken.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            name_palette: raw
                .names
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Heading style for a student name, with a stable per-name colour.
    pub fn name_style(&self, name: &str) -> Style {
        if self.name_palette.is_empty() {
            return self.heading;
        }
        let idx = stable_hash(name) % self.name_palette.len();
        self.heading.fg(self.name_palette[idx])
    }

    pub fn image_style(&self, status: ImageStatus) -> Style {
        match status {
            ImageStatus::Pending => self.image_pending,
            ImageStatus::Loaded => self.image_ok,
            ImageStatus::Broken => self.image_broken,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_load() {
        for theme in [Theme::load_default(), Theme::load_gruvbox_dark()] {
            assert_ne!(theme.error, Style::default());
            assert_ne!(theme.border_focused, Style::default());
            assert_ne!(theme.search_highlight, Style::default());
            assert!(!theme.name_palette.is_empty());
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(Theme::by_name("Gruvbox").map(|t| t.name), Some("gruvbox"));
        assert_eq!(Theme::by_name("default").map(|t| t.name), Some("default"));
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn name_style_is_stable() {
        let theme = Theme::load_default();
        assert_eq!(theme.name_style("Ada Lovelace"), theme.name_style("Ada Lovelace"));
    }

    #[test]
    fn image_styles_differ_by_status() {
        let theme = Theme::load_default();
        assert_ne!(
            theme.image_style(ImageStatus::Loaded),
            theme.image_style(ImageStatus::Broken)
        );
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
