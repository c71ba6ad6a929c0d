//! `:` command parsing and execution.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `show <section>` / `hide <section>` / `toggle <section>` | Card section visibility |
//! | `slideshow`, `ss` | Toggle slideshow mode |
//! | `page <path\|name\|1-4>` | Switch page |
//! | `reload` | Re-run the data loader |

use introboard_core::{Route, Section};

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Show(Section),
    Hide(Section),
    Toggle(Section),
    Slideshow,
    Page(Route),
    Reload,
}

const SECTION_USAGE: &str =
    "sections: name mascot image statement backgrounds device fun-fact courses quote links";

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "slideshow" | "ss" => Ok(Command::Slideshow),
            "reload" => Ok(Command::Reload),
            "theme" => match rest {
                "" => Err("usage: theme <default|gruvbox>".to_string()),
                name if Theme::by_name(name).is_some() => Ok(Command::Theme(name.to_string())),
                name => Err(format!("unknown theme: {name}")),
            },
            "show" | "hide" | "toggle" => {
                let section = parse_section(rest)?;
                Ok(match word {
                    "show" => Command::Show(section),
                    "hide" => Command::Hide(section),
                    _ => Command::Toggle(section),
                })
            }
            "page" => parse_route(rest).map(Command::Page),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn parse_section(arg: &str) -> Result<Section, String> {
    if arg.is_empty() {
        return Err(SECTION_USAGE.to_string());
    }
    Section::from_name(arg).ok_or_else(|| format!("unknown section: {arg} ({SECTION_USAGE})"))
}

fn parse_route(arg: &str) -> Result<Route, String> {
    if let Ok(n) = arg.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| Route::ALL.get(i).copied())
            .ok_or_else(|| format!("page number must be 1–{}", Route::ALL.len()));
    }
    match arg.to_ascii_lowercase().as_str() {
        "" => Err("usage: page <path|name|number>".to_string()),
        "home" => Ok(Route::Home),
        lower => Route::from_path(lower).ok_or_else(|| format!("unknown page: {arg}")),
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => {
            if let Some(theme) = Theme::by_name(&name) {
                s.theme = theme;
            }
        }
        Command::Show(section) => s.view.set_section(section, true),
        Command::Hide(section) => s.view.set_section(section, false),
        Command::Toggle(section) => {
            s.view.toggle_section(section);
        }
        Command::Slideshow => {
            s.view.toggle_slideshow();
            s.scroll = 0;
        }
        Command::Page(route) => s.set_route(route),
        Command::Reload => s.request_reload(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit() {
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("  quit  "), Ok(Command::Quit));
    }

    #[test]
    fn parse_theme() {
        assert_eq!(
            Command::parse("theme gruvbox"),
            Ok(Command::Theme("gruvbox".to_string()))
        );
        assert!(Command::parse("theme").is_err());
        assert!(Command::parse("theme solarized").unwrap_err().contains("solarized"));
    }

    #[test]
    fn parse_sections() {
        assert_eq!(Command::parse("hide mascot"), Ok(Command::Hide(Section::Mascot)));
        assert_eq!(Command::parse("show Fun-Fact"), Ok(Command::Show(Section::FunFact)));
        assert_eq!(Command::parse("toggle links"), Ok(Command::Toggle(Section::Links)));
        assert!(Command::parse("hide").unwrap_err().starts_with("sections:"));
        assert!(Command::parse("hide tail").unwrap_err().contains("tail"));
    }

    #[test]
    fn parse_pages() {
        assert_eq!(Command::parse("page /contract"), Ok(Command::Page(Route::Contract)));
        assert_eq!(Command::parse("page home"), Ok(Command::Page(Route::Home)));
        assert_eq!(Command::parse("page 4"), Ok(Command::Page(Route::Introductions)));
        assert!(Command::parse("page 0").is_err());
        assert!(Command::parse("page /nowhere").is_err());
    }

    #[test]
    fn parse_misc() {
        assert_eq!(Command::parse("ss"), Ok(Command::Slideshow));
        assert_eq!(Command::parse("reload"), Ok(Command::Reload));
        assert_eq!(Command::parse("help"), Ok(Command::Help));
    }

    #[test]
    fn parse_empty_returns_sentinel_err() {
        assert_eq!(Command::parse(""), Err(String::new()));
        assert_eq!(Command::parse("  "), Err(String::new()));
    }

    #[test]
    fn parse_unknown() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.contains("frobnicate"));
    }
}
