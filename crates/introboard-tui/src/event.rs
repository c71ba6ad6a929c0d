//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `NextPage`                 |
//! | `Shift+Tab`             | `PrevPage`                 |
//! | `/`                     | `QueryFocus`               |
//! | `s`                     | `ToggleSlideshow`          |
//! | `r`                     | `Reload`                   |
//! | `1`–`9`, `0`            | `ToggleSection(..)`        |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `g` / `G`               | `ScrollToTop` / `ScrollToBottom` |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | other printable char    | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When the query bar or command bar is focused, the event loop calls
//! [`to_app_event_insert`] instead. Every printable character is forwarded as
//! `Char`; arrows still produce `Nav` so `←`/`→` move the text cursor.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use introboard_core::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Switch to the next route.
    NextPage,
    PrevPage,
    /// Transfer focus to the query bar.
    QueryFocus,
    ToggleSlideshow,
    ToggleSection(Section),
    /// Re-run the data loader.
    Reload,
    ScrollUp,
    ScrollDown,
    ScrollToTop,
    ScrollToBottom,
    /// Left/right step the slideshow (or move a text cursor); up/down scroll.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    Backspace,
    Enter,
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, help popup, command bar).
    Escape,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    let plain = key.modifiers == Mod::NONE;

    match key.code {
        Char('q') if plain => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if plain => Some(AppEvent::NextPage),
        BackTab => Some(AppEvent::PrevPage),

        Char('/') if plain => Some(AppEvent::QueryFocus),
        Char('s') if plain => Some(AppEvent::ToggleSlideshow),
        Char('r') if plain => Some(AppEvent::Reload),

        Char(c @ '0'..='9') if plain => Section::from_hotkey(c).map(AppEvent::ToggleSection),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),
        Home | Char('g') if plain => Some(AppEvent::ScrollToTop),
        // Uppercase G: terminals differ on whether SHIFT is reported.
        End | Char('G') => Some(AppEvent::ScrollToBottom),

        Up | Char('k') if plain => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if plain => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if plain => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if plain => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if plain || key.modifiers == Mod::SHIFT => Some(AppEvent::Char(c)),

        Backspace if plain => Some(AppEvent::Backspace),
        Enter if plain => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        // Ctrl+c always quits, even while typing
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Tab | Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
