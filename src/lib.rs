//! introboard — student introductions board.
//!
//! Terminal viewer for course self-introduction cards. The work is split
//! across three crates; this root crate holds the binary and the headless
//! renderer used by `--headless`.
//!
//! ```text
//! introboard-feeds (Loader) ──► introboard-core (normalize, resolve, view) ──► introboard-tui
//!                                                                          └──► headless
//! ```

pub mod headless;
