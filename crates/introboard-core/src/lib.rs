//! introboard-core — shared model for the student introductions board.
//!
//! Everything here is pure and synchronous: payload normalization, field
//! resolution, search, the card model and the view state. Fetching lives in
//! `introboard-feeds`; rendering lives in `introboard-tui`.
//!
//! # Pipeline
//!
//! ```text
//! payload ──► normalizer ──► records ──► ViewState (query, toggles, slideshow)
//!                                            │
//!                              resolve::Record ──► card::CardView ──► UI
//! ```

pub mod card;
pub mod config;
pub mod image;
pub mod normalizer;
pub mod resolve;
pub mod routes;
pub mod search;
pub mod types;
pub mod view;

pub use card::{CardBlock, CardView, Section, Toggles};
pub use resolve::{Record, ResolvedCard};
pub use routes::Route;
pub use types::{Dataset, DataOrigin, ImageRef, LoadState};
pub use view::{ViewState, Visible};
