//! introboard-feeds — data sources for introboard.
//!
//! A [`Loader`] walks the local file → remote URL chain and returns a
//! normalised [`introboard_core::LoadState`]. [`ImageProber`] checks whether
//! a resolved photo URL is reachable so the UI can drive its one-time
//! fallback.

pub mod error;
pub mod loader;
pub mod probe;
pub mod source;

pub use error::FetchError;
pub use loader::Loader;
pub use probe::ImageProber;
pub use source::Source;
