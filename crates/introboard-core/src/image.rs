//! Image source classification, URL resolution and the one-shot fallback.
//!
//! A photo path in a payload may be absolute, root-relative (`/media/a.jpg`),
//! namespaced-relative (`assets/a.jpg`, `media/a.jpg`) or any other relative
//! string. Relative forms are rebased on the origin recorded when the data was
//! loaded remotely; without one they become bare local paths.
//!
//! When a resolved image fails to load, [`ImageSlot::on_error`] hands out one
//! fallback URL built on the default remote origin, and only if the payload's
//! source was not already absolute. A failure of the fallback itself leaves
//! the image broken.

use crate::types::ImageRef;

/// Origin used for the single fallback attempt after an image load failure.
pub const DEFAULT_IMAGE_ORIGIN: &str = "https://dvonb.xyz";

const NAMESPACES: &[&str] = &["assets/", "media/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Begins with a URL scheme (or is protocol-relative).
    Absolute,
    /// Begins with `/`.
    RootRelative,
    /// Begins with `assets/` or `media/`.
    Namespaced,
    Relative,
}

impl ImageSource {
    pub fn classify(src: &str) -> Self {
        if src.starts_with("//") || has_scheme(src) {
            ImageSource::Absolute
        } else if src.starts_with('/') {
            ImageSource::RootRelative
        } else if NAMESPACES.iter().any(|ns| src.starts_with(ns)) {
            ImageSource::Namespaced
        } else {
            ImageSource::Relative
        }
    }

    pub fn is_absolute(self) -> bool {
        self == ImageSource::Absolute
    }
}

/// `scheme ":"` where scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ).
fn has_scheme(src: &str) -> bool {
    let Some((scheme, _)) = src.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Join a non-absolute `src` onto `origin`.
fn rebase(src: &str, origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if src.starts_with('/') {
        format!("{origin}{src}")
    } else {
        format!("{origin}/{src}")
    }
}

/// Resolve a payload image path against the recorded remote origin.
///
/// Absolute URLs pass through verbatim. Relative forms are rebased on
/// `origin` when one was recorded, else turned into a root-relative local
/// path.
pub fn resolve_image_src(src: &str, origin: Option<&str>) -> String {
    match (ImageSource::classify(src), origin) {
        (ImageSource::Absolute, _) => src.to_string(),
        (_, Some(origin)) => rebase(src, origin),
        (ImageSource::RootRelative, None) => src.to_string(),
        (_, None) => format!("/{src}"),
    }
}

// ---------------------------------------------------------------------------
// Per-image retry state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Not yet probed, or a fallback probe is in flight.
    Pending,
    Loaded,
    Broken,
}

/// Load state of one rendered image, including its one-time retry flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    original: Option<String>,
    current: String,
    tried_fallback: bool,
    status: ImageStatus,
}

impl ImageSlot {
    pub fn new(image: &ImageRef) -> Self {
        Self {
            original: image.original.clone(),
            current: image.src.clone(),
            tried_fallback: false,
            status: ImageStatus::Pending,
        }
    }

    /// URL the image should currently be loaded from.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn status(&self) -> ImageStatus {
        self.status
    }

    pub fn tried_fallback(&self) -> bool {
        self.tried_fallback
    }

    pub fn on_load(&mut self) {
        self.status = ImageStatus::Loaded;
    }

    /// Record a load failure. Returns the URL to retry, at most once per slot.
    pub fn on_error(&mut self, default_origin: &str) -> Option<String> {
        if self.tried_fallback {
            self.status = ImageStatus::Broken;
            return None;
        }
        self.tried_fallback = true;

        match self.original.as_deref() {
            Some(orig) if !ImageSource::classify(orig).is_absolute() => {
                self.current = rebase(orig, default_origin);
                self.status = ImageStatus::Pending;
                tracing::debug!(url = %self.current, "image: retrying against default origin");
                Some(self.current.clone())
            }
            _ => {
                self.status = ImageStatus::Broken;
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
