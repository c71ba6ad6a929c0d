//! Core types for introboard-core.
//!
//! This module defines the resolved value types produced by the field
//! resolver ([`CourseEntry`], [`Quote`], [`Backgrounds`], [`Link`],
//! [`ImageRef`]) and the loader-facing [`LoadState`] / [`Dataset`] pair that
//! the UI holds while a page is mounted.

use serde::Serialize;
use serde_json::Value;

/// One entry in a student's course list.
///
/// Sources hand us either a bare label (`"ITIS 3135"`) or an object carrying
/// a code/name and an optional reason/description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CourseEntry {
    Label(String),
    Detailed {
        label: String,
        reason: Option<String>,
    },
}

impl CourseEntry {
    pub fn label(&self) -> &str {
        match self {
            CourseEntry::Label(label) => label,
            CourseEntry::Detailed { label, .. } => label,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            CourseEntry::Label(_) => None,
            CourseEntry::Detailed { reason, .. } => reason.as_deref(),
        }
    }
}

impl std::fmt::Display for CourseEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason() {
            Some(reason) => write!(f, "{}: {}", self.label(), reason),
            None => write!(f, "{}", self.label()),
        }
    }
}

/// A favourite quote. The author is displayed only when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: String,
    pub author: Option<String>,
}

/// Personal / academic / professional background blurbs, each optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Backgrounds {
    pub personal: Option<String>,
    pub academic: Option<String>,
    pub professional: Option<String>,
}

impl Backgrounds {
    pub fn is_empty(&self) -> bool {
        self.personal.is_none() && self.academic.is_none() && self.professional.is_none()
    }

    /// Labelled entries in display order, skipping absent ones.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("Personal Background", self.personal.as_deref()),
            ("Academic Background", self.academic.as_deref()),
            ("Professional Background", self.professional.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, text)| text.map(|t| (label, t)))
        .collect()
    }
}

/// A labelled link. Order follows the source object's key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A record's photo after URL resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// URL to load first (absolute, origin-rebased, or a bare local path).
    pub src: String,
    /// The `media.src` value exactly as the payload gave it, if any.
    pub original: Option<String>,
    pub alt: String,
    pub caption: Option<String>,
}

// ---------------------------------------------------------------------------
// Load state
// ---------------------------------------------------------------------------

/// Which source produced a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataOrigin {
    Local,
    Remote,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataOrigin::Local => write!(f, "local"),
            DataOrigin::Remote => write!(f, "remote"),
        }
    }
}

/// A successfully loaded and normalised record sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Normalised candidate records, in payload order.
    pub records: Vec<Value>,
    /// Scheme + host of the remote source. `None` for local data.
    pub origin: Option<String>,
    pub source: DataOrigin,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Exactly one of loading / failed / ready holds at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    /// User-visible error message. The active record sequence is empty.
    Failed(String),
    Ready(Dataset),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Records currently active for display. Empty unless ready.
    pub fn records(&self) -> &[Value] {
        self.dataset().map(|d| d.records.as_slice()).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_entry_display() {
        assert_eq!(CourseEntry::Label("CS".into()).to_string(), "CS");
        let detailed = CourseEntry::Detailed {
            label: "ITIS 3135".into(),
            reason: Some("Required for my major".into()),
        };
        assert_eq!(detailed.to_string(), "ITIS 3135: Required for my major");
    }

    #[test]
    fn backgrounds_entries_skip_absent() {
        let bg = Backgrounds {
            personal: None,
            academic: Some("Junior in CS".into()),
            professional: Some("Intern".into()),
        };
        let labels: Vec<_> = bg.entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["Academic Background", "Professional Background"]);
        assert!(Backgrounds::default().is_empty());
    }

    #[test]
    fn failed_state_has_no_records() {
        let state = LoadState::Failed("boom".into());
        assert!(state.records().is_empty());
        assert_eq!(state.error(), Some("boom"));
        assert!(!state.is_loading());
    }
}
