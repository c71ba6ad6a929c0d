//! Field resolver — per-record accessors over loosely shaped student JSON.
//!
//! Every semantic field has one static, ordered alias list of accessor paths.
//! An accessor walks its list and returns the first defined, non-empty value;
//! if nothing matches it returns an explicit absence (`None`, an empty `Vec`)
//! and never panics. Callers go through [`Record`] and never touch raw field
//! names themselves.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::image::resolve_image_src;
use crate::types::{Backgrounds, CourseEntry, ImageRef, Link, Quote};

/// A path of object keys, walked from the record root.
type FieldPath = &'static [&'static str];

// ---------------------------------------------------------------------------
// Alias tables
// ---------------------------------------------------------------------------

const FULL_NAME: &[FieldPath] = &[&["fullName"]];

// Inside a structured `name` object.
const NAME_PREFERRED: &[FieldPath] = &[&["preferred"]];
const NAME_FIRST: &[FieldPath] = &[&["first"], &["firstName"], &["given"]];
const NAME_MIDDLE: &[FieldPath] = &[&["middleInitial"], &["middle"]];
const NAME_LAST: &[FieldPath] = &[&["last"], &["lastName"], &["surname"]];
const NAME_PREFIX: &[FieldPath] = &[&["prefix"]];

// Flat, top-level name fields.
const FLAT_FIRST: &[FieldPath] = &[&["name"], &["firstName"], &["first"]];
const FLAT_LAST: &[FieldPath] = &[&["lastName"], &["last"], &["surname"]];
const FLAT_PREFERRED: &[FieldPath] = &[&["preferred"], &["preferredName"]];

const STATEMENT: &[FieldPath] = &[&["personalStatement"], &["personalStatment"], &["bio"]];

const BACKGROUND_PERSONAL: &[FieldPath] = &[
    &["backgrounds", "personal"],
    &["personalBackground"],
];
const BACKGROUND_ACADEMIC: &[FieldPath] = &[
    &["backgrounds", "academic"],
    &["academicBackground"],
    &["academic"],
];
const BACKGROUND_PROFESSIONAL: &[FieldPath] = &[
    &["backgrounds", "professional"],
    &["professionalBackground"],
    &["professional"],
];

const DEVICE: &[FieldPath] = &[&["platform", "device"], &["primaryComputer"], &["primaryDevice"]];

const FUN_FACT: &[FieldPath] = &[&["funFact"], &["fun_fact"], &["funnyThing"], &["interestingFact"]];

const COURSES: &[FieldPath] = &[
    &["courses"],
    &["subjects"],
    &["classes"],
    &["courseList"],
    &["coursesTaken"],
];

// `quote` only matches here when it is a plain string.
const QUOTE_TEXT: &[FieldPath] = &[&["quote"], &["quote", "text"], &["favoriteQuote"], &["quoteText"]];
const QUOTE_AUTHOR: &[FieldPath] = &[&["quote", "author"], &["quoteBy"], &["quoteAuthor"]];

const MEDIA_SRC: &[FieldPath] = &[&["media", "src"]];
const MEDIA_CAPTION: &[FieldPath] = &[&["media", "caption"]];
const IMAGE_ALT: &[FieldPath] = &[&["media", "caption"], &["media", "alt"], &["photoAlt"]];
const PHOTO: &[FieldPath] = &[&["photo"]];

const MASCOT: &[FieldPath] = &[&["mascot"]];
const DIVIDER: &[FieldPath] = &[&["divider"]];

static COURSE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)course|class|subject").expect("valid course key regex"));
static NUMBERED_COURSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)course(\d+)").expect("valid numbered course regex"));

// ---------------------------------------------------------------------------
// Lookup helpers
// ---------------------------------------------------------------------------

fn lookup<'v>(value: &'v Value, path: &[&str]) -> Option<&'v Value> {
    path.iter().try_fold(value, |v, key| v.get(*key))
}

/// Strings (trimmed, non-empty) and numbers count as text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(value: &Value, paths: &[FieldPath]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(as_text))
}

/// `first [middle] last`, skipping whichever parts are absent.
fn assemble_name(value: &Value, first: &[FieldPath], last: &[FieldPath]) -> Option<String> {
    let parts: Vec<String> = [
        first_text(value, first),
        first_text(value, NAME_MIDDLE),
        first_text(value, last),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join(" "))
}

fn split_course_list(list: &str) -> Vec<CourseEntry> {
    list.split([',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| CourseEntry::Label(s.to_string()))
        .collect()
}

/// Course object → `{label, reason}`, labelled by code, then name.
fn detailed_course(value: &Value) -> Option<CourseEntry> {
    let label = first_text(value, &[&["code"], &["name"]])?;
    let reason = first_text(value, &[&["reason"], &["description"]]);
    Some(CourseEntry::Detailed { label, reason })
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Borrowed view of one raw record plus its position in the loaded sequence.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    raw: &'a Value,
    position: usize,
}

impl<'a> Record<'a> {
    pub fn new(raw: &'a Value, position: usize) -> Self {
        Self { raw, position }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Display key: the record's `id` when present, else its position.
    pub fn key(&self) -> String {
        match self.raw.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Null) | None => self.position.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// The name as the payload gives it, if any source yields one.
    pub fn resolved_name(&self) -> Option<String> {
        if let Some(full) = first_text(self.raw, FULL_NAME) {
            return Some(full);
        }
        match self.raw.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(name @ Value::Object(_)) => first_text(name, NAME_PREFERRED)
                .or_else(|| assemble_name(name, NAME_FIRST, NAME_LAST)),
            _ => assemble_name(self.raw, FLAT_FIRST, FLAT_LAST),
        }
    }

    /// Total: falls back to `Student <position+1>`.
    pub fn display_name(&self) -> String {
        self.resolved_name()
            .unwrap_or_else(|| format!("Student {}", self.position + 1))
    }

    /// Raw first / last / preferred / prefix values, for search.
    pub fn name_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(name @ Value::Object(_)) = self.raw.get("name") {
            for aliases in [NAME_FIRST, NAME_LAST, NAME_PREFERRED, NAME_PREFIX] {
                parts.extend(first_text(name, aliases));
            }
        }
        for aliases in [FLAT_FIRST, FLAT_LAST, FLAT_PREFERRED, NAME_PREFIX] {
            parts.extend(first_text(self.raw, aliases));
        }
        parts
    }

    pub fn statement(&self) -> Option<String> {
        first_text(self.raw, STATEMENT)
    }

    pub fn backgrounds(&self) -> Backgrounds {
        Backgrounds {
            personal: first_text(self.raw, BACKGROUND_PERSONAL),
            academic: first_text(self.raw, BACKGROUND_ACADEMIC),
            professional: first_text(self.raw, BACKGROUND_PROFESSIONAL),
        }
    }

    pub fn primary_device(&self) -> Option<String> {
        first_text(self.raw, DEVICE)
    }

    pub fn fun_fact(&self) -> Option<String> {
        first_text(self.raw, FUN_FACT)
    }

    pub fn mascot(&self) -> Option<String> {
        first_text(self.raw, MASCOT)
    }

    pub fn divider(&self) -> Option<String> {
        first_text(self.raw, DIVIDER)
    }

    /// Ordered course entries from whichever course shape the record uses.
    ///
    /// - string: split on `,` / `;`
    /// - array: each string or `{code|name, reason|description}` object
    /// - object: values under keys matching `course|class|subject`
    /// - otherwise: top-level `courseN` string fields in key order
    pub fn courses(&self) -> Vec<CourseEntry> {
        let source = COURSES
            .iter()
            .find_map(|path| lookup(self.raw, path).filter(|v| !v.is_null()));

        match source {
            Some(Value::String(list)) => return split_course_list(list),
            Some(Value::Array(items)) => {
                return items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| match item {
                        Value::Object(_) => Some(detailed_course(item).unwrap_or_else(|| {
                            CourseEntry::Detailed {
                                label: format!("Course {}", i + 1),
                                reason: first_text(item, &[&["reason"], &["description"]]),
                            }
                        })),
                        other => as_text(other).map(CourseEntry::Label),
                    })
                    .collect();
            }
            Some(Value::Object(map)) => {
                let found: Vec<CourseEntry> = map
                    .iter()
                    .filter(|(key, _)| COURSE_KEY.is_match(key))
                    .filter_map(|(_, v)| match v {
                        Value::String(_) => as_text(v).map(CourseEntry::Label),
                        Value::Object(_) => detailed_course(v),
                        _ => None,
                    })
                    .collect();
                if !found.is_empty() {
                    return found;
                }
            }
            _ => {}
        }

        self.raw
            .as_object()
            .map(|map| {
                map.iter()
                    .filter(|(key, v)| NUMBERED_COURSE.is_match(key) && v.is_string())
                    .filter_map(|(_, v)| as_text(v).map(CourseEntry::Label))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn quote(&self) -> Option<Quote> {
        let text = first_text(self.raw, QUOTE_TEXT)?;
        Some(Quote {
            text,
            author: first_text(self.raw, QUOTE_AUTHOR),
        })
    }

    /// `links` object entries as label → URL, in source order.
    pub fn links(&self) -> Vec<Link> {
        self.raw
            .get("links")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(label, url)| {
                        url.as_str()
                            .map(str::trim)
                            .filter(|u| !u.is_empty())
                            .map(|u| Link {
                                label: label.clone(),
                                url: u.to_string(),
                            })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The record's photo, resolved against `origin`. `None` when there is no
    /// source or `media.hasImage` is explicitly `false`.
    pub fn image(&self, origin: Option<&str>) -> Option<ImageRef> {
        if lookup(self.raw, &["media", "hasImage"]).and_then(Value::as_bool) == Some(false) {
            return None;
        }
        let original = first_text(self.raw, MEDIA_SRC);
        let src = match &original {
            Some(src) => resolve_image_src(src, origin),
            None => first_text(self.raw, PHOTO)?,
        };
        Some(ImageRef {
            src,
            original,
            alt: first_text(self.raw, IMAGE_ALT).unwrap_or_else(|| self.display_name()),
            caption: first_text(self.raw, MEDIA_CAPTION),
        })
    }

    /// Resolve every semantic field at once.
    pub fn resolve(&self, origin: Option<&str>) -> ResolvedCard {
        ResolvedCard {
            key: self.key(),
            position: self.position,
            name: self.display_name(),
            mascot: self.mascot(),
            divider: self.divider(),
            image: self.image(origin),
            statement: self.statement(),
            backgrounds: self.backgrounds(),
            device: self.primary_device(),
            fun_fact: self.fun_fact(),
            courses: self.courses(),
            quote: self.quote(),
            links: self.links(),
        }
    }
}

/// All semantic fields of one record, resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCard {
    pub key: String,
    pub position: usize,
    pub name: String,
    pub mascot: Option<String>,
    pub divider: Option<String>,
    pub image: Option<ImageRef>,
    pub statement: Option<String>,
    pub backgrounds: Backgrounds,
    pub device: Option<String>,
    pub fun_fact: Option<String>,
    pub courses: Vec<CourseEntry>,
    pub quote: Option<Quote>,
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
