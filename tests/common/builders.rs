//! Test builders — fluent constructors for student records and datasets.
//!
//! These are for readable test setup only. They build raw `serde_json` values
//! exactly as a producer would send them, so every harness exercises the real
//! resolver instead of pre-shaped structs.

use introboard_core::types::{DataOrigin, Dataset};
use introboard_core::LoadState;
use serde_json::{json, Map, Value};

// ---------------------------------------------------------------------------
// StudentBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for one raw student record.
///
/// # Example
///
/// ```rust
/// let record = StudentBuilder::new()
///     .name("Ada", "Lovelace")
///     .mascot("Analytical Axolotl")
///     .photo("/media/ada.jpg")
///     .course("ITIS 3135", "Web dev")
///     .build();
/// ```
#[derive(Default)]
pub struct StudentBuilder {
    fields: Map<String, Value>,
    courses: Vec<Value>,
}

impl StudentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(self, id: impl Into<Value>) -> Self {
        self.field("id", id)
    }

    /// Structured `{first, last}` name object.
    pub fn name(self, first: &str, last: &str) -> Self {
        self.field("name", json!({ "first": first, "last": last }))
    }

    pub fn preferred(mut self, preferred: &str) -> Self {
        let name = self
            .fields
            .entry("name")
            .or_insert_with(|| json!({}));
        if let Value::Object(map) = name {
            map.insert("preferred".into(), json!(preferred));
        }
        self
    }

    pub fn full_name(self, full: &str) -> Self {
        self.field("fullName", full)
    }

    pub fn mascot(self, mascot: &str) -> Self {
        self.field("mascot", mascot)
    }

    pub fn divider(self, divider: &str) -> Self {
        self.field("divider", divider)
    }

    pub fn statement(self, text: &str) -> Self {
        self.field("personalStatement", text)
    }

    pub fn device(self, text: &str) -> Self {
        self.field("primaryComputer", text)
    }

    pub fn fun_fact(self, text: &str) -> Self {
        self.field("funFact", text)
    }

    pub fn quote(self, text: &str, author: &str) -> Self {
        self.field("quote", json!({ "text": text, "author": author }))
    }

    pub fn link(mut self, label: &str, url: &str) -> Self {
        let links = self.fields.entry("links").or_insert_with(|| json!({}));
        if let Value::Object(map) = links {
            map.insert(label.into(), json!(url));
        }
        self
    }

    pub fn photo(self, src: &str) -> Self {
        self.field("media", json!({ "hasImage": true, "src": src, "caption": "Me" }))
    }

    pub fn course(mut self, code: &str, reason: &str) -> Self {
        self.courses.push(json!({ "code": code, "reason": reason }));
        self
    }

    /// Arbitrary extra field, for shapes the named setters don't cover.
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn build(mut self) -> Value {
        if !self.courses.is_empty() {
            self.fields.insert("courses".into(), Value::Array(self.courses));
        }
        Value::Object(self.fields)
    }
}

/// A record with only a structured name.
pub fn student(first: &str, last: &str) -> Value {
    StudentBuilder::new().name(first, last).build()
}

/// `n` distinct named students: `Student0 Tester`, `Student1 Tester`, …
pub fn roster(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            StudentBuilder::new()
                .id(format!("s{i}"))
                .name(&format!("Student{i}"), "Tester")
                .build()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Load states
// ---------------------------------------------------------------------------

pub fn ready(records: Vec<Value>) -> LoadState {
    ready_from(records, None)
}

pub fn ready_from(records: Vec<Value>, origin: Option<&str>) -> LoadState {
    LoadState::Ready(Dataset {
        records,
        origin: origin.map(str::to_string),
        source: DataOrigin::Local,
        loaded_at: chrono::Utc::now(),
    })
}
