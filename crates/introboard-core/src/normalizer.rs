//! Normalizer — turns an arbitrary decoded JSON payload into an ordered
//! sequence of candidate student records.
//!
//! Payloads arrive in a handful of loosely specified shapes. [`classify`]
//! maps a payload onto a [`PayloadShape`] using a fixed decision table; the
//! first row that matches wins:
//!
//! | # | Payload                                             | Shape           |
//! |---|-----------------------------------------------------|-----------------|
//! | 1 | array                                               | `List`          |
//! | 2 | object with an array under a wrapper key            | `Wrapped`       |
//! | 3 | object whose values are all objects, some student-like | `IdMap`      |
//! | 4 | any other object                                    | `Single`        |
//! | 5 | primitive or null                                   | `Unrecognized`  |
//!
//! [`normalize`] never mutates the payload and never fails; an unrecognised
//! payload yields an empty sequence.

use serde_json::{Map, Value};

/// Wrapper keys checked in priority order for an embedded record array.
pub const WRAPPER_KEYS: &[&str] = &["students", "data", "results", "items", "entries"];

/// Fields whose (truthy) presence marks an object as a student record.
const STUDENT_MARKERS: &[&str] = &[
    "name",
    "firstName",
    "lastName",
    "media",
    "personalStatement",
    "personalStatment",
];

/// The recognised shapes of an inbound payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape<'a> {
    /// The payload is itself the record array.
    List(&'a [Value]),
    /// The record array sits under one of [`WRAPPER_KEYS`].
    Wrapped {
        key: &'static str,
        items: &'a [Value],
    },
    /// An `id → record` map; holds the student-like values in key order.
    IdMap(Vec<&'a Value>),
    /// The payload object is one record.
    Single(&'a Map<String, Value>),
    /// Nothing usable.
    Unrecognized,
}

impl PayloadShape<'_> {
    /// Short tag used in logs and tests.
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadShape::List(_) => "list",
            PayloadShape::Wrapped { .. } => "wrapped",
            PayloadShape::IdMap(_) => "id-map",
            PayloadShape::Single(_) => "single",
            PayloadShape::Unrecognized => "unrecognized",
        }
    }

    /// Materialise the shape into an owned record sequence.
    pub fn into_records(self) -> Vec<Value> {
        match self {
            PayloadShape::List(items) | PayloadShape::Wrapped { items, .. } => {
                items.iter().filter(|v| !v.is_null()).cloned().collect()
            }
            PayloadShape::IdMap(values) => values.into_iter().cloned().collect(),
            PayloadShape::Single(map) => vec![Value::Object(map.clone())],
            PayloadShape::Unrecognized => Vec::new(),
        }
    }
}

/// Classify a payload by walking the decision table top to bottom.
pub fn classify(raw: &Value) -> PayloadShape<'_> {
    let map = match raw {
        Value::Array(items) => return PayloadShape::List(items),
        Value::Object(map) => map,
        _ => return PayloadShape::Unrecognized,
    };

    for &key in WRAPPER_KEYS {
        if let Some(Value::Array(items)) = map.get(key) {
            return PayloadShape::Wrapped { key, items };
        }
    }

    // Nulls and arrays count as "objects" for the all-values check, matching
    // how loosely typed producers tend to emit these maps.
    let all_object_like = !map.is_empty()
        && map
            .values()
            .all(|v| matches!(v, Value::Object(_) | Value::Array(_) | Value::Null));
    if all_object_like {
        let students: Vec<&Value> = map.values().filter(|v| looks_like_student(v)).collect();
        if !students.is_empty() {
            return PayloadShape::IdMap(students);
        }
    }

    PayloadShape::Single(map)
}

/// Convert an arbitrary payload into an ordered sequence of candidate records.
pub fn normalize(raw: &Value) -> Vec<Value> {
    let shape = classify(raw);
    tracing::debug!(shape = shape.kind(), "payload classified");
    shape.into_records()
}

/// True when `value` is an object carrying at least one name-, media- or
/// statement-like field with a truthy value.
pub fn looks_like_student(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| STUDENT_MARKERS.iter().any(|k| map.get(*k).is_some_and(is_truthy)))
}

/// Loose truthiness: null, false, zero and the empty string are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
