//! Payload fixtures — one constant per wire shape a producer has been seen
//! to emit, plus a fully populated student record.
//!
//! Payloads are JSON text so the same constants feed both the in-process
//! normalizer and the file/HTTP loaders.

/// A bare array of records (the common case).
pub const PAYLOAD_ARRAY: &str = r#"[
  {"id": "a1", "name": {"first": "Ada", "last": "Lovelace"}, "mascot": "Analytical Axolotl"},
  {"id": "g2", "name": {"first": "Grace", "last": "Hopper"}},
  null,
  {"id": "a3", "fullName": "Alan Turing"}
]"#;

/// Records wrapped under `students`.
pub const PAYLOAD_STUDENTS: &str = r#"{
  "count": 2,
  "students": [
    {"name": "Ada Lovelace"},
    {"name": "Grace Hopper"}
  ]
}"#;

/// Records wrapped under `data`.
pub const PAYLOAD_DATA: &str = r#"{"data": [{"firstName": "Ada"}, {"firstName": "Grace"}]}"#;

/// Records wrapped under `results`, alongside pagination noise.
pub const PAYLOAD_RESULTS: &str =
    r#"{"next": null, "results": [{"name": "Ada"}, {"name": "Grace"}], "page": 1}"#;

/// An `id → record` map; `meta` is not student-like and is dropped.
pub const PAYLOAD_ID_MAP: &str = r#"{
  "u1": {"name": "Ada"},
  "u2": {"personalStatement": "Hi there"},
  "meta": {"generated": "2025-09-01"}
}"#;

/// One record on its own.
pub const PAYLOAD_SINGLE: &str = r#"{"name": "Ada", "mascot": "Axolotl", "funFact": "Wrote the first program"}"#;

/// Valid JSON that holds no records at all.
pub const PAYLOAD_SCALAR: &str = "42";

/// Not JSON.
pub const PAYLOAD_GARBAGE: &str = "<html>503 Service Unavailable</html>";

/// Every section populated, in the shape the course API returns.
pub const FULL_STUDENT: &str = r#"{
  "id": "ada",
  "name": {"first": "Ada", "middleInitial": "K", "last": "Lovelace", "preferred": "Ada L."},
  "mascot": "Analytical Axolotl",
  "divider": "|",
  "media": {"hasImage": true, "src": "/media/ada.jpg", "caption": "Ada at the engine"},
  "personalStatement": "I like engines.",
  "backgrounds": {
    "personal": "Grew up in London.",
    "academic": "Mathematics.",
    "professional": "Analyst."
  },
  "platform": {"device": "Difference Engine"},
  "funFact": "Wrote the first program.",
  "courses": [
    {"code": "ITIS 3135", "reason": "Web dev"},
    {"code": "ITSC 3155", "reason": "Software engineering"}
  ],
  "quote": {"text": "That brain of mine is something more than merely mortal.", "author": "Ada"},
  "links": {"GitHub": "https://github.com/ada", "Site": "https://ada.example"}
}"#;

/// Parse a fixture; panics on invalid JSON (fixtures are trusted).
pub fn parse(src: &str) -> serde_json::Value {
    serde_json::from_str(src).expect("fixture is valid JSON")
}
