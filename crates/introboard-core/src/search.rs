//! Search — case-insensitive substring filter over student names.
//!
//! A record's candidate set is its resolved display name plus the raw
//! first / last / preferred / prefix fields. The positional `Student N`
//! placeholder is deliberately not a candidate, so a record matches the same
//! queries wherever it sits in a sequence.

use serde_json::Value;

use crate::resolve::Record;

/// Lowercased search candidates for one record.
pub fn candidates(record: &Record<'_>) -> Vec<String> {
    record
        .resolved_name()
        .into_iter()
        .chain(record.name_parts())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Normalise a raw query: trimmed and lowercased. Empty means "match all".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// True if `record` matches the already-normalised `needle`.
pub fn matches(record: &Record<'_>, needle: &str) -> bool {
    needle.is_empty() || candidates(record).iter().any(|c| c.contains(needle))
}

/// Positions of the records matching `query`, in order.
pub fn filter_indices(records: &[Value], query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    records
        .iter()
        .enumerate()
        .filter(|(i, raw)| matches(&Record::new(raw, *i), &needle))
        .map(|(i, _)| i)
        .collect()
}

/// The records matching `query`, cloned in order.
pub fn filter_records(records: &[Value], query: &str) -> Vec<Value> {
    filter_indices(records, query)
        .into_iter()
        .map(|i| records[i].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
