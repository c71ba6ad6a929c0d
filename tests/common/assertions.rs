//! Domain-specific assertion macros for introboard harnesses.
//!
//! These wrap plain assertions with failure messages that show the whole
//! card or name list, so a failing case says which block went missing.

use introboard_core::{CardBlock, CardView};

// ---------------------------------------------------------------------------
// Card assertions
// ---------------------------------------------------------------------------

/// Assert that a `CardView` contains a block matching a pattern.
///
/// ```rust
/// assert_card_has!(view, CardBlock::FunFact(_));
/// ```
#[macro_export]
macro_rules! assert_card_has {
    ($view:expr, $pat:pat) => {{
        let view: &introboard_core::CardView = &$view;
        if !view.blocks.iter().any(|b| matches!(b, $pat)) {
            panic!(
                "assert_card_has! failed: no block matches `{}`\n  blocks: {:#?}",
                stringify!($pat),
                view.blocks
            );
        }
    }};
}

/// Assert that a `CardView` contains no block matching a pattern.
#[macro_export]
macro_rules! assert_card_lacks {
    ($view:expr, $pat:pat) => {{
        let view: &introboard_core::CardView = &$view;
        if let Some(found) = view.blocks.iter().find(|b| matches!(b, $pat)) {
            panic!(
                "assert_card_lacks! failed: found `{}`\n  block: {:?}",
                stringify!($pat),
                found
            );
        }
    }};
}

/// The heading of a card as `(name, divider, mascot)`; panics if absent.
pub fn heading_parts(view: &CardView) -> (Option<&str>, Option<&str>, Option<&str>) {
    match view.heading() {
        Some(CardBlock::Heading { name, divider, mascot }) => {
            (name.as_deref(), divider.as_deref(), mascot.as_deref())
        }
        _ => panic!("card {:?} has no heading: {:#?}", view.key, view.blocks),
    }
}

// ---------------------------------------------------------------------------
// Name assertions
// ---------------------------------------------------------------------------

/// Assert that records resolve to exactly these display names, in order.
///
/// ```rust
/// assert_names!(records, ["Ada Lovelace", "Grace Hopper"]);
/// ```
#[macro_export]
macro_rules! assert_names {
    ($records:expr, [$($name:expr),* $(,)?]) => {{
        let records: &[serde_json::Value] = &$records;
        let actual: Vec<String> = records
            .iter()
            .enumerate()
            .map(|(i, raw)| introboard_core::resolve::Record::new(raw, i).display_name())
            .collect();
        let expected: Vec<String> = vec![$($name.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "display names differ");
    }};
}
