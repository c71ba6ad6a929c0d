#![allow(unused)]
//! Card integration harness.
//!
//! # What this covers
//!
//! - **Full records**: every section of a fully populated record resolves and
//!   lands in the card in display order.
//! - **Missing fields**: an absent field drops only its own block.
//! - **Toggles**: each section hides independently; heading and divider rules
//!   follow the name/mascot visibility.
//! - **Images**: origin rebasing and the one-shot fallback retry, driven the
//!   way the TUI drives it.
//!
//! # What this does NOT cover
//!
//! - Styling of the rendered lines (see `card_list.rs` unit tests)
//! - Actually reaching an image over HTTP (see `loader_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test card_harness
//! ```

mod common;
use common::*;
use introboard_core::card::DEFAULT_DIVIDER;
use introboard_core::image::{ImageSlot, ImageStatus, DEFAULT_IMAGE_ORIGIN};
use introboard_core::types::CourseEntry;
use introboard_core::{CardBlock, CardView, Record, Section, Toggles};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

fn card(raw: &Value, toggles: &Toggles) -> CardView {
    CardView::build(&Record::new(raw, 0).resolve(Some(DEFAULT_IMAGE_ORIGIN)), toggles)
}

fn hiding(section: Section) -> Toggles {
    let mut toggles = Toggles::default();
    toggles.set(section, false);
    toggles
}

// ---------------------------------------------------------------------------
// Full record
// ---------------------------------------------------------------------------

#[test]
fn full_record_renders_every_block_in_order() {
    let view = card(&parse(FULL_STUDENT), &Toggles::default());

    let kinds: Vec<&str> = view
        .blocks
        .iter()
        .map(|b| match b {
            CardBlock::Heading { .. } => "heading",
            CardBlock::Image { .. } => "image",
            CardBlock::Statement(_) => "statement",
            CardBlock::Background { .. } => "background",
            CardBlock::Device(_) => "device",
            CardBlock::FunFact(_) => "fun-fact",
            CardBlock::Courses(_) => "courses",
            CardBlock::Quote { .. } => "quote",
            CardBlock::Links(_) => "links",
            CardBlock::Divider => "divider",
        })
        .collect();
    assert_eq!(
        kinds,
        [
            "heading", "image", "statement", "background", "background", "background",
            "device", "fun-fact", "courses", "quote", "links", "divider",
        ]
    );
}

#[test]
fn full_record_resolves_field_values() {
    let raw = parse(FULL_STUDENT);
    let resolved = Record::new(&raw, 0).resolve(Some(DEFAULT_IMAGE_ORIGIN));

    assert_eq!(resolved.key, "ada");
    assert_eq!(resolved.name, "Ada L.");
    assert_eq!(resolved.device.as_deref(), Some("Difference Engine"));
    assert_eq!(
        resolved.courses,
        vec![
            CourseEntry::Detailed {
                label: "ITIS 3135".into(),
                reason: Some("Web dev".into()),
            },
            CourseEntry::Detailed {
                label: "ITSC 3155".into(),
                reason: Some("Software engineering".into()),
            },
        ]
    );
    let quote = resolved.quote.expect("quote");
    assert_eq!(quote.author.as_deref(), Some("Ada"));
    let labels: Vec<&str> = resolved.links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, ["GitHub", "Site"]);
}

#[test]
fn full_record_heading_uses_record_divider() {
    let view = card(&parse(FULL_STUDENT), &Toggles::default());
    assert_eq!(
        heading_parts(&view),
        (Some("Ada L."), Some("|"), Some("Analytical Axolotl"))
    );
    assert!(view.has_trailing_divider());
}

// ---------------------------------------------------------------------------
// Missing fields
// ---------------------------------------------------------------------------

#[test]
fn name_only_record_is_just_a_heading() {
    let view = card(&student("Grace", "Hopper"), &Toggles::default());
    assert_eq!(view.blocks.len(), 1);
    assert_eq!(heading_parts(&view), (Some("Grace Hopper"), None, None));
    assert!(!view.has_trailing_divider());
}

#[test]
fn missing_mascot_drops_divider_but_nothing_else() {
    let raw = StudentBuilder::new()
        .name("Grace", "Hopper")
        .fun_fact("Found a moth")
        .build();
    let view = card(&raw, &Toggles::default());
    assert_card_has!(view, CardBlock::FunFact(_));
    assert_card_lacks!(view, CardBlock::Divider);
}

#[test]
fn empty_courses_suppress_the_section() {
    let raw = StudentBuilder::new()
        .name("Grace", "Hopper")
        .field("courses", serde_json::json!([]))
        .build();
    assert_card_lacks!(card(&raw, &Toggles::default()), CardBlock::Courses(_));
}

#[test]
fn default_divider_when_record_has_none() {
    let raw = StudentBuilder::new().name("Ada", "Lovelace").mascot("Axolotl").build();
    let view = card(&raw, &Toggles::default());
    assert_eq!(heading_parts(&view).1, Some(DEFAULT_DIVIDER));
}

// ---------------------------------------------------------------------------
// Toggles
// ---------------------------------------------------------------------------

#[rstest]
#[case::statement(Section::Statement)]
#[case::backgrounds(Section::Backgrounds)]
#[case::device(Section::Device)]
#[case::fun_fact(Section::FunFact)]
#[case::courses(Section::Courses)]
#[case::quote(Section::Quote)]
#[case::links(Section::Links)]
#[case::image(Section::Image)]
fn hiding_one_section_removes_only_its_blocks(#[case] section: Section) {
    let raw = parse(FULL_STUDENT);
    let full = card(&raw, &Toggles::default());
    let hidden = card(&raw, &hiding(section));

    let removed = full.blocks.len() - hidden.blocks.len();
    assert!(removed >= 1, "{section:?} hid nothing");
    // Background is the only multi-block section.
    if section != Section::Backgrounds {
        assert_eq!(removed, 1, "{section:?} hid more than its own block");
    }
    assert!(hidden.has_trailing_divider());
}

#[test]
fn hidden_name_keeps_mascot_without_divider() {
    let view = card(&parse(FULL_STUDENT), &hiding(Section::Name));
    assert_eq!(heading_parts(&view), (None, None, Some("Analytical Axolotl")));
    assert!(!view.has_trailing_divider());
}

#[test]
fn hidden_mascot_keeps_name_without_divider() {
    let view = card(&parse(FULL_STUDENT), &hiding(Section::Mascot));
    assert_eq!(heading_parts(&view), (Some("Ada L."), None, None));
    assert!(!view.has_trailing_divider());
}

#[test]
fn hiding_name_and_mascot_drops_the_heading() {
    let mut toggles = hiding(Section::Name);
    toggles.set(Section::Mascot, false);
    let view = card(&parse(FULL_STUDENT), &toggles);
    assert!(view.heading().is_none());
}

#[test]
fn toggles_from_config_names() {
    let toggles = Toggles::with_hidden(&["mascot", "fun-fact", "nonsense"]);
    assert!(!toggles.is_visible(Section::Mascot));
    assert!(!toggles.is_visible(Section::FunFact));
    assert!(toggles.is_visible(Section::Name));
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

#[rstest]
#[case::root_relative("/media/a.jpg", Some("https://api.example"), "https://api.example/media/a.jpg")]
#[case::namespaced("assets/a.jpg", Some("https://api.example"), "https://api.example/assets/a.jpg")]
#[case::absolute("https://cdn.example/a.jpg", Some("https://api.example"), "https://cdn.example/a.jpg")]
#[case::local_root("/media/a.jpg", None, "/media/a.jpg")]
#[case::local_bare("a.jpg", None, "/a.jpg")]
fn image_src_follows_origin(
    #[case] src: &str,
    #[case] origin: Option<&str>,
    #[case] expected: &str,
) {
    let raw = StudentBuilder::new().name("Ada", "Lovelace").photo(src).build();
    let image = Record::new(&raw, 0).image(origin).expect("image");
    assert_eq!(image.src, expected);
}

#[test]
fn image_opt_out_hides_the_block() {
    let raw = StudentBuilder::new()
        .name("Ada", "Lovelace")
        .field("media", serde_json::json!({"hasImage": false, "src": "/media/a.jpg"}))
        .build();
    assert_card_lacks!(card(&raw, &Toggles::default()), CardBlock::Image { .. });
}

#[test]
fn top_level_photo_is_used_verbatim() {
    let raw = StudentBuilder::new()
        .name("Ada", "Lovelace")
        .field("photo", "images/ada.png")
        .field("photoAlt", "Ada waving")
        .build();
    let image = Record::new(&raw, 0).image(Some("https://api.example")).expect("image");
    assert_eq!(image.src, "images/ada.png");
    assert_eq!(image.original, None);
    assert_eq!(image.alt, "Ada waving");

    // Without photoAlt the display name stands in.
    let raw = StudentBuilder::new()
        .name("Ada", "Lovelace")
        .field("photo", "images/ada.png")
        .build();
    assert_eq!(Record::new(&raw, 0).image(None).expect("image").alt, "Ada Lovelace");
}

#[test]
fn image_opt_out_beats_photo_field() {
    let raw = StudentBuilder::new()
        .name("Ada", "Lovelace")
        .field("media", serde_json::json!({"hasImage": false}))
        .field("photo", "images/ada.png")
        .build();
    assert_eq!(Record::new(&raw, 0).image(None), None);
}

#[test]
fn local_image_retries_once_against_default_origin() {
    let raw = StudentBuilder::new().name("Ada", "Lovelace").photo("/media/a.jpg").build();
    let image = Record::new(&raw, 0).image(None).expect("image");
    let mut slot = ImageSlot::new(&image);

    let retry = slot.on_error(DEFAULT_IMAGE_ORIGIN);
    assert_eq!(retry.as_deref(), Some("https://dvonb.xyz/media/a.jpg"));
    assert_eq!(slot.status(), ImageStatus::Pending);

    assert_eq!(slot.on_error(DEFAULT_IMAGE_ORIGIN), None);
    assert_eq!(slot.status(), ImageStatus::Broken);
}

#[test]
fn absolute_image_is_never_retried() {
    let raw = StudentBuilder::new()
        .name("Ada", "Lovelace")
        .photo("https://cdn.example/a.jpg")
        .build();
    let image = Record::new(&raw, 0).image(None).expect("image");
    let mut slot = ImageSlot::new(&image);
    assert_eq!(slot.on_error(DEFAULT_IMAGE_ORIGIN), None);
    assert_eq!(slot.status(), ImageStatus::Broken);
}
