//! Unit tests for `TaskKey` parsing and canonical rendering.

use catcare::care::task_key::TaskKey;
use catcare::models::definition::MealSlot;

#[test]
fn parses_canonical_form() {
    let key = TaskKey::parse("feed:morning");
    assert_eq!(key.base_id, "feed");
    assert_eq!(key.slot, Some(MealSlot::Morning));
}

#[test]
fn parses_legacy_underscore_form() {
    let key = TaskKey::parse("feed_evening");
    assert_eq!(key, TaskKey::new("feed", Some(MealSlot::Evening)));
}

#[test]
fn both_separators_are_equivalent() {
    for slot in MealSlot::ALL {
        assert_eq!(
            TaskKey::parse(&format!("breakfast:{slot}")),
            TaskKey::parse(&format!("breakfast_{slot}")),
        );
    }
}

#[test]
fn bare_id_has_no_slot() {
    assert_eq!(TaskKey::parse("litter"), TaskKey::new("litter", None));
}

#[test]
fn underscored_id_without_slot_is_kept_whole() {
    assert_eq!(
        TaskKey::parse("clean_litter"),
        TaskKey::new("clean_litter", None)
    );
}

#[test]
fn underscored_id_with_slot_splits_last_segment() {
    assert_eq!(
        TaskKey::parse("clean_litter_night"),
        TaskKey::new("clean_litter", Some(MealSlot::Night))
    );
}

#[test]
fn unknown_suffix_is_part_of_id() {
    assert_eq!(
        TaskKey::parse("feed:later"),
        TaskKey::new("feed:later", None)
    );
}

#[test]
fn slot_without_id_is_not_split() {
    assert_eq!(TaskKey::parse(":noon"), TaskKey::new(":noon", None));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(
        TaskKey::parse("  feed:noon \n"),
        TaskKey::new("feed", Some(MealSlot::Noon))
    );
}

#[test]
fn canonical_uses_colon() {
    assert_eq!(TaskKey::parse("feed_noon").canonical(), "feed:noon");
    assert_eq!(TaskKey::parse("litter").canonical(), "litter");
}
