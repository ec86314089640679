//! Integration tests for `DefinitionRepo` upsert and listing.

use catcare::models::definition::{CareTaskDefinition, Frequency, MealSlot};
use catcare::persistence::definition_repo::DefinitionRepo;
use catcare::AppError;

use super::test_helpers::{memory_db, HOUSEHOLD};

fn def(id: &str, title: &str) -> CareTaskDefinition {
    let mut def = CareTaskDefinition::new(id, title);
    def.household_id = HOUSEHOLD.to_owned();
    def
}

#[tokio::test]
async fn upsert_then_list_round_trips_fields() {
    let repo = DefinitionRepo::new(memory_db().await);
    let mut feed = def("feed", "Feed").with_slots([MealSlot::Evening, MealSlot::Morning]);
    feed.icon = Some("bowl".to_owned());
    feed.per_cat = true;
    let water = def("water", "Change water").with_goal(Frequency::Weekly, Some(3));

    repo.upsert(&feed, 0).await.expect("feed");
    repo.upsert(&water, 1).await.expect("water");

    let listed = repo.list_for_household(HOUSEHOLD).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "feed");
    assert_eq!(listed[0].meal_slots, [MealSlot::Morning, MealSlot::Evening]);
    assert_eq!(listed[0].icon.as_deref(), Some("bowl"));
    assert!(listed[0].per_cat);
    assert_eq!(listed[1], water);
}

#[tokio::test]
async fn listing_follows_position() {
    let repo = DefinitionRepo::new(memory_db().await);
    repo.upsert(&def("a", "A"), 2).await.expect("a");
    repo.upsert(&def("b", "B"), 0).await.expect("b");
    repo.upsert(&def("c", "C"), 1).await.expect("c");

    let ids: Vec<String> = repo
        .list_for_household(HOUSEHOLD)
        .await
        .expect("list")
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, ["b", "c", "a"]);
}

#[tokio::test]
async fn upsert_replaces_existing_definition() {
    let repo = DefinitionRepo::new(memory_db().await);
    repo.upsert(&def("litter", "Litter"), 0).await.expect("first");
    let updated = def("litter", "Scoop litter").with_goal(Frequency::Daily, Some(2));
    repo.upsert(&updated, 0).await.expect("second");

    let listed = repo.list_for_household(HOUSEHOLD).await.expect("list");
    assert_eq!(listed, [updated]);
}

#[tokio::test]
async fn same_id_in_other_household_is_separate() {
    let repo = DefinitionRepo::new(memory_db().await);
    repo.upsert(&def("litter", "Litter"), 0).await.expect("ours");
    let mut theirs = def("litter", "Their litter");
    theirs.household_id = "other".to_owned();
    repo.upsert(&theirs, 0).await.expect("theirs");

    let ours = repo.list_for_household(HOUSEHOLD).await.expect("list");
    assert_eq!(ours.len(), 1);
    assert_eq!(ours[0].title, "Litter");
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let repo = DefinitionRepo::new(memory_db().await);
    let err = repo.upsert(&def("x", " "), 0).await.expect_err("blank");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn set_enabled_toggles_flag() {
    let repo = DefinitionRepo::new(memory_db().await);
    repo.upsert(&def("litter", "Litter"), 0).await.expect("upsert");
    repo.set_enabled(HOUSEHOLD, "litter", false)
        .await
        .expect("disable");

    let listed = repo.list_for_household(HOUSEHOLD).await.expect("list");
    assert!(!listed[0].enabled);

    let err = repo
        .set_enabled(HOUSEHOLD, "missing", true)
        .await
        .expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}
