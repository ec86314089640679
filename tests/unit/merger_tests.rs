//! Unit tests for the catch-up merge and the per-source item builders.

use catcare::care::{aggregate, CareSummary};
use catcare::catchup::sources::{
    incident_items, inventory_items, observation_items, photo_items, task_items,
    CURRENT_SLOT_SEVERITY, EMPTY_STOCK_SEVERITY, INCIDENT_SEVERITY, LOW_STOCK_SEVERITY,
    PAST_SLOT_SEVERITY, PHOTO_SEVERITY,
};
use catcare::catchup::{build, merge, AlertSnapshot};
use catcare::models::catch_up::{CatchUpItem, CatchUpKind, CatchUpPayload, NoticeSource};
use catcare::models::definition::{CareTaskDefinition, Frequency, MealSlot};
use catcare::models::household::{Cat, Incident, InventoryItem, Observation, Photo};
use catcare::HouseholdSettings;
use chrono::{DateTime, NaiveDate, Utc};

fn utc(h: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 5, 15)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
        .and_utc()
}

fn hh() -> String {
    "hh".to_owned()
}

fn item(id: &str, severity: u8) -> CatchUpItem {
    let incident = Incident::new(hh(), None, id.to_owned());
    CatchUpItem {
        id: id.to_owned(),
        title: id.to_owned(),
        body: None,
        severity,
        cat_id: None,
        payload: CatchUpPayload::Incident(incident),
    }
}

fn ids(items: &[CatchUpItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

fn evening_summary() -> CareSummary {
    let defs = [
        CareTaskDefinition::new("feed", "Feed").with_slots([MealSlot::Morning, MealSlot::Evening]),
        CareTaskDefinition::new("litter", "Clean litter"),
        CareTaskDefinition::new("water", "Change water").with_goal(Frequency::Weekly, None),
    ];
    aggregate(&defs, &[], &HouseholdSettings::default(), utc(18))
}

// ─── merge ───────────────────────────────────────────────────────────

#[test]
fn merge_sorts_by_descending_severity() {
    let merged = merge([vec![item("a", 10), item("b", 90)], vec![item("c", 50)]]);
    assert_eq!(ids(&merged), ["b", "c", "a"]);
}

#[test]
fn merge_keeps_source_order_on_ties() {
    let merged = merge([
        vec![item("a1", 50), item("a2", 50)],
        vec![item("b1", 50)],
        vec![item("c1", 70), item("c2", 50)],
    ]);
    assert_eq!(ids(&merged), ["c1", "a1", "a2", "b1", "c2"]);
}

#[test]
fn merge_drops_nothing() {
    let merged = merge([vec![item("x", 1), item("x", 1)], Vec::new()]);
    assert_eq!(merged.len(), 2);
}

#[test]
fn merge_of_empty_sources_is_empty() {
    assert!(merge(Vec::<Vec<CatchUpItem>>::new()).is_empty());
}

// ─── sources ─────────────────────────────────────────────────────────

#[test]
fn task_items_rank_past_slots_above_current() {
    let items = task_items(&evening_summary());
    let by_id = |id: &str| {
        items
            .iter()
            .find(|i| i.id == id)
            .map(|i| i.severity)
            .unwrap()
    };
    assert_eq!(by_id("task:feed:morning"), PAST_SLOT_SEVERITY);
    assert_eq!(by_id("task:feed:evening"), CURRENT_SLOT_SEVERITY);
    assert_eq!(by_id("task:litter#1"), 50);
    assert_eq!(by_id("task:water#1"), 40);
    assert!(items.iter().all(|i| i.kind() == CatchUpKind::Task));
}

#[test]
fn task_items_skip_done_instances() {
    let mut summary = evening_summary();
    summary.instances[0].done = true;
    let items = task_items(&summary);
    assert_eq!(items.len(), summary.instances.len() - 1);
    assert!(items.iter().all(|i| i.id != "task:feed:morning"));
}

#[test]
fn incident_items_skip_resolved() {
    let open = Incident::new(hh(), None, "Vomited".to_owned());
    let mut resolved = Incident::new(hh(), None, "Scratched".to_owned());
    resolved.resolved_at = Some(utc(9));
    let items = incident_items(&[open.clone(), resolved]);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, format!("incident:{}", open.id));
    assert_eq!(items[0].severity, INCIDENT_SEVERITY);
}

#[test]
fn observation_items_respect_floor_and_ack() {
    let mild = Observation::new(hh(), None, "Sneezed".to_owned(), 10);
    let worrying = Observation::new(hh(), None, "Not eating".to_owned(), 75);
    let mut seen = Observation::new(hh(), None, "Limping".to_owned(), 80);
    seen.acknowledged_at = Some(utc(9));

    let items = observation_items(&[mild, worrying.clone(), seen], 30);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Not eating");
    assert_eq!(items[0].severity, 75);
    assert_eq!(items[0].kind(), CatchUpKind::Notice);
    assert_eq!(
        items[0].payload,
        CatchUpPayload::Notice(NoticeSource::Observation(worrying))
    );
}

#[test]
fn inventory_items_only_low_and_undismissed() {
    let plenty = InventoryItem::new(hh(), "Kibble".to_owned(), 10, 3);
    let low = InventoryItem::new(hh(), "Litter".to_owned(), 2, 3);
    let empty = InventoryItem::new(hh(), "Treats".to_owned(), 0, 1);
    let mut dismissed = InventoryItem::new(hh(), "Wet food".to_owned(), 1, 2);
    dismissed.acknowledged_at = Some(utc(9));

    let items = inventory_items(&[plenty, low, empty, dismissed]);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title, "Litter is running low");
    assert_eq!(items[0].body.as_deref(), Some("2 left"));
    assert_eq!(items[0].severity, LOW_STOCK_SEVERITY);
    assert_eq!(items[1].severity, EMPTY_STOCK_SEVERITY);
}

#[test]
fn photo_items_batch_per_cat() {
    let cats = [Cat {
        id: "c1".to_owned(),
        household_id: hh(),
        name: "Mochi".to_owned(),
    }];
    let photos = [
        Photo::new(hh(), Some("c1".to_owned())),
        Photo::new(hh(), None),
        Photo::new(hh(), Some("c1".to_owned())),
    ];

    let items = photo_items(&photos, &cats);
    assert_eq!(ids(&items), ["photos:c1", "photos:household"]);
    assert_eq!(items[0].title, "2 new photos of Mochi");
    assert_eq!(items[1].title, "1 new photo of the household");
    assert!(items.iter().all(|i| i.severity == PHOTO_SEVERITY));
    match &items[0].payload {
        CatchUpPayload::Notice(NoticeSource::Photos { photo_ids }) => {
            assert_eq!(photo_ids, &[photos[0].id.clone(), photos[2].id.clone()]);
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn seen_photos_are_skipped() {
    let mut photo = Photo::new(hh(), None);
    photo.seen_at = Some(utc(9));
    assert!(photo_items(&[photo], &[]).is_empty());
}

// ─── build ───────────────────────────────────────────────────────────

fn snapshot() -> AlertSnapshot {
    AlertSnapshot {
        cats: Vec::new(),
        incidents: vec![Incident::new(hh(), None, "Escaped".to_owned())],
        observations: vec![Observation::new(hh(), None, "Lethargic".to_owned(), 65)],
        inventory: vec![InventoryItem::new(hh(), "Litter".to_owned(), 1, 2)],
        photos: vec![Photo::new(hh(), None)],
    }
}

#[test]
fn build_ranks_all_sources() {
    let items = build(&evening_summary(), &snapshot(), &HouseholdSettings::default());
    let severities: Vec<u8> = items.iter().map(|i| i.severity).collect();
    assert_eq!(severities, [90, 70, 65, 60, 55, 50, 40, 20]);
    assert_eq!(items[0].kind(), CatchUpKind::Incident);
    assert_eq!(items[7].kind(), CatchUpKind::Notice);
}

#[test]
fn build_honours_feature_toggles() {
    let mut settings = HouseholdSettings::default();
    settings.features.inventory_alerts = false;
    settings.features.photo_notices = false;
    settings.features.observation_notices = false;

    let items = build(&evening_summary(), &snapshot(), &settings);
    assert!(items
        .iter()
        .all(|i| matches!(i.kind(), CatchUpKind::Task | CatchUpKind::Incident)));
    assert_eq!(items.len(), 5);
}

#[test]
fn build_applies_notice_floor() {
    let settings = HouseholdSettings {
        notice_min_severity: 70,
        ..HouseholdSettings::default()
    };
    let items = build(&evening_summary(), &snapshot(), &settings);
    assert!(items.iter().all(|i| i.title != "Lethargic"));
}
