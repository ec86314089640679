//! Integration tests for `CareLogRepo`.
//!
//! Covers:
//! - Insert and fetch with images and memo intact
//! - Range listing is half-open, ordered, and household-scoped
//! - Soft delete hides rows without removing them

use catcare::models::care_log::NewCareLog;
use catcare::persistence::care_log_repo::CareLogRepo;
use catcare::AppError;
use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::test_helpers::{memory_db, HOUSEHOLD};

fn utc(h: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 5, 15)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
        .and_utc()
}

fn new_log(task_type: &str, at: DateTime<Utc>) -> catcare::models::care_log::CareLog {
    NewCareLog::for_type(task_type).into_log(HOUSEHOLD.to_owned(), None, at)
}

// ─── insert / get ────────────────────────────────────────────────────

#[tokio::test]
async fn insert_persists_all_fields() {
    let repo = CareLogRepo::new(memory_db().await);
    let mut log = new_log("feed:morning", utc(7));
    log.cat_id = Some("c1".to_owned());
    log.notes = Some("ate half".to_owned());
    log.images = vec!["img/1.jpg".to_owned(), "img/2.jpg".to_owned()];
    log.actor_id = Some("member-1".to_owned());

    repo.insert(&log).await.expect("insert");
    let fetched = repo.get_by_id(HOUSEHOLD, &log.id).await.expect("get");
    assert_eq!(fetched, log);
}

#[tokio::test]
async fn blank_task_type_is_rejected() {
    let repo = CareLogRepo::new(memory_db().await);
    let err = repo.insert(&new_log("   ", utc(7))).await.expect_err("blank");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[tokio::test]
async fn get_unknown_is_not_found() {
    let repo = CareLogRepo::new(memory_db().await);
    let err = repo.get_by_id(HOUSEHOLD, "missing").await.expect_err("missing");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_id_is_db_error() {
    let repo = CareLogRepo::new(memory_db().await);
    let log = new_log("litter", utc(7));
    repo.insert(&log).await.expect("first insert");
    let err = repo.insert(&log).await.expect_err("duplicate");
    assert!(matches!(err, AppError::Db(_)));
}

// ─── list_range ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_range_is_half_open_and_sorted() {
    let repo = CareLogRepo::new(memory_db().await);
    for (task, hour) in [("b", 9), ("a", 8), ("edge", 12), ("early", 5)] {
        repo.insert(&new_log(task, utc(hour))).await.expect("insert");
    }

    let logs = repo
        .list_range(HOUSEHOLD, utc(6), utc(12))
        .await
        .expect("list");
    let types: Vec<&str> = logs.iter().map(|l| l.task_type.as_str()).collect();
    assert_eq!(types, ["a", "b"]);
}

#[tokio::test]
async fn list_range_is_scoped_to_household() {
    let repo = CareLogRepo::new(memory_db().await);
    repo.insert(&new_log("litter", utc(8))).await.expect("insert");
    let other = NewCareLog::for_type("litter").into_log("other".to_owned(), None, utc(8));
    repo.insert(&other).await.expect("insert other");

    let logs = repo
        .list_range(HOUSEHOLD, utc(0), utc(23))
        .await
        .expect("list");
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].household_id, HOUSEHOLD);
}

#[tokio::test]
async fn sub_second_timestamps_sort_correctly() {
    let repo = CareLogRepo::new(memory_db().await);
    let base = utc(8);
    let later = new_log("later", base + Duration::milliseconds(250));
    let earlier = new_log("earlier", base);
    repo.insert(&later).await.expect("insert");
    repo.insert(&earlier).await.expect("insert");

    let logs = repo
        .list_range(HOUSEHOLD, base, base + Duration::seconds(1))
        .await
        .expect("list");
    let types: Vec<&str> = logs.iter().map(|l| l.task_type.as_str()).collect();
    assert_eq!(types, ["earlier", "later"]);
}

// ─── soft_delete ─────────────────────────────────────────────────────

#[tokio::test]
async fn soft_delete_hides_from_range_but_keeps_row() {
    let repo = CareLogRepo::new(memory_db().await);
    let log = new_log("feed:noon", utc(12));
    repo.insert(&log).await.expect("insert");

    repo.soft_delete(HOUSEHOLD, &log.id, utc(13))
        .await
        .expect("delete");

    let live = repo
        .list_range(HOUSEHOLD, utc(0), utc(23))
        .await
        .expect("list");
    assert!(live.is_empty());

    let kept = repo.get_by_id(HOUSEHOLD, &log.id).await.expect("row kept");
    assert_eq!(kept.deleted_at, Some(utc(13)));
    assert!(kept.is_deleted());
}

#[tokio::test]
async fn soft_delete_twice_is_not_found() {
    let repo = CareLogRepo::new(memory_db().await);
    let log = new_log("feed:noon", utc(12));
    repo.insert(&log).await.expect("insert");
    repo.soft_delete(HOUSEHOLD, &log.id, utc(13))
        .await
        .expect("delete");

    let err = repo
        .soft_delete(HOUSEHOLD, &log.id, utc(14))
        .await
        .expect_err("already deleted");
    assert!(matches!(err, AppError::NotFound(_)));
}
