//! Care log repository for `SQLite` persistence.
//!
//! Logs are append-only. [`CareLogRepo::soft_delete`] stamps `deleted_at`
//! and nothing in this module ever issues a `DELETE`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::care_log::CareLog;
use crate::{AppError, Result};

use super::db::Database;
use super::{format_ts, parse_opt_ts, parse_ts};

/// Repository for care log records.
#[derive(Clone)]
pub struct CareLogRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct CareLogRow {
    id: String,
    household_id: String,
    task_type: String,
    cat_id: Option<String>,
    done_at: String,
    notes: Option<String>,
    images: String,
    actor_id: Option<String>,
    deleted_at: Option<String>,
}

impl CareLogRow {
    fn into_log(self) -> Result<CareLog> {
        let images: Vec<String> = serde_json::from_str(&self.images)
            .map_err(|e| AppError::Db(format!("invalid images: {e}")))?;

        Ok(CareLog {
            done_at: parse_ts(&self.done_at, "done_at")?,
            deleted_at: parse_opt_ts(self.deleted_at.as_deref(), "deleted_at")?,
            id: self.id,
            household_id: self.household_id,
            task_type: self.task_type,
            cat_id: self.cat_id,
            notes: self.notes,
            images,
            actor_id: self.actor_id,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, household_id, task_type, cat_id, done_at, notes, images, actor_id, deleted_at
     FROM care_log";

impl CareLogRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new care log.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the task type is blank, or
    /// `AppError::Db` if the insert fails.
    pub async fn insert(&self, log: &CareLog) -> Result<CareLog> {
        if log.task_type.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "care log task type must not be empty".into(),
            ));
        }
        let images = serde_json::to_string(&log.images)?;

        sqlx::query(
            "INSERT INTO care_log (id, household_id, task_type, cat_id, done_at, notes, images, actor_id, deleted_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&log.id)
        .bind(&log.household_id)
        .bind(&log.task_type)
        .bind(&log.cat_id)
        .bind(format_ts(log.done_at))
        .bind(&log.notes)
        .bind(images)
        .bind(&log.actor_id)
        .bind(log.deleted_at.map(format_ts))
        .execute(self.db.as_ref())
        .await?;

        debug!(log_id = %log.id, task_type = %log.task_type, "care log recorded");
        Ok(log.clone())
    }

    /// Retrieve a household's log by identifier, including soft-deleted rows.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no row with that id.
    pub async fn get_by_id(&self, household_id: &str, id: &str) -> Result<CareLog> {
        let row: Option<CareLogRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE household_id = ?1 AND id = ?2"
        ))
        .bind(household_id)
        .bind(id)
        .fetch_optional(self.db.as_ref())
        .await?;

        row.ok_or_else(|| AppError::NotFound(format!("care log {id} not found")))?
            .into_log()
    }

    /// Live logs for a household with `from <= done_at < to`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_range(
        &self,
        household_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<CareLog>> {
        let rows: Vec<CareLogRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS}
             WHERE household_id = ?1 AND deleted_at IS NULL
               AND done_at >= ?2 AND done_at < ?3
             ORDER BY done_at ASC"
        ))
        .bind(household_id)
        .bind(format_ts(from))
        .bind(format_ts(to))
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(CareLogRow::into_log).collect()
    }

    /// Soft-delete a live log.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such live log,
    /// or `AppError::Db` if the update fails.
    pub async fn soft_delete(&self, household_id: &str, id: &str, at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query(
            "UPDATE care_log SET deleted_at = ?1
             WHERE household_id = ?2 AND id = ?3 AND deleted_at IS NULL",
        )
        .bind(format_ts(at))
        .bind(household_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("care log {id} not found")));
        }
        debug!(log_id = id, "care log soft-deleted");
        Ok(())
    }
}
