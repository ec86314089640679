//! Observation repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::household::Observation;
use crate::{AppError, Result};

use super::db::Database;
use super::{format_ts, parse_opt_ts, parse_ts};

/// Repository for observation records.
#[derive(Clone)]
pub struct ObservationRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct ObservationRow {
    id: String,
    household_id: String,
    cat_id: Option<String>,
    title: String,
    body: Option<String>,
    severity: i64,
    created_at: String,
    acknowledged_at: Option<String>,
}

impl ObservationRow {
    fn into_observation(self) -> Result<Observation> {
        let severity = u8::try_from(self.severity.clamp(0, 100))
            .map_err(|e| AppError::Db(format!("invalid severity: {e}")))?;

        Ok(Observation {
            created_at: parse_ts(&self.created_at, "created_at")?,
            acknowledged_at: parse_opt_ts(self.acknowledged_at.as_deref(), "acknowledged_at")?,
            id: self.id,
            household_id: self.household_id,
            cat_id: self.cat_id,
            title: self.title,
            body: self.body,
            severity,
        })
    }
}

impl ObservationRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new observation.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` for a severity above 100, or
    /// `AppError::Db` if the insert fails.
    pub async fn insert(&self, observation: &Observation) -> Result<Observation> {
        if observation.severity > 100 {
            return Err(AppError::InvalidInput(
                "observation severity must be between 0 and 100".into(),
            ));
        }

        sqlx::query(
            "INSERT INTO observation (id, household_id, cat_id, title, body, severity, created_at, acknowledged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&observation.id)
        .bind(&observation.household_id)
        .bind(&observation.cat_id)
        .bind(&observation.title)
        .bind(&observation.body)
        .bind(i64::from(observation.severity))
        .bind(format_ts(observation.created_at))
        .bind(observation.acknowledged_at.map(format_ts))
        .execute(self.db.as_ref())
        .await?;
        Ok(observation.clone())
    }

    /// Observations nobody has acknowledged, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_unacknowledged(&self, household_id: &str) -> Result<Vec<Observation>> {
        let rows: Vec<ObservationRow> = sqlx::query_as(
            "SELECT id, household_id, cat_id, title, body, severity, created_at, acknowledged_at
             FROM observation
             WHERE household_id = ?1 AND acknowledged_at IS NULL
             ORDER BY created_at ASC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(ObservationRow::into_observation).collect()
    }

    /// Set (`Some`) or clear (`None`) the acknowledgement time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such observation.
    pub async fn set_acknowledged(
        &self,
        household_id: &str,
        id: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE observation SET acknowledged_at = ?1 WHERE household_id = ?2 AND id = ?3",
        )
        .bind(at.map(format_ts))
        .bind(household_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("observation {id} not found")));
        }
        Ok(())
    }
}
