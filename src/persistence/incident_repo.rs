//! Incident repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::household::Incident;
use crate::{AppError, Result};

use super::db::Database;
use super::{format_ts, parse_opt_ts, parse_ts};

/// Repository for incident records.
#[derive(Clone)]
pub struct IncidentRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct IncidentRow {
    id: String,
    household_id: String,
    cat_id: Option<String>,
    title: String,
    body: Option<String>,
    occurred_at: String,
    resolved_at: Option<String>,
}

impl IncidentRow {
    fn into_incident(self) -> Result<Incident> {
        Ok(Incident {
            occurred_at: parse_ts(&self.occurred_at, "occurred_at")?,
            resolved_at: parse_opt_ts(self.resolved_at.as_deref(), "resolved_at")?,
            id: self.id,
            household_id: self.household_id,
            cat_id: self.cat_id,
            title: self.title,
            body: self.body,
        })
    }
}

impl IncidentRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new incident.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, incident: &Incident) -> Result<Incident> {
        sqlx::query(
            "INSERT INTO incident (id, household_id, cat_id, title, body, occurred_at, resolved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&incident.id)
        .bind(&incident.household_id)
        .bind(&incident.cat_id)
        .bind(&incident.title)
        .bind(&incident.body)
        .bind(format_ts(incident.occurred_at))
        .bind(incident.resolved_at.map(format_ts))
        .execute(self.db.as_ref())
        .await?;
        Ok(incident.clone())
    }

    /// Unresolved incidents, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_open(&self, household_id: &str) -> Result<Vec<Incident>> {
        let rows: Vec<IncidentRow> = sqlx::query_as(
            "SELECT id, household_id, cat_id, title, body, occurred_at, resolved_at
             FROM incident
             WHERE household_id = ?1 AND resolved_at IS NULL
             ORDER BY occurred_at DESC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(IncidentRow::into_incident).collect()
    }

    /// Set (`Some`) or clear (`None`) the resolution time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such incident.
    pub async fn set_resolved(
        &self,
        household_id: &str,
        id: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let result =
            sqlx::query("UPDATE incident SET resolved_at = ?1 WHERE household_id = ?2 AND id = ?3")
                .bind(at.map(format_ts))
                .bind(household_id)
                .bind(id)
                .execute(self.db.as_ref())
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("incident {id} not found")));
        }
        Ok(())
    }
}
