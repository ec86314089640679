//! Inventory repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::household::InventoryItem;
use crate::{AppError, Result};

use super::db::Database;
use super::{format_ts, parse_opt_ts};

/// Repository for inventory items.
#[derive(Clone)]
pub struct InventoryRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct InventoryRow {
    id: String,
    household_id: String,
    name: String,
    remaining: i64,
    alert_threshold: i64,
    acknowledged_at: Option<String>,
}

impl InventoryRow {
    fn into_item(self) -> Result<InventoryItem> {
        let remaining = u32::try_from(self.remaining)
            .map_err(|e| AppError::Db(format!("invalid remaining: {e}")))?;
        let alert_threshold = u32::try_from(self.alert_threshold)
            .map_err(|e| AppError::Db(format!("invalid alert_threshold: {e}")))?;

        Ok(InventoryItem {
            acknowledged_at: parse_opt_ts(self.acknowledged_at.as_deref(), "acknowledged_at")?,
            id: self.id,
            household_id: self.household_id,
            name: self.name,
            remaining,
            alert_threshold,
        })
    }
}

impl InventoryRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new inventory item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, item: &InventoryItem) -> Result<InventoryItem> {
        sqlx::query(
            "INSERT INTO inventory_item (id, household_id, name, remaining, alert_threshold, acknowledged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&item.id)
        .bind(&item.household_id)
        .bind(&item.name)
        .bind(i64::from(item.remaining))
        .bind(i64::from(item.alert_threshold))
        .bind(item.acknowledged_at.map(format_ts))
        .execute(self.db.as_ref())
        .await?;
        Ok(item.clone())
    }

    /// All items of a household ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for_household(&self, household_id: &str) -> Result<Vec<InventoryItem>> {
        let rows: Vec<InventoryRow> = sqlx::query_as(
            "SELECT id, household_id, name, remaining, alert_threshold, acknowledged_at
             FROM inventory_item
             WHERE household_id = ?1
             ORDER BY name ASC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(InventoryRow::into_item).collect()
    }

    /// Record a new stock level. Any dismissed alert is re-armed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such item.
    pub async fn update_remaining(&self, household_id: &str, id: &str, remaining: u32) -> Result<()> {
        let result = sqlx::query(
            "UPDATE inventory_item SET remaining = ?1, acknowledged_at = NULL
             WHERE household_id = ?2 AND id = ?3",
        )
        .bind(i64::from(remaining))
        .bind(household_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("inventory item {id} not found")));
        }
        Ok(())
    }

    /// Dismiss (`Some`) or re-arm (`None`) the low-stock alert.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such item.
    pub async fn set_acknowledged(
        &self,
        household_id: &str,
        id: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let result = sqlx::query(
            "UPDATE inventory_item SET acknowledged_at = ?1 WHERE household_id = ?2 AND id = ?3",
        )
        .bind(at.map(format_ts))
        .bind(household_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("inventory item {id} not found")));
        }
        Ok(())
    }
}
