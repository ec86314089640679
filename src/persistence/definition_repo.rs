//! Care task definition repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::definition::{CareTaskDefinition, Frequency, MealSlot};
use crate::{AppError, Result};

use super::db::Database;

/// Repository for care task definitions.
#[derive(Clone)]
pub struct DefinitionRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct DefinitionRow {
    id: String,
    household_id: String,
    title: String,
    enabled: i64,
    frequency: String,
    frequency_count: Option<i64>,
    meal_slots: String,
    icon: Option<String>,
    per_cat: i64,
}

impl DefinitionRow {
    fn into_definition(self) -> Result<CareTaskDefinition> {
        let meal_slots: Vec<MealSlot> = serde_json::from_str(&self.meal_slots)
            .map_err(|e| AppError::Db(format!("invalid meal_slots: {e}")))?;
        // Negative or oversized counts are treated as unset.
        let frequency_count = self.frequency_count.and_then(|n| u32::try_from(n).ok());

        Ok(CareTaskDefinition {
            id: self.id,
            household_id: self.household_id,
            title: self.title,
            enabled: self.enabled != 0,
            frequency: Frequency::parse_lenient(&self.frequency),
            frequency_count,
            meal_slots,
            icon: self.icon,
            per_cat: self.per_cat != 0,
        })
    }
}

impl DefinitionRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or replace a definition; `position` orders listings.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` for a blank id or title, or
    /// `AppError::Db` if the write fails.
    pub async fn upsert(&self, definition: &CareTaskDefinition, position: i64) -> Result<()> {
        if definition.id.trim().is_empty() || definition.title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "definition id and title must not be empty".into(),
            ));
        }
        let meal_slots = serde_json::to_string(&definition.normalized_slots())?;

        sqlx::query(
            "INSERT INTO care_task_definition
                (id, household_id, title, enabled, frequency, frequency_count, meal_slots, icon, per_cat, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT (household_id, id) DO UPDATE SET
                title = excluded.title,
                enabled = excluded.enabled,
                frequency = excluded.frequency,
                frequency_count = excluded.frequency_count,
                meal_slots = excluded.meal_slots,
                icon = excluded.icon,
                per_cat = excluded.per_cat,
                position = excluded.position",
        )
        .bind(&definition.id)
        .bind(&definition.household_id)
        .bind(&definition.title)
        .bind(i64::from(definition.enabled))
        .bind(definition.frequency.as_str())
        .bind(definition.frequency_count.map(i64::from))
        .bind(meal_slots)
        .bind(&definition.icon)
        .bind(i64::from(definition.per_cat))
        .bind(position)
        .execute(self.db.as_ref())
        .await?;
        Ok(())
    }

    /// All definitions of a household in configured order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails or a row is corrupt.
    pub async fn list_for_household(&self, household_id: &str) -> Result<Vec<CareTaskDefinition>> {
        let rows: Vec<DefinitionRow> = sqlx::query_as(
            "SELECT id, household_id, title, enabled, frequency, frequency_count, meal_slots, icon, per_cat
             FROM care_task_definition
             WHERE household_id = ?1
             ORDER BY position ASC, id ASC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(DefinitionRow::into_definition).collect()
    }

    /// Enable or disable a definition.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the definition does not exist.
    pub async fn set_enabled(&self, household_id: &str, id: &str, enabled: bool) -> Result<()> {
        let result = sqlx::query(
            "UPDATE care_task_definition SET enabled = ?1 WHERE household_id = ?2 AND id = ?3",
        )
        .bind(i64::from(enabled))
        .bind(household_id)
        .bind(id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("definition {id} not found")));
        }
        Ok(())
    }
}
