//! Cat repository for `SQLite` persistence.

use std::sync::Arc;

use crate::models::household::Cat;
use crate::Result;

use super::db::Database;

/// Repository for cat records.
#[derive(Clone)]
pub struct CatRepo {
    db: Arc<Database>,
}

impl CatRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new cat.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, cat: &Cat) -> Result<Cat> {
        sqlx::query("INSERT INTO cat (id, household_id, name) VALUES (?1, ?2, ?3)")
            .bind(&cat.id)
            .bind(&cat.household_id)
            .bind(&cat.name)
            .execute(self.db.as_ref())
            .await?;
        Ok(cat.clone())
    }

    /// Cats of a household ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for_household(&self, household_id: &str) -> Result<Vec<Cat>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            "SELECT id, household_id, name FROM cat WHERE household_id = ?1 ORDER BY name ASC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, household_id, name)| Cat {
                id,
                household_id,
                name,
            })
            .collect())
    }
}
