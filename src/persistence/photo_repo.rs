//! Photo repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::household::Photo;
use crate::{AppError, Result};

use super::db::Database;
use super::{format_ts, parse_opt_ts, parse_ts};

/// Repository for photo records.
#[derive(Clone)]
pub struct PhotoRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct PhotoRow {
    id: String,
    household_id: String,
    cat_id: Option<String>,
    uploaded_at: String,
    seen_at: Option<String>,
}

impl PhotoRow {
    fn into_photo(self) -> Result<Photo> {
        Ok(Photo {
            uploaded_at: parse_ts(&self.uploaded_at, "uploaded_at")?,
            seen_at: parse_opt_ts(self.seen_at.as_deref(), "seen_at")?,
            id: self.id,
            household_id: self.household_id,
            cat_id: self.cat_id,
        })
    }
}

impl PhotoRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new photo record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn insert(&self, photo: &Photo) -> Result<Photo> {
        sqlx::query(
            "INSERT INTO photo (id, household_id, cat_id, uploaded_at, seen_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&photo.id)
        .bind(&photo.household_id)
        .bind(&photo.cat_id)
        .bind(format_ts(photo.uploaded_at))
        .bind(photo.seen_at.map(format_ts))
        .execute(self.db.as_ref())
        .await?;
        Ok(photo.clone())
    }

    /// Photos not yet seen, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_unseen(&self, household_id: &str) -> Result<Vec<Photo>> {
        let rows: Vec<PhotoRow> = sqlx::query_as(
            "SELECT id, household_id, cat_id, uploaded_at, seen_at
             FROM photo
             WHERE household_id = ?1 AND seen_at IS NULL
             ORDER BY uploaded_at ASC",
        )
        .bind(household_id)
        .fetch_all(self.db.as_ref())
        .await?;

        rows.into_iter().map(PhotoRow::into_photo).collect()
    }

    /// Set (`Some`) or clear (`None`) `seen_at` on a batch in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if any id is unknown to the household;
    /// the batch is then left untouched.
    pub async fn set_seen(
        &self,
        household_id: &str,
        ids: &[String],
        at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let seen_at = at.map(format_ts);
        let mut tx = self.db.begin().await?;
        for id in ids {
            let result =
                sqlx::query("UPDATE photo SET seen_at = ?1 WHERE household_id = ?2 AND id = ?3")
                    .bind(&seen_at)
                    .bind(household_id)
                    .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(AppError::NotFound(format!("photo {id} not found")));
            }
        }
        tx.commit().await?;
        Ok(())
    }
}
