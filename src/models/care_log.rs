//! Completion records for care tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable record that a care task was done.
///
/// Rows are append-only; removal sets `deleted_at` instead of deleting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CareLog {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Raw task type; may carry a slot suffix (`feed:morning`, `feed_morning`).
    pub task_type: String,
    /// Cat the log applies to, if any.
    pub cat_id: Option<String>,
    /// When the task was done.
    pub done_at: DateTime<Utc>,
    /// Free-text memo.
    pub notes: Option<String>,
    /// Attached image references.
    pub images: Vec<String>,
    /// Household member who recorded the log.
    pub actor_id: Option<String>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CareLog {
    /// Whether the log has been soft-deleted.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Fields supplied when recording a completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NewCareLog {
    /// Raw task type, normally a canonical `TaskKey` rendering.
    pub task_type: String,
    /// Cat the log applies to, if any.
    pub cat_id: Option<String>,
    /// Free-text memo.
    pub notes: Option<String>,
    /// Attached image references.
    pub images: Vec<String>,
}

impl NewCareLog {
    /// A log with only a task type.
    #[must_use]
    pub fn for_type(task_type: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            ..Self::default()
        }
    }

    /// Materialize the record for a household at a point in time.
    #[must_use]
    pub fn into_log(
        self,
        household_id: String,
        actor_id: Option<String>,
        done_at: DateTime<Utc>,
    ) -> CareLog {
        CareLog {
            id: Uuid::new_v4().to_string(),
            household_id,
            task_type: self.task_type,
            cat_id: self.cat_id,
            done_at,
            notes: self.notes,
            images: self.images,
            actor_id,
            deleted_at: None,
        }
    }
}
