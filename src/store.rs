//! Collaborator contracts between the core and whatever persists records.
//!
//! The aggregation and merge functions only ever see plain slices; these
//! traits are the seam the async layers (catch-up collection, triage
//! session, CLI) use to read those slices and to record decisions.
//! [`SqliteStore`](crate::persistence::sqlite_store::SqliteStore) is the
//! production implementation.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::care_log::{CareLog, NewCareLog};
use crate::models::definition::CareTaskDefinition;
use crate::models::household::{Cat, Incident, InventoryItem, Observation, Photo};
use crate::Result;

/// Boxed future returned by store methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Record whose acknowledgement flag a triage decision flips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum AckTarget {
    /// Resolve (or reopen) an incident.
    Incident(String),
    /// Acknowledge an observation.
    Observation(String),
    /// Dismiss a low-stock alert.
    Inventory(String),
    /// Mark a batch of photos as seen.
    Photos(Vec<String>),
}

/// Definitions and completion logs for one household.
pub trait CareStore: Send + Sync {
    /// Current task definitions, enabled or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_definitions(&self) -> StoreFuture<'_, Vec<CareTaskDefinition>>;

    /// Live (not soft-deleted) logs with `from <= done_at < to`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_logs(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> StoreFuture<'_, Vec<CareLog>>;

    /// Append a completion log stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`](crate::AppError::InvalidInput) for an
    /// empty task type, or [`AppError::Db`](crate::AppError::Db) on write failure.
    fn add_care_log(&self, log: NewCareLog) -> StoreFuture<'_, CareLog>;

    /// Soft-delete a log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`](crate::AppError::NotFound) if no live log
    /// has that id.
    fn delete_care_log(&self, id: &str) -> StoreFuture<'_, ()>;
}

/// Read access to alert sources plus the acknowledgement switch.
pub trait AlertStore: Send + Sync {
    /// Cats in the household.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_cats(&self) -> StoreFuture<'_, Vec<Cat>>;

    /// Incidents without a resolution.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_open_incidents(&self) -> StoreFuture<'_, Vec<Incident>>;

    /// Observations nobody has acknowledged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_unacknowledged_observations(&self) -> StoreFuture<'_, Vec<Observation>>;

    /// All inventory items.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_inventory(&self) -> StoreFuture<'_, Vec<InventoryItem>>;

    /// Photos not yet seen, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Db`](crate::AppError::Db) if the read fails.
    fn list_unseen_photos(&self) -> StoreFuture<'_, Vec<Photo>>;

    /// Set or clear the acknowledgement on a record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`](crate::AppError::NotFound) if the target
    /// does not exist.
    fn set_acknowledged(&self, target: AckTarget, acknowledged: bool) -> StoreFuture<'_, ()>;
}
