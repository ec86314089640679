//! Household-scoped store backed by the `SQLite` repositories.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::care_log::{CareLog, NewCareLog};
use crate::models::definition::CareTaskDefinition;
use crate::models::household::{Cat, Incident, InventoryItem, Observation, Photo};
use crate::store::{AckTarget, AlertStore, CareStore, StoreFuture};
use crate::Result;

use super::care_log_repo::CareLogRepo;
use super::cat_repo::CatRepo;
use super::db::Database;
use super::definition_repo::DefinitionRepo;
use super::incident_repo::IncidentRepo;
use super::inventory_repo::InventoryRepo;
use super::observation_repo::ObservationRepo;
use super::photo_repo::PhotoRepo;

/// [`CareStore`] and [`AlertStore`] for one household.
///
/// Reads and writes only touch rows of that household. Writes are plain row
/// appends and updates; concurrent members acting on the same row resolve as
/// last-write-wins.
#[derive(Clone)]
pub struct SqliteStore {
    household_id: String,
    actor_id: Option<String>,
    definitions: DefinitionRepo,
    logs: CareLogRepo,
    cats: CatRepo,
    incidents: IncidentRepo,
    observations: ObservationRepo,
    inventory: InventoryRepo,
    photos: PhotoRepo,
}

impl SqliteStore {
    /// Scope a store to `household_id`, stamping new logs with `actor_id`.
    #[must_use]
    pub fn new(db: Arc<Database>, household_id: String, actor_id: Option<String>) -> Self {
        Self {
            household_id,
            actor_id,
            definitions: DefinitionRepo::new(Arc::clone(&db)),
            logs: CareLogRepo::new(Arc::clone(&db)),
            cats: CatRepo::new(Arc::clone(&db)),
            incidents: IncidentRepo::new(Arc::clone(&db)),
            observations: ObservationRepo::new(Arc::clone(&db)),
            inventory: InventoryRepo::new(Arc::clone(&db)),
            photos: PhotoRepo::new(db),
        }
    }

    /// Household this store is scoped to.
    #[must_use]
    pub fn household_id(&self) -> &str {
        &self.household_id
    }

    /// Underlying definition repository, for imports.
    #[must_use]
    pub fn definitions(&self) -> &DefinitionRepo {
        &self.definitions
    }

    /// Fetch one of this household's logs, including soft-deleted ones.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such log.
    pub async fn care_log(&self, id: &str) -> Result<CareLog> {
        self.logs.get_by_id(&self.household_id, id).await
    }

    /// Enable or disable one of this household's definitions.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such definition.
    pub async fn set_definition_enabled(&self, id: &str, enabled: bool) -> Result<()> {
        self.definitions
            .set_enabled(&self.household_id, id, enabled)
            .await
    }

    /// Record a new stock level, re-arming any dismissed low-stock alert.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the household has no such item.
    pub async fn restock(&self, id: &str, remaining: u32) -> Result<()> {
        self.inventory
            .update_remaining(&self.household_id, id, remaining)
            .await
    }
}

impl CareStore for SqliteStore {
    fn list_definitions(&self) -> StoreFuture<'_, Vec<CareTaskDefinition>> {
        Box::pin(async move { self.definitions.list_for_household(&self.household_id).await })
    }

    fn list_logs(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreFuture<'_, Vec<CareLog>> {
        Box::pin(async move { self.logs.list_range(&self.household_id, from, to).await })
    }

    fn add_care_log(&self, log: NewCareLog) -> StoreFuture<'_, CareLog> {
        Box::pin(async move {
            let log = log.into_log(self.household_id.clone(), self.actor_id.clone(), Utc::now());
            self.logs.insert(&log).await
        })
    }

    fn delete_care_log(&self, id: &str) -> StoreFuture<'_, ()> {
        let id = id.to_owned();
        Box::pin(async move {
            self.logs
                .soft_delete(&self.household_id, &id, Utc::now())
                .await
        })
    }
}

impl AlertStore for SqliteStore {
    fn list_cats(&self) -> StoreFuture<'_, Vec<Cat>> {
        Box::pin(async move { self.cats.list_for_household(&self.household_id).await })
    }

    fn list_open_incidents(&self) -> StoreFuture<'_, Vec<Incident>> {
        Box::pin(async move { self.incidents.list_open(&self.household_id).await })
    }

    fn list_unacknowledged_observations(&self) -> StoreFuture<'_, Vec<Observation>> {
        Box::pin(async move {
            self.observations
                .list_unacknowledged(&self.household_id)
                .await
        })
    }

    fn list_inventory(&self) -> StoreFuture<'_, Vec<InventoryItem>> {
        Box::pin(async move { self.inventory.list_for_household(&self.household_id).await })
    }

    fn list_unseen_photos(&self) -> StoreFuture<'_, Vec<Photo>> {
        Box::pin(async move { self.photos.list_unseen(&self.household_id).await })
    }

    fn set_acknowledged(&self, target: AckTarget, acknowledged: bool) -> StoreFuture<'_, ()> {
        let at = acknowledged.then(Utc::now);
        Box::pin(async move {
            let household = self.household_id.as_str();
            match target {
                AckTarget::Incident(id) => self.incidents.set_resolved(household, &id, at).await,
                AckTarget::Observation(id) => {
                    self.observations.set_acknowledged(household, &id, at).await
                }
                AckTarget::Inventory(id) => {
                    self.inventory.set_acknowledged(household, &id, at).await
                }
                AckTarget::Photos(ids) => self.photos.set_seen(household, &ids, at).await,
            }
        })
    }
}
