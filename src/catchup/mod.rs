//! Catch-up list: outstanding tasks merged with household alerts.

pub mod sources;

use chrono::{DateTime, Utc};
use tracing::{debug, info_span, Instrument};

use crate::care::business_day::{period_window, Window};
use crate::care::{self, CareSummary};
use crate::config::HouseholdSettings;
use crate::models::catch_up::CatchUpItem;
use crate::models::definition::Frequency;
use crate::models::household::{Cat, Incident, InventoryItem, Observation, Photo};
use crate::store::{AlertStore, CareStore};
use crate::Result;

/// Alert records feeding the non-task sources.
#[derive(Debug, Clone, Default)]
pub struct AlertSnapshot {
    /// Cats, for naming photo batches.
    pub cats: Vec<Cat>,
    /// Incidents; resolved ones are ignored.
    pub incidents: Vec<Incident>,
    /// Observations; acknowledged or mild ones are ignored.
    pub observations: Vec<Observation>,
    /// Inventory; only low, undismissed items surface.
    pub inventory: Vec<InventoryItem>,
    /// Photos; seen ones are ignored.
    pub photos: Vec<Photo>,
}

/// Concatenate sources, then stable-sort by descending severity.
///
/// Equal severities keep source order and, within a source, insertion
/// order. Nothing is dropped or deduplicated here.
#[must_use]
pub fn merge(sources: impl IntoIterator<Item = Vec<CatchUpItem>>) -> Vec<CatchUpItem> {
    let mut items: Vec<CatchUpItem> = sources.into_iter().flatten().collect();
    items.sort_by(|a, b| b.severity.cmp(&a.severity));
    items
}

/// Build the ranked list from an aggregation pass and alert records.
///
/// Sources are concatenated as tasks, inventory, notices, incidents; the
/// feature toggles in `settings` switch individual alert sources off.
#[must_use]
pub fn build(
    summary: &CareSummary,
    alerts: &AlertSnapshot,
    settings: &HouseholdSettings,
) -> Vec<CatchUpItem> {
    let features = settings.features;
    let mut lists = vec![sources::task_items(summary)];
    if features.inventory_alerts {
        lists.push(sources::inventory_items(&alerts.inventory));
    }
    if features.observation_notices {
        lists.push(sources::observation_items(
            &alerts.observations,
            settings.notice_min_severity,
        ));
    }
    if features.photo_notices {
        lists.push(sources::photo_items(&alerts.photos, &alerts.cats));
    }
    lists.push(sources::incident_items(&alerts.incidents));
    merge(lists)
}

/// Widest log range any goal period can need at `now`.
#[must_use]
pub fn log_range(settings: &HouseholdSettings, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let local = settings.local_time(now);
    let hour = settings.day_start_hour();
    let windows: Vec<Window> = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly]
        .into_iter()
        .map(|frequency| period_window(frequency, local, hour))
        .collect();
    let start = windows.iter().map(|w| w.start).min().unwrap_or(local);
    let end = windows.iter().map(|w| w.end).max().unwrap_or(local);
    (settings.to_utc(start), settings.to_utc(end))
}

/// Load every source through the stores and return the ranked list
/// together with the aggregation it was built from.
///
/// # Errors
///
/// Propagates the first store read failure.
pub async fn collect<S>(
    store: &S,
    settings: &HouseholdSettings,
    now: DateTime<Utc>,
) -> Result<(CareSummary, Vec<CatchUpItem>)>
where
    S: CareStore + AlertStore,
{
    async {
        let (from, to) = log_range(settings, now);
        let definitions = store.list_definitions().await?;
        let logs = store.list_logs(from, to).await?;
        let alerts = AlertSnapshot {
            cats: store.list_cats().await?,
            incidents: store.list_open_incidents().await?,
            observations: store.list_unacknowledged_observations().await?,
            inventory: store.list_inventory().await?,
            photos: store.list_unseen_photos().await?,
        };

        let summary = care::aggregate_for_cats(&definitions, &logs, &alerts.cats, settings, now);
        let items = build(&summary, &alerts, settings);
        debug!(items = items.len(), "catch-up list built");
        Ok((summary, items))
    }
    .instrument(info_span!("catch_up_collect"))
    .await
}
