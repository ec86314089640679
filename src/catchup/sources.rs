//! Per-source builders for catch-up items.

use crate::care::CareSummary;
use crate::models::catch_up::{CatchUpItem, CatchUpPayload, NoticeSource};
use crate::models::definition::Frequency;
use crate::models::household::{Cat, Incident, InventoryItem, Observation, Photo};
use crate::models::instance::{CareInstance, InstanceKind};

/// Severity of every unresolved incident.
pub const INCIDENT_SEVERITY: u8 = 90;
/// Severity of an inventory item that has run out.
pub const EMPTY_STOCK_SEVERITY: u8 = 80;
/// Severity of a slot task whose slot has already ended.
pub const PAST_SLOT_SEVERITY: u8 = 70;
/// Severity of an inventory item at or below its threshold.
pub const LOW_STOCK_SEVERITY: u8 = 60;
/// Severity of a slot task in the current slot.
pub const CURRENT_SLOT_SEVERITY: u8 = 55;
/// Severity of an unseen-photo batch.
pub const PHOTO_SEVERITY: u8 = 20;

fn task_severity(instance: &CareInstance) -> u8 {
    match instance.kind {
        InstanceKind::Slot { past: true, .. } => PAST_SLOT_SEVERITY,
        InstanceKind::Slot { past: false, .. } => CURRENT_SLOT_SEVERITY,
        InstanceKind::Goal { frequency, .. } => match frequency {
            Frequency::Daily => 50,
            Frequency::Weekly => 40,
            Frequency::Monthly => 30,
        },
    }
}

/// One item per outstanding instance.
#[must_use]
pub fn task_items(summary: &CareSummary) -> Vec<CatchUpItem> {
    summary
        .outstanding()
        .map(|instance| CatchUpItem {
            id: format!("task:{}", instance.instance_id),
            title: instance.label.clone(),
            body: None,
            severity: task_severity(instance),
            cat_id: instance.cat_id.clone(),
            payload: CatchUpPayload::Task(instance.clone()),
        })
        .collect()
}

/// One item per unresolved incident.
#[must_use]
pub fn incident_items(incidents: &[Incident]) -> Vec<CatchUpItem> {
    incidents
        .iter()
        .filter(|incident| incident.is_open())
        .map(|incident| CatchUpItem {
            id: format!("incident:{}", incident.id),
            title: incident.title.clone(),
            body: incident.body.clone(),
            severity: INCIDENT_SEVERITY,
            cat_id: incident.cat_id.clone(),
            payload: CatchUpPayload::Incident(incident.clone()),
        })
        .collect()
}

/// Unacknowledged observations at or above `min_severity`.
#[must_use]
pub fn observation_items(observations: &[Observation], min_severity: u8) -> Vec<CatchUpItem> {
    observations
        .iter()
        .filter(|obs| obs.acknowledged_at.is_none() && obs.severity >= min_severity)
        .map(|obs| CatchUpItem {
            id: format!("observation:{}", obs.id),
            title: obs.title.clone(),
            body: obs.body.clone(),
            severity: obs.severity.min(100),
            cat_id: obs.cat_id.clone(),
            payload: CatchUpPayload::Notice(NoticeSource::Observation(obs.clone())),
        })
        .collect()
}

/// Low-stock items whose alert has not been dismissed.
#[must_use]
pub fn inventory_items(inventory: &[InventoryItem]) -> Vec<CatchUpItem> {
    inventory
        .iter()
        .filter(|item| item.is_low() && item.acknowledged_at.is_none())
        .map(|item| CatchUpItem {
            id: format!("inventory:{}", item.id),
            title: format!("{} is running low", item.name),
            body: Some(format!("{} left", item.remaining)),
            severity: if item.remaining == 0 {
                EMPTY_STOCK_SEVERITY
            } else {
                LOW_STOCK_SEVERITY
            },
            cat_id: None,
            payload: CatchUpPayload::Inventory(item.clone()),
        })
        .collect()
}

/// One notice per cat for all of its unseen photos.
///
/// Batches keep the order in which each cat first appears in `photos`.
#[must_use]
pub fn photo_items(photos: &[Photo], cats: &[Cat]) -> Vec<CatchUpItem> {
    let mut batches: Vec<(Option<String>, Vec<String>)> = Vec::new();
    for photo in photos.iter().filter(|photo| photo.seen_at.is_none()) {
        if let Some(pos) = batches.iter().position(|(cat, _)| *cat == photo.cat_id) {
            batches[pos].1.push(photo.id.clone());
        } else {
            batches.push((photo.cat_id.clone(), vec![photo.id.clone()]));
        }
    }

    batches
        .into_iter()
        .map(|(cat_id, photo_ids)| {
            let subject = cat_id
                .as_deref()
                .and_then(|id| cats.iter().find(|cat| cat.id == id))
                .map_or_else(|| "the household".to_owned(), |cat| cat.name.clone());
            let noun = if photo_ids.len() == 1 { "photo" } else { "photos" };
            CatchUpItem {
                id: format!("photos:{}", cat_id.as_deref().unwrap_or("household")),
                title: format!("{} new {noun} of {subject}", photo_ids.len()),
                body: None,
                severity: PHOTO_SEVERITY,
                cat_id,
                payload: CatchUpPayload::Notice(NoticeSource::Photos { photo_ids }),
            }
        })
        .collect()
}
