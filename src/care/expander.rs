//! Expansion of definitions into the instances due right now.

use chrono::{NaiveDateTime, Timelike};

use crate::models::definition::{CareTaskDefinition, MealSlot};
use crate::models::household::Cat;
use crate::models::instance::{CareInstance, InstanceKind};

/// Slot whose bucket contains `now`.
#[must_use]
pub fn current_slot(now: NaiveDateTime) -> MealSlot {
    MealSlot::for_hour(now.hour())
}

/// Slot the business day has reached at `now`.
///
/// Hours before `day_start_hour` belong to the previous business day, which
/// has already run through every slot, so they report [`MealSlot::Night`].
#[must_use]
pub fn day_slot(now: NaiveDateTime, day_start_hour: u8) -> MealSlot {
    if now.hour() < u32::from(day_start_hour.min(23)) {
        MealSlot::Night
    } else {
        current_slot(now)
    }
}

/// Slots of `definition` that have started by `now`, in slot order.
///
/// Later slots are withheld so an evening task is not outstanding at 08:00.
#[must_use]
pub fn due_slots(
    definition: &CareTaskDefinition,
    now: NaiveDateTime,
    day_start_hour: u8,
) -> Vec<MealSlot> {
    let current = day_slot(now, day_start_hour);
    definition
        .normalized_slots()
        .into_iter()
        .filter(|slot| *slot <= current)
        .collect()
}

/// Expand one definition into undone instances.
///
/// Per-cat definitions yield one set of instances per cat; with no cats
/// supplied they fall back to a single household-level set. Disabled
/// definitions yield nothing.
#[must_use]
pub fn expand(
    definition: &CareTaskDefinition,
    cats: &[Cat],
    now: NaiveDateTime,
    day_start_hour: u8,
) -> Vec<CareInstance> {
    if !definition.enabled {
        return Vec::new();
    }

    let base = expand_household(definition, now, day_start_hour);
    if !definition.per_cat || cats.is_empty() {
        return base;
    }

    cats.iter()
        .flat_map(|cat| {
            base.iter().cloned().map(move |mut instance| {
                instance.instance_id = format!("{}@{}", instance.instance_id, cat.id);
                instance.label = format!("{} - {}", instance.label, cat.name);
                instance.cat_id = Some(cat.id.clone());
                instance
            })
        })
        .collect()
}

fn expand_household(
    definition: &CareTaskDefinition,
    now: NaiveDateTime,
    day_start_hour: u8,
) -> Vec<CareInstance> {
    if definition.is_slot_based() {
        let current = day_slot(now, day_start_hour);
        return due_slots(definition, now, day_start_hour)
            .into_iter()
            .map(|slot| CareInstance {
                instance_id: format!("{}:{slot}", definition.id),
                def_id: definition.id.clone(),
                label: format!("{} ({slot})", definition.title),
                slot: Some(slot),
                cat_id: None,
                kind: InstanceKind::Slot {
                    slot,
                    past: slot < current,
                },
                done: false,
            })
            .collect();
    }

    let of = definition.occurrences();
    (1..=of)
        .map(|occurrence| CareInstance {
            instance_id: format!("{}#{occurrence}", definition.id),
            def_id: definition.id.clone(),
            label: if of > 1 {
                format!("{} ({occurrence}/{of})", definition.title)
            } else {
                definition.title.clone()
            },
            slot: None,
            cat_id: None,
            kind: InstanceKind::Goal {
                frequency: definition.frequency,
                occurrence,
                of,
            },
            done: false,
        })
        .collect()
}
