//! Completion matching of expanded instances against care logs.

use chrono::{NaiveDateTime, Timelike};

use crate::config::HouseholdSettings;
use crate::models::care_log::CareLog;
use crate::models::definition::{CareTaskDefinition, MealSlot};
use crate::models::instance::{CareInstance, InstanceKind};

use super::business_day::{business_day_window, period_window, Window};
use super::task_key::TaskKey;

/// A live (not soft-deleted) log with its type parsed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    /// Trimmed task type as stored.
    pub raw: String,
    /// Parsed task type.
    pub key: TaskKey,
    /// Cat the log applies to.
    pub cat_id: Option<String>,
    /// Completion time in household wall-clock time.
    pub done_at: NaiveDateTime,
}

/// Parse every live log, dropping soft-deleted rows.
#[must_use]
pub fn parse_logs(logs: &[CareLog], settings: &HouseholdSettings) -> Vec<ParsedLog> {
    logs.iter()
        .filter(|log| !log.is_deleted())
        .map(|log| ParsedLog {
            raw: log.task_type.trim().to_owned(),
            key: TaskKey::parse(&log.task_type),
            cat_id: log.cat_id.clone(),
            done_at: settings.local_time(log.done_at),
        })
        .collect()
}

fn same_cat(instance: &CareInstance, log: &ParsedLog) -> bool {
    match &instance.cat_id {
        Some(cat) => log.cat_id.as_deref() == Some(cat.as_str()),
        None => true,
    }
}

/// Whether `log` names `definition` without a slot.
///
/// An exact match on the stored type wins over suffix parsing, so a
/// definition such as `brush_night` owns its own bare logs.
fn is_bare_log_of(definition: &CareTaskDefinition, log: &ParsedLog) -> bool {
    log.raw == definition.id || (log.key.base_id == definition.id && log.key.slot.is_none())
}

/// Slot a log counts toward, if it belongs to `definition` at all.
///
/// Suffixed logs name their slot. A bare `{id}` log counts toward the slot
/// its timestamp falls in, or toward the only slot of a one-slot definition.
fn log_slot(definition: &CareTaskDefinition, log: &ParsedLog) -> Option<MealSlot> {
    if !is_bare_log_of(definition, log) {
        return (log.key.base_id == definition.id)
            .then_some(log.key.slot)
            .flatten();
    }
    match definition.normalized_slots().as_slice() {
        [only] => Some(*only),
        _ => Some(MealSlot::for_hour(log.done_at.hour())),
    }
}

/// Mark slot and goal instances of one definition as done.
///
/// Slot instances are existence-based within the business day. Goal
/// instances are count-based within their period: `n` matching logs satisfy
/// the first `n` occurrences and never more than exist.
pub fn resolve(
    definition: &CareTaskDefinition,
    instances: &mut [CareInstance],
    logs: &[ParsedLog],
    now: NaiveDateTime,
    day_start_hour: u8,
) {
    let day = business_day_window(now, day_start_hour);
    for instance in instances.iter_mut() {
        match instance.kind {
            InstanceKind::Slot { slot, .. } => {
                instance.done = logs.iter().any(|log| {
                    day.contains(log.done_at)
                        && same_cat(instance, log)
                        && log_slot(definition, log) == Some(slot)
                });
            }
            InstanceKind::Goal {
                frequency,
                occurrence,
                ..
            } => {
                let period = period_window(frequency, now, day_start_hour);
                let count = goal_count(definition, instance, logs, period);
                instance.done = u64::from(occurrence) <= count;
            }
        }
    }
}

fn goal_count(
    definition: &CareTaskDefinition,
    instance: &CareInstance,
    logs: &[ParsedLog],
    period: Window,
) -> u64 {
    let matching = logs
        .iter()
        .filter(|log| {
            is_bare_log_of(definition, log)
                && period.contains(log.done_at)
                && same_cat(instance, log)
        })
        .count();
    u64::try_from(matching).unwrap_or(u64::MAX)
}
