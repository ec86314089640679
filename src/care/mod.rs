//! Care-task aggregation core.
//!
//! Pure and synchronous: given definitions, logs, household settings, and
//! the current time, [`aggregate`] expands every enabled definition into the
//! instances due right now and marks each as done or outstanding. Nothing
//! here performs I/O, so it is safe to recompute on every change.

pub mod business_day;
pub mod expander;
pub mod matcher;
pub mod task_key;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HouseholdSettings;
use crate::models::care_log::CareLog;
use crate::models::definition::CareTaskDefinition;
use crate::models::household::Cat;
use crate::models::instance::CareInstance;

/// Result of one aggregation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CareSummary {
    /// Business date the pass was computed for.
    pub business_date: NaiveDate,
    /// Every instance due right now, in definition order.
    pub instances: Vec<CareInstance>,
    /// Number of instances.
    pub total: usize,
    /// Number of instances marked done.
    pub completed: usize,
}

impl CareSummary {
    /// `completed / total`, or `1.0` when nothing is configured.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Counts stay far below 2^52.
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Instances still waiting for a log.
    pub fn outstanding(&self) -> impl Iterator<Item = &CareInstance> {
        self.instances.iter().filter(|instance| !instance.done)
    }
}

/// Aggregate household-level instances.
#[must_use]
pub fn aggregate(
    definitions: &[CareTaskDefinition],
    logs: &[CareLog],
    settings: &HouseholdSettings,
    now: DateTime<Utc>,
) -> CareSummary {
    aggregate_for_cats(definitions, logs, &[], settings, now)
}

/// Aggregate with per-cat definitions expanded for every cat in `cats`.
#[must_use]
pub fn aggregate_for_cats(
    definitions: &[CareTaskDefinition],
    logs: &[CareLog],
    cats: &[Cat],
    settings: &HouseholdSettings,
    now: DateTime<Utc>,
) -> CareSummary {
    let day_start_hour = settings.day_start_hour();
    let local_now = settings.local_time(now);
    let parsed = matcher::parse_logs(logs, settings);

    let mut instances = Vec::new();
    for definition in definitions {
        let mut expanded = expander::expand(definition, cats, local_now, day_start_hour);
        matcher::resolve(definition, &mut expanded, &parsed, local_now, day_start_hour);
        instances.extend(expanded);
    }

    let total = instances.len();
    let completed = instances.iter().filter(|instance| instance.done).count();
    let business_date = business_day::business_date(local_now, day_start_hour);
    debug!(%business_date, total, completed, "care aggregation complete");

    CareSummary {
        business_date,
        instances,
        total,
        completed,
    }
}
