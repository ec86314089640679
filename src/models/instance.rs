//! Expanded task instances for the current business day or period.

use serde::{Deserialize, Serialize};

use super::definition::{Frequency, MealSlot};

/// How an instance is satisfied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum InstanceKind {
    /// One fixed slot of the business day; any matching log satisfies it.
    Slot {
        /// The slot this instance covers.
        slot: MealSlot,
        /// Whether the slot has already ended.
        past: bool,
    },
    /// The `occurrence`-th of `of` required completions in the period.
    Goal {
        /// Period the goal repeats over.
        frequency: Frequency,
        /// 1-based occurrence number.
        occurrence: u32,
        /// Occurrences required per period.
        of: u32,
    },
}

/// A single concrete instance of a care task definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CareInstance {
    /// Stable identifier within the current period.
    pub instance_id: String,
    /// Source definition identifier.
    pub def_id: String,
    /// Display label.
    pub label: String,
    /// Slot for slot-based instances.
    pub slot: Option<MealSlot>,
    /// Cat for per-cat instances.
    pub cat_id: Option<String>,
    /// Slot or goal details.
    pub kind: InstanceKind,
    /// Whether a log satisfies this instance.
    pub done: bool,
}

impl CareInstance {
    /// Log type that completes this instance, in canonical form.
    #[must_use]
    pub fn completion_type(&self) -> String {
        match self.slot {
            Some(slot) => format!("{}:{slot}", self.def_id),
            None => self.def_id.clone(),
        }
    }
}
