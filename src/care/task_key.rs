//! Typed view of care-log type strings.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::models::definition::MealSlot;

/// Definition id plus optional slot, parsed from a log's `task_type`.
///
/// Accepts the canonical `{id}:{slot}` form and the legacy `{id}_{slot}`
/// form. A suffix is only stripped when it names a real slot, so ids that
/// contain underscores (`clean_litter`) survive untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskKey {
    /// Definition identifier.
    pub base_id: String,
    /// Slot suffix, if present.
    pub slot: Option<MealSlot>,
}

impl TaskKey {
    /// Key for a definition with an optional slot.
    #[must_use]
    pub fn new(base_id: impl Into<String>, slot: Option<MealSlot>) -> Self {
        Self {
            base_id: base_id.into(),
            slot,
        }
    }

    /// Parse a raw log type. Never fails; unknown shapes become a bare id.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        for separator in [':', '_'] {
            if let Some((base, suffix)) = raw.rsplit_once(separator) {
                if let Some(slot) = MealSlot::parse(suffix) {
                    if !base.is_empty() {
                        return Self::new(base, Some(slot));
                    }
                }
            }
        }
        Self::new(raw, None)
    }

    /// Canonical rendering, `{id}:{slot}` or `{id}`.
    #[must_use]
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl Display for TaskKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.slot {
            Some(slot) => write!(f, "{}:{slot}", self.base_id),
            None => f.write_str(&self.base_id),
        }
    }
}
