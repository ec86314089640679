//! Recurring care-task templates configured per household.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upper bound on goal occurrences expanded for a single period.
pub const MAX_OCCURRENCES: u32 = 100;

/// Period over which a goal-based task repeats.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Resets at every business-day start.
    #[default]
    Daily,
    /// Resets on Monday at the business-day start hour.
    Weekly,
    /// Resets on the first of the month at the business-day start hour.
    Monthly,
}

impl Frequency {
    /// Stable lowercase name, as stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parse a stored name; unknown values fall back to daily.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::Daily,
        }
    }
}

/// One of the four fixed daily time buckets.
///
/// Variant order is the slot order: `Morning < Noon < Evening < Night`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// 05:00 to 10:59.
    Morning,
    /// 11:00 to 14:59.
    Noon,
    /// 15:00 to 19:59.
    Evening,
    /// 20:00 to 04:59.
    Night,
}

impl MealSlot {
    /// All slots in order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Noon, Self::Evening, Self::Night];

    /// Slot whose bucket contains the given hour of the day.
    #[must_use]
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=10 => Self::Morning,
            11..=14 => Self::Noon,
            15..=19 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Stable lowercase name used in log type suffixes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Parse a slot name; `None` for anything else.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.as_str() == raw)
    }
}

impl Display for MealSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Household-level template for a recurring care task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CareTaskDefinition {
    /// Identifier, also the base of every log type for this task.
    pub id: String,
    /// Owning household.
    #[serde(default)]
    pub household_id: String,
    /// Display title.
    pub title: String,
    /// Disabled definitions never produce instances.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Repeat period for goal-based tasks.
    #[serde(default)]
    pub frequency: Frequency,
    /// Occurrences per period; unset means one.
    #[serde(default)]
    pub frequency_count: Option<u32>,
    /// Daily slots; when non-empty the task is slot-based.
    #[serde(default)]
    pub meal_slots: Vec<MealSlot>,
    /// Optional icon name for display.
    #[serde(default)]
    pub icon: Option<String>,
    /// Whether instances are tracked separately for every cat.
    #[serde(default)]
    pub per_cat: bool,
}

fn default_enabled() -> bool {
    true
}

impl CareTaskDefinition {
    /// A daily, single-occurrence, household-level definition.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            household_id: String::new(),
            title: title.into(),
            enabled: true,
            frequency: Frequency::Daily,
            frequency_count: None,
            meal_slots: Vec::new(),
            icon: None,
            per_cat: false,
        }
    }

    /// Builder-style slot assignment.
    #[must_use]
    pub fn with_slots(mut self, slots: impl IntoIterator<Item = MealSlot>) -> Self {
        self.meal_slots = slots.into_iter().collect();
        self
    }

    /// Builder-style goal assignment.
    #[must_use]
    pub fn with_goal(mut self, frequency: Frequency, count: Option<u32>) -> Self {
        self.frequency = frequency;
        self.frequency_count = count;
        self
    }

    /// Slot presence wins over any configured count.
    #[must_use]
    pub fn is_slot_based(&self) -> bool {
        !self.meal_slots.is_empty()
    }

    /// Occurrences per period, clamped into `1..=MAX_OCCURRENCES`.
    #[must_use]
    pub fn occurrences(&self) -> u32 {
        self.frequency_count
            .unwrap_or(1)
            .clamp(1, MAX_OCCURRENCES)
    }

    /// Configured slots deduplicated and in slot order.
    #[must_use]
    pub fn normalized_slots(&self) -> Vec<MealSlot> {
        let mut slots = self.meal_slots.clone();
        slots.sort_unstable();
        slots.dedup();
        slots
    }
}
