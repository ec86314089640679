//! Cats and the alert-producing household records around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cat living in the household.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Cat {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Display name.
    pub name: String,
}

impl Cat {
    /// Construct a cat with a generated identifier.
    #[must_use]
    pub fn new(household_id: String, name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            name,
        }
    }
}

/// Something that went wrong (vomiting, injury, escape) and needs follow-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Incident {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Affected cat.
    pub cat_id: Option<String>,
    /// Short summary.
    pub title: String,
    /// Details.
    pub body: Option<String>,
    /// When it happened.
    pub occurred_at: DateTime<Utc>,
    /// Set once someone has dealt with it.
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
    /// Construct an unresolved incident.
    #[must_use]
    pub fn new(household_id: String, cat_id: Option<String>, title: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            cat_id,
            title,
            body: None,
            occurred_at: Utc::now(),
            resolved_at: None,
        }
    }

    /// Whether the incident still needs attention.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.resolved_at.is_none()
    }
}

/// A noted change in a cat's behaviour or health, ranked by severity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Observation {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Observed cat.
    pub cat_id: Option<String>,
    /// Short summary.
    pub title: String,
    /// Details.
    pub body: Option<String>,
    /// 0-100; higher is more urgent.
    pub severity: u8,
    /// When it was recorded.
    pub created_at: DateTime<Utc>,
    /// Set once a household member has seen it.
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl Observation {
    /// Construct an unacknowledged observation; severity is capped at 100.
    #[must_use]
    pub fn new(household_id: String, cat_id: Option<String>, title: String, severity: u8) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            cat_id,
            title,
            body: None,
            severity: severity.min(100),
            created_at: Utc::now(),
            acknowledged_at: None,
        }
    }
}

/// A consumable (food, litter, medicine) with a restock threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct InventoryItem {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Display name.
    pub name: String,
    /// Units left.
    pub remaining: u32,
    /// Alert once `remaining` drops to this value.
    pub alert_threshold: u32,
    /// Set when the current low-stock alert was dismissed.
    pub acknowledged_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    /// Construct an item with a generated identifier.
    #[must_use]
    pub fn new(household_id: String, name: String, remaining: u32, alert_threshold: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            name,
            remaining,
            alert_threshold,
            acknowledged_at: None,
        }
    }

    /// Whether stock is at or below the alert threshold.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining <= self.alert_threshold
    }
}

/// An uploaded photo of a cat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Photo {
    /// Unique record identifier.
    pub id: String,
    /// Owning household.
    pub household_id: String,
    /// Pictured cat.
    pub cat_id: Option<String>,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
    /// Set once the photo has been viewed.
    pub seen_at: Option<DateTime<Utc>>,
}

impl Photo {
    /// Construct an unseen photo.
    #[must_use]
    pub fn new(household_id: String, cat_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            household_id,
            cat_id,
            uploaded_at: Utc::now(),
            seen_at: None,
        }
    }
}
