//! Transient catch-up items surfaced for triage.

use serde::{Deserialize, Serialize};

use super::household::{Incident, InventoryItem, Observation};
use super::instance::CareInstance;

/// Source category of a catch-up item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CatchUpKind {
    /// Outstanding care-task instance.
    Task,
    /// Low-stock inventory alert.
    Inventory,
    /// Observation or unseen-photo notice.
    Notice,
    /// Unresolved incident.
    Incident,
}

/// Origin of a notice item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum NoticeSource {
    /// An unacknowledged observation.
    Observation(Observation),
    /// A batch of unseen photos of one cat.
    Photos {
        /// Photos in the batch.
        photo_ids: Vec<String>,
    },
}

/// Record-specific payload carried by a catch-up item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "kind", content = "record")]
pub enum CatchUpPayload {
    /// Outstanding task instance.
    Task(CareInstance),
    /// Low-stock item.
    Inventory(InventoryItem),
    /// Observation or photo notice.
    Notice(NoticeSource),
    /// Unresolved incident.
    Incident(Incident),
}

/// Any outstanding actionable record, ranked by severity.
///
/// Recomputed on every query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CatchUpItem {
    /// Identifier unique across all sources.
    pub id: String,
    /// Headline.
    pub title: String,
    /// Secondary text.
    pub body: Option<String>,
    /// 0-100; higher sorts first.
    pub severity: u8,
    /// Cat the item concerns, if any.
    pub cat_id: Option<String>,
    /// Source record.
    pub payload: CatchUpPayload,
}

impl CatchUpItem {
    /// Source category.
    #[must_use]
    pub fn kind(&self) -> CatchUpKind {
        match self.payload {
            CatchUpPayload::Task(_) => CatchUpKind::Task,
            CatchUpPayload::Inventory(_) => CatchUpKind::Inventory,
            CatchUpPayload::Notice(_) => CatchUpKind::Notice,
            CatchUpPayload::Incident(_) => CatchUpKind::Incident,
        }
    }
}
