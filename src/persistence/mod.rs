//! Persistence layer modules.

pub mod care_log_repo;
pub mod cat_repo;
pub mod db;
pub mod definition_repo;
pub mod incident_repo;
pub mod inventory_repo;
pub mod observation_repo;
pub mod photo_repo;
pub mod schema;
pub mod sqlite_store;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::{AppError, Result};

/// Re-export the database pool type for convenience.
pub use sqlx::SqlitePool;

/// Render a timestamp with fixed precision so text order is time order.
pub(crate) fn format_ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored RFC 3339 timestamp column.
pub(crate) fn parse_ts(raw: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| AppError::Db(format!("invalid {column}: {e}")))
}

/// Parse an optional stored timestamp column.
pub(crate) fn parse_opt_ts(raw: Option<&str>, column: &str) -> Result<Option<DateTime<Utc>>> {
    raw.map(|value| parse_ts(value, column)).transpose()
}
