//! `SQLite` schema bootstrap logic.
//!
//! All table definitions use `CREATE TABLE IF NOT EXISTS`, so this is safe to
//! re-run on every startup. Every table is scoped by `household_id`.

use sqlx::SqlitePool;

use crate::Result;

/// Apply all table definitions to the connected `SQLite` database.
///
/// # Errors
///
/// Returns `AppError::Db` if any DDL statement fails.
pub async fn bootstrap_schema(pool: &SqlitePool) -> Result<()> {
    let ddl = r"
CREATE TABLE IF NOT EXISTS care_task_definition (
    id              TEXT NOT NULL,
    household_id    TEXT NOT NULL,
    title           TEXT NOT NULL,
    enabled         INTEGER NOT NULL DEFAULT 1,
    frequency       TEXT NOT NULL CHECK(frequency IN ('daily','weekly','monthly')),
    frequency_count INTEGER,
    meal_slots      TEXT NOT NULL DEFAULT '[]',
    icon            TEXT,
    per_cat         INTEGER NOT NULL DEFAULT 0,
    position        INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (household_id, id)
);

CREATE TABLE IF NOT EXISTS care_log (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    task_type       TEXT NOT NULL,
    cat_id          TEXT,
    done_at         TEXT NOT NULL,
    notes           TEXT,
    images          TEXT NOT NULL DEFAULT '[]',
    actor_id        TEXT,
    deleted_at      TEXT
);

CREATE TABLE IF NOT EXISTS cat (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    name            TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS incident (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    cat_id          TEXT,
    title           TEXT NOT NULL,
    body            TEXT,
    occurred_at     TEXT NOT NULL,
    resolved_at     TEXT
);

CREATE TABLE IF NOT EXISTS observation (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    cat_id          TEXT,
    title           TEXT NOT NULL,
    body            TEXT,
    severity        INTEGER NOT NULL CHECK(severity BETWEEN 0 AND 100),
    created_at      TEXT NOT NULL,
    acknowledged_at TEXT
);

CREATE TABLE IF NOT EXISTS inventory_item (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    name            TEXT NOT NULL,
    remaining       INTEGER NOT NULL CHECK(remaining >= 0),
    alert_threshold INTEGER NOT NULL CHECK(alert_threshold >= 0),
    acknowledged_at TEXT
);

CREATE TABLE IF NOT EXISTS photo (
    id              TEXT PRIMARY KEY NOT NULL,
    household_id    TEXT NOT NULL,
    cat_id          TEXT,
    uploaded_at     TEXT NOT NULL,
    seen_at         TEXT
);

CREATE INDEX IF NOT EXISTS idx_care_log_household_done ON care_log(household_id, done_at);
CREATE INDEX IF NOT EXISTS idx_cat_household ON cat(household_id);
CREATE INDEX IF NOT EXISTS idx_incident_household ON incident(household_id);
CREATE INDEX IF NOT EXISTS idx_observation_household ON observation(household_id);
CREATE INDEX IF NOT EXISTS idx_inventory_household ON inventory_item(household_id);
CREATE INDEX IF NOT EXISTS idx_photo_household ON photo(household_id);
";

    sqlx::raw_sql(ddl).execute(pool).await?;
    Ok(())
}
