//! Global configuration parsing and validation.
//!
//! The `[household]` table doubles as the settings provider handed to the
//! aggregation core, so the same struct is used by the CLI and by tests that
//! build settings in code.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Per-source switches for the catch-up list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FeatureToggles {
    /// Surface low-stock inventory items.
    #[serde(default = "default_true")]
    pub inventory_alerts: bool,
    /// Surface unacknowledged observations above the severity floor.
    #[serde(default = "default_true")]
    pub observation_notices: bool,
    /// Surface batches of photos nobody has looked at yet.
    #[serde(default = "default_true")]
    pub photo_notices: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            inventory_alerts: true,
            observation_notices: true,
            photo_notices: true,
        }
    }
}

/// Household-level settings consumed by aggregation and triage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct HouseholdSettings {
    /// Hour (0-23) at which a new business day begins.
    #[serde(default)]
    pub day_start_hour: u8,
    /// Fixed offset of household wall-clock time from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Observations below this severity never reach the catch-up list.
    #[serde(default = "default_notice_min_severity")]
    pub notice_min_severity: u8,
    /// Memo recorded when an item is swiped done without a typed note.
    #[serde(default = "default_done_memo")]
    pub done_memo: String,
    /// Catch-up source switches.
    #[serde(default)]
    pub features: FeatureToggles,
}

fn default_true() -> bool {
    true
}

fn default_notice_min_severity() -> u8 {
    30
}

fn default_done_memo() -> String {
    "done".into()
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            day_start_hour: 0,
            utc_offset_minutes: 0,
            notice_min_severity: default_notice_min_severity(),
            done_memo: default_done_memo(),
            features: FeatureToggles::default(),
        }
    }
}

impl HouseholdSettings {
    /// Settings with the given day-start hour and defaults elsewhere.
    #[must_use]
    pub fn with_day_start(day_start_hour: u8) -> Self {
        Self {
            day_start_hour,
            ..Self::default()
        }
    }

    /// Day-start hour clamped into `0..=23`.
    #[must_use]
    pub fn day_start_hour(&self) -> u8 {
        self.day_start_hour.min(23)
    }

    fn offset(&self) -> FixedOffset {
        let seconds = self
            .utc_offset_minutes
            .clamp(-MAX_UTC_OFFSET_MINUTES, MAX_UTC_OFFSET_MINUTES)
            * 60;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }

    /// Household wall-clock time for a UTC instant.
    #[must_use]
    pub fn local_time(&self, at: DateTime<Utc>) -> NaiveDateTime {
        at.with_timezone(&self.offset()).naive_local()
    }

    /// UTC instant for a household wall-clock time.
    #[must_use]
    pub fn to_utc(&self, local: NaiveDateTime) -> DateTime<Utc> {
        (local - self.offset()).and_utc()
    }

    fn validate(&self) -> Result<()> {
        if self.day_start_hour > 23 {
            return Err(AppError::Config(
                "household.day_start_hour must be between 0 and 23".into(),
            ));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(AppError::Config(
                "household.utc_offset_minutes must be within +/- 14 hours".into(),
            ));
        }
        if self.notice_min_severity > 100 {
            return Err(AppError::Config(
                "household.notice_min_severity must not exceed 100".into(),
            ));
        }
        Ok(())
    }
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Path of the `SQLite` database file.
    pub db_path: PathBuf,
    /// Household whose records this instance reads and writes.
    pub household_id: String,
    /// Member recorded as the actor on new care logs.
    #[serde(default)]
    pub actor_id: Option<String>,
    /// Household settings.
    #[serde(default)]
    pub household: HouseholdSettings,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.household_id.trim().is_empty() {
            return Err(AppError::Config("household_id must not be empty".into()));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("db_path must not be empty".into()));
        }
        self.household.validate()
    }
}
