use std::io::Write;

use catcare::config::{FeatureToggles, GlobalConfig, HouseholdSettings};
use catcare::AppError;
use chrono::{NaiveDate, Timelike};

fn sample_toml() -> &'static str {
    r#"
db_path = "data/catcare.db"
household_id = "hh-1"
actor_id = "member-7"

[household]
day_start_hour = 6
utc_offset_minutes = 540
notice_min_severity = 40
done_memo = "fed"

[household.features]
photo_notices = false
"#
}

#[test]
fn parses_full_config() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("valid config");
    assert_eq!(config.household_id, "hh-1");
    assert_eq!(config.actor_id.as_deref(), Some("member-7"));
    assert_eq!(config.db_path.to_str(), Some("data/catcare.db"));
    assert_eq!(config.household.day_start_hour, 6);
    assert_eq!(config.household.utc_offset_minutes, 540);
    assert_eq!(config.household.notice_min_severity, 40);
    assert_eq!(config.household.done_memo, "fed");
    assert_eq!(
        config.household.features,
        FeatureToggles {
            inventory_alerts: true,
            observation_notices: true,
            photo_notices: false,
        }
    );
}

#[test]
fn household_table_is_optional() {
    let config = GlobalConfig::from_toml_str("db_path = 'x.db'\nhousehold_id = 'hh'\n")
        .expect("valid config");
    assert_eq!(config.household, HouseholdSettings::default());
    assert_eq!(config.actor_id, None);
}

#[test]
fn defaults_are_midnight_utc() {
    let settings = HouseholdSettings::default();
    assert_eq!(settings.day_start_hour(), 0);
    assert_eq!(settings.utc_offset_minutes, 0);
    assert_eq!(settings.notice_min_severity, 30);
    assert_eq!(settings.done_memo, "done");
}

#[test]
fn rejects_day_start_hour_out_of_range() {
    let raw = "db_path = 'x.db'\nhousehold_id = 'hh'\n[household]\nday_start_hour = 24\n";
    let err = GlobalConfig::from_toml_str(raw).expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("day_start_hour")));
}

#[test]
fn rejects_offset_beyond_fourteen_hours() {
    let raw = "db_path = 'x.db'\nhousehold_id = 'hh'\n[household]\nutc_offset_minutes = -900\n";
    let err = GlobalConfig::from_toml_str(raw).expect_err("must fail");
    assert!(matches!(err, AppError::Config(ref msg) if msg.contains("utc_offset_minutes")));
}

#[test]
fn rejects_notice_floor_above_hundred() {
    let raw = "db_path = 'x.db'\nhousehold_id = 'hh'\n[household]\nnotice_min_severity = 101\n";
    assert!(matches!(
        GlobalConfig::from_toml_str(raw),
        Err(AppError::Config(_))
    ));
}

#[test]
fn rejects_blank_household_id() {
    let err = GlobalConfig::from_toml_str("db_path = 'x.db'\nhousehold_id = '  '\n")
        .expect_err("must fail");
    assert_eq!(err.to_string(), "config: household_id must not be empty");
}

#[test]
fn rejects_empty_db_path() {
    let err = GlobalConfig::from_toml_str("db_path = ''\nhousehold_id = 'hh'\n")
        .expect_err("must fail");
    assert_eq!(err.to_string(), "config: db_path must not be empty");
}

#[test]
fn invalid_toml_is_config_error() {
    let err = GlobalConfig::from_toml_str("db_path = ").expect_err("must fail");
    assert!(err.to_string().starts_with("config: invalid config:"));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(sample_toml().as_bytes()).expect("write");
    let config = GlobalConfig::load_from_path(file.path()).expect("load");
    assert_eq!(config.household_id, "hh-1");
}

#[test]
fn missing_file_is_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = GlobalConfig::load_from_path(dir.path().join("absent.toml")).expect_err("must fail");
    assert!(err.to_string().starts_with("config: failed to read config"));
}

#[test]
fn local_time_round_trips_through_offset() {
    let settings = HouseholdSettings {
        utc_offset_minutes: -300,
        ..HouseholdSettings::default()
    };
    let utc = NaiveDate::from_ymd_opt(2024, 5, 15)
        .unwrap()
        .and_hms_opt(3, 0, 0)
        .unwrap()
        .and_utc();

    let local = settings.local_time(utc);
    assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
    assert_eq!(local.hour(), 22);
    assert_eq!(settings.to_utc(local), utc);
}

#[test]
fn day_start_accessor_clamps() {
    assert_eq!(HouseholdSettings::with_day_start(40).day_start_hour(), 23);
}
