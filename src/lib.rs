#![forbid(unsafe_code)]

//! Household cat-care tracking core.
//!
//! [`care`] turns recurring task definitions and completion logs into the
//! instances due for the current business day, [`catchup`] ranks what is
//! outstanding alongside household alerts, and [`triage`] drives the
//! swipe-to-decide flow over that list. [`persistence`] provides the
//! `SQLite`-backed implementation of the [`store`] contracts.

pub mod care;
pub mod catchup;
pub mod config;
pub mod errors;
pub mod models;
pub mod persistence;
pub mod store;
pub mod triage;

pub use config::{GlobalConfig, HouseholdSettings};
pub use errors::{AppError, Result};
