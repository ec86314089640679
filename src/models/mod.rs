//! Domain model module declarations.

pub mod care_log;
pub mod catch_up;
pub mod definition;
pub mod household;
pub mod instance;
