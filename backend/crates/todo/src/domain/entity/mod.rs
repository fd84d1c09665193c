//! Entity Module

use chrono::{DateTime, Utc};

pub mod list;
pub mod todo;

/// Current time at the precision Postgres stores
pub(crate) fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_micros(Utc::now().timestamp_micros()).unwrap_or_else(Utc::now)
}
