//! Domain models for the shift planner.
//!
//! Domain types carry proper chrono date/time values; the string-typed
//! DTOs in the `shared` crate exist only at the REST boundary.

pub mod employee;
pub mod location;
pub mod rota;
pub mod shift;
pub mod template;

use crate::domain::error::ValidationError;
use chrono::{NaiveDate, NaiveTime};

/// Parse an ISO 8601 calendar date (YYYY-MM-DD)
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Parse a time of day in HH:MM:SS format
pub fn parse_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .map_err(|_| ValidationError::InvalidTime(value.to_string()))
}
