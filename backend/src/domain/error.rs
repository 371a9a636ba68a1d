//! Domain validation errors.
//!
//! Validation failures are expected outcomes surfaced to the caller as
//! user-facing messages; storage and infrastructure failures travel as
//! `anyhow::Error` instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("No templates found for location {location_id} version {version}")]
    EmptyTemplateSet { location_id: String, version: i64 },

    #[error("Template list cannot be empty")]
    NoTemplates,

    #[error("Week count must be at least 1")]
    ZeroWeeks,

    #[error("Week count must be between 1 and {max}, got {requested}")]
    WeeksOutOfBounds { requested: u32, max: u32 },

    #[error("Invalid day of week: {0}. Must be 0-6 (Sunday-Saturday)")]
    InvalidDayOfWeek(u8),

    #[error("Invalid date: {0}. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time: {0}. Expected HH:MM:SS")]
    InvalidTime(String),

    #[error("Shift end time must be after start time")]
    EndNotAfterStart,

    #[error("Templates must all belong to one location and version")]
    MixedTemplateSet,

    #[error("Preview row {0} does not exist")]
    RowOutOfRange(usize),

    #[error("Preview generation {requested} is stale (current is {current})")]
    StaleGeneration { requested: u64, current: u64 },

    #[error("No active preview")]
    NoActivePreview,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl ValidationError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ValidationError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
