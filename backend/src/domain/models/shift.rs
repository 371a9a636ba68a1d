//! Domain model for a persisted shift.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A shift that has been committed to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location_id: String,
    pub employee_id: Option<String>,
    /// Generated display name, e.g. "Monday 09:00-17:00"
    pub name: String,
    pub status: ShiftStatus,
}

/// The insertable row shape produced by `format_for_persistence`.
///
/// Identical to [`Shift`] minus the ID, which storage assigns at insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShift {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location_id: String,
    pub employee_id: Option<String>,
    pub name: String,
    pub status: ShiftStatus,
}

impl Shift {
    /// Generate a unique ID for a shift within a bulk insert batch
    pub fn generate_id(epoch_nanos: u64, sequence: u32) -> String {
        shared::Shift::generate_id(epoch_nanos, sequence)
    }

    /// Start of the shift as minute of day (0..=1439), for overlap checks
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start_time)
    }

    /// End of the shift as minute of day
    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end_time)
    }
}

/// Convert a time of day to its minute-of-day ordinal
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

impl From<Shift> for shared::Shift {
    fn from(shift: Shift) -> Self {
        shared::Shift {
            id: shift.id,
            date: shift.date.format("%Y-%m-%d").to_string(),
            start_time: shift.start_time.format("%H:%M:%S").to_string(),
            end_time: shift.end_time.format("%H:%M:%S").to_string(),
            location_id: shift.location_id,
            employee_id: shift.employee_id,
            name: shift.name,
            status: shift.status.into(),
        }
    }
}

impl From<ShiftStatus> for shared::ShiftStatus {
    fn from(status: ShiftStatus) -> Self {
        match status {
            ShiftStatus::Scheduled => shared::ShiftStatus::Scheduled,
            ShiftStatus::Completed => shared::ShiftStatus::Completed,
            ShiftStatus::Cancelled => shared::ShiftStatus::Cancelled,
        }
    }
}

impl From<shared::ShiftStatus> for ShiftStatus {
    fn from(status: shared::ShiftStatus) -> Self {
        match status {
            shared::ShiftStatus::Scheduled => ShiftStatus::Scheduled,
            shared::ShiftStatus::Completed => ShiftStatus::Completed,
            shared::ShiftStatus::Cancelled => ShiftStatus::Cancelled,
        }
    }
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        shared::ShiftStatus::from(*self).as_str()
    }

    pub fn parse(token: &str) -> Result<Self, shared::ShiftStatusError> {
        shared::ShiftStatus::parse(token).map(Into::into)
    }
}
