use chrono::{NaiveDate, NaiveTime};

use crate::domain::models::shift::{Shift, ShiftStatus};

/// Query persisted shifts, optionally narrowed by location and date range
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShiftRangeQuery {
    pub location_id: Option<String>,
    /// Inclusive start of range
    pub start_date: Option<NaiveDate>,
    /// Inclusive end of range
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftRangeResult {
    pub shifts: Vec<Shift>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateShiftCommand {
    pub shift_id: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub employee_id: Option<Option<String>>,
    pub status: Option<ShiftStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateShiftResult {
    pub shift: Shift,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteShiftCommand {
    pub shift_id: String,
}
