//! Domain models for rota previews: transient shift instances and their
//! conflict annotations.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::models::shift::{minute_of_day, Shift};

/// Classification of how a candidate overlaps an existing shift.
/// Informational only; a conflict never blocks saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// Candidate fully contains the existing shift
    Complete,
    /// Existing shift fully contains the candidate
    Contained,
    /// Candidate starts before the existing shift and overlaps its start
    PartialEnd,
    /// Candidate overlaps the end of the existing shift
    PartialStart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictDetail {
    pub kind: ConflictKind,
    pub existing_shift: Shift,
}

/// A dated shift produced by expanding a template set. Lives only inside a
/// preview session until the user confirms the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInstance {
    pub date: NaiveDate,
    /// 0 = Sunday, ..., 6 = Saturday; always derived from `date`
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location_id: String,
    pub employee_id: Option<String>,
    pub has_conflict: bool,
    pub conflict_details: Vec<ConflictDetail>,
}

impl ShiftInstance {
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start_time)
    }

    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end_time)
    }

    /// Drop any conflict annotations, returning the instance to its
    /// just-expanded state
    pub fn clear_conflicts(&mut self) {
        self.has_conflict = false;
        self.conflict_details.clear();
    }
}

impl From<ConflictKind> for shared::ConflictKind {
    fn from(kind: ConflictKind) -> Self {
        match kind {
            ConflictKind::Complete => shared::ConflictKind::Complete,
            ConflictKind::Contained => shared::ConflictKind::Contained,
            ConflictKind::PartialEnd => shared::ConflictKind::PartialEnd,
            ConflictKind::PartialStart => shared::ConflictKind::PartialStart,
        }
    }
}

impl From<ConflictDetail> for shared::ConflictDetail {
    fn from(detail: ConflictDetail) -> Self {
        shared::ConflictDetail {
            kind: detail.kind.into(),
            existing_shift: detail.existing_shift.into(),
        }
    }
}

impl From<ShiftInstance> for shared::ShiftInstance {
    fn from(instance: ShiftInstance) -> Self {
        shared::ShiftInstance {
            date: instance.date.format("%Y-%m-%d").to_string(),
            day_of_week: instance.day_of_week,
            start_time: instance.start_time.format("%H:%M:%S").to_string(),
            end_time: instance.end_time.format("%H:%M:%S").to_string(),
            location_id: instance.location_id,
            employee_id: instance.employee_id,
            has_conflict: instance.has_conflict,
            conflict_details: instance
                .conflict_details
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}
