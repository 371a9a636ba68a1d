use chrono::NaiveDate;

use crate::domain::models::rota::ShiftInstance;
use crate::domain::models::shift::Shift;

/// Generate a fresh rota preview from one (location, version) template set
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePreviewCommand {
    pub location_id: String,
    pub version: i64,
    /// Week-0 anchor; any weekday is allowed
    pub start_date: NaiveDate,
    pub weeks: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePreviewResult {
    pub generation: u64,
    pub instances: Vec<ShiftInstance>,
    pub conflict_count: usize,
}

/// Edit a single row of the active preview
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePreviewRowCommand {
    pub generation: u64,
    pub row: usize,
    pub start_time: Option<chrono::NaiveTime>,
    pub end_time: Option<chrono::NaiveTime>,
    /// `Some(None)` clears the assignment, `Some(Some(id))` reassigns
    pub employee_id: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemovePreviewRowCommand {
    pub generation: u64,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicatePreviewRowCommand {
    pub generation: u64,
    pub row: usize,
}

/// Result of any per-row preview mutation: the re-annotated full preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRowsResult {
    pub generation: u64,
    pub instances: Vec<ShiftInstance>,
    pub conflict_count: usize,
}

/// Commit the active preview as persisted shifts
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPreviewCommand {
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPreviewResult {
    pub created: Vec<Shift>,
}

/// Explicit "back" navigation: discard the active preview
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardPreviewCommand {
    pub generation: u64,
}
