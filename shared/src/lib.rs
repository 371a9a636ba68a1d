use serde::{Deserialize, Serialize};
use std::fmt;

/// A weekly shift template belonging to one (location, version) template set.
///
/// Templates are immutable inputs to rota expansion; the expansion engine
/// never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    /// ID in format: "template::<epoch_nanos>"
    pub id: String,
    pub location_id: String,
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub day_of_week: u8,
    /// Time of day in HH:MM:SS format
    pub start_time: String,
    /// Time of day in HH:MM:SS format
    pub end_time: String,
    /// Staff member assigned to this template, if any
    pub employee_id: Option<String>,
    /// Groups templates into a named template set per location
    pub version: i64,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// A persisted shift record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// ID in format: "shift::<epoch_nanos>::<sequence>"
    pub id: String,
    /// Calendar date in ISO 8601 format (YYYY-MM-DD)
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location_id: String,
    pub employee_id: Option<String>,
    /// Generated display name, e.g. "Monday 09:00-17:00"
    pub name: String,
    pub status: ShiftStatus,
}

/// Lifecycle status of a persisted shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// Classification of how a candidate shift overlaps an existing one.
///
/// Informational only - a conflict never blocks saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
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

/// One overlapping existing shift, with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictDetail {
    pub kind: ConflictKind,
    pub existing_shift: Shift,
}

/// A transient, dated shift produced by expanding a template set.
///
/// Becomes a persisted [`Shift`] only after explicit preview confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftInstance {
    /// Calendar date in ISO 8601 format (YYYY-MM-DD)
    pub date: String,
    /// 0 = Sunday, ..., 6 = Saturday; derived from `date`
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub location_id: String,
    pub employee_id: Option<String>,
    pub has_conflict: bool,
    pub conflict_details: Vec<ConflictDetail>,
}

/// Request to generate a rota preview from a template set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratePreviewRequest {
    pub location_id: String,
    pub version: i64,
    /// Week-0 anchor date (YYYY-MM-DD); any weekday is allowed
    pub start_date: String,
    /// Number of weeks to expand; the UI bounds this to 1-12
    pub weeks: u32,
}

/// Response carrying a generated preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    /// Generation number identifying this preview; stale generations are
    /// rejected by subsequent preview operations
    pub generation: u64,
    pub instances: Vec<ShiftInstance>,
    pub conflict_count: usize,
    /// Human-readable location name, resolved from reference data
    pub location_name: Option<String>,
}

/// Request to edit a single row of the current preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePreviewRowRequest {
    pub generation: u64,
    pub row: usize,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// `Some(None)` clears the assignment, `Some(Some(id))` reassigns
    pub employee_id: Option<Option<String>>,
}

/// Request to remove a single row of the current preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovePreviewRowRequest {
    pub generation: u64,
    pub row: usize,
}

/// Request to duplicate a single row of the current preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePreviewRowRequest {
    pub generation: u64,
    pub row: usize,
}

/// Request to commit the current preview as persisted shifts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmPreviewRequest {
    pub generation: u64,
}

/// Response after a preview was committed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmPreviewResponse {
    pub created_count: usize,
    pub success_message: String,
}

/// Request for creating a new shift template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    pub location_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub employee_id: Option<String>,
    pub version: i64,
}

/// Response containing templates for one (location, version) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateListResponse {
    pub templates: Vec<ShiftTemplate>,
}

/// Request for listing persisted shifts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftListRequest {
    pub location_id: Option<String>,
    /// Inclusive start of date range (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive end of date range (YYYY-MM-DD)
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftListResponse {
    pub shifts: Vec<Shift>,
}

/// Request for updating an individual persisted shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateShiftRequest {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub employee_id: Option<Option<String>>,
    pub status: Option<ShiftStatus>,
}

/// Response after deleting a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteShiftResponse {
    pub deleted: bool,
    pub success_message: String,
}

/// A staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// ID in format: "employee::<epoch_millis>"
    pub id: String,
    pub name: String,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
}

/// A physical location that shifts are scheduled against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// ID in format: "location::<epoch_millis>"
    pub id: String,
    pub name: String,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationListResponse {
    pub locations: Vec<Location>,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Scheduled => "scheduled",
            ShiftStatus::Completed => "completed",
            ShiftStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(token: &str) -> Result<Self, ShiftStatusError> {
        match token {
            "scheduled" => Ok(ShiftStatus::Scheduled),
            "completed" => Ok(ShiftStatus::Completed),
            "cancelled" => Ok(ShiftStatus::Cancelled),
            _ => Err(ShiftStatusError::UnknownStatus(token.to_string())),
        }
    }
}

impl Default for ShiftStatus {
    fn default() -> Self {
        ShiftStatus::Scheduled
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShiftStatusError {
    UnknownStatus(String),
}

impl fmt::Display for ShiftStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftStatusError::UnknownStatus(token) => {
                write!(f, "Unknown shift status: {}", token)
            }
        }
    }
}

impl std::error::Error for ShiftStatusError {}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Complete => "complete",
            ConflictKind::Contained => "contained",
            ConflictKind::PartialEnd => "partial-end",
            ConflictKind::PartialStart => "partial-start",
        }
    }
}

/// Get the day name for a 0-6 day-of-week value (0 = Sunday)
pub fn day_name(day_of_week: u8) -> &'static str {
    match day_of_week {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "Invalid",
    }
}

/// Validate a day-of-week value
pub fn is_valid_day_of_week(day: u8) -> bool {
    day <= 6
}

/// Parse a weekday token ("sunday".."saturday", case-insensitive) to its
/// 0-6 day number. Unknown tokens fail fast rather than silently mapping.
pub fn parse_day_token(token: &str) -> Result<u8, DayOfWeekError> {
    match token.to_lowercase().as_str() {
        "sunday" => Ok(0),
        "monday" => Ok(1),
        "tuesday" => Ok(2),
        "wednesday" => Ok(3),
        "thursday" => Ok(4),
        "friday" => Ok(5),
        "saturday" => Ok(6),
        _ => Err(DayOfWeekError::UnknownToken(token.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayOfWeekError {
    UnknownToken(String),
}

impl fmt::Display for DayOfWeekError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayOfWeekError::UnknownToken(token) => {
                write!(f, "Unknown weekday token: {}", token)
            }
        }
    }
}

impl std::error::Error for DayOfWeekError {}

impl ShiftTemplate {
    /// Generate a template ID from a nanosecond timestamp
    pub fn generate_id(epoch_nanos: u64) -> String {
        format!("template::{}", epoch_nanos)
    }

    /// Get the day name for this template's configured day of week
    pub fn day_name(&self) -> &'static str {
        day_name(self.day_of_week)
    }
}

impl Shift {
    /// Generate a shift ID from a nanosecond timestamp and a per-batch
    /// sequence number (bulk inserts create many shifts at one instant)
    pub fn generate_id(epoch_nanos: u64, sequence: u32) -> String {
        format!("shift::{}::{}", epoch_nanos, sequence)
    }

    /// Parse a shift ID to extract its timestamp and sequence number
    pub fn parse_id(id: &str) -> Result<(u64, u32), ShiftIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "shift" {
            return Err(ShiftIdError::InvalidFormat);
        }

        let epoch_nanos = parts[1]
            .parse::<u64>()
            .map_err(|_| ShiftIdError::InvalidTimestamp)?;
        let sequence = parts[2]
            .parse::<u32>()
            .map_err(|_| ShiftIdError::InvalidSequence)?;

        Ok((epoch_nanos, sequence))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShiftIdError {
    InvalidFormat,
    InvalidTimestamp,
    InvalidSequence,
}

impl fmt::Display for ShiftIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftIdError::InvalidFormat => write!(f, "Invalid shift ID format"),
            ShiftIdError::InvalidTimestamp => write!(f, "Invalid timestamp in shift ID"),
            ShiftIdError::InvalidSequence => write!(f, "Invalid sequence in shift ID"),
        }
    }
}

impl std::error::Error for ShiftIdError {}

impl Employee {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("employee::{}", epoch_millis)
    }
}

impl Location {
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("location::{}", epoch_millis)
    }
}
