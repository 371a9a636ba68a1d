//! Domain model for a weekly shift template.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A weekly recurring shift slot belonging to one (location, version)
/// template set. Templates are immutable inputs to rota expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: String,
    pub location_id: String,
    /// 0 = Sunday, 1 = Monday, ..., 6 = Saturday
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub employee_id: Option<String>,
    /// Groups templates into a named template set per location
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShiftTemplate {
    /// Generate a unique ID for a template
    pub fn generate_id(epoch_nanos: u64) -> String {
        shared::ShiftTemplate::generate_id(epoch_nanos)
    }

    pub fn day_name(&self) -> &'static str {
        shared::day_name(self.day_of_week)
    }
}

impl From<ShiftTemplate> for shared::ShiftTemplate {
    fn from(template: ShiftTemplate) -> Self {
        shared::ShiftTemplate {
            id: template.id,
            location_id: template.location_id,
            day_of_week: template.day_of_week,
            start_time: template.start_time.format("%H:%M:%S").to_string(),
            end_time: template.end_time.format("%H:%M:%S").to_string(),
            employee_id: template.employee_id,
            version: template.version,
            created_at: template.created_at.to_rfc3339(),
            updated_at: template.updated_at.to_rfc3339(),
        }
    }
}
