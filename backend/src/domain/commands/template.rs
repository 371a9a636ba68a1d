use chrono::NaiveTime;

use crate::domain::models::template::ShiftTemplate;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTemplateCommand {
    pub location_id: String,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub employee_id: Option<String>,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTemplateResult {
    pub template: ShiftTemplate,
}

/// Query for one (location, version) template set
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSetQuery {
    pub location_id: String,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSetResult {
    pub templates: Vec<ShiftTemplate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTemplateCommand {
    pub template_id: String,
}
