//! Template set management.

use anyhow::Result;
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::domain::commands::template::{
    CreateTemplateCommand, CreateTemplateResult, DeleteTemplateCommand, TemplateSetQuery,
    TemplateSetResult,
};
use crate::domain::error::ValidationError;
use crate::domain::models::template::ShiftTemplate;
use crate::storage::{LocationRepository, TemplateRepository};

#[derive(Clone)]
pub struct TemplateService {
    template_repository: TemplateRepository,
    location_repository: LocationRepository,
}

impl TemplateService {
    pub fn new(
        template_repository: TemplateRepository,
        location_repository: LocationRepository,
    ) -> Self {
        Self {
            template_repository,
            location_repository,
        }
    }

    pub async fn create_template(
        &self,
        command: CreateTemplateCommand,
    ) -> Result<CreateTemplateResult> {
        if !shared::is_valid_day_of_week(command.day_of_week) {
            return Err(ValidationError::InvalidDayOfWeek(command.day_of_week).into());
        }
        if command.end_time <= command.start_time {
            return Err(ValidationError::EndNotAfterStart.into());
        }
        if self
            .location_repository
            .get_location(&command.location_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::not_found("location", &command.location_id).into());
        }

        let now = Utc::now();
        // Nanosecond resolution; templates in a set are often created
        // back to back
        let epoch_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        let template = ShiftTemplate {
            id: ShiftTemplate::generate_id(epoch_nanos),
            location_id: command.location_id,
            day_of_week: command.day_of_week,
            start_time: command.start_time,
            end_time: command.end_time,
            employee_id: command.employee_id,
            version: command.version,
            created_at: now,
            updated_at: now,
        };

        self.template_repository.store_template(&template).await?;
        info!(
            "Created template {} ({} {}-{}) in set ({}, v{})",
            template.id,
            template.day_name(),
            template.start_time.format("%H:%M"),
            template.end_time.format("%H:%M"),
            template.location_id,
            template.version
        );

        Ok(CreateTemplateResult { template })
    }

    pub async fn get_template_set(&self, query: TemplateSetQuery) -> Result<TemplateSetResult> {
        let templates = self
            .template_repository
            .list_templates_for_set(&query.location_id, query.version)
            .await?;
        Ok(TemplateSetResult { templates })
    }

    pub async fn list_versions(&self, location_id: &str) -> Result<Vec<i64>> {
        self.template_repository.list_versions(location_id).await
    }

    pub async fn delete_template(&self, command: DeleteTemplateCommand) -> Result<()> {
        let deleted = self
            .template_repository
            .delete_template(&command.template_id)
            .await?;
        if !deleted {
            return Err(ValidationError::not_found("template", &command.template_id).into());
        }
        info!("Deleted template {}", command.template_id);
        Ok(())
    }
}
