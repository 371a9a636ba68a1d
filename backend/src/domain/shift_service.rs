//! Persisted shift management: range queries and post-confirm edits.

use anyhow::Result;
use chrono::Datelike;
use tracing::info;

use crate::domain::commands::shift::{
    DeleteShiftCommand, ShiftRangeQuery, ShiftRangeResult, UpdateShiftCommand, UpdateShiftResult,
};
use crate::domain::error::ValidationError;
use crate::storage::ShiftRepository;

#[derive(Clone)]
pub struct ShiftService {
    shift_repository: ShiftRepository,
}

impl ShiftService {
    pub fn new(shift_repository: ShiftRepository) -> Self {
        Self { shift_repository }
    }

    pub async fn list_shifts(&self, query: ShiftRangeQuery) -> Result<ShiftRangeResult> {
        let shifts = self
            .shift_repository
            .list_shifts(query.location_id.as_deref(), query.start_date, query.end_date)
            .await?;
        Ok(ShiftRangeResult { shifts })
    }

    pub async fn update_shift(&self, command: UpdateShiftCommand) -> Result<UpdateShiftResult> {
        let mut shift = self
            .shift_repository
            .get_shift(&command.shift_id)
            .await?
            .ok_or_else(|| ValidationError::not_found("shift", &command.shift_id))?;

        if let Some(start_time) = command.start_time {
            shift.start_time = start_time;
        }
        if let Some(end_time) = command.end_time {
            shift.end_time = end_time;
        }
        if shift.end_time <= shift.start_time {
            return Err(ValidationError::EndNotAfterStart.into());
        }
        if let Some(employee_id) = command.employee_id {
            shift.employee_id = employee_id;
        }
        if let Some(status) = command.status {
            shift.status = status;
        }

        // Display name tracks the times
        shift.name = format!(
            "{} {}-{}",
            shared::day_name(shift.date.weekday().num_days_from_sunday() as u8),
            shift.start_time.format("%H:%M"),
            shift.end_time.format("%H:%M")
        );

        self.shift_repository.update_shift(&shift).await?;
        info!("Updated shift {}", shift.id);

        Ok(UpdateShiftResult { shift })
    }

    pub async fn delete_shift(&self, command: DeleteShiftCommand) -> Result<()> {
        let deleted = self.shift_repository.delete_shift(&command.shift_id).await?;
        if !deleted {
            return Err(ValidationError::not_found("shift", &command.shift_id).into());
        }
        info!("Deleted shift {}", command.shift_id);
        Ok(())
    }
}
