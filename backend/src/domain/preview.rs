//! Preview sessions for rota generation.
//!
//! Drives the form -> date-range-selection -> preview flow: a generated
//! preview can be edited row by row (edit/delete/duplicate), then committed
//! with a single bulk confirm, or discarded by explicit back navigation.
//!
//! Each preview carries a generation number. Overlapping generation
//! requests are coordinated through it: the response of an older request
//! can neither install itself over a newer preview nor mutate or confirm
//! one, so a stale response is rejected instead of overwriting state.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::domain::commands::rota::{
    ConfirmPreviewCommand, ConfirmPreviewResult, DiscardPreviewCommand, DuplicatePreviewRowCommand,
    GeneratePreviewCommand, GeneratePreviewResult, PreviewRowsResult, RemovePreviewRowCommand,
    UpdatePreviewRowCommand,
};
use crate::domain::error::ValidationError;
use crate::domain::models::rota::ShiftInstance;
use crate::domain::models::shift::Shift;
use crate::domain::rota_service::RotaService;
use crate::storage::ShiftRepository;

#[derive(Clone)]
pub struct PreviewService {
    rota_service: RotaService,
    shift_repository: ShiftRepository,
    state: Arc<Mutex<PreviewState>>,
}

#[derive(Default)]
struct PreviewState {
    /// Monotonically increasing; bumped at the start of every generation
    /// request, before any storage fetch
    generation: u64,
    session: Option<PreviewSession>,
}

struct PreviewSession {
    generation: u64,
    instances: Vec<ShiftInstance>,
    /// Snapshot of existing shifts the preview was annotated against;
    /// row edits are re-checked against the same snapshot
    existing: Vec<Shift>,
}

impl PreviewService {
    pub fn new(rota_service: RotaService, shift_repository: ShiftRepository) -> Self {
        Self {
            rota_service,
            shift_repository,
            state: Arc::new(Mutex::new(PreviewState::default())),
        }
    }

    /// Expand the requested template set into a fresh preview session.
    pub async fn generate_preview(
        &self,
        command: GeneratePreviewCommand,
    ) -> Result<GeneratePreviewResult> {
        info!(
            "Generating preview for location {} version {} from {} over {} weeks",
            command.location_id, command.version, command.start_date, command.weeks
        );

        // Claim a generation before suspending on storage; any later request
        // claims a higher one and wins.
        let generation = {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.generation
        };

        let outcome = self
            .rota_service
            .generate_candidates(
                &command.location_id,
                command.version,
                command.start_date,
                command.weeks,
            )
            .await?;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            warn!(
                "Discarding stale preview generation {} (current is {})",
                generation, state.generation
            );
            return Err(ValidationError::StaleGeneration {
                requested: generation,
                current: state.generation,
            }
            .into());
        }

        let conflict_count = outcome.instances.iter().filter(|i| i.has_conflict).count();
        state.session = Some(PreviewSession {
            generation,
            instances: outcome.instances.clone(),
            existing: outcome.existing,
        });

        Ok(GeneratePreviewResult {
            generation,
            instances: outcome.instances,
            conflict_count,
        })
    }

    /// Edit the time or assignment of one preview row, then re-annotate
    /// the preview against the session's existing-shift snapshot.
    pub fn update_row(&self, command: UpdatePreviewRowCommand) -> Result<PreviewRowsResult> {
        self.mutate_session(command.generation, |instances| {
            let row = instances
                .get_mut(command.row)
                .ok_or(ValidationError::RowOutOfRange(command.row))?;

            let start_time = command.start_time.unwrap_or(row.start_time);
            let end_time = command.end_time.unwrap_or(row.end_time);
            if end_time <= start_time {
                return Err(ValidationError::EndNotAfterStart);
            }

            row.start_time = start_time;
            row.end_time = end_time;
            if let Some(employee_id) = &command.employee_id {
                row.employee_id = employee_id.clone();
            }
            Ok(())
        })
    }

    /// Remove one preview row.
    pub fn remove_row(&self, command: RemovePreviewRowCommand) -> Result<PreviewRowsResult> {
        self.mutate_session(command.generation, |instances| {
            if command.row >= instances.len() {
                return Err(ValidationError::RowOutOfRange(command.row));
            }
            instances.remove(command.row);
            Ok(())
        })
    }

    /// Duplicate one preview row; the copy is inserted directly after it.
    pub fn duplicate_row(&self, command: DuplicatePreviewRowCommand) -> Result<PreviewRowsResult> {
        self.mutate_session(command.generation, |instances| {
            let row = instances
                .get(command.row)
                .ok_or(ValidationError::RowOutOfRange(command.row))?
                .clone();
            instances.insert(command.row + 1, row);
            Ok(())
        })
    }

    /// Commit the active preview as persisted shifts in one transactional
    /// bulk insert. The session is cleared only after the insert succeeds,
    /// so a storage failure leaves the preview intact for retry.
    pub async fn confirm(&self, command: ConfirmPreviewCommand) -> Result<ConfirmPreviewResult> {
        let instances = {
            let state = self.state.lock().unwrap();
            let session = Self::active_session(&state, command.generation)?;
            session.instances.clone()
        };

        let rows = RotaService::format_for_persistence(&instances);
        let created = self.shift_repository.create_shifts(&rows).await?;

        info!("Preview confirmed: {} shifts created", created.len());

        let mut state = self.state.lock().unwrap();
        if state
            .session
            .as_ref()
            .is_some_and(|s| s.generation == command.generation)
        {
            state.session = None;
        }

        Ok(ConfirmPreviewResult { created })
    }

    /// Explicit back navigation: drop the active preview.
    pub fn discard(&self, command: DiscardPreviewCommand) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::active_session(&state, command.generation)?;
        state.session = None;
        info!("Preview generation {} discarded", command.generation);
        Ok(())
    }

    fn active_session(
        state: &PreviewState,
        generation: u64,
    ) -> Result<&PreviewSession, ValidationError> {
        let session = state
            .session
            .as_ref()
            .ok_or(ValidationError::NoActivePreview)?;
        if session.generation != generation {
            return Err(ValidationError::StaleGeneration {
                requested: generation,
                current: session.generation,
            });
        }
        Ok(session)
    }

    fn mutate_session<F>(&self, generation: u64, mutate: F) -> Result<PreviewRowsResult>
    where
        F: FnOnce(&mut Vec<ShiftInstance>) -> Result<(), ValidationError>,
    {
        let mut state = self.state.lock().unwrap();
        Self::active_session(&state, generation)?;

        let session = state.session.as_mut().expect("session checked above");
        mutate(&mut session.instances)?;

        // Row edits can change assignments and times, so re-annotate the
        // whole preview against the snapshot.
        let annotated =
            RotaService::detect_conflicts(std::mem::take(&mut session.instances), &session.existing);
        session.instances = annotated;

        let conflict_count = session.instances.iter().filter(|i| i.has_conflict).count();
        Ok(PreviewRowsResult {
            generation,
            instances: session.instances.clone(),
            conflict_count,
        })
    }
}
