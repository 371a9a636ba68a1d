//! Location management.

use anyhow::Result;
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::domain::commands::team::{CreateLocationCommand, CreateLocationResult};
use crate::domain::error::ValidationError;
use crate::domain::models::location::Location;
use crate::domain::reference_cache::ReferenceCache;
use crate::storage::LocationRepository;

#[derive(Clone)]
pub struct LocationService {
    location_repository: LocationRepository,
    reference_cache: ReferenceCache,
}

impl LocationService {
    pub fn new(location_repository: LocationRepository, reference_cache: ReferenceCache) -> Self {
        Self {
            location_repository,
            reference_cache,
        }
    }

    pub async fn create_location(
        &self,
        command: CreateLocationCommand,
    ) -> Result<CreateLocationResult> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let now = Utc::now();
        let timestamp_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let location = Location {
            id: Location::generate_id(timestamp_millis),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.location_repository.store_location(&location).await?;
        self.reference_cache.invalidate();
        info!("Created location {} ({})", location.id, location.name);

        Ok(CreateLocationResult { location })
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.location_repository.list_locations().await
    }

    pub async fn delete_location(&self, location_id: &str) -> Result<()> {
        let deleted = self.location_repository.delete_location(location_id).await?;
        if !deleted {
            return Err(ValidationError::not_found("location", location_id).into());
        }
        self.reference_cache.invalidate();
        info!("Deleted location {}", location_id);
        Ok(())
    }
}
