//! Domain model for a location.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    pub fn generate_id(timestamp_millis: u64) -> String {
        shared::Location::generate_id(timestamp_millis)
    }
}

impl From<Location> for shared::Location {
    fn from(location: Location) -> Self {
        shared::Location {
            id: location.id,
            name: location.name,
            created_at: location.created_at.to_rfc3339(),
            updated_at: location.updated_at.to_rfc3339(),
        }
    }
}
