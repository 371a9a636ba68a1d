use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row};

use crate::db::DbConnection;
use crate::domain::models::location::Location;
use crate::storage::template_repository::parse_stored_timestamp;

/// Repository for locations
#[derive(Clone)]
pub struct LocationRepository {
    db: DbConnection,
}

impl LocationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_location(&self, location: &Location) -> Result<()> {
        sqlx::query(
            "INSERT INTO locations (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&location.id)
        .bind(&location.name)
        .bind(location.created_at.to_rfc3339())
        .bind(location.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    pub async fn get_location(&self, location_id: &str) -> Result<Option<Location>> {
        let row = sqlx::query("SELECT * FROM locations WHERE id = ?")
            .bind(location_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(|r| row_to_location(&r)).transpose()
    }

    /// List all locations ordered by name
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        let rows = sqlx::query("SELECT * FROM locations ORDER BY name")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_location).collect()
    }

    pub async fn delete_location(&self, location_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM locations WHERE id = ?")
            .bind(location_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_location(row: &SqliteRow) -> Result<Location> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Location {
        id: row.get("id"),
        name: row.get("name"),
        created_at: parse_stored_timestamp(&created_at)?,
        updated_at: parse_stored_timestamp(&updated_at)?,
    })
}
