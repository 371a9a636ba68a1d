use anyhow::{Context, Result};
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use crate::db::DbConnection;
use crate::domain::models::template::ShiftTemplate;

/// Repository for shift templates
#[derive(Clone)]
pub struct TemplateRepository {
    db: DbConnection,
}

impl TemplateRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new template
    pub async fn store_template(&self, template: &ShiftTemplate) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shift_templates
                (id, location_id, day_of_week, start_time, end_time, employee_id, version, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&template.id)
        .bind(&template.location_id)
        .bind(template.day_of_week as i64)
        .bind(template.start_time.format("%H:%M:%S").to_string())
        .bind(template.end_time.format("%H:%M:%S").to_string())
        .bind(&template.employee_id)
        .bind(template.version)
        .bind(template.created_at.to_rfc3339())
        .bind(template.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Retrieve a specific template by ID
    pub async fn get_template(&self, template_id: &str) -> Result<Option<ShiftTemplate>> {
        let row = sqlx::query("SELECT * FROM shift_templates WHERE id = ?")
            .bind(template_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(|r| row_to_template(&r)).transpose()
    }

    /// List all templates in one (location, version) template set, ordered
    /// by day of week then start time
    pub async fn list_templates_for_set(
        &self,
        location_id: &str,
        version: i64,
    ) -> Result<Vec<ShiftTemplate>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM shift_templates
            WHERE location_id = ? AND version = ?
            ORDER BY day_of_week, start_time
            "#,
        )
        .bind(location_id)
        .bind(version)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(row_to_template).collect()
    }

    /// List the distinct template set versions that exist for a location
    pub async fn list_versions(&self, location_id: &str) -> Result<Vec<i64>> {
        let rows = sqlx::query(
            "SELECT DISTINCT version FROM shift_templates WHERE location_id = ? ORDER BY version",
        )
        .bind(location_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(|r| r.get("version")).collect())
    }

    /// Delete a template by ID. Returns true if a row was removed.
    pub async fn delete_template(&self, template_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shift_templates WHERE id = ?")
            .bind(template_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_template(row: &SqliteRow) -> Result<ShiftTemplate> {
    let start_time: String = row.get("start_time");
    let end_time: String = row.get("end_time");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");
    let day_of_week: i64 = row.get("day_of_week");

    Ok(ShiftTemplate {
        id: row.get("id"),
        location_id: row.get("location_id"),
        day_of_week: day_of_week as u8,
        start_time: parse_stored_time(&start_time)?,
        end_time: parse_stored_time(&end_time)?,
        employee_id: row.get("employee_id"),
        version: row.get("version"),
        created_at: parse_stored_timestamp(&created_at)?,
        updated_at: parse_stored_timestamp(&updated_at)?,
    })
}

pub(crate) fn parse_stored_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .with_context(|| format!("Malformed time in storage: {}", value))
}

pub(crate) fn parse_stored_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Malformed timestamp in storage: {}", value))
}
