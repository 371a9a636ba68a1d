use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::DbConnection;
use crate::domain::models::shift::{NewShift, Shift, ShiftStatus};
use crate::storage::template_repository::parse_stored_time;

/// Repository for persisted shifts
#[derive(Clone)]
pub struct ShiftRepository {
    db: DbConnection,
}

impl ShiftRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a batch of shifts inside a single transaction.
    ///
    /// All-or-nothing: any row-level failure rolls back the whole batch.
    /// Returns the inserted shifts with their assigned IDs.
    pub async fn create_shifts(&self, rows: &[NewShift]) -> Result<Vec<Shift>> {
        let epoch_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before the unix epoch")?
            .as_nanos() as u64;

        let mut tx = self.db.pool().begin().await?;
        let mut created = Vec::with_capacity(rows.len());

        for (sequence, row) in rows.iter().enumerate() {
            let shift = Shift {
                id: Shift::generate_id(epoch_nanos, sequence as u32),
                date: row.date,
                start_time: row.start_time,
                end_time: row.end_time,
                location_id: row.location_id.clone(),
                employee_id: row.employee_id.clone(),
                name: row.name.clone(),
                status: row.status,
            };

            sqlx::query(
                r#"
                INSERT INTO shifts
                    (id, date, start_time, end_time, location_id, employee_id, name, status)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&shift.id)
            .bind(shift.date.format("%Y-%m-%d").to_string())
            .bind(shift.start_time.format("%H:%M:%S").to_string())
            .bind(shift.end_time.format("%H:%M:%S").to_string())
            .bind(&shift.location_id)
            .bind(&shift.employee_id)
            .bind(&shift.name)
            .bind(shift.status.as_str())
            .execute(&mut *tx)
            .await?;

            created.push(shift);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Retrieve a specific shift by ID
    pub async fn get_shift(&self, shift_id: &str) -> Result<Option<Shift>> {
        let row = sqlx::query("SELECT * FROM shifts WHERE id = ?")
            .bind(shift_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(|r| row_to_shift(&r)).transpose()
    }

    /// List shifts, optionally narrowed by location and inclusive date
    /// range, ordered by date then start time
    pub async fn list_shifts(
        &self,
        location_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Shift>> {
        let mut sql = String::from("SELECT * FROM shifts WHERE 1 = 1");
        if location_id.is_some() {
            sql.push_str(" AND location_id = ?");
        }
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        sql.push_str(" ORDER BY date, start_time");

        let mut query = sqlx::query(&sql);
        if let Some(location_id) = location_id {
            query = query.bind(location_id.to_string());
        }
        if let Some(start_date) = start_date {
            query = query.bind(start_date.format("%Y-%m-%d").to_string());
        }
        if let Some(end_date) = end_date {
            query = query.bind(end_date.format("%Y-%m-%d").to_string());
        }

        let rows = query.fetch_all(self.db.pool()).await?;
        rows.iter().map(row_to_shift).collect()
    }

    /// Update an existing shift
    pub async fn update_shift(&self, shift: &Shift) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE shifts
            SET date = ?, start_time = ?, end_time = ?, location_id = ?,
                employee_id = ?, name = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(shift.date.format("%Y-%m-%d").to_string())
        .bind(shift.start_time.format("%H:%M:%S").to_string())
        .bind(shift.end_time.format("%H:%M:%S").to_string())
        .bind(&shift.location_id)
        .bind(&shift.employee_id)
        .bind(&shift.name)
        .bind(shift.status.as_str())
        .bind(&shift.id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Delete a shift by ID. Returns true if a row was removed.
    pub async fn delete_shift(&self, shift_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = ?")
            .bind(shift_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_shift(row: &SqliteRow) -> Result<Shift> {
    let date: String = row.get("date");
    let start_time: String = row.get("start_time");
    let end_time: String = row.get("end_time");
    let status: String = row.get("status");

    Ok(Shift {
        id: row.get("id"),
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .with_context(|| format!("Malformed date in storage: {}", date))?,
        start_time: parse_stored_time(&start_time)?,
        end_time: parse_stored_time(&end_time)?,
        location_id: row.get("location_id"),
        employee_id: row.get("employee_id"),
        name: row.get("name"),
        status: ShiftStatus::parse(&status)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn test_row(date: &str, location_id: &str, employee_id: Option<&str>) -> NewShift {
        NewShift {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            location_id: location_id.to_string(),
            employee_id: employee_id.map(String::from),
            name: "Monday 09:00-17:00".to_string(),
            status: ShiftStatus::Scheduled,
        }
    }

    async fn setup_test() -> ShiftRepository {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        ShiftRepository::new(db)
    }

    #[tokio::test]
    async fn test_create_shifts_assigns_unique_ids() {
        let repo = setup_test().await;

        let rows = vec![
            test_row("2024-06-03", "location::1", Some("employee::1")),
            test_row("2024-06-10", "location::1", Some("employee::1")),
            test_row("2024-06-17", "location::1", None),
        ];

        let created = repo.create_shifts(&rows).await.unwrap();
        assert_eq!(created.len(), 3);

        let mut ids: Vec<&str> = created.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3, "IDs within a batch must be unique");

        let listed = repo.list_shifts(None, None, None).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_create_shifts_is_atomic() {
        let repo = setup_test().await;

        let rows = vec![
            test_row("2024-06-03", "location::1", None),
            test_row("2024-06-10", "location::1", None),
            test_row("2024-06-17", "location::1", None),
        ];

        // First insert succeeds
        let created = repo.create_shifts(&rows).await.unwrap();
        assert_eq!(created.len(), 3);

        // Replay the exact created rows through a raw transaction to force a
        // primary key collision on the first row: nothing may be committed.
        let mut tx = repo.db.pool().begin().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO shifts (id, date, start_time, end_time, location_id, employee_id, name, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&created[0].id)
        .bind("2024-06-24")
        .bind("09:00:00")
        .bind("17:00:00")
        .bind("location::1")
        .bind(Option::<String>::None)
        .bind("dup")
        .bind("scheduled")
        .execute(&mut *tx)
        .await;
        assert!(result.is_err(), "duplicate primary key should fail");
        tx.rollback().await.unwrap();

        let listed = repo.list_shifts(None, None, None).await.unwrap();
        assert_eq!(listed.len(), 3, "failed insert must not leave partial rows");
    }

    #[tokio::test]
    async fn test_list_shifts_filters_by_range_and_location() {
        let repo = setup_test().await;

        repo.create_shifts(&[
            test_row("2024-06-03", "location::1", None),
            test_row("2024-06-10", "location::1", None),
            test_row("2024-06-10", "location::2", None),
            test_row("2024-06-24", "location::1", None),
        ])
        .await
        .unwrap();

        let in_range = repo
            .list_shifts(
                Some("location::1"),
                Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
                Some(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()),
            )
            .await
            .unwrap();

        assert_eq!(in_range.len(), 2);
        // Range bounds are inclusive
        assert_eq!(in_range[0].date, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(in_range[1].date, NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
    }

    #[tokio::test]
    async fn test_update_shift() {
        let repo = setup_test().await;

        let created = repo
            .create_shifts(&[test_row("2024-06-03", "location::1", None)])
            .await
            .unwrap();

        let mut shift = created[0].clone();
        shift.employee_id = Some("employee::2".to_string());
        shift.status = ShiftStatus::Completed;
        repo.update_shift(&shift).await.unwrap();

        let fetched = repo.get_shift(&shift.id).await.unwrap().unwrap();
        assert_eq!(fetched.employee_id.as_deref(), Some("employee::2"));
        assert_eq!(fetched.status, ShiftStatus::Completed);
    }

    #[tokio::test]
    async fn test_delete_shift() {
        let repo = setup_test().await;

        let created = repo
            .create_shifts(&[test_row("2024-06-03", "location::1", None)])
            .await
            .unwrap();

        assert!(repo.delete_shift(&created[0].id).await.unwrap());
        assert!(!repo.delete_shift(&created[0].id).await.unwrap());
    }
}
