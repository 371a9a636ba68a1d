use anyhow::Result;
use sqlx::{sqlite::SqliteRow, Row};

use crate::db::DbConnection;
use crate::domain::models::employee::Employee;
use crate::storage::template_repository::parse_stored_timestamp;

/// Repository for staff members
#[derive(Clone)]
pub struct EmployeeRepository {
    db: DbConnection,
}

impl EmployeeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query(
            "INSERT INTO employees (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&employee.id)
        .bind(&employee.name)
        .bind(employee.created_at.to_rfc3339())
        .bind(employee.updated_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    pub async fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = ?")
            .bind(employee_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.map(|r| row_to_employee(&r)).transpose()
    }

    /// List all employees ordered by name
    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query("SELECT * FROM employees ORDER BY name")
            .fetch_all(self.db.pool())
            .await?;

        rows.iter().map(row_to_employee).collect()
    }

    pub async fn update_employee(&self, employee: &Employee) -> Result<()> {
        sqlx::query("UPDATE employees SET name = ?, updated_at = ? WHERE id = ?")
            .bind(&employee.name)
            .bind(employee.updated_at.to_rfc3339())
            .bind(&employee.id)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(employee_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_employee(row: &SqliteRow) -> Result<Employee> {
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Employee {
        id: row.get("id"),
        name: row.get("name"),
        created_at: parse_stored_timestamp(&created_at)?,
        updated_at: parse_stored_timestamp(&updated_at)?,
    })
}
