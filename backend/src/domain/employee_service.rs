//! Employee management.

use anyhow::Result;
use chrono::Utc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

use crate::domain::commands::team::{
    CreateEmployeeCommand, CreateEmployeeResult, UpdateEmployeeCommand, UpdateEmployeeResult,
};
use crate::domain::error::ValidationError;
use crate::domain::models::employee::Employee;
use crate::domain::reference_cache::ReferenceCache;
use crate::storage::EmployeeRepository;

#[derive(Clone)]
pub struct EmployeeService {
    employee_repository: EmployeeRepository,
    reference_cache: ReferenceCache,
}

impl EmployeeService {
    pub fn new(employee_repository: EmployeeRepository, reference_cache: ReferenceCache) -> Self {
        Self {
            employee_repository,
            reference_cache,
        }
    }

    pub async fn create_employee(
        &self,
        command: CreateEmployeeCommand,
    ) -> Result<CreateEmployeeResult> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let now = Utc::now();
        let timestamp_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let employee = Employee {
            id: Employee::generate_id(timestamp_millis),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.employee_repository.store_employee(&employee).await?;
        self.reference_cache.invalidate();
        info!("Created employee {} ({})", employee.id, employee.name);

        Ok(CreateEmployeeResult { employee })
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.employee_repository.list_employees().await
    }

    pub async fn update_employee(
        &self,
        command: UpdateEmployeeCommand,
    ) -> Result<UpdateEmployeeResult> {
        let mut employee = self
            .employee_repository
            .get_employee(&command.employee_id)
            .await?
            .ok_or_else(|| ValidationError::not_found("employee", &command.employee_id))?;

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::EmptyName.into());
            }
            employee.name = name;
        }
        employee.updated_at = Utc::now();

        self.employee_repository.update_employee(&employee).await?;
        self.reference_cache.invalidate();
        info!("Updated employee {}", employee.id);

        Ok(UpdateEmployeeResult { employee })
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<()> {
        let deleted = self.employee_repository.delete_employee(employee_id).await?;
        if !deleted {
            return Err(ValidationError::not_found("employee", employee_id).into());
        }
        self.reference_cache.invalidate();
        info!("Deleted employee {}", employee_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use crate::storage::LocationRepository;

    async fn setup_test() -> EmployeeService {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let employee_repo = EmployeeRepository::new(db.clone());
        let location_repo = LocationRepository::new(db);
        let cache = ReferenceCache::new(employee_repo.clone(), location_repo);
        EmployeeService::new(employee_repo, cache)
    }

    #[tokio::test]
    async fn test_create_trims_and_lists() {
        let service = setup_test().await;

        let created = service
            .create_employee(CreateEmployeeCommand {
                name: "  Alice  ".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.employee.name, "Alice");

        let employees = service.list_employees().await.unwrap();
        assert_eq!(employees.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let service = setup_test().await;

        let err = service
            .create_employee(CreateEmployeeCommand {
                name: "   ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            *err.downcast_ref::<ValidationError>().unwrap(),
            ValidationError::EmptyName
        );
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = setup_test().await;
        let created = service
            .create_employee(CreateEmployeeCommand {
                name: "Alice".to_string(),
            })
            .await
            .unwrap();

        let updated = service
            .update_employee(UpdateEmployeeCommand {
                employee_id: created.employee.id.clone(),
                name: Some("Alice B".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(updated.employee.name, "Alice B");

        service.delete_employee(&created.employee.id).await.unwrap();
        assert!(service.list_employees().await.unwrap().is_empty());

        let err = service.delete_employee(&created.employee.id).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>().unwrap(),
            ValidationError::NotFound { entity: "employee", .. }
        ));
    }

    #[tokio::test]
    async fn test_mutations_invalidate_reference_cache() {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let employee_repo = EmployeeRepository::new(db.clone());
        let location_repo = LocationRepository::new(db);
        let cache = ReferenceCache::new(employee_repo.clone(), location_repo);
        let service = EmployeeService::new(employee_repo, cache.clone());

        assert!(cache.employees().await.unwrap().is_empty());

        service
            .create_employee(CreateEmployeeCommand {
                name: "Alice".to_string(),
            })
            .await
            .unwrap();

        // Visible immediately, without waiting out the TTL
        assert_eq!(cache.employees().await.unwrap().len(), 1);
    }
}
