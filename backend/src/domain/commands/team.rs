use crate::domain::models::employee::Employee;
use crate::domain::models::location::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEmployeeCommand {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEmployeeResult {
    pub employee: Employee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEmployeeCommand {
    pub employee_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEmployeeResult {
    pub employee: Employee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateLocationCommand {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateLocationResult {
    pub location: Location,
}
