//! Domain model for a staff member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn generate_id(timestamp_millis: u64) -> String {
        shared::Employee::generate_id(timestamp_millis)
    }
}

impl From<Employee> for shared::Employee {
    fn from(employee: Employee) -> Self {
        shared::Employee {
            id: employee.id,
            name: employee.name,
            created_at: employee.created_at.to_rfc3339(),
            updated_at: employee.updated_at.to_rfc3339(),
        }
    }
}
