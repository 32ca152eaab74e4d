//! Driving port for department mutations.

use async_trait::async_trait;

use crate::domain::{CompanyId, Department, DepartmentId, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDepartmentRequest {
    pub company_id: CompanyId,
    pub name: String,
}

/// Partial department update. The owning company cannot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDepartmentRequest {
    pub department_id: DepartmentId,
    pub name: Option<String>,
}

/// Department use-cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentCommand: Send + Sync {
    /// Create a department and count it against its company.
    async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> Result<Department, Error>;

    async fn update_department(
        &self,
        request: UpdateDepartmentRequest,
    ) -> Result<Department, Error>;

    /// Delete an empty department and release its slot on the company.
    async fn delete_department(&self, department_id: &DepartmentId) -> Result<(), Error>;
}
