//! Driving port for employee mutations.

use async_trait::async_trait;

use crate::domain::{
    CompanyId, DepartmentId, Employee, EmployeeChanges, EmployeeDetails, EmployeeId, Error,
};

/// Request to register a new applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEmployeeRequest {
    pub company_id: CompanyId,
    pub department_id: DepartmentId,
    pub details: EmployeeDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    pub employee_id: EmployeeId,
    pub changes: EmployeeChanges,
}

/// Employee use-cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeCommand: Send + Sync {
    /// Register an applicant in `Application Received` and count them against
    /// their department and company.
    async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee, Error>;

    /// Apply field edits and the status workflow in one save.
    async fn update_employee(&self, request: UpdateEmployeeRequest) -> Result<Employee, Error>;

    async fn delete_employee(&self, employee_id: &EmployeeId) -> Result<(), Error>;
}
