//! Driving port for read-only directory lookups.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId, Department, DepartmentId, Employee, EmployeeId, Error};

/// Department with its company's display name resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentView {
    pub department: Department,
    /// `None` when the owning company no longer exists.
    pub company_name: Option<String>,
}

/// Employee with references resolved and tenure computed at read time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeView {
    pub employee: Employee,
    pub company_name: Option<String>,
    pub department_name: Option<String>,
    pub days_employed: i64,
}

/// Directory read use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RosterQuery: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>, Error>;

    async fn get_company(&self, company_id: &CompanyId) -> Result<Company, Error>;

    async fn list_departments(&self) -> Result<Vec<DepartmentView>, Error>;

    async fn get_department(&self, department_id: &DepartmentId) -> Result<DepartmentView, Error>;

    async fn list_employees(&self) -> Result<Vec<EmployeeView>, Error>;

    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeView, Error>;
}
