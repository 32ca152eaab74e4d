//! Driven port for employee persistence.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
    }
}

/// Storage for [`Employee`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: &EmployeeId)
    -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// All employees, oldest first.
    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    async fn create(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError>;

    async fn save(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError>;

    async fn delete_one(&self, id: &EmployeeId) -> Result<bool, EmployeeRepositoryError>;
}
