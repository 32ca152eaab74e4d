//! Driven port for department persistence.

use async_trait::async_trait;

use crate::domain::{Department, DepartmentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by department repository adapters.
    pub enum DepartmentRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "department repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "department repository query failed: {message}",
    }
}

/// Storage for [`Department`] records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(
        &self,
        id: &DepartmentId,
    ) -> Result<Option<Department>, DepartmentRepositoryError>;

    /// All departments, oldest first.
    async fn find_all(&self) -> Result<Vec<Department>, DepartmentRepositoryError>;

    async fn create(&self, department: &Department) -> Result<(), DepartmentRepositoryError>;

    async fn save(&self, department: &Department) -> Result<(), DepartmentRepositoryError>;

    async fn delete_one(&self, id: &DepartmentId) -> Result<bool, DepartmentRepositoryError>;
}
