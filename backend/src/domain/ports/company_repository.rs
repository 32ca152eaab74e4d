//! Driven port for company persistence.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by company repository adapters.
    pub enum CompanyRepositoryError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "company repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "company repository query failed: {message}",
        /// Another company already holds this name.
        DuplicateName { name: String } =>
            "company name already exists: {name}",
    }
}

/// Storage for [`Company`] records.
///
/// Each call is atomic for the single record it touches. Company names are
/// unique across the store; `create` and `save` enforce it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError>;

    /// All companies, oldest first.
    async fn find_all(&self) -> Result<Vec<Company>, CompanyRepositoryError>;

    async fn create(&self, company: &Company) -> Result<(), CompanyRepositoryError>;

    /// Overwrite an existing record.
    async fn save(&self, company: &Company) -> Result<(), CompanyRepositoryError>;

    /// Delete a record, returning whether one was removed.
    async fn delete_one(&self, id: &CompanyId) -> Result<bool, CompanyRepositoryError>;
}
