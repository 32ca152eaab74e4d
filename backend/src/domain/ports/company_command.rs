//! Driving port for company mutations.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCompanyRequest {
    pub name: String,
}

/// Partial company update; a blank or absent name keeps the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCompanyRequest {
    pub company_id: CompanyId,
    pub name: Option<String>,
}

/// Company use-cases invoked by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyCommand: Send + Sync {
    /// Create a company with zeroed counters; names must be unique.
    async fn create_company(&self, request: CreateCompanyRequest) -> Result<Company, Error>;

    async fn update_company(&self, request: UpdateCompanyRequest) -> Result<Company, Error>;

    /// Delete a company that no department or employee references.
    async fn delete_company(&self, company_id: &CompanyId) -> Result<(), Error>;
}
