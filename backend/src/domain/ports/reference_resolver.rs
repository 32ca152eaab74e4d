//! Driven port resolving display names for referenced records.
//!
//! Read endpoints show the company and department names next to their ids.
//! Resolution is shallow: one lookup per referenced collection, no nesting.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{CompanyId, DepartmentId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving references.
    pub enum ReferenceResolverError {
        /// The backing store could not be reached.
        Connection { message: String } =>
            "reference resolver connection failed: {message}",
        /// The lookup failed during execution.
        Query { message: String } =>
            "reference resolver query failed: {message}",
    }
}

/// Batch lookup of display names.
///
/// Ids with no live record are omitted from the returned map.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn company_names(
        &self,
        ids: &[CompanyId],
    ) -> Result<HashMap<CompanyId, String>, ReferenceResolverError>;

    async fn department_names(
        &self,
        ids: &[DepartmentId],
    ) -> Result<HashMap<DepartmentId, String>, ReferenceResolverError>;
}
