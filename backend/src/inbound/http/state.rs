//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CompanyCommand, DepartmentCommand, EmployeeCommand, LoginService, RosterQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub companies: Arc<dyn CompanyCommand>,
    pub departments: Arc<dyn DepartmentCommand>,
    pub employees: Arc<dyn EmployeeCommand>,
    pub roster: Arc<dyn RosterQuery>,
}
