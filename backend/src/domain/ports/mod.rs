//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, [`RosterQuery`], [`LoginService`]) are called
//! by inbound adapters. Driven ports (`*Repository`, [`ReferenceResolver`])
//! are implemented by outbound adapters and consumed by domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod company_command;
mod company_repository;
mod department_command;
mod department_repository;
mod employee_command;
mod employee_repository;
mod login_service;
mod reference_resolver;
mod roster_query;

#[cfg(test)]
pub use company_command::MockCompanyCommand;
pub use company_command::{CompanyCommand, CreateCompanyRequest, UpdateCompanyRequest};
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyRepository, CompanyRepositoryError};
#[cfg(test)]
pub use department_command::MockDepartmentCommand;
pub use department_command::{
    CreateDepartmentRequest, DepartmentCommand, UpdateDepartmentRequest,
};
#[cfg(test)]
pub use department_repository::MockDepartmentRepository;
pub use department_repository::{DepartmentRepository, DepartmentRepositoryError};
#[cfg(test)]
pub use employee_command::MockEmployeeCommand;
pub use employee_command::{CreateEmployeeRequest, EmployeeCommand, UpdateEmployeeRequest};
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{EmployeeRepository, EmployeeRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use reference_resolver::MockReferenceResolver;
pub use reference_resolver::{ReferenceResolver, ReferenceResolverError};
#[cfg(test)]
pub use roster_query::MockRosterQuery;
pub use roster_query::{DepartmentView, EmployeeView, RosterQuery};
