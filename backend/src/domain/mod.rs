//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the company, department, and employee records together
//! with the rules that keep their counters and workflow consistent. Types
//! keep their fields private and expose accessors; mutation that affects
//! more than one record goes through [`ConsistencyManager`].
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Company, Department, Employee: stored records.
//! - EmployeeStatus / plan_status_change: the hiring workflow.
//! - ConsistencyManager: command side, implements the `*Command` ports.
//! - RosterDirectory: read side, implements [`ports::RosterQuery`].

pub mod auth;
mod company;
mod consistency_manager;
mod department;
mod employee;
mod employee_status;
pub mod error;
mod fields;
mod ids;
pub mod ports;
mod roster_directory;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError, Principal, Role, UnknownRole};
pub use self::company::Company;
pub use self::consistency_manager::ConsistencyManager;
pub use self::department::Department;
pub use self::employee::{
    EmailAddress, Employee, EmployeeChanges, EmployeeDetails, EmployeeDetailsDraft, MobileNumber,
};
pub use self::employee_status::{
    EmployeeStatus, StatusChange, UnknownEmployeeStatus, plan_status_change,
};
pub use self::error::{Error, ErrorCode};
pub use self::ids::{CompanyId, DepartmentId, EmployeeId};
pub use self::roster_directory::RosterDirectory;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use roster_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
