//! Process-local storage adapters.
//!
//! Records live in `parking_lot` guarded maps and are lost on restart.

mod record_table;
mod repositories;
mod services;

pub use repositories::{
    InMemoryCompanyRepository, InMemoryDepartmentRepository, InMemoryEmployeeRepository,
    InMemoryReferenceResolver, InMemoryRoster,
};
pub use services::{InMemoryConsistencyManager, InMemoryRosterDirectory, InMemoryServices};
