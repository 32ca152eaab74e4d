//! Domain services wired over a single in-memory roster.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::{ConsistencyManager, RosterDirectory};

use super::repositories::{
    InMemoryCompanyRepository, InMemoryDepartmentRepository, InMemoryEmployeeRepository,
    InMemoryReferenceResolver, InMemoryRoster,
};

pub type InMemoryConsistencyManager = ConsistencyManager<
    InMemoryCompanyRepository,
    InMemoryDepartmentRepository,
    InMemoryEmployeeRepository,
>;

pub type InMemoryRosterDirectory = RosterDirectory<
    InMemoryCompanyRepository,
    InMemoryDepartmentRepository,
    InMemoryEmployeeRepository,
    InMemoryReferenceResolver,
>;

/// Write and read services sharing the same tables.
#[derive(Clone)]
pub struct InMemoryServices {
    pub manager: Arc<InMemoryConsistencyManager>,
    pub directory: Arc<InMemoryRosterDirectory>,
}

impl InMemoryRoster {
    /// Wire the consistency manager and directory over these tables.
    pub fn into_services(self, clock: Arc<dyn Clock>) -> InMemoryServices {
        let companies = Arc::new(self.companies);
        let departments = Arc::new(self.departments);
        let employees = Arc::new(self.employees);
        let manager = ConsistencyManager::new(
            Arc::clone(&companies),
            Arc::clone(&departments),
            Arc::clone(&employees),
            Arc::clone(&clock),
        );
        let directory = RosterDirectory::new(
            companies,
            departments,
            employees,
            Arc::new(self.references),
            clock,
        );
        InMemoryServices {
            manager: Arc::new(manager),
            directory: Arc::new(directory),
        }
    }
}
