//! In-memory repository adapters.
//!
//! Each repository owns one [`RecordTable`]. The reference resolver reads
//! the company and department tables directly, so build all four through
//! [`InMemoryRoster::new`] to share them.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CompanyRepository, CompanyRepositoryError, DepartmentRepository, DepartmentRepositoryError,
    EmployeeRepository, EmployeeRepositoryError, ReferenceResolver, ReferenceResolverError,
};
use crate::domain::{Company, CompanyId, Department, DepartmentId, Employee, EmployeeId};

use super::record_table::RecordTable;

/// Company table with name uniqueness enforced on every write.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCompanyRepository {
    table: RecordTable<CompanyId, Company>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDepartmentRepository {
    table: RecordTable<DepartmentId, Department>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeRepository {
    table: RecordTable<EmployeeId, Employee>,
}

/// Name lookups over the shared company and department tables.
#[derive(Debug, Clone)]
pub struct InMemoryReferenceResolver {
    companies: RecordTable<CompanyId, Company>,
    departments: RecordTable<DepartmentId, Department>,
}

/// The four in-memory adapters over one set of tables.
#[derive(Debug, Clone)]
pub struct InMemoryRoster {
    pub companies: InMemoryCompanyRepository,
    pub departments: InMemoryDepartmentRepository,
    pub employees: InMemoryEmployeeRepository,
    pub references: InMemoryReferenceResolver,
}

impl InMemoryRoster {
    /// Empty roster whose resolver reads the company and department tables.
    pub fn new() -> Self {
        let companies = InMemoryCompanyRepository::default();
        let departments = InMemoryDepartmentRepository::default();
        let references = InMemoryReferenceResolver {
            companies: companies.table.clone(),
            departments: departments.table.clone(),
        };
        Self {
            companies,
            departments,
            employees: InMemoryEmployeeRepository::default(),
            references,
        }
    }
}

impl Default for InMemoryRoster {
    fn default() -> Self {
        Self::new()
    }
}

fn oldest_first<T>(mut rows: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by_key(|row| created_at(row));
    rows
}

fn ensure_unique_name(
    rows: &HashMap<CompanyId, Company>,
    company: &Company,
) -> Result<(), CompanyRepositoryError> {
    let taken = rows
        .values()
        .any(|other| other.id() != company.id() && other.name() == company.name());
    if taken {
        return Err(CompanyRepositoryError::duplicate_name(company.name()));
    }
    Ok(())
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, CompanyRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Company>, CompanyRepositoryError> {
        Ok(oldest_first(self.table.list(), Company::created_at))
    }

    async fn create(&self, company: &Company) -> Result<(), CompanyRepositoryError> {
        self.table
            .put_checked(company.id(), company.clone(), |rows| {
                if rows.contains_key(&company.id()) {
                    return Err(CompanyRepositoryError::query(format!(
                        "company {} already exists",
                        company.id()
                    )));
                }
                ensure_unique_name(rows, company)
            })
    }

    async fn save(&self, company: &Company) -> Result<(), CompanyRepositoryError> {
        self.table
            .put_checked(company.id(), company.clone(), |rows| {
                if !rows.contains_key(&company.id()) {
                    return Err(CompanyRepositoryError::query(format!(
                        "company {} does not exist",
                        company.id()
                    )));
                }
                ensure_unique_name(rows, company)
            })
    }

    async fn delete_one(&self, id: &CompanyId) -> Result<bool, CompanyRepositoryError> {
        Ok(self.table.remove(id))
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn find_by_id(
        &self,
        id: &DepartmentId,
    ) -> Result<Option<Department>, DepartmentRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Department>, DepartmentRepositoryError> {
        Ok(oldest_first(self.table.list(), Department::created_at))
    }

    async fn create(&self, department: &Department) -> Result<(), DepartmentRepositoryError> {
        self.table
            .put_checked(department.id(), department.clone(), |rows| {
                if rows.contains_key(&department.id()) {
                    return Err(DepartmentRepositoryError::query(format!(
                        "department {} already exists",
                        department.id()
                    )));
                }
                Ok(())
            })
    }

    async fn save(&self, department: &Department) -> Result<(), DepartmentRepositoryError> {
        self.table
            .put_checked(department.id(), department.clone(), |rows| {
                if !rows.contains_key(&department.id()) {
                    return Err(DepartmentRepositoryError::query(format!(
                        "department {} does not exist",
                        department.id()
                    )));
                }
                Ok(())
            })
    }

    async fn delete_one(&self, id: &DepartmentId) -> Result<bool, DepartmentRepositoryError> {
        Ok(self.table.remove(id))
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(self.table.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(oldest_first(self.table.list(), Employee::created_at))
    }

    async fn create(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError> {
        self.table
            .put_checked(employee.id(), employee.clone(), |rows| {
                if rows.contains_key(&employee.id()) {
                    return Err(EmployeeRepositoryError::query(format!(
                        "employee {} already exists",
                        employee.id()
                    )));
                }
                Ok(())
            })
    }

    async fn save(&self, employee: &Employee) -> Result<(), EmployeeRepositoryError> {
        self.table
            .put_checked(employee.id(), employee.clone(), |rows| {
                if !rows.contains_key(&employee.id()) {
                    return Err(EmployeeRepositoryError::query(format!(
                        "employee {} does not exist",
                        employee.id()
                    )));
                }
                Ok(())
            })
    }

    async fn delete_one(&self, id: &EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        Ok(self.table.remove(id))
    }
}

#[async_trait]
impl ReferenceResolver for InMemoryReferenceResolver {
    async fn company_names(
        &self,
        ids: &[CompanyId],
    ) -> Result<HashMap<CompanyId, String>, ReferenceResolverError> {
        Ok(self
            .companies
            .project(ids, |company| company.name().to_owned()))
    }

    async fn department_names(
        &self,
        ids: &[DepartmentId],
    ) -> Result<HashMap<DepartmentId, String>, ReferenceResolverError> {
        Ok(self
            .departments
            .project(ids, |department| department.name().to_owned()))
    }
}

#[cfg(test)]
#[path = "repositories_tests.rs"]
mod tests;
