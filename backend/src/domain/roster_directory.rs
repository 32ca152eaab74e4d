//! Read-side directory service.
//!
//! Listings resolve the display names of referenced companies and
//! departments in one batch per collection. Tenure is computed against the
//! service clock on every read and never stored.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use super::consistency_manager::{
    COMPANY_NOT_FOUND, DEPARTMENT_NOT_FOUND, EMPLOYEE_NOT_FOUND, map_company_error,
    map_department_error, map_employee_error,
};
use super::ports::{
    CompanyRepository, DepartmentRepository, DepartmentView, EmployeeRepository, EmployeeView,
    ReferenceResolver, ReferenceResolverError, RosterQuery,
};
use super::{Company, CompanyId, Department, DepartmentId, Employee, EmployeeId, Error};

/// Directory lookups backed by the repositories and a reference resolver.
#[derive(Clone)]
pub struct RosterDirectory<C, D, E, R> {
    companies: Arc<C>,
    departments: Arc<D>,
    employees: Arc<E>,
    references: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<C, D, E, R> RosterDirectory<C, D, E, R> {
    /// Build a directory reading through the repositories and resolver.
    pub fn new(
        companies: Arc<C>,
        departments: Arc<D>,
        employees: Arc<E>,
        references: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            companies,
            departments,
            employees,
            references,
            clock,
        }
    }
}

fn map_resolver_error(error: ReferenceResolverError) -> Error {
    match error {
        ReferenceResolverError::Connection { message } => {
            Error::service_unavailable(format!("reference resolver unavailable: {message}"))
        }
        ReferenceResolverError::Query { message } => {
            Error::internal(format!("reference resolver error: {message}"))
        }
    }
}

fn distinct<T: Ord + Copy>(ids: impl Iterator<Item = T>) -> Vec<T> {
    ids.collect::<BTreeSet<_>>().into_iter().collect()
}

impl<C, D, E, R> RosterDirectory<C, D, E, R>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
    R: ReferenceResolver,
{
    async fn company_names(
        &self,
        ids: Vec<CompanyId>,
    ) -> Result<HashMap<CompanyId, String>, Error> {
        self.references
            .company_names(&ids)
            .await
            .map_err(map_resolver_error)
    }

    async fn department_names(
        &self,
        ids: Vec<DepartmentId>,
    ) -> Result<HashMap<DepartmentId, String>, Error> {
        self.references
            .department_names(&ids)
            .await
            .map_err(map_resolver_error)
    }

    async fn department_views(
        &self,
        departments: Vec<Department>,
    ) -> Result<Vec<DepartmentView>, Error> {
        let names = self
            .company_names(distinct(departments.iter().map(Department::company_id)))
            .await?;
        Ok(departments
            .into_iter()
            .map(|department| DepartmentView {
                company_name: names.get(&department.company_id()).cloned(),
                department,
            })
            .collect())
    }

    async fn employee_views(&self, employees: Vec<Employee>) -> Result<Vec<EmployeeView>, Error> {
        let company_names = self
            .company_names(distinct(employees.iter().map(Employee::company_id)))
            .await?;
        let department_names = self
            .department_names(distinct(employees.iter().map(Employee::department_id)))
            .await?;
        let now = self.clock.utc();
        Ok(employees
            .into_iter()
            .map(|employee| EmployeeView {
                company_name: company_names.get(&employee.company_id()).cloned(),
                department_name: department_names.get(&employee.department_id()).cloned(),
                days_employed: employee.days_employed(now),
                employee,
            })
            .collect())
    }
}

#[async_trait]
impl<C, D, E, R> RosterQuery for RosterDirectory<C, D, E, R>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
    R: ReferenceResolver,
{
    async fn list_companies(&self) -> Result<Vec<Company>, Error> {
        self.companies.find_all().await.map_err(map_company_error)
    }

    async fn get_company(&self, company_id: &CompanyId) -> Result<Company, Error> {
        self.companies
            .find_by_id(company_id)
            .await
            .map_err(map_company_error)?
            .ok_or_else(|| Error::not_found(COMPANY_NOT_FOUND))
    }

    async fn list_departments(&self) -> Result<Vec<DepartmentView>, Error> {
        let departments = self
            .departments
            .find_all()
            .await
            .map_err(map_department_error)?;
        self.department_views(departments).await
    }

    async fn get_department(&self, department_id: &DepartmentId) -> Result<DepartmentView, Error> {
        let department = self
            .departments
            .find_by_id(department_id)
            .await
            .map_err(map_department_error)?
            .ok_or_else(|| Error::not_found(DEPARTMENT_NOT_FOUND))?;
        self.department_views(vec![department])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("department view missing after resolution"))
    }

    async fn list_employees(&self) -> Result<Vec<EmployeeView>, Error> {
        let employees = self
            .employees
            .find_all()
            .await
            .map_err(map_employee_error)?;
        self.employee_views(employees).await
    }

    async fn get_employee(&self, employee_id: &EmployeeId) -> Result<EmployeeView, Error> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))?;
        self.employee_views(vec![employee])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("employee view missing after resolution"))
    }
}

#[cfg(test)]
#[path = "roster_directory_tests.rs"]
mod tests;
