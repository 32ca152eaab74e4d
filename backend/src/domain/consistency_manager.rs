//! Cross-record consistency rules.
//!
//! [`ConsistencyManager`] is the only code that adjusts company and
//! department counters. It implements the company, department, and employee
//! driving ports on top of the three repository ports:
//!
//! - creates bump the parent counters; a failed counter write rolls the
//!   create back;
//! - deletes are refused while children exist; after a delete the parent
//!   counters are released best-effort and failures are only logged;
//! - employee updates run through the status workflow.
//!
//! Each step is a separate repository call. Concurrent requests touching the
//! same parent may interleave between the read and the write of a counter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use super::fields::provided_text;
use super::ports::{
    CompanyCommand, CompanyRepository, CompanyRepositoryError, CreateCompanyRequest,
    CreateDepartmentRequest, CreateEmployeeRequest, DepartmentCommand, DepartmentRepository,
    DepartmentRepositoryError, EmployeeCommand, EmployeeRepository, EmployeeRepositoryError,
    UpdateCompanyRequest, UpdateDepartmentRequest, UpdateEmployeeRequest,
};
use super::{
    Company, CompanyId, Department, DepartmentId, Employee, EmployeeId, Error, StatusChange,
};

pub(crate) const COMPANY_NOT_FOUND: &str = "Company not found";
pub(crate) const DEPARTMENT_NOT_FOUND: &str = "Department not found";
pub(crate) const EMPLOYEE_NOT_FOUND: &str = "Employee not found";

/// Domain service owning every cross-record mutation.
#[derive(Clone)]
pub struct ConsistencyManager<C, D, E> {
    companies: Arc<C>,
    departments: Arc<D>,
    employees: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<C, D, E> ConsistencyManager<C, D, E> {
    /// Build a manager over the three record repositories and a clock.
    pub fn new(
        companies: Arc<C>,
        departments: Arc<D>,
        employees: Arc<E>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            companies,
            departments,
            employees,
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}

pub(crate) fn map_company_error(error: CompanyRepositoryError) -> Error {
    match error {
        CompanyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("company repository unavailable: {message}"))
        }
        CompanyRepositoryError::Query { message } => {
            Error::internal(format!("company repository error: {message}"))
        }
        CompanyRepositoryError::DuplicateName { name } => {
            Error::validation(format!("companyName already exists: {name}")).with_details(json!({
                "field": "companyName",
                "value": name,
                "code": "duplicate",
            }))
        }
    }
}

pub(crate) fn map_department_error(error: DepartmentRepositoryError) -> Error {
    match error {
        DepartmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("department repository unavailable: {message}"))
        }
        DepartmentRepositoryError::Query { message } => {
            Error::internal(format!("department repository error: {message}"))
        }
    }
}

pub(crate) fn map_employee_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeeRepositoryError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
    }
}

impl<C, D, E> ConsistencyManager<C, D, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
{
    async fn load_company(&self, company_id: &CompanyId) -> Result<Company, Error> {
        self.companies
            .find_by_id(company_id)
            .await
            .map_err(map_company_error)?
            .ok_or_else(|| Error::not_found(COMPANY_NOT_FOUND))
    }

    async fn load_department(&self, department_id: &DepartmentId) -> Result<Department, Error> {
        self.departments
            .find_by_id(department_id)
            .await
            .map_err(map_department_error)?
            .ok_or_else(|| Error::not_found(DEPARTMENT_NOT_FOUND))
    }

    async fn load_employee(&self, employee_id: &EmployeeId) -> Result<Employee, Error> {
        self.employees
            .find_by_id(employee_id)
            .await
            .map_err(map_employee_error)?
            .ok_or_else(|| Error::not_found(EMPLOYEE_NOT_FOUND))
    }

    /// Undo a department create whose counter write failed.
    async fn discard_department(&self, department_id: &DepartmentId) {
        if let Err(error) = self.departments.delete_one(department_id).await {
            warn!(%department_id, %error, "failed to roll back department create");
        }
    }

    /// Undo an employee create whose counter write failed.
    async fn discard_employee(&self, employee_id: &EmployeeId) {
        if let Err(error) = self.employees.delete_one(employee_id).await {
            warn!(%employee_id, %error, "failed to roll back employee create");
        }
    }

    /// Decrement a company counter after a child was deleted.
    ///
    /// A missing company or a failed write is logged and otherwise ignored.
    async fn release_company_slot<F>(&self, company_id: CompanyId, counter: &'static str, release: F)
    where
        F: FnOnce(&mut Company) + Send,
    {
        match self.companies.find_by_id(&company_id).await {
            Ok(Some(mut company)) => {
                release(&mut company);
                if let Err(error) = self.companies.save(&company).await {
                    warn!(%company_id, counter, %error, "failed to release company counter");
                }
            }
            Ok(None) => warn!(%company_id, counter, "company missing while releasing counter"),
            Err(error) => {
                warn!(%company_id, counter, %error, "failed to load company while releasing counter");
            }
        }
    }

    async fn release_department_slot(&self, department_id: DepartmentId, now: DateTime<Utc>) {
        match self.departments.find_by_id(&department_id).await {
            Ok(Some(mut department)) => {
                department.decrement_employees(now);
                if let Err(error) = self.departments.save(&department).await {
                    warn!(%department_id, %error, "failed to release department counter");
                }
            }
            Ok(None) => warn!(%department_id, "department missing while releasing counter"),
            Err(error) => {
                warn!(%department_id, %error, "failed to load department while releasing counter");
            }
        }
    }
}

#[async_trait]
impl<C, D, E> CompanyCommand for ConsistencyManager<C, D, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
{
    async fn create_company(&self, request: CreateCompanyRequest) -> Result<Company, Error> {
        let company = Company::new(CompanyId::random(), &request.name, self.now())?;
        self.companies
            .create(&company)
            .await
            .map_err(map_company_error)?;
        info!(company_id = %company.id(), "company created");
        Ok(company)
    }

    async fn update_company(&self, request: UpdateCompanyRequest) -> Result<Company, Error> {
        let now = self.now();
        let mut company = self.load_company(&request.company_id).await?;
        match provided_text(request.name.as_deref()) {
            Some(name) => company.rename(name, now)?,
            None => company.touch(now),
        }
        self.companies
            .save(&company)
            .await
            .map_err(map_company_error)?;
        Ok(company)
    }

    async fn delete_company(&self, company_id: &CompanyId) -> Result<(), Error> {
        let company = self.load_company(company_id).await?;
        if company.has_children() {
            return Err(Error::precondition_failed(
                "Cannot delete company with active departments or employees",
            )
            .with_details(json!({
                "numberOfDepartments": company.number_of_departments(),
                "numberOfEmployees": company.number_of_employees(),
            })));
        }
        let removed = self
            .companies
            .delete_one(company_id)
            .await
            .map_err(map_company_error)?;
        if !removed {
            return Err(Error::not_found(COMPANY_NOT_FOUND));
        }
        info!(%company_id, "company deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, D, E> DepartmentCommand for ConsistencyManager<C, D, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
{
    async fn create_department(
        &self,
        request: CreateDepartmentRequest,
    ) -> Result<Department, Error> {
        let now = self.now();
        let mut company = self.load_company(&request.company_id).await?;
        let department = Department::new(DepartmentId::random(), company.id(), &request.name, now)?;
        self.departments
            .create(&department)
            .await
            .map_err(map_department_error)?;

        company.increment_departments(now);
        if let Err(error) = self.companies.save(&company).await {
            self.discard_department(&department.id()).await;
            return Err(map_company_error(error));
        }
        info!(department_id = %department.id(), company_id = %company.id(), "department created");
        Ok(department)
    }

    async fn update_department(
        &self,
        request: UpdateDepartmentRequest,
    ) -> Result<Department, Error> {
        let now = self.now();
        let mut department = self.load_department(&request.department_id).await?;
        match provided_text(request.name.as_deref()) {
            Some(name) => department.rename(name, now)?,
            None => department.touch(now),
        }
        self.departments
            .save(&department)
            .await
            .map_err(map_department_error)?;
        Ok(department)
    }

    async fn delete_department(&self, department_id: &DepartmentId) -> Result<(), Error> {
        let department = self.load_department(department_id).await?;
        if department.number_of_employees() > 0 {
            return Err(
                Error::precondition_failed("Cannot delete department with active employees")
                    .with_details(json!({
                        "numberOfEmployees": department.number_of_employees(),
                    })),
            );
        }
        let removed = self
            .departments
            .delete_one(department_id)
            .await
            .map_err(map_department_error)?;
        if !removed {
            return Err(Error::not_found(DEPARTMENT_NOT_FOUND));
        }

        let now = self.now();
        self.release_company_slot(department.company_id(), "numberOfDepartments", |company| {
            company.decrement_departments(now);
        })
        .await;
        info!(%department_id, "department deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, D, E> EmployeeCommand for ConsistencyManager<C, D, E>
where
    C: CompanyRepository,
    D: DepartmentRepository,
    E: EmployeeRepository,
{
    async fn create_employee(&self, request: CreateEmployeeRequest) -> Result<Employee, Error> {
        let now = self.now();
        let CreateEmployeeRequest {
            company_id,
            department_id,
            details,
        } = request;

        let mut department = self.load_department(&department_id).await?;
        if !department.belongs_to(&company_id) {
            return Err(Error::invalid_reference(
                "Department does not belong to the selected company",
            )
            .with_details(json!({
                "companyId": company_id.to_string(),
                "departmentId": department_id.to_string(),
            })));
        }
        let company = self
            .companies
            .find_by_id(&company_id)
            .await
            .map_err(map_company_error)?;

        let employee = Employee::new(EmployeeId::random(), company_id, department_id, details, now);
        self.employees
            .create(&employee)
            .await
            .map_err(map_employee_error)?;

        department.increment_employees(now);
        if let Err(error) = self.departments.save(&department).await {
            self.discard_employee(&employee.id()).await;
            return Err(map_department_error(error));
        }

        match company {
            Some(mut company) => {
                company.increment_employees(now);
                if let Err(error) = self.companies.save(&company).await {
                    self.release_department_slot(department_id, now).await;
                    self.discard_employee(&employee.id()).await;
                    return Err(map_company_error(error));
                }
            }
            None => warn!(%company_id, "company missing; employee counter not incremented"),
        }
        info!(employee_id = %employee.id(), %department_id, "employee created");
        Ok(employee)
    }

    async fn update_employee(&self, request: UpdateEmployeeRequest) -> Result<Employee, Error> {
        let now = self.now();
        let mut employee = self.load_employee(&request.employee_id).await?;
        let change = employee.apply_changes(&request.changes, now)?;
        self.employees
            .save(&employee)
            .await
            .map_err(map_employee_error)?;
        if let StatusChange::Transition { from, to } = change {
            info!(
                employee_id = %employee.id(),
                from = from.as_str(),
                to = to.as_str(),
                "employee status changed"
            );
        }
        Ok(employee)
    }

    async fn delete_employee(&self, employee_id: &EmployeeId) -> Result<(), Error> {
        let employee = self.load_employee(employee_id).await?;
        let removed = self
            .employees
            .delete_one(employee_id)
            .await
            .map_err(map_employee_error)?;
        if !removed {
            return Err(Error::not_found(EMPLOYEE_NOT_FOUND));
        }

        let now = self.now();
        self.release_company_slot(employee.company_id(), "numberOfEmployees", |company| {
            company.decrement_employees(now);
        })
        .await;
        self.release_department_slot(employee.department_id(), now)
            .await;
        info!(%employee_id, "employee deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "consistency_manager_tests.rs"]
mod tests;
