//! Employee API handlers.
//!
//! ```text
//! GET    /api/v1/employees
//! GET    /api/v1/employees/{id}
//! POST   /api/v1/employees {"companyId":"…","departmentId":"…","employeeName":"Ada",…}
//! PUT    /api/v1/employees/{id} {"employeeStatus":"Interview Scheduled"}
//! DELETE /api/v1/employees/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{CreateEmployeeRequest, EmployeeView, UpdateEmployeeRequest};
use crate::domain::{
    CompanyId, DepartmentId, Employee, EmployeeChanges, EmployeeDetails, EmployeeDetailsDraft,
    EmployeeId, EmployeeStatus, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::removal::RemovalResponse;
use crate::inbound::http::schemas::{EmployeeStatusSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require};

const EMPLOYEE_ID: FieldName = FieldName::new("id");
const COMPANY_ID: FieldName = FieldName::new("companyId");
const DEPARTMENT_ID: FieldName = FieldName::new("departmentId");
const STATUS_FIELD: &str = "employeeStatus";

const WRITERS: &[Role] = &[Role::Admin, Role::Manager];

/// Body for `POST /api/v1/employees`.
///
/// New records always start in `Application Received`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeBody {
    pub company_id: Option<String>,
    pub department_id: Option<String>,
    #[schema(example = "Ada Lovelace")]
    pub employee_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "0123456789")]
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
}

/// Body for `PUT /api/v1/employees/{id}`.
///
/// Absent or blank fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeBody {
    pub employee_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
    #[schema(value_type = Option<EmployeeStatusSchema>)]
    pub employee_status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub department_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_name: Option<String>,
    pub employee_name: String,
    pub email: String,
    pub mobile_number: String,
    pub address: String,
    pub designation: String,
    #[schema(value_type = EmployeeStatusSchema)]
    pub employee_status: EmployeeStatus,
    pub hired_on: Option<DateTime<Utc>>,
    /// Whole days since `hiredOn`; present on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_employed: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeResponse {
    fn from(value: Employee) -> Self {
        Self {
            id: *value.id().as_uuid(),
            company_id: *value.company_id().as_uuid(),
            company_name: None,
            department_id: *value.department_id().as_uuid(),
            department_name: None,
            employee_name: value.name().to_owned(),
            email: value.email().as_ref().to_owned(),
            mobile_number: value.mobile_number().as_ref().to_owned(),
            address: value.address().to_owned(),
            designation: value.designation().to_owned(),
            employee_status: value.status(),
            hired_on: value.hired_on(),
            days_employed: None,
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

impl From<EmployeeView> for EmployeeResponse {
    fn from(value: EmployeeView) -> Self {
        Self {
            company_name: value.company_name,
            department_name: value.department_name,
            days_employed: Some(value.days_employed),
            ..Self::from(value.employee)
        }
    }
}

fn employee_id(raw: &str) -> ApiResult<EmployeeId> {
    parse_uuid(raw, EMPLOYEE_ID).map(EmployeeId::from_uuid)
}

impl CreateEmployeeBody {
    fn into_request(self) -> ApiResult<CreateEmployeeRequest> {
        let company_id = require(self.company_id, COMPANY_ID)?;
        let department_id = require(self.department_id, DEPARTMENT_ID)?;
        let details = EmployeeDetails::try_from_draft(EmployeeDetailsDraft {
            name: self.employee_name.as_deref().unwrap_or_default(),
            email: self.email.as_deref().unwrap_or_default(),
            mobile_number: self.mobile_number.as_deref().unwrap_or_default(),
            address: self.address.as_deref().unwrap_or_default(),
            designation: self.designation.as_deref().unwrap_or_default(),
        })?;
        Ok(CreateEmployeeRequest {
            company_id: CompanyId::from_uuid(parse_uuid(&company_id, COMPANY_ID)?),
            department_id: DepartmentId::from_uuid(parse_uuid(&department_id, DEPARTMENT_ID)?),
            details,
        })
    }
}

impl UpdateEmployeeBody {
    fn into_changes(self) -> ApiResult<EmployeeChanges> {
        let status = self
            .employee_status
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| EmployeeStatus::parse_field(STATUS_FIELD, raw))
            .transpose()?;
        Ok(EmployeeChanges {
            name: self.employee_name,
            email: self.email,
            mobile_number: self.mobile_number,
            address: self.address,
            designation: self.designation,
            status,
        })
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employees with resolved names and tenure", body = [EmployeeResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<EmployeeResponse>>> {
    session.require_principal()?;
    let views = state.roster.list_employees().await?;
    Ok(web::Json(
        views.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee", body = EmployeeResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    session.require_principal()?;
    let id = employee_id(&path)?;
    let view = state.roster.get_employee(&id).await?;
    Ok(web::Json(view.into()))
}

/// Register an applicant against a department of the given company.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployeeBody,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid fields or mismatched company", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin or Manager role required", body = ErrorSchema),
        (status = 404, description = "Department not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateEmployeeBody>,
) -> ApiResult<HttpResponse> {
    session.require_role(WRITERS)?;
    let request = payload.into_inner().into_request()?;
    let employee = state.employees.create_employee(request).await?;
    Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
}

/// Edit fields and advance the hiring workflow.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    request_body = UpdateEmployeeBody,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid field or status transition", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin or Manager role required", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateEmployeeBody>,
) -> ApiResult<web::Json<EmployeeResponse>> {
    session.require_role(WRITERS)?;
    let request = UpdateEmployeeRequest {
        employee_id: employee_id(&path)?,
        changes: payload.into_inner().into_changes()?,
    };
    let employee = state.employees.update_employee(request).await?;
    Ok(web::Json(employee.into()))
}

#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee removed", body = RemovalResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RemovalResponse>> {
    session.require_role(&[Role::Admin])?;
    let id = employee_id(&path)?;
    state.employees.delete_employee(&id).await?;
    Ok(web::Json(RemovalResponse::new("Employee removed")))
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
