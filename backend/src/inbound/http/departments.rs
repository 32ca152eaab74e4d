//! Department API handlers.
//!
//! ```text
//! GET    /api/v1/departments
//! GET    /api/v1/departments/{id}
//! POST   /api/v1/departments {"companyId":"…","departmentName":"Engineering"}
//! PUT    /api/v1/departments/{id} {"departmentName":"Platform"}
//! DELETE /api/v1/departments/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{CreateDepartmentRequest, DepartmentView, UpdateDepartmentRequest};
use crate::domain::{CompanyId, Department, DepartmentId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::removal::RemovalResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid, require};

const DEPARTMENT_ID: FieldName = FieldName::new("id");
const COMPANY_ID: FieldName = FieldName::new("companyId");

const WRITERS: &[Role] = &[Role::Admin, Role::Manager];

#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentBody {
    pub company_id: Option<String>,
    #[schema(example = "Engineering")]
    pub department_name: Option<String>,
}

/// Absent or blank `departmentName` keeps the stored name.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentBody {
    pub department_name: Option<String>,
}

/// Department as returned by the API.
///
/// `companyName` is present on reads when the owning company still exists.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub department_name: String,
    pub number_of_employees: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentResponse {
    fn from(value: Department) -> Self {
        Self {
            id: *value.id().as_uuid(),
            company_id: *value.company_id().as_uuid(),
            company_name: None,
            department_name: value.name().to_owned(),
            number_of_employees: value.number_of_employees(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

impl From<DepartmentView> for DepartmentResponse {
    fn from(value: DepartmentView) -> Self {
        Self {
            company_name: value.company_name,
            ..Self::from(value.department)
        }
    }
}

fn department_id(raw: &str) -> ApiResult<DepartmentId> {
    parse_uuid(raw, DEPARTMENT_ID).map(DepartmentId::from_uuid)
}

#[utoipa::path(
    get,
    path = "/api/v1/departments",
    responses(
        (status = 200, description = "Departments with company names", body = [DepartmentResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["departments"],
    operation_id = "listDepartments"
)]
#[get("/departments")]
pub async fn list_departments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DepartmentResponse>>> {
    session.require_principal()?;
    let views = state.roster.list_departments().await?;
    Ok(web::Json(
        views.into_iter().map(DepartmentResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Department not found", body = ErrorSchema)
    ),
    tags = ["departments"],
    operation_id = "getDepartment"
)]
#[get("/departments/{id}")]
pub async fn get_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<DepartmentResponse>> {
    session.require_principal()?;
    let id = department_id(&path)?;
    let view = state.roster.get_department(&id).await?;
    Ok(web::Json(view.into()))
}

/// Create a department and count it against its company.
#[utoipa::path(
    post,
    path = "/api/v1/departments",
    request_body = CreateDepartmentBody,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin or Manager role required", body = ErrorSchema),
        (status = 404, description = "Company not found", body = ErrorSchema)
    ),
    tags = ["departments"],
    operation_id = "createDepartment"
)]
#[post("/departments")]
pub async fn create_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateDepartmentBody>,
) -> ApiResult<HttpResponse> {
    session.require_role(WRITERS)?;
    let body = payload.into_inner();
    let raw_company = require(body.company_id, COMPANY_ID)?;
    let request = CreateDepartmentRequest {
        company_id: parse_uuid(&raw_company, COMPANY_ID).map(CompanyId::from_uuid)?,
        name: body.department_name.unwrap_or_default(),
    };
    let department = state.departments.create_department(request).await?;
    Ok(HttpResponse::Created().json(DepartmentResponse::from(department)))
}

#[utoipa::path(
    put,
    path = "/api/v1/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    request_body = UpdateDepartmentBody,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin or Manager role required", body = ErrorSchema),
        (status = 404, description = "Department not found", body = ErrorSchema)
    ),
    tags = ["departments"],
    operation_id = "updateDepartment"
)]
#[put("/departments/{id}")]
pub async fn update_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateDepartmentBody>,
) -> ApiResult<web::Json<DepartmentResponse>> {
    session.require_role(WRITERS)?;
    let request = UpdateDepartmentRequest {
        department_id: department_id(&path)?,
        name: payload.into_inner().department_name,
    };
    let department = state.departments.update_department(request).await?;
    Ok(web::Json(department.into()))
}

/// Delete a department that has no employees.
#[utoipa::path(
    delete,
    path = "/api/v1/departments/{id}",
    params(("id" = Uuid, Path, description = "Department id")),
    responses(
        (status = 200, description = "Department removed", body = RemovalResponse),
        (status = 400, description = "Department still has employees", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Department not found", body = ErrorSchema)
    ),
    tags = ["departments"],
    operation_id = "deleteDepartment"
)]
#[delete("/departments/{id}")]
pub async fn delete_department(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RemovalResponse>> {
    session.require_role(&[Role::Admin])?;
    let id = department_id(&path)?;
    state.departments.delete_department(&id).await?;
    Ok(web::Json(RemovalResponse::new("Department removed")))
}

#[cfg(test)]
#[path = "departments_tests.rs"]
mod tests;
