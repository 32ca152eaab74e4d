//! Company API handlers.
//!
//! ```text
//! GET    /api/v1/companies
//! GET    /api/v1/companies/{id}
//! POST   /api/v1/companies {"companyName":"Acme"}
//! PUT    /api/v1/companies/{id} {"companyName":"Acme Ltd"}
//! DELETE /api/v1/companies/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{CreateCompanyRequest, UpdateCompanyRequest};
use crate::domain::{Company, CompanyId, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::removal::RemovalResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

const COMPANY_ID: FieldName = FieldName::new("id");

/// Body for company create and update.
///
/// On update an absent or blank `companyName` keeps the stored name.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBody {
    #[schema(example = "Acme")]
    pub company_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: Uuid,
    pub company_name: String,
    pub number_of_departments: u32,
    pub number_of_employees: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyResponse {
    fn from(value: Company) -> Self {
        Self {
            id: *value.id().as_uuid(),
            company_name: value.name().to_owned(),
            number_of_departments: value.number_of_departments(),
            number_of_employees: value.number_of_employees(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
        }
    }
}

fn company_id(raw: &str) -> ApiResult<CompanyId> {
    parse_uuid(raw, COMPANY_ID).map(CompanyId::from_uuid)
}

/// List every company, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/companies",
    responses(
        (status = 200, description = "Companies", body = [CompanyResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "listCompanies"
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CompanyResponse>>> {
    session.require_principal()?;
    let companies = state.roster.list_companies().await?;
    Ok(web::Json(
        companies.into_iter().map(CompanyResponse::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Company not found", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "getCompany"
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_principal()?;
    let id = company_id(&path)?;
    let company = state.roster.get_company(&id).await?;
    Ok(web::Json(company.into()))
}

/// Create a company with zeroed counters.
#[utoipa::path(
    post,
    path = "/api/v1/companies",
    request_body = CompanyBody,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Blank or duplicate name", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CompanyBody>,
) -> ApiResult<HttpResponse> {
    session.require_role(&[Role::Admin])?;
    let request = CreateCompanyRequest {
        name: payload.into_inner().company_name.unwrap_or_default(),
    };
    let company = state.companies.create_company(request).await?;
    Ok(HttpResponse::Created().json(CompanyResponse::from(company)))
}

#[utoipa::path(
    put,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company id")),
    request_body = CompanyBody,
    responses(
        (status = 200, description = "Company updated", body = CompanyResponse),
        (status = 400, description = "Malformed id or duplicate name", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Company not found", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "updateCompany"
)]
#[put("/companies/{id}")]
pub async fn update_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CompanyBody>,
) -> ApiResult<web::Json<CompanyResponse>> {
    session.require_role(&[Role::Admin])?;
    let request = UpdateCompanyRequest {
        company_id: company_id(&path)?,
        name: payload.into_inner().company_name,
    };
    let company = state.companies.update_company(request).await?;
    Ok(web::Json(company.into()))
}

/// Delete a company that has no departments or employees.
#[utoipa::path(
    delete,
    path = "/api/v1/companies/{id}",
    params(("id" = Uuid, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company removed", body = RemovalResponse),
        (status = 400, description = "Company still has children", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Company not found", body = ErrorSchema)
    ),
    tags = ["companies"],
    operation_id = "deleteCompany"
)]
#[delete("/companies/{id}")]
pub async fn delete_company(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RemovalResponse>> {
    session.require_role(&[Role::Admin])?;
    let id = company_id(&path)?;
    state.companies.delete_company(&id).await?;
    Ok(web::Json(RemovalResponse::new("Company removed")))
}

#[cfg(test)]
#[path = "companies_tests.rs"]
mod tests;
