//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every roster, session and health endpoint together
//! with the schema wrappers from [`crate::inbound::http::schemas`], which keep
//! domain types free of utoipa derives. The document backs Swagger UI in debug
//! builds and the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::auth::{LoginRequest, PrincipalResponse};
use crate::inbound::http::companies::{CompanyBody, CompanyResponse};
use crate::inbound::http::departments::{
    CreateDepartmentBody, DepartmentResponse, UpdateDepartmentBody,
};
use crate::inbound::http::employees::{CreateEmployeeBody, EmployeeResponse, UpdateEmployeeBody};
use crate::inbound::http::removal::RemovalResponse;
use crate::inbound::http::schemas::{EmployeeStatusSchema, ErrorCodeSchema, ErrorSchema};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Roster backend API",
        description = "Company, department and employee records with a hiring workflow."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::companies::update_company,
        crate::inbound::http::companies::delete_company,
        crate::inbound::http::departments::list_departments,
        crate::inbound::http::departments::get_department,
        crate::inbound::http::departments::create_department,
        crate::inbound::http::departments::update_department,
        crate::inbound::http::departments::delete_department,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        EmployeeStatusSchema,
        LoginRequest,
        PrincipalResponse,
        CompanyBody,
        CompanyResponse,
        CreateDepartmentBody,
        UpdateDepartmentBody,
        DepartmentResponse,
        CreateEmployeeBody,
        UpdateEmployeeBody,
        EmployeeResponse,
        RemovalResponse,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "companies", description = "Company records"),
        (name = "departments", description = "Departments within a company"),
        (name = "employees", description = "Employees and the hiring workflow"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
