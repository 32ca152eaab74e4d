//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A field value violates a record rule.
    #[schema(rename = "validation_error")]
    ValidationError,
    /// Referenced records do not belong together.
    #[schema(rename = "invalid_reference")]
    InvalidReference,
    /// The record state forbids the operation.
    #[schema(rename = "precondition_failed")]
    PreconditionFailed,
    /// The employee status change is not permitted.
    #[schema(rename = "invalid_transition")]
    InvalidTransition,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Company not found")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details such as `field`, `code`, and `value`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::EmployeeStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EmployeeStatus)]
pub enum EmployeeStatusSchema {
    #[schema(rename = "Application Received")]
    ApplicationReceived,
    #[schema(rename = "Interview Scheduled")]
    InterviewScheduled,
    #[schema(rename = "Hired")]
    Hired,
    #[schema(rename = "Not Accepted")]
    NotAccepted,
}

#[cfg(test)]
mod tests {
    use utoipa::PartialSchema;

    use super::*;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_schema_has_expected_name_and_fields() {
        let schema_json = schema_to_json::<ErrorSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        assert!(schema_json.contains("message"));
        assert!(schema_json.contains("traceId"));
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "validation_error",
            "invalid_reference",
            "precondition_failed",
            "invalid_transition",
            "unauthorized",
            "forbidden",
            "not_found",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn status_schema_uses_workflow_labels() {
        let schema_json = schema_to_json::<EmployeeStatusSchema>();
        assert!(schema_json.contains("Application Received"));
        assert!(schema_json.contains("Not Accepted"));
    }
}
