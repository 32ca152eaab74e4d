//! Shared field rules for record text inputs.

use serde_json::json;

use super::Error;

/// Trim `value` and reject it when nothing remains.
///
/// `field` is the client-facing field name reported in error details.
pub(crate) fn required_text(field: &'static str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} must not be empty"))
            .with_details(json!({ "field": field, "code": "required" })));
    }
    Ok(trimmed.to_owned())
}

/// Normalise an optional update value.
///
/// Absent and blank values both mean "keep the stored value".
pub(crate) fn provided_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|text| !text.is_empty())
}

/// Like [`provided_text`] but hands back the value untrimmed, for fields
/// whose format check must see exactly what the client sent.
pub(crate) fn provided_value(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
