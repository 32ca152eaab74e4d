//! Employee records, contact field validation, and partial updates.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::json;

use super::fields::{provided_text, provided_value, required_text};
use super::{
    CompanyId, DepartmentId, EmployeeId, EmployeeStatus, Error, StatusChange, plan_status_change,
};

pub(crate) const EMPLOYEE_NAME_FIELD: &str = "employeeName";
pub(crate) const EMAIL_FIELD: &str = "email";
pub(crate) const MOBILE_FIELD: &str = "mobileNumber";
pub(crate) const ADDRESS_FIELD: &str = "address";
pub(crate) const DESIGNATION_FIELD: &str = "designation";

const MILLIS_PER_DAY: i64 = 86_400_000;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^(?-u:\w)+([.-]?(?-u:\w)+)*@(?-u:\w)+([.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn mobile_regex() -> &'static Regex {
    static MOBILE_RE: OnceLock<Regex> = OnceLock::new();
    MOBILE_RE.get_or_init(|| {
        Regex::new(r"^[0-9]{10}$")
            .unwrap_or_else(|error| panic!("mobile regex failed to compile: {error}"))
    })
}

fn invalid_field(field: &'static str, code: &'static str, message: &str, value: &str) -> Error {
    Error::validation(message).with_details(json!({
        "field": field,
        "value": value,
        "code": code,
    }))
}

/// Email address in `local@domain.tld` shape.
///
/// Word characters are ASCII only, the final label is two or three
/// characters long, and the value is matched exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address.
    ///
    /// # Examples
    /// ```
    /// use roster_backend::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("ada@example.com").is_ok());
    /// assert!(EmailAddress::new("ada@example").is_err());
    /// ```
    pub fn new(value: &str) -> Result<Self, Error> {
        if email_regex().is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(invalid_field(
                EMAIL_FIELD,
                "invalid_email",
                "email must be a valid email address",
                value,
            ))
        }
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Mobile number of exactly ten ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and wrap a mobile number. Surrounding whitespace is rejected.
    pub fn new(value: &str) -> Result<Self, Error> {
        if mobile_regex().is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(invalid_field(
                MOBILE_FIELD,
                "invalid_mobile_number",
                "mobileNumber must be exactly 10 digits",
                value,
            ))
        }
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Raw employee fields as supplied by a client.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeDetailsDraft<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub mobile_number: &'a str,
    pub address: &'a str,
    pub designation: &'a str,
}

/// Validated employee fields used to create a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    name: String,
    email: EmailAddress,
    mobile_number: MobileNumber,
    address: String,
    designation: String,
}

impl EmployeeDetails {
    /// Validate every field, failing on the first violation.
    pub fn try_from_draft(draft: EmployeeDetailsDraft<'_>) -> Result<Self, Error> {
        Ok(Self {
            name: required_text(EMPLOYEE_NAME_FIELD, draft.name)?,
            email: EmailAddress::new(draft.email)?,
            mobile_number: MobileNumber::new(draft.mobile_number)?,
            address: required_text(ADDRESS_FIELD, draft.address)?,
            designation: required_text(DESIGNATION_FIELD, draft.designation)?,
        })
    }
}

/// Requested changes to an employee record.
///
/// Absent or blank text fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub address: Option<String>,
    pub designation: Option<String>,
    pub status: Option<EmployeeStatus>,
}

/// An employee, applicant, or former applicant.
///
/// ## Invariants
/// - `hired_on` is set exactly once, on the transition into
///   [`EmployeeStatus::Hired`].
/// - `company_id` matched the department's company when the record was
///   created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    company_id: CompanyId,
    department_id: DepartmentId,
    name: String,
    email: EmailAddress,
    mobile_number: MobileNumber,
    address: String,
    designation: String,
    status: EmployeeStatus,
    hired_on: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Employee {
    /// Create a new applicant in [`EmployeeStatus::ApplicationReceived`].
    pub fn new(
        id: EmployeeId,
        company_id: CompanyId,
        department_id: DepartmentId,
        details: EmployeeDetails,
        now: DateTime<Utc>,
    ) -> Self {
        let EmployeeDetails {
            name,
            email,
            mobile_number,
            address,
            designation,
        } = details;
        Self {
            id,
            company_id,
            department_id,
            name,
            email,
            mobile_number,
            address,
            designation,
            status: EmployeeStatus::ApplicationReceived,
            hired_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record identifier.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Owning company.
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Department the employee belongs to.
    pub fn department_id(&self) -> DepartmentId {
        self.department_id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Validated contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Validated ten-digit mobile number.
    pub fn mobile_number(&self) -> &MobileNumber {
        &self.mobile_number
    }

    /// Postal address as entered.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// Job title.
    pub fn designation(&self) -> &str {
        self.designation.as_str()
    }

    /// Current hiring status.
    pub fn status(&self) -> EmployeeStatus {
        self.status
    }

    /// When the employee entered `Hired`, if ever.
    pub fn hired_on(&self) -> Option<DateTime<Utc>> {
        self.hired_on
    }

    /// When the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last saved.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whole days between `now` and `hired_on`, rounded half up.
    ///
    /// Zero unless the employee is currently hired.
    pub fn days_employed(&self, now: DateTime<Utc>) -> i64 {
        match (self.status, self.hired_on) {
            (EmployeeStatus::Hired, Some(hired_on)) => {
                let elapsed = (now - hired_on).num_milliseconds().saturating_abs();
                elapsed.saturating_add(MILLIS_PER_DAY / 2) / MILLIS_PER_DAY
            }
            _ => 0,
        }
    }

    /// Apply `changes` as a single unit.
    ///
    /// Every value is validated before anything is written, so a failure
    /// leaves the record untouched.
    pub(in crate::domain) fn apply_changes(
        &mut self,
        changes: &EmployeeChanges,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, Error> {
        let status_change = plan_status_change(self.status, changes.status)?;
        let email = provided_value(changes.email.as_deref())
            .map(EmailAddress::new)
            .transpose()?;
        let mobile_number = provided_value(changes.mobile_number.as_deref())
            .map(MobileNumber::new)
            .transpose()?;

        if let Some(name) = provided_text(changes.name.as_deref()) {
            name.clone_into(&mut self.name);
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(mobile_number) = mobile_number {
            self.mobile_number = mobile_number;
        }
        if let Some(address) = provided_text(changes.address.as_deref()) {
            address.clone_into(&mut self.address);
        }
        if let Some(designation) = provided_text(changes.designation.as_deref()) {
            designation.clone_into(&mut self.designation);
        }
        if let StatusChange::Transition { to, .. } = status_change {
            self.status = to;
            if status_change.enters_hired() && self.hired_on.is_none() {
                self.hired_on = Some(now);
            }
        }
        self.updated_at = now;
        Ok(status_change)
    }
}
