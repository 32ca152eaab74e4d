//! Department records.

use chrono::{DateTime, Utc};

use super::fields::required_text;
use super::{CompanyId, DepartmentId, Error};

pub(crate) const DEPARTMENT_NAME_FIELD: &str = "departmentName";

/// A department belonging to exactly one company.
///
/// ## Invariants
/// - `company_id` is fixed at creation.
/// - `name` is trimmed and non-empty.
/// - `number_of_employees` saturates at zero and is only adjusted by the
///   [`crate::domain::ConsistencyManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    id: DepartmentId,
    company_id: CompanyId,
    name: String,
    number_of_employees: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Department {
    /// Create an empty department under `company_id`.
    pub fn new(
        id: DepartmentId,
        company_id: CompanyId,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        Ok(Self {
            id,
            company_id,
            name: required_text(DEPARTMENT_NAME_FIELD, name)?,
            number_of_employees: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record identifier.
    pub fn id(&self) -> DepartmentId {
        self.id
    }

    /// Owning company.
    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Employees currently counted against this record.
    pub fn number_of_employees(&self) -> u32 {
        self.number_of_employees
    }

    /// When the record was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last saved.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `company_id` owns this department.
    pub fn belongs_to(&self, company_id: &CompanyId) -> bool {
        self.company_id == *company_id
    }

    pub(crate) fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<(), Error> {
        self.name = required_text(DEPARTMENT_NAME_FIELD, name)?;
        self.updated_at = now;
        Ok(())
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub(in crate::domain) fn increment_employees(&mut self, now: DateTime<Utc>) {
        self.number_of_employees = self.number_of_employees.saturating_add(1);
        self.updated_at = now;
    }

    pub(in crate::domain) fn decrement_employees(&mut self, now: DateTime<Utc>) {
        self.number_of_employees = self.number_of_employees.saturating_sub(1);
        self.updated_at = now;
    }
}
