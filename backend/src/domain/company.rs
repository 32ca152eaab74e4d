//! Company records.
//!
//! A company owns departments and employees by reference only. The two
//! counters mirror the number of live children and are adjusted exclusively
//! by the [`crate::domain::ConsistencyManager`].

use chrono::{DateTime, Utc};

use super::fields::required_text;
use super::{CompanyId, Error};

pub(crate) const COMPANY_NAME_FIELD: &str = "companyName";

/// Top-level organisation record.
///
/// ## Invariants
/// - `name` is trimmed and non-empty.
/// - Counters never go below zero; decrements saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: CompanyId,
    name: String,
    number_of_departments: u32,
    number_of_employees: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Company {
    /// Create a company with both counters at zero.
    pub fn new(id: CompanyId, name: &str, now: DateTime<Utc>) -> Result<Self, Error> {
        Ok(Self {
            id,
            name: required_text(COMPANY_NAME_FIELD, name)?,
            number_of_departments: 0,
            number_of_employees: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record identifier.
    pub fn id(&self) -> CompanyId {
        self.id
    }

    /// Trimmed display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Departments currently counted against this company.
    pub fn number_of_departments(&self) -> u32 {
        self.number_of_departments
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

    /// Whether any department or employee still references this company.
    pub fn has_children(&self) -> bool {
        self.number_of_departments > 0 || self.number_of_employees > 0
    }

    pub(crate) fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<(), Error> {
        self.name = required_text(COMPANY_NAME_FIELD, name)?;
        self.updated_at = now;
        Ok(())
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub(in crate::domain) fn increment_departments(&mut self, now: DateTime<Utc>) {
        self.number_of_departments = self.number_of_departments.saturating_add(1);
        self.updated_at = now;
    }

    pub(in crate::domain) fn decrement_departments(&mut self, now: DateTime<Utc>) {
        self.number_of_departments = self.number_of_departments.saturating_sub(1);
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).single().expect("valid timestamp")
    }

    #[test]
    fn new_company_starts_without_children() {
        let company = Company::new(CompanyId::random(), " Acme ", created()).expect("valid");
        assert_eq!(company.name(), "Acme");
        assert_eq!(company.number_of_departments(), 0);
        assert_eq!(company.number_of_employees(), 0);
        assert!(!company.has_children());
        assert_eq!(company.created_at(), company.updated_at());
    }

    #[test]
    fn decrements_saturate_at_zero() {
        let mut company = Company::new(CompanyId::random(), "Acme", created()).expect("valid");
        company.decrement_departments(created());
        company.decrement_employees(created());
        assert_eq!(company.number_of_departments(), 0);
        assert_eq!(company.number_of_employees(), 0);
    }

    #[test]
    fn counter_changes_refresh_updated_at() {
        let mut company = Company::new(CompanyId::random(), "Acme", created()).expect("valid");
        let later = created() + chrono::TimeDelta::minutes(5);
        company.increment_employees(later);
        assert!(company.has_children());
        assert_eq!(company.updated_at(), later);
    }

    #[test]
    fn rename_rejects_blank_name_and_keeps_existing() {
        let mut company = Company::new(CompanyId::random(), "Acme", created()).expect("valid");
        assert!(company.rename("  ", created()).is_err());
        assert_eq!(company.name(), "Acme");
    }
}
