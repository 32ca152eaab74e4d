//! Tests for the in-memory adapters.

use chrono::{Duration, TimeZone, Utc};

use super::*;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
        + Duration::minutes(minutes)
}

fn company(name: &str, minutes: i64) -> Company {
    Company::new(CompanyId::random(), name, at(minutes)).expect("valid company")
}

#[tokio::test]
async fn create_rejects_duplicate_company_name() {
    let roster = InMemoryRoster::new();
    roster
        .companies
        .create(&company("Acme", 0))
        .await
        .expect("first create");

    let error = roster
        .companies
        .create(&company("Acme", 1))
        .await
        .expect_err("duplicate");

    assert_eq!(error, CompanyRepositoryError::duplicate_name("Acme"));
}

#[tokio::test]
async fn save_allows_keeping_own_name() {
    let repo = InMemoryCompanyRepository::default();
    let mut acme = company("Acme", 0);
    repo.create(&acme).await.expect("create");
    acme.touch(at(5));

    repo.save(&acme).await.expect("save with same name");
    let stored = repo
        .find_by_id(&acme.id())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.updated_at(), at(5));
}

#[tokio::test]
async fn save_of_missing_record_fails() {
    let repo = InMemoryCompanyRepository::default();
    let error = repo
        .save(&company("Ghost", 0))
        .await
        .expect_err("missing record");

    assert!(matches!(error, CompanyRepositoryError::Query { .. }));
}

#[tokio::test]
async fn find_all_returns_oldest_first() {
    let repo = InMemoryCompanyRepository::default();
    for (name, minutes) in [("Later", 10), ("Earliest", 0), ("Middle", 5)] {
        repo.create(&company(name, minutes)).await.expect("create");
    }

    let names: Vec<String> = repo
        .find_all()
        .await
        .expect("list")
        .iter()
        .map(|c| c.name().to_owned())
        .collect();
    assert_eq!(names, ["Earliest", "Middle", "Later"]);
}

#[tokio::test]
async fn resolver_sees_shared_tables_and_omits_missing() {
    let roster = InMemoryRoster::new();
    let acme = company("Acme", 0);
    roster.companies.create(&acme).await.expect("create");
    let engineering = Department::new(DepartmentId::random(), acme.id(), "Engineering", at(1))
        .expect("valid department");
    roster
        .departments
        .create(&engineering)
        .await
        .expect("create department");

    let companies = roster
        .references
        .company_names(&[acme.id(), CompanyId::random()])
        .await
        .expect("resolve");
    let departments = roster
        .references
        .department_names(&[engineering.id()])
        .await
        .expect("resolve");

    assert_eq!(companies.len(), 1);
    assert_eq!(companies.get(&acme.id()).map(String::as_str), Some("Acme"));
    assert_eq!(
        departments.get(&engineering.id()).map(String::as_str),
        Some("Engineering")
    );
}

#[tokio::test]
async fn delete_one_reports_absence() {
    let repo = InMemoryEmployeeRepository::default();
    assert!(!repo.delete_one(&EmployeeId::random()).await.expect("delete"));
}
