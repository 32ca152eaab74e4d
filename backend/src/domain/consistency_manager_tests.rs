//! Tests for counter maintenance and delete protection.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCompanyRepository, MockDepartmentRepository, MockEmployeeRepository};
use crate::domain::{EmployeeChanges, EmployeeDetails, EmployeeDetailsDraft, EmployeeStatus, ErrorCode};

fn fixed_clock(now: DateTime<Utc>) -> MockClock {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    clock
}

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn manager(
    companies: MockCompanyRepository,
    departments: MockDepartmentRepository,
    employees: MockEmployeeRepository,
    now: DateTime<Utc>,
) -> ConsistencyManager<MockCompanyRepository, MockDepartmentRepository, MockEmployeeRepository>
{
    ConsistencyManager::new(
        Arc::new(companies),
        Arc::new(departments),
        Arc::new(employees),
        Arc::new(fixed_clock(now)),
    )
}

fn company(now: DateTime<Utc>) -> Company {
    Company::new(CompanyId::random(), "Acme", now).expect("valid company")
}

fn department(company_id: CompanyId, now: DateTime<Utc>) -> Department {
    Department::new(DepartmentId::random(), company_id, "Engineering", now)
        .expect("valid department")
}

fn details() -> EmployeeDetails {
    EmployeeDetails::try_from_draft(EmployeeDetailsDraft {
        name: "Ada",
        email: "ada@acme.com",
        mobile_number: "0123456789",
        address: "1 Main St",
        designation: "Engineer",
    })
    .expect("valid details")
}

fn query_failure() -> CompanyRepositoryError {
    CompanyRepositoryError::query("write rejected")
}

#[rstest]
#[tokio::test]
async fn create_company_persists_zeroed_counters(now: DateTime<Utc>) {
    let mut companies = MockCompanyRepository::new();
    companies.expect_create().times(1).return_once(|_| Ok(()));

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    let created = service
        .create_company(CreateCompanyRequest {
            name: "  Acme ".to_owned(),
        })
        .await
        .expect("company created");

    assert_eq!(created.name(), "Acme");
    assert_eq!(created.number_of_departments(), 0);
    assert_eq!(created.number_of_employees(), 0);
    assert_eq!(created.created_at(), now);
}

#[rstest]
#[tokio::test]
async fn create_company_maps_duplicate_name_to_validation(now: DateTime<Utc>) {
    let mut companies = MockCompanyRepository::new();
    companies
        .expect_create()
        .return_once(|_| Err(CompanyRepositoryError::duplicate_name("Acme")));

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    let error = service
        .create_company(CreateCompanyRequest {
            name: "Acme".to_owned(),
        })
        .await
        .expect_err("duplicate rejected");

    assert_eq!(error.code(), ErrorCode::ValidationError);
    let details = error.details().expect("details present");
    assert_eq!(details["code"], "duplicate");
}

#[rstest]
#[tokio::test]
async fn create_department_increments_company(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .withf(|saved| saved.number_of_departments() == 1)
        .times(1)
        .return_once(|_| Ok(()));
    let mut departments = MockDepartmentRepository::new();
    departments.expect_create().times(1).return_once(|_| Ok(()));

    let service = manager(companies, departments, MockEmployeeRepository::new(), now);
    let created = service
        .create_department(CreateDepartmentRequest {
            company_id,
            name: "Engineering".to_owned(),
        })
        .await
        .expect("department created");

    assert_eq!(created.company_id(), company_id);
    assert_eq!(created.number_of_employees(), 0);
}

#[rstest]
#[tokio::test]
async fn create_department_for_missing_company_is_not_found(now: DateTime<Utc>) {
    let mut companies = MockCompanyRepository::new();
    companies.expect_find_by_id().return_once(|_| Ok(None));
    let mut departments = MockDepartmentRepository::new();
    departments.expect_create().times(0);

    let service = manager(companies, departments, MockEmployeeRepository::new(), now);
    let error = service
        .create_department(CreateDepartmentRequest {
            company_id: CompanyId::random(),
            name: "Engineering".to_owned(),
        })
        .await
        .expect_err("missing company");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), COMPANY_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn create_department_rolls_back_when_counter_write_fails(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .return_once(|_| Err(query_failure()));
    let mut departments = MockDepartmentRepository::new();
    departments.expect_create().return_once(|_| Ok(()));
    departments
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(companies, departments, MockEmployeeRepository::new(), now);
    let error = service
        .create_department(CreateDepartmentRequest {
            company_id,
            name: "Engineering".to_owned(),
        })
        .await
        .expect_err("counter write failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn create_employee_increments_both_counters(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();
    let dept = department(company_id, now);
    let department_id = dept.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 1)
        .times(1)
        .return_once(|_| Ok(()));
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 1)
        .times(1)
        .return_once(|_| Ok(()));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(1).return_once(|_| Ok(()));

    let service = manager(companies, departments, employees, now);
    let created = service
        .create_employee(CreateEmployeeRequest {
            company_id,
            department_id,
            details: details(),
        })
        .await
        .expect("employee created");

    assert_eq!(created.status(), EmployeeStatus::ApplicationReceived);
    assert_eq!(created.hired_on(), None);
}

#[rstest]
#[tokio::test]
async fn create_employee_rejects_department_from_other_company(now: DateTime<Utc>) {
    let dept = department(CompanyId::random(), now);
    let department_id = dept.id();

    let mut companies = MockCompanyRepository::new();
    companies.expect_find_by_id().times(0);
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(0);

    let service = manager(companies, departments, employees, now);
    let error = service
        .create_employee(CreateEmployeeRequest {
            company_id: CompanyId::random(),
            department_id,
            details: details(),
        })
        .await
        .expect_err("mismatched company");

    assert_eq!(error.code(), ErrorCode::InvalidReference);
}

#[rstest]
#[tokio::test]
async fn create_employee_undoes_department_bump_when_company_write_fails(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();
    let dept = department(company_id, now);
    let department_id = dept.id();
    let mut reloaded = dept.clone();
    reloaded.increment_employees(now);

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .return_once(|_| Err(query_failure()));

    let mut departments = MockDepartmentRepository::new();
    let mut lookups = vec![Some(reloaded), Some(dept)];
    departments
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(lookups.pop().flatten()));
    let mut seq = mockall::Sequence::new();
    departments
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 1)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));
    departments
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 0)
        .times(1)
        .in_sequence(&mut seq)
        .return_once(|_| Ok(()));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().return_once(|_| Ok(()));
    employees
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(companies, departments, employees, now);
    let error = service
        .create_employee(CreateEmployeeRequest {
            company_id,
            department_id,
            details: details(),
        })
        .await
        .expect_err("company write failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn create_employee_is_discarded_when_department_write_fails(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();
    let dept = department(company_id, now);
    let department_id = dept.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies.expect_save().times(0);
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments
        .expect_save()
        .times(1)
        .return_once(|_| Err(DepartmentRepositoryError::connection("store offline")));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().times(1).return_once(|_| Ok(()));
    employees
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(companies, departments, employees, now);
    let error = service
        .create_employee(CreateEmployeeRequest {
            company_id,
            department_id,
            details: details(),
        })
        .await
        .expect_err("department write failed");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_employee_skips_missing_company(now: DateTime<Utc>) {
    let company_id = CompanyId::random();
    let dept = department(company_id, now);
    let department_id = dept.id();

    let mut companies = MockCompanyRepository::new();
    companies.expect_find_by_id().return_once(|_| Ok(None));
    companies.expect_save().times(0);
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments.expect_save().times(1).return_once(|_| Ok(()));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_create().return_once(|_| Ok(()));

    let service = manager(companies, departments, employees, now);
    service
        .create_employee(CreateEmployeeRequest {
            company_id,
            department_id,
            details: details(),
        })
        .await
        .expect("employee created without company counter");
}

#[rstest]
#[case::departments(1, 0)]
#[case::employees(0, 1)]
#[tokio::test]
async fn delete_company_refuses_while_children_exist(
    now: DateTime<Utc>,
    #[case] departments: u32,
    #[case] employees: u32,
) {
    let mut parent = company(now);
    for _ in 0..departments {
        parent.increment_departments(now);
    }
    for _ in 0..employees {
        parent.increment_employees(now);
    }
    let company_id = parent.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies.expect_delete_one().times(0);

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    let error = service
        .delete_company(&company_id)
        .await
        .expect_err("children block delete");

    assert_eq!(error.code(), ErrorCode::PreconditionFailed);
}

#[rstest]
#[tokio::test]
async fn delete_company_without_children_succeeds(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    service
        .delete_company(&company_id)
        .await
        .expect("company deleted");
}

#[rstest]
#[tokio::test]
async fn delete_department_with_employees_is_refused(now: DateTime<Utc>) {
    let mut dept = department(CompanyId::random(), now);
    dept.increment_employees(now);
    let department_id = dept.id();

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments.expect_delete_one().times(0);

    let service = manager(
        MockCompanyRepository::new(),
        departments,
        MockEmployeeRepository::new(),
        now,
    );
    let error = service
        .delete_department(&department_id)
        .await
        .expect_err("employees block delete");

    assert_eq!(error.code(), ErrorCode::PreconditionFailed);
    assert_eq!(
        error.message(),
        "Cannot delete department with active employees"
    );
}

#[rstest]
#[tokio::test]
async fn delete_department_ignores_company_release_failure(now: DateTime<Utc>) {
    let mut parent = company(now);
    parent.increment_departments(now);
    let dept = department(parent.id(), now);
    let department_id = dept.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .withf(|saved| saved.number_of_departments() == 0)
        .times(1)
        .return_once(|_| Err(query_failure()));
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(companies, departments, MockEmployeeRepository::new(), now);
    service
        .delete_department(&department_id)
        .await
        .expect("delete succeeds despite counter failure");
}

#[rstest]
#[tokio::test]
async fn delete_employee_releases_both_counters(now: DateTime<Utc>) {
    let mut parent = company(now);
    parent.increment_employees(now);
    let mut dept = department(parent.id(), now);
    dept.increment_employees(now);
    let employee = Employee::new(EmployeeId::random(), parent.id(), dept.id(), details(), now);
    let employee_id = employee.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 0)
        .times(1)
        .return_once(|_| Ok(()));
    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(dept)));
    departments
        .expect_save()
        .withf(|saved| saved.number_of_employees() == 0)
        .times(1)
        .return_once(|_| Ok(()));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(employee)));
    employees
        .expect_delete_one()
        .times(1)
        .return_once(|_| Ok(true));

    let service = manager(companies, departments, employees, now);
    service
        .delete_employee(&employee_id)
        .await
        .expect("employee deleted");
}

#[rstest]
#[tokio::test]
async fn update_employee_rejects_disallowed_transition(now: DateTime<Utc>) {
    let employee = Employee::new(
        EmployeeId::random(),
        CompanyId::random(),
        DepartmentId::random(),
        details(),
        now,
    );
    let employee_id = employee.id();

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(employee)));
    employees.expect_save().times(0);

    let service = manager(
        MockCompanyRepository::new(),
        MockDepartmentRepository::new(),
        employees,
        now,
    );
    let error = service
        .update_employee(UpdateEmployeeRequest {
            employee_id,
            changes: EmployeeChanges {
                status: Some(EmployeeStatus::Hired),
                ..EmployeeChanges::default()
            },
        })
        .await
        .expect_err("cannot hire straight from application");

    assert_eq!(error.code(), ErrorCode::InvalidTransition);
}

#[rstest]
#[tokio::test]
async fn update_employee_stamps_hire_date(now: DateTime<Utc>) {
    let employee = Employee::new(
        EmployeeId::random(),
        CompanyId::random(),
        DepartmentId::random(),
        details(),
        now,
    );
    let employee_id = employee.id();
    let mut scheduled = employee.clone();
    scheduled
        .apply_changes(
            &EmployeeChanges {
                status: Some(EmployeeStatus::InterviewScheduled),
                ..EmployeeChanges::default()
            },
            now,
        )
        .expect("schedule interview");

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(scheduled)));
    employees
        .expect_save()
        .withf(|saved| saved.status() == EmployeeStatus::Hired && saved.hired_on().is_some())
        .times(1)
        .return_once(|_| Ok(()));

    let service = manager(
        MockCompanyRepository::new(),
        MockDepartmentRepository::new(),
        employees,
        now,
    );
    let hired = service
        .update_employee(UpdateEmployeeRequest {
            employee_id,
            changes: EmployeeChanges {
                status: Some(EmployeeStatus::Hired),
                ..EmployeeChanges::default()
            },
        })
        .await
        .expect("hire succeeds");

    assert_eq!(hired.hired_on(), Some(now));
}

#[rstest]
#[tokio::test]
async fn update_company_with_blank_name_keeps_stored_name(now: DateTime<Utc>) {
    let parent = company(now);
    let company_id = parent.id();

    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(parent)));
    companies
        .expect_save()
        .withf(|saved| saved.name() == "Acme")
        .times(1)
        .return_once(|_| Ok(()));

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    let updated = service
        .update_company(UpdateCompanyRequest {
            company_id,
            name: Some("   ".to_owned()),
        })
        .await
        .expect("update succeeds");

    assert_eq!(updated.name(), "Acme");
}

#[rstest]
#[tokio::test]
async fn connection_failures_map_to_service_unavailable(now: DateTime<Utc>) {
    let mut companies = MockCompanyRepository::new();
    companies
        .expect_find_by_id()
        .return_once(|_| Err(CompanyRepositoryError::connection("refused")));

    let service = manager(
        companies,
        MockDepartmentRepository::new(),
        MockEmployeeRepository::new(),
        now,
    );
    let error = service
        .delete_company(&CompanyId::random())
        .await
        .expect_err("store unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
