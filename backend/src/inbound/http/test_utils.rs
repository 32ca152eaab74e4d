//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;

use crate::domain::ports::LoginService;
use crate::domain::Role;
use crate::inbound::http::auth::{LoginRequest, login, logout};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{companies, departments, employees};
use crate::outbound::identity::{StaticAccount, StaticLoginService};
use crate::outbound::memory::InMemoryRoster;

pub(crate) const ADMIN: (&str, &str) = ("admin", "admin-pass");
pub(crate) const MANAGER: (&str, &str) = ("manager", "manager-pass");

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over a fresh in-memory roster and the given login port.
pub(crate) fn state_with_login(login_port: Arc<dyn LoginService>) -> HttpState {
    let services = InMemoryRoster::new().into_services(Arc::new(DefaultClock));
    HttpState {
        login: login_port,
        companies: services.manager.clone(),
        departments: services.manager.clone(),
        employees: services.manager,
        roster: services.directory,
    }
}

/// HTTP state with one admin and one manager account.
pub(crate) fn roster_state() -> HttpState {
    state_with_login(Arc::new(StaticLoginService::new(vec![
        StaticAccount::new(ADMIN.0, ADMIN.1, Role::Admin),
        StaticAccount::new(MANAGER.0, MANAGER.1, Role::Manager),
    ])))
}

/// App exposing every roster endpoint under `/api/v1` over `state`.
pub(crate) fn roster_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(logout)
                .service(companies::list_companies)
                .service(companies::get_company)
                .service(companies::create_company)
                .service(companies::update_company)
                .service(companies::delete_company)
                .service(departments::list_departments)
                .service(departments::get_department)
                .service(departments::create_department)
                .service(departments::update_department)
                .service(departments::delete_department)
                .service(employees::list_employees)
                .service(employees::get_employee)
                .service(employees::create_employee)
                .service(employees::update_employee)
                .service(employees::delete_employee),
        )
}

pub(crate) async fn login_and_get_cookie(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse,
        Error = actix_web::Error,
    >,
    account: (&str, &str),
) -> Cookie<'static> {
    let login_req = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: account.0.into(),
            password: account.1.into(),
        })
        .to_request();
    let login_res = actix_test::call_service(app, login_req).await;
    assert!(login_res.status().is_success());
    login_res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("session cookie")
        .into_owned()
}
