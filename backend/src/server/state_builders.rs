//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use roster_backend::inbound::http::state::HttpState;
use roster_backend::outbound::identity::StaticLoginService;
use roster_backend::outbound::memory::InMemoryRoster;

use super::ServerConfig;

/// Build the HTTP state over an empty in-memory roster and the configured
/// login accounts.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let services = InMemoryRoster::new().into_services(Arc::new(DefaultClock));
    web::Data::new(HttpState {
        login: Arc::new(StaticLoginService::new(config.accounts.clone())),
        companies: services.manager.clone(),
        departments: services.manager.clone(),
        employees: services.manager,
        roster: services.directory,
    })
}
