//! Shared helpers for integration tests.
//!
//! Compiled only with the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::Role;
use crate::inbound::http::state::HttpState;
use crate::outbound::identity::{StaticAccount, StaticLoginService};
use crate::outbound::memory::{InMemoryRoster, InMemoryServices};

/// Clock whose reading only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    pub fn advance_hours(&self, hours: i64) {
        *self.lock_clock() += TimeDelta::hours(hours);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Credentials accepted by [`roster_http_state`] for the admin account.
pub const ADMIN_CREDENTIALS: (&str, &str) = ("admin", "admin-pass");
/// Credentials accepted by [`roster_http_state`] for the manager account.
pub const MANAGER_CREDENTIALS: (&str, &str) = ("manager", "manager-pass");

/// Fresh in-memory services reading time from `clock`.
pub fn roster_services(clock: Arc<dyn Clock>) -> InMemoryServices {
    InMemoryRoster::new().into_services(clock)
}

/// HTTP state over fresh in-memory services with one admin and one manager.
pub fn roster_http_state(clock: Arc<dyn Clock>) -> HttpState {
    let services = roster_services(clock);
    let login_service = StaticLoginService::new(vec![
        StaticAccount::new(ADMIN_CREDENTIALS.0, ADMIN_CREDENTIALS.1, Role::Admin),
        StaticAccount::new(MANAGER_CREDENTIALS.0, MANAGER_CREDENTIALS.1, Role::Manager),
    ]);
    HttpState {
        login: Arc::new(login_service),
        companies: services.manager.clone(),
        departments: services.manager.clone(),
        employees: services.manager,
        roster: services.directory,
    }
}
