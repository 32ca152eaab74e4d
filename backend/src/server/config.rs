//! Layered application settings and the server configuration built from them.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use roster_backend::domain::Role;
use roster_backend::inbound::http::session_config::{
    BuildMode, COOKIE_SECURE_SETTING, SessionConfigError, SessionToggles, session_settings,
};
use roster_backend::outbound::identity::StaticAccount;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const COOKIE_SECURE_EXPECTED: &str = "true|false";

/// Settings loaded from `ROSTER_*` environment variables, CLI flags and the
/// optional config file.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ROSTER")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub manager_username: Option<String>,
    pub manager_password: Option<String>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// `true` or `false`; unset leaves the choice to the build mode.
    pub session_cookie_secure: Option<String>,
    /// `Strict`, `Lax` or `None`.
    pub session_same_site: Option<String>,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
}

impl std::fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppSettings")
            .field("bind_addr", &self.bind_addr)
            .field("admin_username", &self.admin_username)
            .field("manager_username", &self.manager_username)
            .field("session_key_file", &self.session_key_file)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("session_same_site", &self.session_same_site)
            .field("session_allow_ephemeral", &self.session_allow_ephemeral)
            .finish_non_exhaustive()
    }
}

/// Reasons the server refuses to start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Session(#[from] SessionConfigError),
    #[error("no login accounts configured; set ROSTER_ADMIN_USERNAME and ROSTER_ADMIN_PASSWORD")]
    NoAccounts,
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, StartupError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| StartupError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    fn session_toggles(&self) -> Result<SessionToggles, StartupError> {
        let cookie_secure = self
            .session_cookie_secure
            .as_deref()
            .map(parse_cookie_secure)
            .transpose()?;
        Ok(SessionToggles {
            key_file: self.session_key_file.clone(),
            cookie_secure,
            same_site: self.session_same_site.clone(),
            allow_ephemeral: self.session_allow_ephemeral,
        })
    }

    /// Accounts for every role whose username and password are both set.
    ///
    /// Debug builds fall back to development credentials when nothing is
    /// configured.
    pub fn accounts(&self, mode: BuildMode) -> Result<Vec<StaticAccount>, StartupError> {
        let configured: Vec<StaticAccount> = [
            (&self.admin_username, &self.admin_password, Role::Admin),
            (&self.manager_username, &self.manager_password, Role::Manager),
        ]
        .into_iter()
        .filter_map(|(username, password, role)| match (username, password) {
            (Some(username), Some(password)) => {
                Some(StaticAccount::new(username.as_str(), password.as_str(), role))
            }
            _ => None,
        })
        .collect();

        if !configured.is_empty() {
            return Ok(configured);
        }
        if mode == BuildMode::Release {
            return Err(StartupError::NoAccounts);
        }
        warn!("no login accounts configured; using development credentials");
        Ok(vec![
            StaticAccount::new("admin", "admin", Role::Admin),
            StaticAccount::new("manager", "manager", Role::Manager),
        ])
    }
}

fn parse_cookie_secure(value: &str) -> Result<bool, SessionConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SessionConfigError::InvalidSetting {
            name: COOKIE_SECURE_SETTING,
            value: value.to_owned(),
            expected: COOKIE_SECURE_EXPECTED,
        }),
    }
}

/// Everything needed to construct the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) accounts: Vec<StaticAccount>,
}

impl ServerConfig {
    /// Validate `settings` for the given build mode.
    pub fn from_settings(settings: &AppSettings, mode: BuildMode) -> Result<Self, StartupError> {
        let session = session_settings(&settings.session_toggles()?, mode)?;
        Ok(Self {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            bind_addr: settings.bind_addr()?,
            accounts: settings.accounts(mode)?,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
