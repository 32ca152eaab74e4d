//! Session cookie settings validation.
//!
//! Raw toggles arrive from layered configuration; this module turns them into
//! a signing key and cookie policy, applying stricter rules in release builds.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
/// Environment variable naming the cookie `Secure` toggle.
pub const COOKIE_SECURE_SETTING: &str = "ROSTER_SESSION_COOKIE_SECURE";
const SAME_SITE_SETTING: &str = "ROSTER_SESSION_SAME_SITE";
const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use roster_backend::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Unvalidated session toggles as loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct SessionToggles {
    pub key_file: Option<PathBuf>,
    pub cookie_secure: Option<bool>,
    pub same_site: Option<String>,
    pub allow_ephemeral: bool,
}

/// Session settings derived from configuration toggles.
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// Configured `SameSite` policy for session cookies.
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required setting: {name}")]
    MissingSetting { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("ROSTER_SESSION_SAME_SITE=None requires ROSTER_SESSION_COOKIE_SECURE=true")]
    InsecureSameSiteNone,
}

/// Validate `toggles` for the given build mode.
///
/// # Examples
///
/// ```rust
/// use roster_backend::inbound::http::session_config::{
///     BuildMode, SessionToggles, session_settings,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("roster_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let toggles = SessionToggles {
///     key_file: Some(key_path.clone()),
///     cookie_secure: Some(true),
///     same_site: Some("Strict".to_owned()),
///     allow_ephemeral: false,
/// };
/// let settings = session_settings(&toggles, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
///
/// std::fs::remove_file(&key_path)?;
/// # Ok(())
/// # }
/// ```
pub fn session_settings(
    toggles: &SessionToggles,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = cookie_secure(toggles.cookie_secure, mode)?;
    let same_site = same_site(toggles.same_site.as_deref(), mode, cookie_secure)?;
    let key = session_key(toggles.key_file.as_ref(), mode, toggles.allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn cookie_secure(value: Option<bool>, mode: BuildMode) -> Result<bool, SessionConfigError> {
    match value {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!("{COOKIE_SECURE_SETTING} not set; defaulting to secure");
            Ok(true)
        }
        None => Err(SessionConfigError::MissingSetting {
            name: COOKIE_SECURE_SETTING,
        }),
    }
}

fn same_site(
    value: Option<&str>,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };

    let Some(value) = value else {
        if mode.is_debug() {
            warn!("{SAME_SITE_SETTING} not set; using default");
            return Ok(default_same_site);
        }
        return Err(SessionConfigError::MissingSetting {
            name: SAME_SITE_SETTING,
        });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SameSite=None without Secure; browsers may reject the session cookie");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(value, "invalid {SAME_SITE_SETTING}, using default");
            Ok(default_same_site)
        }
        _ => Err(SessionConfigError::InvalidSetting {
            name: SAME_SITE_SETTING,
            value: value.to_owned(),
            expected: SAME_SITE_EXPECTED,
        }),
    }
}

fn session_key(
    key_file: Option<&PathBuf>,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = key_file
        .cloned()
        .unwrap_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH));

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    use super::*;

    #[fixture]
    fn key_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp key file");
        file.write_all(&[b'a'; SESSION_KEY_MIN_LEN])
            .expect("write key bytes");
        file
    }

    fn release_toggles(key_file: &NamedTempFile) -> SessionToggles {
        SessionToggles {
            key_file: Some(key_file.path().to_path_buf()),
            cookie_secure: Some(true),
            same_site: Some("Strict".to_owned()),
            allow_ephemeral: false,
        }
    }

    // Returns the error, panicking on success since `SessionSettings` is not `Debug`.
    fn expect_error(result: Result<SessionSettings, SessionConfigError>) -> SessionConfigError {
        match result {
            Ok(_) => panic!("expected session settings to be rejected"),
            Err(error) => error,
        }
    }

    #[rstest]
    fn release_accepts_explicit_toggles(key_file: NamedTempFile) {
        let settings =
            session_settings(&release_toggles(&key_file), BuildMode::Release).expect("valid");

        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    fn release_requires_cookie_secure(key_file: NamedTempFile) {
        let toggles = SessionToggles {
            cookie_secure: None,
            ..release_toggles(&key_file)
        };

        let err = expect_error(session_settings(&toggles, BuildMode::Release));
        assert!(matches!(
            err,
            SessionConfigError::MissingSetting {
                name: COOKIE_SECURE_SETTING
            }
        ));
    }

    #[rstest]
    #[case::missing(None)]
    #[case::garbage(Some("sometimes"))]
    fn debug_falls_back_to_lax(key_file: NamedTempFile, #[case] value: Option<&str>) {
        let toggles = SessionToggles {
            same_site: value.map(str::to_owned),
            ..release_toggles(&key_file)
        };

        let settings = session_settings(&toggles, BuildMode::Debug).expect("debug tolerates");
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    fn release_rejects_invalid_same_site(key_file: NamedTempFile) {
        let toggles = SessionToggles {
            same_site: Some("sometimes".to_owned()),
            ..release_toggles(&key_file)
        };

        let err = expect_error(session_settings(&toggles, BuildMode::Release));
        assert!(matches!(err, SessionConfigError::InvalidSetting { .. }));
    }

    #[rstest]
    fn release_rejects_same_site_none_without_secure(key_file: NamedTempFile) {
        let toggles = SessionToggles {
            cookie_secure: Some(false),
            same_site: Some("None".to_owned()),
            ..release_toggles(&key_file)
        };

        let err = expect_error(session_settings(&toggles, BuildMode::Release));
        assert!(matches!(err, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_rejects_short_key() {
        let mut short = NamedTempFile::new().expect("temp key file");
        short.write_all(b"short").expect("write key bytes");

        let err = expect_error(session_settings(&release_toggles(&short), BuildMode::Release));
        assert!(matches!(err, SessionConfigError::KeyTooShort { length: 5, .. }));
    }

    #[rstest]
    #[case::refused(false, true)]
    #[case::ephemeral(true, false)]
    fn release_missing_key_depends_on_ephemeral_toggle(
        key_file: NamedTempFile,
        #[case] allow_ephemeral: bool,
        #[case] rejected: bool,
    ) {
        let missing = key_file.path().with_extension("absent");
        let toggles = SessionToggles {
            key_file: Some(missing),
            allow_ephemeral,
            ..release_toggles(&key_file)
        };

        let result = session_settings(&toggles, BuildMode::Release);
        assert_eq!(
            matches!(result, Err(SessionConfigError::KeyRead { .. })),
            rejected
        );
    }
}
