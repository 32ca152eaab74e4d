//! Authentication and role primitives.
//!
//! Inbound adapters build [`LoginCredentials`] from request payloads and
//! receive a [`Principal`] from the login port. Role checks live here so they
//! read the same regardless of transport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use super::Error;

/// Raised when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Examples
    /// ```
    /// use roster_backend::domain::LoginCredentials;
    ///
    /// let creds = LoginCredentials::try_from_parts(" admin ", "secret").unwrap();
    /// assert_eq!(creds.username(), "admin");
    /// ```
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username as submitted.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password as submitted; wiped on drop.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Role granted to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    /// Wire label, e.g. `"Admin"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored role label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "Manager" => Ok(Self::Manager),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    username: String,
    role: Role,
}

impl Principal {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    /// Authenticated account name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role granted at login.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Require one of `allowed`, otherwise fail with
    /// [`crate::domain::ErrorCode::Forbidden`].
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), Error> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        Err(
            Error::forbidden(format!("role {} may not perform this action", self.role))
                .with_details(json!({
                    "role": self.role.as_str(),
                    "required": allowed.iter().map(|role| role.as_str()).collect::<Vec<_>>(),
                })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn password_keeps_surrounding_whitespace() {
        let creds = LoginCredentials::try_from_parts("admin", " pw ").expect("valid");
        assert_eq!(creds.password(), " pw ");
    }

    #[rstest]
    #[case(Role::Admin, &[Role::Admin], true)]
    #[case(Role::Manager, &[Role::Admin, Role::Manager], true)]
    #[case(Role::Manager, &[Role::Admin], false)]
    fn role_gate(#[case] role: Role, #[case] allowed: &[Role], #[case] permitted: bool) {
        let principal = Principal::new("someone", role);
        match principal.require_any(allowed) {
            Ok(()) => assert!(permitted),
            Err(err) => {
                assert!(!permitted);
                assert_eq!(err.code(), ErrorCode::Forbidden);
            }
        }
    }

    #[test]
    fn role_labels_parse() {
        assert_eq!("Manager".parse::<Role>(), Ok(Role::Manager));
        assert!("admin".parse::<Role>().is_err());
    }
}
