//! `LoginService` adapter backed by a fixed list of configured accounts.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::LoginService;
use crate::domain::{Error, LoginCredentials, Principal, Role};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// One configured account.
#[derive(Clone)]
pub struct StaticAccount {
    username: String,
    password: Zeroizing<String>,
    role: Role,
}

impl StaticAccount {
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
            role,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for StaticAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticAccount")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Authenticates against accounts loaded at startup.
#[derive(Debug, Clone)]
pub struct StaticLoginService {
    accounts: Vec<StaticAccount>,
}

impl StaticLoginService {
    /// Adapter accepting exactly the given accounts.
    pub fn new(accounts: Vec<StaticAccount>) -> Self {
        Self { accounts }
    }
}

#[async_trait]
impl LoginService for StaticLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        self.accounts
            .iter()
            .find(|account| {
                account.username == credentials.username()
                    && account.password.as_str() == credentials.password()
            })
            .map(|account| Principal::new(account.username.clone(), account.role))
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ErrorCode;

    #[fixture]
    fn service() -> StaticLoginService {
        StaticLoginService::new(vec![
            StaticAccount::new("admin", "admin-pass", Role::Admin),
            StaticAccount::new("manager", "manager-pass", Role::Manager),
        ])
    }

    #[rstest]
    #[case("admin", "admin-pass", Role::Admin)]
    #[case("manager", "manager-pass", Role::Manager)]
    #[tokio::test]
    async fn matching_credentials_yield_principal(
        service: StaticLoginService,
        #[case] username: &str,
        #[case] password: &str,
        #[case] role: Role,
    ) {
        let credentials =
            LoginCredentials::try_from_parts(username, password).expect("valid credentials");
        let principal = service
            .authenticate(&credentials)
            .await
            .expect("login succeeds");

        assert_eq!(principal.username(), username);
        assert_eq!(principal.role(), role);
    }

    #[rstest]
    #[case("admin", "manager-pass")]
    #[case("nobody", "admin-pass")]
    #[tokio::test]
    async fn mismatched_credentials_are_unauthorized(
        service: StaticLoginService,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let credentials =
            LoginCredentials::try_from_parts(username, password).expect("valid credentials");
        let error = service
            .authenticate(&credentials)
            .await
            .expect_err("login rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn debug_output_hides_password() {
        let account = StaticAccount::new("admin", "hunter2", Role::Admin);
        assert!(!format!("{account:?}").contains("hunter2"));
    }
}
