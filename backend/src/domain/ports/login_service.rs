//! Driving port for login use-cases.
//!
//! Inbound adapters authenticate credentials through this port without
//! knowing where accounts are kept, so handler tests can swap in a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal};

/// Authenticate a caller and report the role they act under.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}
