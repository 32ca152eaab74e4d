//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod companies;
pub mod departments;
pub mod employees;
pub mod error;
pub mod health;
pub mod removal;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod validation;

pub use error::ApiResult;
