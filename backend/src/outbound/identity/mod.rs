//! Identity adapters implementing [`crate::domain::ports::LoginService`].

mod static_login_service;

pub use static_login_service::{StaticAccount, StaticLoginService};
