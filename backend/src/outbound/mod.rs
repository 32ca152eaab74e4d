//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local repositories and the reference resolver
//! - **identity**: credential checks against configured accounts
//!
//! Adapters translate between domain types and storage. They contain no
//! business logic.

pub mod identity;
pub mod memory;
