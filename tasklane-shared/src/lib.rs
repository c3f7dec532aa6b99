//! # Tasklane Shared Library
//!
//! This crate contains the domain types, persistence layer, and business logic
//! used by the Tasklane API server.
//!
//! ## Module Organization
//!
//! - `models`: Domain models and request/response payloads
//! - `repo`: Repository traits plus Postgres and in-memory implementations
//! - `service`: Task lifecycle and authentication services
//! - `metrics`: Prometheus registry and live-task aggregation
//! - `auth`: Password hashing, JWT issuance, and request authentication
//! - `db`: Connection pool, migrations, and demo seed data

pub mod auth;
pub mod db;
pub mod metrics;
pub mod models;
pub mod repo;
pub mod service;

/// Current version of the Tasklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
