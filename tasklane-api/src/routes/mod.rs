/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `metrics`: Prometheus text exposition
/// - `auth`: Authentication endpoints (register, login)
/// - `tasks`: Task lifecycle endpoints
/// - `users`: User read endpoints

pub mod health;
pub mod metrics;
pub mod auth;
pub mod tasks;
pub mod users;
