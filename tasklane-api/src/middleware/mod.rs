/// Middleware modules for the API server
///
/// This module contains custom middleware for:
/// - Request counting for the Prometheus exporter

pub mod metrics;
