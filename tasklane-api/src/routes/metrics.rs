/// Prometheus metrics endpoint
///
/// Renders the shared registry in the text exposition format. Scrapers do
/// not authenticate, so the endpoint sits outside the JWT layer next to
/// `/health`.
///
/// # Endpoint
///
/// ```text
/// GET /metrics
/// ```
///
/// # Response
///
/// ```text
/// # HELP tasks_active_total Number of live tasks by status and priority
/// # TYPE tasks_active_total gauge
/// tasks_active_total{priority="high",status="pending"} 2
/// ...
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, http::header, response::IntoResponse};

/// Metrics exposition handler
pub async fn export_metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let body = state.metrics.render()?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
