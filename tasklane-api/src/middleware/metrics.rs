/// Request counting middleware
///
/// Counts every finished request in the `http_requests_total` counter family,
/// labeled by method, route template, and response status. The route template
/// (e.g. `/api/tasks/:id`) comes from Axum's `MatchedPath` so all requests to
/// the same route share one label set; requests that match no route fall back
/// to the raw URI path.

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;

/// Records one `http_requests_total` increment per finished request.
///
/// The method and route template are captured before the request is handed
/// on, because `next.run` consumes it.
pub async fn track_requests(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    state
        .metrics
        .record_request(&method, &endpoint, response.status().as_u16());

    response
}
