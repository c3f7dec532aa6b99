/// Request extractors with enveloped rejections
///
/// Axum's stock `Json` and `Query` extractors reject malformed input with
/// plain-text bodies. These wrappers catch those rejections and convert them
/// into [`ApiError::BadRequest`], so a request with broken JSON or a
/// non-numeric `page` parameter gets the same `{"success": false, ...}`
/// envelope as every other failure.
///
/// # Example
///
/// ```no_run
/// use tasklane_api::extract::ApiJson;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CreateThing {
///     name: String,
/// }
///
/// async fn create(ApiJson(input): ApiJson<CreateThing>) -> String {
///     input.name
/// }
/// ```

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};

use crate::error::ApiError;

/// JSON body extractor that rejects with the standard envelope
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Query string extractor that rejects with the standard envelope
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Path parameter extractor that rejects with the standard envelope
///
/// Covers non-numeric ids in routes like `/api/tasks/:id`.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Payload {
        title: String,
    }

    #[derive(Debug, Deserialize)]
    struct Params {
        page: Option<i64>,
    }

    async fn echo_title(ApiJson(payload): ApiJson<Payload>) -> String {
        payload.title
    }

    async fn echo_page(ApiQuery(params): ApiQuery<Params>) -> String {
        params.page.unwrap_or(1).to_string()
    }

    async fn echo_id(ApiPath(id): ApiPath<i64>) -> String {
        id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/json", post(echo_title))
            .route("/query", get(echo_page))
            .route("/path/:id", get(echo_id))
    }

    #[tokio::test]
    async fn test_malformed_json_is_enveloped_400() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/json")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("Should build request");

        let response = app().oneshot(request).await.expect("Should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("Should parse");
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_valid_json_passes_through() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/json")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "hello"}"#))
            .expect("Should build request");

        let response = app().oneshot(request).await.expect("Should respond");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_query_is_enveloped_400() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/query?page=abc")
            .body(Body::empty())
            .expect("Should build request");

        let response = app().oneshot(request).await.expect("Should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("Should parse");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_non_numeric_path_is_enveloped_400() {
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/path/abc")
            .body(Body::empty())
            .expect("Should build request");

        let response = app().oneshot(request).await.expect("Should respond");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Should read body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("Should parse");
        assert_eq!(json["success"], false);
    }
}
