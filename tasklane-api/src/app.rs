/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasklane_api::{app::AppState, config::Config};
/// use tasklane_shared::db::pool::{create_pool, DatabaseConfig};
/// use tasklane_shared::repo::PgRepository;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     max_connections: config.database.max_connections,
///     ..Default::default()
/// })
/// .await?;
///
/// let repo = Arc::new(PgRepository::new(pool));
/// let state = AppState::new(repo.clone(), repo, config)?;
/// let app = tasklane_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tasklane_shared::{
    auth::middleware::create_jwt_middleware,
    metrics::{MetricsError, TaskMetrics},
    repo::{TaskRepository, UserRepository},
    service::{AuthService, TaskService},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// User storage, for handlers that read users directly
    pub users: Arc<dyn UserRepository>,

    /// Task lifecycle service
    pub tasks: Arc<TaskService>,

    /// Registration and login service
    pub auth: Arc<AuthService>,

    /// Prometheus registry shared by the services and the exporter
    pub metrics: Arc<TaskMetrics>,
}

impl AppState {
    /// Creates new application state over the given repositories
    ///
    /// The same repositories back both services, so anything seeded through
    /// them before this call is visible to every handler.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError` if the Prometheus collectors cannot be
    /// registered.
    pub fn new(
        users: Arc<dyn UserRepository>,
        tasks: Arc<dyn TaskRepository>,
        config: Config,
    ) -> Result<Self, MetricsError> {
        let metrics = Arc::new(TaskMetrics::new()?);
        let task_service = Arc::new(TaskService::new(tasks, users.clone(), metrics.clone()));
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            config.jwt.secret.clone(),
            config.jwt.expiration_hours,
        ));

        Ok(Self {
            config: Arc::new(config),
            users,
            tasks: task_service,
            auth: auth_service,
            metrics,
        })
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /metrics                  # Prometheus exposition (public)
/// └── /api/
///     ├── /auth/                # Authentication endpoints (public)
///     │   ├── POST /register
///     │   └── POST /login
///     ├── /tasks/               # Task endpoints (JWT required)
///     │   ├── GET    /          # List tasks (paginated)
///     │   ├── POST   /          # Create task
///     │   ├── GET    /:id       # Get task with creator/assignee
///     │   ├── PUT    /:id       # Update task
///     │   └── DELETE /:id       # Soft-delete task
///     └── /users/               # User endpoints (JWT required)
///         ├── GET /             # List users
///         └── GET /:id          # Get user
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Request counting for `http_requests_total`
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Response compression
/// 5. Authentication (protected routes only)
pub fn build_router(state: AppState) -> Router {
    // Import route handlers
    use crate::routes;

    // Health and metrics (public, no auth)
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::export_metrics));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Task and user routes (require JWT authentication). Flat paths keep the
    // route templates clean for the `endpoint` metrics label.
    let protected_routes = Router::new()
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/users", get(routes::users::list_users))
        .route("/users/:id", get(routes::users::get_user))
        .layer(axum::middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    // Build complete /api surface
    let api_routes = Router::new().nest("/auth", auth_routes).merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::metrics::track_requests,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}
