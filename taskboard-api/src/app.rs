/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskboard_api::{app::AppState, config::Config};
/// use taskboard_shared::store::memory::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config);
/// let app = taskboard_api::app::build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use taskboard_shared::{
    auth::middleware::{request_context, TokenSettings},
    store::Store,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,

    /// Token verification settings derived from `config.jwt`
    pub tokens: Arc<TokenSettings>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        let tokens = TokenSettings {
            secret: config.jwt.secret.clone(),
            issuer: config.jwt.issuer.clone(),
        };

        Self {
            store,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET /health                      # Health check (public)
/// └── /v1/                             # Identity resolved per request
///     ├── GET    /me                   # Caller identity
///     ├── GET    /colors               # Palette
///     ├── GET    /collections          # Dashboard listing
///     ├── POST   /collections          # Create collection
///     ├── DELETE /collections/:id      # Delete collection (cascades)
///     ├── POST   /tasks                # Create task
///     └── POST   /tasks/:id/done       # Mark task done
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Response compression (gzip, brotli)
/// 4. Logging (tower-http TraceLayer)
/// 5. Identity resolution (v1 routes)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let v1_routes = Router::new()
        .route("/me", get(routes::identity::me))
        .route("/colors", get(routes::palette::list_colors))
        .route(
            "/collections",
            get(routes::collections::list_collections).post(routes::collections::create_collection),
        )
        .route("/collections/:id", delete(routes::collections::delete_collection))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/:id/done", post(routes::tasks::set_task_to_done))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            identity_layer,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Identity middleware layer
///
/// Resolves the bearer token (if any) into a `RequestContext` and stores it in
/// the request extensions. Anonymous requests pass through; invalid tokens are
/// rejected here.
async fn identity_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = request_context(req.headers(), &state.tokens)?;
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
