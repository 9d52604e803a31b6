use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::boundary::error_boundary;
use crate::api::health::{health_handler, not_found_handler};
use crate::state::AppState;

/// Routes served under the base path.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    mount(api_routes(), state)
}

/// Mount `api` under the configured base path and wrap it with the shared
/// layers. Every response, including the 404 fallback, passes through the
/// error boundary.
pub fn mount(api: Router<AppState>, state: AppState) -> Router {
    let router = match normalize_base_path(&state.config.base_path) {
        Some(base_path) => Router::new().nest(&base_path, api),
        None => api,
    };

    router
        .fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.frontend_origin))
                .layer(axum::middleware::from_fn(error_boundary)),
        )
        .with_state(state)
}

/// `"/api/"` → `Some("/api")`, `"v1"` → `Some("/v1")`, `"/"` or `""` → `None`.
pub fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{trimmed}"))
    }
}

fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT]);

    match HeaderValue::from_str(frontend_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                frontend_origin,
                "FRONTEND_ORIGIN is not a valid header value, cross-origin requests will be refused"
            );
            layer
        }
    }
}
