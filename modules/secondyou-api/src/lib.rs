pub mod auth;
pub mod error;
pub mod rate_limit;
pub mod rest;

use std::sync::Arc;
use std::time::Instant;

use ai_client::TextGenerator;
use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use secondyou_common::{Config, Environment};
use secondyou_core::{SimulationOrchestrator, SimulationStore};

use rate_limit::RateLimiter;

/// Origin allowed when none are configured outside production.
pub const DEV_DEFAULT_ORIGIN: &str = "http://localhost:3000";

pub struct AppState {
    pub orchestrator: SimulationOrchestrator,
    pub store: Arc<dyn SimulationStore>,
    pub environment: Environment,
    pub started_at: Instant,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(
        config: &Config,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn SimulationStore>,
    ) -> Self {
        Self {
            orchestrator: SimulationOrchestrator::new(generator)
                .with_timeout(config.generation_timeout),
            store,
            environment: config.environment,
            started_at: Instant::now(),
            rate_limiter: RateLimiter::new(config.rate_limit_max, config.rate_limit_window),
        }
    }
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(state.environment, allowed_origins);

    Router::new()
        .route("/health", get(rest::health::health))
        .route("/api/simulate", post(rest::simulate::simulate))
        .route("/api/simulate/status", get(rest::health::service_status))
        .route(
            "/api/simulations",
            get(rest::history::list_simulations).post(rest::history::save_simulation),
        )
        .route(
            "/api/simulations/{id}",
            get(rest::history::get_simulation).delete(rest::history::delete_simulation),
        )
        .route(
            "/api/simulations/{id}/favorite",
            post(rest::history::toggle_favorite),
        )
        .fallback(rest::not_found)
        .with_state(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // method + path only, no query params or client IP
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

/// Configured origins win. Without any, development allows the local
/// frontend and production allows none.
fn cors_layer(environment: Environment, allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = if allowed_origins.is_empty() {
        if environment.is_production() {
            Vec::new()
        } else {
            vec![HeaderValue::from_static(DEV_DEFAULT_ORIGIN)]
        }
    } else {
        allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect()
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
