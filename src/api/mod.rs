use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;

mod error;
mod logs;
mod observability;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub cors_allowed_origins: Vec<String>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, config: &Config, prometheus_handle: Option<PrometheusHandle>) -> Self {
        Self {
            store,
            cors_allowed_origins: config.server.cors_allowed_origins.clone(),
            start_time: std::time::Instant::now(),
            prometheus_handle,
        }
    }
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState::new(store, &config, prometheus_handle)))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/logs", get(logs::list_logs).post(logs::create_log))
        .route(
            "/logs/{id}",
            put(logs::update_log).delete(logs::delete_log),
        )
        .route("/search", get(logs::search_logs))
        .route("/health", get(system::health));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/metrics", get(observability::get_metrics))
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}
