pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    extract::FromRef,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::{readings::ReadingStore, thresholds::ThresholdStore};
use handlers::ApiDoc;

/// Stores shared by every handler. Each one wraps the same pool.
#[derive(Clone)]
pub struct AppState {
    pub readings: ReadingStore,
    pub thresholds: ThresholdStore,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            readings: ReadingStore::new(pool.clone()),
            thresholds: ThresholdStore::new(pool),
        }
    }
}

impl FromRef<AppState> for ReadingStore {
    fn from_ref(state: &AppState) -> Self {
        state.readings.clone()
    }
}

impl FromRef<AppState> for ThresholdStore {
    fn from_ref(state: &AppState) -> Self {
        state.thresholds.clone()
    }
}

pub fn router(pool: PgPool) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/status", get(handlers::get_status))
        .route("/history", get(handlers::get_history))
        .route("/relay-on-time", get(handlers::get_relay_on_time))
        .route("/update-threshold", post(handlers::update_threshold))
        .route("/thresholds/{user_id}", get(handlers::get_threshold))
        .with_state(AppState::new(pool))
        .split_for_parts();

    router
        .route("/health", get(handlers::health))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(cors())
        .layer(TraceLayer::new_for_http())
}

/// Dashboards are served from arbitrary origins.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
