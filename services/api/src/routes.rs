use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use pc_builder::builds::{build_router, BuildRepository, BuildService};
use pc_builder::catalog::{catalog_router, ComponentCatalog, InMemoryCatalog};
use serde_json::json;
use std::sync::Arc;

/// Build and catalog APIs plus the operational endpoints.
pub(crate) fn with_service_routes<R, C>(
    builds: Arc<BuildService<R, C>>,
    catalog: Arc<InMemoryCatalog>,
) -> Router
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    build_router(builds)
        .merge(catalog_router(catalog))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
