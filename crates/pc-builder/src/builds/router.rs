use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::warn;

use crate::catalog::ComponentCatalog;

use super::domain::{BuildDraft, BuildId, ComponentSelection, OwnerId};
use super::repository::{BuildRepository, RepositoryError};
use super::service::{BuildService, BuildServiceError};

/// Header carrying the authenticated caller. Identity is established upstream.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Router exposing build management and ad-hoc assessment endpoints.
pub fn build_router<R, C>(service: Arc<BuildService<R, C>>) -> Router
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    Router::new()
        .route(
            "/api/v1/builds",
            post(create_handler::<R, C>).get(list_public_handler::<R, C>),
        )
        .route("/api/v1/builds/mine", get(list_owned_handler::<R, C>))
        .route(
            "/api/v1/builds/:build_id",
            get(detail_handler::<R, C>)
                .put(update_handler::<R, C>)
                .delete(delete_handler::<R, C>),
        )
        .route("/api/v1/assessments", post(assess_handler::<R, C>))
        .with_state(service)
}

pub(crate) async fn create_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<BuildDraft>,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    let Some(owner) = owner_from(&headers) else {
        return missing_owner();
    };

    let created = service
        .create(owner.clone(), draft)
        .and_then(|record| service.detail(Some(&owner), record.id));

    match created {
        Ok(detail) => (StatusCode::CREATED, axum::Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_public_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    match service.list_public() {
        Ok(builds) => (StatusCode::OK, axum::Json(builds)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_owned_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    headers: HeaderMap,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    let Some(owner) = owner_from(&headers) else {
        return missing_owner();
    };

    match service.list_owned(&owner) {
        Ok(builds) => (StatusCode::OK, axum::Json(builds)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    Path(build_id): Path<u64>,
    headers: HeaderMap,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    let viewer = owner_from(&headers);
    match service.detail(viewer.as_ref(), BuildId(build_id)) {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    Path(build_id): Path<u64>,
    headers: HeaderMap,
    axum::Json(draft): axum::Json<BuildDraft>,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    let Some(owner) = owner_from(&headers) else {
        return missing_owner();
    };

    let updated = service
        .update(&owner, BuildId(build_id), draft)
        .and_then(|record| service.detail(Some(&owner), record.id));

    match updated {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    Path(build_id): Path<u64>,
    headers: HeaderMap,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    let Some(owner) = owner_from(&headers) else {
        return missing_owner();
    };

    match service.delete(&owner, BuildId(build_id)) {
        Ok(record) => {
            let payload = json!({
                "deleted": record.id,
                "name": record.name,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assess_handler<R, C>(
    State(service): State<Arc<BuildService<R, C>>>,
    axum::Json(selection): axum::Json<ComponentSelection>,
) -> Response
where
    R: BuildRepository + 'static,
    C: ComponentCatalog + 'static,
{
    match service.assess(&selection) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error.into()),
    }
}

fn owner_from(headers: &HeaderMap) -> Option<OwnerId> {
    headers
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| OwnerId(value.to_string()))
}

fn missing_owner() -> Response {
    let payload = json!({
        "error": format!("missing {OWNER_HEADER} header"),
    });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

pub(crate) fn error_response(error: BuildServiceError) -> Response {
    let status = match &error {
        BuildServiceError::Draft(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BuildServiceError::Private(_) => StatusCode::FORBIDDEN,
        BuildServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        BuildServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        BuildServiceError::Repository(RepositoryError::Unavailable(_))
        | BuildServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!(status = status.as_u16(), %error, "build request rejected");
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
