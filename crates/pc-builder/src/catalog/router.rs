use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;

use crate::components::ComponentKind;

use super::query::ComponentFilter;
use super::store::{CatalogEntry, ComponentId, InMemoryCatalog};

const SIMILAR_LIMIT: usize = 4;

/// Detail payload: the record plus a handful of alternatives.
#[derive(Debug, Serialize)]
pub struct CatalogEntryDetail {
    pub entry: CatalogEntry,
    pub similar: Vec<CatalogEntry>,
}

/// Read-only browsing endpoints over a loaded catalog.
pub fn catalog_router(catalog: Arc<InMemoryCatalog>) -> Router {
    Router::new()
        .route("/api/v1/catalog", get(counts_handler))
        .route("/api/v1/catalog/:kind", get(list_handler))
        .route("/api/v1/catalog/:kind/:id", get(detail_handler))
        .with_state(catalog)
}

pub(crate) async fn counts_handler(State(catalog): State<Arc<InMemoryCatalog>>) -> Response {
    (StatusCode::OK, axum::Json(catalog.counts())).into_response()
}

pub(crate) async fn list_handler(
    State(catalog): State<Arc<InMemoryCatalog>>,
    Path(kind): Path<String>,
    Query(filter): Query<ComponentFilter>,
) -> Response {
    match ComponentKind::from_str(&kind) {
        Ok(kind) => (StatusCode::OK, axum::Json(catalog.list(kind, &filter))).into_response(),
        Err(err) => not_found(err.to_string()),
    }
}

pub(crate) async fn detail_handler(
    State(catalog): State<Arc<InMemoryCatalog>>,
    Path((kind, id)): Path<(String, u64)>,
) -> Response {
    let kind = match ComponentKind::from_str(&kind) {
        Ok(kind) => kind,
        Err(err) => return not_found(err.to_string()),
    };
    let id = ComponentId(id);

    match catalog.get(kind, id) {
        Some(entry) => {
            let detail = CatalogEntryDetail {
                entry: entry.clone(),
                similar: catalog.similar(kind, id, SIMILAR_LIMIT),
            };
            (StatusCode::OK, axum::Json(detail)).into_response()
        }
        None => not_found(format!("no {kind} with id {id}")),
    }
}

fn not_found(message: String) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}
