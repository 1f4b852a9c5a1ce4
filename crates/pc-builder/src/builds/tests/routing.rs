use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::builds::router::{build_router, OWNER_HEADER};
use crate::builds::service::BuildService;

fn router() -> Router {
    let (service, _) = build_service();
    build_router(Arc::new(service))
}

fn draft_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "quiet 1440p box",
        "selection": {
            "cpu": 1,
            "gpu": 1,
            "motherboard": 1,
            "ram": 1,
            "psu": 1,
            "case": 1
        }
    })
}

fn json_request(method: &str, uri: &str, owner: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(owner) = owner {
        builder = builder.header(OWNER_HEADER, owner);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: &str, uri: &str, owner: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(owner) = owner {
        builder = builder.header(OWNER_HEADER, owner);
    }
    builder.body(Body::empty()).expect("request")
}

async fn create(app: &Router, owner: &str, payload: &Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/builds", Some(owner), payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json_body(response).await
}

#[tokio::test]
async fn create_returns_the_assessed_build() {
    let app = router();

    let payload = create(&app, "alice", &draft_payload("Midrange AM5")).await;

    assert_eq!(payload["name"], "Midrange AM5");
    assert_eq!(payload["owner"], "alice");
    assert_eq!(payload["visibility"], "public");
    assert_eq!(payload["assessment"]["compatible"], true);
    assert_eq!(payload["assessment"]["metrics"]["total_price"], "690.00");
    assert_eq!(payload["assessment"]["metrics"]["recommended_wattage"], 435);
    assert_eq!(payload["assessment"]["metrics"]["performance_score"], 16_000);
}

#[tokio::test]
async fn writes_without_an_owner_are_unauthorized() {
    let app = router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/builds",
            None,
            &draft_payload("Anonymous"),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(empty_request("GET", "/api/v1/builds/mine", Some("   ")))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_drafts_are_unprocessable() {
    let app = router();
    let mut payload = draft_payload("No CPU");
    payload["selection"]["cpu"] = Value::Null;

    let response = app
        .oneshot(json_request("POST", "/api/v1/builds", Some("alice"), &payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "no cpu selected");
}

#[tokio::test]
async fn private_builds_are_forbidden_to_other_viewers() {
    let app = router();
    let mut payload = draft_payload("Secret");
    payload["visibility"] = json!("private");
    let created = create(&app, "alice", &payload).await;
    let uri = format!("/api/v1/builds/{}", created["id"]);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri, Some("bob")))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &uri, None))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(empty_request("GET", &uri, Some("alice")))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_and_delete_by_owner() {
    let app = router();
    let created = create(&app, "alice", &draft_payload("Rig")).await;
    let uri = format!("/api/v1/builds/{}", created["id"]);

    let mut edit = draft_payload("Rig v2");
    edit["selection"]["psu"] = json!(2);
    edit["selection"]["gpu"] = json!(2);
    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, Some("bob"), &edit))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request("PUT", &uri, Some("alice"), &edit))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json_body(response).await;
    assert_eq!(updated["name"], "Rig v2");
    assert_eq!(updated["assessment"]["compatible"], true);
    assert_eq!(
        updated["assessment"]["findings"][0]["rule"],
        "power_supply"
    );
    assert_eq!(updated["assessment"]["findings"][0]["severity"], "warning");

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri, Some("alice")))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let deleted = read_json_body(response).await;
    assert_eq!(deleted["deleted"], created["id"]);
    assert_eq!(deleted["name"], "Rig v2");

    let response = app
        .oneshot(empty_request("GET", &uri, Some("alice")))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn listings_split_public_and_owned_builds() {
    let app = router();
    create(&app, "alice", &draft_payload("Public rig")).await;
    let mut private = draft_payload("Private rig");
    private["visibility"] = json!("private");
    create(&app, "alice", &private).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/api/v1/builds", None))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::OK);
    let public = read_json_body(response).await;
    let names: Vec<&str> = public
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|summary| summary["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Public rig"]);

    let response = app
        .oneshot(empty_request("GET", "/api/v1/builds/mine", Some("alice")))
        .await
        .expect("router dispatch");
    let mine = read_json_body(response).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(2));
    assert_eq!(mine[0]["name"], "Private rig");
}

#[tokio::test]
async fn assessments_evaluate_unsaved_selections() {
    let app = router();
    let selection = json!({ "cpu": 1, "motherboard": 1, "ram": 2 });

    let response = app
        .oneshot(json_request("POST", "/api/v1/assessments", None, &selection))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["compatible"], false);
    assert_eq!(payload["findings"][0]["rule"], "memory_type");
    assert_eq!(payload["metrics"]["total_thermal_draw"], 115);
    assert_eq!(payload["budget"][0]["kind"], "cpu");
}

#[tokio::test]
async fn repository_outages_are_internal_errors() {
    let service = BuildService::new(Arc::new(UnavailableRepository), Arc::new(catalog()));
    let app = build_router(Arc::new(service));

    let response = app
        .oneshot(empty_request("GET", "/api/v1/builds", None))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: offline");
}
