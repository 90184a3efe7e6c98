//! HTTP API integration tests
//!
//! Drives the full router against stub upstream providers.

mod common;

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{overpass_payload, pexels_payload, spawn_stub, test_state};
use tn_explorer::build_router;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn temple_listing_end_to_end() {
    let stub = spawn_stub(
        200,
        overpass_payload(json!([
            {
                "type": "node",
                "id": 101,
                "lat": 9.9195,
                "lon": 78.1198,
                "tags": { "name": "Meenakshi Temple", "amenity": "place_of_worship" }
            }
        ])),
        pexels_payload("https://images.pexels.com/temple.jpg"),
    )
    .await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/api/places?category=temple")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let places = body_json(response).await;
    let places = places.as_array().unwrap();
    assert_eq!(places.len(), 1);

    let place = &places[0];
    assert_eq!(place["name"], "Meenakshi Temple");
    assert_eq!(place["category"], "temple");
    assert!(place["tags"].as_array().unwrap().contains(&json!("Culture")));
    assert_eq!(place["imageUrl"], "https://images.pexels.com/temple.jpg");
    assert_eq!(place["externalId"], "osm-101");
    assert_eq!(place["source"], "overpass");
    assert_eq!(place["coordinates"]["lat"], 9.9195);

    assert_eq!(stub.overpass_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_category_is_rejected_before_any_upstream_call() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/api/places?category=bogus")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    assert_eq!(stub.overpass_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.pexels_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_error_status_is_a_gateway_failure() {
    let stub = spawn_stub(500, json!({}), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/api/places")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
}

#[tokio::test]
async fn malformed_upstream_payload_is_a_server_error() {
    // 200 but no `elements` array.
    let stub = spawn_stub(200, json!({ "version": 0.6 }), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/api/places")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "UPSTREAM_DATA_INVALID");
}

#[tokio::test]
async fn zero_results_is_a_valid_empty_array() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/api/places?category=beach")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn save_and_list_saved_places_requires_auth() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    // Unauthenticated requests are rejected.
    let response = app.clone().oneshot(get("/api/places/saved")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Register and capture the session token.
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({ "email": "trip@example.com", "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    // Save a place twice; the second save is idempotent.
    let save_body = json!({
        "name": "Marina Beach",
        "description": "A famous beach in Chennai.",
        "lon": 80.2824,
        "lat": 13.05,
        "tags": ["Relaxation"],
        "address": "Chennai",
        "imageUrl": "http://img/beach",
        "externalId": "osm-7",
        "category": "beach"
    });
    for _ in 0..2 {
        let mut request = post_json("/api/places/save", save_body.clone());
        request
            .headers_mut()
            .insert("authorization", format!("Bearer {token}").parse().unwrap());
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let mut request = get("/api/places/saved");
    request
        .headers_mut()
        .insert("authorization", format!("Bearer {token}").parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await;
    let saved = saved.as_array().unwrap().clone();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0]["name"], "Marina Beach");
    assert_eq!(saved[0]["category"], "beach");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/register",
            json!({ "email": "trip@example.com", "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "trip@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "trip@example.com", "password": "secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let creds = json!({ "email": "trip@example.com", "password": "secret" });
    let response = app.clone().oneshot(post_json("/api/auth/register", creds.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(post_json("/api/auth/register", creds)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn chatbot_validates_query_and_degrades_gracefully() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app
        .clone()
        .oneshot(post_json("/api/chatbot/ask", json!({ "query": "  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Providers unconfigured in the test state: still a 200 with an answer.
    let response = app
        .oneshot(post_json("/api/chatbot/ask", json!({ "query": "best beaches?" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_json(response).await["answer"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn health_endpoint_reports_module() {
    let stub = spawn_stub(200, overpass_payload(json!([])), pexels_payload("http://img")).await;
    let app = build_router(test_state(&stub).await);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tn-explorer");
}
