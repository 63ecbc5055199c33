// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router tests against the test harness, driven through `oneshot`.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tabletop_api::{build_router, ApiState, AuthConfig};
use tabletop_core::time::format_date_time;
use tabletop_core::{
    Component, EndpointRegistry, ExternalBookingOutcome, RestaurantBookingEndpoint, RestaurantId,
};
use tabletop_test_utils::TestHarness;
use tower::ServiceExt;

fn router(harness: &TestHarness, token: Option<&str>) -> Router {
    let endpoints = EndpointRegistry::new().with_endpoint(RestaurantBookingEndpoint {
        restaurant_id: RestaurantId(1),
        url: "http://127.0.0.1:4000/api/bookings".to_string(),
        http_method: "POST".to_string(),
        secret_key: None,
    });
    let state = ApiState {
        bookings: harness.service.clone(),
        restaurants: harness.storage.clone(),
        users: harness.storage.clone(),
        endpoints: Arc::new(endpoints),
        components: vec![harness.storage.clone() as Arc<dyn Component>],
        start_time: Instant::now(),
    };
    build_router(
        state,
        AuthConfig {
            bearer_token: token.map(str::to_string),
        },
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn booking_body(restaurant_id: i64, hours: i64) -> Value {
    json!({
        "restaurantId": restaurant_id,
        "userId": 1,
        "bookingDateTime": format_date_time(&TestHarness::hours_from_now(hours)),
        "numberOfPeople": 4,
        "specialRequests": "Window seat"
    })
}

#[tokio::test]
async fn health_reports_components() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["components"][0]["name"], "sqlite");
    assert_eq!(body["components"][0]["status"], "healthy");
}

#[tokio::test]
async fn restaurants_are_listed_with_filters() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (status, body) = send(&app, get("/api/restaurants")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, get("/api/restaurants?city=kandy")).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Kandy Royal Palace");
    assert_eq!(list[0]["bookingEnabled"], false);

    let (_, body) = send(&app, get("/api/restaurants?minRating=4.9")).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn restaurant_detail_and_missing_restaurant() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (status, body) = send(&app, get("/api/restaurants/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Colombo Spice House");
    assert_eq!(body["bookingEnabled"], true);

    let (status, body) = send(&app, get("/api/restaurants/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("restaurant"));
}

#[tokio::test]
async fn confirmed_booking_returns_booking_and_confirmation() {
    let harness = TestHarness::builder()
        .with_outcomes(vec![ExternalBookingOutcome::confirmed("Reserved", None)])
        .build()
        .await
        .unwrap();
    let app = router(&harness, None);

    let (status, body) = send(&app, json_request("POST", "/api/bookings", booking_body(1, 24))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["confirmation"], "Reserved");
    assert_eq!(body["booking"]["status"], "CONFIRMED");
    assert_eq!(body["booking"]["numberOfPeople"], 4);
    assert_eq!(body["booking"]["specialRequests"], "Window seat");

    let id = body["booking"]["id"].as_i64().unwrap();
    let (status, body) = send(&app, get(&format!("/api/bookings/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
}

#[tokio::test]
async fn rejected_bookings_map_to_gateway_statuses() {
    let cases = [
        (ExternalBookingOutcome::unavailable(), StatusCode::BAD_GATEWAY, "unavailable"),
        (ExternalBookingOutcome::unreachable(), StatusCode::BAD_GATEWAY, "unreachable"),
        (
            ExternalBookingOutcome::client_rejected("Fully booked"),
            StatusCode::UNPROCESSABLE_ENTITY,
            "client_rejected",
        ),
        (
            ExternalBookingOutcome::not_configured(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "not_configured",
        ),
    ];

    for (outcome, expected_status, expected_kind) in cases {
        let message = outcome.message.clone();
        let harness = TestHarness::builder()
            .with_outcomes(vec![outcome])
            .build()
            .await
            .unwrap();
        let app = router(&harness, None);

        let (status, body) =
            send(&app, json_request("POST", "/api/bookings", booking_body(1, 24))).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["kind"], expected_kind);
        assert_eq!(body["error"], message.as_str());
        assert_eq!(harness.booking_count().await.unwrap(), 0);
    }
}

#[tokio::test]
async fn invalid_booking_requests_are_bad_requests() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let mut body = booking_body(1, 24);
    body["numberOfPeople"] = json!(0);
    let (status, _) = send(&app, json_request("POST", "/api/bookings", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, json_request("POST", "/api/bookings", booking_body(1, -2))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = booking_body(1, 24);
    body["userId"] = json!(404);
    let (status, _) = send(&app, json_request("POST", "/api/bookings", body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut body = booking_body(1, 24);
    body["bookingDateTime"] = json!("+262142-12-31T23:30:00");
    let (status, _) = send(&app, json_request("POST", "/api/bookings", body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        get("/api/bookings/availability?restaurantId=1&bookingDateTime=%2B262142-12-31T23:30:00"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(harness.gateway.call_count().await, 0);
}

#[tokio::test]
async fn double_booking_is_a_conflict() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (status, _) = send(&app, json_request("POST", "/api/bookings", booking_body(1, 24))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, json_request("POST", "/api/bookings", booking_body(1, 24))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(harness.gateway.call_count().await, 1);
}

#[tokio::test]
async fn availability_endpoint() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);
    let when = format_date_time(&TestHarness::hours_from_now(30));

    let uri = format!("/api/bookings/availability?restaurantId=1&bookingDateTime={when}");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (status, _) = send(&app, json_request("POST", "/api/bookings", booking_body(1, 30))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, get(&uri)).await;
    assert_eq!(body, json!(false));

    let (status, _) = send(
        &app,
        get("/api/bookings/availability?restaurantId=1&bookingDateTime=tomorrow"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_updates_cancellation_and_listings() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (_, created) = send(&app, json_request("POST", "/api/bookings", booking_body(1, 24))).await;
    let id = created["booking"]["id"].as_i64().unwrap();
    send(&app, json_request("POST", "/api/bookings", booking_body(2, 48))).await;

    let put = Request::builder()
        .method("PUT")
        .uri(format!("/api/bookings/{id}/status?status=completed"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, put).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");

    let bad = Request::builder()
        .method("PUT")
        .uri(format!("/api/bookings/{id}/status?status=seated"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/bookings/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CANCELLED");

    let (_, all) = send(&app, get("/api/bookings")).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    let (_, mine) = send(&app, get("/api/bookings/user/1")).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
    let (_, second) = send(&app, get("/api/bookings/restaurant/2")).await;
    assert_eq!(second.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, get("/api/bookings/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/bookings/user/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, get("/api/bookings/restaurant/404")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn user_registration() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, None);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({"name": "Nuwan Silva", "email": "nuwan@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Nuwan Silva");
    assert!(body["id"].as_i64().unwrap() > 1);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/users",
            json!({"name": "Someone Else", "email": "nuwan@example.com"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/users", json!({"name": "  ", "email": "x@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/users", json!({"name": "No At", "email": "nowhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bearer_token_guards_api_but_not_health() {
    let harness = TestHarness::new().await.unwrap();
    let app = router(&harness, Some("s3cret"));

    let (status, _) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/api/restaurants")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/api/restaurants")
        .header("authorization", "Bearer nope")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let prefix = Request::builder()
        .uri("/api/restaurants")
        .header("authorization", "Bearer s3cre")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, prefix).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let right = Request::builder()
        .uri("/api/restaurants")
        .header("authorization", "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, right).await;
    assert_eq!(status, StatusCode::OK);
}
