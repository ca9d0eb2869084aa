//! HTTP tests for application wiring: health, fallbacks and CORS

mod common;

use std::sync::Arc;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::Value;

use bo_api::app::{create_app, SERVICE_NAME};
use bo_core::repositories::otp::InMemoryOtpStore;
use bo_infra::delivery::MockOtpDelivery;
use bo_shared::config::CorsConfig;

use common::{cors, memory_state, MAX_PAYLOAD};

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(create_app(
        memory_state(Arc::new(InMemoryOtpStore::new()), MockOtpDelivery::new()),
        &cors(),
        MAX_PAYLOAD,
    ))
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], SERVICE_NAME);
    assert_eq!(body["store"], "memory");
    assert!(body.get("timestamp").is_some());
}

#[actix_web::test]
async fn test_unknown_route_returns_envelope() {
    let app = test::init_service(create_app(
        memory_state(Arc::new(InMemoryOtpStore::new()), MockOtpDelivery::new()),
        &cors(),
        MAX_PAYLOAD,
    ))
    .await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], true);
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let app = test::init_service(create_app(
        memory_state(Arc::new(InMemoryOtpStore::new()), MockOtpDelivery::new()),
        &cors(),
        64,
    ))
    .await;

    let padding = "x".repeat(256);
    let req = test::TestRequest::post()
        .uri("/verify-otp")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(format!(r#"{{"email":"{}@x.com","otp":"1"}}"#, padding))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid request body");
}

#[actix_web::test]
async fn test_cors_allows_configured_origin() {
    let cors_config = CorsConfig {
        allowed_origins: vec!["https://app.example.com".to_string()],
        ..CorsConfig::default()
    };
    let app = test::init_service(create_app(
        memory_state(Arc::new(InMemoryOtpStore::new()), MockOtpDelivery::new()),
        &cors_config,
        MAX_PAYLOAD,
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://app.example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "https://app.example.com"
    );
}

#[actix_web::test]
async fn test_cors_rejects_unknown_origin() {
    let cors_config = CorsConfig {
        allowed_origins: vec!["https://app.example.com".to_string()],
        ..CorsConfig::default()
    };
    let app = test::init_service(create_app(
        memory_state(Arc::new(InMemoryOtpStore::new()), MockOtpDelivery::new()),
        &cors_config,
        MAX_PAYLOAD,
    ))
    .await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((header::ORIGIN, "https://evil.example.com"))
        .to_request();
    // Rejected either as an error or as a response without the allow header
    if let Ok(resp) = test::try_call_service(&app, req).await {
        assert!(resp
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
