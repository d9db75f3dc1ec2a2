mod common;

use axum::http::StatusCode;
use diamond_coach::config::Config;

#[tokio::test]
async fn health_returns_ok() {
    let app = common::app(Config::default());
    let (status, body) = common::send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["stored_keys"], 0);
}
