mod common;

use axum::{http::StatusCode, routing::post, Json, Router};
use diamond_coach::client::plan::{fallback_plan, PlanClient};
use diamond_coach::config::Config;
use diamond_coach::error::PlanRequestError;
use diamond_coach::types::plan::PlanSource;
use diamond_coach::types::profile::AthleteProfile;
use serde_json::{json, Value};

fn config_for(backend: String) -> Config {
    Config {
        backend_base_url: backend,
        ..Config::default()
    }
}

async fn failing_backend() -> String {
    let router = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
    );
    common::spawn_upstream(router).await
}

async fn garbled_backend() -> String {
    let router = Router::new().route(
        "/generate",
        post(|| async { ([("content-type", "application/json")], "{\"status\": \"success\", \"plan\": ") }),
    );
    common::spawn_upstream(router).await
}

/// Echoes parts of the request back inside the plan so tests can see what
/// was sent.
async fn echo_backend() -> String {
    let router = Router::new().route(
        "/generate",
        post(|Json(body): Json<Value>| async move {
            Json(json!({
                "status": "success",
                "plan": {
                    "warmups": ["Jumping jacks"],
                    "strength": {"sets": 5, "reps": 5, "exercises": ["Trap bar deadlift"]},
                    "recovery": {"details": ["Ice", "Sleep"], "coaches_message": "Nice work"},
                    "analysis": format!("Plan for {}", body["profile"]["firstName"].as_str().unwrap_or("?")),
                    "request": {
                        "experience": body["profile"]["experience_level"],
                        "history": body["history"],
                        "pose": body["pose"]
                    }
                }
            }))
        }),
    );
    common::spawn_upstream(router).await
}

#[tokio::test]
async fn client_reports_http_status() {
    let client = PlanClient::new(reqwest::Client::new(), &config_for(failing_backend().await));
    let result = client.request_plan(&AthleteProfile::default()).await;
    assert!(matches!(result, Err(PlanRequestError::Http { status: 500 })));
}

#[tokio::test]
async fn client_reports_decode_failure() {
    let client = PlanClient::new(reqwest::Client::new(), &config_for(garbled_backend().await));
    let result = client.request_plan(&AthleteProfile::default()).await;
    assert!(matches!(result, Err(PlanRequestError::Decode(_))));
}

#[tokio::test]
async fn client_reports_transport_failure() {
    let client = PlanClient::new(reqwest::Client::new(), &config_for(common::closed_port_url().await));
    let result = client.request_plan(&AthleteProfile::default()).await;
    assert!(matches!(result, Err(PlanRequestError::Transport(_))));
}

#[tokio::test]
async fn every_failure_yields_the_same_fallback() {
    for backend in [failing_backend().await, garbled_backend().await, common::closed_port_url().await] {
        let client = PlanClient::new(reqwest::Client::new(), &config_for(backend));
        let (response, source) = client.plan_or_fallback(&AthleteProfile::default()).await;
        assert_eq!(source, PlanSource::Fallback);
        assert_eq!(response, fallback_plan());
    }
}

#[tokio::test]
async fn server_error_serves_fallback_plan() {
    let app = common::app(config_for(failing_backend().await));
    let (status, body) = common::send(&app, "POST", "/api/plan", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["plan"],
        json!({
            "warmups": ["Light jog", "Dynamic stretching"],
            "drills": ["Basic throwing", "Fielding practice"],
            "strength": {"sets": 3, "reps": 10, "percent": 75, "exercises": ["Push-ups", "Squats", "Lunges"]},
            "mobility": ["Shoulder circles", "Hip rotations"],
            "recovery": {"details": "Rest and hydrate properly"}
        })
    );
}

#[tokio::test]
async fn malformed_body_serves_same_fallback_as_server_error() {
    let failing = common::app(config_for(failing_backend().await));
    let garbled = common::app(config_for(garbled_backend().await));

    let (_, from_failing) = common::send(&failing, "POST", "/api/plan", None).await;
    let (_, from_garbled) = common::send(&garbled, "POST", "/api/plan", None).await;
    assert_eq!(from_failing, from_garbled);
}

#[tokio::test]
async fn backend_plan_is_returned_and_stored() {
    let app = common::app(config_for(echo_backend().await));
    common::send(
        &app,
        "PUT",
        "/api/answers",
        Some(json!({"firstName": "Riley", "competitionLevel": "Professional"})),
    )
    .await;

    let (status, body) = common::send(&app, "POST", "/api/plan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "backend");
    assert_eq!(body["plan"]["analysis"], "Plan for Riley");
    assert_eq!(body["plan"]["request"]["experience"], "elite");
    assert_eq!(body["plan"]["request"]["history"], json!([]));
    assert_eq!(body["plan"]["request"]["pose"], json!([]));

    let (status, stored) = common::send(&app, "GET", "/api/plan", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["plan"], body["plan"]);
    assert_eq!(stored["source"], "backend");
    assert!(stored["createdAt"].is_string());

    let (status, strength) = common::send(&app, "GET", "/api/session/strength", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strength,
        json!([{
            "id": 0,
            "name": "Trap bar deadlift",
            "type": "strength",
            "sets": 5,
            "reps": 5,
            "percent": 75,
            "completed": false
        }])
    );

    let (_, recovery) = common::send(&app, "GET", "/api/session/recovery", None).await;
    assert_eq!(recovery.as_array().map(Vec::len), Some(2));

    let (status, drills) = common::send(&app, "GET", "/api/session/drills", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(drills, json!([]));
}

#[tokio::test]
async fn stored_plan_is_missing_before_generation() {
    let app = common::app(Config::default());

    let (status, _) = common::send(&app, "GET", "/api/plan", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(&app, "GET", "/api/session/warmups", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
