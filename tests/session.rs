mod common;

use axum::http::StatusCode;
use diamond_coach::config::Config;
use serde_json::{json, Value};

#[tokio::test]
async fn plan_text_is_parsed_by_weekday() {
    let app = common::app(Config::default());
    let text = "Here is your week.\n\n\
                Monday - Strength\n\
                - Squats: 3x10 (keep back straight)\n\
                - Bench: 3x8\n\n\
                Thursday - Arm Care\n\
                - Band Work: 3x15 (light resistance)\n\
                Remember to hydrate";

    let (status, week) = common::send_text(&app, "/api/plan/parse", text).await;
    assert_eq!(status, StatusCode::OK);

    let days: Vec<&String> = week.as_object().expect("week").keys().collect();
    assert_eq!(days, vec!["Monday", "Thursday"]);

    let monday = &week["Monday"];
    assert_eq!(monday["type"], "Strength");
    assert_eq!(monday["exercises"][0]["name"], "Squats");
    assert_eq!(monday["exercises"][0]["sets"], 3);
    assert_eq!(monday["exercises"][0]["reps"], 10);
    assert_eq!(monday["exercises"][0]["guidance"], "keep back straight");
    assert_eq!(monday["exercises"][0]["restTime"], 90);
    assert_eq!(monday["exercises"][0]["history"], json!([]));
    assert_eq!(monday["exercises"][1]["guidance"], "");
    assert_eq!(week["Thursday"]["exercises"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn headerless_text_parses_to_empty_week() {
    let app = common::app(Config::default());
    let (status, week) = common::send_text(&app, "/api/plan/parse", "Rest up, champ.").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(week, json!({}));
}

#[tokio::test]
async fn posted_sections_are_formatted() {
    let app = common::app(Config::default());

    let (status, strength) = common::send(
        &app,
        "POST",
        "/api/session/strength",
        Some(json!({"sets": 4, "reps": 6, "percent": 80, "exercises": ["Squats", "Deadlift"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(strength.as_array().map(Vec::len), Some(2));
    for exercise in strength.as_array().into_iter().flatten() {
        assert_eq!(exercise["type"], "strength");
        assert_eq!(exercise["sets"], 4);
        assert_eq!(exercise["reps"], 6);
        assert_eq!(exercise["percent"], 80);
    }

    let (_, drills) = common::send(&app, "POST", "/api/session/drills", Some(Value::Null)).await;
    assert_eq!(drills, json!([]));

    let (_, warmups) = common::send(
        &app,
        "POST",
        "/api/session/warmups",
        Some(json!([{"name": "High knees", "duration": "30s"}, "Skips"])),
    )
    .await;
    assert_eq!(
        warmups,
        json!([
            {"id": 0, "name": "High knees", "type": "simple", "duration": "30s", "completed": false},
            {"id": 1, "name": "Skips", "type": "simple", "completed": false}
        ])
    );

    let (status, unknown) = common::send(&app, "POST", "/api/session/cooldown", Some(json!(["Walk"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown, json!([]));
}
