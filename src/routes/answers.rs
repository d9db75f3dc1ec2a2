use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::state::AppState;
use crate::store::keys;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/answers", get(list_answers).put(save_answers))
}

#[derive(Serialize)]
struct SaveAnswersResponse {
    saved: Vec<String>,
    cleared: Vec<String>,
}

/// Persists questionnaire answers one key at a time. Scalars are stored as
/// plain strings, lists and objects as JSON; `null` clears the answer.
async fn save_answers(
    State(state): State<AppState>,
    Json(answers): Json<Map<String, Value>>,
) -> Result<Json<SaveAnswersResponse>, AppError> {
    if answers.is_empty() {
        return Err(AppError::BadRequest("No answers provided".to_string()));
    }
    let unknown: Vec<&str> = answers
        .keys()
        .map(String::as_str)
        .filter(|key| !keys::is_questionnaire_key(key))
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Unknown questionnaire keys: {}",
            unknown.join(", ")
        )));
    }

    let store = state.store();
    let mut saved = Vec::new();
    let mut cleared = Vec::new();

    for (key, value) in &answers {
        // A legacy key sent explicitly in the same batch keeps its own value.
        let mirrored = keys::mirrors(key)
            .iter()
            .copied()
            .filter(|target| !answers.contains_key(*target));
        let targets = std::iter::once(key.as_str()).chain(mirrored);
        match encode_answer(value) {
            Some(encoded) => {
                for target in targets {
                    store.set(target, encoded.clone()).await?;
                    saved.push(target.to_string());
                }
            }
            None => {
                for target in targets {
                    store.remove(target).await?;
                    cleared.push(target.to_string());
                }
            }
        }
    }

    tracing::info!("Saved {} answers, cleared {}", saved.len(), cleared.len());
    Ok(Json(SaveAnswersResponse { saved, cleared }))
}

async fn list_answers(State(state): State<AppState>) -> Result<Json<BTreeMap<String, String>>, AppError> {
    let store = state.store();
    let stored: Vec<String> = store
        .get_all_keys()
        .await?
        .into_iter()
        .filter(|key| keys::is_questionnaire_key(key))
        .collect();

    let answers = store
        .multi_get(&stored)
        .await?
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();

    Ok(Json(answers))
}

fn encode_answer(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
