use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::error::AppError;
use crate::pipeline::format;
use crate::state::AppState;
use crate::store::{keys, read_json};
use crate::types::plan::{FormattedExercise, SectionKind, StoredPlan};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/session/:section", get(stored_session).post(format_session))
}

/// Formats a caller-supplied section value.
async fn format_session(Path(section): Path<String>, Json(raw): Json<Value>) -> Json<Vec<FormattedExercise>> {
    Json(format::format_section_key(&section, Some(&raw)))
}

/// Formats a section of the last generated plan.
async fn stored_session(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<Vec<FormattedExercise>>, AppError> {
    let stored = read_json::<Option<StoredPlan>>(state.store(), keys::STRUCTURED_PLAN)
        .await?
        .ok_or_else(|| AppError::NotFound("No workout plan generated yet".to_string()))?;

    let exercises = match SectionKind::from_key(&section) {
        Some(kind) => format::format_section(kind, stored.plan.section(kind)),
        None => Vec::new(),
    };
    Ok(Json(exercises))
}
