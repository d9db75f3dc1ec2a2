use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::pipeline::track::{self, CompletedSections, ExerciseHistory};
use crate::state::AppState;
use crate::types::plan::SectionKind;
use crate::types::tracking::{
    ExerciseDetails, ExerciseSet, LoggedExercise, PersonalRecord, WorkoutRecord, WorkoutStats,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/completed", get(completed))
        .route("/api/completed/:section", post(complete_section))
        .route("/api/history", get(history).post(record_workout))
        .route("/api/history/stats", get(stats))
        .route("/api/history/records", get(records))
        .route("/api/exercises/history", get(exercise_history))
        .route("/api/exercises/:name/sets", post(log_set))
        .route("/api/exercises/:name/details", get(details))
}

#[derive(Deserialize)]
struct DateQuery {
    date: Option<NaiveDate>,
}

async fn completed(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<CompletedSections>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(track::completed_sections(state.store(), date).await?))
}

async fn complete_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<CompletedSections>, AppError> {
    let kind = SectionKind::from_key(&section)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown section: {}", section)))?;

    let _lock = state.lock_tracking().await;
    let today = Utc::now().date_naive();
    Ok(Json(track::mark_section_complete(state.store(), today, kind).await?))
}

#[derive(Deserialize)]
struct RecordWorkoutRequest {
    #[serde(default)]
    exercises: Vec<LoggedExercise>,
}

async fn record_workout(
    State(state): State<AppState>,
    Json(request): Json<RecordWorkoutRequest>,
) -> Result<Json<WorkoutRecord>, AppError> {
    let _lock = state.lock_tracking().await;
    let record = track::record_workout(state.store(), request.exercises, Utc::now()).await?;
    Ok(Json(record))
}

async fn history(State(state): State<AppState>) -> Result<Json<Vec<WorkoutRecord>>, AppError> {
    Ok(Json(track::workout_history(state.store()).await?))
}

async fn stats(State(state): State<AppState>) -> Result<Json<WorkoutStats>, AppError> {
    let history = track::workout_history(state.store()).await?;
    Ok(Json(track::workout_stats(&history, Utc::now().date_naive())))
}

async fn records(State(state): State<AppState>) -> Result<Json<Vec<PersonalRecord>>, AppError> {
    let history = track::workout_history(state.store()).await?;
    Ok(Json(track::personal_records(&history)))
}

#[derive(Deserialize)]
struct NamesQuery {
    #[serde(default)]
    names: String,
}

async fn exercise_history(
    State(state): State<AppState>,
    Query(query): Query<NamesQuery>,
) -> Result<Json<ExerciseHistory>, AppError> {
    let names: Vec<String> = query
        .names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();
    Ok(Json(track::exercise_history(state.store(), &names).await?))
}

#[derive(Deserialize)]
struct LogSetRequest {
    #[serde(default)]
    weight: f64,
    reps: u32,
    notes: Option<String>,
}

#[derive(Serialize)]
struct LogSetResponse {
    exercise: String,
    sets: Vec<ExerciseSet>,
}

async fn log_set(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<LogSetRequest>,
) -> Result<Json<LogSetResponse>, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Exercise name must not be empty".to_string()));
    }

    let set = ExerciseSet {
        weight: request.weight,
        reps: request.reps,
        notes: request.notes,
        date: Utc::now(),
    };

    let _lock = state.lock_tracking().await;
    let sets = track::log_exercise_set(state.store(), &name, set).await?;
    Ok(Json(LogSetResponse { exercise: name, sets }))
}

async fn details(Path(name): Path<String>) -> Json<ExerciseDetails> {
    Json(track::exercise_details(&name))
}
