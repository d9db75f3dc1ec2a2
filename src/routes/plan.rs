use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::AppError;
use crate::pipeline::{assemble, parse};
use crate::state::AppState;
use crate::store::{keys, read_json, write_json};
use crate::types::plan::{ParsedWeekPlan, PlanSource, StoredPlan, WorkoutPlan};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/plan", post(generate_plan).get(current_plan))
        .route("/api/plan/parse", post(parse_plan))
}

#[derive(Serialize)]
struct GeneratedPlan {
    status: String,
    plan: WorkoutPlan,
    source: PlanSource,
}

async fn generate_plan(State(state): State<AppState>) -> Result<Json<GeneratedPlan>, AppError> {
    let _in_flight = state
        .try_begin_plan_request()
        .ok_or_else(|| AppError::Conflict("A plan request is already in progress".to_string()))?;

    let profile = assemble::assemble(state.store()).await?;
    let (response, source) = state.plan_client().plan_or_fallback(&profile).await;

    let stored = StoredPlan {
        plan: response.plan.clone(),
        source,
        created_at: Utc::now(),
    };
    write_json(state.store(), keys::STRUCTURED_PLAN, &stored).await?;

    tracing::info!("Stored {:?} plan for {}", source, profile.profile_id);

    Ok(Json(GeneratedPlan {
        status: response.status,
        plan: response.plan,
        source,
    }))
}

async fn current_plan(State(state): State<AppState>) -> Result<Json<StoredPlan>, AppError> {
    read_json::<Option<StoredPlan>>(state.store(), keys::STRUCTURED_PLAN)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No workout plan generated yet".to_string()))
}

async fn parse_plan(body: String) -> Json<ParsedWeekPlan> {
    Json(parse::parse_week_plan(&body))
}
