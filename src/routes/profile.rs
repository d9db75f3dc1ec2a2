use axum::{extract::State, routing::get, Json, Router};

use crate::error::AppError;
use crate::pipeline::assemble;
use crate::state::AppState;
use crate::types::profile::AthleteProfile;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/profile", get(profile))
}

async fn profile(State(state): State<AppState>) -> Result<Json<AthleteProfile>, AppError> {
    Ok(Json(assemble::assemble(state.store()).await?))
}
