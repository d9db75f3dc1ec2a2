use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::PlanRequestError;
use crate::types::plan::{PlanResponse, PlanSource, WorkoutPlan};
use crate::types::profile::AthleteProfile;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    profile: &'a AthleteProfile,
    history: Vec<Value>,
    pose: Vec<Value>,
}

/// Client for the plan generation backend. One POST per call; no retry.
#[derive(Clone)]
pub struct PlanClient {
    http: reqwest::Client,
    generate_url: String,
}

impl PlanClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            generate_url: config.generate_url(),
        }
    }

    pub async fn request_plan(&self, profile: &AthleteProfile) -> Result<PlanResponse, PlanRequestError> {
        let body = GenerateRequest {
            profile,
            history: Vec::new(),
            pose: Vec::new(),
        };

        tracing::info!(
            "Requesting plan for {} ({:?}) from {}",
            profile.profile_id,
            profile.experience_level,
            self.generate_url
        );

        let response = self
            .http
            .post(&self.generate_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| PlanRequestError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlanRequestError::Http {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| PlanRequestError::Transport(err.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|err| PlanRequestError::Decode(err.to_string()))
    }

    /// Never fails: any backend problem is logged and replaced by the
    /// fallback plan.
    pub async fn plan_or_fallback(&self, profile: &AthleteProfile) -> (PlanResponse, PlanSource) {
        match self.request_plan(profile).await {
            Ok(response) => (response, PlanSource::Backend),
            Err(err) => {
                tracing::warn!("Plan backend failed, serving fallback plan: {}", err);
                (fallback_plan(), PlanSource::Fallback)
            }
        }
    }
}

pub fn fallback_plan() -> PlanResponse {
    PlanResponse {
        status: "success".to_string(),
        plan: WorkoutPlan {
            warmups: Some(json!(["Light jog", "Dynamic stretching"])),
            drills: Some(json!(["Basic throwing", "Fielding practice"])),
            strength: Some(json!({
                "sets": 3,
                "reps": 10,
                "percent": 75,
                "exercises": ["Push-ups", "Squats", "Lunges"]
            })),
            mobility: Some(json!(["Shoulder circles", "Hip rotations"])),
            recovery: Some(json!({
                "details": "Rest and hydrate properly"
            })),
            ..WorkoutPlan::default()
        },
    }
}
