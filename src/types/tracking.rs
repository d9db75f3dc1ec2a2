use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Finished workout appended to `workoutHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub exercises: Vec<LoggedExercise>,
    #[serde(default = "default_true")]
    pub completed: bool,
}

fn default_true() -> bool {
    true
}

/// Older clients used millisecond timestamps as workout ids.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedExercise {
    pub name: String,
    /// Older clients stored the per-set log under `weight`.
    #[serde(default, alias = "weight")]
    pub sets: Vec<LoggedSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedSet {
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub this_week: usize,
    pub this_month: usize,
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub weight: f64,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// One set kept in the per-exercise history under `exerciseHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseDetails {
    pub sets: u32,
    pub reps: &'static str,
    pub rest: &'static str,
    pub tips: &'static [&'static str],
}
