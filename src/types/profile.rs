use serde::{Deserialize, Serialize};

pub const PROFILE_ID: &str = "athlete123";
pub const DEFAULT_AGE: u32 = 25;
pub const DEFAULT_POSITION: &str = "pitcher";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
    Elite,
}

impl ExperienceLevel {
    /// "Youth League", "Middle School" and anything unrecognized land on
    /// `Beginner`; "College" is accepted as a spelling of "Collegiate".
    pub fn from_competition_level(level: &str) -> Self {
        match level {
            "High School" => ExperienceLevel::Intermediate,
            "Collegiate" | "College" => ExperienceLevel::Advanced,
            "Professional" => ExperienceLevel::Elite,
            _ => ExperienceLevel::Beginner,
        }
    }
}

/// One entry of a drag-reordered ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub key: String,
    pub label: String,
}

impl RankedItem {
    pub fn from_label(label: &str) -> Self {
        Self {
            key: label.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteProfile {
    pub profile_id: String,

    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub height: String,
    pub weight: String,
    pub competition_level: String,
    #[serde(rename = "experience_level")]
    pub experience_level: ExperienceLevel,
    pub throwing_hand: String,
    pub hitting_hand: String,

    pub position: String,
    pub positions: Vec<String>,

    pub pitch_types: Vec<String>,
    pub top_velocity: u32,
    pub sitting_velocity: u32,
    pub pitching_goals: Vec<String>,
    pub ranked_pitches: Vec<RankedItem>,
    pub ranked_aspects: Vec<RankedItem>,

    pub bench_press_max: u32,
    pub squat_max: u32,
    pub deadlift_max: u32,
    pub reverse_lunge_max: u32,
    pub dash_time: f64,
    pub split_time: f64,

    pub injuries: String,
    pub conditions: String,
    pub allergies: String,

    pub has_equipment: String,
    pub equipment_access: String,

    pub goals: String,
}

impl Default for AthleteProfile {
    fn default() -> Self {
        Self {
            profile_id: PROFILE_ID.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            age: DEFAULT_AGE,
            height: String::new(),
            weight: String::new(),
            competition_level: String::new(),
            experience_level: ExperienceLevel::Beginner,
            throwing_hand: String::new(),
            hitting_hand: String::new(),
            position: DEFAULT_POSITION.to_string(),
            positions: Vec::new(),
            pitch_types: Vec::new(),
            top_velocity: 0,
            sitting_velocity: 0,
            pitching_goals: Vec::new(),
            ranked_pitches: Vec::new(),
            ranked_aspects: Vec::new(),
            bench_press_max: 0,
            squat_max: 0,
            deadlift_max: 0,
            reverse_lunge_max: 0,
            dash_time: 0.0,
            split_time: 0.0,
            injuries: String::new(),
            conditions: String::new(),
            allergies: String::new(),
            has_equipment: String::new(),
            equipment_access: String::new(),
            goals: String::new(),
        }
    }
}
