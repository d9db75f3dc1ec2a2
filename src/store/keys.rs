//! Storage keys written by the questionnaire and the tracking screens.

pub const AGE: &str = "age";
pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const HEIGHT: &str = "height";
pub const WEIGHT: &str = "weight";
pub const COMPETITION_LEVEL: &str = "competitionLevel";
pub const THROWING_HAND: &str = "throwingHand";
pub const HITTING_HAND: &str = "hittingHand";
pub const POSITIONS: &str = "positions";

pub const PITCH_TYPES: &str = "pitchTypes";
pub const TOP_VELOCITY: &str = "topVelocity";
pub const THROWING_VELOCITY: &str = "throwingVelocity";
pub const SITTING_VELOCITY: &str = "sittingVelocity";
pub const PITCHING_GOALS: &str = "pitchingGoals";
pub const RANKED_PITCHES: &str = "rankedPitches";
pub const RANKED_ASPECTS: &str = "rankedAspects";

pub const BENCH_PRESS_MAX: &str = "benchPressMax";
pub const SQUAT_MAX: &str = "squatMax";
pub const DEADLIFT_MAX: &str = "deadliftMax";
pub const REVERSE_LUNGE_MAX: &str = "reverseLungeMax";
pub const DASH_TIME: &str = "dashTime";
pub const SPLIT_TIME: &str = "splitTime";

pub const INJURIES: &str = "injuries";
pub const CONDITIONS: &str = "conditions";
pub const ALLERGIES: &str = "allergies";

pub const HAS_EQUIPMENT: &str = "hasEquipment";
pub const EQUIPMENT_ACCESS: &str = "equipmentAccess";

pub const GOALS: &str = "goals";

pub const STRUCTURED_PLAN: &str = "structuredWorkoutPlan";
pub const WORKOUT_HISTORY: &str = "workoutHistory";
pub const EXERCISE_HISTORY: &str = "exerciseHistory";

const COMPLETED_PREFIX: &str = "completed_";

pub const QUESTIONNAIRE: &[&str] = &[
    AGE,
    FIRST_NAME,
    LAST_NAME,
    HEIGHT,
    WEIGHT,
    COMPETITION_LEVEL,
    THROWING_HAND,
    HITTING_HAND,
    POSITIONS,
    PITCH_TYPES,
    TOP_VELOCITY,
    THROWING_VELOCITY,
    SITTING_VELOCITY,
    PITCHING_GOALS,
    RANKED_PITCHES,
    RANKED_ASPECTS,
    BENCH_PRESS_MAX,
    SQUAT_MAX,
    DEADLIFT_MAX,
    REVERSE_LUNGE_MAX,
    DASH_TIME,
    SPLIT_TIME,
    INJURIES,
    CONDITIONS,
    ALLERGIES,
    HAS_EQUIPMENT,
    EQUIPMENT_ACCESS,
    GOALS,
];

pub fn is_questionnaire_key(key: &str) -> bool {
    QUESTIONNAIRE.contains(&key)
}

/// Keys written alongside `key` so older readers keep working.
pub fn mirrors(key: &str) -> &'static [&'static str] {
    match key {
        HAS_EQUIPMENT => &[EQUIPMENT_ACCESS],
        TOP_VELOCITY => &[THROWING_VELOCITY],
        _ => &[],
    }
}

/// Day-scoped completion key, e.g. `completed_Sun Oct 18 2026`.
pub fn completed_for(date: chrono::NaiveDate) -> String {
    format!("{}{}", COMPLETED_PREFIX, date.format("%a %b %d %Y"))
}
