use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{keys, read_json, read_json_for_update, write_json, KeyValueStore};
use crate::types::plan::SectionKind;
use crate::types::tracking::{
    ExerciseDetails, ExerciseSet, LoggedExercise, PersonalRecord, WorkoutRecord, WorkoutStats,
};

const EXERCISE_HISTORY_LIMIT: usize = 10;

pub type CompletedSections = BTreeMap<String, bool>;

pub async fn completed_sections(
    store: &dyn KeyValueStore,
    date: NaiveDate,
) -> Result<CompletedSections, StoreError> {
    let flags: Map<String, Value> = read_json(store, &keys::completed_for(date)).await?;
    Ok(decode_flags(flags))
}

pub async fn mark_section_complete(
    store: &dyn KeyValueStore,
    date: NaiveDate,
    section: SectionKind,
) -> Result<CompletedSections, StoreError> {
    let key = keys::completed_for(date);
    let mut flags: Map<String, Value> = read_json_for_update(store, &key).await?;
    flags.insert(section.key().to_string(), Value::Bool(true));
    write_json(store, &key, &flags).await?;
    tracing::info!("Marked {} complete for {}", section.key(), date);
    Ok(decode_flags(flags))
}

fn decode_flags(flags: Map<String, Value>) -> CompletedSections {
    flags
        .into_iter()
        .filter_map(|(section, done)| done.as_bool().map(|done| (section, done)))
        .collect()
}

/// Records that fail to decode are skipped here but stay in the store.
pub async fn workout_history(store: &dyn KeyValueStore) -> Result<Vec<WorkoutRecord>, StoreError> {
    let entries: Vec<Value> = read_json(store, keys::WORKOUT_HISTORY).await?;
    Ok(decode_entries(keys::WORKOUT_HISTORY, entries))
}

pub async fn record_workout(
    store: &dyn KeyValueStore,
    exercises: Vec<LoggedExercise>,
    now: DateTime<Utc>,
) -> Result<WorkoutRecord, StoreError> {
    let mut entries: Vec<Value> = read_json_for_update(store, keys::WORKOUT_HISTORY).await?;
    let record = WorkoutRecord {
        id: Uuid::new_v4().to_string(),
        date: now,
        exercises,
        completed: true,
    };
    entries.push(encode(keys::WORKOUT_HISTORY, &record)?);
    write_json(store, keys::WORKOUT_HISTORY, &entries).await?;

    tracing::info!("Recorded workout {} ({} exercises)", record.id, record.exercises.len());
    Ok(record)
}

fn decode_entries<T: DeserializeOwned>(key: &str, entries: Vec<Value>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!("Skipping unreadable {} entry: {}", key, err);
                None
            }
        })
        .collect()
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value)
        .map_err(|err| StoreError::Unavailable(format!("Failed to encode {}: {}", key, err)))
}

/// Weeks start on Sunday. The streak counts consecutive days ending at
/// `today` that each hold at least one workout.
pub fn workout_stats(history: &[WorkoutRecord], today: NaiveDate) -> WorkoutStats {
    let week_start = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let days: BTreeSet<NaiveDate> = history.iter().map(|record| record.date.date_naive()).collect();

    let this_week = history
        .iter()
        .filter(|record| {
            let day = record.date.date_naive();
            day >= week_start && day <= today
        })
        .count();
    let this_month = history
        .iter()
        .filter(|record| {
            let day = record.date.date_naive();
            day.year() == today.year() && day.month() == today.month()
        })
        .count();

    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }

    WorkoutStats {
        total_workouts: history.len(),
        this_week,
        this_month,
        streak,
    }
}

/// Heaviest logged set for each exercise and rep count. Ties keep the
/// earliest set.
pub fn personal_records(history: &[WorkoutRecord]) -> Vec<PersonalRecord> {
    let mut best: BTreeMap<(String, u32), PersonalRecord> = BTreeMap::new();

    for exercise in history.iter().flat_map(|record| record.exercises.iter()) {
        for set in &exercise.sets {
            let key = (exercise.name.clone(), set.reps);
            let beats = best.get(&key).map_or(true, |current| set.weight > current.weight);
            if beats {
                best.insert(
                    key,
                    PersonalRecord {
                        exercise: exercise.name.clone(),
                        weight: set.weight,
                        reps: set.reps,
                        date: set.date,
                    },
                );
            }
        }
    }

    best.into_values().collect()
}

pub type ExerciseHistory = BTreeMap<String, Vec<ExerciseSet>>;

/// Prepends a set to the exercise's history, keeping the newest ten.
/// Other exercises' entries are written back untouched.
pub async fn log_exercise_set(
    store: &dyn KeyValueStore,
    exercise: &str,
    set: ExerciseSet,
) -> Result<Vec<ExerciseSet>, StoreError> {
    let mut history: Map<String, Value> = read_json_for_update(store, keys::EXERCISE_HISTORY).await?;
    let mut sets = match history.remove(exercise) {
        Some(Value::Array(sets)) => sets,
        Some(_) => {
            return Err(StoreError::Corrupt {
                key: format!("{}[{}]", keys::EXERCISE_HISTORY, exercise),
                reason: "expected a list of sets".to_string(),
            })
        }
        None => Vec::new(),
    };
    sets.insert(0, encode(keys::EXERCISE_HISTORY, &set)?);
    sets.truncate(EXERCISE_HISTORY_LIMIT);

    let decoded = decode_entries(keys::EXERCISE_HISTORY, sets.clone());
    history.insert(exercise.to_string(), Value::Array(sets));
    write_json(store, keys::EXERCISE_HISTORY, &history).await?;
    Ok(decoded)
}

/// History for each requested exercise; unknown names map to an empty list.
pub async fn exercise_history(
    store: &dyn KeyValueStore,
    names: &[String],
) -> Result<ExerciseHistory, StoreError> {
    let history: Map<String, Value> = read_json(store, keys::EXERCISE_HISTORY).await?;
    Ok(names
        .iter()
        .map(|name| {
            let sets = match history.get(name) {
                Some(Value::Array(sets)) => decode_entries(keys::EXERCISE_HISTORY, sets.clone()),
                _ => Vec::new(),
            };
            (name.clone(), sets)
        })
        .collect())
}

pub fn exercise_details(exercise: &str) -> ExerciseDetails {
    match exercise {
        "Bench Press" => ExerciseDetails {
            sets: 3,
            reps: "8-12",
            rest: "90 seconds",
            tips: &[
                "Keep your feet flat on the ground",
                "Maintain a slight arch in your back",
                "Lower the bar to mid-chest",
                "Keep elbows at about 45 degrees",
            ],
        },
        "Squats" => ExerciseDetails {
            sets: 4,
            reps: "6-8",
            rest: "120 seconds",
            tips: &[
                "Keep your chest up",
                "Push through your heels",
                "Keep knees in line with toes",
                "Break parallel at the bottom",
            ],
        },
        _ => ExerciseDetails {
            sets: 3,
            reps: "10-12",
            rest: "60 seconds",
            tips: &[
                "Maintain proper form throughout",
                "Control the movement",
                "Focus on muscle engagement",
                "Breathe steadily",
            ],
        },
    }
}
