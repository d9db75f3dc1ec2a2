use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::StoreError;
use crate::store::{keys, KeyValueStore};
use crate::types::profile::{AthleteProfile, ExperienceLevel, RankedItem, DEFAULT_AGE, DEFAULT_POSITION};

/// Reads every questionnaire key and folds the answers into one profile.
///
/// Missing or malformed answers resolve to their defaults. Only a store
/// that cannot be read at all is reported as an error.
pub async fn assemble(store: &dyn KeyValueStore) -> Result<AthleteProfile, StoreError> {
    let wanted: Vec<String> = keys::QUESTIONNAIRE.iter().map(|key| key.to_string()).collect();
    let answers: HashMap<String, String> = store
        .multi_get(&wanted)
        .await?
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect();

    tracing::debug!("Assembling profile from {} stored answers", answers.len());

    let text = |key: &str| answers.get(key).cloned().unwrap_or_default();
    let raw = |key: &str| answers.get(key).map(String::as_str);

    let competition_level = text(keys::COMPETITION_LEVEL);
    let positions: Vec<String> = decode_list(keys::POSITIONS, raw(keys::POSITIONS), str::to_string);
    let position = if positions.is_empty() {
        DEFAULT_POSITION.to_string()
    } else {
        positions.join(",")
    };

    Ok(AthleteProfile {
        first_name: text(keys::FIRST_NAME),
        last_name: text(keys::LAST_NAME),
        age: int_or(raw(keys::AGE), DEFAULT_AGE),
        height: text(keys::HEIGHT),
        weight: text(keys::WEIGHT),
        experience_level: ExperienceLevel::from_competition_level(&competition_level),
        competition_level,
        throwing_hand: text(keys::THROWING_HAND),
        hitting_hand: text(keys::HITTING_HAND),

        position,
        positions,

        pitch_types: decode_list(keys::PITCH_TYPES, raw(keys::PITCH_TYPES), str::to_string),
        top_velocity: int_or(raw(keys::TOP_VELOCITY), 0),
        sitting_velocity: int_or(raw(keys::SITTING_VELOCITY), 0),
        pitching_goals: decode_list(keys::PITCHING_GOALS, raw(keys::PITCHING_GOALS), str::to_string),
        ranked_pitches: decode_ranking(keys::RANKED_PITCHES, raw(keys::RANKED_PITCHES)),
        ranked_aspects: decode_ranking(keys::RANKED_ASPECTS, raw(keys::RANKED_ASPECTS)),

        bench_press_max: int_or(raw(keys::BENCH_PRESS_MAX), 0),
        squat_max: int_or(raw(keys::SQUAT_MAX), 0),
        deadlift_max: int_or(raw(keys::DEADLIFT_MAX), 0),
        reverse_lunge_max: int_or(raw(keys::REVERSE_LUNGE_MAX), 0),
        dash_time: float_or(raw(keys::DASH_TIME), 0.0),
        split_time: float_or(raw(keys::SPLIT_TIME), 0.0),

        injuries: text(keys::INJURIES),
        conditions: text(keys::CONDITIONS),
        allergies: text(keys::ALLERGIES),

        has_equipment: text(keys::HAS_EQUIPMENT),
        equipment_access: text(keys::EQUIPMENT_ACCESS),

        goals: text(keys::GOALS),

        ..AthleteProfile::default()
    })
}

/// Leading-integer parse: `"190 lbs"` reads as 190. Zero, negatives and
/// non-numeric input fall back to `default`.
fn int_or(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default;
    };
    let digits: String = raw.trim_start().chars().take_while(char::is_ascii_digit).collect();
    digits
        .parse::<u32>()
        .ok()
        .filter(|value| *value != 0)
        .unwrap_or(default)
}

/// Leading-decimal parse: `"6.8s"` reads as 6.8.
fn float_or(raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw else {
        return default;
    };
    let trimmed = raw.trim_start();
    let mut seen_dot = false;
    let end = trimmed
        .char_indices()
        .find(|(_, ch)| match ch {
            '0'..='9' => false,
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            _ => true,
        })
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());

    trimmed[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| *value != 0.0 && value.is_finite())
        .unwrap_or(default)
}

/// Accepts both storage forms of a list answer: a JSON array or a
/// comma-joined string. A JSON array that fails to decode yields an empty
/// list.
fn decode_list<T, F>(key: &str, raw: Option<&str>, from_label: F) -> Vec<T>
where
    T: DeserializeOwned,
    F: Fn(&str) -> T,
{
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    if raw.starts_with('[') {
        match serde_json::from_str::<Vec<T>>(raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!("Discarding malformed {} answer: {}", key, err);
                Vec::new()
            }
        }
    } else {
        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(from_label)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RankingEntry {
    Item(RankedItem),
    Label(String),
}

fn decode_ranking(key: &str, raw: Option<&str>) -> Vec<RankedItem> {
    decode_list(key, raw, |label| RankingEntry::Label(label.to_string()))
        .into_iter()
        .map(|entry| match entry {
            RankingEntry::Item(item) => item,
            RankingEntry::Label(label) => RankedItem::from_label(&label),
        })
        .collect()
}
