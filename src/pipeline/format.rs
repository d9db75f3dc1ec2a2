use serde_json::{Map, Value};

use crate::types::plan::{ExerciseKind, FormattedExercise, PlanSection, SectionKind};

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_PERCENT: u32 = 75;
const UNNAMED_EXERCISE: &str = "Exercise";

/// Formats a section looked up by its raw key. Unknown keys yield nothing.
pub fn format_section_key(key: &str, raw: Option<&Value>) -> Vec<FormattedExercise> {
    match SectionKind::from_key(key) {
        Some(kind) => format_section(kind, raw),
        None => {
            tracing::debug!("Ignoring unknown plan section {:?}", key);
            Vec::new()
        }
    }
}

/// Normalizes one plan section into display records. Shapes that do not
/// fit the section produce an empty list.
pub fn format_section(kind: SectionKind, raw: Option<&Value>) -> Vec<FormattedExercise> {
    let section = PlanSection::classify(raw);
    match kind {
        SectionKind::Warmups | SectionKind::Drills | SectionKind::Mobility => format_simple(section),
        SectionKind::Strength => format_strength(section),
        SectionKind::Recovery => format_recovery(section),
    }
}

fn format_simple(section: PlanSection<'_>) -> Vec<FormattedExercise> {
    match section {
        PlanSection::StringList(names) => names
            .into_iter()
            .enumerate()
            .map(|(id, name)| record(id, name.to_string(), ExerciseKind::Simple))
            .collect(),
        PlanSection::ObjectList(items) => items
            .iter()
            .enumerate()
            .map(|(id, item)| {
                let mut exercise = record(id, item_name(item), ExerciseKind::Simple);
                exercise.duration = item.get("duration").and_then(text_of);
                exercise
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn format_strength(section: PlanSection<'_>) -> Vec<FormattedExercise> {
    let PlanSection::StructuredBlock(block) = section else {
        return Vec::new();
    };
    let Some(Value::Array(exercises)) = block.get("exercises") else {
        return Vec::new();
    };

    let sets = positive_int(block, "sets").unwrap_or(DEFAULT_SETS);
    let reps = positive_int(block, "reps").unwrap_or(DEFAULT_REPS);
    let percent = positive_int(block, "percent").unwrap_or(DEFAULT_PERCENT);

    exercises
        .iter()
        .enumerate()
        .map(|(id, exercise)| FormattedExercise {
            sets: Some(sets),
            reps: Some(reps),
            percent: Some(percent),
            ..record(id, item_name(exercise), ExerciseKind::Strength)
        })
        .collect()
}

fn format_recovery(section: PlanSection<'_>) -> Vec<FormattedExercise> {
    let details = match section {
        PlanSection::StructuredBlock(block) => PlanSection::classify(block.get("details")),
        other => other,
    };

    match details {
        PlanSection::Text(text) => vec![record(0, text.to_string(), ExerciseKind::Recovery)],
        PlanSection::StringList(items) => items
            .into_iter()
            .enumerate()
            .map(|(id, item)| record(id, item.to_string(), ExerciseKind::Recovery))
            .collect(),
        PlanSection::ObjectList(items) => items
            .iter()
            .enumerate()
            .map(|(id, item)| record(id, item_name(item), ExerciseKind::Recovery))
            .collect(),
        PlanSection::StructuredBlock(_) | PlanSection::Missing => Vec::new(),
    }
}

fn record(id: usize, name: String, kind: ExerciseKind) -> FormattedExercise {
    FormattedExercise {
        id,
        name,
        kind,
        sets: None,
        reps: None,
        percent: None,
        duration: None,
        completed: false,
    }
}

fn item_name(item: &Value) -> String {
    match item {
        Value::Object(fields) => fields
            .get("name")
            .and_then(text_of)
            .unwrap_or_else(|| UNNAMED_EXERCISE.to_string()),
        other => text_of(other).unwrap_or_else(|| UNNAMED_EXERCISE.to_string()),
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Zero counts as absent; numeric strings are accepted.
fn positive_int(block: &Map<String, Value>, field: &str) -> Option<u32> {
    let value = block.get(field)?;
    let number = match value {
        Value::Number(number) => number.as_u64().or_else(|| number.as_f64().map(|f| f as u64)),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(number).ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strength_shares_parent_prescription() {
        let raw = json!({"sets": 4, "reps": 6, "percent": 80, "exercises": ["Squats", "Deadlift"]});
        let formatted = format_section_key("strength", Some(&raw));

        assert_eq!(formatted.len(), 2);
        for (idx, exercise) in formatted.iter().enumerate() {
            assert_eq!(exercise.id, idx);
            assert_eq!(exercise.kind, ExerciseKind::Strength);
            assert_eq!((exercise.sets, exercise.reps, exercise.percent), (Some(4), Some(6), Some(80)));
            assert!(!exercise.completed);
        }
        assert_eq!(formatted[1].name, "Deadlift");
    }

    #[test]
    fn strength_defaults_missing_prescription() {
        let raw = json!({"reps": 0, "percent": "85", "exercises": ["Push-ups"]});
        let formatted = format_section(SectionKind::Strength, Some(&raw));

        assert_eq!(formatted[0].sets, Some(3));
        assert_eq!(formatted[0].reps, Some(10));
        assert_eq!(formatted[0].percent, Some(85));
    }

    #[test]
    fn strength_without_exercises_is_empty() {
        assert!(format_section(SectionKind::Strength, Some(&json!({"sets": 3}))).is_empty());
        assert!(format_section(SectionKind::Strength, Some(&json!(["Squats"]))).is_empty());
    }

    #[test]
    fn missing_section_is_empty() {
        assert!(format_section_key("drills", None).is_empty());
        assert!(format_section_key("recovery", Some(&Value::Null)).is_empty());
    }

    #[test]
    fn simple_sections_take_strings_and_objects() {
        let raw = json!(["Light jog", {"name": "Arm circles", "duration": "2 min"}, {"reps": 10}]);
        let formatted = format_section_key("warmups", Some(&raw));

        let names: Vec<&str> = formatted.iter().map(|exercise| exercise.name.as_str()).collect();
        assert_eq!(names, vec!["Light jog", "Arm circles", "Exercise"]);
        assert!(formatted.iter().all(|exercise| exercise.kind == ExerciseKind::Simple));
        assert_eq!(formatted[1].duration.as_deref(), Some("2 min"));
        assert_eq!(formatted[0].sets, None);
    }

    #[test]
    fn simple_section_rejects_non_lists() {
        assert!(format_section_key("mobility", Some(&json!("Hip rotations"))).is_empty());
        assert!(format_section_key("mobility", Some(&json!({"name": "Hip rotations"}))).is_empty());
    }

    #[test]
    fn recovery_accepts_scalar_and_list_details() {
        let scalar = format_section_key("recovery", Some(&json!({"details": "Rest and hydrate properly"})));
        assert_eq!(scalar.len(), 1);
        assert_eq!(scalar[0].id, 0);
        assert_eq!(scalar[0].name, "Rest and hydrate properly");
        assert_eq!(scalar[0].kind, ExerciseKind::Recovery);

        let listed = format_section_key(
            "recovery",
            Some(&json!({"details": ["Ice shoulder", "Sleep 9 hours"], "coaches_message": "Good week"})),
        );
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].name, "Sleep 9 hours");

        let bare = format_section_key("recovery", Some(&json!("Walk 20 minutes")));
        assert_eq!(bare[0].name, "Walk 20 minutes");

        assert!(format_section_key("recovery", Some(&json!({"coaches_message": "Rest"}))).is_empty());
    }

    #[test]
    fn unknown_section_is_empty() {
        assert!(format_section_key("cooldown", Some(&json!(["Walk"]))).is_empty());
    }
}
