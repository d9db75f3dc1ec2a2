use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::types::plan::{DayWorkout, ParsedExercise, ParsedWeekPlan, Weekday};

const DEFAULT_REST_SECONDS: u32 = 90;
const DEFAULT_DAY_DURATION: &str = "45-60 min";

static DAY_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)\s*-\s*(.*?)\s*$").ok()
});

static EXERCISE_LINE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*(.*?):\s*(\d+)\s*[xX]\s*(\d+)(?:\s*\((.*?)\))?").ok()
});

/// Turns free-form weekly plan text into per-day workouts.
///
/// Sections are separated by blank lines. A section counts only when its
/// first line reads `<Weekday> - <Type>`, and only lines shaped like
/// `- Name: 3x10 (guidance)` become exercises. Anything else is skipped.
/// A weekday that appears twice keeps its last section.
pub fn parse_week_plan(text: &str) -> ParsedWeekPlan {
    let week: ParsedWeekPlan = split_sections(text)
        .into_iter()
        .filter_map(|lines| parse_section(&lines))
        .collect();

    tracing::debug!("Parsed {} workout days from plan text", week.len());
    week
}

fn split_sections(text: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                sections.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }

    sections
}

fn parse_section(lines: &[&str]) -> Option<(Weekday, DayWorkout)> {
    let (header, body) = lines.split_first()?;
    let (day, workout_type) = parse_header(header)?;

    let exercises = body.iter().filter_map(|line| parse_exercise(line)).collect();

    Some((
        day,
        DayWorkout {
            workout_type,
            exercises,
            completed: false,
            duration: DEFAULT_DAY_DURATION.to_string(),
        },
    ))
}

fn parse_header(line: &str) -> Option<(Weekday, String)> {
    let captures = DAY_HEADER.as_ref()?.captures(line)?;
    let day = captures.get(1)?.as_str().parse().ok()?;
    let workout_type = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
    Some((day, workout_type.to_string()))
}

fn parse_exercise(line: &str) -> Option<ParsedExercise> {
    let captures = EXERCISE_LINE.as_ref()?.captures(line)?;

    let name = captures.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    let sets = captures.get(2)?.as_str().parse().ok()?;
    let reps = captures.get(3)?.as_str().parse().ok()?;
    let guidance = captures
        .get(4)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(ParsedExercise {
        id: format!("{}-{}", name, Uuid::new_v4()),
        name: name.to_string(),
        sets,
        reps,
        notes: guidance.clone(),
        guidance,
        weight: 0,
        rest_time: DEFAULT_REST_SECONDS,
        completed: false,
        history: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_day() {
        let week = parse_week_plan("Monday - Strength\n- Squats: 3x10 (keep back straight)\n- Bench: 3x8");

        assert_eq!(week.len(), 1);
        let monday = &week[&Weekday::Monday];
        assert_eq!(monday.workout_type, "Strength");
        assert_eq!(monday.exercises.len(), 2);

        let squats = &monday.exercises[0];
        assert_eq!(squats.name, "Squats");
        assert_eq!((squats.sets, squats.reps), (3, 10));
        assert_eq!(squats.guidance, "keep back straight");
        assert_eq!(squats.notes, "keep back straight");
        assert_eq!(squats.weight, 0);
        assert_eq!(squats.rest_time, 90);
        assert!(!squats.completed);
        assert!(squats.id.starts_with("Squats-"));

        let bench = &monday.exercises[1];
        assert_eq!(bench.name, "Bench");
        assert_eq!((bench.sets, bench.reps), (3, 8));
        assert_eq!(bench.guidance, "");
    }

    #[test]
    fn text_without_headers_is_empty() {
        assert!(parse_week_plan("Here is your plan!\n- Squats: 3x10").is_empty());
        assert!(parse_week_plan("").is_empty());
    }

    #[test]
    fn drops_unmatched_lines_and_sections() {
        let text = "Great work this week.\n\n\
                    Wednesday - Lower Body\n\
                    Warm up first\n\
                    - Lunges: 3x12\n\
                    - Foam roll for ten minutes\n\
                    - Box Jumps: 4x6 (soft landing)\n\n\
                    Funday - Rest\n\
                    - Nap: 1x1";
        let week = parse_week_plan(text);

        assert_eq!(week.len(), 1);
        let names: Vec<&str> = week[&Weekday::Wednesday]
            .exercises
            .iter()
            .map(|exercise| exercise.name.as_str())
            .collect();
        assert_eq!(names, vec!["Lunges", "Box Jumps"]);
    }

    #[test]
    fn repeated_day_keeps_last_section() {
        let text = "Friday - Speed\n- Sprints: 6x1\n\nFriday - Recovery\n- Stretch: 1x1 (easy)";
        let week = parse_week_plan(text);

        assert_eq!(week.len(), 1);
        let friday = &week[&Weekday::Friday];
        assert_eq!(friday.workout_type, "Recovery");
        assert_eq!(friday.exercises.len(), 1);
        assert_eq!(friday.exercises[0].name, "Stretch");
    }

    #[test]
    fn handles_crlf_and_header_only_days() {
        let text = "Tuesday - Arm Care\r\n- Bands: 3x15 (light)\r\n\r\nSaturday - Off\r\n";
        let week = parse_week_plan(text);

        assert_eq!(week[&Weekday::Tuesday].exercises[0].guidance, "light");
        assert!(week[&Weekday::Saturday].exercises.is_empty());
        assert_eq!(week[&Weekday::Saturday].workout_type, "Off");
    }
}
