use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plan as returned by the generation backend. Every section is optional
/// and loosely shaped, so sections are kept as raw JSON and classified on
/// use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmups: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drills: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkoutPlan {
    pub fn section(&self, kind: SectionKind) -> Option<&Value> {
        match kind {
            SectionKind::Warmups => self.warmups.as_ref(),
            SectionKind::Drills => self.drills.as_ref(),
            SectionKind::Strength => self.strength.as_ref(),
            SectionKind::Mobility => self.mobility.as_ref(),
            SectionKind::Recovery => self.recovery.as_ref(),
        }
    }
}

/// Body returned by `POST {backend}/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    #[serde(default = "default_status")]
    pub status: String,
    pub plan: WorkoutPlan,
}

fn default_status() -> String {
    "success".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    Backend,
    Fallback,
}

/// Last generated plan, persisted under `structuredWorkoutPlan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    pub plan: WorkoutPlan,
    pub source: PlanSource,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Warmups,
    Drills,
    Strength,
    Mobility,
    Recovery,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Warmups,
        SectionKind::Drills,
        SectionKind::Strength,
        SectionKind::Mobility,
        SectionKind::Recovery,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "warmups" => Some(SectionKind::Warmups),
            "drills" => Some(SectionKind::Drills),
            "strength" => Some(SectionKind::Strength),
            "mobility" => Some(SectionKind::Mobility),
            "recovery" => Some(SectionKind::Recovery),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SectionKind::Warmups => "warmups",
            SectionKind::Drills => "drills",
            SectionKind::Strength => "strength",
            SectionKind::Mobility => "mobility",
            SectionKind::Recovery => "recovery",
        }
    }
}

/// Runtime shape of one plan section, decided once per section.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanSection<'a> {
    Missing,
    Text(&'a str),
    StringList(Vec<&'a str>),
    /// Array holding at least one non-string element.
    ObjectList(&'a [Value]),
    StructuredBlock(&'a Map<String, Value>),
}

impl<'a> PlanSection<'a> {
    pub fn classify(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => PlanSection::Missing,
            Some(Value::String(text)) => PlanSection::Text(text),
            Some(Value::Array(items)) => {
                let strings: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                match strings {
                    Some(strings) => PlanSection::StringList(strings),
                    None => PlanSection::ObjectList(items),
                }
            }
            Some(Value::Object(block)) => PlanSection::StructuredBlock(block),
            Some(_) => PlanSection::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Simple,
    Strength,
    Recovery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedExercise {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monday" => Ok(Weekday::Monday),
            "Tuesday" => Ok(Weekday::Tuesday),
            "Wednesday" => Ok(Weekday::Wednesday),
            "Thursday" => Ok(Weekday::Thursday),
            "Friday" => Ok(Weekday::Friday),
            "Saturday" => Ok(Weekday::Saturday),
            "Sunday" => Ok(Weekday::Sunday),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedExercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub guidance: String,
    pub weight: u32,
    pub rest_time: u32,
    pub completed: bool,
    pub notes: String,
    pub history: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayWorkout {
    #[serde(rename = "type")]
    pub workout_type: String,
    pub exercises: Vec<ParsedExercise>,
    pub completed: bool,
    pub duration: String,
}

pub type ParsedWeekPlan = BTreeMap<Weekday, DayWorkout>;
