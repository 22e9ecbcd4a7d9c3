//! Training plan data model.
//!
//! This is also the shape expected from a parsed LLM response, so nested
//! fields are lenient on input (see `lenient`); gaps and dropped values are
//! reported by the completeness check rather than rejected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::PlanPeriod;
use crate::templates::FocusKind;

/// Reps are either a plain count or a literal range such as `"8-10"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Range(String),
}

/// One prescribed exercise instance. Either `reps` or `duration_sec` is the
/// primary prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub exercise_id: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name_zh: String,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, deserialize_with = "lenient::reps", skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub rest_sec: u32,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Warmup,
    Main,
    Accessory,
    Cooldown,
}

impl SessionPhase {
    pub const ALL: [SessionPhase; 4] = [
        SessionPhase::Warmup,
        SessionPhase::Main,
        SessionPhase::Accessory,
        SessionPhase::Cooldown,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Warmup => "warmup",
            SessionPhase::Main => "main",
            SessionPhase::Accessory => "accessory",
            SessionPhase::Cooldown => "cooldown",
        }
    }
}

/// One training day with its four ordered phase buckets. Empty buckets are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub day: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub focus: String,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub focus_kind: Option<FocusKind>,
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub total_minutes: u32,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub warmup: Vec<WorkoutSet>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub main: Vec<WorkoutSet>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub accessory: Vec<WorkoutSet>,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub cooldown: Vec<WorkoutSet>,
}

impl WorkoutSession {
    pub fn phase(&self, phase: SessionPhase) -> &[WorkoutSet] {
        match phase {
            SessionPhase::Warmup => &self.warmup,
            SessionPhase::Main => &self.main,
            SessionPhase::Accessory => &self.accessory,
            SessionPhase::Cooldown => &self.cooldown,
        }
    }

    /// All sets in phase order.
    pub fn sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        SessionPhase::ALL
            .into_iter()
            .flat_map(move |phase| self.phase(phase).iter())
    }

    pub fn is_empty(&self) -> bool {
        SessionPhase::ALL
            .into_iter()
            .all(|phase| self.phase(phase).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub week: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub sessions: Vec<WorkoutSession>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthPlan {
    #[serde(default, deserialize_with = "lenient::count_or_zero")]
    pub month: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::entries")]
    pub weeks: Vec<WeekPlan>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Schedule body, discriminated by `period` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum PlanSchedule {
    Week {
        #[serde(deserialize_with = "lenient::entries")]
        weeks: Vec<WeekPlan>,
    },
    Month {
        #[serde(deserialize_with = "lenient::entries")]
        weeks: Vec<WeekPlan>,
    },
    Quarter {
        #[serde(deserialize_with = "lenient::entries")]
        months: Vec<MonthPlan>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub goal: String,
    pub goal_zh: String,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub days_per_week: u32,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub session_minutes: u32,
    #[serde(deserialize_with = "lenient::count_or_zero")]
    pub total_weeks: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub phase_description: String,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub safety_notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    Ai,
    #[default]
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMetadata {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub generation_method: GenerationMethod,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub generated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub api_duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl GenerationMetadata {
    pub fn rule_based() -> Self {
        Self {
            generation_method: GenerationMethod::RuleBased,
            model: None,
            fallback_reason: None,
            generated_at: Utc::now(),
            api_duration_ms: None,
            reasoning: None,
        }
    }
}

/// A complete plan. Built once (by the generator or from a validated LLM
/// response) and treated as an immutable value afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingPlan {
    #[serde(flatten)]
    pub schedule: PlanSchedule,
    pub summary: PlanSummary,
    #[serde(flatten)]
    pub metadata: GenerationMetadata,
}

impl TrainingPlan {
    pub fn period(&self) -> PlanPeriod {
        match self.schedule {
            PlanSchedule::Week { .. } => PlanPeriod::Week,
            PlanSchedule::Month { .. } => PlanPeriod::Month,
            PlanSchedule::Quarter { .. } => PlanPeriod::Quarter,
        }
    }

    /// Every week in calendar order, flattening months for quarter plans.
    pub fn weeks(&self) -> Vec<&WeekPlan> {
        match &self.schedule {
            PlanSchedule::Week { weeks } | PlanSchedule::Month { weeks } => weeks.iter().collect(),
            PlanSchedule::Quarter { months } => {
                months.iter().flat_map(|month| month.weeks.iter()).collect()
            }
        }
    }

    pub fn sessions(&self) -> impl Iterator<Item = &WorkoutSession> {
        self.weeks()
            .into_iter()
            .flat_map(|week| week.sessions.iter())
    }

    pub fn sets(&self) -> impl Iterator<Item = &WorkoutSet> {
        self.sessions().flat_map(|session| session.sets())
    }
}

/// Field decoders for plans that arrive as LLM output. A value of the wrong
/// type decodes to the field's default instead of failing the whole plan;
/// [`crate::validate::check_completeness`] reports what was dropped.
pub(crate) mod lenient {
    use chrono::{DateTime, Utc};
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::Reps;

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }

    /// Array entries that decode; non-objects are skipped, a non-array is empty.
    pub fn entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let Value::Array(items) = Value::deserialize(deserializer)? else {
            return Ok(Vec::new());
        };
        Ok(items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }

    pub fn count<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(as_count(&value).and_then(|n| T::try_from(n).ok()))
    }

    pub fn count_or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64> + Default,
    {
        count(deserializer).map(Option::unwrap_or_default)
    }

    pub fn reps<'de, D>(deserializer: D) -> Result<Option<Reps>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(range) => Some(Reps::Range(range)),
            other => as_count(&other)
                .and_then(|n| u32::try_from(n).ok())
                .map(Reps::Count),
        })
    }

    pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(as_timestamp(&value).unwrap_or_else(Utc::now))
    }

    /// Non-negative number, or numeric string, rounded to a whole count.
    pub fn as_count(value: &Value) -> Option<u64> {
        let number = match value {
            Value::Number(n) => match n.as_u64() {
                Some(whole) => return Some(whole),
                None => n.as_f64()?,
            },
            Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        (number.is_finite() && number >= 0.0).then(|| number.round() as u64)
    }

    /// RFC 3339 string or epoch milliseconds.
    pub fn as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
            _ => None,
        }
    }
}
