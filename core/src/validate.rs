//! Plan validation.
//!
//! Two separate contracts: [`validate`] is the strict gate deciding whether a
//! plan is usable at all, [`check_completeness`] only reports advisory
//! warnings about nested gaps and never fails a plan.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::StructuralError;
use crate::plan::lenient::{as_count, as_timestamp};
use crate::plan::{PlanSchedule, TrainingPlan, WeekPlan};
use crate::profile::PlanPeriod;

const SUMMARY_LABELS: [&str; 2] = ["goal", "goalZh"];
const SUMMARY_COUNTS: [&str; 3] = ["daysPerWeek", "sessionMinutes", "totalWeeks"];
const SET_COUNTS: [&str; 4] = ["sets", "durationSec", "restSec", "rpe"];
const PHASES: [&str; 4] = ["warmup", "main", "accessory", "cooldown"];

/// Non-blocking finding about a plan that passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanWarning {
    /// JSON path of the offending field, e.g. `weeks[0].sessions`
    pub field: String,
    pub message: String,
    /// Always "warning"; completeness findings never reject a plan
    pub severity: String,
}

impl PlanWarning {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: "warning".to_string(),
        }
    }
}

/// Strict structural check of a plan from either generation path. Only the
/// top level is inspected; on success the value is decoded into a typed plan,
/// with mistyped nested values falling back to defaults.
pub fn validate(data: &Value) -> Result<TrainingPlan, StructuralError> {
    let object = data.as_object().ok_or(StructuralError::NotAnObject)?;

    let period = match object.get("period") {
        None | Some(Value::Null) => return Err(StructuralError::MissingPeriod),
        Some(Value::String(raw)) => PlanPeriod::ALL
            .into_iter()
            .find(|period| period.as_str() == raw.as_str())
            .ok_or_else(|| StructuralError::UnknownPeriod(raw.clone()))?,
        Some(other) => return Err(StructuralError::UnknownPeriod(other.to_string())),
    };

    let summary = object
        .get("summary")
        .and_then(Value::as_object)
        .ok_or(StructuralError::MissingSummary)?;
    for field in SUMMARY_LABELS {
        let present = summary
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|label| !label.trim().is_empty());
        if !present {
            return Err(StructuralError::InvalidSummaryField { field });
        }
    }
    for field in SUMMARY_COUNTS {
        if !summary.get(field).is_some_and(Value::is_number) {
            return Err(StructuralError::InvalidSummaryField { field });
        }
    }

    if object.get("generatedAt").is_none_or(Value::is_null) {
        return Err(StructuralError::MissingGeneratedAt);
    }

    let field = schedule_field(period);
    let has_schedule = object
        .get(field)
        .and_then(Value::as_array)
        .is_some_and(|entries| !entries.is_empty());
    if !has_schedule {
        return Err(StructuralError::MissingSchedule {
            field,
            period: period.as_str(),
        });
    }

    serde_json::from_value(data.clone()).map_err(|e| StructuralError::Malformed(e.to_string()))
}

fn schedule_field(period: PlanPeriod) -> &'static str {
    match period {
        PlanPeriod::Week | PlanPeriod::Month => "weeks",
        PlanPeriod::Quarter => "months",
    }
}

/// Advisory check for missing nested week/session arrays and for nested values
/// the typed decode drops. Works on raw JSON so it can describe gaps in LLM
/// output that the typed model would paper over with defaults.
pub fn check_completeness(data: &Value) -> Vec<PlanWarning> {
    let mut warnings = Vec::new();
    let Some(object) = data.as_object() else {
        return warnings;
    };

    if let Some(generated_at) = object.get("generatedAt").filter(|v| !v.is_null()) {
        if as_timestamp(generated_at).is_none() {
            warnings.push(PlanWarning::new(
                "generatedAt",
                "not an RFC 3339 timestamp or epoch milliseconds; replaced with the decode time",
            ));
        }
    }

    match object.get("period").and_then(Value::as_str) {
        Some("quarter") => {
            let Some(months) = object.get("months").and_then(Value::as_array) else {
                return warnings;
            };
            for (m, month) in months.iter().enumerate() {
                let path = format!("months[{m}]");
                match month.as_object() {
                    Some(month) => check_weeks(month, &path, &mut warnings),
                    None => warnings.push(PlanWarning::new(path, "month entry is not an object")),
                }
            }
        }
        Some(_) => check_weeks(object, "", &mut warnings),
        None => {}
    }
    warnings
}

fn check_weeks(parent: &Map<String, Value>, prefix: &str, warnings: &mut Vec<PlanWarning>) {
    let path = join(prefix, "weeks");
    let Some(weeks) = parent.get("weeks").and_then(Value::as_array) else {
        warnings.push(PlanWarning::new(path, "weeks array is missing"));
        return;
    };
    if weeks.is_empty() {
        warnings.push(PlanWarning::new(path, "weeks array is empty"));
        return;
    }

    for (w, week) in weeks.iter().enumerate() {
        let week_path = format!("{path}[{w}]");
        if !week.is_object() {
            warnings.push(PlanWarning::new(week_path, "week entry is not an object"));
            continue;
        }
        let Some(sessions) = week.get("sessions").and_then(Value::as_array) else {
            warnings.push(PlanWarning::new(
                format!("{week_path}.sessions"),
                "sessions array is missing",
            ));
            continue;
        };
        if sessions.is_empty() {
            warnings.push(PlanWarning::new(
                format!("{week_path}.sessions"),
                "week has no sessions",
            ));
        }
        for (s, session) in sessions.iter().enumerate() {
            let session_path = format!("{week_path}.sessions[{s}]");
            if !session.is_object() {
                warnings.push(PlanWarning::new(session_path, "session entry is not an object"));
                continue;
            }
            let phases: Vec<(&str, &Vec<Value>)> = PHASES
                .into_iter()
                .filter_map(|phase| Some((phase, session.get(phase)?.as_array()?)))
                .collect();
            if phases.is_empty() {
                warnings.push(PlanWarning::new(session_path, "session has no phase arrays"));
                continue;
            }
            if phases.iter().all(|(_, sets)| sets.is_empty()) {
                warnings.push(PlanWarning::new(session_path.as_str(), "session has no exercises"));
            }
            for (phase, sets) in phases {
                for (i, set) in sets.iter().enumerate() {
                    check_set(set, &format!("{session_path}.{phase}[{i}]"), warnings);
                }
            }
        }
    }
}

fn check_set(set: &Value, path: &str, warnings: &mut Vec<PlanWarning>) {
    let Some(set) = set.as_object() else {
        warnings.push(PlanWarning::new(path, "set entry is not an object; dropped"));
        return;
    };
    for field in SET_COUNTS {
        if set.get(field).is_some_and(|value| as_count(value).is_none()) {
            warnings.push(PlanWarning::new(
                format!("{path}.{field}"),
                "not a non-negative number; dropped",
            ));
        }
    }
    if let Some(reps) = set.get("reps") {
        if !reps.is_string() && as_count(reps).is_none() {
            warnings.push(PlanWarning::new(
                format!("{path}.reps"),
                "neither a count nor a range string; dropped",
            ));
        }
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

impl TrainingPlan {
    /// Typed counterpart of [`check_completeness`]: empty months, weeks
    /// without sessions and sessions with all four phases empty.
    pub fn completeness_warnings(&self) -> Vec<PlanWarning> {
        let mut warnings = Vec::new();
        match &self.schedule {
            PlanSchedule::Week { weeks } | PlanSchedule::Month { weeks } => {
                week_warnings(weeks, "weeks", &mut warnings);
            }
            PlanSchedule::Quarter { months } => {
                for (m, month) in months.iter().enumerate() {
                    let path = format!("months[{m}].weeks");
                    if month.weeks.is_empty() {
                        warnings.push(PlanWarning::new(path.as_str(), "month has no weeks"));
                    }
                    week_warnings(&month.weeks, &path, &mut warnings);
                }
            }
        }
        warnings
    }
}

fn week_warnings(weeks: &[WeekPlan], path: &str, warnings: &mut Vec<PlanWarning>) {
    for (w, week) in weeks.iter().enumerate() {
        if week.sessions.is_empty() {
            warnings.push(PlanWarning::new(
                format!("{path}[{w}].sessions"),
                "week has no sessions",
            ));
        }
        for (s, session) in week.sessions.iter().enumerate() {
            if session.is_empty() {
                warnings.push(PlanWarning::new(
                    format!("{path}[{w}].sessions[{s}]"),
                    format!("day {} has no exercises", session.day),
                ));
            }
        }
    }
}
