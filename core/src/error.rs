use thiserror::Error;

/// Machine-readable error codes, stable across releases so callers can branch on them.
pub mod codes {
    pub const INVALID_PROFILE: &str = "invalid_profile";
    pub const PERIOD_MISSING: &str = "period_missing";
    pub const PERIOD_UNKNOWN: &str = "period_unknown";
    pub const SUMMARY_MISSING: &str = "summary_missing";
    pub const SUMMARY_FIELD_INVALID: &str = "summary_field_invalid";
    pub const GENERATED_AT_MISSING: &str = "generated_at_missing";
    pub const SCHEDULE_MISSING: &str = "schedule_missing";
    pub const MALFORMED_PLAN: &str = "malformed_plan";
    pub const INVALID_JSON: &str = "invalid_json";
}

/// A user profile that cannot be turned into a plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("days_per_week must be between 1 and 7, got {0}")]
    DaysPerWeekOutOfRange(u8),
    #[error("equipment must contain at least one entry (use \"none\" for bodyweight only)")]
    NoEquipment,
    #[error("session_minutes must be greater than zero")]
    ZeroSessionMinutes,
    #[error("custom period must span at least one week")]
    ZeroCustomWeeks,
    #[error("custom period may span at most {max} weeks, got {weeks}")]
    CustomWeeksOutOfRange { weeks: u32, max: u32 },
}

/// Structural rejection of a plan. Only the top-level shape is checked here;
/// nested gaps are reported as warnings by the completeness check instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("plan is not a JSON object")]
    NotAnObject,
    #[error("plan has no period")]
    MissingPeriod,
    #[error("unknown period '{0}', expected week, month or quarter")]
    UnknownPeriod(String),
    #[error("plan has no summary")]
    MissingSummary,
    #[error("summary.{field} is missing or invalid")]
    InvalidSummaryField { field: &'static str },
    #[error("plan has no generatedAt timestamp")]
    MissingGeneratedAt,
    #[error("{field} must be a non-empty array for period '{period}'")]
    MissingSchedule {
        field: &'static str,
        period: &'static str,
    },
    #[error("plan could not be decoded: {0}")]
    Malformed(String),
}

impl StructuralError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAnObject | Self::Malformed(_) => codes::MALFORMED_PLAN,
            Self::MissingPeriod => codes::PERIOD_MISSING,
            Self::UnknownPeriod(_) => codes::PERIOD_UNKNOWN,
            Self::MissingSummary => codes::SUMMARY_MISSING,
            Self::InvalidSummaryField { .. } => codes::SUMMARY_FIELD_INVALID,
            Self::MissingGeneratedAt => codes::GENERATED_AT_MISSING,
            Self::MissingSchedule { .. } => codes::SCHEDULE_MISSING,
        }
    }
}

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Profile(_) => codes::INVALID_PROFILE,
            Self::Structural(err) => err.code(),
            Self::Json(_) => codes::INVALID_JSON,
        }
    }
}

pub type Result<T, E = PlanError> = std::result::Result<T, E>;
