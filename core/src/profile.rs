//! User profile supplied once per generation request.
//!
//! Goal, experience, equipment, constraint and period are closed enums, so
//! every table lookup is an exhaustive match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Fitness,
    Rehab,
    General,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::FatLoss,
        Goal::MuscleGain,
        Goal::Fitness,
        Goal::Rehab,
        Goal::General,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Goal::FatLoss => "fat_loss",
            Goal::MuscleGain => "muscle_gain",
            Goal::Fitness => "fitness",
            Goal::Rehab => "rehab",
            Goal::General => "general",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

/// Equipment the user has access to. `None` means bodyweight only; `Gym` means a
/// fully equipped gym and covers every other item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    None,
    Dumbbells,
    Barbell,
    Kettlebell,
    ResistanceBand,
    PullUpBar,
    Bench,
    JumpRope,
    Gym,
}

impl Equipment {
    pub const ALL: [Equipment; 9] = [
        Equipment::None,
        Equipment::Dumbbells,
        Equipment::Barbell,
        Equipment::Kettlebell,
        Equipment::ResistanceBand,
        Equipment::PullUpBar,
        Equipment::Bench,
        Equipment::JumpRope,
        Equipment::Gym,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Equipment::None => "none",
            Equipment::Dumbbells => "dumbbells",
            Equipment::Barbell => "barbell",
            Equipment::Kettlebell => "kettlebell",
            Equipment::ResistanceBand => "resistance_band",
            Equipment::PullUpBar => "pull_up_bar",
            Equipment::Bench => "bench",
            Equipment::JumpRope => "jump_rope",
            Equipment::Gym => "gym",
        }
    }
}

/// Body limitations. Exercises carry these as contraindication tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    KneeIssue,
    BackIssue,
    ShoulderIssue,
    WristIssue,
    AnkleIssue,
    Hypertension,
    /// Free-text limitation; see `UserProfile::constraint_notes`.
    Other,
}

impl Constraint {
    pub const ALL: [Constraint; 7] = [
        Constraint::KneeIssue,
        Constraint::BackIssue,
        Constraint::ShoulderIssue,
        Constraint::WristIssue,
        Constraint::AnkleIssue,
        Constraint::Hypertension,
        Constraint::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Constraint::KneeIssue => "knee_issue",
            Constraint::BackIssue => "back_issue",
            Constraint::ShoulderIssue => "shoulder_issue",
            Constraint::WristIssue => "wrist_issue",
            Constraint::AnkleIssue => "ankle_issue",
            Constraint::Hypertension => "hypertension",
            Constraint::Other => "other",
        }
    }
}

/// The three plan shapes the assembler produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPeriod {
    Week,
    Month,
    Quarter,
}

impl PlanPeriod {
    pub const ALL: [PlanPeriod; 3] = [PlanPeriod::Week, PlanPeriod::Month, PlanPeriod::Quarter];

    pub const fn as_str(self) -> &'static str {
        match self {
            PlanPeriod::Week => "week",
            PlanPeriod::Month => "month",
            PlanPeriod::Quarter => "quarter",
        }
    }

    pub const fn total_weeks(self) -> u32 {
        match self {
            PlanPeriod::Week => 1,
            PlanPeriod::Month => 4,
            PlanPeriod::Quarter => 12,
        }
    }
}

/// What the user asked for. `Custom` is normalized by the generator's
/// `CustomPeriodPolicy` before any assembly happens.
/// Longest custom plan accepted, one year of weeks.
pub const MAX_CUSTOM_WEEKS: u32 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedPeriod {
    Week,
    Month,
    Quarter,
    Custom { weeks: u32 },
}

impl From<PlanPeriod> for RequestedPeriod {
    fn from(period: PlanPeriod) -> Self {
        match period {
            PlanPeriod::Week => RequestedPeriod::Week,
            PlanPeriod::Month => RequestedPeriod::Month,
            PlanPeriod::Quarter => RequestedPeriod::Quarter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub goal: Goal,
    pub experience: ExperienceLevel,
    pub equipment: BTreeSet<Equipment>,
    #[serde(default)]
    pub constraints: BTreeSet<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_notes: Option<String>,
    pub days_per_week: u8,
    pub session_minutes: u32,
    pub period: RequestedPeriod,
}

impl UserProfile {
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(1..=7).contains(&self.days_per_week) {
            return Err(ProfileError::DaysPerWeekOutOfRange(self.days_per_week));
        }
        if self.equipment.is_empty() {
            return Err(ProfileError::NoEquipment);
        }
        if self.session_minutes == 0 {
            return Err(ProfileError::ZeroSessionMinutes);
        }
        if let RequestedPeriod::Custom { weeks } = self.period {
            if weeks == 0 {
                return Err(ProfileError::ZeroCustomWeeks);
            }
            if weeks > MAX_CUSTOM_WEEKS {
                return Err(ProfileError::CustomWeeksOutOfRange {
                    weeks,
                    max: MAX_CUSTOM_WEEKS,
                });
            }
        }
        Ok(())
    }

    /// Notes attached to the `other` constraint, trimmed; `None` when blank.
    pub fn other_notes(&self) -> Option<&str> {
        self.constraint_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }
}

/// Parse failure for the enum `FromStr` impls, carrying the rejected input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_from_str {
    ($ty:ty, $kind:literal) => {
        impl ::std::str::FromStr for $ty {
            type Err = $crate::profile::UnknownValue;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase().replace('-', "_");
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| $crate::profile::UnknownValue {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use impl_from_str;

impl_from_str!(Goal, "goal");
impl_from_str!(ExperienceLevel, "experience level");
impl_from_str!(Equipment, "equipment");
impl_from_str!(Constraint, "constraint");
impl_from_str!(PlanPeriod, "period");
