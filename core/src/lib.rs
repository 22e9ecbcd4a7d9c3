//! Rule-based workout plan generation.
//!
//! A [`UserProfile`] goes through the [`PlanGenerator`], which composes one
//! session per training day from the availability-filtered [`catalog`] and
//! scales volume with the periodization tables in [`templates`]. Plans from
//! either the generator or an LLM reply ([`ai`]) pass the same strict gate in
//! [`validate`].

pub mod ai;
pub mod catalog;
pub mod composer;
pub mod error;
pub mod filter;
pub mod generator;
pub mod plan;
pub mod profile;
pub mod templates;
pub mod validate;

pub use error::{PlanError, ProfileError, Result, StructuralError};
pub use generator::{CustomPeriodPolicy, GeneratorConfig, PlanGenerator, generate_plan};
pub use plan::{TrainingPlan, WeekPlan, WorkoutSession, WorkoutSet};
pub use profile::{
    Constraint, Equipment, ExperienceLevel, Goal, PlanPeriod, RequestedPeriod, UserProfile,
};
pub use validate::{PlanWarning, check_completeness, validate};
