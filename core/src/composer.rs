//! Session composer: builds one training day's warmup, main, accessory and
//! cooldown buckets from availability-filtered exercise pools.
//!
//! Selection is random without replacement within a call, using the
//! randomness source handed in by the caller. Nothing is remembered between
//! sessions, so the same exercise may show up on different days. An empty
//! filtered pool yields an empty bucket, never an error.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{self, Exercise, ExerciseCategory};
use crate::filter::filter_available;
use crate::plan::{Reps, WorkoutSession, WorkoutSet};
use crate::profile::{Goal, UserProfile};
use crate::templates::{
    self, ExperienceModifier, GoalTemplate, IntensityLevel, SplitDay,
};

const WARMUP_PICKS: usize = 3;
const WARMUP_SECONDS: u32 = 60;
const ACCESSORY_PICKS: usize = 2;
const ACCESSORY_REPS: u32 = 12;
const PLANK_HOLD_SECONDS: u32 = 45;
const ACCESSORY_REST_SECONDS: f64 = 45.0;
const COOLDOWN_PICKS: usize = 4;
const STRETCH_HOLD_SECONDS: u32 = 45;
const STRENGTH_REST_SECONDS: f64 = 90.0;
const CARDIO_BASE_SECONDS: f64 = 300.0;
const CARDIO_REST_SECONDS: u32 = 60;
const HIIT_BASE_ROUNDS: f64 = 3.0;
const HIIT_WORK_SECONDS: u32 = 30;
const HIIT_REST_SECONDS: u32 = 30;

pub struct SessionComposer<'a> {
    profile: &'a UserProfile,
    exercises: &'a [Exercise],
    goal: &'static GoalTemplate,
    experience: &'static ExperienceModifier,
}

impl<'a> SessionComposer<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self::with_catalog(profile, catalog::all())
    }

    /// Compose against a custom exercise table instead of the built-in catalog.
    pub fn with_catalog(profile: &'a UserProfile, exercises: &'a [Exercise]) -> Self {
        Self {
            profile,
            exercises,
            goal: templates::goal_template(profile.goal),
            experience: templates::experience_modifier(profile.experience),
        }
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        day: u32,
        split_day: &SplitDay,
        volume_multiplier: f64,
        rng: &mut R,
    ) -> WorkoutSession {
        let warmup = self.warmup(rng);
        let main = self.main_block(split_day, volume_multiplier, rng);
        let accessory = self.accessory(volume_multiplier, rng);
        let cooldown = self.cooldown(rng);

        tracing::debug!(
            day,
            focus = split_day.label,
            volume_multiplier,
            warmup = warmup.len(),
            main = main.len(),
            accessory = accessory.len(),
            cooldown = cooldown.len(),
            "composed session"
        );

        WorkoutSession {
            day,
            focus: split_day.label_zh.to_string(),
            focus_kind: Some(split_day.focus),
            total_minutes: self.profile.session_minutes,
            warmup,
            main,
            accessory,
            cooldown,
        }
    }

    fn available(&self, category: ExerciseCategory) -> Vec<&'a Exercise> {
        let pool: Vec<&'a Exercise> = self
            .exercises
            .iter()
            .filter(|e| e.category == category)
            .collect();
        filter_available(&pool, &self.profile.equipment, &self.profile.constraints)
    }

    fn warmup<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WorkoutSet> {
        pick(&self.available(ExerciseCategory::Warmup), WARMUP_PICKS, rng)
            .into_iter()
            .map(|exercise| WorkoutSet {
                duration_sec: Some(WARMUP_SECONDS),
                rest_sec: 0,
                notes: Some("动态热身，逐步提高心率".to_string()),
                ..base_set(exercise)
            })
            .collect()
    }

    fn main_block<R: Rng + ?Sized>(
        &self,
        split_day: &SplitDay,
        volume_multiplier: f64,
        rng: &mut R,
    ) -> Vec<WorkoutSet> {
        let (upper_picks, lower_picks) = split_day.focus.strength_picks();
        let mut strength = pick(&self.available(ExerciseCategory::Upper), upper_picks, rng);
        strength.extend(pick(&self.available(ExerciseCategory::Lower), lower_picks, rng));

        let mut sets: Vec<WorkoutSet> = strength
            .into_iter()
            .map(|exercise| {
                create_strength_set(exercise, self.experience, volume_multiplier, self.profile.goal)
            })
            .collect();

        if self.goal.wants_cardio() {
            if let Some(exercise) = pick(&self.available(ExerciseCategory::Cardio), 1, rng).pop() {
                sets.push(WorkoutSet {
                    sets: Some(1),
                    duration_sec: Some(scale(CARDIO_BASE_SECONDS, volume_multiplier)),
                    rest_sec: CARDIO_REST_SECONDS,
                    rpe: Some(7),
                    notes: Some("中等强度持续有氧".to_string()),
                    ..base_set(exercise)
                });
            }
        }

        if self.goal.wants_hiit() {
            if let Some(exercise) = pick(&self.available(ExerciseCategory::Hiit), 1, rng).pop() {
                sets.push(WorkoutSet {
                    sets: Some(scale(HIIT_BASE_ROUNDS, volume_multiplier)),
                    duration_sec: Some(HIIT_WORK_SECONDS),
                    rest_sec: HIIT_REST_SECONDS,
                    rpe: Some(8),
                    notes: Some("间歇训练：30秒全力，30秒休息".to_string()),
                    ..base_set(exercise)
                });
            }
        }

        sets
    }

    fn accessory<R: Rng + ?Sized>(&self, volume_multiplier: f64, rng: &mut R) -> Vec<WorkoutSet> {
        let sets = scale(3.0, volume_multiplier * self.experience.volume_multiplier);
        let rest_sec = scale(ACCESSORY_REST_SECONDS, self.experience.rest_multiplier);

        pick(&self.available(ExerciseCategory::Core), ACCESSORY_PICKS, rng)
            .into_iter()
            .map(|exercise| {
                let (reps, duration_sec) = if exercise.is_plank_hold() {
                    (None, Some(PLANK_HOLD_SECONDS))
                } else {
                    (Some(Reps::Count(ACCESSORY_REPS)), None)
                };
                WorkoutSet {
                    sets: Some(sets),
                    reps,
                    duration_sec,
                    rest_sec,
                    ..base_set(exercise)
                }
            })
            .collect()
    }

    fn cooldown<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<WorkoutSet> {
        pick(&self.available(ExerciseCategory::Stretch), COOLDOWN_PICKS, rng)
            .into_iter()
            .map(|exercise| WorkoutSet {
                duration_sec: Some(STRETCH_HOLD_SECONDS),
                rest_sec: 0,
                notes: Some("静态拉伸，保持均匀呼吸".to_string()),
                ..base_set(exercise)
            })
            .collect()
    }
}

/// Prescription for a main-block strength exercise.
pub fn create_strength_set(
    exercise: &Exercise,
    experience: &ExperienceModifier,
    volume_multiplier: f64,
    goal: Goal,
) -> WorkoutSet {
    let (base_sets, reps) = match goal {
        Goal::MuscleGain => (4.0, "8-10"),
        _ => (3.0, "10-12"),
    };
    let rpe = match experience.intensity {
        IntensityLevel::High => 8,
        IntensityLevel::Low | IntensityLevel::Moderate => 7,
    };

    WorkoutSet {
        sets: Some(scale(base_sets, volume_multiplier * experience.volume_multiplier)),
        reps: Some(Reps::Range(reps.to_string())),
        rest_sec: scale(STRENGTH_REST_SECONDS, experience.rest_multiplier),
        rpe: Some(rpe),
        ..base_set(exercise)
    }
}

/// Up to `count` distinct exercises drawn from `pool`.
pub fn pick<'e, R: Rng + ?Sized>(
    pool: &[&'e Exercise],
    count: usize,
    rng: &mut R,
) -> Vec<&'e Exercise> {
    pool.choose_multiple(rng, count).copied().collect()
}

fn base_set(exercise: &Exercise) -> WorkoutSet {
    WorkoutSet {
        exercise_id: exercise.id.to_string(),
        name: exercise.name.to_string(),
        name_zh: exercise.name_zh.to_string(),
        sets: None,
        reps: None,
        duration_sec: None,
        rest_sec: 0,
        rpe: None,
        notes: None,
    }
}

fn scale(base: f64, factor: f64) -> u32 {
    (base * factor).round().max(0.0) as u32
}
