//! Plan assembler: drives the session composer across the weeks of a plan and
//! wraps the result with a summary block.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::composer::SessionComposer;
use crate::error::Result;
use crate::plan::{
    GenerationMetadata, MonthPlan, PlanSchedule, PlanSummary, TrainingPlan, WeekPlan,
};
use crate::profile::{Constraint, PlanPeriod, RequestedPeriod, UserProfile, impl_from_str};
use crate::templates::{
    self, GENERIC_SAFETY_NOTE, MONTH_PROGRESSION, ProgressionStep, QUARTER_PROGRESSION,
    TrainingSplit,
};

/// How a custom week count is mapped onto a plan shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomPeriodPolicy {
    /// 1-2 weeks become a week plan, 3-8 a month plan, 9 or more a quarter.
    #[default]
    Nearest,
    /// A month-shaped plan of exactly the requested weeks, cycling the 4-week
    /// periodization table.
    RepeatMonth,
}

impl CustomPeriodPolicy {
    pub const ALL: [CustomPeriodPolicy; 2] =
        [CustomPeriodPolicy::Nearest, CustomPeriodPolicy::RepeatMonth];

    pub const fn as_str(self) -> &'static str {
        match self {
            CustomPeriodPolicy::Nearest => "nearest",
            CustomPeriodPolicy::RepeatMonth => "repeat_month",
        }
    }
}

impl_from_str!(CustomPeriodPolicy, "custom period policy");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeneratorConfig {
    pub custom_period_policy: CustomPeriodPolicy,
}

/// Concrete plan shape after custom periods have been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub period: PlanPeriod,
    pub total_weeks: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: GeneratorConfig,
}

impl PlanGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn resolve_period(&self, requested: RequestedPeriod) -> ResolvedPeriod {
        let fixed = |period: PlanPeriod| ResolvedPeriod {
            period,
            total_weeks: period.total_weeks(),
        };
        match requested {
            RequestedPeriod::Week => fixed(PlanPeriod::Week),
            RequestedPeriod::Month => fixed(PlanPeriod::Month),
            RequestedPeriod::Quarter => fixed(PlanPeriod::Quarter),
            RequestedPeriod::Custom { weeks } => match self.config.custom_period_policy {
                CustomPeriodPolicy::Nearest => match weeks {
                    0..=2 => fixed(PlanPeriod::Week),
                    3..=8 => fixed(PlanPeriod::Month),
                    _ => fixed(PlanPeriod::Quarter),
                },
                CustomPeriodPolicy::RepeatMonth => ResolvedPeriod {
                    period: PlanPeriod::Month,
                    total_weeks: weeks,
                },
            },
        }
    }

    /// Build a complete rule-based plan. Fails only on an ill-formed profile;
    /// restrictive equipment or constraints produce sparser sessions instead.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        profile: &UserProfile,
        rng: &mut R,
    ) -> Result<TrainingPlan> {
        profile.validate()?;

        let split = templates::split_for_days(profile.days_per_week);
        if split.days_per_week != profile.days_per_week {
            tracing::debug!(
                days_per_week = profile.days_per_week,
                split = split.name,
                "no exact split, cycling fallback pattern"
            );
        }

        let resolved = self.resolve_period(profile.period);
        let assembler = Assembler {
            composer: SessionComposer::new(profile),
            split,
            days_per_week: profile.days_per_week,
        };

        let schedule = match resolved.period {
            PlanPeriod::Week => PlanSchedule::Week {
                weeks: vec![assembler.week(1, "第1周".to_string(), 1.0, None, rng)],
            },
            PlanPeriod::Month => PlanSchedule::Month {
                weeks: assembler.periodized_weeks(resolved.total_weeks, 1.0, 1, rng),
            },
            PlanPeriod::Quarter => PlanSchedule::Quarter {
                months: QUARTER_PROGRESSION
                    .iter()
                    .map(|phase| assembler.month(phase, rng))
                    .collect(),
            },
        };

        let plan = TrainingPlan {
            schedule,
            summary: summary(profile, split, resolved),
            metadata: GenerationMetadata::rule_based(),
        };

        tracing::info!(
            goal = %profile.goal,
            experience = %profile.experience,
            period = resolved.period.as_str(),
            total_weeks = resolved.total_weeks,
            sessions = plan.sessions().count(),
            method = "rule_based",
            "generated training plan"
        );

        for warning in plan.completeness_warnings() {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }

        Ok(plan)
    }
}

/// Rule-based plan with the default configuration.
pub fn generate_plan<R: Rng + ?Sized>(profile: &UserProfile, rng: &mut R) -> Result<TrainingPlan> {
    PlanGenerator::default().generate(profile, rng)
}

struct Assembler<'a> {
    composer: SessionComposer<'a>,
    split: &'static TrainingSplit,
    days_per_week: u8,
}

impl Assembler<'_> {
    fn week<R: Rng + ?Sized>(
        &self,
        number: u32,
        name: String,
        volume_multiplier: f64,
        notes: Option<String>,
        rng: &mut R,
    ) -> WeekPlan {
        let sessions = (0..usize::from(self.days_per_week))
            .map(|index| {
                self.composer
                    .compose(index as u32 + 1, self.split.day(index), volume_multiplier, rng)
            })
            .collect();
        WeekPlan {
            week: number,
            name,
            sessions,
            notes,
        }
    }

    /// `count` weeks cycling the 4-week table, numbered from `first_week`.
    fn periodized_weeks<R: Rng + ?Sized>(
        &self,
        count: u32,
        phase_multiplier: f64,
        first_week: u32,
        rng: &mut R,
    ) -> Vec<WeekPlan> {
        (0..count)
            .map(|offset| {
                let step = &MONTH_PROGRESSION[offset as usize % MONTH_PROGRESSION.len()];
                let number = first_week + offset;
                self.week(
                    number,
                    format!("第{number}周 · {}", step.name_zh),
                    step.volume_multiplier * phase_multiplier,
                    Some(step.notes_zh.to_string()),
                    rng,
                )
            })
            .collect()
    }

    fn month<R: Rng + ?Sized>(&self, phase: &ProgressionStep, rng: &mut R) -> MonthPlan {
        let weeks_per_month = MONTH_PROGRESSION.len() as u32;
        let first_week = (phase.index - 1) * weeks_per_month + 1;
        MonthPlan {
            month: phase.index,
            name: format!("第{}月 · {}", phase.index, phase.name_zh),
            weeks: self.periodized_weeks(weeks_per_month, phase.volume_multiplier, first_week, rng),
            notes: Some(phase.notes_zh.to_string()),
        }
    }
}

fn summary(profile: &UserProfile, split: &TrainingSplit, resolved: ResolvedPeriod) -> PlanSummary {
    let goal = templates::goal_template(profile.goal);
    PlanSummary {
        goal: goal.name.to_string(),
        goal_zh: goal.name_zh.to_string(),
        description: Some(goal.description_zh.to_string()),
        days_per_week: u32::from(profile.days_per_week),
        session_minutes: profile.session_minutes,
        total_weeks: resolved.total_weeks,
        phase_description: phase_description(split, resolved),
        safety_notes: Some(safety_notes(profile)),
    }
}

fn phase_description(split: &TrainingSplit, resolved: ResolvedPeriod) -> String {
    let month_cycle = step_names(&MONTH_PROGRESSION);
    match resolved.period {
        PlanPeriod::Week => format!("单周训练：{}", split.name_zh),
        PlanPeriod::Month if resolved.total_weeks == PlanPeriod::Month.total_weeks() => {
            format!("4周周期（{month_cycle}），分化：{}", split.name_zh)
        }
        PlanPeriod::Month => format!(
            "{}周训练，按4周循环（{month_cycle}），分化：{}",
            resolved.total_weeks, split.name_zh
        ),
        PlanPeriod::Quarter => format!(
            "12周三阶段（{}），每月内按{month_cycle}递进，分化：{}",
            step_names(&QUARTER_PROGRESSION),
            split.name_zh
        ),
    }
}

fn step_names(steps: &[ProgressionStep]) -> String {
    steps
        .iter()
        .map(|step| step.name_zh)
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Caution text for every constraint, joined with spaces; the generic notice
/// when there are none.
pub fn safety_notes(profile: &UserProfile) -> String {
    if profile.constraints.is_empty() {
        return GENERIC_SAFETY_NOTE.to_string();
    }
    profile
        .constraints
        .iter()
        .map(|&constraint| match (constraint, profile.other_notes()) {
            (Constraint::Other, Some(notes)) => {
                format!("{}（备注：{notes}）", templates::constraint_caution(constraint))
            }
            _ => templates::constraint_caution(constraint).to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::catalog;
    use crate::error::{PlanError, ProfileError};
    use crate::plan::{Reps, WorkoutSet};
    use crate::profile::{Equipment, ExperienceLevel, Goal};
    use crate::validate;

    fn profile(period: RequestedPeriod) -> UserProfile {
        UserProfile {
            goal: Goal::FatLoss,
            experience: ExperienceLevel::Beginner,
            equipment: BTreeSet::from([Equipment::None]),
            constraints: BTreeSet::new(),
            constraint_notes: None,
            days_per_week: 3,
            session_minutes: 45,
            period,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    fn equipment_options() -> Vec<BTreeSet<Equipment>> {
        let mut options: Vec<BTreeSet<Equipment>> =
            Equipment::ALL.iter().map(|&e| BTreeSet::from([e])).collect();
        options.push(BTreeSet::from([Equipment::Dumbbells, Equipment::Bench]));
        options
    }

    fn constraint_options() -> Vec<BTreeSet<Constraint>> {
        let mut options: Vec<BTreeSet<Constraint>> = vec![BTreeSet::new()];
        options.extend(Constraint::ALL.iter().map(|&c| BTreeSet::from([c])));
        options.push(Constraint::ALL.iter().copied().collect());
        options
    }

    fn is_strength(set: &WorkoutSet) -> bool {
        matches!(set.reps, Some(Reps::Range(_)))
    }

    #[test]
    fn fat_loss_beginner_week_example() {
        let plan = generate_plan(&profile(RequestedPeriod::Week), &mut rng()).unwrap();
        assert_eq!(plan.period(), PlanPeriod::Week);
        let PlanSchedule::Week { weeks } = &plan.schedule else {
            panic!("expected week schedule");
        };
        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].week, 1);
        assert_eq!(weeks[0].sessions.len(), 3);
        assert_eq!(plan.summary.total_weeks, 1);
        assert_eq!(plan.summary.goal_zh, "减脂");
    }

    #[test]
    fn every_profile_combination_yields_a_valid_plan() {
        let generator = PlanGenerator::default();
        let mut rng = rng();
        for goal in Goal::ALL {
            for experience in ExperienceLevel::ALL {
                for equipment in equipment_options() {
                    for constraints in constraint_options() {
                        for (days, period) in (1..=7u8).flat_map(|d| PlanPeriod::ALL.map(|p| (d, p))) {
                            let p = UserProfile {
                                goal,
                                experience,
                                equipment: equipment.clone(),
                                constraints: constraints.clone(),
                                constraint_notes: None,
                                days_per_week: days,
                                session_minutes: 45,
                                period: period.into(),
                            };
                            let plan = generator.generate(&p, &mut rng).unwrap();
                            assert_eq!(plan.period(), period);
                            let value = serde_json::to_value(&plan).unwrap();
                            assert!(validate::validate(&value).is_ok());

                            let weeks = plan.weeks();
                            assert_eq!(weeks.len() as u32, plan.summary.total_weeks);
                            assert!(weeks.iter().all(|w| w.sessions.len() == usize::from(days)));

                            for set in plan.sets() {
                                let exercise = catalog::find(&set.exercise_id).unwrap();
                                assert!(crate::filter::is_available(
                                    exercise,
                                    &equipment,
                                    &constraints
                                ));
                                assert!(set.rest_sec < 1000);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn month_and_quarter_shapes_hold_for_all_goals_and_days() {
        let generator = PlanGenerator::default();
        let mut rng = rng();
        for goal in Goal::ALL {
            for experience in ExperienceLevel::ALL {
                for days in 1..=7u8 {
                    let mut p = profile(RequestedPeriod::Month);
                    p.goal = goal;
                    p.experience = experience;
                    p.days_per_week = days;

                    let month = generator.generate(&p, &mut rng).unwrap();
                    let PlanSchedule::Month { weeks } = &month.schedule else {
                        panic!("expected month schedule");
                    };
                    assert_eq!(weeks.len(), 4);
                    assert_eq!(month.summary.total_weeks, 4);
                    assert!(weeks.iter().all(|w| w.sessions.len() == usize::from(days)));

                    p.period = RequestedPeriod::Quarter;
                    let quarter = generator.generate(&p, &mut rng).unwrap();
                    let PlanSchedule::Quarter { months } = &quarter.schedule else {
                        panic!("expected quarter schedule");
                    };
                    assert_eq!(months.len(), 3);
                    assert!(months.iter().all(|m| m.weeks.len() == 4));
                    assert_eq!(quarter.summary.total_weeks, 12);
                    let value = serde_json::to_value(&quarter).unwrap();
                    assert!(validate::validate(&value).is_ok());
                }
            }
        }
    }

    #[test]
    fn deload_week_prescribes_no_more_sets_than_baseline_week() {
        for experience in ExperienceLevel::ALL {
            let mut p = profile(RequestedPeriod::Month);
            p.experience = experience;
            p.goal = Goal::MuscleGain;
            let plan = generate_plan(&p, &mut rng()).unwrap();
            let weeks = plan.weeks();

            let strength_sets = |week: usize| -> Vec<u32> {
                weeks[week]
                    .sessions
                    .iter()
                    .flat_map(|s| s.main.iter())
                    .filter(|set| is_strength(set))
                    .filter_map(|set| set.sets)
                    .collect()
            };
            let baseline = strength_sets(1);
            let deload = strength_sets(3);
            assert!(!baseline.is_empty() && !deload.is_empty());
            let baseline_min = baseline.iter().copied().min().unwrap();
            let deload_max = deload.iter().copied().max().unwrap();
            assert!(deload_max <= baseline_min);
        }
    }

    #[test]
    fn quarter_weeks_are_numbered_across_months() {
        let plan = generate_plan(&profile(RequestedPeriod::Quarter), &mut rng()).unwrap();
        let numbers: Vec<u32> = plan.weeks().iter().map(|w| w.week).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
        let PlanSchedule::Quarter { months } = &plan.schedule else {
            panic!("expected quarter schedule");
        };
        assert_eq!(months[2].name, "第3月 · 巅峰期");
        assert_eq!(months[0].weeks[3].name, "第4周 · 减载期");
    }

    #[test]
    fn equipment_outside_the_profile_never_appears() {
        let mut p = profile(RequestedPeriod::Quarter);
        p.days_per_week = 6;
        let plan = generate_plan(&p, &mut rng()).unwrap();
        for set in plan.sets() {
            let exercise = catalog::find(&set.exercise_id).unwrap();
            assert!(exercise.is_bodyweight(), "{} needs equipment", exercise.id);
        }
        assert!(!plan.sets().any(|s| s.exercise_id == "barbell_bench_press"));
    }

    #[test]
    fn knee_issue_excludes_jump_exercises() {
        let mut p = profile(RequestedPeriod::Month);
        p.equipment = BTreeSet::from([Equipment::Gym]);
        p.constraints = BTreeSet::from([Constraint::KneeIssue]);
        p.days_per_week = 5;
        let plan = generate_plan(&p, &mut rng()).unwrap();
        for set in plan.sets() {
            assert!(!set.exercise_id.contains("jump"), "{}", set.exercise_id);
            let exercise = catalog::find(&set.exercise_id).unwrap();
            assert!(!exercise.contraindications.contains(&Constraint::KneeIssue));
        }
    }

    #[test]
    fn rest_is_never_negative_and_rpe_stays_in_range() {
        let mut p = profile(RequestedPeriod::Quarter);
        p.experience = ExperienceLevel::Advanced;
        p.equipment = BTreeSet::from([Equipment::Gym]);
        let plan = generate_plan(&p, &mut rng()).unwrap();
        for set in plan.sets() {
            // rest_sec is unsigned; check the scaled values stay sane
            assert!(set.rest_sec <= 120);
            if let Some(rpe) = set.rpe {
                assert!((1..=10).contains(&rpe));
            }
        }
    }

    #[test]
    fn sets_scale_monotonically_with_experience() {
        let total_sets = |experience: ExperienceLevel| -> u32 {
            let mut p = profile(RequestedPeriod::Month);
            p.goal = Goal::General;
            p.experience = experience;
            let plan = generate_plan(&p, &mut rng()).unwrap();
            plan.sets().filter_map(|s| s.sets).sum()
        };
        let beginner = total_sets(ExperienceLevel::Beginner);
        let intermediate = total_sets(ExperienceLevel::Intermediate);
        let advanced = total_sets(ExperienceLevel::Advanced);
        assert!(advanced >= intermediate, "{advanced} < {intermediate}");
        assert!(intermediate >= beginner, "{intermediate} < {beginner}");
    }

    #[test]
    fn same_exercise_selection_across_experience_levels() {
        let ids = |experience: ExperienceLevel| -> Vec<String> {
            let mut p = profile(RequestedPeriod::Week);
            p.experience = experience;
            let plan = generate_plan(&p, &mut rng()).unwrap();
            plan.sets().map(|s| s.exercise_id.clone()).collect()
        };
        assert_eq!(ids(ExperienceLevel::Beginner), ids(ExperienceLevel::Advanced));
    }

    #[test]
    fn safety_notes_follow_constraints() {
        let mut p = profile(RequestedPeriod::Week);
        let plan = generate_plan(&p, &mut rng()).unwrap();
        assert_eq!(plan.summary.safety_notes.as_deref(), Some(GENERIC_SAFETY_NOTE));

        p.constraints = BTreeSet::from([Constraint::KneeIssue]);
        let plan = generate_plan(&p, &mut rng()).unwrap();
        let notes = plan.summary.safety_notes.unwrap();
        assert!(notes.contains("跳跃"));
        assert!(notes.contains("深蹲"));

        p.constraints = BTreeSet::from([Constraint::KneeIssue, Constraint::Other]);
        p.constraint_notes = Some("  左肘旧伤  ".to_string());
        let notes = safety_notes(&p);
        assert!(notes.contains("膝盖"));
        assert!(notes.contains("备注：左肘旧伤"));
        assert!(notes.contains(' '));
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut p = profile(RequestedPeriod::Week);
        p.days_per_week = 0;
        let err = generate_plan(&p, &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Profile(ProfileError::DaysPerWeekOutOfRange(0))
        ));
    }

    #[test]
    fn custom_period_nearest_policy() {
        let generator = PlanGenerator::default();
        let shape = |weeks| generator.resolve_period(RequestedPeriod::Custom { weeks }).period;
        assert_eq!(shape(1), PlanPeriod::Week);
        assert_eq!(shape(2), PlanPeriod::Week);
        assert_eq!(shape(3), PlanPeriod::Month);
        assert_eq!(shape(8), PlanPeriod::Month);
        assert_eq!(shape(9), PlanPeriod::Quarter);
        assert_eq!(shape(52), PlanPeriod::Quarter);

        let plan = generator
            .generate(&profile(RequestedPeriod::Custom { weeks: 6 }), &mut rng())
            .unwrap();
        assert_eq!(plan.period(), PlanPeriod::Month);
        assert_eq!(plan.weeks().len(), 4);
    }

    #[test]
    fn custom_period_repeat_month_policy() {
        let generator = PlanGenerator::new(GeneratorConfig {
            custom_period_policy: CustomPeriodPolicy::RepeatMonth,
        });
        let plan = generator
            .generate(&profile(RequestedPeriod::Custom { weeks: 6 }), &mut rng())
            .unwrap();
        assert_eq!(plan.period(), PlanPeriod::Month);
        assert_eq!(plan.summary.total_weeks, 6);
        let names: Vec<&str> = plan.weeks().iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names[3], "第4周 · 减载期");
        assert_eq!(names[4], "第5周 · 适应期");
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn oversized_custom_period_is_rejected_before_assembly() {
        let generator = PlanGenerator::new(GeneratorConfig {
            custom_period_policy: CustomPeriodPolicy::RepeatMonth,
        });
        let mut p = profile(RequestedPeriod::Custom { weeks: 20_000 });
        p.days_per_week = 7;
        let err = generator.generate(&p, &mut rng()).unwrap_err();
        assert!(matches!(
            err,
            PlanError::Profile(ProfileError::CustomWeeksOutOfRange { weeks: 20_000, .. })
        ));

        p.period = RequestedPeriod::Custom {
            weeks: crate::profile::MAX_CUSTOM_WEEKS,
        };
        let plan = generator.generate(&p, &mut rng()).unwrap();
        assert_eq!(plan.weeks().len(), 52);
    }

    #[test]
    fn policy_parses_from_cli_spelling() {
        assert_eq!(
            "repeat-month".parse::<CustomPeriodPolicy>().unwrap(),
            CustomPeriodPolicy::RepeatMonth
        );
        assert_eq!("Nearest".parse::<CustomPeriodPolicy>().unwrap(), CustomPeriodPolicy::Nearest);
        assert!("yearly".parse::<CustomPeriodPolicy>().is_err());
    }

    #[test]
    fn same_seed_reproduces_plan_content() {
        let p = profile(RequestedPeriod::Month);
        let a = generate_plan(&p, &mut rng()).unwrap();
        let b = generate_plan(&p, &mut rng()).unwrap();
        assert_eq!(a.schedule, b.schedule);
        assert_eq!(a.summary, b.summary);
    }
}
