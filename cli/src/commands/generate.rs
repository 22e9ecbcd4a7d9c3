use std::collections::BTreeSet;

use clap::{Args, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use fitplan_core::ai::{self, AiAttempt, AiReply, PlanResolution};
use fitplan_core::{
    Constraint, CustomPeriodPolicy, Equipment, ExperienceLevel, GeneratorConfig, Goal,
    PlanGenerator, PlanPeriod, RequestedPeriod, TrainingPlan, UserProfile,
};

use crate::render;
use crate::util::{print_json, report_error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Training goal (fat-loss, muscle-gain, fitness, rehab, general)
    #[arg(long, default_value = "general")]
    pub goal: Goal,

    /// Experience level (beginner, intermediate, advanced)
    #[arg(long, default_value = "beginner")]
    pub experience: ExperienceLevel,

    /// Available equipment (repeatable; "none" means bodyweight only, "gym" covers everything)
    #[arg(long = "equipment", default_value = "none")]
    pub equipment: Vec<Equipment>,

    /// Physical constraint (repeatable), e.g. knee-issue, back-issue, other
    #[arg(long = "constraint")]
    pub constraints: Vec<Constraint>,

    /// Free-text notes for the "other" constraint
    #[arg(long)]
    pub notes: Option<String>,

    /// Training days per week (1-7)
    #[arg(long, default_value_t = 3)]
    pub days: u8,

    /// Minutes per session
    #[arg(long, default_value_t = 45)]
    pub minutes: u32,

    /// Plan period (week, month, quarter)
    #[arg(long, default_value = "week")]
    pub period: PlanPeriod,

    /// Custom plan length in weeks, 1 to 52 (overrides --period)
    #[arg(long, conflicts_with = "period")]
    pub weeks: Option<u32>,

    /// Seed for exercise selection; omit for a fresh plan every run
    #[arg(long, env = "FITPLAN_SEED")]
    pub seed: Option<u64>,

    /// How custom week counts map to a plan shape (nearest, repeat-month)
    #[arg(long, env = "FITPLAN_CUSTOM_PERIOD", default_value = "nearest")]
    pub custom_policy: CustomPeriodPolicy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// LLM reply to gate before falling back to rule-based generation (use '-' for stdin)
    #[arg(long)]
    pub ai_response: Option<String>,

    /// Model name recorded in the plan metadata for --ai-response
    #[arg(long, requires = "ai_response")]
    pub model: Option<String>,
}

impl GenerateArgs {
    fn profile(&self) -> UserProfile {
        let period = match self.weeks {
            Some(weeks) => RequestedPeriod::Custom { weeks },
            None => self.period.into(),
        };
        UserProfile {
            goal: self.goal,
            experience: self.experience,
            equipment: self.equipment.iter().copied().collect(),
            constraints: self.constraints.iter().copied().collect::<BTreeSet<_>>(),
            constraint_notes: self.notes.clone(),
            days_per_week: self.days,
            session_minutes: self.minutes,
            period,
        }
    }
}

pub async fn run(args: GenerateArgs) -> i32 {
    let profile = args.profile();
    if let Err(e) = profile.validate() {
        return report_error(
            "invalid_profile",
            &e.to_string(),
            Some("Check --days (1-7), --equipment and --weeks"),
            4,
        );
    }

    let generator = PlanGenerator::new(GeneratorConfig {
        custom_period_policy: args.custom_policy,
    });
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let plan = match &args.ai_response {
        Some(path) => {
            let attempt = read_ai_reply(path, args.model.clone()).await;
            match ai::resolve_plan(attempt, &profile, &generator, &mut rng) {
                Ok(PlanResolution::Cancelled) => {
                    return report_error("cancelled", "Plan generation was cancelled", None, 130);
                }
                Ok(resolution) => resolution.into_plan(),
                Err(e) => return report_error(e.code(), &e.to_string(), None, 1),
            }
        }
        None => match generator.generate(&profile, &mut rng) {
            Ok(plan) => Some(plan),
            Err(e) => return report_error(e.code(), &e.to_string(), None, 1),
        },
    };

    match plan {
        Some(plan) => output(&plan, args.format),
        None => report_error("cli_error", "No plan was produced", None, 1),
    }
}

/// Stand-in for the LLM request: reads the reply from disk, cancellable with Ctrl-C.
async fn read_ai_reply(path: &str, model: Option<String>) -> AiAttempt {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let path = path.to_string();
    let request = async move {
        let raw = if path == "-" {
            tokio::task::spawn_blocking(|| crate::util::read_text_from_file("-"))
                .await
                .map_err(|e| e.to_string())??
        } else {
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| format!("Failed to read file '{path}': {e}"))?
        };
        Ok::<_, String>(AiReply { raw, model })
    };

    ai::await_ai_response(request, cancel).await
}

fn output(plan: &TrainingPlan, format: OutputFormat) -> i32 {
    tracing::info!(
        period = plan.period().as_str(),
        weeks = plan.weeks().len(),
        "plan ready"
    );
    match format {
        OutputFormat::Json => print_json(plan),
        OutputFormat::Text => {
            print!("{}", render::plan_text(plan));
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["fitplan"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn defaults_describe_a_bodyweight_week() {
        let profile = parse(&[]).profile();
        assert_eq!(profile.goal, Goal::General);
        assert_eq!(profile.equipment, BTreeSet::from([Equipment::None]));
        assert_eq!(profile.period, RequestedPeriod::Week);
        assert_eq!(profile.days_per_week, 3);
    }

    #[test]
    fn repeatable_flags_and_custom_weeks() {
        let profile = parse(&[
            "--goal",
            "fat-loss",
            "--equipment",
            "dumbbells",
            "--equipment",
            "bench",
            "--constraint",
            "knee-issue",
            "--weeks",
            "6",
        ])
        .profile();
        assert_eq!(profile.goal, Goal::FatLoss);
        assert_eq!(
            profile.equipment,
            BTreeSet::from([Equipment::Dumbbells, Equipment::Bench])
        );
        assert!(profile.constraints.contains(&Constraint::KneeIssue));
        assert_eq!(profile.period, RequestedPeriod::Custom { weeks: 6 });
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!(TestCli::try_parse_from(["fitplan", "--goal", "bulk"]).is_err());
        assert!(TestCli::try_parse_from(["fitplan", "--period", "year"]).is_err());
    }
}
