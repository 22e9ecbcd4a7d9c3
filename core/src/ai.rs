//! Gate between an LLM reply and the rest of the engine.
//!
//! The HTTP client lives elsewhere; this module only races an in-flight
//! request against a cancellation token, validates what comes back with the
//! same strict validator the rule-based path uses, and falls back to the
//! rule-based generator when the reply is unusable.

use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::error::{PlanError, Result, StructuralError};
use crate::generator::PlanGenerator;
use crate::plan::{GenerationMethod, TrainingPlan};
use crate::profile::UserProfile;
use crate::validate;

/// Raw text handed back by an LLM client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub raw: String,
    pub model: Option<String>,
}

/// Outcome of waiting on an LLM request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiAttempt {
    Response { reply: AiReply, duration: Duration },
    Failed { reason: String },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanResolution {
    Ai(TrainingPlan),
    /// Rule-based plan, with `fallbackReason` recording why the AI path was dropped.
    Fallback(TrainingPlan),
    Cancelled,
}

impl PlanResolution {
    pub fn plan(&self) -> Option<&TrainingPlan> {
        match self {
            PlanResolution::Ai(plan) | PlanResolution::Fallback(plan) => Some(plan),
            PlanResolution::Cancelled => None,
        }
    }

    pub fn into_plan(self) -> Option<TrainingPlan> {
        match self {
            PlanResolution::Ai(plan) | PlanResolution::Fallback(plan) => Some(plan),
            PlanResolution::Cancelled => None,
        }
    }
}

/// Wait for `request`, or stop as soon as `cancel` fires. Cancellation wins
/// ties and drops the in-flight future.
pub async fn await_ai_response<F, E>(request: F, cancel: CancellationToken) -> AiAttempt
where
    F: Future<Output = std::result::Result<AiReply, E>>,
    E: Display,
{
    let started = Instant::now();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!("AI request cancelled");
            AiAttempt::Cancelled
        }
        result = request => match result {
            Ok(reply) => AiAttempt::Response { reply, duration: started.elapsed() },
            Err(e) => AiAttempt::Failed { reason: e.to_string() },
        },
    }
}

/// The JSON object inside an LLM reply: the body of the first fenced code
/// block if it holds an object, otherwise the outermost `{...}` span.
pub fn extract_json(raw: &str) -> &str {
    if let Some(start) = raw.find("```") {
        let after_fence = &raw[start + 3..];
        // an object may follow the tag on the fence line, e.g. "```json{"
        let body = match after_fence.find('{') {
            Some(brace) if !after_fence[..brace].contains('\n') => &after_fence[brace..],
            _ => {
                let body_start = after_fence.find('\n').map_or(0, |i| i + 1);
                &after_fence[body_start..]
            }
        };
        if let Some(end) = body.find("```") {
            let body = body[..end].trim();
            if body.starts_with('{') {
                return body;
            }
        }
    }
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    }
}

/// Decode and gate an LLM reply. Generation metadata is stamped onto the
/// object before validation so replies that omit `generatedAt` still pass.
pub fn parse_ai_plan(raw: &str, model: Option<&str>, duration: Duration) -> Result<TrainingPlan> {
    let mut value: Value = serde_json::from_str(extract_json(raw))?;
    let object = value
        .as_object_mut()
        .ok_or(PlanError::Structural(StructuralError::NotAnObject))?;

    object
        .entry("generatedAt")
        .or_insert_with(|| json!(Utc::now()));
    object.insert("generationMethod".to_string(), json!(GenerationMethod::Ai));
    object.insert("apiDurationMs".to_string(), json!(duration_ms(duration)));
    object.remove("fallbackReason");
    match model {
        Some(model) => {
            object.insert("model".to_string(), json!(model));
        }
        None => {
            object.remove("model");
        }
    }

    let plan = validate::validate(&value)?;
    for warning in validate::check_completeness(&value) {
        tracing::warn!(field = %warning.field, "AI plan: {}", warning.message);
    }
    Ok(plan)
}

/// Turn an AI attempt into a displayable plan. Failed or invalid replies fall
/// back to the rule-based generator; cancellation is reported as-is.
pub fn resolve_plan<R: Rng + ?Sized>(
    attempt: AiAttempt,
    profile: &UserProfile,
    generator: &PlanGenerator,
    rng: &mut R,
) -> Result<PlanResolution> {
    let reason = match attempt {
        AiAttempt::Cancelled => return Ok(PlanResolution::Cancelled),
        AiAttempt::Response { reply, duration } => {
            match parse_ai_plan(&reply.raw, reply.model.as_deref(), duration) {
                Ok(plan) => {
                    tracing::info!(
                        model = reply.model.as_deref().unwrap_or("unknown"),
                        api_duration_ms = duration_ms(duration),
                        period = plan.period().as_str(),
                        method = "ai",
                        "accepted AI plan"
                    );
                    return Ok(PlanResolution::Ai(plan));
                }
                Err(e) => format!("AI response rejected ({}): {e}", e.code()),
            }
        }
        AiAttempt::Failed { reason } => format!("AI request failed: {reason}"),
    };

    tracing::warn!(%reason, "falling back to rule-based generation");
    let mut plan = generator.generate(profile, rng)?;
    plan.metadata.fallback_reason = Some(reason);
    Ok(PlanResolution::Fallback(plan))
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::codes;
    use crate::profile::{Equipment, ExperienceLevel, Goal, PlanPeriod, RequestedPeriod};

    const REPLY: &str = r#"Here is your plan:
```json
{
  "period": "week",
  "summary": {
    "goal": "Muscle Gain",
    "goalZh": "增肌",
    "daysPerWeek": 2,
    "sessionMinutes": 60,
    "totalWeeks": 1,
    "phaseDescription": "单周训练"
  },
  "weeks": [
    { "week": 1, "name": "第1周", "sessions": [
      { "day": 1, "focus": "上肢", "main": [{ "exerciseId": "push_up", "sets": 4, "reps": "8-10", "restSec": 90, "rpe": 7 }] }
    ] }
  ],
  "reasoning": "two upper-focused days"
}
```
Good luck!"#;

    fn profile() -> UserProfile {
        UserProfile {
            goal: Goal::MuscleGain,
            experience: ExperienceLevel::Intermediate,
            equipment: BTreeSet::from([Equipment::None]),
            constraints: BTreeSet::new(),
            constraint_notes: None,
            days_per_week: 2,
            session_minutes: 60,
            period: RequestedPeriod::Week,
        }
    }

    fn reply(raw: &str) -> AiReply {
        AiReply {
            raw: raw.to_string(),
            model: Some("test-model".to_string()),
        }
    }

    #[test]
    fn extract_json_handles_fences_and_prose() {
        assert!(extract_json(REPLY).starts_with('{'));
        assert!(extract_json(REPLY).ends_with('}'));
        assert_eq!(extract_json("sure! {\"a\": 1} done"), "{\"a\": 1}");
        assert_eq!(extract_json("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(extract_json("  no json here "), "no json here");
    }

    #[test]
    fn extract_json_handles_single_line_fences() {
        assert_eq!(extract_json("```json{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(extract_json("```{\"a\": 1}```"), "{\"a\": 1}");
        assert_eq!(
            extract_json("```text\nsee below\n``` then {\"a\": 1}"),
            "{\"a\": 1}"
        );
    }

    #[test]
    fn valid_reply_is_stamped_as_ai() {
        let plan = parse_ai_plan(REPLY, Some("test-model"), Duration::from_millis(1500)).unwrap();
        assert_eq!(plan.period(), PlanPeriod::Week);
        assert_eq!(plan.metadata.generation_method, GenerationMethod::Ai);
        assert_eq!(plan.metadata.model.as_deref(), Some("test-model"));
        assert_eq!(plan.metadata.api_duration_ms, Some(1500));
        assert_eq!(plan.metadata.reasoning.as_deref(), Some("two upper-focused days"));
        assert_eq!(plan.sets().count(), 1);
    }

    #[test]
    fn nested_type_quirks_do_not_force_a_fallback() {
        let quirky = REPLY
            .replace(r#""rpe": 7"#, r#""rpe": "7-8""#)
            .replace(r#""restSec": 90"#, r#""restSec": null"#)
            .replace(r#""sessionMinutes": 60"#, r#""sessionMinutes": 60.0"#);
        assert_ne!(quirky, REPLY);
        let attempt = AiAttempt::Response {
            reply: reply(&quirky),
            duration: Duration::from_millis(10),
        };
        let resolution = resolve_plan(
            attempt,
            &profile(),
            &PlanGenerator::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let PlanResolution::Ai(plan) = resolution else {
            panic!("expected the AI plan to be accepted");
        };
        let set = plan.sets().next().unwrap();
        assert_eq!(set.rpe, None);
        assert_eq!(set.rest_sec, 0);
        assert_eq!(plan.summary.session_minutes, 60);
    }

    #[test]
    fn invalid_reply_reports_structural_code() {
        let err = parse_ai_plan(r#"{"period": "year"}"#, None, Duration::ZERO).unwrap_err();
        assert_eq!(err.code(), codes::PERIOD_UNKNOWN);

        let err = parse_ai_plan("not json at all", None, Duration::ZERO).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_JSON);
    }

    #[test]
    fn accepted_reply_resolves_to_ai_plan() {
        let attempt = AiAttempt::Response {
            reply: reply(REPLY),
            duration: Duration::from_millis(10),
        };
        let resolution = resolve_plan(
            attempt,
            &profile(),
            &PlanGenerator::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(matches!(resolution, PlanResolution::Ai(_)));
    }

    #[test]
    fn rejected_reply_falls_back_with_reason() {
        let attempt = AiAttempt::Response {
            reply: reply(r#"{"period": "quarter", "summary": {}}"#),
            duration: Duration::from_millis(10),
        };
        let resolution = resolve_plan(
            attempt,
            &profile(),
            &PlanGenerator::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        let PlanResolution::Fallback(plan) = resolution else {
            panic!("expected fallback");
        };
        assert_eq!(plan.metadata.generation_method, GenerationMethod::RuleBased);
        assert_eq!(plan.weeks()[0].sessions.len(), 2);
        let reason = plan.metadata.fallback_reason.as_deref().unwrap();
        assert!(reason.contains(codes::SUMMARY_FIELD_INVALID), "{reason}");
    }

    #[test]
    fn failed_request_falls_back_and_cancel_does_not() {
        let generator = PlanGenerator::default();
        let mut rng = StdRng::seed_from_u64(5);

        let failed = AiAttempt::Failed {
            reason: "timeout".to_string(),
        };
        let resolution = resolve_plan(failed, &profile(), &generator, &mut rng).unwrap();
        let plan = resolution.into_plan().unwrap();
        assert_eq!(
            plan.metadata.fallback_reason.as_deref(),
            Some("AI request failed: timeout")
        );

        let resolution = resolve_plan(AiAttempt::Cancelled, &profile(), &generator, &mut rng).unwrap();
        assert_eq!(resolution, PlanResolution::Cancelled);
        assert!(resolution.plan().is_none());
    }

    #[tokio::test]
    async fn cancellation_wins_over_pending_request() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let pending = std::future::pending::<std::result::Result<AiReply, String>>();
        let attempt = await_ai_response(pending, cancel).await;
        assert_eq!(attempt, AiAttempt::Cancelled);
    }

    #[tokio::test]
    async fn completed_request_yields_response_or_failure() {
        let ok = async { Ok::<_, String>(reply(REPLY)) };
        let attempt = await_ai_response(ok, CancellationToken::new()).await;
        assert!(matches!(attempt, AiAttempt::Response { .. }));

        let err = async { Err::<AiReply, _>("HTTP 502".to_string()) };
        let attempt = await_ai_response(err, CancellationToken::new()).await;
        assert_eq!(
            attempt,
            AiAttempt::Failed {
                reason: "HTTP 502".to_string()
            }
        );
    }

    #[tokio::test]
    async fn already_cancelled_token_skips_request() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let ok = async { Ok::<_, String>(reply(REPLY)) };
        assert_eq!(await_ai_response(ok, cancel).await, AiAttempt::Cancelled);
    }
}
