//! Plain-text rendering of a plan for terminal reading.

use std::fmt::Write;

use fitplan_core::plan::{Reps, SessionPhase, TrainingPlan, WorkoutSession, WorkoutSet};

pub fn plan_text(plan: &TrainingPlan) -> String {
    let mut out = String::new();
    let summary = &plan.summary;
    let _ = writeln!(
        out,
        "{} ({}) · 每周{}次 · 每次{}分钟 · 共{}周",
        summary.goal_zh,
        summary.goal,
        summary.days_per_week,
        summary.session_minutes,
        summary.total_weeks
    );
    if !summary.phase_description.is_empty() {
        let _ = writeln!(out, "{}", summary.phase_description);
    }
    if let Some(notes) = &summary.safety_notes {
        let _ = writeln!(out, "安全提示：{notes}");
    }
    if let Some(reason) = &plan.metadata.fallback_reason {
        let _ = writeln!(out, "(rule-based fallback: {reason})");
    }

    for week in plan.weeks() {
        let _ = writeln!(out, "\n== {} ==", week.name);
        if let Some(notes) = &week.notes {
            let _ = writeln!(out, "{notes}");
        }
        for session in &week.sessions {
            session_text(&mut out, session);
        }
    }
    out
}

fn session_text(out: &mut String, session: &WorkoutSession) {
    let _ = writeln!(
        out,
        "-- Day {} · {} ({} min) --",
        session.day, session.focus, session.total_minutes
    );
    for phase in SessionPhase::ALL {
        for set in session.phase(phase) {
            let _ = writeln!(out, "  [{}] {}", phase.as_str(), set_text(set));
        }
    }
}

pub fn set_text(set: &WorkoutSet) -> String {
    let mut line = format!("{} {}", set.name_zh, set.name);
    let volume = match (set.sets, &set.reps, set.duration_sec) {
        (Some(sets), Some(reps), _) => Some(format!("{sets} x {}", reps_text(reps))),
        (Some(sets), None, Some(secs)) if sets > 1 => Some(format!("{sets} x {secs}s")),
        (_, None, Some(secs)) => Some(format!("{secs}s")),
        (_, Some(reps), None) => Some(reps_text(reps)),
        _ => None,
    };
    if let Some(volume) = volume {
        let _ = write!(line, "  {volume}");
    }
    if set.rest_sec > 0 {
        let _ = write!(line, "  rest {}s", set.rest_sec);
    }
    if let Some(rpe) = set.rpe {
        let _ = write!(line, "  RPE {rpe}");
    }
    line
}

fn reps_text(reps: &Reps) -> String {
    match reps {
        Reps::Count(count) => count.to_string(),
        Reps::Range(range) => range.clone(),
    }
}
