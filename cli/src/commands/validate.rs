use serde_json::json;

use fitplan_core::validate::{check_completeness, validate};

use crate::util::{exit_error, print_json, read_json_from_file, report_error};

/// Strict structural check; completeness findings are printed but never fail.
pub fn run(file: &str) -> i32 {
    let value = match read_json_from_file(file) {
        Ok(value) => value,
        Err(e) => exit_error(&e, Some("Pass a plan file path, or '-' to read from stdin")),
    };

    let plan = match validate(&value) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(code = e.code(), "plan rejected: {e}");
            return report_error(
                "invalid_plan",
                &e.to_string(),
                Some("A plan needs period, summary, generatedAt and a non-empty weeks/months array"),
                1,
            );
        }
    };

    let warnings = check_completeness(&value);
    for warning in &warnings {
        tracing::warn!(field = %warning.field, "{}", warning.message);
    }

    print_json(&json!({
        "valid": true,
        "period": plan.period().as_str(),
        "weeks": plan.weeks().len(),
        "sessions": plan.sessions().count(),
        "generation_method": plan.metadata.generation_method,
        "warnings": warnings,
    }))
}
