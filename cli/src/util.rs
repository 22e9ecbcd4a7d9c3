use std::io::Read;

use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "fitplan_core=info,fitplan_cli=info";

/// Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub fn error_body(error: &str, message: &str, docs_hint: Option<&str>) -> serde_json::Value {
    let mut err = json!({
        "error": error,
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    err
}

/// Print a structured error to stderr and return `code`.
pub fn report_error(error: &str, message: &str, docs_hint: Option<&str>, code: i32) -> i32 {
    let body = error_body(error, message, docs_hint);
    eprintln!(
        "{}",
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
    );
    code
}

pub fn exit_error(message: &str, docs_hint: Option<&str>) -> ! {
    std::process::exit(report_error("cli_error", message, docs_hint, 1));
}

/// Pretty JSON on stdout; returns the exit code.
pub fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{text}");
            0
        }
        Err(e) => report_error("cli_error", &format!("Failed to encode output: {e}"), None, 1),
    }
}

/// Read text from a file path or stdin (when path is "-").
pub fn read_text_from_file(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read file '{path}': {e}"))
    }
}

/// Read JSON from a file path or stdin (when path is "-").
pub fn read_json_from_file(path: &str) -> Result<serde_json::Value, String> {
    let raw = read_text_from_file(path)?;
    serde_json::from_str(&raw).map_err(|e| format!("Invalid JSON in '{path}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_omits_missing_hint() {
        let body = error_body("cli_error", "boom", None);
        assert_eq!(body, json!({"error": "cli_error", "message": "boom"}));

        let body = error_body("invalid_plan", "bad", Some("see --help"));
        assert_eq!(body["docs_hint"], "see --help");
    }

    #[test]
    fn read_json_reports_missing_file() {
        let err = read_json_from_file("/definitely/not/here.json").unwrap_err();
        assert!(err.contains("Failed to read file"));
    }
}
