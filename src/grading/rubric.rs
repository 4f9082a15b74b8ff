// src/grading/rubric.rs

use serde_json::Value;
use std::collections::HashMap;

/// Marker token that delimits the start of the rubric JSON payload in the
/// sandbox stdout. Overridable per question via `gradingFormat`.
pub const DEFAULT_RUBRIC_MARKER: &str = "__RUBRIC__";

/// Decoded rubric payload emitted by validation code.
#[derive(Debug, Clone, PartialEq)]
pub struct RubricOutcome {
    pub score: f64,
    pub max_score: f64,
    pub breakdown: HashMap<String, f64>,
    pub errors: Vec<String>,
}

/// Recovers a structured grade from the sandbox stdout.
///
/// Scans for the first occurrence of `marker` and decodes everything after
/// it as one JSON document. Returns `None` when stdout is absent, the marker
/// never appears, or the trailing text is not valid JSON - callers must
/// treat that as an error condition, never as a silent zero. Only the first
/// marker occurrence is honored; a second accidental marker makes the
/// payload invalid rather than producing a second result.
///
/// Missing or mistyped fields are default-filled: non-numeric `score` and
/// `max_score` become 0, a non-object `breakdown` becomes empty, a
/// non-array `errors` becomes empty.
pub fn parse_rubric_output(stdout: Option<&str>, marker: &str) -> Option<RubricOutcome> {
    let stdout = stdout?;
    let marker_index = stdout.find(marker)?;
    let json_str = stdout[marker_index + marker.len()..].trim();

    let parsed: Value = match serde_json::from_str(json_str) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse rubric JSON: {}", e);
            return None;
        }
    };

    let score = parsed.get("score").and_then(Value::as_f64).unwrap_or(0.0);
    let max_score = parsed.get("max_score").and_then(Value::as_f64).unwrap_or(0.0);

    let breakdown = parsed
        .get("breakdown")
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .filter_map(|(name, value)| value.as_f64().map(|n| (name.clone(), n)))
                .collect()
        })
        .unwrap_or_default();

    let errors = parsed
        .get("errors")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|value| value.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Some(RubricOutcome {
        score,
        max_score,
        breakdown,
        errors,
    })
}
