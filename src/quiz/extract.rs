use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::error::ExtractError;

static FENCED_JSON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").unwrap());
static OBJECT_SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?s)\{\s*".*"\s*:\s*.*\}"#).unwrap());

/// Interior of the first ```` ```json ```` fenced block, if any.
pub fn fenced_block(text: &str) -> Option<&str> {
    FENCED_JSON_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Greedy span from the first `{"` (whitespace allowed in between) to the last `}`.
pub fn brace_span(text: &str) -> Option<&str> {
    OBJECT_SPAN_RE.find(text).map(|m| m.as_str())
}

/// Best-effort location of the JSON object inside a model completion.
pub fn locate_json(raw: &str) -> &str {
    let candidate = match fenced_block(raw) {
        Some(block) => {
            tracing::debug!(extracted = block, "found fenced json block");
            block
        }
        None => raw,
    };

    let trimmed = candidate.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return trimmed;
    }

    brace_span(trimmed).unwrap_or(trimmed)
}

/// Locates and decodes the JSON object embedded in `raw`.
pub fn decode_object(raw: &str) -> Result<Map<String, Value>, ExtractError> {
    let candidate = locate_json(raw);

    let value: Value = serde_json::from_str(candidate).map_err(|err| {
        tracing::error!(error = %err, "failed to parse JSON from LLM response");
        tracing::debug!(candidate, "attempted to parse");
        ExtractError::ParseFailure(err)
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => {
            tracing::error!(kind = value_kind(&other), "LLM response JSON is not an object");
            tracing::debug!(candidate, "attempted to parse");
            Err(ExtractError::NotAnObject)
        }
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
