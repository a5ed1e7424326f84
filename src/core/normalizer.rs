//! Response Normalization
//!
//! Turns free-form model replies into structured results. Replies may be
//! plain JSON, JSON wrapped in a markdown fence, or prose. Nothing here
//! fails: malformed output degrades to the raw (cleaned) reply text.

use serde_json::{Map, Value};
use tracing::{debug, warn};

const FENCE: &str = "```";

/// Corrected text plus the model's explanations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub corrected: String,
    pub suggestions: Vec<String>,
}

/// Strip one surrounding code fence (first fence, first close).
///
/// "```json\n{..}\n```" and "```\n{..}\n```" both yield "{..}". Anything after
/// the first closing fence is discarded. Unfenced text is only trimmed.
pub fn strip_fences(reply: &str) -> &str {
    let text = reply.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    let inner = match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };
    skip_language_tag(inner).trim()
}

/// Drop a language tag such as `json` or `jsonc` right after the opening
/// fence. A lone word with nothing below it is content, not a tag.
fn skip_language_tag(inner: &str) -> &str {
    if let Some(line_end) = inner.find('\n') {
        let first = inner[..line_end].trim();
        let body = &inner[line_end..];
        if is_language_tag(first) {
            return if body.trim().is_empty() { inner } else { body };
        }
    }

    // "```json{...}```" has no newline after the tag
    match inner.strip_prefix("json") {
        Some(body) if !body.trim().is_empty() => body,
        _ => inner,
    }
}

fn is_language_tag(word: &str) -> bool {
    !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

/// Parse the cleaned text as a JSON object
fn parse_object(cleaned: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            warn!("Model JSON was not an object ({}), using raw text", kind(&other));
            None
        }
        Err(e) => {
            warn!("Failed to parse JSON response, using raw text: {}", e);
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        // A single string where a list was asked for
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Normalize a grammar-correction reply.
///
/// A missing `corrected` key keeps `original`; missing `suggestions` is empty.
pub fn normalize_correction(reply: &str, original: &str) -> Correction {
    let cleaned = strip_fences(reply);

    match parse_object(cleaned) {
        Some(map) => Correction {
            corrected: map
                .get("corrected")
                .and_then(Value::as_str)
                .unwrap_or(original)
                .to_string(),
            suggestions: string_list(&map, "suggestions"),
        },
        None => Correction {
            corrected: cleaned.to_string(),
            suggestions: Vec::new(),
        },
    }
}

/// Normalize a rephrase reply into its list of alternatives
pub fn normalize_rephrase(reply: &str) -> Vec<String> {
    let cleaned = strip_fences(reply);

    match parse_object(cleaned) {
        Some(map) => string_list(&map, "options"),
        None => vec![cleaned.to_string()],
    }
}

/// Normalize a single-rewrite reply (`{"rewritten_text": ...}`).
///
/// A JSON object without a usable text field yields an empty string, which
/// callers treat as a failed rewrite.
pub fn normalize_rewrite(reply: &str) -> String {
    let cleaned = strip_fences(reply);

    match parse_object(cleaned) {
        Some(map) => {
            let text = map
                .get("rewritten_text")
                .or_else(|| map.get("corrected"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            if text.is_empty() {
                debug!("Rewrite reply had no text field: {}", cleaned);
            }
            text.to_string()
        }
        None => cleaned.to_string(),
    }
}
