//! Mock Mode
//!
//! Deterministic stand-in for the model, used when no provider is
//! configured. Replies are JSON in the same shape the prompts request, so
//! they go through the normal response normalization.

use super::invoker::TaskKind;
use serde_json::json;

/// Ordered substitutions applied by mock correction
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("i has", "I have"),
    ("she go", "she goes"),
    ("everydays", "every day"),
    ("a apple", "an apple"),
];

/// Correct `text` with the fixed substitution table.
///
/// A rule fires when the lowercased input contains its pattern; the
/// replacement itself is case-sensitive.
pub fn correction(text: &str) -> (String, Vec<String>) {
    let lowered = text.to_lowercase();
    let mut corrected = text.to_string();
    let mut suggestions = Vec::new();

    for &(wrong, right) in SUBSTITUTIONS {
        if lowered.contains(wrong) {
            corrected = corrected.replace(wrong, right);
            suggestions.push(format!("Changed '{}' to '{}'", wrong, right));
        }
    }

    let mut chars = corrected.chars();
    if let Some(first) = chars.next() {
        if first.is_lowercase() {
            corrected = first.to_uppercase().chain(chars).collect();
            suggestions.push("Capitalized first letter".to_string());
        }
    }

    (corrected, suggestions)
}

/// Three templated alternatives
pub fn rephrase(text: &str) -> Vec<String> {
    vec![
        format!("Rephrased: {}", text),
        format!("Alternative: {}", text),
        format!("Improved: {}", text),
    ]
}

/// Raw reply text for a task, as a live model would return it
pub fn reply(task: TaskKind, text: &str) -> String {
    match task {
        TaskKind::Correct => {
            let (corrected, suggestions) = correction(text);
            json!({ "corrected": corrected, "suggestions": suggestions }).to_string()
        }
        TaskKind::Rephrase => json!({ "options": rephrase(text) }).to_string(),
        TaskKind::Proofread => json!({ "rewritten_text": correction(text).0 }).to_string(),
        // No offline transliteration; echo the input.
        TaskKind::Transliterate => json!({ "rewritten_text": text }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_correction_example() {
        let (corrected, suggestions) = correction("i has a apple");
        assert_eq!(corrected, "I have an apple");
        assert_eq!(
            suggestions,
            vec![
                "Changed 'i has' to 'I have'".to_string(),
                "Changed 'a apple' to 'an apple'".to_string(),
            ]
        );
    }

    #[test]
    fn test_mock_correction_is_deterministic() {
        let first = correction("she go to school everydays");
        for _ in 0..5 {
            assert_eq!(correction("she go to school everydays"), first);
        }
        assert_eq!(first.0, "She goes to school every day");
        assert_eq!(first.1.len(), 3);
    }

    #[test]
    fn test_mock_capitalization_only() {
        let (corrected, suggestions) = correction("hello world");
        assert_eq!(corrected, "Hello world");
        assert_eq!(suggestions, vec!["Capitalized first letter".to_string()]);
    }

    #[test]
    fn test_mock_match_is_case_insensitive_but_replace_is_not() {
        // "I HAS" matches the lowercase probe but the literal replace misses
        let (corrected, suggestions) = correction("I HAS it");
        assert_eq!(corrected, "I HAS it");
        assert_eq!(suggestions, vec!["Changed 'i has' to 'I have'".to_string()]);
    }

    #[test]
    fn test_mock_clean_text_untouched() {
        let (corrected, suggestions) = correction("All good.");
        assert_eq!(corrected, "All good.");
        assert!(suggestions.is_empty());
        assert_eq!(correction(""), (String::new(), Vec::new()));
    }

    #[test]
    fn test_mock_rephrase_templates() {
        assert_eq!(
            rephrase("Hello"),
            vec!["Rephrased: Hello", "Alternative: Hello", "Improved: Hello"]
        );
    }

    #[test]
    fn test_mock_reply_is_json() {
        let raw = reply(TaskKind::Proofread, "i has a apple");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["rewritten_text"], "I have an apple");
    }
}
