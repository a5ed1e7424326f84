//! API Message Types
//!
//! JSON bodies for the HTTP service.

use serde::{Deserialize, Serialize};

/// Body of `POST /correct` and `POST /rephrase`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextInput {
    pub text: String,
    #[serde(default)]
    pub context: String,
}

/// Response of `POST /correct`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub has_errors: bool,
}

impl CorrectionResult {
    /// Result for input with nothing to correct
    pub fn unchanged(original: &str) -> Self {
        Self {
            original: original.to_string(),
            corrected: original.to_string(),
            suggestions: Vec::new(),
            has_errors: false,
        }
    }

    /// `has_errors` is derived from the trimmed texts
    pub fn new(original: &str, corrected: String, suggestions: Vec<String>) -> Self {
        let has_errors = corrected.trim() != original.trim();
        Self {
            original: original.to_string(),
            corrected,
            suggestions,
            has_errors,
        }
    }
}

/// Response of `POST /rephrase`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RephraseResult {
    pub original: String,
    #[serde(rename = "rephrased")]
    pub alternatives: Vec<String>,
}

/// Response of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub message: String,
    pub status: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}
