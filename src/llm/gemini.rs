//! Gemini Integration
//!
//! Calls `generateContent` either on the Generative Language API (API key)
//! or on a Vertex AI regional endpoint (project, location, bearer token).
//! Both accept and return the same payload shape.

use super::{http_client, GenerationOptions, TextModel};
use crate::config::Config;
use crate::error::{FluentError, FluentResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const GENERATIVE_LANGUAGE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// How requests are authenticated and routed
#[derive(Debug, Clone)]
pub enum GeminiAuth {
    ApiKey(String),
    Vertex {
        project: String,
        location: String,
        access_token: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Gemini text model
pub struct GeminiModel {
    client: reqwest::Client,
    model: String,
    auth: GeminiAuth,
}

impl GeminiModel {
    pub fn new(config: &Config, auth: GeminiAuth) -> FluentResult<Self> {
        Ok(Self {
            client: http_client(config)?,
            model: config.model.clone(),
            auth,
        })
    }

    /// Full `generateContent` URL for the configured route
    pub fn endpoint(&self) -> String {
        match &self.auth {
            GeminiAuth::ApiKey(_) => format!(
                "{}/models/{}:generateContent",
                GENERATIVE_LANGUAGE_URL, self.model
            ),
            GeminiAuth::Vertex {
                project, location, ..
            } => format!(
                "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{}:generateContent",
                self.model
            ),
        }
    }

    fn extract_text(body: &str) -> FluentResult<String> {
        let parsed: GenerateResponse = serde_json::from_str(body)?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(FluentError::Provider(
                "Gemini returned no candidate text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl TextModel for GeminiModel {
    fn name(&self) -> String {
        match self.auth {
            GeminiAuth::ApiKey(_) => format!("gemini:{}", self.model),
            GeminiAuth::Vertex { .. } => format!("vertex:{}", self.model),
        }
    }

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> FluentResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        };

        let request = self.client.post(self.endpoint()).json(&body);
        let request = match &self.auth {
            GeminiAuth::ApiKey(key) => request.header("x-goog-api-key", key),
            GeminiAuth::Vertex { access_token, .. } => request.bearer_auth(access_token),
        };

        let response = request.send().await?;
        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Gemini API Error ({}): {}", status, body_text);
            return Err(FluentError::Provider(format!(
                "Gemini returned {}: {}",
                status, body_text
            )));
        }

        debug!("🧠 Gemini raw body: {}", body_text);
        Self::extract_text(&body_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(auth: GeminiAuth) -> GeminiModel {
        GeminiModel::new(&Config::default(), auth).unwrap()
    }

    #[test]
    fn test_api_key_endpoint() {
        let m = model(GeminiAuth::ApiKey("k".to_string()));
        assert_eq!(
            m.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_vertex_endpoint() {
        let m = model(GeminiAuth::Vertex {
            project: "acme".to_string(),
            location: "europe-west4".to_string(),
            access_token: "t".to_string(),
        });
        assert_eq!(
            m.endpoint(),
            "https://europe-west4-aiplatform.googleapis.com/v1/projects/acme/locations/europe-west4/publishers/google/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                max_output_tokens: 1024,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(json["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"```json\n"},{"text":"{}\n```"}]}}]}"#;
        assert_eq!(GeminiModel::extract_text(body).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        let err = GeminiModel::extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .unwrap_err();
        assert!(matches!(err, FluentError::Provider(_)));
    }
}
