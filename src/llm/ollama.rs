//! Ollama Integration
//!
//! Local model backend using Ollama's `/api/generate` endpoint.

use super::{http_client, GenerationOptions, TextModel};
use crate::config::Config;
use crate::error::{FluentError, FluentResult};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Ollama API response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Ollama text model
#[derive(Clone)]
pub struct OllamaModel {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaModel {
    /// Create new Ollama model from config
    pub fn new(config: &Config) -> FluentResult<Self> {
        Ok(Self {
            client: http_client(config)?,
            url: config.ollama_url.trim_end_matches('/').to_string(),
            model: config.ollama_model.clone(),
        })
    }

    fn request_body(&self, prompt: &str, options: GenerationOptions) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": options.temperature,
                "num_predict": options.max_output_tokens
            }
        })
    }
}

#[async_trait]
impl TextModel for OllamaModel {
    fn name(&self) -> String {
        format!("ollama:{}", self.model)
    }

    async fn generate(&self, prompt: &str, options: GenerationOptions) -> FluentResult<String> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.url))
            .json(&self.request_body(prompt, options))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;

        if !status.is_success() {
            warn!("❌ Ollama API Error ({}): {}", status, body_text);
            return Err(FluentError::Provider(format!(
                "Ollama returned {}: {}",
                status, body_text
            )));
        }

        debug!("🧠 Ollama raw body: {}", body_text);

        let ollama_resp: OllamaResponse = serde_json::from_str(&body_text)?;
        Ok(ollama_resp.response)
    }
}
