//! LLM Backends
//!
//! Provides the text models the invoker can call:
//! - Gemini: Generative Language API (API key) or Vertex AI (project + token)
//! - Ollama: local models over HTTP

pub mod gemini;
pub mod ollama;

use crate::config::Config;
use crate::error::{FluentError, FluentResult};
use async_trait::async_trait;
use std::time::Duration;

pub use gemini::{GeminiAuth, GeminiModel};
pub use ollama::OllamaModel;

/// Sampling settings for a single generation call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

/// Trait for text generation backends
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> String;

    /// Send a prompt and return the raw reply text
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> FluentResult<String>;
}

/// Shared HTTP client with the configured request timeout
pub fn http_client(config: &Config) -> FluentResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?)
}

/// Factory to create the configured model.
///
/// Returns `ProviderUnavailable` when the selected provider lacks
/// credentials; callers fall back to mock mode.
pub fn create_model(config: &Config) -> FluentResult<Box<dyn TextModel>> {
    match config.provider.as_str() {
        "mock" => Err(FluentError::ProviderUnavailable(
            "mock mode requested".to_string(),
        )),
        "ollama" => Ok(Box::new(OllamaModel::new(config)?)),
        "gemini" => {
            if config.google_api_key.is_empty() {
                return Err(FluentError::ProviderUnavailable(
                    "GOOGLE_API_KEY is not set".to_string(),
                ));
            }
            Ok(Box::new(GeminiModel::new(
                config,
                GeminiAuth::ApiKey(config.google_api_key.clone()),
            )?))
        }
        "vertex" => {
            if !config.has_vertex_credentials() {
                return Err(FluentError::ProviderUnavailable(
                    "GOOGLE_CLOUD_PROJECT and GOOGLE_ACCESS_TOKEN are required for Vertex AI"
                        .to_string(),
                ));
            }
            Ok(Box::new(GeminiModel::new(config, vertex_auth(config))?))
        }
        "auto" => {
            if !config.google_api_key.is_empty() {
                Ok(Box::new(GeminiModel::new(
                    config,
                    GeminiAuth::ApiKey(config.google_api_key.clone()),
                )?))
            } else if config.has_vertex_credentials() {
                Ok(Box::new(GeminiModel::new(config, vertex_auth(config))?))
            } else {
                Err(FluentError::ProviderUnavailable(
                    "no Google credentials found in the environment".to_string(),
                ))
            }
        }
        other => Err(FluentError::Config(format!("unknown provider '{}'", other))),
    }
}

fn vertex_auth(config: &Config) -> GeminiAuth {
    GeminiAuth::Vertex {
        project: config.gcp_project.clone(),
        location: config.gcp_location.clone(),
        access_token: config.gcp_access_token.clone(),
    }
}
