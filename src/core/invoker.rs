//! Model Invoker
//!
//! Builds the prompt for a task, calls the configured model (or mock mode)
//! and hands the reply to the normalizer. One instance is constructed at
//! startup and shared by reference; there is no global client.

use super::mock;
use super::normalizer::{self, Correction};
use crate::config::Config;
use crate::error::{FluentError, FluentResult};
use crate::llm::{self, GenerationOptions, TextModel};
use tracing::{debug, error, info, warn};

/// What the model is asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Grammar correction with explanations (API service)
    Correct,
    /// Three stylistic alternatives (API service)
    Rephrase,
    /// English to Tamil romanized "Taglish" (clipboard agent)
    Transliterate,
    /// Spelling/grammar fix returning only the rewritten text (clipboard agent)
    Proofread,
}

impl TaskKind {
    /// Sampling temperature: low for corrections, higher for rephrasing
    pub fn temperature(self) -> f32 {
        match self {
            TaskKind::Correct => 0.3,
            TaskKind::Rephrase => 0.7,
            TaskKind::Transliterate | TaskKind::Proofread => 0.0,
        }
    }

    /// Natural-language instruction embedding the text and the output shape
    pub fn prompt(self, text: &str, context: &str) -> String {
        match self {
            TaskKind::Correct => {
                let context_hint = if context.trim().is_empty() {
                    String::new()
                } else {
                    format!("\nContext about the text: \"{context}\"\n")
                };
                format!(
                    r#"You are a grammar correction assistant. Analyze the following text and correct any grammar, spelling, or punctuation errors.
{context_hint}
Text to correct: "{text}"

Provide your response in the following JSON format:
{{
    "corrected": "the corrected text here",
    "suggestions": ["suggestion 1", "suggestion 2"]
}}

If the text has no errors, return it unchanged. Suggestions should explain what was fixed."#
                )
            }
            TaskKind::Rephrase => format!(
                r#"Rephrase the following text in 3 different ways to improve clarity, tone, or formality. Make each version distinct.

Text: "{text}"

Provide your response in JSON format:
{{
    "options": ["option 1", "option 2", "option 3"]
}}"#
            ),
            TaskKind::Transliterate => rewrite_prompt(
                "Convert the given English text into its Tamil Romanized (Taglish) form.",
                text,
            ),
            TaskKind::Proofread => rewrite_prompt(
                "Correct the given English text for spelling and grammar mistakes.",
                text,
            ),
        }
    }
}

fn rewrite_prompt(instruction: &str, text: &str) -> String {
    format!(
        r#"{instruction}
Return the output strictly as JSON following this schema:
{{"rewritten_text": "the rewritten text"}}
Do not add any other fields.

Text:
{text}"#
    )
}

enum Backend {
    Live(Box<dyn TextModel>),
    Mock,
}

/// Calls the model for correction, rephrasing and rewriting
pub struct ModelInvoker {
    backend: Backend,
    max_output_tokens: u32,
}

impl ModelInvoker {
    /// Wrap a live model
    pub fn new(model: Box<dyn TextModel>, max_output_tokens: u32) -> Self {
        Self {
            backend: Backend::Live(model),
            max_output_tokens,
        }
    }

    /// Deterministic offline invoker
    pub fn mock() -> Self {
        Self {
            backend: Backend::Mock,
            max_output_tokens: Config::default().max_output_tokens,
        }
    }

    /// Build from configuration. A provider without credentials selects
    /// mock mode; only an invalid configuration is an error.
    pub fn from_config(config: &Config) -> FluentResult<Self> {
        match llm::create_model(config) {
            Ok(model) => {
                info!("Model client initialized: {}", model.name());
                Ok(Self::new(model, config.max_output_tokens))
            }
            Err(FluentError::ProviderUnavailable(reason)) => {
                warn!("Model provider unavailable ({}), falling back to mock mode", reason);
                Ok(Self::mock())
            }
            Err(e) => Err(e),
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self.backend, Backend::Mock)
    }

    /// Backend name for logs and banners
    pub fn backend_name(&self) -> String {
        match &self.backend {
            Backend::Live(model) => model.name(),
            Backend::Mock => "mock".to_string(),
        }
    }

    /// Raw model reply for a task
    pub async fn invoke(&self, task: TaskKind, text: &str, context: &str) -> FluentResult<String> {
        match &self.backend {
            Backend::Mock => Ok(mock::reply(task, text)),
            Backend::Live(model) => {
                let options = GenerationOptions {
                    temperature: task.temperature(),
                    max_output_tokens: self.max_output_tokens,
                };
                let reply = model.generate(&task.prompt(text, context), options).await?;
                debug!("{:?} reply: {}", task, reply);
                Ok(reply)
            }
        }
    }

    /// Correct grammar. Provider failures come back as the unchanged text
    /// with an `Error: ...` suggestion.
    pub async fn correct(&self, text: &str, context: &str) -> Correction {
        match self.invoke(TaskKind::Correct, text, context).await {
            Ok(reply) => normalizer::normalize_correction(&reply, text),
            Err(e) => {
                error!("Error in grammar correction: {}", e);
                Correction {
                    corrected: text.to_string(),
                    suggestions: vec![format!("Error: {}", e)],
                }
            }
        }
    }

    /// Rephrase text. Provider failures come back as a single `Error: ...`
    /// alternative.
    pub async fn rephrase(&self, text: &str) -> Vec<String> {
        match self.invoke(TaskKind::Rephrase, text, "").await {
            Ok(reply) => normalizer::normalize_rephrase(&reply),
            Err(e) => {
                error!("Error in rephrasing: {}", e);
                vec![format!("Error: {}", e)]
            }
        }
    }

    /// Rewrite text for the clipboard agent. Errors propagate so the caller
    /// can log them and leave the clipboard alone.
    pub async fn rewrite(&self, task: TaskKind, text: &str) -> FluentResult<String> {
        let reply = self.invoke(task, text, "").await?;
        Ok(normalizer::normalize_rewrite(&reply))
    }
}
