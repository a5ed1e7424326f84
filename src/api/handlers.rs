//! HTTP Handlers
//!
//! Correct and rephrase requests. Empty input short-circuits without a model
//! call. The model call runs in its own task so a panic inside a backend is
//! reported as a processing failure instead of tearing down the worker.

use super::messages::{CorrectionResult, HealthStatus, RephraseResult, ServiceStatus, TextInput};
use crate::core::{preview, ModelInvoker};
use crate::error::{FluentError, FluentResult};
use actix_web::{get, post, web, Responder};
use std::sync::Arc;
use tracing::{error, info};

/// Correct grammar in `input.text`
pub async fn correct_text(
    invoker: Arc<ModelInvoker>,
    input: TextInput,
) -> FluentResult<CorrectionResult> {
    if input.text.trim().is_empty() {
        return Ok(CorrectionResult::unchanged(&input.text));
    }

    info!("Processing text: {}...", preview(&input.text, 50));

    let TextInput { text, context } = input;
    let original = text.clone();
    let correction = tokio::spawn(async move { invoker.correct(&text, &context).await })
        .await
        .map_err(|e| {
            error!("Error processing text: {}", e);
            FluentError::ProcessingFailure(format!("Error processing text: {}", e))
        })?;

    Ok(CorrectionResult::new(
        &original,
        correction.corrected,
        correction.suggestions,
    ))
}

/// Produce alternatives for `input.text`
pub async fn rephrase_text(
    invoker: Arc<ModelInvoker>,
    input: TextInput,
) -> FluentResult<RephraseResult> {
    if input.text.trim().is_empty() {
        return Ok(RephraseResult {
            original: input.text,
            alternatives: Vec::new(),
        });
    }

    info!("Rephrasing text: {}...", preview(&input.text, 50));

    let text = input.text.clone();
    let alternatives = tokio::spawn(async move { invoker.rephrase(&text).await })
        .await
        .map_err(|e| {
            error!("Error rephrasing text: {}", e);
            FluentError::ProcessingFailure(format!("Error rephrasing text: {}", e))
        })?;

    Ok(RephraseResult {
        original: input.text,
        alternatives,
    })
}

#[get("/")]
pub async fn root() -> impl Responder {
    web::Json(ServiceStatus {
        message: "Fluenter Grammar API is running".to_string(),
        status: "active".to_string(),
    })
}

#[get("/health")]
pub async fn health() -> impl Responder {
    web::Json(HealthStatus {
        status: "healthy".to_string(),
        service: "fluenter-backend".to_string(),
    })
}

#[post("/correct")]
pub async fn correct(
    invoker: web::Data<ModelInvoker>,
    payload: web::Json<TextInput>,
) -> Result<web::Json<CorrectionResult>, FluentError> {
    let result = correct_text(invoker.into_inner(), payload.into_inner()).await?;
    Ok(web::Json(result))
}

#[post("/rephrase")]
pub async fn rephrase(
    invoker: web::Data<ModelInvoker>,
    payload: web::Json<TextInput>,
) -> Result<web::Json<RephraseResult>, FluentError> {
    let result = rephrase_text(invoker.into_inner(), payload.into_inner()).await?;
    Ok(web::Json(result))
}
