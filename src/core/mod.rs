//! Core processing modules
//!
//! Model invocation, mock mode and the normalization of model replies.

pub mod invoker;
pub mod mock;
pub mod normalizer;

pub use invoker::{ModelInvoker, TaskKind};
pub use normalizer::Correction;

/// First `max_chars` characters of `text`, for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
