//! Fluenter Library
//!
//! Grammar correction, rephrasing and Taglish conversion through an LLM,
//! shared by the HTTP API service and the clipboard agent.

pub mod activity;
pub mod agent;
pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod llm;
