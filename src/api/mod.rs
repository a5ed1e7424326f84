//! HTTP API Module
//!
//! JSON over HTTP for the desktop client: `GET /`, `GET /health`,
//! `POST /correct`, `POST /rephrase`.

pub mod handlers;
pub mod messages;
pub mod server;

pub use handlers::{correct_text, rephrase_text};
pub use messages::*;
pub use server::{app, configure, run};
