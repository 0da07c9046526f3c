//! Axum-based HTTP server for the trilingo gateway.
//!
//! This module sets up the HTTP server, configures routes, and handles
//! incoming requests from the site: the two Gemini-backed endpoints (chat
//! and translation), the read-only content API, and the ops routes.
//!
//! # Components
//!
//! - `handlers`: The chat/translate proxy endpoints plus health and metrics.
//! - `content`: The projects and gallery routes.
//! - `prompts`: Prompt construction for everything sent upstream.
//! - `middleware`: CORS, request ID tracking, and request metrics.
//! - `routes`: The main router configuration that ties everything together.

mod content;
mod handlers;
mod middleware;
mod prompts;
mod routes;

pub use prompts::BATCH_SEPARATOR;
pub use routes::{create_router, AppState};
