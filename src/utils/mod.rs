//! Cross-cutting helpers.
//!
//! # Submodules
//!
//! - `logging`: tracing initialization and API key sanitization.

pub mod logging;
