//! Upstream Gemini API access.
//!
//! One client, one model, plain `generateContent` calls against the
//! public Generative Language API. Every site feature is a single
//! round trip; nothing here streams.

mod client;

pub use client::GeminiClient;
