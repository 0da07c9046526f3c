//! Data models for the trilingo gateway.
//!
//! This module contains the type definitions for request/response bodies used by:
//! - The site-facing API shared by the server and the embeddable client (`api`)
//! - The upstream Google Gemini API (`gemini`)
//! - The localized project/gallery content served by the content routes (`content`)

pub mod api;
pub mod content;
pub mod gemini;

pub use api::{ChatRequest, ChatResponse, ConversationTurn, TranslateRequest, TranslateResponse, TurnRole};
pub use content::{GalleryItem, LocalizedText, Project, ProjectStat};
pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part, SafetySetting};
