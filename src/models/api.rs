// Site-facing API type definitions
// Shared by the gateway handlers and the embeddable client.

use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// Chat request from the assistant widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The visitor's message. Required; empty means invalid.
    #[serde(default)]
    pub message: String,

    /// Declared UI language code. Defaults to "en"; unknown codes
    /// normalize to English.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Prior turns, oldest first. The widget sends at most its last ten.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conversation_history: Vec<ConversationTurn>,
}

/// One prior turn of the widget conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    #[serde(default)]
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        ConversationTurn {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ConversationTurn {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Turn author. Anything that is not literally "user" counts as the
/// assistant side when mapping to Gemini's model role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(other)]
    Assistant,
}

/// Chat reply. The failure form carries a localized apology in
/// `response` so the widget can render it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn ok(response: impl Into<String>, language: &str) -> Self {
        ChatResponse {
            success: true,
            response: response.into(),
            language: Some(language.to_string()),
            error: None,
        }
    }

    pub fn unavailable(fallback: impl Into<String>) -> Self {
        ChatResponse {
            success: false,
            response: fallback.into(),
            language: None,
            error: Some("Service temporarily unavailable".to_string()),
        }
    }
}

/// Translation request. Exactly one of `text` (single) or `texts`
/// (batch) is expected; `target_lang` is always required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<String>>,
    #[serde(default)]
    pub target_lang: String,
}

impl TranslateRequest {
    pub fn single(text: impl Into<String>, target_lang: &str) -> Self {
        TranslateRequest {
            text: Some(text.into()),
            texts: None,
            target_lang: target_lang.to_string(),
        }
    }

    pub fn batch(texts: Vec<String>, target_lang: &str) -> Self {
        TranslateRequest {
            text: None,
            texts: Some(texts),
            target_lang: target_lang.to_string(),
        }
    }
}

/// Translation reply, single or batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_lang: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslateResponse {
    pub fn single(translation: impl Into<String>, original_lang: Language, target_lang: &str) -> Self {
        TranslateResponse {
            success: true,
            translation: Some(translation.into()),
            translations: None,
            original_lang: Some(original_lang),
            target_lang: Some(target_lang.to_string()),
            error: None,
        }
    }

    pub fn batch(translations: Vec<String>, target_lang: &str) -> Self {
        TranslateResponse {
            success: true,
            translation: None,
            translations: Some(translations),
            original_lang: None,
            target_lang: Some(target_lang.to_string()),
            error: None,
        }
    }
}
