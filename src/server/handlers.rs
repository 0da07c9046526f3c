// HTTP request handlers

use super::prompts;
use super::routes::AppState;
use crate::error::{GatewayError, Result};
use crate::lang::{self, Language};
use crate::metrics;
use crate::models::api::{ChatRequest, ChatResponse, TranslateRequest, TranslateResponse};
use crate::models::gemini::{
    default_safety_settings, Content, GenerateContentRequest, GenerationConfig,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

// Generation parameters carried over from the serverless version:
// conversational warmth for chat, determinism for translation.
const CHAT_TEMPERATURE: f32 = 0.8;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 400;
const CHAT_TOP_P: f32 = 0.9;
const CHAT_TOP_K: u32 = 40;

const TRANSLATE_TEMPERATURE: f32 = 0.3;
const TRANSLATE_MAX_OUTPUT_TOKENS: u32 = 1024;
const BATCH_MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check upstream configuration
    let gemini_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "model {} at {}",
            state.gemini_client.model(),
            state.gemini_client.base_url()
        ),
    };
    checks.insert("gemini_api".to_string(), gemini_check);

    // Check content data file
    let data_path = state.projects.data_path();
    let content_check = if data_path.exists() {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("data file: {}", data_path.display()),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: format!("data file {} missing, content routes serve empty lists", data_path.display()),
        }
    };
    checks.insert("content_data".to_string(), content_check);

    // Check assistant profile
    let assistant_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "assistant \"{}\" for {}",
            state.config.assistant.name, state.config.assistant.organization
        ),
    };
    checks.insert("assistant_profile".to_string(), assistant_check);

    Json(HealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

/// Handler for the /api/chat endpoint.
///
/// Success answers in the language the script detection resolved; any
/// upstream problem answers 502 with a localized apology the widget can
/// render as-is.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: String, // Get raw JSON as string first
) -> Result<Response> {
    // Manually deserialize to control the error body shape
    let req: ChatRequest = serde_json::from_str(&body).map_err(|e| {
        debug!("Chat request rejected: {}", e);
        GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e))
    })?;

    if req.message.is_empty() {
        return Err(GatewayError::InvalidRequest("Missing message".to_string()));
    }

    // Unknown declared codes normalize to English; the raw string is still
    // echoed back so the widget sees what it sent.
    let declared = req.language.clone().unwrap_or_else(|| "en".to_string());
    let ui_language = Language::from_code(&declared).unwrap_or_default();
    let response_lang = lang::response_language(&req.message, ui_language);

    info!(
        "Chat message: history={}, declared={}, responding in {}",
        req.conversation_history.len(),
        declared,
        response_lang
    );

    let request = GenerateContentRequest {
        contents: prompts::chat_contents(
            &state.config.assistant,
            &req.message,
            &req.conversation_history,
            response_lang,
        ),
        generation_config: Some(GenerationConfig {
            temperature: Some(CHAT_TEMPERATURE),
            max_output_tokens: Some(CHAT_MAX_OUTPUT_TOKENS),
            top_p: Some(CHAT_TOP_P),
            top_k: Some(CHAT_TOP_K),
        }),
        safety_settings: Some(default_safety_settings()),
    };

    let reply = match state.gemini_client.generate_content(&request, "chat").await {
        Ok(response) => match response.first_text().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text.to_string()),
            _ => {
                warn!(
                    "Chat reply unusable: {}",
                    response.block_reason().unwrap_or("no candidates")
                );
                None
            }
        },
        Err(e) => {
            error!("Chat upstream call failed: {}", e);
            None
        }
    };

    match reply {
        Some(text) => {
            metrics::record_chat("ok");
            Ok(Json(ChatResponse::ok(text, &declared)).into_response())
        }
        None => {
            // The apology is localized by the DECLARED UI language, since a
            // failed call tells us nothing about the visitor's script.
            metrics::record_chat("fallback");
            let fallback = ui_language.fallback_message(&state.config.assistant.contact_email);
            Ok((StatusCode::BAD_GATEWAY, Json(ChatResponse::unavailable(fallback))).into_response())
        }
    }
}

/// Handler for the /api/translate endpoint, single and batch forms.
pub async fn translate_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<TranslateResponse>> {
    let req: TranslateRequest = serde_json::from_str(&body).map_err(|e| {
        debug!("Translate request rejected: {}", e);
        GatewayError::InvalidRequest(format!("Invalid JSON body: {}", e))
    })?;

    let TranslateRequest {
        text,
        texts,
        target_lang,
    } = req;

    if target_lang.is_empty() {
        return Err(GatewayError::InvalidRequest(
            "Missing text or targetLang".to_string(),
        ));
    }

    match (texts, text) {
        (Some(texts), _) if !texts.is_empty() => translate_batch(&state, texts, &target_lang).await,
        (_, Some(text)) if !text.is_empty() => translate_single(&state, text, &target_lang).await,
        _ => Err(GatewayError::InvalidRequest(
            "Missing text or targetLang".to_string(),
        )),
    }
}

/// Known codes translate to their display name; anything else is passed
/// to the prompt verbatim, letting the model make sense of it.
fn target_display(target_lang: &str) -> String {
    Language::from_code(target_lang)
        .map(|l| l.display_name().to_string())
        .unwrap_or_else(|| target_lang.to_string())
}

async fn translate_single(
    state: &AppState,
    text: String,
    target_lang: &str,
) -> Result<Json<TranslateResponse>> {
    let request = GenerateContentRequest {
        contents: vec![Content::user(prompts::translate_prompt(
            &text,
            &target_display(target_lang),
            &state.config.assistant.organization,
        ))],
        generation_config: Some(GenerationConfig {
            temperature: Some(TRANSLATE_TEMPERATURE),
            max_output_tokens: Some(TRANSLATE_MAX_OUTPUT_TOKENS),
            ..Default::default()
        }),
        safety_settings: None,
    };

    let response = state
        .gemini_client
        .generate_content(&request, "translate")
        .await
        .map_err(|e| {
            error!("Translation upstream call failed: {}", e);
            GatewayError::Translation(e.to_string())
        })?;

    // An empty reply falls back to the source text rather than erroring
    let translation = match response.first_text().map(str::trim) {
        Some(reply) if !reply.is_empty() => reply.to_string(),
        _ => text.clone(),
    };

    metrics::record_translations("single", 1);
    debug!("Translated 1 text to {}", target_lang);

    Ok(Json(TranslateResponse::single(
        translation,
        lang::detect(&text),
        target_lang,
    )))
}

async fn translate_batch(
    state: &AppState,
    texts: Vec<String>,
    target_lang: &str,
) -> Result<Json<TranslateResponse>> {
    let count = texts.len();

    let request = GenerateContentRequest {
        contents: vec![Content::user(prompts::batch_translate_prompt(
            &texts,
            &target_display(target_lang),
            &state.config.assistant.organization,
        ))],
        generation_config: Some(GenerationConfig {
            temperature: Some(TRANSLATE_TEMPERATURE),
            max_output_tokens: Some(BATCH_MAX_OUTPUT_TOKENS),
            ..Default::default()
        }),
        safety_settings: None,
    };

    let response = state
        .gemini_client
        .generate_content(&request, "translate_batch")
        .await
        .map_err(|e| {
            error!("Batch translation upstream call failed: {}", e);
            GatewayError::Translation(e.to_string())
        })?;

    let joined = response
        .first_text()
        .ok_or_else(|| GatewayError::Translation("empty batch reply".to_string()))?;

    let translations: Vec<String> = joined
        .split(prompts::BATCH_SEPARATOR)
        .map(|segment| segment.trim().to_string())
        .collect();

    // The length/order contract is strict: a miscounted reply is useless
    // because segments can no longer be matched to their sources.
    if translations.len() != count {
        warn!(
            "Batch translation count mismatch: expected {}, got {}",
            count,
            translations.len()
        );
        return Err(GatewayError::Translation(format!(
            "segment count mismatch: expected {}, got {}",
            count,
            translations.len()
        )));
    }

    metrics::record_translations("batch", count);
    debug!("Translated {} texts to {}", count, target_lang);

    Ok(Json(TranslateResponse::batch(translations, target_lang)))
}
