// Gemini API client for the public generateContent endpoint

use crate::config::{GeminiConfig, PerformanceConfig};
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::models::gemini::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the Google Generative Language API.
///
/// Authentication is a per-request `key` query parameter. Because reqwest
/// error text and upstream error bodies can echo the request URL, every
/// message that leaves this module passes through `sanitize` first.
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Fails fast when no API key is configured; a gateway that cannot
    /// reach its upstream has nothing to serve.
    pub fn new(config: &GeminiConfig, performance: &PerformanceConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(GatewayError::Config(
                "Gemini API key is not set (GEMINI_API_KEY or gemini.api_key)".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Call Gemini `generateContent`.
    ///
    /// `operation` labels the metrics series ("chat", "translate", ...).
    /// Errors are returned immediately; callers decide how to degrade,
    /// nothing is retried here.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
        operation: &str,
    ) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );
        debug!("Calling generateContent for {}", operation);

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_upstream(operation, "network_error", start.elapsed());
                GatewayError::GeminiApi(sanitize(&format!("HTTP error: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status,
                sanitize(&error_text)
            );
            metrics::record_upstream(operation, status.as_str(), start.elapsed());

            let error_msg = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(GatewayError::GeminiApi(format!(
                "HTTP {}: {}",
                status,
                sanitize(&error_msg)
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| GatewayError::GeminiApi(sanitize(&format!("Failed to read response body: {}", e))))?;

        let gemini_response: GenerateContentResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                error!("Failed to parse Gemini response: {}", e);
                metrics::record_upstream(operation, "decode_error", start.elapsed());
                GatewayError::GeminiApi(format!("Response parsing error: {}", e))
            })?;

        metrics::record_upstream(operation, "ok", start.elapsed());
        debug!("generateContent for {} completed in {:?}", operation, start.elapsed());

        Ok(gemini_response)
    }

    /// Check connectivity to the Gemini API.
    ///
    /// Sends a minimal one-token request to verify the endpoint is
    /// reachable and the key is accepted.
    pub async fn check_connectivity(&self) -> Result<Duration> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );
        debug!("Checking connectivity via models/{}", self.config.model);

        let start = std::time::Instant::now();

        let request = GenerateContentRequest {
            contents: vec![Content::user("hi")],
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(1),
                ..Default::default()
            }),
            safety_settings: None,
        };

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .timeout(Duration::from_secs(5)) // Short timeout for health checks
            .send()
            .await
            .map_err(|e| GatewayError::GeminiApi(sanitize(&format!("Connectivity check failed: {}", e))))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::GeminiApi(format!(
                "API check failed: HTTP {}: {}",
                status,
                sanitize(&error_text)
            )));
        }

        let latency = start.elapsed();
        debug!("API connectivity check passed in {:?}", latency);

        Ok(latency)
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}
