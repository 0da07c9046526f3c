//! Configuration data structures for the trilingo gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the Gemini API connection, and the organization
//! profile the assistant speaks for.

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, body limit).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream Gemini API settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Organization profile used to build the assistant prompt and the
    /// localized fallback messages.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Project/gallery content settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Performance and resource management settings.
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body size in bytes. Covers the largest
    /// realistic batch translation payload with room to spare.
    /// Default: `262144` (256 KiB)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

/// Settings for the upstream Gemini API connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the Generative Language API.
    /// Default: `https://generativelanguage.googleapis.com/v1beta`
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// The Gemini model every request targets.
    /// Default: `gemini-1.5-flash`
    #[serde(default = "default_model")]
    pub model: String,

    /// API key passed as the `key` query parameter. Usually supplied via
    /// the `GEMINI_API_KEY` environment variable rather than the file.
    /// Default: empty
    #[serde(default)]
    pub api_key: String,

    /// Connection and request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// The organization the assistant represents. Everything here is
/// interpolated into the system prompt and the fallback apologies, so a
/// deployment never has to fork the prompt text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Assistant display name, used in the greeting and prompt persona.
    /// Default: `Community Helper`
    #[serde(default = "default_assistant_name")]
    pub name: String,

    /// Organization name.
    /// Default: `Community Contribution Foundation`
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Bullet lines describing the organization (history, focus areas,
    /// programs). Rendered verbatim into the prompt's About section.
    /// Default: empty
    #[serde(default)]
    pub about: Vec<String>,

    /// Support contact shown in every fallback apology.
    /// Default: `hello@example.org`
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    /// Optional WhatsApp contact line.
    /// Default: empty
    #[serde(default)]
    pub whatsapp: String,

    /// Public website.
    /// Default: empty
    #[serde(default)]
    pub website: String,
}

/// Settings for the read-only content routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Path to the projects JSON file. A missing file serves empty lists.
    /// Default: `data/projects.json`
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to mask the API key anywhere a URL might be echoed.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub sanitize_keys: bool,
}

/// Settings for tuning application performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of idle connections to keep in the HTTP pool.
    /// Default: `10`
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Whether to enable GZIP compression for HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            organization: default_organization(),
            about: Vec::new(),
            contact_email: default_contact_email(),
            whatsapp: String::new(),
            website: String::new(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            sanitize_keys: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            connection_pool_size: default_pool_size(),
            enable_compression: true,
        }
    }
}

// Helper functions for serde defaults and shared constants

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    262_144
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_assistant_name() -> String {
    "Community Helper".to_string()
}

fn default_organization() -> String {
    "Community Contribution Foundation".to_string()
}

fn default_contact_email() -> String {
    "hello@example.org".to_string()
}

fn default_data_path() -> String {
    "data/projects.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

fn default_pool_size() -> usize {
    10
}
