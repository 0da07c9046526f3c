// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    GEMINI_API_CALLS,
    GEMINI_API_DURATION,
    TRANSLATIONS_TOTAL,
    CHAT_MESSAGES,
};

use std::time::Duration;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let status = status_code.to_string();

    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status])
        .observe(duration.as_secs_f64());
}

/// Helper to record Gemini API call metrics
pub fn record_upstream(operation: &str, status: &str, duration: Duration) {
    GEMINI_API_CALLS
        .with_label_values(&[operation, status])
        .inc();

    GEMINI_API_DURATION
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Helper to record served translations
pub fn record_translations(mode: &str, count: usize) {
    if count > 0 {
        TRANSLATIONS_TOTAL
            .with_label_values(&[mode])
            .inc_by(count as f64);
    }
}

/// Helper to record chat outcomes
pub fn record_chat(outcome: &str) {
    CHAT_MESSAGES.with_label_values(&[outcome]).inc();
}
