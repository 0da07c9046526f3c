// Single and batched translation on top of the cache

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::cache::TranslationCache;
use super::http::ApiClient;
use super::{ClientError, ClientResult};
use crate::lang::Language;
use crate::models::api::{TranslateRequest, TranslateResponse};

/// Observer for the transient "translating" indicator around a batch
/// run. `translation_finished` fires however the run ends.
pub trait ProgressSink: Send + Sync {
    fn translation_started(&self) {}
    fn translation_finished(&self) {}
}

/// Default sink for embedders without a progress affordance.
#[derive(Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {}

/// Tuning for the dispatcher.
pub struct TranslatorConfig {
    /// Texts per upstream request.
    pub batch_limit: usize,
    /// Pause between consecutive chunk requests.
    pub chunk_delay: Duration,
    /// Per-request timeout. A timed-out request is abandoned inside the
    /// HTTP client, so a late reply can never reach the cache after the
    /// original text has already been returned.
    pub timeout: Duration,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            batch_limit: 20,
            chunk_delay: Duration::from_millis(250),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Translation dispatcher: consults the cache, batches the misses, and
/// degrades to the original text on any failure. No method here returns
/// an error; untranslated English is the worst case.
pub struct Translator {
    api: ApiClient,
    cache: Arc<TranslationCache>,
    progress: Arc<dyn ProgressSink>,
    config: TranslatorConfig,
}

struct IndicatorGuard<'a>(&'a dyn ProgressSink);

impl Drop for IndicatorGuard<'_> {
    fn drop(&mut self) {
        self.0.translation_finished();
    }
}

impl Translator {
    pub fn new(api: ApiClient, cache: Arc<TranslationCache>) -> Self {
        Translator {
            api,
            cache,
            progress: Arc::new(NoopProgress),
            config: TranslatorConfig::default(),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Translate one text into `lang`. English targets, blank input,
    /// and cache hits short-circuit without a request; failures return
    /// the original text.
    pub async fn translate_one(&self, text: &str, lang: Language) -> String {
        if text.trim().is_empty() || lang.is_default() {
            return text.to_string();
        }

        if let Some(hit) = self.cache.get(text, lang) {
            return hit;
        }

        match self.request_single(text, lang).await {
            Ok(translation) => {
                self.cache.put(text, lang, translation.clone());
                translation
            }
            Err(e) => {
                warn!("Translation failed, keeping original: {}", e);
                text.to_string()
            }
        }
    }

    /// Translate many texts into `lang`. The result has the same length
    /// and order as the input; every position holds either a translation
    /// or its original text. Cache misses travel in chunks of
    /// `batch_limit`, sequentially, with `chunk_delay` between chunks.
    /// A failed chunk keeps its originals without disturbing the others.
    pub async fn translate_many(&self, texts: &[String], lang: Language) -> Vec<String> {
        let mut results: Vec<String> = texts.to_vec();
        if texts.is_empty() || lang.is_default() {
            return results;
        }

        self.progress.translation_started();
        let _guard = IndicatorGuard(self.progress.as_ref());

        let mut misses: Vec<usize> = Vec::new();
        for (i, text) in texts.iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            match self.cache.get(text, lang) {
                Some(hit) => results[i] = hit,
                None => misses.push(i),
            }
        }

        if misses.is_empty() {
            debug!("All {} texts served from cache", texts.len());
            return results;
        }

        for (chunk_no, chunk) in misses.chunks(self.config.batch_limit).enumerate() {
            if chunk_no > 0 {
                tokio::time::sleep(self.config.chunk_delay).await;
            }

            let chunk_texts: Vec<String> = chunk.iter().map(|&i| texts[i].clone()).collect();
            match self.request_batch(&chunk_texts, lang).await {
                Ok(translations) => {
                    for (&i, translation) in chunk.iter().zip(translations) {
                        if translation.is_empty() {
                            continue;
                        }
                        self.cache.put(&texts[i], lang, translation.clone());
                        results[i] = translation;
                    }
                }
                Err(e) => {
                    warn!(
                        "Batch chunk failed, keeping {} originals: {}",
                        chunk.len(),
                        e
                    );
                }
            }
        }

        results
    }

    async fn request_single(&self, text: &str, lang: Language) -> ClientResult<String> {
        let response: TranslateResponse = self
            .api
            .post_json(
                "/api/translate",
                &TranslateRequest::single(text, lang.code()),
                self.config.timeout,
            )
            .await?;

        if !response.success {
            return Err(ClientError::Service(
                response.error.unwrap_or_else(|| "translation failed".to_string()),
            ));
        }

        match response.translation.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => Ok(t.to_string()),
            _ => Err(ClientError::Service("empty translation".to_string())),
        }
    }

    async fn request_batch(&self, chunk: &[String], lang: Language) -> ClientResult<Vec<String>> {
        let response: TranslateResponse = self
            .api
            .post_json(
                "/api/translate",
                &TranslateRequest::batch(chunk.to_vec(), lang.code()),
                self.config.timeout,
            )
            .await?;

        if !response.success {
            return Err(ClientError::Service(
                response.error.unwrap_or_else(|| "translation failed".to_string()),
            ));
        }

        let translations = response.translations.unwrap_or_default();
        if translations.len() != chunk.len() {
            return Err(ClientError::Service(format!(
                "segment count mismatch: sent {}, received {}",
                chunk.len(),
                translations.len()
            )));
        }

        Ok(translations)
    }
}
