//! Embeddable site core: the pieces a front end needs to speak to the
//! gateway.
//!
//! Everything here takes its dependencies through constructors so shells
//! and tests can swap them: the gateway base URL and HTTP client live in
//! [`ApiClient`], persistence behind the [`Storage`] trait, and the
//! translating indicator behind [`ProgressSink`].
//!
//! # Components
//!
//! - `cache` / `translate`: the translation cache and the batching
//!   dispatcher on top of it.
//! - `chat`: the guarded conversational session.
//! - `content`: project/gallery loading with local fallback.
//! - `storage`: memory and file-backed session persistence.

mod cache;
mod chat;
mod content;
mod http;
mod storage;
mod translate;

pub use cache::TranslationCache;
pub use chat::{ChatConfig, ChatReply, ChatSession, SendOutcome};
pub use content::ContentLoader;
pub use http::ApiClient;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use translate::{NoopProgress, ProgressSink, Translator, TranslatorConfig};

use thiserror::Error;

/// Client-side failures. Most are swallowed internally in favor of
/// degraded output; `SessionBusy` is the one an embedder routinely
/// handles.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("a message is already awaiting its reply")]
    SessionBusy,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("service reported failure: {0}")]
    Service(String),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
