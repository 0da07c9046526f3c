// Guarded conversational session against the assistant endpoint

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::http::ApiClient;
use super::storage::Storage;
use super::{ClientError, ClientResult};
use crate::lang::{self, Language};
use crate::models::api::{ChatRequest, ChatResponse, ConversationTurn};

const HISTORY_KEY: &str = "chat_history";

/// Tuning for the session.
pub struct ChatConfig {
    /// Prior turns sent along with each message.
    pub history_window: usize,
    /// Turns kept in memory and in persisted history.
    pub history_limit: usize,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Support contact woven into the local fallback apology.
    pub contact: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        ChatConfig {
            history_window: 10,
            history_limit: 20,
            timeout: Duration::from_secs(10),
            contact: "hello@example.org".to_string(),
        }
    }
}

/// What a send produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Blank input; nothing was sent and nothing changed.
    Ignored,
    Replied(ChatReply),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub text: String,
    /// Language the reply is in. For an assistant answer this follows
    /// the message script over the UI preference; the fallback apology
    /// follows the UI preference.
    pub language: Language,
    /// True when `text` is the local apology, not an assistant answer.
    pub fallback: bool,
}

/// One visitor's conversation with the assistant.
///
/// The session is either idle or awaiting a reply. The transition is
/// guarded: a second `send` while one is in flight is rejected with
/// [`ClientError::SessionBusy`] rather than queued silently, and the
/// guard resets on every exit path.
pub struct ChatSession {
    api: ApiClient,
    storage: Arc<dyn Storage>,
    config: ChatConfig,
    language: Mutex<Language>,
    history: Mutex<Vec<ConversationTurn>>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ChatSession {
    /// Hydrates persisted history. A corrupt blob starts a fresh
    /// session rather than failing construction.
    pub fn new(api: ApiClient, storage: Arc<dyn Storage>, config: ChatConfig) -> Self {
        let history = match storage.get(HISTORY_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<ConversationTurn>>(&raw) {
                Ok(turns) => {
                    debug!("Restored {} chat turns", turns.len());
                    turns
                }
                Err(e) => {
                    warn!("Discarding corrupt chat history: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        ChatSession {
            api,
            storage,
            config,
            language: Mutex::new(Language::En),
            history: Mutex::new(history),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn set_language(&self, language: Language) {
        *self.language.lock() = language;
    }

    pub fn language(&self) -> Language {
        *self.language.lock()
    }

    pub fn history(&self) -> Vec<ConversationTurn> {
        self.history.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Drops the conversation, in memory and in storage.
    pub fn clear(&self) {
        self.history.lock().clear();
        self.storage.remove(HISTORY_KEY);
    }

    /// Send a visitor message and wait for the reply.
    ///
    /// Blank input returns [`SendOutcome::Ignored`]. While a reply is
    /// pending, further sends fail with [`ClientError::SessionBusy`].
    /// An endpoint failure yields a localized apology with `fallback`
    /// set; the apology never enters the history.
    pub async fn send(&self, message: &str) -> ClientResult<SendOutcome> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::SessionBusy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let ui_language = self.language();

        // Window of prior turns only. The new message travels in its
        // own field and must not appear in the history as well.
        let window: Vec<ConversationTurn> = {
            let history = self.history.lock();
            let skip = history.len().saturating_sub(self.config.history_window);
            history[skip..].to_vec()
        };

        self.append_turn(ConversationTurn::user(message));

        let request = ChatRequest {
            message: message.to_string(),
            language: Some(ui_language.code().to_string()),
            conversation_history: window,
        };

        let reply_language = lang::response_language(message, ui_language);

        let outcome = self
            .api
            .post_json::<_, ChatResponse>("/api/chat", &request, self.config.timeout)
            .await;

        let reply = match outcome {
            Ok(response) if response.success && !response.response.is_empty() => {
                self.append_turn(ConversationTurn::assistant(response.response.clone()));
                ChatReply {
                    text: response.response,
                    language: reply_language,
                    fallback: false,
                }
            }
            Ok(response) => {
                warn!("Assistant endpoint reported failure: {:?}", response.error);
                self.local_fallback(ui_language)
            }
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                self.local_fallback(ui_language)
            }
        };

        Ok(SendOutcome::Replied(reply))
    }

    fn local_fallback(&self, ui_language: Language) -> ChatReply {
        ChatReply {
            text: ui_language.fallback_message(&self.config.contact),
            language: ui_language,
            fallback: true,
        }
    }

    /// Appends and persists, truncating to the history limit. The
    /// fallback apology never passes through here.
    fn append_turn(&self, turn: ConversationTurn) {
        let blob = {
            let mut history = self.history.lock();
            history.push(turn);
            let excess = history.len().saturating_sub(self.config.history_limit);
            if excess > 0 {
                history.drain(..excess);
            }
            serde_json::to_string(&*history).ok()
        };

        if let Some(blob) = blob {
            if let Err(e) = self.storage.set(HISTORY_KEY, &blob) {
                warn!("Could not persist chat history: {}", e);
            }
        }
    }
}
