// Translation cache with session-scoped persistence

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::storage::Storage;
use crate::lang::Language;

const CACHE_KEY: &str = "translation_cache";

/// Characters of source text that participate in the cache key.
const KEY_PREFIX_CHARS: usize = 100;

/// In-memory translation cache hydrated from, and persisted to, the
/// session [`Storage`].
///
/// Keys are the first hundred characters of the source text plus the
/// target language code, so two long texts sharing a prefix collide.
/// That approximation is inherited from the site and accepted: the
/// wrong translation of a near-identical paragraph beats no cache.
pub struct TranslationCache {
    entries: Mutex<HashMap<String, String>>,
    storage: Arc<dyn Storage>,
}

impl TranslationCache {
    /// Hydrates from storage. A missing or corrupt blob starts empty.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let entries = match storage.get(CACHE_KEY) {
            Some(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => {
                    debug!("Hydrated translation cache with {} entries", map.len());
                    map
                }
                Err(e) => {
                    warn!("Discarding corrupt translation cache: {}", e);
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        TranslationCache {
            entries: Mutex::new(entries),
            storage,
        }
    }

    fn key(text: &str, lang: Language) -> String {
        let prefix: String = text.chars().take(KEY_PREFIX_CHARS).collect();
        format!("{}_{}", prefix, lang.code())
    }

    /// Pure lookup. Never touches the network or storage.
    pub fn get(&self, text: &str, lang: Language) -> Option<String> {
        self.entries.lock().get(&Self::key(text, lang)).cloned()
    }

    /// Inserts and persists the whole map. A persistence failure
    /// degrades to memory-only and is logged, not surfaced.
    pub fn put(&self, text: &str, lang: Language, translation: impl Into<String>) {
        let blob = {
            let mut entries = self.entries.lock();
            entries.insert(Self::key(text, lang), translation.into());
            serde_json::to_string(&*entries).ok()
        };

        if let Some(blob) = blob {
            if let Err(e) = self.storage.set(CACHE_KEY, &blob) {
                warn!("Could not persist translation cache: {}", e);
            }
        }
    }

    /// Drops every entry, in memory and in storage.
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.storage.remove(CACHE_KEY);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryStorage;

    fn cache() -> TranslationCache {
        TranslationCache::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn put_then_get() {
        let cache = cache();
        assert_eq!(cache.get("Hello", Language::Si), None);

        cache.put("Hello", Language::Si, "හෙලෝ");
        assert_eq!(cache.get("Hello", Language::Si), Some("හෙලෝ".to_string()));
        assert_eq!(cache.get("Hello", Language::Ta), None);
    }

    #[test]
    fn long_texts_sharing_a_prefix_collide() {
        let cache = cache();
        let base = "x".repeat(KEY_PREFIX_CHARS);
        let a = format!("{} first tail", base);
        let b = format!("{} second tail", base);

        cache.put(&a, Language::Ta, "first translation");
        assert_eq!(
            cache.get(&b, Language::Ta),
            Some("first translation".to_string())
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn survives_rehydration() {
        let storage = Arc::new(MemoryStorage::new());

        let first = TranslationCache::new(storage.clone());
        first.put("Projects", Language::Si, "ව්‍යාපෘති");
        drop(first);

        let second = TranslationCache::new(storage);
        assert_eq!(
            second.get("Projects", Language::Si),
            Some("ව්‍යාපෘති".to_string())
        );
    }

    #[test]
    fn corrupt_blob_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CACHE_KEY, "{not json").unwrap();

        let cache = TranslationCache::new(storage);
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_removes_persisted_state() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = TranslationCache::new(storage.clone());
        cache.put("About", Language::Ta, "பற்றி");

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(storage.get(CACHE_KEY), None);
    }
}
