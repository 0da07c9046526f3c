// Session-scoped persistence behind a pluggable trait

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;

/// Where widget state lives between sessions. The browser original kept
/// this in `localStorage`; embedders plug in whatever their shell
/// provides. Values are opaque strings, keys stay within `[a-z_]`.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str);
}

/// In-memory storage for tests and ephemeral embedders.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// File-backed storage: one `<key>.json` file per key under a directory.
/// The directory is created on first write.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Platform data directory (`~/.local/share/trilingo` on Linux),
    /// or `./.trilingo` when none is known.
    pub fn in_default_dir() -> Self {
        let dir = dirs::data_dir()
            .map(|d| d.join("trilingo"))
            .unwrap_or_else(|| PathBuf::from(".trilingo"));
        Self::new(dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.path_for(key));
    }
}
