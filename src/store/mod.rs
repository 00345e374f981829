// Flat-file store module
// Owns the two JSON documents under the storage directory

mod error;
mod types;

pub use error::StoreError;
pub use types::{Message, VisitEntry, VisitLog};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{Local, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// File name of the visit log document
pub const VISITS_FILE: &str = "visitors.json";

/// File name of the guestbook document
pub const MESSAGES_FILE: &str = "messages.json";

/// Flat-file JSON store with an injected storage directory.
///
/// Documents are read and rewritten wholesale on every mutation. Composite
/// read-modify-write operations hold `write_lock` so concurrent requests
/// within this process cannot overwrite each other's update.
pub struct Store {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl Store {
    /// Open the store, creating the directory and default documents if absent.
    ///
    /// An existing document that does not parse is an error; a missing one is
    /// a first run, not an error.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let store = Self {
            dir,
            write_lock: Mutex::new(()),
        };
        store.ensure_document(VISITS_FILE, &VisitLog::default())?;
        store.ensure_document(MESSAGES_FILE, &Vec::<Message>::new())?;
        Ok(store)
    }

    /// Storage directory path
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load the visit log, or the empty default if the file is absent
    pub fn load_visits(&self) -> Result<VisitLog, StoreError> {
        self.load_document(VISITS_FILE)
    }

    /// Serialize and overwrite the visit log file entirely
    pub fn save_visits(&self, log: &VisitLog) -> Result<(), StoreError> {
        self.save_document(VISITS_FILE, log)
    }

    /// Load the message list, or the empty default if the file is absent
    pub fn load_messages(&self) -> Result<Vec<Message>, StoreError> {
        self.load_document(MESSAGES_FILE)
    }

    /// Serialize and overwrite the messages file entirely
    pub fn save_messages(&self, messages: &[Message]) -> Result<(), StoreError> {
        self.save_document(MESSAGES_FILE, &messages)
    }

    /// Record a home-page visit and return the updated log.
    ///
    /// The whole read-modify-write cycle runs under the write lock.
    pub fn record_visit(&self, ip: &str) -> Result<VisitLog, StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut log = self.load_visits()?;
        log.record(VisitEntry {
            timestamp: Utc::now().to_rfc3339(),
            ip: ip.to_string(),
        });
        self.save_visits(&log)?;
        Ok(log)
    }

    /// Append a guestbook message with a server-generated timestamp.
    ///
    /// The whole read-modify-write cycle runs under the write lock.
    pub fn append_message(&self, author: &str, content: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        let mut messages = self.load_messages()?;
        types::append_capped(
            &mut messages,
            Message {
                author: author.to_string(),
                content: content.to_string(),
                timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        );
        self.save_messages(&messages)
    }

    /// Names of the files currently present in the storage directory, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| {
                        entry
                            .ok()
                            .map(|e| e.file_name().to_string_lossy().into_owned())
                    })
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Create the document with its default value unless it already exists
    /// and parses
    fn ensure_document<T>(&self, name: &str, default: &T) -> Result<(), StoreError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        if self.path(name).exists() {
            self.load_document::<T>(name)?;
            Ok(())
        } else {
            self.save_document(name, default)
        }
    }

    fn load_document<T>(&self, name: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Json { path, source })
    }

    fn save_document<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path(name);
        let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, content).map_err(|source| StoreError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::types::{MAX_MESSAGES, MAX_VISITS};
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Unique directory under the system temp dir for each test
    fn temp_dir() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        std::env::temp_dir().join(format!(
            "podbook-store-test-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::SeqCst)
        ))
    }

    #[test]
    fn test_open_creates_default_documents() {
        let dir = temp_dir();
        let store = Store::open(&dir).expect("open store");

        assert_eq!(
            store.file_names(),
            vec![MESSAGES_FILE.to_string(), VISITS_FILE.to_string()]
        );
        assert_eq!(store.load_visits().expect("load visits"), VisitLog::default());
        assert!(store.load_messages().expect("load messages").is_empty());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_record_visit_persists_across_reopen() {
        let dir = temp_dir();
        {
            let store = Store::open(&dir).expect("open store");
            store.record_visit("10.0.0.1").expect("record");
            store.record_visit("10.0.0.2").expect("record");
        }

        // Restart with the same directory keeps prior state
        let store = Store::open(&dir).expect("reopen store");
        let log = store.load_visits().expect("load visits");
        assert_eq!(log.count, 2);
        assert_eq!(log.visits.len(), 2);
        assert_eq!(log.visits[1].ip, "10.0.0.2");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_record_visit_caps_entries() {
        let dir = temp_dir();
        let store = Store::open(&dir).expect("open store");

        for i in 0..MAX_VISITS + 3 {
            store.record_visit(&format!("10.0.0.{i}")).expect("record");
        }

        let log = store.load_visits().expect("load visits");
        assert_eq!(log.count, (MAX_VISITS + 3) as u64);
        assert_eq!(log.visits.len(), MAX_VISITS);
        assert_eq!(log.visits[0].ip, "10.0.0.3");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_append_message_round_trip() {
        let dir = temp_dir();
        let store = Store::open(&dir).expect("open store");

        store.append_message("Alice", "hello from a pod").expect("append");
        let messages = store.load_messages().expect("load messages");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].author, "Alice");
        assert_eq!(messages[0].content, "hello from a pod");
        assert!(!messages[0].timestamp.is_empty());

        // Saved bytes parse back to the same logical content
        let reloaded = store.load_messages().expect("reload");
        assert_eq!(reloaded, messages);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_append_message_caps_at_limit() {
        let dir = temp_dir();
        let store = Store::open(&dir).expect("open store");

        for i in 0..MAX_MESSAGES + 2 {
            store
                .append_message("bot", &format!("message {i}"))
                .expect("append");
        }

        let messages = store.load_messages().expect("load messages");
        assert_eq!(messages.len(), MAX_MESSAGES);
        assert_eq!(messages[0].content, "message 2");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_fails_on_malformed_document() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join(VISITS_FILE), "{not json").expect("write");

        let result = Store::open(&dir);
        assert!(matches!(result, Err(StoreError::Json { .. })));

        let _ = fs::remove_dir_all(&dir);
    }
}
