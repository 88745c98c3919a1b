//! # Client Cache
//!
//! Timestamped key-value cache standing in for browser local storage.
//!
//! - Entries are stored as `{ "data": ..., "timestamp": <unix ms> }`
//! - [`TimedCache::get`] returns the value with its age, callers decide what is fresh
//! - No cross-process coordination, concurrent writers race and the last write wins
//! - Unreadable or corrupt entries read as absent
use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::ClientError;

pub trait Clock: Send + Sync {
    /// Unix time in milliseconds.
    fn now_millis(&self) -> i64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.as_millis() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<user cache dir>/interviewer`
    pub fn user_cache() -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::new(dir.join("interviewer")))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        fs::create_dir_all(&self.dir).map_err(|e| ClientError::Cache(e.to_string()))?;
        fs::write(self.path(key), value).map_err(|e| ClientError::Cache(e.to_string()))
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .lock()
            .map_err(|e| ClientError::Cache(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct Entry<T> {
    data: T,
    timestamp: i64,
}

pub struct TimedCache {
    storage: Box<dyn Storage>,
    clock: Box<dyn Clock>,
}

impl TimedCache {
    pub fn new(storage: impl Storage + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            clock: Box::new(clock),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default(), SystemClock)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<(T, Duration)> {
        let raw = self.storage.read(key)?;

        let entry: Entry<T> = serde_json::from_str(&raw)
            .map_err(|e| debug!("Ignoring corrupt cache entry {key}: {e}"))
            .ok()?;

        // entries written "in the future" count as brand new
        let age = (self.clock.now_millis() - entry.timestamp).max(0);

        Some((entry.data, Duration::from_millis(age as u64)))
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let entry = Entry {
            data: value,
            timestamp: self.clock.now_millis(),
        };

        let raw = serde_json::to_string(&entry).map_err(|e| ClientError::Cache(e.to_string()))?;
        self.storage.write(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_reports_age() {
        let clock = Arc::new(ManualClock::new(1_000));
        let cache = TimedCache::new(MemoryStorage::default(), clock.clone());

        cache.put("key", &vec![1, 2, 3]).unwrap();
        clock.advance(Duration::from_secs(90));

        let (value, age) = cache.get::<Vec<i32>>("key").unwrap();
        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(age, Duration::from_secs(90));
    }

    #[test]
    fn test_missing_key() {
        let cache = TimedCache::in_memory();
        assert!(cache.get::<String>("absent").is_none());
    }

    #[test]
    fn test_corrupt_entry_is_absent() {
        let storage = MemoryStorage::default();
        storage.write("key", "not json").unwrap();

        let cache = TimedCache::new(storage, ManualClock::new(0));
        assert!(cache.get::<String>("key").is_none());
    }

    #[test]
    fn test_future_timestamp_has_zero_age() {
        let storage = MemoryStorage::default();
        storage
            .write("key", r#"{"data":"v","timestamp":5000}"#)
            .unwrap();

        let cache = TimedCache::new(storage, ManualClock::new(1000));
        assert_eq!(
            cache.get::<String>("key"),
            Some(("v".to_string(), Duration::ZERO))
        );
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TimedCache::new(FileStorage::new(dir.path().join("nested")), ManualClock::new(7));

        cache.put("categories", &"cached".to_string()).unwrap();

        let raw = fs::read_to_string(dir.path().join("nested/categories.json")).unwrap();
        assert_eq!(raw, r#"{"data":"cached","timestamp":7}"#);
        assert_eq!(
            cache.get::<String>("categories"),
            Some(("cached".to_string(), Duration::ZERO))
        );
    }

    #[test]
    fn test_last_write_wins() {
        let cache = TimedCache::in_memory();
        cache.put("key", &1).unwrap();
        cache.put("key", &2).unwrap();
        assert_eq!(cache.get::<i32>("key").map(|(value, _)| value), Some(2));
    }
}
