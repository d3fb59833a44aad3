//! Event Store - authoritative collection of calendar events
//!
//! The store keeps every event in an id-keyed map behind a single
//! reader/writer lock and mirrors it to one JSON file.
//!
//! # Architecture
//!
//! ```text
//! Write Path (exclusive lock held throughout):
//! ┌─────────┐    ┌───────────────┐    ┌────────────────┐    ┌──────────────┐
//! │ create/ │───►│ mutate map    │───►│ write .tmp +   │───►│ rename over  │
//! │ update/ │    │ (roll back on │    │ fsync          │    │ events.json  │
//! │ delete  │    │  save failure)│    └────────────────┘    └──────────────┘
//! └─────────┘    └───────────────┘
//!
//! Read Path (shared lock): get_all / get_by_id / get_by_date / search
//! ```

mod crud;
mod error;
mod query;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::types::Event;
use crate::utils::{atomic_write, remove_stale_temp};

pub use error::{EventStoreError, EventStoreResult};

/// Thread-safe event store backed by a single JSON file
pub struct EventStore {
    pub(crate) file_path: PathBuf,
    pub(crate) timezone: Tz,
    pub(crate) events: RwLock<HashMap<String, Event>>,
}

impl EventStore {
    /// Open the store at `file_path`, bucketing dates in `timezone`
    ///
    /// A missing file is created empty. A malformed file is an error; there
    /// is no partial recovery.
    pub fn open<P: Into<PathBuf>>(file_path: P, timezone: Tz) -> EventStoreResult<Self> {
        let file_path = file_path.into();

        if remove_stale_temp(&file_path)? {
            warn!(path = %file_path.display(), "removed temp file left by an interrupted save");
        }

        let store = match Self::load_events_from_file(&file_path)? {
            Some(events) => {
                info!(path = %file_path.display(), count = events.len(), "loaded events");
                Self {
                    file_path,
                    timezone,
                    events: RwLock::new(events),
                }
            }
            None => {
                let store = Self {
                    file_path,
                    timezone,
                    events: RwLock::new(HashMap::new()),
                };
                store.persist_to_file(&store.events.read())?;
                info!(path = %store.file_path.display(), "created empty data file");
                store
            }
        };

        Ok(store)
    }

    /// Read the data file; `None` when it does not exist
    ///
    /// Later records win over earlier ones with the same id.
    fn load_events_from_file(path: &Path) -> EventStoreResult<Option<HashMap<String, Event>>> {
        let content = match fs::read(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(EventStoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let records: Vec<Event> =
            serde_json::from_slice(&content).map_err(|source| EventStoreError::Corrupted {
                path: path.to_path_buf(),
                source,
            })?;

        let events = records
            .into_iter()
            .map(|event| (event.id.clone(), event))
            .collect();
        Ok(Some(events))
    }

    /// Persist the whole collection, sorted by id (caller holds the lock)
    pub(crate) fn persist_to_file(&self, events: &HashMap<String, Event>) -> EventStoreResult<()> {
        let mut snapshot: Vec<&Event> = events.values().collect();
        snapshot.sort_by(|a, b| a.id.cmp(&b.id));

        let content = serde_json::to_vec_pretty(&snapshot)?;
        atomic_write(&self.file_path, &content)?;

        debug!(path = %self.file_path.display(), count = snapshot.len(), "saved events");
        Ok(())
    }

    /// Get the data file path
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Get the time zone used to bucket events by date
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Number of stored events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether the store holds no events
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }
}

impl EventStore {
    // Query operations (from query.rs)
    pub fn get_all(&self) -> Vec<Event> {
        query::get_all(self)
    }

    pub fn get_by_id(&self, id: &str) -> EventStoreResult<Event> {
        query::get_by_id(self, id)
    }

    pub fn get_by_date(&self, date: NaiveDate) -> Vec<Event> {
        query::get_by_date(self, date)
    }

    pub fn search(&self, query: &str) -> Vec<Event> {
        query::search(self, query)
    }

    // Mutations (from crud.rs)
    pub fn create(&self, event: Event) -> EventStoreResult<()> {
        crud::create(self, event)
    }

    pub fn update(&self, event: Event) -> EventStoreResult<()> {
        crud::update(self, event)
    }

    pub fn delete(&self, id: &str) -> EventStoreResult<()> {
        crud::delete(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_creates_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("events.json");

        let store = EventStore::open(&path, Tz::UTC).unwrap();

        assert!(store.is_empty());
        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Event> = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();

        let err = EventStore::open(&path, Tz::UTC).err().unwrap();
        assert!(matches!(err, EventStoreError::Corrupted { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_open_later_duplicate_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        let record = |title: &str| {
            format!(
                r#"{{"id":"dup","title":"{}","startTime":"2024-06-01T10:00:00Z","endTime":"2024-06-01T11:00:00Z","tags":[],"createdAt":"2024-05-01T00:00:00Z","updatedAt":"2024-05-01T00:00:00Z"}}"#,
                title
            )
        };
        fs::write(&path, format!("[{},{}]", record("first"), record("second"))).unwrap();

        let store = EventStore::open(&path, Tz::UTC).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_by_id("dup").unwrap().title, "second");
    }

    #[test]
    fn test_open_removes_stale_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        fs::write(crate::utils::atomic::temp_path(&path), "[{\"partial").unwrap();

        EventStore::open(&path, Tz::UTC).unwrap();

        assert!(!crate::utils::atomic::temp_path(&path).exists());
    }
}
