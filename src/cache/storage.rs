//! Cache storage trait and SQLite implementation.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::Snapshot;

/// Trait for cache storage backends.
///
/// Writes for the same key overwrite each other; the last write wins.
pub trait CacheStorage: Send + Sync {
  /// Get the snapshot stored under `key`, if any.
  fn get_snapshot(&self, key: &str) -> Result<Option<Snapshot>>;

  /// Store a snapshot, replacing whatever was there.
  fn put_snapshot(&self, key: &str, description: &str, snapshot: &Snapshot) -> Result<()>;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled or the database can't be opened.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn get_snapshot(&self, _key: &str) -> Result<Option<Snapshot>> {
    Ok(None) // Always miss
  }

  fn put_snapshot(&self, _key: &str, _description: &str, _snapshot: &Snapshot) -> Result<()> {
    Ok(()) // Discard
  }
}

/// SQLite-based cache storage implementation.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

impl SqliteStorage {
  /// Open (or create) the cache database, at `path` or the default location.
  pub fn open(path: Option<&Path>) -> Result<Self> {
    let path = match path {
      Some(p) => p.to_path_buf(),
      None => Self::default_path()?,
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(&path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    Self::with_connection(conn)
  }

  /// In-memory database, gone when dropped.
  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()
      .map_err(|e| eyre!("Failed to open in-memory database: {}", e))?;
    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    let storage = Self {
      conn: Mutex::new(conn),
    };
    storage.run_migrations()?;
    Ok(storage)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("touchline").join("cache.db"))
  }

  /// Run database migrations for cache tables.
  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(CACHE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(())
  }
}

/// Schema for cache tables.
const CACHE_SCHEMA: &str = r#"
-- One JSON document per resource key
CREATE TABLE IF NOT EXISTS snapshots (
    key_hash TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    payload BLOB NOT NULL,
    last_updated TEXT NOT NULL
);
"#;

impl CacheStorage for SqliteStorage {
  fn get_snapshot(&self, key: &str) -> Result<Option<Snapshot>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let row: Option<(Vec<u8>, String)> = conn
      .query_row(
        "SELECT payload, last_updated FROM snapshots WHERE key_hash = ?",
        params![key],
        |row| Ok((row.get(0)?, row.get(1)?)),
      )
      .optional()
      .map_err(|e| eyre!("Failed to read snapshot: {}", e))?;

    match row {
      Some((data, last_updated)) => {
        let payload = serde_json::from_slice(&data)
          .map_err(|e| eyre!("Failed to deserialize snapshot: {}", e))?;
        let last_updated = parse_datetime(&last_updated)?;
        Ok(Some(Snapshot {
          payload,
          last_updated,
        }))
      }
      None => Ok(None),
    }
  }

  fn put_snapshot(&self, key: &str, description: &str, snapshot: &Snapshot) -> Result<()> {
    let data = serde_json::to_vec(&snapshot.payload)
      .map_err(|e| eyre!("Failed to serialize snapshot: {}", e))?;

    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO snapshots (key_hash, description, payload, last_updated)
         VALUES (?, ?, ?, ?)",
        params![key, description, data, snapshot.last_updated.to_rfc3339()],
      )
      .map_err(|e| eyre!("Failed to store snapshot: {}", e))?;

    Ok(())
  }
}

/// Parse an RFC 3339 timestamp as written by `put_snapshot`.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}

/// In-memory storage for tests. Counts writes and can simulate an
/// unreachable store.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStorage {
  entries: Mutex<std::collections::HashMap<String, Snapshot>>,
  writes: std::sync::atomic::AtomicUsize,
  unavailable: bool,
}

#[cfg(test)]
impl MemoryStorage {
  pub fn unavailable() -> Self {
    Self {
      unavailable: true,
      ..Self::default()
    }
  }

  pub fn insert(&self, key: &str, snapshot: Snapshot) {
    self.entries.lock().unwrap().insert(key.to_string(), snapshot);
  }

  pub fn get(&self, key: &str) -> Option<Snapshot> {
    self.entries.lock().unwrap().get(key).cloned()
  }

  pub fn writes(&self) -> usize {
    self.writes.load(std::sync::atomic::Ordering::SeqCst)
  }
}

#[cfg(test)]
impl CacheStorage for MemoryStorage {
  fn get_snapshot(&self, key: &str) -> Result<Option<Snapshot>> {
    if self.unavailable {
      return Err(eyre!("store unavailable"));
    }
    Ok(self.get(key))
  }

  fn put_snapshot(&self, key: &str, _description: &str, snapshot: &Snapshot) -> Result<()> {
    if self.unavailable {
      return Err(eyre!("store unavailable"));
    }
    self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    self.insert(key, snapshot.clone());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;
  use serde_json::json;

  #[test]
  fn test_missing_key_is_none() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert!(storage.get_snapshot("nope").unwrap().is_none());
  }

  #[test]
  fn test_snapshot_roundtrip_keeps_timestamp() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let at = Utc::now() - Duration::hours(3);
    let snapshot = Snapshot {
      payload: json!({"rank": 1, "goalsDiff": 40}),
      last_updated: at,
    };

    storage.put_snapshot("k", "leagues/2021-2024", &snapshot).unwrap();
    let read = storage.get_snapshot("k").unwrap().unwrap();

    assert_eq!(read.payload, snapshot.payload);
    assert_eq!(read.last_updated, at);
  }

  #[test]
  fn test_last_write_wins() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    let first = Snapshot {
      payload: json!([1]),
      last_updated: Utc::now() - Duration::hours(30),
    };
    let second = Snapshot {
      payload: json!([2]),
      last_updated: Utc::now(),
    };

    storage.put_snapshot("k", "players/la-liga", &first).unwrap();
    storage.put_snapshot("k", "players/la-liga", &second).unwrap();

    assert_eq!(storage.get_snapshot("k").unwrap().unwrap(), second);
  }

  #[test]
  fn test_open_creates_parent_directory() {
    let dir = std::env::temp_dir().join(format!("touchline-test-{}", std::process::id()));
    let path = dir.join("nested").join("cache.db");

    let storage = SqliteStorage::open(Some(&path)).unwrap();
    assert!(storage.get_snapshot("k").unwrap().is_none());
    assert!(path.exists());

    drop(storage);
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    let snapshot = Snapshot {
      payload: json!({}),
      last_updated: Utc::now(),
    };
    storage.put_snapshot("k", "d", &snapshot).unwrap();
    assert!(storage.get_snapshot("k").unwrap().is_none());
  }
}
