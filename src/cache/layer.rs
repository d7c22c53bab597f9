//! Cache layer that orchestrates caching logic with network fetching.

use chrono::{DateTime, Duration, Utc};
use color_eyre::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::storage::CacheStorage;
use super::traits::{CacheResult, QueryKey, Snapshot};

/// Snapshots younger than this are served without asking upstream.
pub const STALE_HOURS: i64 = 24;

/// Whether `fetch` waits for its cache write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
  /// The write completes before `fetch` returns.
  #[default]
  Await,
  /// The write runs on a blocking task; `fetch` returns without waiting
  /// and write failures are only logged.
  Detached,
}

/// Per-call options for [`CacheLayer::fetch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
  /// Skip a fresh snapshot and always call upstream.
  pub force_refresh: bool,
}

/// Cache layer that manages caching logic and network fetching.
///
/// This layer sits between the presentation and the network client. It never
/// fails: a broken store counts as a miss and a failed upstream call yields
/// the caller's fallback dataset.
pub struct CacheLayer {
  storage: Arc<dyn CacheStorage>,
  /// How long before cached data is considered stale
  stale_time: Duration,
  write_mode: WriteMode,
}

impl CacheLayer {
  /// Create a new cache layer with the given storage backend.
  pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
    Self {
      storage,
      stale_time: Duration::hours(STALE_HOURS),
      write_mode: WriteMode::default(),
    }
  }

  pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
    self.write_mode = write_mode;
    self
  }

  /// Check if a snapshot is stale based on its fetch timestamp.
  fn is_stale(&self, last_updated: DateTime<Utc>) -> bool {
    Utc::now() - last_updated >= self.stale_time
  }

  /// Fetch with the cache-first, fallback-last policy.
  ///
  /// 1. Look up the snapshot for `key`; a storage error is a miss
  /// 2. If it is younger than the stale time and not forced, return it
  /// 3. Otherwise call `fetcher` once
  /// 4. On success write a snapshot stamped with the fetch time
  /// 5. On failure return `fallback()` and write nothing
  pub async fn fetch<K, T, F, Fut, D>(
    &self,
    key: &K,
    options: FetchOptions,
    fetcher: F,
    fallback: D,
  ) -> CacheResult<T>
  where
    K: QueryKey,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
    D: FnOnce() -> T,
  {
    let hash = key.cache_hash();
    let description = key.description();

    if !options.force_refresh {
      if let Some((data, last_updated)) = self.lookup::<T>(&hash, &description) {
        if !self.is_stale(last_updated) {
          info!(key = %description, %last_updated, "Using cached data");
          return CacheResult::from_snapshot(data, last_updated);
        }
        info!(key = %description, %last_updated, "Cached data is stale, fetching");
      }
    } else {
      debug!(key = %description, "Forced refresh, skipping cache lookup");
    }

    match fetcher().await {
      Ok(data) => {
        let fetched_at = Utc::now();
        match serde_json::to_value(&data) {
          Ok(payload) => {
            let snapshot = Snapshot {
              payload,
              last_updated: fetched_at,
            };
            self.write(hash, description, snapshot);
          }
          Err(e) => warn!(key = %description, "Failed to serialize payload for cache: {}", e),
        }
        CacheResult::from_network(data, fetched_at)
      }
      Err(e) => {
        warn!(key = %description, "Upstream fetch failed, serving fallback data: {:#}", e);
        CacheResult::fallback(fallback())
      }
    }
  }

  /// Read and decode a snapshot. Any problem is logged and reported as a miss.
  fn lookup<T: DeserializeOwned>(&self, hash: &str, description: &str) -> Option<(T, DateTime<Utc>)> {
    let snapshot = match self.storage.get_snapshot(hash) {
      Ok(Some(snapshot)) => snapshot,
      Ok(None) => {
        debug!(key = %description, "Cache miss");
        return None;
      }
      Err(e) => {
        warn!(key = %description, "Cache read failed, treating as miss: {:#}", e);
        return None;
      }
    };

    match serde_json::from_value(snapshot.payload) {
      Ok(data) => Some((data, snapshot.last_updated)),
      Err(e) => {
        warn!(key = %description, "Cached payload has unexpected shape, treating as miss: {}", e);
        None
      }
    }
  }

  fn write(&self, hash: String, description: String, snapshot: Snapshot) {
    match self.write_mode {
      WriteMode::Await => {
        if let Err(e) = self.storage.put_snapshot(&hash, &description, &snapshot) {
          warn!(key = %description, "Failed to store snapshot: {:#}", e);
        } else {
          debug!(key = %description, "Stored snapshot");
        }
      }
      WriteMode::Detached => {
        let storage = Arc::clone(&self.storage);
        // Not joined: the caller may get its data before this finishes.
        tokio::task::spawn_blocking(move || {
          match storage.put_snapshot(&hash, &description, &snapshot) {
            Ok(()) => debug!(key = %description, "Stored snapshot"),
            Err(e) => warn!(key = %description, "Failed to store snapshot: {:#}", e),
          }
        });
      }
    }
  }
}

impl Clone for CacheLayer {
  fn clone(&self) -> Self {
    Self {
      storage: Arc::clone(&self.storage),
      stale_time: self.stale_time,
      write_mode: self.write_mode,
    }
  }
}
