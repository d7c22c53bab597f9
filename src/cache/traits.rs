//! Core traits and types for the caching system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key addressing one cached document.
pub trait QueryKey {
  /// Stable, fixed-length storage key.
  fn cache_hash(&self) -> String;

  /// Human readable document path (e.g. "leagues/2021-2024").
  fn description(&self) -> String;
}

/// A cached payload and the moment it was fetched from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub payload: serde_json::Value,
  pub last_updated: DateTime<Utc>,
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// When the data was fetched upstream (None for fallback data)
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CacheResult<T> {
  /// Fresh data straight from the network.
  pub fn from_network(data: T, fetched_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      cached_at: Some(fetched_at),
    }
  }

  /// Data served from a fresh snapshot.
  pub fn from_snapshot(data: T, cached_at: DateTime<Utc>) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
      cached_at: Some(cached_at),
    }
  }

  /// Static placeholder data, used when upstream failed.
  pub fn fallback(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Fallback,
      cached_at: None,
    }
  }

  /// True only when the payload was served from a stored snapshot.
  pub fn from_cache(&self) -> bool {
    self.source == CacheSource::Cache
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheResult<U> {
    CacheResult {
      data: f(self.data),
      source: self.source,
      cached_at: self.cached_at,
    }
  }
}

/// Indicates where returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Snapshot younger than the stale time
  Cache,
  /// Upstream failed, static dataset
  Fallback,
}
