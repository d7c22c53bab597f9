//! Time-boxed document cache in front of a remote API.
//!
//! This module is football-agnostic:
//! - One JSON snapshot per resource key, stamped with its upstream fetch time
//! - Snapshots younger than 24 hours are served without a network call
//! - A failed upstream call falls back to caller-provided static data
//! - Storage problems are treated as cache misses

mod layer;
mod storage;
mod traits;

pub use layer::{CacheLayer, FetchOptions, WriteMode};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{CacheStorage, NoopStorage, SqliteStorage};
#[cfg(test)]
pub use traits::Snapshot;
pub use traits::{CacheResult, CacheSource, QueryKey};
