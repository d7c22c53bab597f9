//! football-data.org resources: upstream client, internal shapes, cache keys
//! and the placeholder data served when upstream is down.

pub mod api_types;
pub mod cache;
pub mod cached_client;
pub mod client;
pub mod fallback;
pub mod league;
pub mod types;

pub use cached_client::CachedFootballClient;
pub use league::League;
