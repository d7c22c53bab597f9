//! Cached football client that wraps FootballClient with the snapshot cache.

use color_eyre::Result;
use std::sync::Arc;
use tracing::warn;

use crate::cache::{
  CacheLayer, CacheResult, CacheStorage, FetchOptions, NoopStorage, SqliteStorage,
};
use crate::config::Config;

use super::cache::ResourceKey;
use super::client::FootballClient;
use super::fallback;
use super::league::League;
use super::types::{ChampionsLeagueData, FixtureList, LeagueStandings, Player};

/// Football client with transparent caching and fallback data.
///
/// None of the resource methods fail: they return cached, live, or
/// placeholder data, and `CacheResult::source` says which.
#[derive(Clone)]
pub struct CachedFootballClient {
  inner: FootballClient,
  cache: CacheLayer,
}

impl CachedFootballClient {
  /// Create a new cached client from configuration.
  ///
  /// A cache database that can't be opened disables caching instead of
  /// failing startup.
  pub fn new(config: &Config) -> Result<Self> {
    let inner = FootballClient::new(config)?;

    let storage: Arc<dyn CacheStorage> = if config.cache.enabled {
      match SqliteStorage::open(config.cache.path.as_deref()) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
          warn!("Cache unavailable, continuing without it: {:#}", e);
          Arc::new(NoopStorage)
        }
      }
    } else {
      Arc::new(NoopStorage)
    };
    let cache = CacheLayer::new(storage).with_write_mode(config.cache.write_mode);

    Ok(Self { inner, cache })
  }

  #[cfg(test)]
  pub fn with_parts(inner: FootballClient, cache: CacheLayer) -> Self {
    Self { inner, cache }
  }

  /// League table of one competition season.
  pub async fn standings(
    &self,
    competition: u32,
    season: i32,
    options: FetchOptions,
  ) -> CacheResult<LeagueStandings> {
    let key = ResourceKey::Standings {
      competition,
      season,
    };

    self
      .cache
      .fetch(
        &key,
        options,
        || {
          let inner = self.inner.clone();
          async move { inner.get_standings(competition, season).await }
        },
        || fallback::standings(competition, season),
      )
      .await
  }

  /// Fixtures of a league's current season, newest first.
  pub async fn fixtures(&self, league: League, options: FetchOptions) -> CacheResult<FixtureList> {
    let key = ResourceKey::Fixtures { league };

    self
      .cache
      .fetch(
        &key,
        options,
        || {
          let inner = self.inner.clone();
          async move { inner.get_fixtures(league.competition_id()).await }
        },
        || fallback::fixtures(league),
      )
      .await
  }

  /// Top scorers of a league's current season.
  pub async fn players(&self, league: League, options: FetchOptions) -> CacheResult<Vec<Player>> {
    let key = ResourceKey::Players { league };

    self
      .cache
      .fetch(
        &key,
        options,
        || {
          let inner = self.inner.clone();
          async move { inner.get_scorers(league.competition_id()).await }
        },
        || fallback::players(league),
      )
      .await
  }

  /// Champions League standings, matches and scorers, cached together.
  pub async fn champions_league(&self, options: FetchOptions) -> CacheResult<ChampionsLeagueData> {
    self
      .cache
      .fetch(
        &ResourceKey::ChampionsLeague,
        options,
        || {
          let inner = self.inner.clone();
          async move { inner.get_champions_league().await }
        },
        fallback::champions_league,
      )
      .await
  }
}
