//! Forced standings refresh, meant to run from cron.
//!
//! Match-heavy times (weekends, and weekday evenings) refresh every domestic
//! league; otherwise two leagues are refreshed in a rotation that moves every
//! two hours, keeping request volume low.

use chrono::{Datelike, Timelike, Weekday};
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::{CacheSource, FetchOptions};
use crate::football::{CachedFootballClient, League};

const PRIME_TIME_HOURS: std::ops::RangeInclusive<u32> = 15..=23;

#[derive(Debug, Clone, Serialize)]
pub struct LeagueRefresh {
  pub league: String,
  pub competition: u32,
  pub season: i32,
  pub success: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
  pub is_weekend: bool,
  pub is_prime_time: bool,
  pub results: Vec<LeagueRefresh>,
  pub success: usize,
  pub failed: usize,
}

pub fn is_weekend(weekday: Weekday) -> bool {
  matches!(weekday, Weekday::Sat | Weekday::Sun)
}

pub fn is_prime_time(hour: u32) -> bool {
  PRIME_TIME_HOURS.contains(&hour)
}

/// Leagues due for a refresh at the given local day and hour.
pub fn select_leagues(weekday: Weekday, hour: u32) -> Vec<League> {
  if is_weekend(weekday) || is_prime_time(hour) {
    return League::DOMESTIC.to_vec();
  }
  let n = League::DOMESTIC.len();
  let index = (hour as usize / 2) % n;
  vec![League::DOMESTIC[index], League::DOMESTIC[(index + 1) % n]]
}

/// Force-refresh the standings due at `now`, all at once.
pub async fn run<Tz: chrono::TimeZone>(
  client: &CachedFootballClient,
  season: i32,
  now: chrono::DateTime<Tz>,
) -> RefreshSummary {
  let weekday = now.weekday();
  let hour = now.hour();
  let leagues = select_leagues(weekday, hour);

  info!(
    leagues = ?leagues.iter().map(|l| l.slug()).collect::<Vec<_>>(),
    season,
    "Starting standings refresh"
  );

  let options = FetchOptions {
    force_refresh: true,
  };
  let results = join_all(leagues.iter().map(|league| async move {
    let competition = league.competition_id();
    let result = client.standings(competition, season, options).await;
    // Fallback data means upstream never answered
    let success = result.source == CacheSource::Network;
    if success {
      info!(league = %league, "Refreshed standings");
    } else {
      warn!(league = %league, "Standings refresh failed");
    }
    LeagueRefresh {
      league: league.slug().to_string(),
      competition,
      season,
      success,
    }
  }))
  .await;

  let success = results.iter().filter(|r| r.success).count();
  RefreshSummary {
    is_weekend: is_weekend(weekday),
    is_prime_time: is_prime_time(hour),
    failed: results.len() - success,
    success,
    results,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{CacheLayer, MemoryStorage};
  use crate::football::client::FootballClient;
  use chrono::{TimeZone, Utc};
  use std::sync::Arc;

  #[test]
  fn test_weekend_refreshes_everything() {
    assert_eq!(select_leagues(Weekday::Sat, 3).len(), 5);
    assert_eq!(select_leagues(Weekday::Sun, 10).len(), 5);
  }

  #[test]
  fn test_weekday_prime_time_refreshes_everything() {
    assert_eq!(select_leagues(Weekday::Wed, 15).len(), 5);
    assert_eq!(select_leagues(Weekday::Wed, 23).len(), 5);
  }

  #[test]
  fn test_weekday_off_peak_rotates_two_leagues() {
    assert_eq!(
      select_leagues(Weekday::Mon, 0),
      vec![League::PremierLeague, League::LaLiga]
    );
    assert_eq!(
      select_leagues(Weekday::Mon, 9),
      vec![League::Ligue1, League::PremierLeague]
    );
    assert_eq!(
      select_leagues(Weekday::Tue, 14),
      vec![League::SerieA, League::Bundesliga]
    );
  }

  #[tokio::test]
  async fn test_run_counts_fallbacks_as_failures() {
    let inner = FootballClient::with_base_url("http://127.0.0.1:1", None).unwrap();
    let storage = Arc::new(MemoryStorage::default());
    let client = CachedFootballClient::with_parts(inner, CacheLayer::new(storage.clone()));
    // A Monday morning: two leagues
    let now = Utc.with_ymd_and_hms(2024, 5, 13, 4, 0, 0).unwrap();

    let summary = run(&client, 2024, now).await;

    assert!(!summary.is_weekend);
    assert!(!summary.is_prime_time);
    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.success, 0);
    assert_eq!(storage.writes(), 0);
  }
}
