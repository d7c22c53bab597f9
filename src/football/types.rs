//! Internal shapes, as stored in the cache and shown to the user.
//!
//! Field names serialize in camelCase (`rank`, `goalsDiff`, `teamLogo`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standings of one competition season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStandings {
  pub id: u32,
  pub name: String,
  pub country: String,
  pub logo: String,
  pub flag: String,
  pub season: i32,
  pub groups: Vec<StandingGroup>,
}

/// One table; leagues have one, cup phases may have several
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingGroup {
  pub group: String,
  pub table: Vec<StandingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
  pub rank: u32,
  pub team: TeamRef,
  pub points: i32,
  pub goals_diff: i32,
  pub group: String,
  pub form: String,
  pub status: String,
  pub description: String,
  pub all: Record,
  pub home: Record,
  pub away: Record,
  pub update: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
  pub id: u32,
  pub name: String,
  pub logo: String,
}

/// Win/draw/loss record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub played: u32,
  pub win: u32,
  pub draw: u32,
  pub lose: u32,
  pub goals: Goals,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
  #[serde(rename = "for")]
  pub scored: u32,
  pub against: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
  pub id: u64,
  /// UTC kickoff, RFC 3339
  pub date: String,
  pub status: String,
  pub matchday: Option<u32>,
  pub stage: String,
  pub home_team: String,
  pub home_team_logo: String,
  pub away_team: String,
  pub away_team_logo: String,
  pub score: Score,
  pub venue: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
  pub home: Option<u32>,
  pub away: Option<u32>,
}

impl Fixture {
  /// Kickoff as a timestamp, if the date string parses.
  pub fn kickoff(&self) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&self.date)
      .ok()
      .map(|dt| dt.with_timezone(&Utc))
  }
}

/// A season's fixtures, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureList {
  pub fixtures: Vec<Fixture>,
}

impl FixtureList {
  pub fn newest_first(mut fixtures: Vec<Fixture>) -> Self {
    // Unparseable dates sort last
    fixtures.sort_by(|a, b| b.kickoff().cmp(&a.kickoff()));
    Self { fixtures }
  }
}

/// Top scorer entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
  pub id: u64,
  pub name: String,
  pub team: String,
  pub team_logo: String,
  pub goals: u32,
  pub assists: u32,
  pub shots: u32,
  pub penalties: u32,
  pub games_played: u32,
}

/// Everything the Champions League page shows, cached as one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChampionsLeagueData {
  pub standings: Vec<StandingGroup>,
  pub matches: Vec<Fixture>,
  pub scorers: Vec<Player>,
}
