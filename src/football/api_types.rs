//! Serde-deserializable types matching football-data.org v4 responses.
//!
//! These types are separate from the internal types so upstream renames and
//! nesting stay in one place. A response missing a required field fails to
//! deserialize, which the cache layer turns into fallback data.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::{
  Fixture, FixtureList, Goals, LeagueStandings, Player, Record, Score, StandingGroup,
  StandingRow, TeamRef,
};

// ============================================================================
// Common nested types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiTeam {
  pub id: u32,
  pub name: String,
  pub crest: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiCompetition {
  pub id: u32,
  pub name: String,
  pub emblem: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiArea {
  pub name: Option<String>,
  pub flag: Option<String>,
}

/// `filters.season` arrives as a string ("2024") but older payloads used a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiSeasonFilter {
  Number(i32),
  Text(String),
}

impl ApiSeasonFilter {
  fn year(&self) -> Option<i32> {
    match self {
      Self::Number(n) => Some(*n),
      Self::Text(s) => s.trim().parse().ok(),
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct ApiFilters {
  pub season: Option<ApiSeasonFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSeason {
  pub last_updated: Option<String>,
}

// ============================================================================
// Standings endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStandingEntry {
  pub position: u32,
  pub team: ApiTeam,
  pub played_games: u32,
  pub form: Option<String>,
  pub won: u32,
  pub draw: u32,
  pub lost: u32,
  pub points: i32,
  pub goals_for: u32,
  pub goals_against: u32,
  pub goal_difference: i32,
}

#[derive(Debug, Deserialize)]
pub struct ApiStandingGroup {
  pub group: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<String>,
  #[serde(default)]
  pub table: Vec<ApiStandingEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStandingsResponse {
  pub competition: Option<ApiCompetition>,
  pub area: Option<ApiArea>,
  pub filters: Option<ApiFilters>,
  pub season: Option<ApiSeason>,
  pub standings: Vec<ApiStandingGroup>,
}

impl ApiStandingGroup {
  /// Convert to the internal table. `update` stamps every row.
  pub fn into_group(self, update: &str) -> StandingGroup {
    let group = self.group.or(self.kind).unwrap_or_default();
    let table = self
      .table
      .into_iter()
      .map(|entry| entry.into_row(&group, update))
      .collect();
    StandingGroup { group, table }
  }
}

impl ApiStandingEntry {
  fn into_row(self, group: &str, update: &str) -> StandingRow {
    StandingRow {
      rank: self.position,
      team: TeamRef {
        id: self.team.id,
        name: self.team.name,
        logo: self.team.crest.unwrap_or_default(),
      },
      points: self.points,
      goals_diff: self.goal_difference,
      group: group.to_string(),
      form: self.form.unwrap_or_default(),
      status: "same".to_string(),
      description: String::new(),
      all: Record {
        played: self.played_games,
        win: self.won,
        draw: self.draw,
        lose: self.lost,
        goals: Goals {
          scored: self.goals_for,
          against: self.goals_against,
        },
      },
      // Upstream doesn't split home and away
      home: Record::default(),
      away: Record::default(),
      update: update.to_string(),
    }
  }
}

impl ApiStandingsResponse {
  /// Upstream's last update time, or `now` when it doesn't say.
  fn update_stamp(&self, now: DateTime<Utc>) -> String {
    self
      .season
      .as_ref()
      .and_then(|s| s.last_updated.clone())
      .unwrap_or_else(|| now.to_rfc3339())
  }

  /// Only the tables, for aggregates that carry their own metadata.
  pub fn into_groups(self, now: DateTime<Utc>) -> Vec<StandingGroup> {
    let update = self.update_stamp(now);
    self
      .standings
      .into_iter()
      .map(|g| g.into_group(&update))
      .collect()
  }

  /// Convert to internal standings, filling gaps from the request.
  pub fn into_standings(self, competition: u32, season: i32, now: DateTime<Utc>) -> LeagueStandings {
    let update = self.update_stamp(now);

    let (id, name, logo) = match self.competition {
      Some(c) => (c.id, c.name, c.emblem.unwrap_or_default()),
      None => (competition, String::new(), String::new()),
    };
    let (country, flag) = match self.area {
      Some(a) => (
        a.name.unwrap_or_else(|| "Unknown".to_string()),
        a.flag.unwrap_or_default(),
      ),
      None => ("Unknown".to_string(), String::new()),
    };
    let season = self
      .filters
      .and_then(|f| f.season)
      .and_then(|s| s.year())
      .unwrap_or(season);

    LeagueStandings {
      id,
      name,
      country,
      logo,
      flag,
      season,
      groups: self
        .standings
        .into_iter()
        .map(|g| g.into_group(&update))
        .collect(),
    }
  }
}

// ============================================================================
// Matches endpoint
// ============================================================================

/// Knockout fixtures can have undecided teams, so every field is optional.
#[derive(Debug, Deserialize)]
pub struct ApiMatchTeam {
  pub name: Option<String>,
  pub crest: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiScoreLine {
  pub home: Option<u32>,
  pub away: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScore {
  pub full_time: ApiScoreLine,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch {
  pub id: u64,
  pub utc_date: String,
  pub status: String,
  pub matchday: Option<u32>,
  pub stage: Option<String>,
  pub home_team: ApiMatchTeam,
  pub away_team: ApiMatchTeam,
  pub score: ApiScore,
  pub venue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApiMatchesResponse {
  pub matches: Vec<ApiMatch>,
}

impl From<ApiMatch> for Fixture {
  fn from(m: ApiMatch) -> Self {
    Fixture {
      id: m.id,
      date: m.utc_date,
      status: m.status,
      matchday: m.matchday,
      stage: m.stage.unwrap_or_default(),
      home_team: m.home_team.name.unwrap_or_else(|| "TBD".to_string()),
      home_team_logo: m.home_team.crest.unwrap_or_default(),
      away_team: m.away_team.name.unwrap_or_else(|| "TBD".to_string()),
      away_team_logo: m.away_team.crest.unwrap_or_default(),
      score: Score {
        home: m.score.full_time.home,
        away: m.score.full_time.away,
      },
      venue: m.venue.unwrap_or_default(),
    }
  }
}

impl ApiMatchesResponse {
  pub fn into_fixture_list(self) -> FixtureList {
    FixtureList::newest_first(self.matches.into_iter().map(Fixture::from).collect())
  }
}

// ============================================================================
// Scorers endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiPlayer {
  pub id: u64,
  pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiScorer {
  pub player: ApiPlayer,
  pub team: ApiTeam,
  pub goals: Option<u32>,
  pub assists: Option<u32>,
  pub penalties: Option<u32>,
  pub played_matches: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ApiScorersResponse {
  pub scorers: Vec<ApiScorer>,
}

impl From<ApiScorer> for Player {
  fn from(s: ApiScorer) -> Self {
    Player {
      id: s.player.id,
      name: s.player.name,
      team: s.team.name,
      team_logo: s.team.crest.unwrap_or_default(),
      goals: s.goals.unwrap_or(0),
      assists: s.assists.unwrap_or(0),
      // Not provided by the scorers endpoint
      shots: 0,
      penalties: s.penalties.unwrap_or(0),
      games_played: s.played_matches.unwrap_or(0),
    }
  }
}

impl ApiScorersResponse {
  pub fn into_players(self) -> Vec<Player> {
    self.scorers.into_iter().map(Player::from).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use serde_json::json;

  fn standings_body() -> serde_json::Value {
    json!({
      "filters": { "season": "2024" },
      "area": { "id": 2072, "name": "England", "flag": "https://crests.football-data.org/770.svg" },
      "competition": { "id": 2021, "name": "Premier League", "emblem": "https://crests.football-data.org/PL.png" },
      "season": { "id": 2287, "lastUpdated": "2025-05-10T00:00:00Z" },
      "standings": [{
        "stage": "REGULAR_SEASON",
        "type": "TOTAL",
        "group": null,
        "table": [{
          "position": 1,
          "team": { "id": 64, "name": "Liverpool FC", "crest": "https://crests.football-data.org/64.png" },
          "playedGames": 35,
          "form": "W,W,D,W,W",
          "won": 25, "draw": 7, "lost": 3,
          "points": 82,
          "goalsFor": 75, "goalsAgainst": 35, "goalDifference": 40
        }]
      }]
    })
  }

  #[test]
  fn test_standings_field_renames() {
    let api: ApiStandingsResponse = serde_json::from_value(standings_body()).unwrap();
    let now = Utc.with_ymd_and_hms(2025, 5, 11, 12, 0, 0).unwrap();
    let standings = api.into_standings(2021, 2023, now);

    assert_eq!(standings.id, 2021);
    assert_eq!(standings.country, "England");
    assert_eq!(standings.season, 2024);

    let group = &standings.groups[0];
    assert_eq!(group.group, "TOTAL");
    let row = &group.table[0];
    assert_eq!(row.rank, 1);
    assert_eq!(row.goals_diff, 40);
    assert_eq!(row.team.logo, "https://crests.football-data.org/64.png");
    assert_eq!(row.all.played, 35);
    assert_eq!(row.all.goals.scored, 75);
    assert_eq!(row.home, Record::default());
    assert_eq!(row.status, "same");
    assert_eq!(row.update, "2025-05-10T00:00:00Z");
  }

  #[test]
  fn test_standings_serialize_with_internal_names() {
    let api: ApiStandingsResponse = serde_json::from_value(standings_body()).unwrap();
    let standings = api.into_standings(2021, 2024, Utc::now());
    let value = serde_json::to_value(&standings).unwrap();
    let row = &value["groups"][0]["table"][0];

    assert_eq!(row["rank"], 1);
    assert_eq!(row["goalsDiff"], 40);
    assert_eq!(row["all"]["goals"]["for"], 75);
    assert!(row.get("position").is_none());
    assert!(row.get("goalDifference").is_none());
  }

  #[test]
  fn test_standings_defaults_when_metadata_missing() {
    let api: ApiStandingsResponse = serde_json::from_value(json!({
      "standings": [{ "group": "GROUP_A", "table": [] }]
    }))
    .unwrap();
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
    let standings = api.into_standings(2001, 2024, now);

    assert_eq!(standings.id, 2001);
    assert_eq!(standings.season, 2024);
    assert_eq!(standings.country, "Unknown");
    assert_eq!(standings.groups[0].group, "GROUP_A");
  }

  #[test]
  fn test_standings_missing_table_fields_is_malformed() {
    let result: Result<ApiStandingsResponse, _> = serde_json::from_value(json!({
      "standings": [{ "type": "TOTAL", "table": [{ "position": 1 }] }]
    }));
    assert!(result.is_err());
  }

  #[test]
  fn test_match_to_fixture() {
    let api: ApiMatchesResponse = serde_json::from_value(json!({
      "matches": [
        {
          "id": 1, "utcDate": "2024-05-11T11:30:00Z", "status": "FINISHED", "matchday": 37,
          "stage": "REGULAR_SEASON",
          "homeTeam": { "id": 61, "name": "Chelsea FC", "crest": "c.png" },
          "awayTeam": { "id": 65, "name": "Manchester City FC", "crest": "m.png" },
          "score": { "winner": "AWAY_TEAM", "fullTime": { "home": 0, "away": 1 } },
          "venue": "Stamford Bridge"
        },
        {
          "id": 2, "utcDate": "2024-05-19T15:00:00Z", "status": "SCHEDULED", "matchday": 38,
          "homeTeam": { "id": null, "name": null, "crest": null },
          "awayTeam": { "id": 57, "name": "Arsenal FC", "crest": "a.png" },
          "score": { "fullTime": { "home": null, "away": null } }
        }
      ]
    }))
    .unwrap();

    let list = api.into_fixture_list();
    assert_eq!(list.fixtures[0].id, 2);
    assert_eq!(list.fixtures[0].home_team, "TBD");
    assert_eq!(list.fixtures[0].score, Score::default());
    assert_eq!(list.fixtures[1].home_team, "Chelsea FC");
    assert_eq!(list.fixtures[1].score.away, Some(1));
    assert_eq!(list.fixtures[1].venue, "Stamford Bridge");
  }

  #[test]
  fn test_scorer_to_player() {
    let api: ApiScorersResponse = serde_json::from_value(json!({
      "scorers": [{
        "player": { "id": 38101, "name": "Erling Haaland" },
        "team": { "id": 65, "name": "Manchester City FC", "crest": "m.png" },
        "playedMatches": 31, "goals": 27, "assists": null, "penalties": 5
      }]
    }))
    .unwrap();

    let players = api.into_players();
    assert_eq!(players[0].name, "Erling Haaland");
    assert_eq!(players[0].goals, 27);
    assert_eq!(players[0].assists, 0);
    assert_eq!(players[0].penalties, 5);
    assert_eq!(players[0].shots, 0);
    assert_eq!(players[0].games_played, 31);
  }
}
