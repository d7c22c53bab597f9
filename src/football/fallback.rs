//! Static placeholder datasets, served when upstream can't be reached.
//!
//! Only the Premier League and the Champions League have canned content;
//! every other league gets an empty but well-formed payload.

use super::league::League;
use super::types::{
  ChampionsLeagueData, Fixture, FixtureList, Goals, LeagueStandings, Player, Record, Score,
  StandingGroup, StandingRow, TeamRef,
};

const CRESTS: &str = "https://crests.football-data.org";

fn crest(team_id: u32) -> String {
  format!("{}/{}.png", CRESTS, team_id)
}

/// (rank, team id, team, played, won, draw, lost, goals for, goals against, form)
type Line = (u32, u32, &'static str, u32, u32, u32, u32, u32, u32, &'static str);

fn row(group: &str, line: Line) -> StandingRow {
  let (rank, id, name, played, won, draw, lost, scored, against, form) = line;
  StandingRow {
    rank,
    team: TeamRef {
      id,
      name: name.to_string(),
      logo: crest(id),
    },
    points: (won * 3 + draw) as i32,
    goals_diff: scored as i32 - against as i32,
    group: group.to_string(),
    form: form.to_string(),
    status: "same".to_string(),
    description: String::new(),
    all: Record {
      played,
      win: won,
      draw,
      lose: lost,
      goals: Goals { scored, against },
    },
    home: Record::default(),
    away: Record::default(),
    update: "2024-05-10T00:00:00Z".to_string(),
  }
}

fn group(name: &str, lines: &[Line]) -> StandingGroup {
  StandingGroup {
    group: name.to_string(),
    table: lines.iter().map(|l| row(name, *l)).collect(),
  }
}

pub fn standings(competition: u32, season: i32) -> LeagueStandings {
  let league = League::from_competition_id(competition);
  let groups = match league {
    Some(League::PremierLeague) => vec![group(
      "TOTAL",
      &[
        (1, 64, "Liverpool FC", 35, 25, 7, 3, 75, 35, "WWDWW"),
        (2, 65, "Manchester City FC", 35, 24, 8, 3, 72, 32, "WWWWD"),
        (3, 57, "Arsenal FC", 35, 24, 5, 6, 83, 28, "WWWLD"),
      ],
    )],
    Some(League::ChampionsLeague) => champions_league().standings,
    _ => Vec::new(),
  };

  LeagueStandings {
    id: competition,
    name: league.map(|l| l.name()).unwrap_or_default().to_string(),
    country: league.map(|l| l.country()).unwrap_or("Unknown").to_string(),
    logo: String::new(),
    flag: String::new(),
    season,
    groups,
  }
}

/// (id, kickoff, status, matchday, stage, home id, home, away id, away, score, venue)
type Match = (
  u64,
  &'static str,
  &'static str,
  u32,
  &'static str,
  u32,
  &'static str,
  u32,
  &'static str,
  Option<(u32, u32)>,
  &'static str,
);

fn fixture(m: Match) -> Fixture {
  let (id, date, status, matchday, stage, home_id, home, away_id, away, score, venue) = m;
  Fixture {
    id,
    date: date.to_string(),
    status: status.to_string(),
    matchday: Some(matchday),
    stage: stage.to_string(),
    home_team: home.to_string(),
    home_team_logo: crest(home_id),
    away_team: away.to_string(),
    away_team_logo: crest(away_id),
    score: Score {
      home: score.map(|s| s.0),
      away: score.map(|s| s.1),
    },
    venue: venue.to_string(),
  }
}

fn champions_league_matches() -> Vec<Fixture> {
  [
    (5, "2025-05-31T19:00:00Z", "SCHEDULED", 15, "FINAL", 524, "Paris Saint-Germain FC", 108, "FC Internazionale Milano", None, "Allianz Arena"),
    (1, "2025-05-07T19:00:00Z", "FINISHED", 14, "SEMI_FINALS", 524, "Paris Saint-Germain FC", 57, "Arsenal FC", Some((2, 1)), "Parc des Princes"),
    (2, "2025-05-06T19:00:00Z", "FINISHED", 14, "SEMI_FINALS", 108, "FC Internazionale Milano", 81, "FC Barcelona", Some((4, 3)), "San Siro"),
    (3, "2025-04-30T19:00:00Z", "FINISHED", 13, "SEMI_FINALS", 81, "FC Barcelona", 108, "FC Internazionale Milano", Some((3, 3)), "Estadi Olimpic Lluis Companys"),
    (4, "2025-04-29T19:00:00Z", "FINISHED", 13, "SEMI_FINALS", 57, "Arsenal FC", 524, "Paris Saint-Germain FC", Some((0, 1)), "Emirates Stadium"),
  ]
  .into_iter()
  .map(fixture)
  .collect()
}

pub fn fixtures(league: League) -> FixtureList {
  let fixtures: Vec<Fixture> = match league {
    League::PremierLeague => [
      (1, "2024-05-19T15:00:00Z", "SCHEDULED", 38, "REGULAR_SEASON", 65, "Manchester City FC", 563, "West Ham United FC", None, "Etihad Stadium"),
      (2, "2024-05-19T15:00:00Z", "SCHEDULED", 38, "REGULAR_SEASON", 57, "Arsenal FC", 62, "Everton FC", None, "Emirates Stadium"),
      (3, "2024-05-11T14:00:00Z", "FINISHED", 37, "REGULAR_SEASON", 66, "Manchester United FC", 67, "Newcastle United FC", Some((1, 1)), "Old Trafford"),
      (4, "2024-05-11T14:00:00Z", "FINISHED", 37, "REGULAR_SEASON", 73, "Tottenham Hotspur FC", 328, "Burnley FC", Some((2, 1)), "Tottenham Hotspur Stadium"),
      (5, "2024-05-04T14:00:00Z", "FINISHED", 36, "REGULAR_SEASON", 64, "Liverpool FC", 73, "Tottenham Hotspur FC", Some((4, 2)), "Anfield"),
      (6, "2024-04-27T14:00:00Z", "FINISHED", 35, "REGULAR_SEASON", 76, "Wolverhampton Wanderers FC", 389, "Luton Town FC", Some((2, 1)), "Molineux Stadium"),
    ]
    .into_iter()
    .map(fixture)
    .collect(),
    League::ChampionsLeague => champions_league_matches(),
    _ => Vec::new(),
  };
  FixtureList::newest_first(fixtures)
}

/// (id, name, team id, team, goals, assists, penalties, games)
type Scorer = (u64, &'static str, u32, &'static str, u32, u32, u32, u32);

fn player(s: Scorer) -> Player {
  let (id, name, team_id, team, goals, assists, penalties, games_played) = s;
  Player {
    id,
    name: name.to_string(),
    team: team.to_string(),
    team_logo: crest(team_id),
    goals,
    assists,
    shots: 0,
    penalties,
    games_played,
  }
}

fn champions_league_scorers() -> Vec<Player> {
  [
    (1001, "Serhou Guirassy", 4, "Borussia Dortmund", 13, 4, 3, 14),
    (1002, "Raphinha", 81, "FC Barcelona", 13, 8, 0, 14),
    (1003, "Robert Lewandowski", 81, "FC Barcelona", 11, 0, 3, 13),
  ]
  .into_iter()
  .map(player)
  .collect()
}

pub fn players(league: League) -> Vec<Player> {
  match league {
    League::PremierLeague => [
      (1, "Erling Haaland", 65, "Manchester City FC", 27, 5, 5, 31),
      (2, "Cole Palmer", 61, "Chelsea FC", 22, 10, 2, 35),
      (3, "Alexander Isak", 67, "Newcastle United FC", 21, 3, 1, 30),
      (7, "Ollie Watkins", 58, "Aston Villa FC", 19, 12, 0, 37),
      (4, "Son Heung-min", 73, "Tottenham Hotspur FC", 17, 8, 0, 35),
      (8, "Mohamed Salah", 64, "Liverpool FC", 17, 9, 3, 32),
    ]
    .into_iter()
    .map(player)
    .collect(),
    League::ChampionsLeague => champions_league_scorers(),
    _ => Vec::new(),
  }
}

pub fn champions_league() -> ChampionsLeagueData {
  ChampionsLeagueData {
    standings: vec![group(
      "LEAGUE_PHASE",
      &[
        (1, 64, "Liverpool FC", 8, 7, 0, 1, 17, 5, "WWWWL"),
        (2, 81, "FC Barcelona", 8, 6, 1, 1, 28, 13, "WWDWW"),
        (3, 57, "Arsenal FC", 8, 6, 1, 1, 16, 3, "WWWDW"),
        (4, 108, "FC Internazionale Milano", 8, 6, 1, 1, 11, 1, "WWWLW"),
      ],
    )],
    matches: champions_league_matches(),
    scorers: champions_league_scorers(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_premier_league_standings_are_consistent() {
    let standings = standings(2021, 2023);
    assert_eq!(standings.season, 2023);
    assert_eq!(standings.name, "Premier League");
    let table = &standings.groups[0].table;
    assert_eq!(table[0].team.name, "Liverpool FC");
    assert_eq!(table[0].points, 82);
    assert_eq!(table[0].goals_diff, 40);
  }

  #[test]
  fn test_unknown_competition_is_empty() {
    let standings = standings(9999, 2024);
    assert!(standings.groups.is_empty());
    assert_eq!(standings.country, "Unknown");
  }

  #[test]
  fn test_fixtures_are_newest_first() {
    let list = fixtures(League::PremierLeague);
    let dates: Vec<_> = list.fixtures.iter().map(|f| f.kickoff().unwrap()).collect();
    assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    assert!(fixtures(League::SerieA).fixtures.is_empty());
  }

  #[test]
  fn test_champions_league_scorers_shared() {
    assert_eq!(players(League::ChampionsLeague), champions_league().scorers);
    assert!(players(League::Ligue1).is_empty());
  }
}
