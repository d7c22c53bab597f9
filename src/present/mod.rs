//! Turning payloads into what the user sees: sorting, month grouping and
//! plain-text tables.

mod tables;
mod utils;

pub use tables::{render_fixtures, render_players, render_source, render_standings};
pub use utils::season_label;

use clap::ValueEnum;
use color_eyre::{eyre::eyre, Result};
use std::cmp::Ordering;

use crate::football::types::{Fixture, Player, StandingRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDirection {
  Asc,
  Desc,
}

impl SortDirection {
  fn apply(self, ordering: Ordering) -> Ordering {
    match self {
      SortDirection::Asc => ordering,
      SortDirection::Desc => ordering.reverse(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StandingsSort {
  Rank,
  Points,
  GoalDiff,
  GoalsFor,
  Team,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerSort {
  Goals,
  Assists,
  Penalties,
  Games,
  Name,
}

/// Stable sort; rows that compare equal keep their order.
pub fn sort_standings(rows: &mut [StandingRow], by: StandingsSort, direction: SortDirection) {
  rows.sort_by(|a, b| {
    let ordering = match by {
      StandingsSort::Rank => a.rank.cmp(&b.rank),
      StandingsSort::Points => a.points.cmp(&b.points),
      StandingsSort::GoalDiff => a.goals_diff.cmp(&b.goals_diff),
      StandingsSort::GoalsFor => a.all.goals.scored.cmp(&b.all.goals.scored),
      StandingsSort::Team => a.team.name.to_lowercase().cmp(&b.team.name.to_lowercase()),
    };
    direction.apply(ordering)
  });
}

/// Stable sort; players that compare equal keep their order.
pub fn sort_players(players: &mut [Player], by: PlayerSort, direction: SortDirection) {
  players.sort_by(|a, b| {
    let ordering = match by {
      PlayerSort::Goals => a.goals.cmp(&b.goals),
      PlayerSort::Assists => a.assists.cmp(&b.assists),
      PlayerSort::Penalties => a.penalties.cmp(&b.penalties),
      PlayerSort::Games => a.games_played.cmp(&b.games_played),
      PlayerSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    };
    direction.apply(ordering)
  });
}

/// Validate a `YYYY-MM` month argument.
pub fn parse_month(s: &str) -> Result<String> {
  let valid = s.len() == 7
    && s.as_bytes()[4] == b'-'
    && s[..4].chars().all(|c| c.is_ascii_digit())
    && matches!(s[5..].parse::<u32>(), Ok(1..=12));
  if valid {
    Ok(s.to_string())
  } else {
    Err(eyre!("Invalid month '{}', expected YYYY-MM", s))
  }
}

/// `YYYY-MM` of the kickoff in UTC.
pub fn fixture_month(fixture: &Fixture) -> String {
  match fixture.kickoff() {
    Some(kickoff) => kickoff.format("%Y-%m").to_string(),
    None => fixture.date.chars().take(7).collect(),
  }
}

pub fn filter_month(fixtures: &[Fixture], month: &str) -> Vec<Fixture> {
  fixtures
    .iter()
    .filter(|f| fixture_month(f) == month)
    .cloned()
    .collect()
}

/// Group by month, newest month first; order within a month is kept.
pub fn group_by_month(fixtures: &[Fixture]) -> Vec<(String, Vec<&Fixture>)> {
  let mut groups: Vec<(String, Vec<&Fixture>)> = Vec::new();
  for fixture in fixtures {
    let month = fixture_month(fixture);
    match groups.iter_mut().find(|(m, _)| *m == month) {
      Some((_, list)) => list.push(fixture),
      None => groups.push((month, vec![fixture])),
    }
  }
  groups.sort_by(|a, b| b.0.cmp(&a.0));
  groups
}
