use std::fmt::Write;

use super::utils::{score_text, season_label, truncate};
use crate::cache::{CacheResult, CacheSource};
use crate::football::types::{Fixture, LeagueStandings, Player, StandingGroup};

const TEAM_WIDTH: usize = 26;
const NAME_WIDTH: usize = 24;

/// One line telling where the data came from.
pub fn render_source<T>(result: &CacheResult<T>) -> String {
  if let (true, Some(at)) = (result.from_cache(), result.cached_at) {
    return format!("source: cache (updated {})", at.format("%Y-%m-%d %H:%M UTC"));
  }
  match result.source {
    CacheSource::Network => "source: live".to_string(),
    _ => "source: offline fallback".to_string(),
  }
}

pub fn render_standings(standings: &LeagueStandings) -> String {
  let mut out = String::new();
  let _ = writeln!(
    out,
    "{} ({}) {}",
    standings.name,
    standings.country,
    season_label(standings.season)
  );
  if standings.groups.is_empty() {
    out.push_str("No standings available\n");
  }
  for group in &standings.groups {
    render_group(&mut out, group);
  }
  out
}

fn render_group(out: &mut String, group: &StandingGroup) {
  if !group.group.is_empty() {
    let _ = writeln!(out, "\n{}", group.group);
  }
  let _ = writeln!(
    out,
    "{:>3}  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}  {}",
    "#",
    "Team",
    "P",
    "W",
    "D",
    "L",
    "GF",
    "GA",
    "GD",
    "Pts",
    "Form",
    width = TEAM_WIDTH
  );
  for row in &group.table {
    let _ = writeln!(
      out,
      "{:>3}  {:<width$} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>+4} {:>4}  {}",
      row.rank,
      truncate(&row.team.name, TEAM_WIDTH),
      row.all.played,
      row.all.win,
      row.all.draw,
      row.all.lose,
      row.all.goals.scored,
      row.all.goals.against,
      row.goals_diff,
      row.points,
      row.form,
      width = TEAM_WIDTH
    );
  }
}

/// Fixtures grouped by month, as produced by `group_by_month`.
pub fn render_fixtures(groups: &[(String, Vec<&Fixture>)]) -> String {
  let mut out = String::new();
  if groups.is_empty() {
    out.push_str("No fixtures\n");
  }
  for (month, fixtures) in groups {
    let _ = writeln!(out, "\n{}", month);
    for fixture in fixtures {
      let kickoff = fixture
        .kickoff()
        .map(|k| k.format("%a %d %H:%M").to_string())
        .unwrap_or_else(|| fixture.date.clone());
      let _ = writeln!(
        out,
        "  {:<12} {:>width$} {:^5} {:<width$}  {}",
        kickoff,
        truncate(&fixture.home_team, TEAM_WIDTH),
        score_text(fixture.score.home, fixture.score.away),
        truncate(&fixture.away_team, TEAM_WIDTH),
        fixture.status,
        width = TEAM_WIDTH
      );
    }
  }
  out
}

pub fn render_players(players: &[Player]) -> String {
  let mut out = String::new();
  if players.is_empty() {
    out.push_str("No scorers available\n");
    return out;
  }
  let _ = writeln!(
    out,
    "{:>3}  {:<name$} {:<team$} {:>5} {:>5} {:>4} {:>4}",
    "#",
    "Player",
    "Team",
    "Goals",
    "Ast",
    "Pen",
    "Apps",
    name = NAME_WIDTH,
    team = TEAM_WIDTH
  );
  for (i, player) in players.iter().enumerate() {
    let _ = writeln!(
      out,
      "{:>3}  {:<name$} {:<team$} {:>5} {:>5} {:>4} {:>4}",
      i + 1,
      truncate(&player.name, NAME_WIDTH),
      truncate(&player.team, TEAM_WIDTH),
      player.goals,
      player.assists,
      player.penalties,
      player.games_played,
      name = NAME_WIDTH,
      team = TEAM_WIDTH
    );
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::football::{fallback, League};
  use crate::present::group_by_month;
  use chrono::{TimeZone, Utc};

  #[test]
  fn test_render_standings_lists_teams() {
    let text = render_standings(&fallback::standings(2021, 2023));
    assert!(text.starts_with("Premier League (England) 2023/24"));
    assert!(text.contains("Liverpool FC"));
    assert!(text.contains("+40"));
  }

  #[test]
  fn test_render_standings_with_extreme_season() {
    let text = render_standings(&fallback::standings(2019, i32::MAX));
    assert!(text.starts_with("Serie A (Italy) 2147483647/52"));
  }

  #[test]
  fn test_render_empty_standings() {
    let text = render_standings(&fallback::standings(2019, 2024));
    assert!(text.contains("No standings available"));
  }

  #[test]
  fn test_render_fixtures_shows_scores() {
    let list = fallback::fixtures(League::PremierLeague);
    let text = render_fixtures(&group_by_month(&list.fixtures));
    assert!(text.contains("2024-05"));
    assert!(text.contains("4-2"));
    assert!(text.contains("SCHEDULED"));
  }

  #[test]
  fn test_render_players_numbers_rows() {
    let text = render_players(&fallback::players(League::PremierLeague));
    assert!(text.contains("  1  Erling Haaland"));
    assert_eq!(render_players(&[]), "No scorers available\n");
  }

  #[test]
  fn test_render_source() {
    let at = Utc.with_ymd_and_hms(2024, 5, 10, 8, 30, 0).unwrap();
    assert_eq!(
      render_source(&CacheResult::from_snapshot((), at)),
      "source: cache (updated 2024-05-10 08:30 UTC)"
    );
    assert_eq!(render_source(&CacheResult::from_network((), at)), "source: live");
    assert_eq!(render_source(&CacheResult::fallback(())), "source: offline fallback");
  }
}
