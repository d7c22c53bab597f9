use color_eyre::{eyre::eyre, Result};
use std::fmt;
use std::str::FromStr;

/// Competitions the site knows about, keyed by their football-data.org id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
  PremierLeague,
  LaLiga,
  SerieA,
  Bundesliga,
  Ligue1,
  ChampionsLeague,
}

impl League {
  pub const ALL: [League; 6] = [
    League::PremierLeague,
    League::LaLiga,
    League::SerieA,
    League::Bundesliga,
    League::Ligue1,
    League::ChampionsLeague,
  ];

  /// The five domestic leagues, in refresh rotation order.
  pub const DOMESTIC: [League; 5] = [
    League::PremierLeague,
    League::LaLiga,
    League::SerieA,
    League::Bundesliga,
    League::Ligue1,
  ];

  pub fn slug(self) -> &'static str {
    match self {
      League::PremierLeague => "premier-league",
      League::LaLiga => "la-liga",
      League::SerieA => "serie-a",
      League::Bundesliga => "bundesliga",
      League::Ligue1 => "ligue-1",
      League::ChampionsLeague => "champions-league",
    }
  }

  /// football-data.org competition id
  pub fn competition_id(self) -> u32 {
    match self {
      League::PremierLeague => 2021,
      League::LaLiga => 2014,
      League::SerieA => 2019,
      League::Bundesliga => 2002,
      League::Ligue1 => 2015,
      League::ChampionsLeague => 2001,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      League::PremierLeague => "Premier League",
      League::LaLiga => "Primera Division",
      League::SerieA => "Serie A",
      League::Bundesliga => "Bundesliga",
      League::Ligue1 => "Ligue 1",
      League::ChampionsLeague => "UEFA Champions League",
    }
  }

  pub fn country(self) -> &'static str {
    match self {
      League::PremierLeague => "England",
      League::LaLiga => "Spain",
      League::SerieA => "Italy",
      League::Bundesliga => "Germany",
      League::Ligue1 => "France",
      League::ChampionsLeague => "Europe",
    }
  }

  pub fn from_competition_id(id: u32) -> Option<League> {
    Self::ALL.into_iter().find(|l| l.competition_id() == id)
  }
}

impl fmt::Display for League {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.slug())
  }
}

impl FromStr for League {
  type Err = color_eyre::Report;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim().to_lowercase();
    Self::ALL
      .into_iter()
      .find(|l| l.slug() == s)
      .ok_or_else(|| {
        let known: Vec<_> = Self::ALL.iter().map(|l| l.slug()).collect();
        eyre!("Unknown league '{}'. Expected one of: {}", s, known.join(", "))
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_slug() {
    assert_eq!("la-liga".parse::<League>().unwrap(), League::LaLiga);
    assert_eq!(" Serie-A ".parse::<League>().unwrap(), League::SerieA);
  }

  #[test]
  fn test_parse_unknown_slug() {
    let err = "eredivisie".parse::<League>().unwrap_err();
    assert!(err.to_string().contains("premier-league"));
  }

  #[test]
  fn test_competition_ids() {
    assert_eq!(League::PremierLeague.competition_id(), 2021);
    assert_eq!(League::ChampionsLeague.competition_id(), 2001);
    assert_eq!(League::from_competition_id(2002), Some(League::Bundesliga));
    assert_eq!(League::from_competition_id(1), None);
  }
}
