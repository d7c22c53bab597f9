//! Cache keys for football resources.

use sha2::{Digest, Sha256};

use crate::cache::QueryKey;

use super::league::League;

/// One cached document per variant value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceKey {
  /// League table of one season
  Standings { competition: u32, season: i32 },
  /// All fixtures of a league's current season
  Fixtures { league: League },
  /// Top scorers of a league's current season
  Players { league: League },
  /// Standings, matches and scorers of the Champions League
  ChampionsLeague,
}

impl QueryKey for ResourceKey {
  fn cache_hash(&self) -> String {
    // SHA256 hash for stable, fixed-length keys
    let mut hasher = Sha256::new();
    hasher.update(self.description().as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
  }

  fn description(&self) -> String {
    match self {
      Self::Standings {
        competition,
        season,
      } => format!("leagues/{}-{}", competition, season),
      Self::Fixtures { league } => format!("fixtures/{}", league.slug()),
      Self::Players { league } => format!("players/{}", league.slug()),
      Self::ChampionsLeague => "champions-league/current-season".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_document_paths() {
    let key = ResourceKey::Standings {
      competition: 2021,
      season: 2024,
    };
    assert_eq!(key.description(), "leagues/2021-2024");
    assert_eq!(
      ResourceKey::Players {
        league: League::LaLiga
      }
      .description(),
      "players/la-liga"
    );
    assert_eq!(
      ResourceKey::ChampionsLeague.description(),
      "champions-league/current-season"
    );
  }

  #[test]
  fn test_hash_is_stable_and_distinct() {
    let a = ResourceKey::Fixtures {
      league: League::SerieA,
    };
    let b = ResourceKey::Players {
      league: League::SerieA,
    };
    assert_eq!(a.cache_hash(), a.clone().cache_hash());
    assert_eq!(a.cache_hash().len(), 64);
    assert_ne!(a.cache_hash(), b.cache_hash());
  }

  #[test]
  fn test_seasons_do_not_share_a_key() {
    let a = ResourceKey::Standings {
      competition: 2021,
      season: 2023,
    };
    let b = ResourceKey::Standings {
      competition: 2021,
      season: 2024,
    };
    assert_ne!(a.cache_hash(), b.cache_hash());
  }
}
