use crate::config::Config;
use crate::football::api_types::{ApiMatchesResponse, ApiScorersResponse, ApiStandingsResponse};
use crate::football::league::League;
use crate::football::types::{ChampionsLeagueData, FixtureList, LeagueStandings, Player};
use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// How many scorers the players page asks for
pub const SCORERS_LIMIT: u32 = 20;

/// football-data.org API client
#[derive(Clone)]
pub struct FootballClient {
  http: reqwest::Client,
  base_url: Url,
  /// Missing token means every call fails without touching the network
  token: Option<String>,
}

impl FootballClient {
  pub fn new(config: &Config) -> Result<Self> {
    let token = match Config::get_api_token() {
      Ok(token) => Some(token),
      Err(e) => {
        info!("{}; serving cached or fallback data only", e);
        None
      }
    };
    Self::with_base_url(&config.api.base_url, token)
  }

  pub fn with_base_url(base_url: &str, token: Option<String>) -> Result<Self> {
    // Url::join drops the last path segment unless it ends with a slash
    let normalized = format!("{}/", base_url.trim_end_matches('/'));
    let base_url =
      Url::parse(&normalized).map_err(|e| eyre!("Invalid API base URL {}: {}", base_url, e))?;

    let http = reqwest::Client::builder()
      .user_agent(concat!("touchline/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url,
      token,
    })
  }

  /// GET `path` and decode the body. Non-2xx and undecodable bodies are errors.
  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
    let token = self
      .token
      .as_deref()
      .ok_or_else(|| eyre!("API token is not configured"))?;

    let mut url = self
      .base_url
      .join(path)
      .map_err(|e| eyre!("Invalid endpoint {}: {}", path, e))?;
    if !query.is_empty() {
      let mut pairs = url.query_pairs_mut();
      for (k, v) in query {
        pairs.append_pair(k, v);
      }
    }

    debug!(%url, "Requesting upstream data");

    let response = self
      .http
      .get(url.clone())
      .header("X-Auth-Token", token)
      .send()
      .await
      .map_err(|e| eyre!("Request to {} failed: {}", url, e))?;

    let status = response.status();
    let body = response
      .text()
      .await
      .map_err(|e| eyre!("Failed to read response from {}: {}", url, e))?;

    if !status.is_success() {
      return Err(eyre!("API request failed: {} - {}", status, body));
    }

    serde_json::from_str(&body).map_err(|e| eyre!("Malformed response from {}: {}", path, e))
  }

  /// Get the standings of one competition season
  pub async fn get_standings(&self, competition: u32, season: i32) -> Result<LeagueStandings> {
    let endpoint = format!("competitions/{}/standings", competition);
    let response: ApiStandingsResponse = self
      .get(&endpoint, &[("season", season.to_string())])
      .await?;

    Ok(response.into_standings(competition, season, Utc::now()))
  }

  /// Get every match of the competition's current season
  pub async fn get_fixtures(&self, competition: u32) -> Result<FixtureList> {
    let endpoint = format!("competitions/{}/matches", competition);
    let response: ApiMatchesResponse = self.get(&endpoint, &[]).await?;

    Ok(response.into_fixture_list())
  }

  /// Get the top scorers of the competition's current season
  pub async fn get_scorers(&self, competition: u32) -> Result<Vec<Player>> {
    let endpoint = format!("competitions/{}/scorers", competition);
    let response: ApiScorersResponse = self
      .get(&endpoint, &[("limit", SCORERS_LIMIT.to_string())])
      .await?;

    Ok(response.into_players())
  }

  /// Standings, matches and scorers of the Champions League in one go.
  /// Fails if any of the three requests fails.
  pub async fn get_champions_league(&self) -> Result<ChampionsLeagueData> {
    let competition = League::ChampionsLeague.competition_id();
    let standings_endpoint = format!("competitions/{}/standings", competition);

    let (standings, fixtures, scorers) = futures::try_join!(
      self.get::<ApiStandingsResponse>(&standings_endpoint, &[]),
      self.get_fixtures(competition),
      self.get_scorers(competition),
    )?;

    Ok(ChampionsLeagueData {
      standings: standings.into_groups(Utc::now()),
      matches: fixtures.fixtures,
      scorers,
    })
  }
}
