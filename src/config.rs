use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cache::WriteMode;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
  /// Season used when a command doesn't name one (start year, e.g. 2024)
  #[serde(default = "default_season")]
  pub season: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// Turn the snapshot store off entirely (every call goes upstream)
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Database file (defaults to $XDG_DATA_HOME/touchline/cache.db)
  pub path: Option<PathBuf>,
  #[serde(default)]
  pub write_mode: WriteMode,
}

fn default_season() -> i32 {
  2024
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
  true
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api: ApiConfig::default(),
      cache: CacheConfig::default(),
      season: default_season(),
    }
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
    }
  }
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      path: None,
      write_mode: WriteMode::default(),
    }
  }
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./touchline.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/touchline/config.yaml
  ///
  /// Without any file the defaults apply; only the API token is required,
  /// and that comes from the environment.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("touchline.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("touchline").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self> {
    // An empty file is valid and means "all defaults"
    if contents.trim().is_empty() {
      return Ok(Self::default());
    }
    Ok(serde_yaml::from_str(contents)?)
  }

  /// Get the football-data.org API token from environment variables.
  ///
  /// Checks TOUCHLINE_API_TOKEN first, then FOOTBALL_DATA_API_KEY as fallback.
  pub fn get_api_token() -> Result<String> {
    std::env::var("TOUCHLINE_API_TOKEN")
      .or_else(|_| std::env::var("FOOTBALL_DATA_API_KEY"))
      .map_err(|_| {
        eyre!(
          "API token not found. Set TOUCHLINE_API_TOKEN or FOOTBALL_DATA_API_KEY environment variable."
        )
      })
  }
}
