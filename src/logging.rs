use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "touchline=info";

/// Directory for the daily log files.
pub fn log_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("touchline").join("logs"))
}

/// Send tracing output to a rolling file so it never mixes with tables on
/// stdout. `RUST_LOG` overrides the default filter.
///
/// Logging is optional: when the directory is unusable a single line goes to
/// stderr and the command runs without a log file. Keep the returned guard
/// alive until exit or buffered lines are lost.
pub fn init() -> Option<WorkerGuard> {
  match log_dir() {
    Ok(dir) => init_in(&dir),
    Err(e) => {
      eprintln!("touchline: logging disabled: {:#}", e);
      None
    }
  }
}

fn init_in(dir: &Path) -> Option<WorkerGuard> {
  let (writer, guard) = match file_writer(dir) {
    Ok(parts) => parts,
    Err(e) => {
      eprintln!("touchline: logging disabled: {:#}", e);
      return None;
    }
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  if let Err(e) = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
  {
    eprintln!("touchline: logging disabled: {}", e);
    return None;
  }

  Some(guard)
}

fn file_writer(dir: &Path) -> Result<(NonBlocking, WorkerGuard)> {
  std::fs::create_dir_all(dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let appender = RollingFileAppender::builder()
    .rotation(Rotation::DAILY)
    .filename_prefix("touchline")
    .filename_suffix("log")
    .build(dir)
    .map_err(|e| eyre!("Failed to open log file in {}: {}", dir.display(), e))?;

  Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("touchline-log-{}-{}", name, std::process::id()))
  }

  #[test]
  fn test_log_dir_under_a_regular_file_disables_logging() {
    let file = scratch("file");
    std::fs::write(&file, b"not a directory").unwrap();

    let err = file_writer(&file.join("logs")).unwrap_err();
    assert!(err.to_string().contains("Failed to create log directory"));
    assert!(init_in(&file.join("logs")).is_none());

    std::fs::remove_file(&file).unwrap();
  }

  #[test]
  fn test_file_writer_creates_directory() {
    let dir = scratch("dir").join("logs");

    let parts = file_writer(&dir);

    assert!(parts.is_ok());
    assert!(dir.is_dir());
    drop(parts);
    std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();
  }
}
