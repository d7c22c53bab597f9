/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// "3-1", or "-" for a match that hasn't been played
pub fn score_text(home: Option<u32>, away: Option<u32>) -> String {
  match (home, away) {
    (Some(h), Some(a)) => format!("{}-{}", h, a),
    _ => "-".to_string(),
  }
}

/// "2024/25" for the season starting in 2024
pub fn season_label(season: i32) -> String {
  format!("{}/{:02}", season, season.wrapping_add(1).rem_euclid(100))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_season_label() {
    assert_eq!(season_label(2024), "2024/25");
    assert_eq!(season_label(1999), "1999/00");
    assert_eq!(season_label(2008), "2008/09");
  }

  #[test]
  fn test_season_label_at_integer_limits() {
    assert_eq!(season_label(i32::MAX), "2147483647/52");
    assert_eq!(season_label(-1), "-1/00");
  }

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("FC Bayern München", 12), "FC Bayern...");
    assert_eq!(truncate("Atlético", 8), "Atlético");
  }

  #[test]
  fn test_score_text() {
    assert_eq!(score_text(Some(2), Some(1)), "2-1");
    assert_eq!(score_text(None, None), "-");
  }
}
