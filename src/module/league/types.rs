//! League data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder tokens the site shows in the score column of a match that
/// has not been played yet.
const SCORE_PLACEHOLDERS: [&str; 4] = ["-", "--", "\u{2013}", "\u{2014}"];

/// One row from the league match calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Date string as displayed, e.g. "12/05/2024"
    pub date: String,
    /// Team pairing, e.g. "Team A vs Team B"
    pub teams: String,
    /// Score string, e.g. "3-2"; empty or a dash placeholder until played
    pub score: String,
}

impl MatchRecord {
    /// True while the score column still carries the not-yet-played marker.
    pub fn is_unplayed(&self) -> bool {
        let score = self.score.trim();
        score.is_empty() || SCORE_PLACEHOLDERS.contains(&score)
    }
}

/// One row from the league standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Position as displayed, pure digits, e.g. "4"
    pub position: String,
    pub team: String,
    pub points: String,
}

/// A full scrape of one data kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
    /// Accepted rows in document order
    pub records: Vec<T>,
}

impl<T> Snapshot<T> {
    /// Stamp a freshly scraped record set with the current time.
    pub fn now(records: Vec<T>) -> Self {
        Self {
            fetched_at: Utc::now(),
            records,
        }
    }
}

/// First match in document order that has not been played yet.
pub fn find_next_match(matches: &[MatchRecord]) -> Option<&MatchRecord> {
    matches.iter().find(|m| m.is_unplayed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, teams: &str, score: &str) -> MatchRecord {
        MatchRecord {
            date: date.to_string(),
            teams: teams.to_string(),
            score: score.to_string(),
        }
    }

    #[test]
    fn test_next_match_empty_input() {
        assert_eq!(find_next_match(&[]), None);
    }

    #[test]
    fn test_next_match_all_played() {
        let matches = vec![
            record("12/05/2024", "Team A vs Team B", "3-2"),
            record("19/05/2024", "Team C vs Team D", "0-5"),
        ];
        assert_eq!(find_next_match(&matches), None);
    }

    #[test]
    fn test_next_match_single_unplayed() {
        let matches = vec![
            record("12/05/2024", "Team A vs Team B", "3-2"),
            record("19/05/2024", "Team C vs Team D", ""),
        ];
        assert_eq!(find_next_match(&matches), Some(&matches[1]));
    }

    #[test]
    fn test_next_match_takes_first_in_document_order() {
        let matches = vec![
            record("12/05/2024", "Team A vs Team B", ""),
            record("19/05/2024", "Team C vs Team D", ""),
        ];
        assert_eq!(find_next_match(&matches), Some(&matches[0]));
    }

    #[test]
    fn test_dash_placeholders_mean_unplayed() {
        assert!(record("12/05/2024", "A vs B", "-").is_unplayed());
        assert!(record("12/05/2024", "A vs B", "--").is_unplayed());
        assert!(record("12/05/2024", "A vs B", "\u{2013}").is_unplayed());
        assert!(record("12/05/2024", "A vs B", " - ").is_unplayed());
        assert!(!record("12/05/2024", "A vs B", "3-2").is_unplayed());
    }
}
