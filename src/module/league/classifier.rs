//! Row classification heuristics
//!
//! The scraped pages carry an unknown mix of layout tables, ads, and real
//! data. Each raw row is judged locally: either it satisfies the rule for
//! the requested data kind and maps to a typed record, or it is dropped as
//! noise. No cross-row validation happens; duplicate rows are all kept.

use regex::Regex;
use std::sync::LazyLock;

use super::extractor::{RawRow, extract_rows};
use super::types::{MatchRecord, RankingEntry};

/// Positions must be pure digits; rejects header cells like "Pos." or "1er".
static POSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("position regex"));

/// Calendar rule.
///
/// The date cell must contain at least one digit and the pairing cell must
/// be long enough to actually name two teams; anything else is a header,
/// an ad, or an unrelated table sharing the page.
pub fn match_rule(row: &RawRow) -> Option<MatchRecord> {
    if row.len() < 3 {
        return None;
    }

    let date = &row[0];
    let teams = &row[1];

    if !date.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if teams.chars().count() <= 3 {
        return None;
    }

    Some(MatchRecord {
        date: date.clone(),
        teams: teams.clone(),
        score: row[2].clone(),
    })
}

/// Ranking rule: the position cell must match `^\d+$` exactly; team and
/// points are taken verbatim.
pub fn ranking_rule(row: &RawRow) -> Option<RankingEntry> {
    if row.len() < 3 {
        return None;
    }
    if !POSITION_RE.is_match(&row[0]) {
        return None;
    }

    Some(RankingEntry {
        position: row[0].clone(),
        team: row[1].clone(),
        points: row[2].clone(),
    })
}

/// Run one rule over all raw rows, keeping accepted records in input order.
///
/// Both data kinds share this driver; only the rule differs.
pub fn classify_rows<T>(rows: &[RawRow], rule: impl Fn(&RawRow) -> Option<T>) -> Vec<T> {
    rows.iter().filter_map(rule).collect()
}

/// Extract and classify a calendar page.
pub fn parse_calendar(html: &str) -> Vec<MatchRecord> {
    classify_rows(&extract_rows(html), match_rule)
}

/// Extract and classify a ranking page.
pub fn parse_ranking(html: &str) -> Vec<RankingEntry> {
    classify_rows(&extract_rows(html), ranking_rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_calendar_accepts_played_match() {
        let record = match_rule(&row(&["12/05/2024", "Team A vs Team B", "3-2"])).unwrap();
        assert_eq!(record.date, "12/05/2024");
        assert_eq!(record.teams, "Team A vs Team B");
        assert_eq!(record.score, "3-2");
    }

    #[test]
    fn test_calendar_rejects_dateless_first_cell() {
        assert!(match_rule(&row(&["Date", "Team A vs Team B", "3-2"])).is_none());
    }

    #[test]
    fn test_calendar_rejects_placeholder_pairing_cell() {
        assert!(match_rule(&row(&["12/05/2024", "vs", ""])).is_none());
        assert!(match_rule(&row(&["12/05/2024", "", "3-2"])).is_none());
    }

    #[test]
    fn test_calendar_requires_three_cells() {
        assert!(match_rule(&row(&["12/05/2024", "Team A vs Team B"])).is_none());
    }

    #[test]
    fn test_ranking_accepts_exact_digit_position() {
        let entry = ranking_rule(&row(&["4", "Team C", "18"])).unwrap();
        assert_eq!(entry.position, "4");
        assert_eq!(entry.team, "Team C");
        assert_eq!(entry.points, "18");
    }

    #[test]
    fn test_ranking_rejects_decorated_positions() {
        assert!(ranking_rule(&row(&["Pos.", "Team C", "18"])).is_none());
        assert!(ranking_rule(&row(&["1er", "Team C", "18"])).is_none());
        assert!(ranking_rule(&row(&["", "Team C", "18"])).is_none());
    }

    #[test]
    fn test_header_row_rejected_by_both_rules() {
        let header = row(&["Pos", "Team", "Pts"]);
        assert!(match_rule(&header).is_none());
        assert!(ranking_rule(&header).is_none());
    }

    #[test]
    fn test_classification_preserves_document_order() {
        let rows = vec![
            row(&["1", "Team A", "20"]),
            row(&["Publicité", "ad banner", ""]),
            row(&["2", "Team B", "18"]),
            row(&["3", "Team C", "15"]),
        ];
        let entries = classify_rows(&rows, ranking_rule);
        let positions: Vec<&str> = entries.iter().map(|e| e.position.as_str()).collect();
        assert_eq!(positions, ["1", "2", "3"]);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let rows = vec![
            row(&["12/05/2024", "Team A vs Team B", ""]),
            row(&["Date", "header", ""]),
        ];
        assert_eq!(classify_rows(&rows, match_rule), classify_rows(&rows, match_rule));
    }

    #[test]
    fn test_duplicate_rows_are_all_kept() {
        let rows = vec![row(&["5", "Team D", "9"]), row(&["5", "Team D", "9"])];
        assert_eq!(classify_rows(&rows, ranking_rule).len(), 2);
    }

    #[test]
    fn test_parse_calendar_end_to_end() {
        let html = r#"
            <html><body>
            <table>
              <tr><th>Date</th><th>Match</th><th>Score</th></tr>
              <tr><td>12/05/2024</td><td>Team A vs Team B</td><td>3-2</td></tr>
              <tr><td>19/05/2024</td><td>Team C vs Team D</td><td></td></tr>
            </table>
            <table><tr><td>Sponsored</td><td>ad</td><td></td></tr></table>
            </body></html>"#;
        let matches = parse_calendar(html);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].teams, "Team A vs Team B");
        assert_eq!(matches[0].score, "3-2");
        assert!(matches[1].score.is_empty());
    }

    #[test]
    fn test_parse_ranking_end_to_end() {
        let html = r#"
            <table>
              <tr><td>Pos</td><td>Team</td><td>Pts</td></tr>
              <tr><td>4</td><td>Team C</td><td>18</td></tr>
            </table>"#;
        let entries = parse_ranking(html);
        assert_eq!(
            entries,
            vec![RankingEntry {
                position: "4".to_string(),
                team: "Team C".to_string(),
                points: "18".to_string(),
            }]
        );
    }
}
