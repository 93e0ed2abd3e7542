//! Table row extraction
//!
//! The source site nests and duplicates tables unpredictably, so rows are
//! collected from the whole document rather than from one selected table.
//! Telling data rows apart from the rest is the classifier's job.

use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Raw cell texts of one `<tr>`, no semantic meaning attached yet.
pub type RawRow = Vec<String>;

static TR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static tr selector"));
static TD_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static td selector"));

/// Collect every `<tr>` in the document as a tuple of trimmed `<td>` texts.
///
/// Rows without a single `<td>` cell are skipped; the site builds its
/// header and spacer rows from `<th>` cells. Document order is preserved.
pub fn extract_rows(html: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);

    let mut rows = Vec::new();
    for row in document.select(&TR_SELECTOR) {
        let cells: RawRow = row
            .select(&TD_SELECTOR)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        if !cells.is_empty() {
            rows.push(cells);
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_rows_across_all_tables() {
        let html = r#"
            <html><body>
            <table><tr><td>a</td><td>b</td></tr></table>
            <div><table><tr><td>c</td></tr><tr><td>d</td></tr></table></div>
            </body></html>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["a", "b"]);
        assert_eq!(rows[1], vec!["c"]);
        assert_eq!(rows[2], vec!["d"]);
    }

    #[test]
    fn test_skips_rows_without_td_cells() {
        let html = r#"
            <table>
              <tr><th>Date</th><th>Match</th></tr>
              <tr><td>12/05/2024</td><td>A vs B</td></tr>
            </table>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "12/05/2024");
    }

    #[test]
    fn test_trims_cell_whitespace() {
        let html = "<table><tr><td>  Team A \n </td><td>\t18</td></tr></table>";
        let rows = extract_rows(html);
        assert_eq!(rows[0], vec!["Team A", "18"]);
    }

    #[test]
    fn test_nested_table_rows_are_enumerated_too() {
        let html = r#"
            <table>
              <tr><td>outer</td></tr>
              <tr><td><table><tr><td>inner-a</td><td>inner-b</td></tr></table></td></tr>
            </table>"#;
        let rows = extract_rows(html);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["outer"]);
        assert_eq!(rows[2], vec!["inner-a", "inner-b"]);
    }

    #[test]
    fn test_document_without_tables_yields_nothing() {
        assert!(extract_rows("<html><body><p>maintenance</p></body></html>").is_empty());
    }
}
