//! Aligned plain-text rendering of a result set.
//!
//! Rendering is two-pass. `ResultTable::collect` consumes rows, numbers them
//! and measures every column; `ResultTable::to_text` lays the measured table
//! out. The table is serializable so the same value can back JSON output.
//!
//! Rows are pulled from the source at most `limit + 1` times. The extra row
//! is never displayed or measured: it only tells whether the source had more
//! rows than were shown.
//!
//! Control characters in headers and cells are shown escaped (`\n`, `\t`,
//! `\u{1b}`), so every row occupies exactly one line.

use serde::{Deserialize, Serialize};

/// Header of the synthetic row-number column.
pub const INDEX_HEADER: &str = "#";

/// Text displayed for a missing or NULL cell.
pub const NULL_TEXT: &str = "null";

/// A measured table ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Column headers: ["#", column1, column2, ...]
    pub headers: Vec<String>,
    /// Displayed rows, each starting with its 1-based row number
    pub rows: Vec<Vec<String>>,
    /// Display width of each column, header included
    pub widths: Vec<usize>,
    /// Rows pulled from the source, capped at `limit + 1`
    pub total_count: usize,
    /// Whether the source yielded more rows than were displayed
    pub has_more: bool,
}

impl ResultTable {
    /// Consume up to `limit + 1` rows and measure the first `limit` of them.
    ///
    /// Every row is expected to have one cell per entry in `column_names`.
    /// Short rows are completed with `null`, extra cells are dropped.
    pub fn collect<I, S>(rows: I, column_names: &[S], limit: usize) -> Self
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
        S: AsRef<str>,
    {
        let mut headers = Vec::with_capacity(column_names.len() + 1);
        headers.push(INDEX_HEADER.to_string());
        headers.extend(column_names.iter().map(|name| display_text(name.as_ref())));

        let mut widths: Vec<usize> = headers.iter().map(|h| text_width(h)).collect();
        let mut displayed = Vec::new();
        let mut total_count = 0;

        for row in rows.into_iter().take(limit.saturating_add(1)) {
            total_count += 1;
            if total_count > limit {
                // look-ahead row: counted, not shown
                break;
            }

            let mut values = row.into_iter();
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(total_count.to_string());
            for _ in column_names {
                let value = values.next().flatten();
                cells.push(value.map_or_else(|| NULL_TEXT.to_string(), |v| display_text(&v)));
            }

            for (width, cell) in widths.iter_mut().zip(&cells) {
                *width = (*width).max(text_width(cell));
            }
            displayed.push(cells);
        }

        ResultTable {
            headers,
            rows: displayed,
            widths,
            total_count,
            has_more: total_count > limit,
        }
    }

    /// Lay the table out: header line, then one line per displayed row.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, &self.headers, &self.widths);
        for row in &self.rows {
            push_line(&mut out, row, &self.widths);
        }
        out
    }

    /// Number of displayed (body) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no body rows are displayed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render `rows` under `column_names`, showing at most `limit` of them.
///
/// Returns the text and the number of rows pulled from the source, which is
/// at most `limit + 1`.
pub fn render<I, S>(rows: I, column_names: &[S], limit: usize) -> (String, usize)
where
    I: IntoIterator<Item = Vec<Option<String>>>,
    S: AsRef<str>,
{
    let table = ResultTable::collect(rows, column_names, limit);
    (table.to_text(), table.total_count)
}

/// `text` with control characters replaced by their escapes.
fn display_text(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

/// Width in characters, the same unit `{:<width$}` pads by.
fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(&format!(" {:<width$} ", cell, width = *width));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|c| c.map(|s| s.to_string())).collect()
    }

    fn people() -> Vec<Vec<Option<String>>> {
        vec![row(&[Some("Alice"), Some("30")]), row(&[Some("Bob"), None])]
    }

    fn numbered(count: usize) -> Vec<Vec<Option<String>>> {
        (0..count)
            .map(|i| vec![Some(format!("value-{}", i))])
            .collect()
    }

    #[test]
    fn test_people_example() {
        let (text, total) = render(people(), &["name", "age"], 10);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(total, 2);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], " #  name   age  ");
        assert_eq!(lines[1], " 1  Alice  30   ");
        assert_eq!(lines[2], " 2  Bob    null ");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_widths() {
        let table = ResultTable::collect(people(), &["name", "age"], 10);
        assert_eq!(table.widths, vec![1, 5, 4]);
        assert_eq!(table.headers, vec!["#", "name", "age"]);
        assert!(!table.has_more);
    }

    #[test]
    fn test_null_renders_as_text() {
        let table = ResultTable::collect(vec![row(&[None, None])], &["a", "b"], 5);
        assert_eq!(table.rows[0], vec!["1", "null", "null"]);
    }

    #[test]
    fn test_limit_truncates_body_and_counts_lookahead() {
        let (text, total) = render(numbered(3), &["v"], 1);
        assert_eq!(text.lines().count(), 2); // header + 1 body line
        assert_eq!(total, 2);

        let table = ResultTable::collect(numbered(3), &["v"], 1);
        assert_eq!(table.len(), 1);
        assert!(table.has_more);
    }

    #[test]
    fn test_lookahead_pulls_at_most_limit_plus_one() {
        let mut pulled = 0;
        let source = std::iter::repeat_with(|| {
            pulled += 1;
            vec![Some("x".to_string())]
        });
        let (_, total) = render(source, &["v"], 4);
        assert_eq!(total, 5);
        assert_eq!(pulled, 5);
    }

    #[test]
    fn test_body_lines_equal_min_of_limit_and_rows() {
        for rows in 0..6 {
            for limit in 0..6 {
                let table = ResultTable::collect(numbered(rows), &["v"], limit);
                assert_eq!(table.len(), rows.min(limit), "rows={} limit={}", rows, limit);
                assert_eq!(table.total_count, rows.min(limit + 1));
                assert_eq!(table.has_more, rows > limit);
                assert_eq!(table.to_text().lines().count(), rows.min(limit) + 1);
            }
        }
    }

    #[test]
    fn test_empty_source() {
        let rows: Vec<Vec<Option<String>>> = Vec::new();
        let (text, total) = render(rows, &["primary_title"], 100);
        assert_eq!(text, " #  primary_title \n");
        assert_eq!(total, 0);
    }

    #[test]
    fn test_zero_limit_shows_header_only() {
        let table = ResultTable::collect(numbered(2), &["v"], 0);
        assert!(table.is_empty());
        assert_eq!(table.total_count, 1);
        assert!(table.has_more);
        assert_eq!(table.to_text(), " #  v \n");
    }

    #[test]
    fn test_index_column_counts_from_one() {
        let table = ResultTable::collect(numbered(12), &["v"], 12);
        let indexes: Vec<&str> = table.rows.iter().map(|r| r[0].as_str()).collect();
        let expected: Vec<String> = (1..=12).map(|i| i.to_string()).collect();
        assert_eq!(indexes, expected);
        assert_eq!(table.widths[0], 2);
    }

    #[test]
    fn test_index_width_ignores_lookahead_row() {
        // nine rows shown, the tenth only counted
        let table = ResultTable::collect(numbered(10), &["v"], 9);
        assert_eq!(table.widths[0], 1);
        assert_eq!(table.total_count, 10);
    }

    #[test]
    fn test_lookahead_row_is_not_measured() {
        let rows = vec![row(&[Some("ab")]), row(&[Some("a much longer value")])];
        let table = ResultTable::collect(rows, &["col"], 1);
        assert_eq!(table.widths, vec![1, 3]);
    }

    #[test]
    fn test_every_field_is_padded_to_column_width() {
        let rows = vec![
            row(&[Some("Jaws"), Some("1975")]),
            row(&[Some("The Godfather"), None]),
            row(&[Some("E.T."), Some("1982")]),
        ];
        let table = ResultTable::collect(rows, &["title", "year"], 100);
        let text = table.to_text();

        let field_len: usize = table.widths.iter().map(|w| w + 2).sum();
        for line in text.lines() {
            assert_eq!(line.chars().count(), field_len);
        }
        assert!(text.contains(" Jaws          "));
        assert!(text.contains(" The Godfather "));
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        let rows = vec![row(&[Some("Amélie")])];
        let table = ResultTable::collect(rows, &["title"], 10);
        assert_eq!(table.widths[1], 6);
        assert_eq!(table.to_text().lines().nth(1).unwrap(), " 1  Amélie ");
    }

    #[test]
    fn test_ragged_rows_are_normalized() {
        let rows = vec![row(&[Some("only")]), row(&[Some("a"), Some("b"), Some("c")])];
        let table = ResultTable::collect(rows, &["x", "y"], 10);
        assert_eq!(table.rows[0], vec!["1", "only", "null"]);
        assert_eq!(table.rows[1], vec!["2", "a", "b"]);
    }

    #[test]
    fn test_line_breaks_in_cells_stay_on_one_line() {
        let rows = vec![row(&[Some("a\nb")]), row(&[Some("tab\there")])];
        let (text, total) = render(rows, &["v"], 10);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(total, 2);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], " 1  a\\nb      ");
        assert_eq!(lines[2], " 2  tab\\there ");
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(display_text("plain"), "plain");
        assert_eq!(display_text("a\r\nb"), "a\\r\\nb");
        assert_eq!(display_text("\u{1b}[1m"), "\\u{1b}[1m");

        let rows: Vec<Vec<Option<String>>> = Vec::new();
        let table = ResultTable::collect(rows, &["two\nlines"], 10);
        assert_eq!(table.headers[1], "two\\nlines");
        assert_eq!(table.to_text().lines().count(), 1);
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let first = render(people(), &["name", "age"], 1);
        let second = render(people(), &["name", "age"], 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_serializes_to_json() {
        let table = ResultTable::collect(people(), &["name", "age"], 10);
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["headers"][1], "name");
        assert_eq!(value["rows"][1][2], "null");
        assert_eq!(value["total_count"], 2);
        assert_eq!(value["has_more"], false);
    }
}
