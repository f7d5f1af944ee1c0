//! Local CSV handling: split text into rows, then rows into entries.
//!
//! This is deliberately not a CSV dialect parser. Quotes, escapes and
//! multi-line fields are not recognised; the structural validator on the
//! bridge side is responsible for rejecting files that need them.

use crate::domain::model::{Entry, Row};
use regex::Regex;
use std::sync::LazyLock;

pub const FIELD_SEPARATOR: char = ',';

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading number pattern is valid")
});

/// Split on newlines, then on the field separator, trimming every cell.
/// Rows with no non-empty cell are dropped; order follows the input lines.
pub fn parse_rows(text: &str) -> Vec<Row> {
    text.split('\n')
        .map(split_line)
        .filter(|row| !row.is_blank())
        .collect()
}

/// True for a line that `parse_rows` would drop.
pub fn is_blank_line(line: &str) -> bool {
    split_line(line).is_blank()
}

fn split_line(line: &str) -> Row {
    line.split(FIELD_SEPARATOR)
        .map(|cell| cell.trim().to_string())
        .collect()
}

/// Map rows positionally into entries, skipping the header row.
///
/// Short rows fill missing positions with defaults, so no row is rejected and
/// the output length is always `rows.len() - 1` (or zero).
pub fn normalize(rows: &[Row]) -> Vec<Entry> {
    rows.iter()
        .skip(1)
        .map(|row| Entry {
            date: row.cell(0).unwrap_or_default().to_string(),
            metric: row.cell(1).unwrap_or_default().to_string(),
            value: row.cell(2).map(numeric_parse).unwrap_or(0.0),
            unit: row
                .cell(3)
                .filter(|unit| !unit.is_empty())
                .map(str::to_string),
        })
        .collect()
}

/// Parse the leading numeric prefix of a cell (`"12kg"` is 12).
/// Anything without a usable finite number becomes 0.
pub fn numeric_parse(cell: &str) -> f64 {
    let Some(found) = LEADING_NUMBER.find(cell.trim_start()) else {
        return 0.0;
    };

    match found.as_str().parse::<f64>() {
        // -0 collapses to 0 as well
        Ok(value) if value.is_finite() && value != 0.0 => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn test_parse_and_normalize_basic_file() {
        let rows = parse_rows("date,metric,value,unit\n2024-01-01,sales,100,usd\n\n");
        assert_eq!(rows.len(), 2);

        let entries = normalize(&rows);
        assert_eq!(
            entries,
            vec![Entry {
                date: "2024-01-01".to_string(),
                metric: "sales".to_string(),
                value: 100.0,
                unit: Some("usd".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_rows_trims_and_drops_blank_rows() {
        let rows = parse_rows("  a , b ,c\r\n , ,\n\n,,,\nd,,\n");
        assert_eq!(rows, vec![row(&["a", "b", "c"]), row(&["d", "", ""])]);
        assert!(rows.iter().all(|r| !r.is_blank()));
    }

    #[test]
    fn test_blank_line_detection_matches_rows() {
        for line in ["", "   ", ",,", " , ,\r", "\t,"] {
            assert!(is_blank_line(line), "line {:?}", line);
        }
        for line in ["a", ",,x", " 0 ,"] {
            assert!(!is_blank_line(line), "line {:?}", line);
        }
    }

    #[test]
    fn test_parse_rows_keeps_line_order() {
        let rows = parse_rows("h\n3\n1\n2");
        let firsts: Vec<&str> = rows.iter().filter_map(|r| r.cell(0)).collect();
        assert_eq!(firsts, vec!["h", "3", "1", "2"]);
    }

    #[test]
    fn test_parse_rows_empty_input() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("\n\n  \n").is_empty());
    }

    #[test]
    fn test_normalize_drops_header_only() {
        assert!(normalize(&[]).is_empty());
        assert!(normalize(&[row(&["date", "metric", "value", "unit"])]).is_empty());

        let rows = vec![row(&["h"]), row(&["a"]), row(&["b"]), row(&["c"])];
        assert_eq!(normalize(&rows).len(), rows.len() - 1);
    }

    #[test]
    fn test_normalize_fills_short_rows_with_defaults() {
        let rows = vec![
            row(&["date", "metric", "value", "unit"]),
            row(&["2024-02-01"]),
            row(&["2024-02-02", "steps", "9000"]),
            row(&["2024-02-03", "water", "2", ""]),
        ];
        let entries = normalize(&rows);

        assert_eq!(entries[0].date, "2024-02-01");
        assert_eq!(entries[0].metric, "");
        assert_eq!(entries[0].value, 0.0);
        assert_eq!(entries[0].unit, None);

        assert_eq!(entries[1].value, 9000.0);
        assert_eq!(entries[1].unit, None);

        assert_eq!(entries[2].unit, None);
    }

    #[test]
    fn test_normalize_ignores_extra_cells() {
        let rows = vec![row(&["h"]), row(&["d", "m", "1.5", "kg", "note"])];
        let entries = normalize(&rows);
        assert_eq!(entries[0].value, 1.5);
        assert_eq!(entries[0].unit.as_deref(), Some("kg"));
    }

    #[test]
    fn test_numeric_parse_defaults_to_zero() {
        assert_eq!(numeric_parse("100"), 100.0);
        assert_eq!(numeric_parse("-3.25"), -3.25);
        assert_eq!(numeric_parse("+7"), 7.0);
        assert_eq!(numeric_parse(".5"), 0.5);
        assert_eq!(numeric_parse("5."), 5.0);
        assert_eq!(numeric_parse("1e3"), 1000.0);
        assert_eq!(numeric_parse("12kg"), 12.0);
        assert_eq!(numeric_parse("1e"), 1.0);

        for junk in ["", "abc", "NaN", "Infinity", "-", ".", "kg12", "1e400", "-0"] {
            let value = numeric_parse(junk);
            assert_eq!(value, 0.0, "cell {:?}", junk);
            assert!(value.is_finite());
        }
    }
}
