//! Whitespace-aligned table detection.
//!
//! Text-layer extraction flattens ruled tables into lines whose cells are
//! separated by runs of two or more spaces (or tabs). Consecutive lines with
//! the same column count are grouped into one table. This recovers simple
//! specification tables; anything fancier (merged cells, ragged rows) is
//! left as plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use honyaku_core::Table;

static CELL_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}|\t+").expect("valid regex"));

/// Minimum rows for a group of aligned lines to count as a table.
const MIN_ROWS: usize = 2;

/// Detect tables in page text. Returns the recovered row/cell grids.
pub fn detect_tables(text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<Option<String>>> = Vec::new();
    let mut current_cols = 0usize;

    for line in text.lines() {
        let cells = split_cells(line);
        match cells {
            Some(row) if current.is_empty() => {
                current_cols = row.len();
                current.push(row);
            }
            Some(row) if row.len() == current_cols => {
                current.push(row);
            }
            _ => {
                flush(&mut tables, &mut current);
                // A differently-shaped table row starts a new candidate
                if let Some(row) = split_cells(line) {
                    current_cols = row.len();
                    current.push(row);
                }
            }
        }
    }
    flush(&mut tables, &mut current);

    tables
}

fn flush(tables: &mut Vec<Table>, current: &mut Vec<Vec<Option<String>>>) {
    if current.len() >= MIN_ROWS {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Split a line into table cells. Returns `None` for lines that do not look
/// like table rows (fewer than two separator-delimited cells).
fn split_cells(line: &str) -> Option<Vec<Option<String>>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cells: Vec<Option<String>> = CELL_SEPARATOR
        .split(trimmed)
        .map(|c| {
            let c = c.trim();
            if c.is_empty() {
                None
            } else {
                Some(c.to_string())
            }
        })
        .collect();
    if cells.len() >= 2 { Some(cells) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_aligned_rows() {
        let text = "Model    Capacity    Weight\nP-100    120 L/min   45 kg\nP-200    240 L/min   78 kg";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 3);
        assert_eq!(tables[0][1][0].as_deref(), Some("P-100"));
        assert_eq!(tables[0][2][2].as_deref(), Some("78 kg"));
    }

    #[test]
    fn single_aligned_line_is_not_a_table() {
        let tables = detect_tables("Name    Value\nThis is a normal sentence.");
        assert!(tables.is_empty());
    }

    #[test]
    fn prose_is_not_a_table() {
        let tables = detect_tables("The pump shall be installed\nindoors, away from dust.");
        assert!(tables.is_empty());
    }

    #[test]
    fn column_count_change_splits_tables() {
        let text = "a  b\nc  d\nx  y  z\nu  v  w";
        let tables = detect_tables(text);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0][0].len(), 2);
        assert_eq!(tables[1][0].len(), 3);
    }

    #[test]
    fn tab_separated_cells() {
        let tables = detect_tables("k1\tv1\nk2\tv2");
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0][0][1].as_deref(), Some("v1"));
    }
}
