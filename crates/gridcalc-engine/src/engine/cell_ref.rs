//! Cell reference parsing and formatting.
//!
//! Bidirectional conversion between A1-style labels (e.g. "A1", "B3",
//! "AA10") and zero-indexed row/column coordinates. Columns are letters in
//! base 26, rows are 1-based digits.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A cell coordinate: 0-indexed row and column.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn label_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE
        .get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("cell label regex must compile"))
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse an A1-style label ("A1", "b3", "AA10"). Returns None for
    /// malformed labels, row `0`, and coordinates that overflow `usize`.
    /// Bounds against a concrete grid are the caller's concern.
    pub fn parse(label: &str) -> Option<CellRef> {
        let caps = label_re().captures(label)?;

        let mut col = 0usize;
        for b in caps[1].to_ascii_uppercase().bytes() {
            let digit = (b - b'A') as usize + 1;
            col = col.checked_mul(26)?.checked_add(digit)?;
        }
        let col = col.checked_sub(1)?;
        let row = caps[2].parse::<usize>().ok()?.checked_sub(1)?;

        Some(CellRef { row, col })
    }

    /// Render a column index as letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_letters(col: usize) -> String {
        let mut letters = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn parses_single_letter_labels() {
        let at = CellRef::parse("B3").unwrap();
        assert_eq!(at.row, 2);
        assert_eq!(at.col, 1);
    }

    #[test]
    fn parses_lowercase_and_multi_letter_labels() {
        assert_eq!(CellRef::parse("b3"), CellRef::parse("B3"));
        let at = CellRef::parse("AA10").unwrap();
        assert_eq!(at.col, 26);
        assert_eq!(at.row, 9);
    }

    #[test]
    fn rejects_malformed_labels() {
        assert!(CellRef::parse("").is_none());
        assert!(CellRef::parse("A").is_none());
        assert!(CellRef::parse("1").is_none());
        assert!(CellRef::parse("1A").is_none());
        assert!(CellRef::parse("A1B").is_none());
        // Rows are 1-based; there is no row 0.
        assert!(CellRef::parse("A0").is_none());
    }

    #[test]
    fn overflowing_label_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(CellRef::parse(&huge).is_none());
    }

    #[test]
    fn display_round_trips() {
        for label in ["A1", "I9", "Z10", "AA1"] {
            let at = CellRef::parse(label).unwrap();
            assert_eq!(at.to_string(), label);
        }
    }
}
