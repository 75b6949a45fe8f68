//! Cell reference extraction from formula text.
//!
//! The dependency relation between cells is never stored; it is rediscovered
//! on demand by scanning formula text for reference-shaped tokens. Both the
//! cycle detector and the recalculation cascade scan this way, so cells
//! whose expressions were never built (or whose formulas are invalid) still
//! participate in the dependency graph.

use std::sync::OnceLock;

use regex::Regex;

/// Find every reference-shaped substring (letters followed by digits) in a
/// formula. Labels are returned as written; callers resolve them against a
/// grid and skip the ones that fall outside it.
pub fn extract_references(formula: &str) -> Vec<&str> {
    reference_re().find_iter(formula).map(|m| m.as_str()).collect()
}

fn reference_re() -> &'static Regex {
    static REFERENCE_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z]+[0-9]+\b").expect("cell reference regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::extract_references;

    #[test]
    fn finds_references_between_other_tokens() {
        assert_eq!(extract_references("+ A1 * 2 B12"), vec!["A1", "B12"]);
    }

    #[test]
    fn repeated_references_are_reported_each_time() {
        assert_eq!(extract_references("+ A1 A1"), vec!["A1", "A1"]);
    }

    #[test]
    fn plain_numbers_and_operators_are_not_references() {
        assert!(extract_references("+ 1 2.5").is_empty());
        assert!(extract_references("").is_empty());
    }

    #[test]
    fn scans_syntactically_invalid_text() {
        // The cascade scans whatever text a cell holds, valid or not.
        assert_eq!(extract_references("A1 ++"), vec!["A1"]);
    }
}
