//! Prefix formula validation and parsing.
//!
//! Formulas are whitespace-separated tokens in prefix notation: an operator
//! followed by its two operands, e.g. `+ A1 * 2 B1` for A1 + (2 * B1).
//! Parsing scans the tokens right to left with a stack of built
//! sub-expressions; in prefix order an operator's operands are then already
//! on the stack when the operator itself is reached.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::ast::{Expr, Op};
use super::cell::Grid;
use super::cell_ref::CellRef;

/// Failures raised while building an expression tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A reference label is malformed or falls outside the grid.
    #[error("cannot resolve cell reference `{0}`")]
    UnknownCell(String),

    /// An operator found fewer than two operands on the stack.
    #[error("operator `{0}` is missing an operand")]
    MissingOperand(Op),

    /// The token stream did not reduce to exactly one expression.
    #[error("formula does not reduce to a single expression")]
    Unbalanced,

    /// A token matched none of number / reference / operator.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
}

/// Shape-check raw formula text against the grammar: whitespace-separated
/// tokens, each a signed/decimal number, a cell reference, or one of the
/// four operators. Only token *shape* is validated - arity and ordering are
/// not - so text like `1 2` passes here and fails at build time.
pub fn is_syntax_correct(formula: &str) -> bool {
    syntax_re().is_match(formula)
}

fn syntax_re() -> &'static Regex {
    static SYNTAX_RE: OnceLock<Regex> = OnceLock::new();
    SYNTAX_RE.get_or_init(|| {
        Regex::new(r"^([+-]?\d*\.?\d+|[A-Za-z]+\d+|[+*/-])(\s+([+-]?\d*\.?\d+|[A-Za-z]+\d+|[+*/-]))*$")
            .expect("formula grammar regex must compile")
    })
}

fn number_re() -> &'static Regex {
    static NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    NUMBER_RE.get_or_init(|| Regex::new(r"^[+-]?\d*\.?\d+$").expect("number regex must compile"))
}

fn reference_token_re() -> &'static Regex {
    static REFERENCE_TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    REFERENCE_TOKEN_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z]+\d+$").expect("reference token regex must compile"))
}

/// Build an expression tree from prefix-notation formula text.
///
/// Tokens are scanned right to left. Numbers and references push operands;
/// an operator pops two sub-expressions (the first popped is its left
/// operand) and pushes the combined node. Number classification runs before
/// operator classification, so signed tokens like `+5` parse as numbers.
///
/// Reference tokens are resolved against the grid immediately
/// ([`ParseError::UnknownCell`] for malformed or out-of-range labels), and
/// the referenced cell's own formula is parsed and cached on that cell if
/// it was not already, so shared sub-formulas are built once. A referenced
/// cell whose formula cannot be built is left uncached; the evaluator
/// reports it when the reference is reached.
///
/// Callers must run cycle detection first: parsing text whose reference
/// graph closes a cycle recurses without bound.
pub fn parse(formula: &str, grid: &mut Grid) -> Result<Expr, ParseError> {
    let tokens: Vec<&str> = formula.split_whitespace().collect();
    let mut stack: Vec<Expr> = Vec::new();

    for token in tokens.into_iter().rev() {
        if number_re().is_match(token) {
            let value = token
                .parse::<f64>()
                .map_err(|_| ParseError::UnexpectedToken(token.to_string()))?;
            stack.push(Expr::Number(value));
        } else if reference_token_re().is_match(token) {
            let at = grid
                .resolve(token)
                .ok_or_else(|| ParseError::UnknownCell(token.to_string()))?;
            cache_reference(at, grid);
            stack.push(Expr::Ref(at));
        } else if let Some(op) = Op::from_token(token) {
            let left = stack.pop().ok_or(ParseError::MissingOperand(op))?;
            let right = stack.pop().ok_or(ParseError::MissingOperand(op))?;
            stack.push(Expr::binary(op, left, right));
        } else {
            return Err(ParseError::UnexpectedToken(token.to_string()));
        }
    }

    let root = stack.pop().ok_or(ParseError::Unbalanced)?;
    if !stack.is_empty() {
        return Err(ParseError::Unbalanced);
    }
    Ok(root)
}

/// Memoize the referenced cell's expression. Failures are swallowed: a
/// reference to a cell with no buildable expression surfaces as an
/// evaluation error on the referencing formula, not a parse error.
fn cache_reference(at: CellRef, grid: &mut Grid) {
    let formula = match grid.get(at) {
        Some(cell) if cell.expr().is_none() && !cell.formula().is_empty() => {
            cell.formula().to_string()
        }
        _ => return,
    };
    if !is_syntax_correct(&formula) {
        return;
    }
    if let Ok(expr) = parse(&formula, grid) {
        if let Some(cell) = grid.get_mut(at) {
            cell.cache_expr(expr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseError, is_syntax_correct, parse};
    use crate::engine::{Expr, Grid, Op};

    #[test]
    fn grammar_accepts_numbers_references_and_operators() {
        for formula in ["+ 1 2", "* + 1 2 3", "A1", "/ B2 -3.5", "+.5 .5", "- +2 1"] {
            assert!(is_syntax_correct(formula), "expected `{}` to pass", formula);
        }
    }

    #[test]
    fn grammar_rejects_malformed_tokens() {
        for formula in ["1 ++ 2", "1 & 2", "A", "1A", "3.", "", " ", "+ 1 2 x"] {
            assert!(!is_syntax_correct(formula), "expected `{}` to fail", formula);
        }
    }

    #[test]
    fn grammar_checks_shape_only() {
        // No operators, operator-heavy: shape-valid, arity-invalid.
        assert!(is_syntax_correct("1 2 3"));
        assert!(is_syntax_correct("+ +"));
    }

    #[test]
    fn builds_literal_trees() {
        let mut grid = Grid::default();
        let expr = parse("+ 1 2", &mut grid).unwrap();
        assert_eq!(
            expr,
            Expr::binary(Op::Add, Expr::Number(1.0), Expr::Number(2.0))
        );
    }

    #[test]
    fn prefix_order_assigns_left_then_right() {
        let mut grid = Grid::default();
        let expr = parse("- 5 2", &mut grid).unwrap();
        let Expr::Binary { op, left, right } = expr else {
            panic!("expected a binary node");
        };
        assert_eq!(op, Op::Sub);
        assert_eq!(*left, Expr::Number(5.0));
        assert_eq!(*right, Expr::Number(2.0));
    }

    #[test]
    fn signed_tokens_are_numbers_not_operators() {
        let mut grid = Grid::default();
        let expr = parse("+ +1 -2", &mut grid).unwrap();
        assert_eq!(
            expr,
            Expr::binary(Op::Add, Expr::Number(1.0), Expr::Number(-2.0))
        );
    }

    #[test]
    fn reference_tokens_resolve_and_memoize() {
        let mut grid = Grid::default();
        let a1 = grid.resolve("A1").unwrap();
        grid.get_mut(a1).unwrap().replace_formula("7");

        let expr = parse("* A1 2", &mut grid).unwrap();
        let Expr::Binary { left, .. } = expr else {
            panic!("expected a binary node");
        };
        assert_eq!(*left, Expr::Ref(a1));
        // The referenced cell's own formula was parsed and cached.
        assert_eq!(grid.get(a1).unwrap().expr(), Some(&Expr::Number(7.0)));
    }

    #[test]
    fn unparsable_reference_target_is_left_uncached() {
        let mut grid = Grid::default();
        let a1 = grid.resolve("A1").unwrap();
        grid.get_mut(a1).unwrap().replace_formula("1 ++ 2");

        // The outer parse still succeeds; A1 just has no expression.
        let expr = parse("A1", &mut grid).unwrap();
        assert_eq!(expr, Expr::Ref(a1));
        assert!(grid.get(a1).unwrap().expr().is_none());
    }

    #[test]
    fn out_of_range_reference_fails() {
        let mut grid = Grid::default();
        assert_eq!(
            parse("Z99", &mut grid),
            Err(ParseError::UnknownCell("Z99".to_string()))
        );
    }

    #[test]
    fn operator_underflow_is_reported() {
        let mut grid = Grid::default();
        assert_eq!(
            parse("+ 1", &mut grid),
            Err(ParseError::MissingOperand(Op::Add))
        );
    }

    #[test]
    fn leftover_operands_are_reported() {
        let mut grid = Grid::default();
        assert_eq!(parse("1 2", &mut grid), Err(ParseError::Unbalanced));
        assert_eq!(parse("", &mut grid), Err(ParseError::Unbalanced));
    }
}
