//! Expression evaluation.
//!
//! A pure recursive walk over [`Expr`] trees; the grid is read, never
//! mutated. Reference nodes are chased through the target cell's *cached*
//! expression, so a dependent always observes whatever the target currently
//! holds. Arithmetic is plain IEEE double precision; the only special case
//! is the explicit division-by-zero check.

use thiserror::Error;

use super::ast::{Expr, Op};
use super::cell::Grid;
use super::cell_ref::CellRef;

/// Failures raised while evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The referenced cell has no evaluable expression: it is empty,
    /// incorrect, or its formula was never successfully parsed.
    #[error("cell {0} has no computable value")]
    NoValue(CellRef),

    /// Division with a right operand of exactly zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluate an expression against the grid.
pub fn evaluate(expr: &Expr, grid: &Grid) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Ref(at) => {
            let target = grid.get(*at).ok_or(EvalError::NoValue(*at))?;
            let target_expr = target.expr().ok_or(EvalError::NoValue(*at))?;
            evaluate(target_expr, grid)
        }
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, grid)?;
            let right = evaluate(right, grid)?;
            match op {
                Op::Add => Ok(left + right),
                Op::Sub => Ok(left - right),
                Op::Mul => Ok(left * right),
                Op::Div => {
                    if right == 0.0 {
                        Err(EvalError::DivisionByZero)
                    } else {
                        Ok(left / right)
                    }
                }
            }
        }
    }
}
