//! Error types for gridcalc-core.

use thiserror::Error;

use gridcalc_engine::engine::{EvalError, ParseError};

/// Errors that can occur operating on a sheet.
///
/// Formula problems (syntax, cycles, division by zero, broken references)
/// never surface here - they resolve to a cell [`Status`] inside the
/// recalculation pipeline. These variants cover the remaining cases, mostly
/// a caller naming a cell the grid does not have.
///
/// [`Status`]: gridcalc_engine::engine::Status
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("no such cell: {0}")]
    UnknownCell(String),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, SheetError>;
