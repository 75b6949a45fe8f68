//! gridcalc-core - UI-agnostic sheet model and recalculation pipeline.

pub mod document;
pub mod error;

pub use document::{CellSnapshot, Sheet};
pub use error::{Result, SheetError};

pub use gridcalc_engine::engine::{CellRef, Status};
