//! UI-agnostic sheet model: grid ownership, the commit-edit pipeline, and
//! the dependency cascade.

mod ops;
mod state;

pub use state::{CellSnapshot, Sheet};
