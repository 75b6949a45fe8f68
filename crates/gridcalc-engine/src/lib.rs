//! gridcalc-engine - formula engine for the gridcalc spreadsheet.

pub mod engine;
