use gridcalc_engine::engine::{CellRef, Grid, Status};
use serde::Serialize;

/// Read-only view of one cell for presentation code.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellSnapshot {
    /// Raw formula text as last committed.
    pub formula: String,
    pub status: Status,
    /// Rendered value: empty, the numeric result as text, or an error marker.
    pub display: String,
}

/// UI-agnostic sheet state.
///
/// The sheet owns the grid and is its only writer: edits enter through
/// [`Sheet::commit_edit`], which runs the whole recalculation pipeline and
/// its cascade to completion before returning. Presentation code reads
/// cells back as [`CellSnapshot`]s and never mutates cell state directly.
pub struct Sheet {
    pub(crate) grid: Grid,
}

impl Sheet {
    /// Create a sheet with the given grid dimensions, all cells empty.
    pub fn new(rows: usize, cols: usize) -> Sheet {
        Sheet {
            grid: Grid::new(rows, cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// Resolve an A1-style label to a coordinate inside this sheet.
    pub fn resolve(&self, label: &str) -> Option<CellRef> {
        self.grid.resolve(label)
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellRef> + '_ {
        self.grid.coords()
    }

    /// Snapshot one cell, or None outside the grid.
    pub fn snapshot(&self, at: CellRef) -> Option<CellSnapshot> {
        self.grid.get(at).map(|cell| CellSnapshot {
            formula: cell.formula().to_string(),
            status: cell.status(),
            display: cell.display().to_string(),
        })
    }
}

impl Default for Sheet {
    fn default() -> Sheet {
        Sheet {
            grid: Grid::default(),
        }
    }
}
