//! Cell and grid data structures.
//!
//! [`Status`] classifies the outcome of a cell's last evaluation attempt,
//! [`Cell`] is one grid slot, and [`Grid`] is a fixed-size rectangular
//! collection of cells addressed by [`CellRef`].

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ast::Expr;
use super::cell_ref::CellRef;

/// Marker text displayed for incorrect and uncalculable cells.
pub const ERROR_MARKER: &str = "ERR";

/// Outcome classification of a cell's last evaluation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// No formula.
    Empty,
    /// The formula evaluated to a number.
    Calculable,
    /// The formula parsed but could not be evaluated (division by zero, a
    /// reference with no computable value, an unresolvable reference).
    Uncalculable,
    /// The formula failed the grammar check or closes a reference cycle.
    Incorrect,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Empty => "EMPTY",
            Status::Calculable => "CALCULABLE",
            Status::Uncalculable => "UNCALCULABLE",
            Status::Incorrect => "INCORRECT",
        };
        write!(f, "{}", name)
    }
}

/// A single grid slot: raw formula text, the cached parsed expression, and
/// the status/display pair left behind by the last recalculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    coord: CellRef,
    formula: String,
    #[serde(skip)]
    expr: Option<Expr>,
    status: Status,
    display: String,
}

impl Cell {
    fn new_empty(coord: CellRef) -> Cell {
        Cell {
            coord,
            formula: String::new(),
            expr: None,
            status: Status::Empty,
            display: String::new(),
        }
    }

    pub fn coord(&self) -> CellRef {
        self.coord
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Display text derived from the last pipeline run: empty for [`Status::Empty`],
    /// the numeric result as text for [`Status::Calculable`], [`ERROR_MARKER`] otherwise.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Replace the formula text and drop the cached expression. The new
    /// text is not validated here - that is the recalculation pipeline's job.
    pub fn replace_formula(&mut self, formula: &str) {
        self.formula = formula.to_string();
        self.expr = None;
    }

    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    pub fn cache_expr(&mut self, expr: Expr) {
        self.expr = Some(expr);
    }

    /// Record the outcome of a validation/evaluation pass.
    pub fn set_outcome(&mut self, status: Status, display: impl Into<String>) {
        self.status = status;
        self.display = display.into();
    }
}

/// A fixed-size rectangular grid of cells, all created empty.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Edge length of the default square grid.
    pub const DEFAULT_SIZE: usize = 9;

    pub fn new(rows: usize, cols: usize) -> Grid {
        let mut cells = Vec::with_capacity(rows.saturating_mul(cols));
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new_empty(CellRef::new(row, col)));
            }
        }
        Grid { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, at: CellRef) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: CellRef) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, at: CellRef) -> Option<&mut Cell> {
        self.index(at).map(|i| &mut self.cells[i])
    }

    /// Resolve an A1-style label to an in-bounds coordinate. Malformed and
    /// out-of-range labels both yield None.
    pub fn resolve(&self, label: &str) -> Option<CellRef> {
        CellRef::parse(label).filter(|at| self.contains(*at))
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = CellRef> + '_ {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| CellRef::new(row, col)))
    }

    fn index(&self, at: CellRef) -> Option<usize> {
        self.contains(at).then(|| at.row * self.cols + at.col)
    }
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(Grid::DEFAULT_SIZE, Grid::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.coords().count(), 12);
        for at in grid.coords() {
            let cell = grid.get(at).unwrap();
            assert_eq!(cell.status(), Status::Empty);
            assert_eq!(cell.formula(), "");
            assert!(cell.expr().is_none());
        }
    }

    #[test]
    fn resolve_checks_bounds() {
        let grid = Grid::default();
        assert_eq!(grid.resolve("A1"), Some(CellRef::new(0, 0)));
        assert_eq!(grid.resolve("I9"), Some(CellRef::new(8, 8)));
        // Column J and row 10 are outside the 9x9 grid.
        assert_eq!(grid.resolve("J1"), None);
        assert_eq!(grid.resolve("A10"), None);
        assert_eq!(grid.resolve("not a label"), None);
    }

    #[test]
    fn replace_formula_drops_cached_expression() {
        let mut grid = Grid::default();
        let at = CellRef::new(0, 0);
        let cell = grid.get_mut(at).unwrap();
        cell.cache_expr(Expr::Number(1.0));
        cell.replace_formula("2");
        assert!(cell.expr().is_none());
        assert_eq!(cell.formula(), "2");
    }
}
