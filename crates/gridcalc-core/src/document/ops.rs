use std::collections::HashSet;

use gridcalc_engine::engine::{
    CellRef, ERROR_MARKER, Status, detect_cycle, evaluate, extract_references, is_syntax_correct,
    parse,
};

use super::state::{CellSnapshot, Sheet};
use crate::error::{Result, SheetError};

impl Sheet {
    /// Commit a formula edit and run the full recalculation pipeline:
    /// validate, cycle-check, parse, evaluate, then cascade to every cell
    /// that directly or transitively references the edited one. Returns the
    /// edited cell's resulting snapshot.
    ///
    /// Every formula outcome - empty text, syntax errors, reference cycles,
    /// division by zero, broken references - lands in the cell's status and
    /// display text. Err is returned only when `at` lies outside the grid.
    pub fn commit_edit(&mut self, at: CellRef, formula: &str) -> Result<CellSnapshot> {
        let cell = self
            .grid
            .get_mut(at)
            .ok_or_else(|| SheetError::UnknownCell(at.to_string()))?;
        cell.replace_formula(formula);

        self.refresh(at);

        let mut visited = HashSet::from([at]);
        let status = self.status_of(at);
        self.cascade(at, status, &mut visited);

        self.snapshot(at)
            .ok_or_else(|| SheetError::UnknownCell(at.to_string()))
    }

    /// Label-accepting convenience over [`Sheet::commit_edit`].
    pub fn commit_edit_at(&mut self, label: &str, formula: &str) -> Result<CellSnapshot> {
        let at = self
            .resolve(label)
            .ok_or_else(|| SheetError::UnknownCell(label.to_string()))?;
        self.commit_edit(at, formula)
    }

    /// Re-run validation and evaluation for one cell against its current
    /// formula text, recording status and display text.
    fn refresh(&mut self, at: CellRef) {
        let Some(cell) = self.grid.get(at) else {
            return;
        };
        let formula = cell.formula().to_string();

        let (status, display) = if formula.is_empty() {
            (Status::Empty, String::new())
        } else if !is_syntax_correct(&formula) {
            (Status::Incorrect, ERROR_MARKER.to_string())
        } else if detect_cycle(at, &self.grid).is_some() {
            (Status::Incorrect, ERROR_MARKER.to_string())
        } else {
            match self.refresh_value(at, &formula) {
                Ok(value) => (Status::Calculable, value.to_string()),
                Err(_) => (Status::Uncalculable, ERROR_MARKER.to_string()),
            }
        };

        if let Some(cell) = self.grid.get_mut(at) {
            cell.set_outcome(status, display);
        }
    }

    /// Evaluate one cell, parsing its formula first unless an expression is
    /// already cached.
    fn refresh_value(&mut self, at: CellRef, formula: &str) -> Result<f64> {
        let expr = match self.grid.get(at).and_then(|cell| cell.expr()).cloned() {
            Some(expr) => expr,
            None => {
                let expr = parse(formula, &mut self.grid)?;
                if let Some(cell) = self.grid.get_mut(at) {
                    cell.cache_expr(expr.clone());
                }
                expr
            }
        };
        Ok(evaluate(&expr, &self.grid)?)
    }

    /// Recompute every cell whose formula text references `origin`, then
    /// recurse from each updated dependent with that dependent's resulting
    /// status. The visited set is scoped to one committed edit, so each
    /// cell is reprocessed at most once even under diamond dependencies.
    ///
    /// When the just-updated cell ended [`Status::Uncalculable`], dependents
    /// are forced straight to the same status without re-running their own
    /// parse/evaluate.
    fn cascade(&mut self, origin: CellRef, origin_status: Status, visited: &mut HashSet<CellRef>) {
        let coords: Vec<CellRef> = self.grid.coords().collect();
        for at in coords {
            if visited.contains(&at) || !self.references(at, origin) {
                continue;
            }
            visited.insert(at);

            if origin_status == Status::Uncalculable {
                if let Some(cell) = self.grid.get_mut(at) {
                    cell.set_outcome(Status::Uncalculable, ERROR_MARKER);
                }
            } else {
                self.refresh(at);
            }

            let status = self.status_of(at);
            self.cascade(at, status, visited);
        }
    }

    /// Whether `from`'s current formula text contains a reference to `to`.
    fn references(&self, from: CellRef, to: CellRef) -> bool {
        let Some(cell) = self.grid.get(from) else {
            return false;
        };
        extract_references(cell.formula())
            .iter()
            .any(|label| self.grid.resolve(label) == Some(to))
    }

    fn status_of(&self, at: CellRef) -> Status {
        self.grid
            .get(at)
            .map(|cell| cell.status())
            .unwrap_or(Status::Empty)
    }
}
