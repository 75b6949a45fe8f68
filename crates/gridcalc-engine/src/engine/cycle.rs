//! Circular reference detection.
//!
//! A formula must not, directly or through other cells, lead back to a cell
//! already being evaluated. Detection walks formula *text* rather than
//! parsed expressions: references in each visited formula are rediscovered
//! by scanning, so cells whose expressions were never built still count.
//! The walk is a path-marking DFS - a coordinate is removed from the set
//! when its subtree is done - so diamond-shaped reference graphs are not
//! reported as cycles. This check must run before a newly edited formula is
//! parsed or evaluated; expression trees carry no cycle protection of their
//! own.

use std::collections::HashSet;

use super::cell::Grid;
use super::cell_ref::CellRef;
use super::deps::extract_references;

/// Check whether evaluating `start` would recurse into a reference cycle.
/// Returns the visited path up to and including the repeated coordinate,
/// or None when the reference graph below `start` is cycle-free.
pub fn detect_cycle(start: CellRef, grid: &Grid) -> Option<Vec<CellRef>> {
    let mut visiting = HashSet::new();
    let mut path = Vec::new();

    if walk(start, grid, &mut visiting, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn walk(
    current: CellRef,
    grid: &Grid,
    visiting: &mut HashSet<CellRef>,
    path: &mut Vec<CellRef>,
) -> bool {
    if visiting.contains(&current) {
        path.push(current);
        return true;
    }
    let Some(cell) = grid.get(current) else {
        return false;
    };

    visiting.insert(current);
    path.push(current);

    for label in extract_references(cell.formula()) {
        if let Some(next) = grid.resolve(label) {
            if walk(next, grid, visiting, path) {
                return true;
            }
        }
    }

    path.pop();
    visiting.remove(&current);
    false
}

#[cfg(test)]
mod tests {
    use super::detect_cycle;
    use crate::engine::{CellRef, Grid};

    fn set(grid: &mut Grid, label: &str, formula: &str) -> CellRef {
        let at = grid.resolve(label).unwrap();
        grid.get_mut(at).unwrap().replace_formula(formula);
        at
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let mut grid = Grid::default();
        let a1 = set(&mut grid, "A1", "+ A1 1");
        assert!(detect_cycle(a1, &grid).is_some());
    }

    #[test]
    fn two_cell_cycle_is_detected_from_either_end() {
        let mut grid = Grid::default();
        let a1 = set(&mut grid, "A1", "B1");
        let b1 = set(&mut grid, "B1", "A1");
        assert!(detect_cycle(a1, &grid).is_some());
        assert!(detect_cycle(b1, &grid).is_some());
    }

    #[test]
    fn cycle_reachable_below_the_start_is_detected() {
        let mut grid = Grid::default();
        let a1 = set(&mut grid, "A1", "B1");
        set(&mut grid, "B1", "C1");
        set(&mut grid, "C1", "B1");
        assert!(detect_cycle(a1, &grid).is_some());
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut grid = Grid::default();
        set(&mut grid, "A1", "1");
        set(&mut grid, "B1", "A1");
        set(&mut grid, "C1", "A1");
        let d1 = set(&mut grid, "D1", "+ B1 C1");
        assert!(detect_cycle(d1, &grid).is_none());
    }

    #[test]
    fn unresolvable_references_are_skipped() {
        let mut grid = Grid::default();
        // Z99 is outside the 9x9 grid; nothing to recurse into.
        let a1 = set(&mut grid, "A1", "+ Z99 1");
        assert!(detect_cycle(a1, &grid).is_none());
    }

    #[test]
    fn straight_chain_is_not_a_cycle() {
        let mut grid = Grid::default();
        let a1 = set(&mut grid, "A1", "B1");
        set(&mut grid, "B1", "C1");
        set(&mut grid, "C1", "7");
        assert!(detect_cycle(a1, &grid).is_none());
    }
}
