//! Line-oriented shell over the sheet.
//!
//! The shell owns a [`Sheet`] and forwards edit events into it; every line
//! of the protocol is either an edit (`LABEL = FORMULA`), a single-cell
//! query (`LABEL`), or a command (`:grid`, `:q`). Cell state is only ever
//! read back through snapshots.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use gridcalc_core::{CellRef, Sheet, Status};

enum Action {
    Continue,
    Quit,
}

/// One-shot command mode: commit the formula to a scratch cell of a fresh
/// sheet and print its display text. Exits non-zero when the formula does
/// not calculate.
pub fn run_command(rows: usize, cols: usize, formula: &str) -> ExitCode {
    let mut sheet = Sheet::new(rows, cols);
    let snap = match sheet.commit_edit_at("A1", formula) {
        Ok(snap) => snap,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{}", snap.display);
    match snap.status {
        Status::Calculable | Status::Empty => ExitCode::SUCCESS,
        Status::Incorrect | Status::Uncalculable => ExitCode::FAILURE,
    }
}

/// Run an edit script non-interactively, then print the resulting grid.
/// Any bad line aborts with its line number.
pub fn run_script(rows: usize, cols: usize, path: &Path) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;

    let mut sheet = Sheet::new(rows, cols);
    let mut out = io::stdout();
    for (idx, line) in content.lines().enumerate() {
        match process_line(&mut sheet, line, &mut out) {
            Ok(Action::Quit) => break,
            Ok(Action::Continue) => {}
            Err(e) => return Err(e.context(format!("line {}", idx + 1))),
        }
    }
    render_grid(&sheet, &mut out)
}

/// Interactive loop on stdin. Errors are reported per line and the session
/// continues.
pub fn run_interactive(rows: usize, cols: usize) -> Result<()> {
    let mut sheet = Sheet::new(rows, cols);
    let stdin = io::stdin();
    let mut out = io::stdout();

    write!(out, "> ")?;
    out.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        match process_line(&mut sheet, &line, &mut out) {
            Ok(Action::Quit) => break,
            Ok(Action::Continue) => {}
            Err(e) => eprintln!("Error: {}", e),
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

/// Execute one protocol line against the sheet. Blank lines and `#`
/// comments are skipped.
fn process_line(sheet: &mut Sheet, line: &str, out: &mut impl Write) -> Result<Action> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(Action::Continue);
    }
    match line {
        ":q" | ":quit" => return Ok(Action::Quit),
        ":grid" => {
            render_grid(sheet, out)?;
            return Ok(Action::Continue);
        }
        _ => {}
    }

    if let Some((label, formula)) = line.split_once('=') {
        let label = label.trim();
        let formula = formula.trim();
        let snap = sheet
            .commit_edit_at(label, formula)
            .with_context(|| format!("cannot edit {}", label))?;
        writeln!(out, "{} = {} [{}]", label, snap.display, snap.status)?;
    } else {
        let at = sheet
            .resolve(line)
            .with_context(|| format!("no such cell: {}", line))?;
        let snap = sheet
            .snapshot(at)
            .with_context(|| format!("no such cell: {}", line))?;
        writeln!(
            out,
            "{} = {} [{}] formula: {}",
            line, snap.display, snap.status, snap.formula
        )?;
    }
    Ok(Action::Continue)
}

/// Print the sheet as a table, one row per grid row. Empty cells render as
/// `.` so the grid shape stays visible.
fn render_grid(sheet: &Sheet, out: &mut impl Write) -> Result<()> {
    write!(out, "    ")?;
    for col in 0..sheet.cols() {
        write!(out, "{:>8}", CellRef::col_letters(col))?;
    }
    writeln!(out)?;

    for row in 0..sheet.rows() {
        write!(out, "{:>3} ", row + 1)?;
        for col in 0..sheet.cols() {
            let text = match sheet.snapshot(CellRef::new(row, col)) {
                Some(snap) if snap.status == Status::Empty => ".".to_string(),
                Some(snap) => snap.display,
                None => String::new(),
            };
            write!(out, "{:>8}", text)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
