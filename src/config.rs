//! Shell configuration: grid dimensions from flags or gridcalc.toml.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use gridcalc_engine::engine::Grid;
use serde::Deserialize;

#[derive(Deserialize, Default)]
struct Config {
    #[serde(default)]
    grid: GridSection,
}

#[derive(Deserialize)]
struct GridSection {
    rows: usize,
    cols: usize,
}

impl Default for GridSection {
    fn default() -> GridSection {
        GridSection {
            rows: Grid::DEFAULT_SIZE,
            cols: Grid::DEFAULT_SIZE,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gridcalc").map(|dirs| dirs.config_dir().join("gridcalc.toml"))
}

/// Default grid dimensions: the config file's `[grid]` section when present
/// and well-formed, 9x9 otherwise. Config problems warn on stderr rather
/// than abort - the shell still comes up.
pub fn load_default_dimensions() -> (usize, usize) {
    let fallback = (Grid::DEFAULT_SIZE, Grid::DEFAULT_SIZE);
    let Some(path) = config_path() else {
        return fallback;
    };
    let Ok(raw) = std::fs::read_to_string(&path) else {
        return fallback;
    };
    match toml::from_str::<Config>(&raw) {
        Ok(config) if config.grid.rows > 0 && config.grid.cols > 0 => {
            (config.grid.rows, config.grid.cols)
        }
        Ok(_) => {
            eprintln!(
                "Warning: {} sets a zero grid dimension, using {}x{}",
                path.display(),
                fallback.0,
                fallback.1
            );
            fallback
        }
        Err(e) => {
            eprintln!("Warning: could not parse {}: {}", path.display(), e);
            fallback
        }
    }
}

/// Parse a `ROWSxCOLS` argument like `9x9`.
pub fn parse_dimensions(arg: &str) -> Result<(usize, usize)> {
    let lower = arg.to_ascii_lowercase();
    let Some((rows, cols)) = lower.split_once('x') else {
        bail!("grid dimensions must look like 9x9, got `{}`", arg);
    };
    let rows: usize = rows
        .trim()
        .parse()
        .with_context(|| format!("bad row count in `{}`", arg))?;
    let cols: usize = cols
        .trim()
        .parse()
        .with_context(|| format!("bad column count in `{}`", arg))?;
    if rows == 0 || cols == 0 {
        bail!("grid dimensions must be positive, got `{}`", arg);
    }
    Ok((rows, cols))
}
