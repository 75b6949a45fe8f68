//! Gridcalc - a prefix-notation spreadsheet calculator.

mod config;
mod shell;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn print_usage() {
    eprintln!("Usage: gridcalc [OPTIONS] [SCRIPT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [SCRIPT]                 Edit script to run non-interactively");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>  Evaluate one formula and print the result");
    eprintln!("  --grid <ROWSxCOLS>       Grid dimensions (default from config, else 9x9)");
    eprintln!("  -h, --help               Print help");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut script_path: Option<PathBuf> = None;
    let mut command: Option<String> = None;
    let mut grid_arg: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a formula");
                    return ExitCode::FAILURE;
                }
                command = Some(args[i].clone());
            }
            "--grid" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --grid requires a value like 9x9");
                    return ExitCode::FAILURE;
                }
                grid_arg = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                return ExitCode::FAILURE;
            }
            _ => {
                if script_path.is_none() {
                    script_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    return ExitCode::FAILURE;
                }
            }
        }
        i += 1;
    }

    let (rows, cols) = match grid_arg {
        Some(arg) => match config::parse_dimensions(&arg) {
            Ok(dims) => dims,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => config::load_default_dimensions(),
    };

    if let Some(formula) = command {
        return shell::run_command(rows, cols, &formula);
    }

    let result = match script_path {
        Some(path) => shell::run_script(rows, cols, &path),
        None => shell::run_interactive(rows, cols),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
