//! # Settings Console
//!
//! Renders the editor settings form and applies command-line edits.

use settings_console::{run, ConsoleConfig};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("settings_console");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let output = run(&config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    print!("{}", output.form);
    print!("{}", output.summary());

    if !output.succeeded() {
        process::exit(2);
    }
}

fn parse_args(args: &[String]) -> Result<ConsoleConfig, String> {
    let mut config = ConsoleConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--editor" | "-e" => config.editor = Some(path_value(args, &mut i)?),
            "--fallback" | "-f" => config.fallback = Some(path_value(args, &mut i)?),
            "--load" | "-l" => config.load = Some(path_value(args, &mut i)?),
            "--export" | "-o" => config.export = Some(path_value(args, &mut i)?),
            "--dry-run" | "-n" => {
                config.dry_run = true;
            }
            "--show-help" => {
                config.with_help = true;
            }
            "--help" | "-h" => {
                print_usage(args.first().map(String::as_str).unwrap_or("settings_console"));
                process::exit(0);
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option: {}", other));
            }
            edit => config.edits.push(edit.to_string()),
        }
        i += 1;
    }

    Ok(config)
}

fn path_value(args: &[String], i: &mut usize) -> Result<PathBuf, String> {
    let option = &args[*i];
    *i += 1;
    args.get(*i)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Missing value for {}", option))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS] [EDIT...]", program);
    eprintln!();
    eprintln!("Edits:");
    eprintln!("  key=value           Stage a value (labels accepted for choices)");
    eprintln!("  !key                Drop a staged value");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -e, --editor <FILE>    Editor properties (JSON) to start from");
    eprintln!("  -f, --fallback <FILE>  Fallback defaults (JSON)");
    eprintln!("  -l, --load <FILE>      Stage a named settings document");
    eprintln!("  -o, --export <FILE>    Write the edited values as a named document");
    eprintln!("  -n, --dry-run          Discard instead of committing");
    eprintln!("      --show-help        Print help text under each setting");
    eprintln!("  -h, --help             Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to see session events.");
}
