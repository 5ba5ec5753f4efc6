//! Tabula - run spreadsheet command scripts against a live sheet

mod config;
mod error;
mod script;

use anyhow::Context;
use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use script::PrintMode;
use tabula_core::Sheet;

fn print_usage() {
    eprintln!("Usage: tabula [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Command script to run (default: stdin, or '-')");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --values                  Print computed values at the end (default)");
    eprintln!("  --texts                   Print cell texts at the end");
    eprintln!("  --strict                  Stop at the first failing command");
    eprintln!("  --config <path>           Load settings from TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -h, --help                Print help");
}

struct Args {
    file_path: Option<PathBuf>,
    print: Option<PrintMode>,
    strict: bool,
    config_file: Option<PathBuf>,
    no_config: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        file_path: None,
        print: None,
        strict: false,
        config_file: None,
        no_config: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--values" => parsed.print = Some(PrintMode::Values),
            "--texts" => parsed.print = Some(PrintMode::Texts),
            "--strict" => parsed.strict = true,
            "--no-config" => parsed.no_config = true,
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                parsed.config_file = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') && arg != "-" => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if parsed.file_path.is_none() {
                    parsed.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }

    parsed
}

fn read_input(file_path: Option<&PathBuf>) -> anyhow::Result<String> {
    match file_path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

fn run(args: Args) -> anyhow::Result<bool> {
    let config = if args.no_config && args.config_file.is_none() {
        config::Config::default()
    } else {
        let (config, warnings) = config::load_config(args.config_file.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        config
    };

    let mode = args.print.unwrap_or(config.print);
    let stop_on_error = args.strict || config.stop_on_error;
    let content = read_input(args.file_path.as_ref())?;

    let mut sheet = Sheet::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut err = io::stderr();

    let report = script::run_script(&mut sheet, &content, stop_on_error, &mut out, &mut err)?;
    script::print_sheet(&sheet, mode, &mut out)?;
    out.flush()?;

    Ok(report.errors == 0)
}

fn main() {
    let args = parse_args();
    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
