// src/main.rs
use std::process::ExitCode;

use clap::Parser;
use year_range_filter::{app, cli::Args};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match app::run(args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
