use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use model_structure_lint::config::{Args, Config, parse_log_level};
use model_structure_lint::report;
use model_structure_lint::workspace::{check_files, collect_ruby_files};

/// Outcome of a run over every requested file
enum Outcome {
    Clean,
    Offenses,
    /// Some files could not be checked; the others were still reported
    Incomplete,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(parse_log_level(&args.log_level))
        .parse_default_env()
        .init();

    match run(args) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Offenses) => ExitCode::from(1),
        Ok(Outcome::Incomplete) => ExitCode::from(2),
        Err(e) => {
            eprintln!("model-structure: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<Outcome> {
    let config = Config::from_args(args)?;

    let files = collect_ruby_files(&config.paths)?;
    log::info!("Checking {} file(s)", files.len());

    let mut reports = Vec::with_capacity(files.len());
    let mut failed = 0;
    for result in check_files(&files, &config.rule) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("model-structure: {e:#}");
                failed += 1;
            }
        }
    }
    print!("{}", report::render(&reports, config.format)?);

    if failed > 0 {
        Ok(Outcome::Incomplete)
    } else if reports.iter().any(|r| !r.offenses.is_empty()) {
        Ok(Outcome::Offenses)
    } else {
        Ok(Outcome::Clean)
    }
}
