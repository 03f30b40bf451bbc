//! PiBench: BBP π benchmark.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pibench_cli::presenter::CLIResultPresenter;
use pibench_lib::{app, config, errors};
use pibench_orchestration::interfaces::ResultPresenter;

fn main() -> ExitCode {
    let config = config::AppConfig::parse();

    // Logs go to stderr; stdout carries only the report.
    let filter = if config.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            CLIResultPresenter::new(config.json, false).present_error(&format!("{err:#}"));
            ExitCode::from(u8::try_from(errors::exit_code(&err)).unwrap_or(1))
        }
    }
}
