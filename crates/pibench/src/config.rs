//! Application configuration from CLI flags and environment.

use clap::Parser;

use pibench_core::constants::SERIES_TERMS;
use pibench_core::kernel::PiError;

/// PiBench: computes π with the BBP series under several scheduling models.
#[derive(Parser, Debug)]
#[command(name = "pibench", version, about)]
pub struct AppConfig {
    /// Scheduling strategy: sequential, pool, distributed, or all.
    #[arg(short, long, default_value = "sequential", env = "PIBENCH_STRATEGY")]
    pub strategy: String,

    /// Worker (or rank) count for the parallel strategies.
    #[arg(short, long, env = "PIBENCH_WORKERS")]
    pub workers: Option<usize>,

    /// Emit one JSON object per run instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Show a progress bar on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Reject worker counts outside `1..=N` before anything is dispatched.
    pub fn validate(&self) -> Result<(), PiError> {
        if let Some(workers) = self.workers {
            let in_range = u64::try_from(workers).is_ok_and(|w| (1..=SERIES_TERMS).contains(&w));
            if !in_range {
                return Err(PiError::Config(format!(
                    "worker count must be between 1 and {SERIES_TERMS}, got {workers}"
                )));
            }
        }
        Ok(())
    }
}
