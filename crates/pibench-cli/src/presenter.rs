//! CLI result presenter.

use tracing::error;

use pibench_core::verify::VerificationReport;
use pibench_orchestration::interfaces::{ResultPresenter, RunResult};

use crate::output::{format_duration, format_report, JsonReport};
use crate::ui::{print_error, status_label, strategy_header, worker_count};

/// CLI result presenter.
pub struct CLIResultPresenter {
    json: bool,
    headers: bool,
}

impl CLIResultPresenter {
    /// `headers` prefixes each report with the strategy name, for
    /// multi-strategy runs.
    #[must_use]
    pub fn new(json: bool, headers: bool) -> Self {
        Self { json, headers }
    }

    /// Text printed for one run, or `None` when it cannot be rendered.
    #[must_use]
    pub fn render_result(&self, result: &RunResult, report: &VerificationReport) -> Option<String> {
        if self.json {
            return match JsonReport::new(&result.strategy, result.workers, report, result.duration)
                .to_json()
            {
                Ok(line) => Some(line),
                Err(e) => {
                    error!(strategy = %result.strategy, error = %e, "failed to encode report");
                    None
                }
            };
        }

        let body = format_report(report, result.duration);
        Some(if self.headers {
            format!("{}\n{body}", strategy_header(&result.strategy, result.workers))
        } else {
            body
        })
    }

    /// Comparison table for several runs.
    #[must_use]
    pub fn render_comparison(results: &[RunResult]) -> String {
        let mut table = format!("\nComparison Results:\n{:-<60}", "");
        for result in results {
            table.push_str(&format!(
                "\n  {:<14} {:>11} {:>12} [{}]",
                result.strategy,
                worker_count(result.workers),
                format_duration(result.duration),
                status_label(result.outcome.is_ok()),
            ));
        }
        table
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, result: &RunResult, report: &VerificationReport) {
        if let Some(text) = self.render_result(result, report) {
            println!("{text}");
        }
    }

    fn present_comparison(&self, results: &[RunResult]) {
        if self.json {
            return;
        }
        println!("{}", Self::render_comparison(results));
    }

    fn present_error(&self, error: &str) {
        print_error(error);
    }
}
