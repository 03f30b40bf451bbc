//! Styled console helpers.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Worker count with its noun, e.g. `1 worker` or `4 workers`.
#[must_use]
pub fn worker_count(workers: usize) -> String {
    let noun = if workers == 1 { "worker" } else { "workers" };
    format!("{workers} {noun}")
}

/// Header line introducing one strategy's report.
#[must_use]
pub fn strategy_header(strategy: &str, workers: usize) -> String {
    let text = format!("=== {strategy} ({}) ===", worker_count(workers));
    if is_color_disabled() {
        text
    } else {
        style(text).bold().cyan().to_string()
    }
}

/// Status cell for the comparison table.
#[must_use]
pub fn status_label(ok: bool) -> String {
    let label = if ok { "OK" } else { "ERROR" };
    if is_color_disabled() {
        label.to_string()
    } else if ok {
        style(label).green().bold().to_string()
    } else {
        style(label).red().bold().to_string()
    }
}

/// Print an error message to stderr.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}
