//! Display utilities for the rekline CLI.

use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::PassReport;

/// Creates the run progress bar, or a hidden one in quiet mode.
pub(crate) fn pass_progress(total: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} passes ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}

/// One-line summary of a finished pass.
pub(crate) fn pass_line(report: &PassReport) -> String {
    let mut line = format!(
        "  Created: {} ({} bars",
        report.output.display(),
        report.emitted
    );
    if report.malformed > 0 {
        line.push_str(&format!(", {} malformed lines", report.malformed));
    }
    if report.months_missing > 0 || report.months_failed > 0 {
        line.push_str(&format!(
            ", {} months missing, {} unreadable",
            report.months_missing, report.months_failed
        ));
    }
    line.push(')');
    line
}
