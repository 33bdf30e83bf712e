//! Compose command implementation.
//!
//! Fans the (ticker, offset) passes out over the blocking thread pool and
//! reports a summary once all of them have finished.

use crate::display::{pass_line, pass_progress};
use crate::options::ComposeArgs;
use crate::pipeline::{PassPlan, PassReport, run_pass};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use rekline_lib::ReklineError;
use rekline_lib::prelude::*;
use std::sync::Arc;

/// Result of one pass, tagged with what it was for.
struct PassOutcome {
    symbol: String,
    offset_minutes: u32,
    result: std::result::Result<PassReport, ReklineError>,
}

/// Execute the compose command.
pub(crate) async fn compose(args: ComposeArgs, quiet: bool) -> Result<()> {
    let symbols = args.source.symbols()?;
    let months = args.source.months()?;
    let configs = args.configs()?;
    let layout = args.source.layout();

    std::fs::create_dir_all(layout.output_dir()).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            layout.output_dir().display()
        )
    })?;

    let plan = Arc::new(PassPlan {
        layout,
        months,
        mode: args.parse_mode(),
        formatter: CsvFormatter::new().with_header(args.header),
    });

    let jobs: Vec<(String, ResampleConfig)> = symbols
        .iter()
        .flat_map(|symbol| configs.iter().map(move |config| (symbol.clone(), *config)))
        .collect();

    tracing::info!(
        tickers = symbols.len(),
        offsets = configs.len(),
        period = %args.source.interval,
        months = %months,
        "starting compose"
    );

    let progress = pass_progress(jobs.len() as u64, quiet);
    progress.set_message(format!("{} {}", symbols.join(","), args.source.interval));

    let outcomes: Vec<PassOutcome> = stream::iter(jobs)
        .map(|(symbol, config)| {
            let plan = Arc::clone(&plan);
            let progress = progress.clone();
            async move {
                let task_symbol = symbol.clone();
                let result = tokio::task::spawn_blocking(move || run_pass(&plan, &task_symbol, config))
                    .await
                    .unwrap_or_else(|e| {
                        Err(ReklineError::Io(std::io::Error::other(format!(
                            "pass worker failed: {e}"
                        ))))
                    });

                match &result {
                    Ok(report) if !quiet => progress.println(pass_line(report)),
                    Err(e) => tracing::warn!(symbol = %symbol, offset = config.offset_minutes(), error = %e, "pass failed"),
                    Ok(_) => {}
                }
                progress.inc(1);

                PassOutcome {
                    symbol,
                    offset_minutes: config.offset_minutes(),
                    result,
                }
            }
        })
        .buffer_unordered(args.parallel())
        .collect()
        .await;

    progress.finish_with_message("done");
    summarize(&outcomes, quiet)
}

/// Prints the run summary and fails if any pass failed.
fn summarize(outcomes: &[PassOutcome], quiet: bool) -> Result<()> {
    let mut written = 0usize;
    let mut no_data: Vec<&str> = Vec::new();
    let mut failures: Vec<&PassOutcome> = Vec::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(_) => written += 1,
            Err(ReklineError::NoDataAvailable { .. }) => {
                if !no_data.contains(&outcome.symbol.as_str()) {
                    no_data.push(&outcome.symbol);
                }
            }
            Err(_) => failures.push(outcome),
        }
    }

    if !quiet {
        println!("\nCompose complete:");
        println!("  Written: {written}");
        if !no_data.is_empty() {
            println!("  No archives found for: {}", no_data.join(", "));
        }
        if !failures.is_empty() {
            println!("  Failed: {}", failures.len());
            for outcome in &failures {
                if let Err(e) = &outcome.result {
                    println!(
                        "    {} offset {:02}: {}",
                        outcome.symbol, outcome.offset_minutes, e
                    );
                }
            }
        }
    }

    if !failures.is_empty() {
        anyhow::bail!(
            "{} out of {} passes failed",
            failures.len(),
            outcomes.len()
        );
    }

    Ok(())
}
