//! Plan command implementation.

use crate::options::SourceArgs;
use anyhow::Result;

/// Show which archives exist and which outputs a compose run would write.
pub(crate) fn plan(source: &SourceArgs) -> Result<()> {
    let symbols = source.symbols()?;
    let months = source.months()?;
    let layout = source.layout();
    let period = source.interval;

    println!("Months: {} ({} archives per ticker)", months, months.len());
    println!("Period: {period} ({} phase offsets)", period.minutes());
    println!("Output: {}", layout.output_dir().display());
    println!();

    for symbol in &symbols {
        let scan = layout.scan(symbol, months);
        println!(
            "{symbol}: {} of {} archives present",
            scan.present.len(),
            months.len()
        );

        if scan.is_empty() {
            println!("  nothing to compose");
            continue;
        }

        if !scan.missing.is_empty() {
            let missing: Vec<String> = scan.missing.iter().map(ToString::to_string).collect();
            println!("  missing: {}", missing.join(", "));
        }

        let first = layout.output_path(symbol, period, 0);
        let last = layout.output_path(symbol, period, period.minutes() - 1);
        println!("  writes:  {}", first.display());
        if period.minutes() > 1 {
            println!("     ...   {}", last.display());
        }
    }

    Ok(())
}
