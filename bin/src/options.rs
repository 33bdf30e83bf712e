//! Command line options shared by the commands.

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate};
use clap::Args;
use rekline_lib::{ArchiveLayout, DEFAULT_MARKET, MonthRange, ParseMode, Period, ResampleConfig};
use std::path::PathBuf;

/// Where the 1-minute archives live and which of them to read.
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Root folder passed to the Binance download script (-folder)
    #[arg(long)]
    pub(crate) folder: PathBuf,

    /// Comma separated tickers (e.g. BTCUSDT,ETHUSDT)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) tickers: Vec<String>,

    /// {startDate}_{endDate} used by the download script
    #[arg(long, default_value = "2017-01-01_2023-12-31")]
    pub(crate) download_date_range: String,

    /// Market segment in the archive tree
    #[arg(long, default_value = DEFAULT_MARKET)]
    pub(crate) market: String,

    /// Output period in minutes (e.g. 30, 30m, 4h)
    #[arg(short, long, default_value = "30")]
    pub(crate) interval: Period,

    /// Output directory. Defaults to <folder>/composed_klines
    #[arg(short, long)]
    pub(crate) output_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Builds the archive layout.
    pub(crate) fn layout(&self) -> ArchiveLayout {
        let layout = ArchiveLayout::new(&self.folder, &self.download_date_range)
            .with_market(&self.market);
        match &self.output_dir {
            Some(dir) => layout.with_output_dir(dir),
            None => layout,
        }
    }

    /// Parses the download range label into months.
    pub(crate) fn months(&self) -> Result<MonthRange> {
        self.download_date_range
            .parse()
            .with_context(|| format!("Invalid download date range: {}", self.download_date_range))
    }

    /// Returns the upper-cased, de-duplicated ticker list.
    pub(crate) fn symbols(&self) -> Result<Vec<String>> {
        let mut symbols: Vec<String> = Vec::with_capacity(self.tickers.len());
        for ticker in &self.tickers {
            let symbol = ticker.trim().to_uppercase();
            if !symbol.is_empty() && !symbols.contains(&symbol) {
                symbols.push(symbol);
            }
        }
        if symbols.is_empty() {
            bail!("No tickers given");
        }
        Ok(symbols)
    }
}

/// Options of the `compose` command.
#[derive(Args, Debug, Clone)]
pub(crate) struct ComposeArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,

    /// Comma separated phase offsets in minutes. Defaults to every offset 0..interval
    #[arg(long, value_delimiter = ',')]
    pub(crate) offsets: Vec<u32>,

    /// Bucket epoch: YYYY-MM-DD, RFC 3339 timestamp, or milliseconds
    #[arg(long, default_value = "2017-01-01")]
    pub(crate) epoch: String,

    /// Reject lines with unparsable numbers instead of reading them as zero
    #[arg(long)]
    pub(crate) strict: bool,

    /// Write a header row to every output file
    #[arg(long)]
    pub(crate) header: bool,

    /// Maximum passes run at once. Defaults to the number of CPUs
    #[arg(long)]
    pub(crate) parallel: Option<usize>,
}

impl ComposeArgs {
    /// Returns the parser mode.
    pub(crate) const fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    /// Returns the worker limit.
    pub(crate) fn parallel(&self) -> usize {
        self.parallel
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(4, |n| n.get()))
            .max(1)
    }

    /// Returns one configuration per requested offset, in ascending order.
    pub(crate) fn configs(&self) -> Result<Vec<ResampleConfig>> {
        let period = self.source.interval;
        let epoch_ms = parse_epoch(&self.epoch)?;

        if self.offsets.is_empty() {
            return Ok(ResampleConfig::offsets(period, epoch_ms)
                .context("Invalid epoch")?
                .collect());
        }

        let mut offsets = self.offsets.clone();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
            .into_iter()
            .map(|offset| {
                ResampleConfig::new(period, offset)
                    .context("Invalid offset")?
                    .with_epoch_ms(epoch_ms)
                    .context("Invalid epoch")
            })
            .collect()
    }
}

/// Parses an epoch given as milliseconds, a date, or an RFC 3339 timestamp.
pub(crate) fn parse_epoch(s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .with_context(|| format!("Invalid epoch: {s}"));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp_millis())
        .with_context(|| format!("Invalid epoch: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rekline_lib::DEFAULT_EPOCH_MS;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ComposeArgs,
    }

    fn parse(extra: &[&str]) -> ComposeArgs {
        let mut argv = vec!["rekline", "--folder", "/data", "--tickers", "btcusdt, ETHUSDT,btcusdt"];
        argv.extend_from_slice(extra);
        TestCli::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_parse_epoch() {
        assert_eq!(parse_epoch("2017-01-01").unwrap(), DEFAULT_EPOCH_MS);
        assert_eq!(parse_epoch("2017-01-01T00:00:00Z").unwrap(), DEFAULT_EPOCH_MS);
        assert_eq!(parse_epoch("0").unwrap(), 0);
        assert!(parse_epoch("yesterday").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.source.interval.minutes(), 30);
        assert_eq!(args.parse_mode(), ParseMode::Lenient);

        let configs = args.configs().unwrap();
        assert_eq!(configs.len(), 30);
        assert_eq!(configs[29].offset_minutes(), 29);
        assert_eq!(configs[0].epoch_ms(), DEFAULT_EPOCH_MS);

        let months = args.source.months().unwrap();
        assert_eq!(months.len(), 84);
    }

    #[test]
    fn test_symbols_normalized() {
        let args = parse(&[]);
        assert_eq!(args.source.symbols().unwrap(), vec!["BTCUSDT", "ETHUSDT"]);
    }

    #[test]
    fn test_explicit_offsets() {
        let args = parse(&["--interval", "5", "--offsets", "4,0,4", "--strict"]);
        let offsets: Vec<u32> = args
            .configs()
            .unwrap()
            .iter()
            .map(ResampleConfig::offset_minutes)
            .collect();
        assert_eq!(offsets, vec![0, 4]);
        assert_eq!(args.parse_mode(), ParseMode::Strict);
    }

    #[test]
    fn test_offset_out_of_range() {
        let args = parse(&["--interval", "5", "--offsets", "5"]);
        assert!(args.configs().is_err());
    }

    #[test]
    fn test_epoch_overflow_rejected() {
        let args = parse(&["--epoch", "9223372036854775807"]);
        assert!(args.configs().is_err());
        let args = parse(&["--epoch", "9223372036854775807", "--offsets", "0"]);
        assert!(args.configs().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let argv = ["rekline", "--folder", "/data", "--tickers", "BTCUSDT", "--interval", "0"];
        assert!(TestCli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_layout_output_dir() {
        let args = parse(&["--output-dir", "/out", "--market", "futures"]);
        let layout = args.source.layout();
        assert_eq!(layout.output_dir(), std::path::Path::new("/out"));
        assert_eq!(layout.market(), "futures");
    }
}
