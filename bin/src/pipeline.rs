//! One resampling pass: a symbol's archives through one aggregator into one file.

use rekline_lib::prelude::*;
use rekline_lib::ReklineError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Outcome of a completed pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PassReport {
    pub(crate) symbol: String,
    pub(crate) offset_minutes: u32,
    pub(crate) output: PathBuf,
    pub(crate) months_read: usize,
    pub(crate) months_missing: usize,
    pub(crate) months_failed: usize,
    pub(crate) lines: usize,
    pub(crate) malformed: usize,
    pub(crate) skipped: u64,
    pub(crate) emitted: u64,
}

impl PassReport {
    fn new(symbol: &str, config: &ResampleConfig, output: PathBuf) -> Self {
        Self {
            symbol: symbol.to_string(),
            offset_minutes: config.offset_minutes(),
            output,
            months_read: 0,
            months_missing: 0,
            months_failed: 0,
            lines: 0,
            malformed: 0,
            skipped: 0,
            emitted: 0,
        }
    }

    fn record(&mut self, batch: &KlineBatch) {
        match batch.status {
            BatchStatus::Read => self.months_read += 1,
            BatchStatus::Missing => self.months_missing += 1,
            BatchStatus::Failed => self.months_failed += 1,
        }
        self.lines += batch.lines;
        self.malformed += batch.malformed;
    }
}

/// Static inputs shared by every pass of a run.
#[derive(Debug, Clone)]
pub(crate) struct PassPlan {
    pub(crate) layout: ArchiveLayout,
    pub(crate) months: MonthRange,
    pub(crate) mode: ParseMode,
    pub(crate) formatter: CsvFormatter,
}

/// Runs one (symbol, offset) pass and writes its output file.
///
/// The output file is truncated first. If the pass fails midway the partial
/// file is removed, so a retry always starts from scratch.
///
/// # Errors
///
/// Returns [`ReklineError::NoDataAvailable`] when no archive exists for the
/// symbol, or an I/O error if the output cannot be written.
pub(crate) fn run_pass(
    plan: &PassPlan,
    symbol: &str,
    config: ResampleConfig,
) -> Result<PassReport> {
    if plan.layout.scan(symbol, plan.months).is_empty() {
        return Err(ReklineError::NoDataAvailable {
            symbol: symbol.to_string(),
        });
    }

    let output = plan
        .layout
        .output_path(symbol, config.period(), config.offset_minutes());
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let span = tracing::info_span!("pass", symbol, offset = config.offset_minutes());
    let _enter = span.enter();

    let mut report = PassReport::new(symbol, &config, output.clone());
    let result = File::create(&output).map_err(ReklineError::from).and_then(|file| {
        let batches = kline_batches(&plan.layout, symbol, plan.months, plan.mode);
        compose_batches(batches, config, &plan.formatter, BufWriter::new(file), &mut report)
    });

    if let Err(e) = result {
        tracing::warn!(output = %output.display(), error = %e, "pass failed, removing partial output");
        let _ = fs::remove_file(&output);
        return Err(e);
    }

    tracing::info!(
        output = %report.output.display(),
        emitted = report.emitted,
        malformed = report.malformed,
        missing = report.months_missing,
        "pass complete"
    );
    Ok(report)
}

/// Streams kline batches through one aggregator into `writer`.
pub(crate) fn compose_batches<I, W>(
    batches: I,
    config: ResampleConfig,
    formatter: &CsvFormatter,
    mut writer: W,
    report: &mut PassReport,
) -> Result<()>
where
    I: IntoIterator<Item = KlineBatch>,
    W: Write,
{
    let mut aggregator = KlineAggregator::new(config);
    formatter.write_header(&mut writer)?;

    for batch in batches {
        report.record(&batch);
        for kline in batch.klines {
            if let Some(bar) = aggregator.process(kline) {
                formatter.write_kline(&bar, &mut writer)?;
            }
        }
    }

    report.skipped = aggregator.skipped();
    report.emitted = aggregator.emitted();
    if let Some(bar) = aggregator.finish() {
        formatter.write_kline(&bar, &mut writer)?;
        report.emitted += 1;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rekline_lib::parse_batch;
    use zip::write::SimpleFileOptions;

    const JAN: Month = Month {
        year: 2017,
        month: 1,
    };

    fn write_archive(layout: &ArchiveLayout, symbol: &str, month: Month, body: &str) {
        let path = layout.archive_path(symbol, month);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        writer
            .start_file(format!("{symbol}-1m-{month}.csv"), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    fn plan(root: &std::path::Path, label: &str) -> PassPlan {
        PassPlan {
            layout: ArchiveLayout::new(root, label),
            months: label.parse().unwrap(),
            mode: ParseMode::Lenient,
            formatter: CsvFormatter::new(),
        }
    }

    fn config(period: u32, offset: u32, epoch_ms: i64) -> ResampleConfig {
        ResampleConfig::new(Period::new(period).unwrap(), offset)
            .unwrap()
            .with_epoch_ms(epoch_ms)
            .unwrap()
    }

    #[test]
    fn test_malformed_line_does_not_contribute() {
        let text = "0,1,2,0.5,1.5,10,59999,15,1,4,6,0\n\
                    60000,1.5,3,1,2,999,119999,15,2,4,6\n\
                    120000,2,2.5,1.8,2.2,10,179999,15,3,4,6,0\n";
        let batch = parse_batch(JAN, text, ParseMode::Lenient);

        let mut report = PassReport::new("BTCUSDT", &config(3, 0, 0), PathBuf::new());
        let mut out = Vec::new();
        compose_batches([batch], config(3, 0, 0), &CsvFormatter::new(), &mut out, &mut report).unwrap();

        let bars: Vec<Kline> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| parse_kline(line).unwrap())
            .collect();
        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars[0].volume, 20.0);
        assert_relative_eq!(bars[0].high, 2.5);
        assert_eq!(bars[0].trade_count, 4);
        assert_eq!(report.malformed, 1);
        assert_eq!(report.emitted, 1);
    }

    #[test]
    fn test_header_row_adds_nothing() {
        let epoch = rekline_lib::DEFAULT_EPOCH_MS;
        let text = format!(
            "open_time,open,high,low,close,volume,close_time,quote_volume,count,\
             taker_buy_volume,taker_buy_quote_volume,ignore\n\
             {epoch},1,2,0.5,1.5,10,{},15,1,4,6,0\n\
             {},1.5,3,1,2,10,{},15,2,4,6,0\n",
            epoch + 59_999,
            epoch + 60_000,
            epoch + 119_999,
        );
        let batch = parse_batch(JAN, &text, ParseMode::Lenient);
        assert_eq!(batch.len(), 3);

        let mut report = PassReport::new("BTCUSDT", &config(3, 0, epoch), PathBuf::new());
        let mut out = Vec::new();
        compose_batches([batch], config(3, 0, epoch), &CsvFormatter::new(), &mut out, &mut report).unwrap();

        let bars: Vec<Kline> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| parse_kline(line).unwrap())
            .collect();
        assert_eq!(report.skipped, 1);
        assert_eq!(report.malformed, 0);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open_time, epoch);
        assert_relative_eq!(bars[0].open, 1.0);
        assert_relative_eq!(bars[0].low, 0.5);
        assert_relative_eq!(bars[0].volume, 20.0);
        assert_eq!(bars[0].trade_count, 3);
    }

    #[test]
    fn test_pass_across_months() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path(), "2017-01-01_2017-03-31");
        let jan_end: i64 = 1_485_907_200_000 - 60_000; // 2017-01-31T23:59:00Z
        let feb_start: i64 = 1_485_907_200_000;
        let mar = Month {
            year: 2017,
            month: 3,
        };

        write_archive(
            &plan.layout,
            "BTCUSDT",
            JAN,
            &format!("{jan_end},1,2,0.5,1.5,10,{},15,1,4,6,0\n", jan_end + 59_999),
        );
        // February is missing; March has a corrupt archive.
        let mar_path = plan.layout.archive_path("BTCUSDT", mar);
        fs::create_dir_all(mar_path.parent().unwrap()).unwrap();
        fs::write(&mar_path, b"garbage").unwrap();

        let report = run_pass(&plan, "BTCUSDT", config(30, 0, rekline_lib::DEFAULT_EPOCH_MS)).unwrap();
        assert_eq!(report.months_read, 1);
        assert_eq!(report.months_missing, 1);
        assert_eq!(report.months_failed, 1);
        assert_eq!(report.emitted, 1);

        let written = fs::read_to_string(&report.output).unwrap();
        let bar = parse_kline(written.trim()).unwrap();
        assert_eq!(bar.open_time, feb_start - 30 * 60_000);
        assert_eq!(bar.close_time, feb_start - 1);
        assert!(
            report
                .output
                .ends_with("composed_klines/spot-klines-BTCUSDT-30m-00.csv")
        );
    }

    #[test]
    fn test_pass_without_archives() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path(), "2017-01-01_2017-01-31");

        let result = run_pass(&plan, "BTCUSDT", config(30, 0, rekline_lib::DEFAULT_EPOCH_MS));
        assert!(matches!(result, Err(ReklineError::NoDataAvailable { .. })));
        assert!(!plan.layout.output_dir().exists());
    }

    #[test]
    fn test_rerun_truncates_output() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path(), "2017-01-01_2017-01-31");
        let epoch = rekline_lib::DEFAULT_EPOCH_MS;
        write_archive(
            &plan.layout,
            "ETHUSDT",
            JAN,
            &format!("{epoch},1,2,0.5,1.5,10,{},15,1,4,6,0\n", epoch + 59_999),
        );

        let first = run_pass(&plan, "ETHUSDT", config(5, 0, epoch)).unwrap();
        let second = run_pass(&plan, "ETHUSDT", config(5, 0, epoch)).unwrap();
        assert_eq!(first.output, second.output);
        assert_eq!(fs::read_to_string(&second.output).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_every_offset_is_independent() {
        let dir = tempfile::tempdir().unwrap();
        let plan = plan(dir.path(), "2017-01-01_2017-01-31");
        let epoch = rekline_lib::DEFAULT_EPOCH_MS;
        let body: String = (0..10)
            .map(|i| {
                let t = epoch + i * 60_000;
                format!("{t},1,2,0.5,1.5,1,{},1,1,0,0,0\n", t + 59_999)
            })
            .collect();
        write_archive(&plan.layout, "BNBUSDT", JAN, &body);

        let emitted: Vec<u64> = ResampleConfig::offsets(Period::new(3).unwrap(), epoch)
            .unwrap()
            .map(|cfg| run_pass(&plan, "BNBUSDT", cfg).unwrap().emitted)
            .collect();
        // Offset 0: [0-2][3-5][6-8][9]; offset 1 skips minute 0: [1-3][4-6][7-9];
        // offset 2 skips minutes 0-1: [2-4][5-7][8-9].
        assert_eq!(emitted, vec![4, 3, 3]);
        assert_eq!(fs::read_dir(plan.layout.output_dir()).unwrap().count(), 3);
    }
}
