//! Chronological kline batches across monthly archives.

use rekline_types::{Kline, Month, MonthRange, ParseError, ParseMode};

use crate::{ArchiveLayout, parse_kline_with, read_archive_member};

/// How a month's batch was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// The archive was read and parsed.
    Read,
    /// No archive exists for the month.
    Missing,
    /// The archive exists but could not be read; the month was skipped.
    Failed,
}

/// The klines of a single month.
#[derive(Debug, Clone)]
pub struct KlineBatch {
    /// The month this batch covers.
    pub month: Month,
    /// Parsed klines, in file order.
    pub klines: Vec<Kline>,
    /// Number of non-blank lines seen.
    pub lines: usize,
    /// Number of lines rejected by the parser.
    pub malformed: usize,
    /// How the batch was obtained.
    pub status: BatchStatus,
}

impl KlineBatch {
    /// Creates an empty batch with the given status.
    #[must_use]
    pub const fn empty(month: Month, status: BatchStatus) -> Self {
        Self {
            month,
            klines: Vec::new(),
            lines: 0,
            malformed: 0,
            status,
        }
    }

    /// Returns true if the batch holds no klines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.klines.is_empty()
    }

    /// Returns the number of klines in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.klines.len()
    }
}

/// Returns a lazy iterator of kline batches, one per month, oldest first.
///
/// Archives are opened only when the iterator reaches their month, so at
/// most one month of klines is held in memory. Missing archives produce
/// [`BatchStatus::Missing`] batches and unreadable ones produce
/// [`BatchStatus::Failed`] batches; neither ends the iteration.
pub fn kline_batches<'a>(
    layout: &'a ArchiveLayout,
    symbol: &'a str,
    months: MonthRange,
    mode: ParseMode,
) -> impl Iterator<Item = KlineBatch> + 'a {
    months
        .months()
        .map(move |month| load_month(layout, symbol, month, mode))
}

fn load_month(layout: &ArchiveLayout, symbol: &str, month: Month, mode: ParseMode) -> KlineBatch {
    let path = layout.archive_path(symbol, month);
    if !path.is_file() {
        tracing::debug!(symbol, %month, path = %path.display(), "archive missing, skipping month");
        return KlineBatch::empty(month, BatchStatus::Missing);
    }

    match read_archive_member(&path) {
        Ok(body) => {
            let batch = parse_batch(month, &body, mode);
            tracing::debug!(
                symbol,
                %month,
                klines = batch.len(),
                malformed = batch.malformed,
                "archive read"
            );
            batch
        }
        Err(e) => {
            tracing::warn!(symbol, %month, path = %path.display(), error = %e, "failed to read archive, skipping month");
            KlineBatch::empty(month, BatchStatus::Failed)
        }
    }
}

/// Parses the contents of one archive member into a batch.
///
/// Lines end at `\n` with an optional `\r`. Blank lines are ignored. Lines
/// that are not valid UTF-8 or fail to parse are logged, counted in
/// [`KlineBatch::malformed`] and skipped.
#[must_use]
pub fn parse_batch(month: Month, body: impl AsRef<[u8]>, mode: ParseMode) -> KlineBatch {
    let mut batch = KlineBatch::empty(month, BatchStatus::Read);

    for (line_no, raw) in body.as_ref().split(|&b| b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let parsed = std::str::from_utf8(raw)
            .map_err(|_| ParseError::InvalidUtf8)
            .and_then(|line| parse_kline_with(line, mode));
        match parsed {
            Ok(kline) => {
                batch.lines += 1;
                batch.klines.push(kline);
            }
            Err(ParseError::EmptyLine) => {}
            Err(e) => {
                batch.lines += 1;
                batch.malformed += 1;
                tracing::warn!(
                    %month,
                    line = line_no + 1,
                    error = %e,
                    text = %String::from_utf8_lossy(raw),
                    "skipping malformed line"
                );
            }
        }
    }

    batch
}
