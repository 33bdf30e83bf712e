//! CSV output format.

use rekline_types::Kline;
use std::io::Write;

use crate::{FormatError, Formatter};

/// Column names, in output order.
pub const HEADER_COLUMNS: [&str; 12] = [
    "open_time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "close_time",
    "quote_volume",
    "count",
    "taker_buy_volume",
    "taker_buy_quote_volume",
    "ignore",
];

/// CSV formatter.
///
/// Defaults match the Binance archives: comma separated, no header row.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: false,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

/// Formats the `ignore` column: `0` when exactly zero, else 8 decimals.
#[must_use]
pub fn format_ignore(ignore: f64) -> String {
    if ignore == 0.0 {
        "0".to_string()
    } else {
        format!("{ignore:.8}")
    }
}

impl Formatter for CsvFormatter {
    fn write_header<W: Write>(&self, mut writer: W) -> Result<(), FormatError> {
        if self.include_header {
            let mut delimiter = [0u8; 4];
            let delimiter: &str = self.delimiter.encode_utf8(&mut delimiter);
            writeln!(writer, "{}", HEADER_COLUMNS.join(delimiter))?;
        }
        Ok(())
    }

    fn write_kline<W: Write>(&self, kline: &Kline, mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;
        writeln!(
            writer,
            "{}{d}{:.8}{d}{:.8}{d}{:.8}{d}{:.8}{d}{:.8}{d}{}{d}{:.8}{d}{}{d}{:.8}{d}{:.8}{d}{}",
            kline.open_time,
            kline.open,
            kline.high,
            kline.low,
            kline.close,
            kline.volume,
            kline.close_time,
            kline.quote_volume,
            kline.trade_count,
            kline.taker_buy_base_volume,
            kline.taker_buy_quote_volume,
            format_ignore(kline.ignore),
        )?;
        Ok(())
    }
}
