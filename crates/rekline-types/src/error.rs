//! Error types for rekline.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for rekline operations.
pub type Result<T> = std::result::Result<T, ReklineError>;

/// Errors that can occur while reading, resampling and writing klines.
#[derive(Error, Debug)]
pub enum ReklineError {
    /// A source line could not be decoded.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid resampling configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid month range.
    #[error(transparent)]
    MonthRange(#[from] MonthRangeError),

    /// No source archive exists for the requested range.
    #[error("No data available for {symbol} in requested range")]
    NoDataAvailable {
        /// The symbol that had no data.
        symbol: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by the record parser.
///
/// Numeric sub-fields that fail to parse are not errors in
/// [`ParseMode::Lenient`](crate::ParseMode::Lenient); they become zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line was empty after trimming.
    #[error("empty line")]
    EmptyLine,

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    /// The line did not split into exactly 12 fields.
    #[error("wrong field count: {found} (expected {expected})")]
    FieldCount {
        /// Number of fields found.
        found: usize,
        /// Number of fields required.
        expected: usize,
    },

    /// A numeric field failed to parse in strict mode.
    #[error("invalid number in field '{field}': {value:?}")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
        /// Raw field text.
        value: String,
    },
}

/// Errors for invalid resampling configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The period must be at least one minute.
    #[error("period must be a positive number of minutes")]
    ZeroPeriod,

    /// The phase offset must be smaller than the period.
    #[error("offset {offset}m is out of range for a {period}m period (expected 0..{period})")]
    OffsetOutOfRange {
        /// Requested offset in minutes.
        offset: u32,
        /// Period in minutes.
        period: u32,
    },

    /// The epoch is so close to `i64::MAX` that bucket bounds would overflow.
    #[error("epoch {epoch_ms} is out of range")]
    EpochOutOfRange {
        /// Requested epoch in milliseconds.
        epoch_ms: i64,
    },
}

/// Errors for invalid month ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonthRangeError {
    /// Start date is after end date.
    #[error("Invalid month range: {start} > {end}")]
    InvalidRange {
        /// The start date.
        start: NaiveDate,
        /// The end date.
        end: NaiveDate,
    },

    /// The range label is not of the form `{start}_{end}`.
    #[error("Invalid range label '{0}', expected YYYY-MM-DD_YYYY-MM-DD")]
    InvalidLabel(String),
}
