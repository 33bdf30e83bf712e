//! Resample 1-minute klines into phase-shifted N-minute klines.
//!
//! This is a facade crate that re-exports functionality from the rekline
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use rekline_lib::prelude::*;
//!
//! let lines = [
//!     "0,1,2,0.5,1.5,10,59999,15,1,4,6,0",
//!     "60000,1.5,3,1,2,10,119999,15,2,4,6,0",
//!     "120000,2,2.5,1.8,2.2,10,179999,15,3,4,6,0",
//! ];
//! let klines = lines.iter().filter_map(|line| parse_kline(line).ok());
//!
//! let config = ResampleConfig::new(Period::new(3).unwrap(), 0)
//!     .unwrap()
//!     .with_epoch_ms(0)
//!     .unwrap();
//! let bars: Vec<Kline> = resample(klines, config).collect();
//!
//! let mut out = Vec::new();
//! CsvFormatter::new().write_klines(&bars, &mut out).unwrap();
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "0,1.00000000,3.00000000,0.50000000,2.20000000,30.00000000,179999,45.00000000,6,12.00000000,18.00000000,0\n"
//! );
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rekline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use rekline_types::*;

// Re-export the input pipeline
#[cfg(feature = "source")]
pub use rekline_source::{
    ArchiveError, ArchiveLayout, ArchiveScan, BatchStatus, DEFAULT_MARKET, KlineBatch, kline_batches,
    parse_batch, parse_kline, parse_kline_with, read_archive_member,
};

// Re-export aggregation
#[cfg(feature = "aggregate")]
pub use rekline_aggregate::{
    Accumulator, Buckets, KlineAggregator, Resample, aggregate_klines, resample,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use rekline_format::{CsvFormatter, FormatError, Formatter, format_ignore};

/// Prelude module for convenient imports.
///
/// ```
/// use rekline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use rekline_types::{
        ConfigError, Kline, Month, MonthRange, ParseError, ParseMode, Period, ReklineError,
        ResampleConfig, Result,
    };

    #[cfg(feature = "source")]
    pub use rekline_source::{
        ArchiveLayout, BatchStatus, KlineBatch, kline_batches, parse_kline, parse_kline_with,
    };

    #[cfg(feature = "aggregate")]
    pub use rekline_aggregate::{KlineAggregator, aggregate_klines, resample};

    #[cfg(feature = "format")]
    pub use rekline_format::{CsvFormatter, Formatter};
}
