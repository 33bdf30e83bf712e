//! Output formatters for the rekline kline resampler.
//!
//! - [`Formatter`] - Streaming kline writer abstraction
//! - [`CsvFormatter`] - Binance-compatible CSV lines

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rekline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;

pub use crate::csv::{CsvFormatter, HEADER_COLUMNS, format_ignore};
pub use formatter::{FormatError, Formatter};
