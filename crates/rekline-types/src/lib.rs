//! Core types for the rekline kline resampler.
//!
//! This crate provides the fundamental data structures used throughout rekline:
//!
//! - [`Kline`] - A single 12-field OHLCV kline record
//! - [`Period`] - Output bar width in whole minutes
//! - [`ResampleConfig`] - Period, phase offset and epoch for one aggregation pass
//! - [`ParseMode`] - Numeric leniency of the record parser
//! - [`MonthRange`] - Inclusive range of calendar months for archive discovery

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rekline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod kline;
mod month_range;

pub use config::{DEFAULT_EPOCH_MS, MINUTE_MS, ParseMode, Period, PeriodParseError, ResampleConfig};
pub use error::{ConfigError, MonthRangeError, ParseError, ReklineError, Result};
pub use kline::{KLINE_FIELDS, Kline};
pub use month_range::{Month, MonthIterator, MonthRange};
