//! Kline parsing and archive reading for the rekline kline resampler.
//!
//! This crate provides the input pipeline:
//!
//! - [`parse::parse_kline`] - Text line to [`Kline`](rekline_types::Kline) decoding
//! - [`ArchiveLayout`] - Binance public-data directory and file naming
//! - [`archive::read_archive_member`] - Zip member decompression
//! - [`kline_batches`] - Chronological per-month kline batches

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rekline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod archive;
mod layout;
pub mod parse;
mod stream;

pub use archive::{ArchiveError, read_archive_member, read_first_member};
pub use layout::{ArchiveLayout, ArchiveScan, DEFAULT_MARKET, OUTPUT_DIR_NAME};
pub use parse::{parse_kline, parse_kline_with};
pub use stream::{BatchStatus, KlineBatch, kline_batches, parse_batch};
