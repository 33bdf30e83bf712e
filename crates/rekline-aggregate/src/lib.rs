//! Phase-shifted kline resampling for the rekline kline resampler.
//!
//! This crate provides kline-to-kline aggregation:
//!
//! - [`Buckets`] - Bucket boundary arithmetic for a period and phase offset
//! - [`Accumulator`] - Running OHLCV state of the bucket being filled
//! - [`KlineAggregator`] - Streaming aggregator emitting completed buckets
//! - [`resample`] - Iterator adapter over an ordered kline sequence

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/rekline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accumulator;
mod aggregator;
mod bucket;

pub use accumulator::Accumulator;
pub use aggregator::{KlineAggregator, Resample, aggregate_klines, resample};
pub use bucket::Buckets;
