//! Kline record representation.

use serde::{Deserialize, Serialize};

/// Number of comma separated fields in a kline line.
pub const KLINE_FIELDS: usize = 12;

/// A single OHLCV kline, as published in Binance public-data archives.
///
/// Field order matches the on-disk column order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kline {
    /// Inclusive start of the interval, milliseconds since the Unix epoch.
    pub open_time: i64,
    /// Opening price.
    pub open: f64,
    /// Highest price during the interval.
    pub high: f64,
    /// Lowest price during the interval.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Base asset volume.
    pub volume: f64,
    /// Inclusive end of the interval, milliseconds since the Unix epoch.
    pub close_time: i64,
    /// Quote asset volume.
    pub quote_volume: f64,
    /// Number of trades.
    pub trade_count: i64,
    /// Taker buy base asset volume.
    pub taker_buy_base_volume: f64,
    /// Taker buy quote asset volume.
    pub taker_buy_quote_volume: f64,
    /// Unused field, carried through unchanged.
    pub ignore: f64,
}

impl Kline {
    /// Creates a kline from its price fields with zeroed volumes.
    #[must_use]
    pub const fn new(
        open_time: i64,
        close_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume: 0.0,
            close_time,
            quote_volume: 0.0,
            trade_count: 0,
            taker_buy_base_volume: 0.0,
            taker_buy_quote_volume: 0.0,
            ignore: 0.0,
        }
    }

    /// Sets the base volume.
    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the trade count.
    #[must_use]
    pub const fn with_trade_count(mut self, trade_count: i64) -> Self {
        self.trade_count = trade_count;
        self
    }

    /// Returns the interval length in milliseconds (inclusive on both ends).
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.close_time - self.open_time + 1
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns true if this is a bullish (green) kline.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}
