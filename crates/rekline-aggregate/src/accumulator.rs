//! Running OHLCV state for one bucket.

use rekline_types::Kline;

/// Mutable aggregate of the bucket currently being filled.
///
/// The bucket's `open_time`/`close_time` come from [`Accumulator::open`],
/// never from the merged records. `open`, `high` and `low` are taken from
/// the first merged record; afterwards `high`/`low` only widen. `close` and
/// `ignore` follow the latest record and the volume and trade fields are
/// running sums. The trade count saturates at `i64::MAX`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulator {
    kline: Kline,
    count: usize,
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of merged records.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Returns true if no record has been merged since the last reset.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the bucket start set by [`Accumulator::open`].
    #[must_use]
    pub const fn open_time(&self) -> i64 {
        self.kline.open_time
    }

    /// Returns the aggregate built so far.
    #[must_use]
    pub const fn current(&self) -> &Kline {
        &self.kline
    }

    /// Sets the bucket boundaries.
    pub const fn open(&mut self, open_time: i64, close_time: i64) {
        self.kline.open_time = open_time;
        self.kline.close_time = close_time;
    }

    /// Merges one source record into the bucket.
    pub fn merge(&mut self, kline: &Kline) {
        let acc = &mut self.kline;
        if self.count == 0 {
            acc.open = kline.open;
            acc.high = kline.high;
            acc.low = kline.low;
        } else {
            if kline.high > acc.high {
                acc.high = kline.high;
            }
            if kline.low < acc.low {
                acc.low = kline.low;
            }
        }
        acc.close = kline.close;
        acc.ignore = kline.ignore;
        acc.volume += kline.volume;
        acc.quote_volume += kline.quote_volume;
        acc.trade_count = acc.trade_count.saturating_add(kline.trade_count);
        acc.taker_buy_base_volume += kline.taker_buy_base_volume;
        acc.taker_buy_quote_volume += kline.taker_buy_quote_volume;
        self.count += 1;
    }

    /// Clears all fields, including the bucket boundaries.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the finished bucket if it holds any record, then resets.
    pub fn take(&mut self) -> Option<Kline> {
        let finished = (!self.is_empty()).then_some(self.kline);
        self.reset();
        finished
    }
}
