//! Streaming kline-to-kline aggregation.

use rekline_types::{Kline, ResampleConfig};

use crate::{Accumulator, Buckets};

/// Streaming kline aggregator for one (instrument, phase offset) pass.
///
/// Records must arrive in non-decreasing `open_time` order; the aggregator
/// does not sort. A completed bucket is returned as soon as a record from a
/// different bucket arrives, and buckets with no records are never emitted.
#[derive(Debug)]
pub struct KlineAggregator {
    config: ResampleConfig,
    buckets: Buckets,
    current: Accumulator,
    skipped: u64,
    emitted: u64,
}

impl KlineAggregator {
    /// Creates a new aggregator for the given configuration.
    #[must_use]
    pub fn new(config: ResampleConfig) -> Self {
        Self {
            config,
            buckets: Buckets::new(&config),
            current: Accumulator::new(),
            skipped: 0,
            emitted: 0,
        }
    }

    /// Returns the configuration being aggregated to.
    #[must_use]
    pub const fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// Returns the number of records that fell outside the bucket grid.
    #[must_use]
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Returns the number of buckets emitted so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Processes a kline, potentially emitting a completed bucket.
    ///
    /// Returns `Some(bucket)` when this kline starts a new bucket and the
    /// previous one held records, `None` otherwise.
    pub fn process(&mut self, kline: Kline) -> Option<Kline> {
        let Some(open_time) = self.buckets.open_time(kline.open_time) else {
            self.skipped += 1;
            tracing::warn!(
                open_time = kline.open_time,
                base = self.buckets.base_ms(),
                "kline is outside the bucket grid, skipping"
            );
            return None;
        };

        let mut completed = None;
        if self.current.is_empty() || open_time != self.current.open_time() {
            completed = self.flush();
            self.current
                .open(open_time, self.buckets.close_time(open_time));
        }
        self.current.merge(&kline);

        completed
    }

    /// Emits the bucket being filled, if it holds any record, and resets.
    pub fn flush(&mut self) -> Option<Kline> {
        let bucket = self.current.take();
        if bucket.is_some() {
            self.emitted += 1;
        }
        bucket
    }

    /// Finishes aggregation, returning any remaining partial bucket.
    #[must_use]
    pub fn finish(mut self) -> Option<Kline> {
        self.flush()
    }
}

/// Iterator adapter that resamples an ordered kline sequence.
///
/// Created by [`resample`].
#[derive(Debug)]
pub struct Resample<I> {
    inner: I,
    aggregator: Option<KlineAggregator>,
}

impl<I: Iterator<Item = Kline>> Iterator for Resample<I> {
    type Item = Kline;

    fn next(&mut self) -> Option<Self::Item> {
        let aggregator = self.aggregator.as_mut()?;
        for kline in self.inner.by_ref() {
            if let Some(bucket) = aggregator.process(kline) {
                return Some(bucket);
            }
        }
        self.aggregator.take().and_then(KlineAggregator::finish)
    }
}

/// Resamples `klines` lazily into buckets of `config`.
///
/// # Example
///
/// ```
/// use rekline_aggregate::resample;
/// use rekline_types::{Kline, Period, ResampleConfig};
///
/// let config = ResampleConfig::new(Period::new(2).unwrap(), 0)
///     .unwrap()
///     .with_epoch_ms(0)
///     .unwrap();
/// let klines = (0..4).map(|i| Kline::new(i * 60_000, i * 60_000 + 59_999, 1.0, 1.0, 1.0, 1.0));
///
/// let bars: Vec<_> = resample(klines, config).collect();
/// assert_eq!(bars.len(), 2);
/// assert_eq!(bars[1].open_time, 120_000);
/// ```
pub fn resample<I>(klines: I, config: ResampleConfig) -> Resample<I::IntoIter>
where
    I: IntoIterator<Item = Kline>,
{
    Resample {
        inner: klines.into_iter(),
        aggregator: Some(KlineAggregator::new(config)),
    }
}

/// Resamples a slice of klines into a vector of buckets.
#[must_use]
pub fn aggregate_klines(klines: &[Kline], config: ResampleConfig) -> Vec<Kline> {
    resample(klines.iter().copied(), config).collect()
}
