//! Bucket boundary arithmetic.

use rekline_types::ResampleConfig;

/// Fixed-width, phase-shifted time buckets.
///
/// ```text
/// base            = epoch + offset * 60000
/// open_time(t)    = (t - base) / period_ms * period_ms + base
/// close_time(t)   = open_time(t) + period_ms - 1
/// ```
///
/// Timestamps earlier than `base` have no bucket. Inputs are expected to
/// start at or after the epoch, so this only rejects bad records. The same
/// holds for timestamps whose bucket would close past `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buckets {
    period_ms: i64,
    base_ms: i64,
}

impl Buckets {
    /// Creates the bucket grid for a configuration.
    #[must_use]
    pub const fn new(config: &ResampleConfig) -> Self {
        Self {
            period_ms: config.period_ms(),
            base_ms: config.base_ms(),
        }
    }

    /// Returns the bucket width in milliseconds.
    #[must_use]
    pub const fn period_ms(&self) -> i64 {
        self.period_ms
    }

    /// Returns the first bucket boundary.
    #[must_use]
    pub const fn base_ms(&self) -> i64 {
        self.base_ms
    }

    /// Returns the inclusive start of the bucket containing `timestamp`.
    ///
    /// Returns `None` if `timestamp` precedes the first boundary or its
    /// bucket end is not representable.
    #[must_use]
    pub const fn open_time(&self, timestamp: i64) -> Option<i64> {
        if timestamp < self.base_ms {
            return None;
        }
        let Some(elapsed) = timestamp.checked_sub(self.base_ms) else {
            return None;
        };
        // open <= timestamp, so this cannot overflow.
        let open = elapsed / self.period_ms * self.period_ms + self.base_ms;
        if open.checked_add(self.period_ms - 1).is_none() {
            return None;
        }
        Some(open)
    }

    /// Returns the inclusive end of the bucket starting at `open_time`.
    ///
    /// Saturates at `i64::MAX`; [`Buckets::open_time`] never yields a start
    /// for which that happens.
    #[must_use]
    pub const fn close_time(&self, open_time: i64) -> i64 {
        open_time.saturating_add(self.period_ms - 1)
    }
}
