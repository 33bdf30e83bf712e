//! Resampling configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigError;

/// Milliseconds per minute.
pub const MINUTE_MS: i64 = 60_000;

/// Default bucket epoch: 2017-01-01T00:00:00.000Z in milliseconds.
pub const DEFAULT_EPOCH_MS: i64 = 1_483_228_800_000;

/// Output bar width in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Period(u32);

impl Period {
    /// Creates a period of the given number of minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if `minutes` is zero.
    pub const fn new(minutes: u32) -> Result<Self, ConfigError> {
        if minutes == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(Self(minutes))
    }

    /// Returns the period in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.0
    }

    /// Returns the period in milliseconds.
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.0 as i64 * MINUTE_MS
    }
}

impl TryFrom<u32> for Period {
    type Error = ConfigError;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    /// Parses `30`, `30m`, `4h` or `1d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let (digits, scale) = match lower.as_bytes().last() {
            Some(b'm') => (&lower[..lower.len() - 1], 1),
            Some(b'h') => (&lower[..lower.len() - 1], 60),
            Some(b'd') => (&lower[..lower.len() - 1], 1440),
            _ => (lower.as_str(), 1),
        };
        digits
            .parse::<u32>()
            .ok()
            .and_then(|n| n.checked_mul(scale))
            .and_then(|minutes| Self::new(minutes).ok())
            .ok_or_else(|| PeriodParseError(s.to_string()))
    }
}

/// Error returned when parsing an invalid period string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodParseError(String);

impl std::fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid period '{}', expected a positive number of minutes (e.g. 30, 30m, 4h, 1d)",
            self.0
        )
    }
}

impl std::error::Error for PeriodParseError {}

/// Immutable configuration for one aggregation pass.
///
/// Bucket boundaries sit at `epoch_ms + offset_minutes * 60000 + k * period_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResampleConfig {
    period: Period,
    offset_minutes: u32,
    epoch_ms: i64,
}

impl ResampleConfig {
    /// Creates a configuration using [`DEFAULT_EPOCH_MS`].
    ///
    /// # Errors
    ///
    /// Returns an error if `offset_minutes >= period`.
    pub const fn new(period: Period, offset_minutes: u32) -> Result<Self, ConfigError> {
        if offset_minutes >= period.minutes() {
            return Err(ConfigError::OffsetOutOfRange {
                offset: offset_minutes,
                period: period.minutes(),
            });
        }
        Ok(Self {
            period,
            offset_minutes,
            epoch_ms: DEFAULT_EPOCH_MS,
        })
    }

    /// Sets the reference instant used as the zero point of bucket arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error if the first bucket of the largest offset would not
    /// close within the `i64` millisecond range.
    pub fn with_epoch_ms(mut self, epoch_ms: i64) -> Result<Self, ConfigError> {
        check_epoch(self.period, epoch_ms)?;
        self.epoch_ms = epoch_ms;
        Ok(self)
    }

    /// Returns one configuration per phase offset `0..period`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same condition as [`ResampleConfig::with_epoch_ms`].
    pub fn offsets(
        period: Period,
        epoch_ms: i64,
    ) -> Result<impl Iterator<Item = Self>, ConfigError> {
        check_epoch(period, epoch_ms)?;
        Ok((0..period.minutes()).map(move |offset_minutes| Self {
            period,
            offset_minutes,
            epoch_ms,
        }))
    }

    /// Returns the output period.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    /// Returns the phase offset in minutes.
    #[must_use]
    pub const fn offset_minutes(&self) -> u32 {
        self.offset_minutes
    }

    /// Returns the epoch in milliseconds.
    #[must_use]
    pub const fn epoch_ms(&self) -> i64 {
        self.epoch_ms
    }

    /// Returns the period length in milliseconds.
    #[must_use]
    pub const fn period_ms(&self) -> i64 {
        self.period.milliseconds()
    }

    /// Returns the first bucket boundary: epoch shifted by the phase offset.
    #[must_use]
    pub const fn base_ms(&self) -> i64 {
        self.epoch_ms
            .saturating_add(self.offset_minutes as i64 * MINUTE_MS)
    }
}

// base_ms for offset `period - 1`, plus one full period.
fn check_epoch(period: Period, epoch_ms: i64) -> Result<(), ConfigError> {
    period
        .milliseconds()
        .checked_mul(2)
        .and_then(|span| epoch_ms.checked_add(span - MINUTE_MS - 1))
        .map(|_| ())
        .ok_or(ConfigError::EpochOutOfRange { epoch_ms })
}

/// How the record parser treats numeric sub-fields that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Unparsable numbers become zero; the line is kept.
    #[default]
    Lenient,
    /// Unparsable numbers reject the line.
    Strict,
}

impl ParseMode {
    /// Returns true for [`ParseMode::Strict`].
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_rejects_zero() {
        assert_eq!(Period::new(0), Err(ConfigError::ZeroPeriod));
        assert_eq!(Period::new(30).unwrap().milliseconds(), 1_800_000);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!("30".parse::<Period>().unwrap().minutes(), 30);
        assert_eq!("15m".parse::<Period>().unwrap().minutes(), 15);
        assert_eq!("4H".parse::<Period>().unwrap().minutes(), 240);
        assert_eq!("1d".parse::<Period>().unwrap().minutes(), 1440);
        assert!("0".parse::<Period>().is_err());
        assert!("m".parse::<Period>().is_err());
        assert!("abc".parse::<Period>().is_err());
    }

    #[test]
    fn test_offset_out_of_range() {
        let period = Period::new(3).unwrap();
        assert!(ResampleConfig::new(period, 2).is_ok());
        assert_eq!(
            ResampleConfig::new(period, 3),
            Err(ConfigError::OffsetOutOfRange {
                offset: 3,
                period: 3
            })
        );
    }

    #[test]
    fn test_base_ms() {
        let config = ResampleConfig::new(Period::new(30).unwrap(), 7).unwrap();
        assert_eq!(config.epoch_ms(), DEFAULT_EPOCH_MS);
        assert_eq!(config.base_ms(), DEFAULT_EPOCH_MS + 7 * MINUTE_MS);

        let config = config.with_epoch_ms(0).unwrap();
        assert_eq!(config.base_ms(), 7 * MINUTE_MS);
    }

    #[test]
    fn test_offsets_sweep() {
        let offsets: Vec<_> = ResampleConfig::offsets(Period::new(5).unwrap(), 0)
            .unwrap()
            .map(|c| c.offset_minutes())
            .collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_epoch_near_max_rejected() {
        let period = Period::new(30).unwrap();
        let config = ResampleConfig::new(period, 29).unwrap();
        assert_eq!(
            config.with_epoch_ms(i64::MAX),
            Err(ConfigError::EpochOutOfRange { epoch_ms: i64::MAX })
        );
        assert!(ResampleConfig::offsets(period, i64::MAX).is_err());

        // The last offset's first bucket closes exactly at i64::MAX.
        let edge = i64::MAX - 59 * MINUTE_MS + 1;
        let config = config.with_epoch_ms(edge).unwrap();
        assert_eq!(config.base_ms() + period.milliseconds() - 1, i64::MAX);
        assert!(config.with_epoch_ms(edge + 1).is_err());
    }
}
