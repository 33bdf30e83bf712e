//! Output format abstraction.

use rekline_types::{Kline, ReklineError};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FormatError> for ReklineError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::Io(io) => Self::Io(io),
        }
    }
}

/// Trait for kline output formatters.
///
/// Formatters write one kline at a time so a pass never has to hold its
/// whole output in memory.
pub trait Formatter: Send + Sync {
    /// Writes the header, if this formatter has one.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_header<W: Write>(&self, writer: W) -> Result<(), FormatError>;

    /// Writes a single kline.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_kline<W: Write>(&self, kline: &Kline, writer: W) -> Result<(), FormatError>;

    /// Writes a header followed by every kline.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_klines<W: Write>(&self, klines: &[Kline], mut writer: W) -> Result<(), FormatError> {
        self.write_header(&mut writer)?;
        for kline in klines {
            self.write_kline(kline, &mut writer)?;
        }
        Ok(())
    }
}
