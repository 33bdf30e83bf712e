//! Binance public-data archive layout.

use rekline_types::{Month, MonthRange, Period};
use std::path::{Path, PathBuf};

/// Market segment used when none is given.
pub const DEFAULT_MARKET: &str = "spot";

/// Name of the output directory created under the archive root.
pub const OUTPUT_DIR_NAME: &str = "composed_klines";

/// Locations of source archives and resampled outputs.
///
/// Source archives follow the layout produced by the Binance public-data
/// download script:
///
/// `{root}/data/{market}/monthly/klines/{SYMBOL}/1m/{download_range}/{SYMBOL}-1m-{YYYY-MM}.zip`
///
/// Outputs are written one file per symbol and phase offset:
///
/// `{output_dir}/{market}-klines-{SYMBOL}-{N}m-{OFFSET:02}.csv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    root: PathBuf,
    market: String,
    download_range: String,
    output_dir: PathBuf,
}

impl ArchiveLayout {
    /// Creates a layout rooted at `root` for the given download range label.
    ///
    /// The output directory defaults to `{root}/composed_klines`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, download_range: impl Into<String>) -> Self {
        let root = root.into();
        let output_dir = root.join(OUTPUT_DIR_NAME);
        Self {
            root,
            market: DEFAULT_MARKET.to_string(),
            download_range: download_range.into(),
            output_dir,
        }
    }

    /// Sets the market segment (e.g. `spot`).
    #[must_use]
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Sets the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Returns the archive root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the market segment.
    #[must_use]
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Returns the download range label.
    #[must_use]
    pub fn download_range(&self) -> &str {
        &self.download_range
    }

    /// Returns the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Builds the path of one month's 1-minute archive.
    ///
    /// # Example
    ///
    /// ```
    /// use rekline_source::ArchiveLayout;
    /// use rekline_types::Month;
    ///
    /// let layout = ArchiveLayout::new("/data", "2017-01-01_2023-12-31");
    /// let path = layout.archive_path("btcusdt", Month { year: 2017, month: 8 });
    /// assert_eq!(
    ///     path.to_str().unwrap(),
    ///     "/data/data/spot/monthly/klines/BTCUSDT/1m/2017-01-01_2023-12-31/BTCUSDT-1m-2017-08.zip"
    /// );
    /// ```
    #[must_use]
    pub fn archive_path(&self, symbol: &str, month: Month) -> PathBuf {
        let symbol = symbol.to_uppercase();
        self.root
            .join("data")
            .join(&self.market)
            .join("monthly")
            .join("klines")
            .join(&symbol)
            .join("1m")
            .join(&self.download_range)
            .join(format!("{symbol}-1m-{month}.zip"))
    }

    /// Builds the output path for one symbol, period and phase offset.
    #[must_use]
    pub fn output_path(&self, symbol: &str, period: Period, offset_minutes: u32) -> PathBuf {
        self.output_dir.join(format!(
            "{}-klines-{}-{}m-{:02}.csv",
            self.market,
            symbol.to_uppercase(),
            period.minutes(),
            offset_minutes
        ))
    }

    /// Lists which monthly archives exist for `symbol`.
    #[must_use]
    pub fn scan(&self, symbol: &str, months: MonthRange) -> ArchiveScan {
        let mut scan = ArchiveScan::default();
        for month in months.months() {
            let path = self.archive_path(symbol, month);
            if path.is_file() {
                scan.present.push((month, path));
            } else {
                scan.missing.push(month);
            }
        }
        scan
    }
}

/// Result of [`ArchiveLayout::scan`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveScan {
    /// Months with an archive on disk, in chronological order.
    pub present: Vec<(Month, PathBuf)>,
    /// Months without an archive, in chronological order.
    pub missing: Vec<Month>,
}

impl ArchiveScan {
    /// Returns true if no archive was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }
}
