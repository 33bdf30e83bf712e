//! Synthetic kline data for rekline benchmarks.

use rekline_lib::{DEFAULT_EPOCH_MS, Kline, MINUTE_MS};

/// Minutes in a 31-day month, the size of the largest monthly archive.
pub const MONTH_MINUTES: usize = 31 * 24 * 60;

/// Generates `count` contiguous 1-minute klines starting at the default epoch.
///
/// Prices follow a deterministic zig-zag so every bucket has a distinct
/// high and low.
#[must_use]
pub fn synthetic_klines(count: usize) -> Vec<Kline> {
    (0..count)
        .map(|i| {
            let open_time = DEFAULT_EPOCH_MS + i as i64 * MINUTE_MS;
            let mid = 20_000.0 + ((i * 7919) % 1000) as f64;
            Kline {
                quote_volume: mid * 1.5,
                taker_buy_base_volume: 0.75,
                taker_buy_quote_volume: mid * 0.75,
                ..Kline::new(open_time, open_time + MINUTE_MS - 1, mid, mid + 5.0, mid - 5.0, mid + 1.0)
                    .with_volume(1.5)
                    .with_trade_count((i % 50) as i64 + 1)
            }
        })
        .collect()
}

/// Renders klines as archive lines, the way Binance publishes them.
#[must_use]
pub fn synthetic_csv(klines: &[Kline]) -> String {
    let mut text = String::with_capacity(klines.len() * 120);
    for k in klines {
        text.push_str(&format!(
            "{},{:.8},{:.8},{:.8},{:.8},{:.8},{},{:.8},{},{:.8},{:.8},0\n",
            k.open_time,
            k.open,
            k.high,
            k.low,
            k.close,
            k.volume,
            k.close_time,
            k.quote_volume,
            k.trade_count,
            k.taker_buy_base_volume,
            k.taker_buy_quote_volume,
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rekline_lib::parse_kline;

    #[test]
    fn test_synthetic_csv_parses_back() {
        let klines = synthetic_klines(10);
        let text = synthetic_csv(&klines);
        let parsed: Vec<Kline> = text.lines().map(|l| parse_kline(l).unwrap()).collect();
        assert_eq!(parsed.len(), 10);
        assert_eq!(parsed[9].open_time, klines[9].open_time);
        assert_eq!(parsed[9].trade_count, klines[9].trade_count);
    }
}
