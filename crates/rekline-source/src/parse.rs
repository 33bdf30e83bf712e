//! Text kline parsing.

use rekline_types::{KLINE_FIELDS, Kline, ParseError, ParseMode};

/// Column names, in on-disk order.
const FIELD_NAMES: [&str; KLINE_FIELDS] = [
    "open_time",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "close_time",
    "quote_volume",
    "trade_count",
    "taker_buy_base_volume",
    "taker_buy_quote_volume",
    "ignore",
];

/// Parses one comma separated kline line in lenient mode.
///
/// The line is trimmed first. It must split into exactly 12 fields:
///
/// `open_time,open,high,low,close,volume,close_time,quote_volume,trade_count,taker_buy_base_volume,taker_buy_quote_volume,ignore`
///
/// Each field is trimmed before numeric parsing, so `"1, 2"` reads the
/// second field as `2`. Numeric fields that still fail to parse become `0`
/// rather than rejecting the line. Use [`parse_kline_with`] and
/// [`ParseMode::Strict`] to reject them.
///
/// # Errors
///
/// Returns [`ParseError::EmptyLine`] for a blank line and
/// [`ParseError::FieldCount`] when the field count is not 12.
///
/// # Example
///
/// ```
/// use rekline_source::parse_kline;
///
/// let kline = parse_kline("0,1,2,0.5,1.5,10,59999,15,3,4,6,0").unwrap();
/// assert_eq!(kline.close_time, 59_999);
/// assert_eq!(kline.trade_count, 3);
/// ```
pub fn parse_kline(line: &str) -> Result<Kline, ParseError> {
    parse_kline_with(line, ParseMode::Lenient)
}

/// Parses one comma separated kline line with the given numeric leniency.
///
/// # Errors
///
/// Returns [`ParseError::EmptyLine`], [`ParseError::FieldCount`], or in
/// strict mode [`ParseError::InvalidNumber`].
pub fn parse_kline_with(line: &str, mode: ParseMode) -> Result<Kline, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::EmptyLine);
    }

    let mut fields = [""; KLINE_FIELDS];
    let mut found = 0;
    for piece in line.split(',') {
        if let Some(slot) = fields.get_mut(found) {
            *slot = piece;
        }
        found += 1;
    }
    if found != KLINE_FIELDS {
        return Err(ParseError::FieldCount {
            found,
            expected: KLINE_FIELDS,
        });
    }

    let row = Fields { fields, mode };
    Ok(Kline {
        open_time: row.int(0)?,
        open: row.float(1)?,
        high: row.float(2)?,
        low: row.float(3)?,
        close: row.float(4)?,
        volume: row.float(5)?,
        close_time: row.int(6)?,
        quote_volume: row.float(7)?,
        trade_count: row.int(8)?,
        taker_buy_base_volume: row.float(9)?,
        taker_buy_quote_volume: row.float(10)?,
        ignore: row.float(11)?,
    })
}

/// Split fields of one line.
struct Fields<'a> {
    fields: [&'a str; KLINE_FIELDS],
    mode: ParseMode,
}

impl Fields<'_> {
    fn int(&self, idx: usize) -> Result<i64, ParseError> {
        self.number(idx, |s| s.parse::<i64>().ok())
    }

    fn float(&self, idx: usize) -> Result<f64, ParseError> {
        self.number(idx, |s| s.parse::<f64>().ok())
    }

    #[inline]
    fn number<T: Default>(
        &self,
        idx: usize,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, ParseError> {
        let raw = self.fields[idx];
        match parse(raw.trim()) {
            Some(value) => Ok(value),
            None if self.mode.is_strict() => Err(ParseError::InvalidNumber {
                field: FIELD_NAMES[idx],
                value: raw.to_string(),
            }),
            None => Ok(T::default()),
        }
    }
}
