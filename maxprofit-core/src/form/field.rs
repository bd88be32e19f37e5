//! Form fields and their constraints.
//!
//! Each field is validated on its own; there is no cross-field check (the
//! begin point is not required to precede the end point).

use std::fmt;
use std::str::FromStr;

use chrono::{Local, LocalResult, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest amount the form accepts.
pub const MIN_AMOUNT: f64 = 1.0;

/// Most fractional digits an amount may carry.
const AMOUNT_DECIMALS: u32 = 2;

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// A field identifier the form does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized field id {0:?}")]
pub struct UnknownField(pub String);

/// The four inputs of the max-profit form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldId {
    Stock,
    Begin,
    End,
    Amount,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [FieldId::Stock, FieldId::Begin, FieldId::End, FieldId::Amount];

    /// Identifier used by change events.
    pub fn id(self) -> &'static str {
        match self {
            FieldId::Stock => "stock",
            FieldId::Begin => "begin",
            FieldId::End => "end",
            FieldId::Amount => "amount",
        }
    }

    /// Stable identifier for test automation.
    pub fn test_id(self) -> &'static str {
        match self {
            FieldId::Stock => "symbol-field",
            FieldId::Begin => "begin",
            FieldId::End => "end",
            FieldId::Amount => "amount-field",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::Stock => "Stock",
            FieldId::Begin => "Begin date",
            FieldId::End => "End date",
            FieldId::Amount => "Amount",
        }
    }

    /// Inline feedback shown when the field is invalid.
    pub fn feedback(self) -> &'static str {
        match self {
            FieldId::Stock => "The field is required",
            FieldId::Begin | FieldId::End => "Enter a date and time as YYYY-MM-DDTHH:MM",
            FieldId::Amount => "Amount must be a positive number with max 2 decimals",
        }
    }

    pub fn is_valid(self, value: &str) -> bool {
        match self {
            FieldId::Stock => is_valid_symbol(value),
            FieldId::Begin | FieldId::End => is_valid_datetime(value),
            FieldId::Amount => is_valid_amount(value),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Symbol: required, any non-empty text.
pub fn is_valid_symbol(value: &str) -> bool {
    !value.is_empty()
}

/// Parse an amount. Returns `None` for non-numeric or non-finite text.
pub fn parse_amount(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Amount: numeric, at least [`MIN_AMOUNT`], at most two fractional digits.
///
/// The digit count comes from the text, not the parsed float, so large
/// amounts cannot hide extra decimals in rounding error.
pub fn is_valid_amount(value: &str) -> bool {
    match fraction_digits(value) {
        Some(digits) if digits <= AMOUNT_DECIMALS => {}
        _ => return false,
    }
    parse_amount(value).is_some_and(|amount| amount >= MIN_AMOUNT)
}

/// Significant fractional digits of a decimal literal such as `100.10` or
/// `0.1e2`. Trailing zeros do not count. `None` when the text is not a plain
/// decimal number.
fn fraction_digits(value: &str) -> Option<u32> {
    let unsigned = value.trim().trim_start_matches(['+', '-']);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i64>().ok()?),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    let scale = (frac_part.len() as i64).saturating_sub(exponent);
    if scale <= 0 {
        return Some(0);
    }
    let trailing_zeros = int_part
        .bytes()
        .chain(frac_part.bytes())
        .rev()
        .take_while(|&b| b == b'0')
        .count() as i64;
    u32::try_from((scale - trailing_zeros).max(0)).ok()
}

/// Parse a `datetime-local` value (`YYYY-MM-DDTHH:MM`, optional seconds).
pub fn parse_local_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub fn is_valid_datetime(value: &str) -> bool {
    parse_local_datetime(value).is_some()
}

/// Seconds since the Unix epoch for a local date-time, or `None` when the
/// text does not parse.
///
/// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant;
/// times inside a DST gap use the offset in force at that UTC instant.
pub fn local_epoch_seconds(value: &str) -> Option<i64> {
    let naive = parse_local_datetime(value)?;
    let seconds = match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        LocalResult::None => {
            let offset = Local.offset_from_utc_datetime(&naive);
            naive.and_utc().timestamp() - i64::from(offset.local_minus_utc())
        }
    };
    Some(seconds)
}
