use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::EngineError;

/// Signed transaction amount stored as an integer number of hundredths.
///
/// No currency is attached and the sign carries no meaning for the engine:
/// whether a record is money in or money out is the job of
/// [`TransactionKind`](crate::TransactionKind).
///
/// # Examples
///
/// ```rust
/// use pfm_engine::Amount;
///
/// let amount: Amount = "10,5".parse().unwrap();
/// assert_eq!(amount.hundredths(), 1050);
/// assert_eq!(amount.to_string(), "10.50");
/// assert_eq!(Amount::from_whole(500).to_string(), "500");
/// assert!("12.345".parse::<Amount>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from integer hundredths.
    #[must_use]
    pub const fn new(hundredths: i64) -> Self {
        Self(hundredths)
    }

    /// Creates an amount without a fractional part.
    ///
    /// # Panics
    ///
    /// Panics if `units * 100` does not fit in an `i64`. Use
    /// [`Amount::checked_from_whole`] for untrusted input.
    #[must_use]
    pub const fn from_whole(units: i64) -> Self {
        match Self::checked_from_whole(units) {
            Some(amount) => amount,
            None => panic!("amount out of range"),
        }
    }

    #[must_use]
    pub const fn checked_from_whole(units: i64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(hundredths) => Some(Self(hundredths)),
            None => None,
        }
    }

    #[must_use]
    pub const fn hundredths(self) -> i64 {
        self.0
    }

    fn from_f64(value: f64) -> Result<Self, EngineError> {
        let scaled = (value * 100.0).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount(format!("{value} is out of range")));
        }
        if (value * 100.0 - scaled).abs() > 1e-6 {
            return Err(EngineError::InvalidAmount("too many decimals".to_string()));
        }
        Ok(Self(scaled as i64))
    }
}

/// Whole amounts print without decimals, everything else with two.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let hundredths = abs % 100;
        if hundredths == 0 {
            write!(f, "{sign}{units}")
        } else {
            write!(f, "{sign}{units}.{hundredths:02}")
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for Amount {
    type Err = EngineError;

    /// Parses a decimal string.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// At most two fractional digits; a trailing separator (`"5."`) is
    /// accepted so half-typed input still parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount(format!("\"{}\" is not a number", s.trim()));
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let fraction_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| overflow())?;

        let hundredths: i64 = match fraction_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(hundredths))
            .ok_or_else(overflow)?;

        Ok(Self(if negative { -total } else { total }))
    }
}

/// Whole amounts are written as integers, the rest as decimal strings so no
/// precision is lost on the way through a float.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.0 / 100)
        } else {
            serializer.collect_str(self)
        }
    }
}

/// Seed files may carry amounts as JSON numbers or as decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum AmountRepr {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match AmountRepr::deserialize(deserializer)? {
            AmountRepr::Integer(units) => Amount::checked_from_whole(units)
                .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string())),
            AmountRepr::Float(value) => Amount::from_f64(value),
            AmountRepr::Text(text) => text.parse(),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
