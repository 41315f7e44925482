use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monetary amount held as an exact count of minor units (cents).
///
/// Parsed directly from two-decimal text so rule classification never
/// depends on binary floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(u64);

impl Cents {
    pub const fn from_minor_units(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn minor_units(self) -> u64 {
        self.0
    }

    /// True when the amount is a whole number of currency units.
    pub const fn is_whole_units(self) -> bool {
        self.0 % 100 == 0
    }

    /// True when the amount is an exact multiple of 0.25 currency units.
    pub const fn is_quarter_multiple(self) -> bool {
        self.0 % 25 == 0
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountParseError {
    pub value: String,
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a non-negative amount with two decimal places",
            self.value
        )
    }
}

impl std::error::Error for AmountParseError {}

impl FromStr for Cents {
    type Err = AmountParseError;

    /// Accepts exactly the shape `<digits>.<2 digits>`, e.g. `"35.35"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = || AmountParseError {
            value: raw.to_string(),
        };

        let (units, fraction) = raw.split_once('.').ok_or_else(err)?;
        if units.is_empty()
            || fraction.len() != 2
            || !units.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let units: u64 = units.parse().map_err(|_| err())?;
        let fraction: u64 = fraction.parse().map_err(|_| err())?;

        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Cents)
            .ok_or_else(err)
    }
}

/// Opaque identifier handed out on submission; carries no decodable meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReceiptId(pub String);

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One purchased product entry within a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub short_description: String,
    pub price: Cents,
}

/// A purchase record that has passed validation. Immutable afterwards; the
/// scorer never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<LineItem>,
    pub total: Cents,
}
