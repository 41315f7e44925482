use super::domain::{Cents, LineItem, Receipt};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fmt;

/// Wire shape of a submitted receipt before any checking. All amounts and
/// timestamps arrive as strings and stay strings until validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    pub items: Vec<RawLineItem>,
    pub total: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    pub short_description: String,
    pub price: String,
}

/// Why a submission was rejected. Callers outside the crate only ever see
/// the uniform invalid-input signal; the detail here is for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyRetailer,
    BadPurchaseDate { value: String },
    BadPurchaseTime { value: String },
    NoItems,
    EmptyItemDescription { index: usize },
    BadItemPrice { index: usize, value: String },
    BadTotal { value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyRetailer => write!(f, "retailer must be non-empty"),
            ValidationError::BadPurchaseDate { value } => {
                write!(f, "purchaseDate '{value}' is not a YYYY-MM-DD date")
            }
            ValidationError::BadPurchaseTime { value } => {
                write!(f, "purchaseTime '{value}' is not a 24-hour HH:MM time")
            }
            ValidationError::NoItems => write!(f, "items must contain at least one entry"),
            ValidationError::EmptyItemDescription { index } => {
                write!(f, "item {index} has an empty shortDescription")
            }
            ValidationError::BadItemPrice { index, value } => {
                write!(f, "item {index} price '{value}' is not a two-decimal amount")
            }
            ValidationError::BadTotal { value } => {
                write!(f, "total '{value}' is not a two-decimal amount")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks a raw submission and normalizes it into a typed [`Receipt`].
///
/// The first failing check aborts the whole validation; no partial receipt
/// is ever produced.
pub fn validate(raw: RawReceipt) -> Result<Receipt, ValidationError> {
    let RawReceipt {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    } = raw;

    // Whitespace-only is still "non-empty": such a retailer validates and
    // simply earns nothing from the alphanumeric rule.
    if retailer.is_empty() {
        return Err(ValidationError::EmptyRetailer);
    }

    let purchase_date = parse_date(&purchase_date)?;
    let purchase_time = parse_time(&purchase_time)?;

    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let total = total
        .parse::<Cents>()
        .map_err(|_| ValidationError::BadTotal { value: total })?;

    Ok(Receipt {
        retailer,
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::BadPurchaseDate {
        value: raw.to_string(),
    })
}

fn parse_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| ValidationError::BadPurchaseTime {
        value: raw.to_string(),
    })
}

fn validate_item(index: usize, item: RawLineItem) -> Result<LineItem, ValidationError> {
    if item.short_description.is_empty() {
        return Err(ValidationError::EmptyItemDescription { index });
    }

    let price = item
        .price
        .parse::<Cents>()
        .map_err(|_| ValidationError::BadItemPrice {
            index,
            value: item.price,
        })?;

    Ok(LineItem {
        short_description: item.short_description,
        price,
    })
}
