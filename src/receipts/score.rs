use super::domain::{Cents, Receipt};
use chrono::{Datelike, Timelike};
use serde::Serialize;

/// The seven scoring rules, applied independently and summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    RetailerAlphanumerics,
    WholeUnitTotal,
    QuarterMultipleTotal,
    ItemPairs,
    DescriptionLength,
    OddPurchaseDay,
    AfternoonWindow,
}

impl Rule {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::RetailerAlphanumerics,
            Self::WholeUnitTotal,
            Self::QuarterMultipleTotal,
            Self::ItemPairs,
            Self::DescriptionLength,
            Self::OddPurchaseDay,
            Self::AfternoonWindow,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RetailerAlphanumerics => "1 point per alphanumeric retailer character",
            Self::WholeUnitTotal => "50 points for a round-dollar total",
            Self::QuarterMultipleTotal => "25 points for a total divisible by 0.25",
            Self::ItemPairs => "5 points per pair of items",
            Self::DescriptionLength => "price bonus for description lengths divisible by 3",
            Self::OddPurchaseDay => "6 points for an odd purchase day",
            Self::AfternoonWindow => "10 points for a purchase between 14:00 and 16:00",
        }
    }
}

/// One rule's contribution to the final score.
#[derive(Debug, Clone, Serialize)]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: u64,
}

/// Per-rule accounting for a scored receipt.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub contributions: Vec<RuleContribution>,
    pub total: u64,
}

/// Computes the reward points for a validated receipt.
///
/// Deterministic and total: a receipt that passed validation always scores.
pub fn score(receipt: &Receipt) -> u64 {
    breakdown(receipt).total
}

/// Like [`score`], but keeps each rule's contribution for reporting.
pub fn breakdown(receipt: &Receipt) -> ScoreBreakdown {
    let contributions: Vec<RuleContribution> = Rule::ordered()
        .into_iter()
        .map(|rule| RuleContribution {
            rule,
            points: apply(rule, receipt),
        })
        .collect();
    let total = contributions.iter().map(|c| c.points).sum();

    ScoreBreakdown {
        contributions,
        total,
    }
}

fn apply(rule: Rule, receipt: &Receipt) -> u64 {
    match rule {
        Rule::RetailerAlphanumerics => receipt
            .retailer
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .count() as u64,
        Rule::WholeUnitTotal => {
            if receipt.total.is_whole_units() {
                50
            } else {
                0
            }
        }
        Rule::QuarterMultipleTotal => {
            if receipt.total.is_quarter_multiple() {
                25
            } else {
                0
            }
        }
        Rule::ItemPairs => (receipt.items.len() as u64 / 2) * 5,
        Rule::DescriptionLength => receipt
            .items
            .iter()
            .filter(|item| item.short_description.trim().chars().count() % 3 == 0)
            .map(|item| description_bonus(item.price))
            .sum(),
        Rule::OddPurchaseDay => {
            if receipt.purchase_date.day() % 2 == 1 {
                6
            } else {
                0
            }
        }
        Rule::AfternoonWindow => {
            let (hour, minute) = (receipt.purchase_time.hour(), receipt.purchase_time.minute());
            // Strictly after 14:00 and strictly before 16:00.
            if (hour == 14 && minute > 0) || hour == 15 {
                10
            } else {
                0
            }
        }
    }
}

/// Ceiling of `price * 0.2`, evaluated per item in exact cents: one fifth of
/// the price is `cents / 500` points, rounded up.
fn description_bonus(price: Cents) -> u64 {
    price.minor_units().div_ceil(500)
}
