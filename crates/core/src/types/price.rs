//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are written the way the clinic prints them (`₹2,999`).
//! [`Price::parse`] strips the currency symbol and the digit grouping, and
//! `Display` puts them back using Indian grouping (`₹1,25,000`).

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing left after removing the symbol and separators.
    #[error("price cannot be empty")]
    Empty,
    /// The remaining text is not a number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
    /// Prices are never negative.
    #[error("price cannot be negative")]
    Negative,
}

/// ISO 4217 currency codes the clinic deals in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum CurrencyCode {
    #[default]
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
        }
    }
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A whole-rupee price.
    #[must_use]
    pub fn inr(rupees: i64) -> Self {
        Self::new(Decimal::new(rupees, 0), CurrencyCode::INR)
    }

    /// Parse a formatted price such as `₹2,999`, `Rs. 800` or `4299`.
    ///
    /// # Errors
    ///
    /// Returns an error if no amount remains after stripping the currency
    /// marker and separators, or if the amount is not a non-negative number.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let cleaned: String = s
            .trim()
            .trim_start_matches(CurrencyCode::INR.symbol())
            .trim_start_matches("Rs.")
            .trim_start_matches("Rs")
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(&cleaned).map_err(|_| PriceError::InvalidAmount(cleaned.clone()))?;
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }

        Ok(Self::new(amount, CurrencyCode::INR))
    }

    /// Whole-unit amount, with any fraction dropped.
    #[must_use]
    pub fn whole_units(&self) -> Decimal {
        self.amount.trunc()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.round_dp(2).to_string();
        let (whole, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));
        write!(
            f,
            "{}{}",
            self.currency_code.symbol(),
            group_indian(whole)
        )?;
        if !fraction.is_empty() && fraction.chars().any(|c| c != '0') {
            write!(f, ".{fraction:0<2}")?;
        }
        Ok(())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Group digits the Indian way: last three, then pairs (`1,25,000`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
