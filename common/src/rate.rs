//! Exchange rate types and the decimal division policy shared by ingestion
//! and rate reversal.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::monetary::{Currency, CurrencyMismatchError, Money};

/// Significant digits kept by [`divide`] and [`multiply`] (IEEE 754 decimal64).
///
/// The exact quotient is first rounded to the 28 digits a `Decimal` holds and
/// then to 16. This matches decimal64 except when the 28-digit intermediate
/// ends in exactly `5` followed by zeros, where the two roundings can differ
/// from a single one by one unit in the last place.
pub const SIGNIFICANT_DIGITS: u32 = 16;

/// Kind of rate carried by a [`RateContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateType {
    /// Official published rate for a past business day.
    Historic,
}

impl fmt::Display for RateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateType::Historic => write!(f, "HISTORIC"),
        }
    }
}

/// Provenance of an exchange rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateContext {
    /// Name of the provider that published the rate.
    pub provider: String,
    /// Rate type.
    pub rate_type: RateType,
    /// Decimal places converted amounts are rounded to, if configured.
    pub scale: Option<u32>,
    /// Feed date the rate was taken from.
    pub as_of: Option<NaiveDate>,
}

impl RateContext {
    /// Historic context without scale or date.
    pub fn historic(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            rate_type: RateType::Historic,
            scale: None,
            as_of: None,
        }
    }

    /// Set the scale converted amounts are rounded to.
    pub fn with_scale(mut self, scale: Option<u32>) -> Self {
        self.scale = scale;
        self
    }

    /// Record the feed date the rate was taken from.
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }
}

/// Exchange rate: `1 base = factor term`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub base: Currency,
    pub term: Currency,
    pub factor: Decimal,
    pub context: RateContext,
    /// Legs this rate was derived from. Empty for direct and reversed rates,
    /// `[base -> hub, hub -> term]` for triangulated ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chain: Vec<ExchangeRate>,
}

impl ExchangeRate {
    /// Create a direct rate.
    pub fn new(base: Currency, term: Currency, factor: Decimal, context: RateContext) -> Self {
        Self {
            base,
            term,
            factor,
            context,
            chain: Vec::new(),
        }
    }

    /// Record the two legs a triangulated rate was built from.
    pub fn with_chain(mut self, first: ExchangeRate, second: ExchangeRate) -> Self {
        self.chain = vec![first, second];
        self
    }

    /// Whether this rate was composed from other rates.
    pub fn is_derived(&self) -> bool {
        !self.chain.is_empty()
    }

    /// Convert an amount in the base currency into the term currency.
    ///
    /// The result is not rounded.
    pub fn convert(&self, amount: &Money) -> Result<Money, CurrencyMismatchError> {
        if amount.currency != self.base {
            return Err(CurrencyMismatchError {
                expected: self.base.clone(),
                actual: amount.currency.clone(),
            });
        }

        Ok(Money::new(amount.value * self.factor, self.term.clone()))
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.base, self.factor, self.term)?;
        if let Some(date) = self.context.as_of {
            write!(f, " ({} {})", self.context.provider, date)?;
        }
        Ok(())
    }
}

/// Round to `digits` significant digits, half-even.
pub fn round_significant(value: Decimal, digits: u32) -> Decimal {
    let mantissa = value.mantissa().unsigned_abs();
    if mantissa == 0 {
        return Decimal::ZERO;
    }

    let precision = mantissa.ilog10() + 1;
    if precision <= digits {
        return value.normalize();
    }

    let excess = precision - digits;
    let scale = value.scale();
    if excess <= scale {
        return value
            .round_dp_with_strategy(scale - excess, RoundingStrategy::MidpointNearestEven)
            .normalize();
    }

    // Integer digits go too: move them below the point, round, move back.
    let shift = excess - scale;
    let mut shifted = value;
    if shifted.set_scale(excess).is_err() {
        return value.normalize();
    }
    (0..shift)
        .try_fold(Decimal::ONE, |acc, _| acc.checked_mul(Decimal::TEN))
        .and_then(|unit| {
            shifted
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
                .checked_mul(unit)
        })
        .map(|rounded| rounded.normalize())
        .unwrap_or(value)
}

/// Divide with the rate precision policy: 16 significant digits, half-even.
///
/// Returns `None` on division by zero or overflow.
pub fn divide(dividend: Decimal, divisor: Decimal) -> Option<Decimal> {
    dividend
        .checked_div(divisor)
        .map(|q| round_significant(q, SIGNIFICANT_DIGITS))
}

/// Multiply with the rate precision policy.
///
/// Returns `None` on overflow.
pub fn multiply(multiplicand: Decimal, multiplier: Decimal) -> Option<Decimal> {
    multiplicand
        .checked_mul(multiplier)
        .map(|p| round_significant(p, SIGNIFICANT_DIGITS))
}
