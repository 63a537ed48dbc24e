//! Currency codes and amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Create a currency from its code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_ascii_uppercase())
    }

    /// The uppercase currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Minor units used when presenting amounts in this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.code() {
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            "CLP" | "ISK" | "JPY" | "KRW" | "PYG" | "VND" | "XAF" | "XOF" => 0,
            _ => 2,
        }
    }

    /// Romanian leu.
    pub fn ron() -> Self {
        Self::new("RON")
    }

    /// Euro.
    pub fn eur() -> Self {
        Self::new("EUR")
    }

    /// US dollar.
    pub fn usd() -> Self {
        Self::new("USD")
    }

    /// Hungarian forint.
    pub fn huf() -> Self {
        Self::new("HUF")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// An amount of one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub value: Decimal,
    pub currency: Currency,
}

impl Money {
    /// Create an amount.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Parse `value` as a decimal amount of `currency`.
    pub fn from_str(value: &str, currency: Currency) -> Result<Self, rust_decimal::Error> {
        Ok(Self::new(value.parse()?, currency))
    }

    /// Round to the currency's minor units, half-even.
    pub fn round(&self) -> Self {
        self.round_dp(self.currency.decimal_places())
    }

    /// Round to `places` decimal places, half-even.
    pub fn round_dp(&self, places: u32) -> Self {
        let value = self
            .value
            .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
        Self::new(value, self.currency.clone())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// An amount was applied to a rate quoted from another currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyMismatchError {
    pub expected: Currency,
    pub actual: Currency,
}

impl fmt::Display for CurrencyMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {} amount, got {}", self.expected, self.actual)
    }
}

impl std::error::Error for CurrencyMismatchError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_code_is_uppercased() {
        assert_eq!(Currency::new("ron"), Currency::ron());
        assert_eq!(Currency::from("Eur").code(), "EUR");
        assert_eq!(Currency::huf().to_string(), "HUF");
    }

    #[test]
    fn test_currency_serializes_as_code() {
        let json = serde_json::to_string(&Currency::eur()).unwrap();
        assert_eq!(json, "\"EUR\"");
    }

    #[test]
    fn test_money_from_str() {
        let amount = Money::from_str("464.12", Currency::ron()).unwrap();
        assert_eq!(amount.value, dec!(464.12));
        assert_eq!(amount.to_string(), "464.12 RON");
        assert!(Money::from_str("abc", Currency::ron()).is_err());
    }

    #[test]
    fn test_rounding_is_half_even() {
        let amount = Money::new(dec!(2.345), Currency::usd());
        assert_eq!(amount.round().value, dec!(2.34));
        assert_eq!(amount.round_dp(1).value, dec!(2.3));
        assert_eq!(Money::new(dec!(2.355), Currency::usd()).round().value, dec!(2.36));
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(Currency::ron().decimal_places(), 2);
        assert_eq!(Currency::new("JPY").decimal_places(), 0);
        assert_eq!(Currency::new("KWD").decimal_places(), 3);
    }
}
