//! Query execution and output formatting.

use std::fmt::Write as _;
use std::sync::Arc;

use ratehub_common::{Currency, ExchangeRate, Money};
use ratehub_fx::{ConversionQuery, FxResult, RateResolver};
use rust_decimal::Decimal;
use serde::Serialize;

/// Answer to one command-line query.
#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub base: Currency,
    pub term: Currency,
    pub rate: Option<ExchangeRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<Money>,
}

impl QueryReport {
    /// Resolve `query`, converting `amount` of the base currency if given.
    ///
    /// Blocks on the resolver's readiness gate.
    pub fn resolve(
        resolver: &Arc<RateResolver>,
        query: &ConversionQuery,
        amount: Option<Decimal>,
    ) -> FxResult<Self> {
        let rate = resolver.get_exchange_rate(query)?;
        let amount = amount.map(|value| Money::new(value, query.base.clone()));

        let converted = match (&rate, &amount) {
            (Some(_), Some(amount)) => Some(
                resolver
                    .get_currency_conversion_for(query)
                    .apply(amount)?,
            ),
            _ => None,
        };

        Ok(Self {
            base: query.base.clone(),
            term: query.term.clone(),
            rate,
            amount,
            converted,
        })
    }

    /// Plain text rendering; converted amounts are shown in minor units.
    pub fn render(&self) -> String {
        let Some(rate) = &self.rate else {
            return format!("No rate available for {}/{}", self.base, self.term);
        };

        let mut out = rate.to_string();
        for leg in &rate.chain {
            let _ = write!(out, "\n  via {}", leg);
        }
        if let (Some(amount), Some(converted)) = (&self.amount, &self.converted) {
            let _ = write!(out, "\n{} = {}", amount, converted.round());
        }
        out
    }
}
