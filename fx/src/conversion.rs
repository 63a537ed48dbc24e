//! Conversion queries and amount conversion.

use chrono::{NaiveDate, NaiveDateTime};
use ratehub_common::{Currency, ExchangeRate, Money};
use std::sync::Arc;
use tracing::debug;

use crate::error::{FxError, FxResult};
use crate::resolver::RateResolver;

/// Request for the rate `1 base = factor term`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionQuery {
    pub base: Currency,
    pub term: Currency,
    /// Candidate dates in priority order. Empty means the latest
    /// published date.
    pub dates: Vec<NaiveDate>,
}

impl ConversionQuery {
    /// Query the latest available rate.
    pub fn new(base: Currency, term: Currency) -> Self {
        Self {
            base,
            term,
            dates: Vec::new(),
        }
    }

    /// Ask for the rate published on `date`.
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.dates = vec![date];
        self
    }

    /// Ask for the first of `dates` that has published rates.
    pub fn on_any_of(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates = dates.into_iter().collect();
        self
    }

    /// Ask for the rate published on the day of `at`.
    pub fn at(self, at: NaiveDateTime) -> Self {
        self.on(at.date())
    }
}

/// Converts amounts into a fixed term currency.
pub struct CurrencyConversion {
    resolver: Arc<RateResolver>,
    term: Currency,
    dates: Vec<NaiveDate>,
}

impl CurrencyConversion {
    pub(crate) fn new(resolver: Arc<RateResolver>, term: Currency, dates: Vec<NaiveDate>) -> Self {
        Self {
            resolver,
            term,
            dates,
        }
    }

    /// Target currency.
    pub fn term(&self) -> &Currency {
        &self.term
    }

    /// Rate used to convert amounts held in `base`.
    pub fn rate_for(&self, base: &Currency) -> FxResult<Option<ExchangeRate>> {
        let query = ConversionQuery::new(base.clone(), self.term.clone())
            .on_any_of(self.dates.iter().copied());
        self.resolver.get_exchange_rate(&query)
    }

    /// Convert `amount` into the term currency.
    ///
    /// Amounts already in the term currency are returned unchanged. When the
    /// rate carries a scale the result is rounded to it.
    pub fn apply(&self, amount: &Money) -> FxResult<Money> {
        if amount.currency == self.term {
            return Ok(amount.clone());
        }

        let rate = self
            .rate_for(&amount.currency)?
            .ok_or_else(|| FxError::RateNotAvailable {
                base: amount.currency.clone(),
                term: self.term.clone(),
            })?;

        let converted = rate.convert(amount)?;
        let converted = match rate.context.scale {
            Some(places) => converted.round_dp(places),
            None => converted,
        };

        debug!(
            input = %amount,
            output = %converted,
            factor = %rate.factor,
            "Converted amount"
        );
        Ok(converted)
    }
}
