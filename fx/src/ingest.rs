//! Feed ingestion into the rate store.
//!
//! The feed quotes `multiplier FOREIGN = value HUB`; the store keeps
//! `1 HUB = factor FOREIGN`, so every entry is inverted on the way in.

use chrono::NaiveDate;
use ratehub_common::{rate, Currency, CurrencyRegistry, ExchangeRate, RateContext};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::FeedError;
use crate::feed::{FeedDay, FeedEntry};
use crate::store::RateStore;

/// Summary of one ingestion cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Dates that had no rates before this cycle.
    pub days_added: usize,
    /// Dates that received at least one rate.
    pub days_touched: usize,
    /// Rates written (including overwrites).
    pub rates_stored: usize,
    /// Entries dropped for unrecognized currency codes.
    pub skipped: usize,
}

/// Compute the storage factor for a feed entry: `multiplier / value`.
///
/// Errors are returned without date context; [`Ingester`] attaches it.
pub fn compute_factor(multiplier: Option<u32>, value: Decimal) -> Option<Decimal> {
    let multiplier = Decimal::from(multiplier.unwrap_or(1));
    rate::divide(multiplier, value)
}

/// Writes feed payloads into a [`RateStore`].
pub struct Ingester {
    store: Arc<RateStore>,
    registry: Arc<dyn CurrencyRegistry>,
    hub: Currency,
    provider: String,
}

impl Ingester {
    /// Ingester writing `hub`-based rates into `store`.
    pub fn new(
        store: Arc<RateStore>,
        registry: Arc<dyn CurrencyRegistry>,
        hub: Currency,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            store,
            registry,
            hub,
            provider: provider.into(),
        }
    }

    /// Ingest a payload.
    ///
    /// The first invalid entry aborts the rest of the payload; entries
    /// stored before it stay stored.
    pub fn ingest(&self, days: &[FeedDay]) -> Result<IngestReport, FeedError> {
        let mut report = IngestReport::default();
        let mut touched = HashSet::new();

        for day in days {
            let is_new = self.store.rates_for(day.date).is_none();
            for entry in &day.entries {
                if !self.registry.is_recognized(&entry.currency) {
                    trace!(currency = %entry.currency, date = %day.date, "Skipping unrecognized currency");
                    report.skipped += 1;
                    continue;
                }

                let rate = self.build_rate(day.date, entry)?;
                trace!(
                    multiplier = entry.multiplier.unwrap_or(1),
                    currency = %entry.currency,
                    value = %entry.value,
                    factor = %rate.factor,
                    "Adding rate"
                );
                self.store.put_rate(day.date, entry.currency.clone(), rate);
                report.rates_stored += 1;

                if touched.insert(day.date) && is_new {
                    report.days_added += 1;
                }
            }
        }

        report.days_touched = touched.len();
        debug!(
            days_added = report.days_added,
            days_touched = report.days_touched,
            rates = report.rates_stored,
            skipped = report.skipped,
            "Feed ingested"
        );
        Ok(report)
    }

    fn build_rate(&self, date: NaiveDate, entry: &FeedEntry) -> Result<ExchangeRate, FeedError> {
        if entry.value <= Decimal::ZERO {
            return Err(FeedError::InvalidValue {
                currency: entry.currency.clone(),
                date,
            });
        }
        if entry.multiplier == Some(0) {
            return Err(FeedError::InvalidMultiplier {
                currency: entry.currency.clone(),
                date,
            });
        }

        let factor =
            compute_factor(entry.multiplier, entry.value).ok_or_else(|| FeedError::Arithmetic {
                currency: entry.currency.clone(),
                date,
            })?;

        Ok(ExchangeRate::new(
            self.hub.clone(),
            Currency::new(&entry.currency),
            factor,
            RateContext::historic(&self.provider).as_of(date),
        ))
    }
}
