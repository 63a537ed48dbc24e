//! Date-indexed exchange rate store.

use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::Mutex;
use ratehub_common::ExchangeRate;
use std::sync::Arc;
use tracing::trace;

/// Rates published for one day, keyed by term currency code.
pub type DayRates = Arc<DashMap<String, ExchangeRate>>;

/// Thread-safe store of hub-relative rates per publication date.
///
/// A day's map, once created, is never replaced: writers only add or
/// overwrite entries in it, so readers holding a [`DayRates`] handle keep
/// seeing the live map.
pub struct RateStore {
    days: DashMap<NaiveDate, DayRates>,
    create_lock: Mutex<()>,
}

impl RateStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            days: DashMap::new(),
            create_lock: Mutex::new(()),
        }
    }

    /// Get the rates published for `date`.
    pub fn rates_for(&self, date: NaiveDate) -> Option<DayRates> {
        self.days.get(&date).map(|day| Arc::clone(day.value()))
    }

    /// Store `rate` for `currency` on `date`, overwriting any previous entry.
    pub fn put_rate(&self, date: NaiveDate, currency: impl Into<String>, rate: ExchangeRate) {
        let day = self.day_or_create(date);
        day.insert(currency.into(), rate);
    }

    /// Most recent publication date.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.days.iter().map(|entry| *entry.key()).max()
    }

    /// Whether no day has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of stored days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// All stored dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.days.iter().map(|entry| *entry.key()).collect();
        dates.sort_unstable();
        dates
    }

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        let dates = self.dates();
        StoreStats {
            days: dates.len(),
            rates: self.days.iter().map(|day| day.value().len()).sum(),
            earliest: dates.first().copied(),
            latest: dates.last().copied(),
        }
    }

    fn day_or_create(&self, date: NaiveDate) -> DayRates {
        if let Some(day) = self.rates_for(date) {
            return day;
        }

        let _guard = self.create_lock.lock();
        // Another writer may have created the day while we waited.
        if let Some(day) = self.rates_for(date) {
            return day;
        }

        trace!(date = %date, "Creating rate bucket");
        let day: DayRates = Arc::new(DashMap::new());
        self.days.insert(date, Arc::clone(&day));
        day
    }
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Store statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub days: usize,
    pub rates: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratehub_common::{Currency, RateContext};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::thread;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, d).unwrap()
    }

    fn make_rate(term: &str, factor: Decimal) -> ExchangeRate {
        ExchangeRate::new(
            Currency::ron(),
            Currency::new(term),
            factor,
            RateContext::historic("TEST"),
        )
    }

    #[test]
    fn test_put_and_get() {
        let store = RateStore::new();
        assert!(store.is_empty());
        assert!(store.latest_date().is_none());

        store.put_rate(date(3), "EUR", make_rate("EUR", dec!(0.21)));

        let day = store.rates_for(date(3)).unwrap();
        assert_eq!(day.get("EUR").unwrap().factor, dec!(0.21));
        assert!(store.rates_for(date(4)).is_none());
        assert!(!store.is_empty());
    }

    #[test]
    fn test_overwrite_same_key() {
        let store = RateStore::new();
        store.put_rate(date(3), "EUR", make_rate("EUR", dec!(0.21)));
        store.put_rate(date(3), "EUR", make_rate("EUR", dec!(0.22)));

        let day = store.rates_for(date(3)).unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day.get("EUR").unwrap().factor, dec!(0.22));
    }

    #[test]
    fn test_latest_date_ignores_insertion_order() {
        let store = RateStore::new();
        store.put_rate(date(5), "EUR", make_rate("EUR", dec!(0.21)));
        store.put_rate(date(9), "EUR", make_rate("EUR", dec!(0.21)));
        store.put_rate(date(2), "EUR", make_rate("EUR", dec!(0.21)));

        assert_eq!(store.latest_date(), Some(date(9)));
        assert_eq!(store.dates(), vec![date(2), date(5), date(9)]);
    }

    #[test]
    fn test_day_handle_sees_later_writes() {
        let store = RateStore::new();
        store.put_rate(date(3), "EUR", make_rate("EUR", dec!(0.21)));
        let day = store.rates_for(date(3)).unwrap();

        store.put_rate(date(3), "USD", make_rate("USD", dec!(0.23)));

        assert!(day.contains_key("USD"));
    }

    #[test]
    fn test_concurrent_writers_share_one_bucket() {
        let store = Arc::new(RateStore::new());
        let codes = ["EUR", "USD", "GBP", "CHF", "HUF", "PLN", "CZK", "SEK"];

        let handles: Vec<_> = codes
            .iter()
            .map(|code| {
                let store = Arc::clone(&store);
                let code = code.to_string();
                thread::spawn(move || {
                    let rate = make_rate(&code, dec!(1));
                    store.put_rate(date(3), code, rate);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.rates_for(date(3)).unwrap().len(), codes.len());
    }

    #[test]
    fn test_stats() {
        let store = RateStore::new();
        store.put_rate(date(3), "EUR", make_rate("EUR", dec!(0.21)));
        store.put_rate(date(3), "USD", make_rate("USD", dec!(0.23)));
        store.put_rate(date(4), "EUR", make_rate("EUR", dec!(0.21)));

        let stats = store.stats();
        assert_eq!(stats.days, 2);
        assert_eq!(stats.rates, 3);
        assert_eq!(stats.earliest, Some(date(3)));
        assert_eq!(stats.latest, Some(date(4)));
    }
}
