//! Historic rate resolution over the date-indexed store.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use ratehub_common::{rate, Currency, CurrencyRegistry, ExchangeRate, Iso4217Registry, RateContext};
use rust_decimal::Decimal;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::config::ResolverConfig;
use crate::conversion::{ConversionQuery, CurrencyConversion};
use crate::error::{FeedError, FxError, FxResult};
use crate::feed::{FeedDay, FeedSource};
use crate::gate::{LoadStatus, ReadinessGate};
use crate::ingest::Ingester;
use crate::store::{DayRates, RateStore};

/// How a currency pair is answered from hub-relative rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// hub -> hub.
    Identity,
    /// currency -> hub: reverse the stored rate.
    ToHub,
    /// hub -> currency: the stored rate as is.
    FromHub,
    /// currency -> hub -> currency.
    ViaHub,
}

/// Answers conversion queries from rates published against one hub
/// currency.
pub struct RateResolver {
    config: ResolverConfig,
    hub: Currency,
    scale: Option<u32>,
    store: Arc<RateStore>,
    gate: ReadinessGate,
    ingester: Ingester,
}

impl RateResolver {
    /// Create a resolver that recognizes ISO 4217 currencies.
    pub fn new(config: ResolverConfig) -> FxResult<Self> {
        Self::with_registry(config, Arc::new(Iso4217Registry::new()))
    }

    /// Create a resolver with a custom currency registry.
    pub fn with_registry(
        config: ResolverConfig,
        registry: Arc<dyn CurrencyRegistry>,
    ) -> FxResult<Self> {
        config.validate()?;

        let hub = config.hub();
        let store = Arc::new(RateStore::new());
        let ingester = Ingester::new(
            Arc::clone(&store),
            registry,
            hub.clone(),
            config.provider_name.clone(),
        );

        Ok(Self {
            scale: config.scale(),
            hub,
            store,
            gate: ReadinessGate::new(),
            ingester,
            config,
        })
    }

    /// Create a resolver and start loading `source` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(config: ResolverConfig, source: Arc<dyn FeedSource>) -> FxResult<Arc<Self>> {
        let resolver = Arc::new(Self::new(config)?);
        info!(
            provider = %resolver.config.provider_name,
            resource = source.resource_id(),
            "Starting rate resolver"
        );
        resolver.spawn_load(source);
        Ok(resolver)
    }

    /// Configuration the resolver was built with.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Hub currency all stored rates are quoted from.
    pub fn hub(&self) -> &Currency {
        &self.hub
    }

    /// Shared rate store.
    pub fn store(&self) -> &Arc<RateStore> {
        &self.store
    }

    /// Whether the first load attempt has finished.
    pub fn is_ready(&self) -> bool {
        self.gate.is_signaled()
    }

    /// Outcome of the most recent load attempt.
    pub fn status(&self) -> Option<LoadStatus> {
        self.gate.last_status()
    }

    /// Ingest a fetched payload and publish the outcome.
    ///
    /// Failures are logged and recorded, never returned: queries only see
    /// their effect on the store. The readiness gate opens either way.
    pub fn on_feed_loaded(
        &self,
        resource: &str,
        payload: Result<Vec<FeedDay>, FeedError>,
    ) -> LoadStatus {
        let status = match payload.and_then(|days| self.ingester.ingest(&days)) {
            Ok(report) => {
                let status = LoadStatus::Loaded {
                    resource: resource.to_string(),
                    days_added: report.days_added,
                };
                let stats = self.store.stats();
                info!(
                    resource,
                    days_added = report.days_added,
                    rates = report.rates_stored,
                    stored_days = stats.days,
                    latest = ?stats.latest,
                    "{}",
                    status
                );
                status
            }
            Err(e) => {
                warn!(resource, error = %e, "Error during data load");
                LoadStatus::Failed {
                    message: e.to_string(),
                }
            }
        };

        self.gate.record(status.clone());
        status
    }

    /// Run one load cycle against `source`.
    pub async fn load_now(&self, source: &dyn FeedSource) -> LoadStatus {
        let payload = source.fetch().await;
        self.on_feed_loaded(source.resource_id(), payload)
    }

    /// Run one load cycle as a background task.
    pub fn spawn_load(self: &Arc<Self>, source: Arc<dyn FeedSource>) -> JoinHandle<LoadStatus> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move { resolver.load_now(source.as_ref()).await })
    }

    /// Reload `source` every `period`, starting one period from now.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        source: Arc<dyn FeedSource>,
        period: Duration,
    ) -> JoinHandle<()> {
        let resolver = Arc::clone(self);
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                debug!(resource = source.resource_id(), "Refreshing feed");
                resolver.load_now(source.as_ref()).await;
            }
        })
    }

    /// Resolve the rate for `query`.
    ///
    /// Blocks until the first load attempt finishes or the configured load
    /// timeout elapses. `Ok(None)` means no data: nothing is loaded, or the
    /// hub leg of a direct pair has no published rate.
    #[instrument(skip(self), fields(base = %query.base, term = %query.term))]
    pub fn get_exchange_rate(&self, query: &ConversionQuery) -> FxResult<Option<ExchangeRate>> {
        if !self.gate.wait(self.config.load_timeout) {
            let last_state = self
                .gate
                .last_status()
                .map(|status| status.to_string())
                .unwrap_or_else(|| "no load attempt has completed".to_string());
            return Err(FxError::LoadTimeout { last_state });
        }

        if self.store.is_empty() {
            return Ok(None);
        }

        let Some((date, targets)) = self.select_day(&query.dates)? else {
            return Ok(None);
        };
        debug!(date = %date, "Resolved rate date");

        self.resolve(&query.base, &query.term, date, &targets)
    }

    /// Latest rate for `base -> term`.
    pub fn get_rate(&self, base: Currency, term: Currency) -> FxResult<Option<ExchangeRate>> {
        self.get_exchange_rate(&ConversionQuery::new(base, term))
    }

    /// Rate for `base -> term` published on `date`.
    pub fn get_rate_on(
        &self,
        base: Currency,
        term: Currency,
        date: NaiveDate,
    ) -> FxResult<Option<ExchangeRate>> {
        self.get_exchange_rate(&ConversionQuery::new(base, term).on(date))
    }

    /// Amount conversion into `term` at the latest rates.
    pub fn get_currency_conversion(self: &Arc<Self>, term: Currency) -> CurrencyConversion {
        CurrencyConversion::new(Arc::clone(self), term, Vec::new())
    }

    /// Amount conversion into `query.term`, using the query's dates.
    pub fn get_currency_conversion_for(self: &Arc<Self>, query: &ConversionQuery) -> CurrencyConversion {
        CurrencyConversion::new(Arc::clone(self), query.term.clone(), query.dates.clone())
    }

    /// Swap base and term of `rate` and invert its factor.
    pub fn reverse(&self, rate: Option<&ExchangeRate>) -> FxResult<ExchangeRate> {
        let rate = rate.ok_or(FxError::InvalidReverseRate)?;
        let factor = rate::divide(Decimal::ONE, rate.factor).ok_or(FxError::InvalidReverseRate)?;

        Ok(ExchangeRate::new(
            rate.term.clone(),
            rate.base.clone(),
            factor,
            self.context(rate.context.as_of),
        ))
    }

    fn select_day(&self, requested: &[NaiveDate]) -> FxResult<Option<(NaiveDate, DayRates)>> {
        if requested.is_empty() {
            return Ok(self
                .store
                .latest_date()
                .and_then(|date| self.store.rates_for(date).map(|day| (date, day))));
        }

        requested
            .iter()
            .find_map(|date| self.store.rates_for(*date).map(|day| (*date, day)))
            .map(Some)
            .ok_or_else(|| FxError::NoRateForDate {
                requested: requested.to_vec(),
            })
    }

    fn route(&self, base: &Currency, term: &Currency) -> Route {
        match (*base == self.hub, *term == self.hub) {
            (true, true) => Route::Identity,
            (false, true) => Route::ToHub,
            (true, false) => Route::FromHub,
            (false, false) => Route::ViaHub,
        }
    }

    fn resolve(
        &self,
        base: &Currency,
        term: &Currency,
        date: NaiveDate,
        targets: &DayRates,
    ) -> FxResult<Option<ExchangeRate>> {
        if self.route(base, term) != Route::ViaHub {
            return self.hub_leg(base, term, date, targets);
        }

        // Two legs against the same day; each is answered without further
        // triangulation because one side is always the hub.
        let to_hub = self.hub_leg(base, &self.hub, date, targets)?;
        let from_hub = self.hub_leg(&self.hub, term, date, targets)?;

        let (Some(first), Some(second)) = (to_hub, from_hub) else {
            return Err(FxError::UnresolvableConversion {
                base: base.clone(),
                term: term.clone(),
            });
        };

        let factor = rate::multiply(first.factor, second.factor).ok_or_else(|| {
            FxError::UnresolvableConversion {
                base: base.clone(),
                term: term.clone(),
            }
        })?;
        debug!(
            via = %self.hub,
            first = %first.factor,
            second = %second.factor,
            factor = %factor,
            "Triangulated rate"
        );

        Ok(Some(
            ExchangeRate::new(base.clone(), term.clone(), factor, self.context(Some(date)))
                .with_chain(first, second),
        ))
    }

    fn hub_leg(
        &self,
        base: &Currency,
        term: &Currency,
        date: NaiveDate,
        targets: &DayRates,
    ) -> FxResult<Option<ExchangeRate>> {
        match self.route(base, term) {
            Route::Identity => Ok(Some(ExchangeRate::new(
                base.clone(),
                term.clone(),
                Decimal::ONE,
                self.context(Some(date)),
            ))),
            Route::ToHub => match targets.get(base.code()) {
                Some(source) => self.reverse(Some(source.value())).map(Some),
                None => Ok(None),
            },
            Route::FromHub => Ok(targets.get(term.code()).map(|target| target.value().clone())),
            Route::ViaHub => Err(FxError::UnresolvableConversion {
                base: base.clone(),
                term: term.clone(),
            }),
        }
    }

    fn context(&self, as_of: Option<NaiveDate>) -> RateContext {
        let context = RateContext::historic(&self.config.provider_name).with_scale(self.scale);
        match as_of {
            Some(date) => context.as_of(date),
            None => context,
        }
    }
}

impl std::fmt::Debug for RateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateResolver")
            .field("provider", &self.config.provider_name)
            .field("hub", &self.hub)
            .field("days", &self.store.len())
            .field("ready", &self.is_ready())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{FeedEntry, StaticFeed};
    use proptest::prelude::*;
    use ratehub_common::Money;
    use rust_decimal_macros::dec;
    use std::thread;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 1, d).unwrap()
    }

    fn sample_feed() -> Vec<FeedDay> {
        vec![
            FeedDay::new(
                date(3),
                vec![
                    FeedEntry::new("EUR", dec!(4.6412)),
                    FeedEntry::new("USD", dec!(4.3215)),
                    FeedEntry::new("HUF", dec!(1.5010)).with_multiplier(100),
                ],
            ),
            FeedDay::new(
                date(4),
                vec![
                    FeedEntry::new("EUR", dec!(4.6432)),
                    FeedEntry::new("USD", dec!(4.2950)),
                ],
            ),
        ]
    }

    fn loaded_resolver(config: ResolverConfig) -> Arc<RateResolver> {
        let resolver = Arc::new(RateResolver::new(config).unwrap());
        resolver.on_feed_loaded("test", Ok(sample_feed()));
        resolver
    }

    fn resolver() -> Arc<RateResolver> {
        loaded_resolver(ResolverConfig::default())
    }

    #[test]
    fn test_hub_to_hub_is_identity() {
        let resolver = resolver();

        for day in [3, 4] {
            let rate = resolver
                .get_rate_on(Currency::ron(), Currency::ron(), date(day))
                .unwrap()
                .unwrap();
            assert_eq!(rate.factor, Decimal::ONE);
            assert_eq!(rate.context.as_of, Some(date(day)));
            assert!(!rate.is_derived());
        }
    }

    #[test]
    fn test_hub_to_currency_is_stored_rate() {
        let resolver = resolver();
        let rate = resolver
            .get_rate_on(Currency::ron(), Currency::huf(), date(3))
            .unwrap()
            .unwrap();

        assert_eq!(rate.factor, dec!(66.62225183211193));
        assert_eq!(rate.base, Currency::ron());
        assert_eq!(rate.term, Currency::huf());
    }

    #[test]
    fn test_currency_to_hub_is_reversed() {
        let resolver = resolver();
        let rate = resolver
            .get_rate_on(Currency::eur(), Currency::ron(), date(3))
            .unwrap()
            .unwrap();

        assert_eq!(rate.base, Currency::eur());
        assert_eq!(rate.term, Currency::ron());
        assert_eq!(rate.factor, dec!(4.6412));
    }

    #[test]
    fn test_latest_date_used_without_explicit_date() {
        let resolver = resolver();
        let rate = resolver
            .get_rate(Currency::eur(), Currency::ron())
            .unwrap()
            .unwrap();

        assert_eq!(rate.context.as_of, Some(date(4)));
        assert_eq!(rate.factor, dec!(4.6432));
    }

    #[test]
    fn test_first_present_candidate_date_wins() {
        let resolver = resolver();
        let query = ConversionQuery::new(Currency::eur(), Currency::ron())
            .on_any_of([date(6), date(3), date(4)]);

        let rate = resolver.get_exchange_rate(&query).unwrap().unwrap();

        assert_eq!(rate.context.as_of, Some(date(3)));
    }

    #[test]
    fn test_missing_date_fails() {
        let resolver = resolver();
        let query = ConversionQuery::new(Currency::eur(), Currency::ron()).on_any_of([date(6), date(7)]);

        match resolver.get_exchange_rate(&query) {
            Err(FxError::NoRateForDate { requested }) => {
                assert_eq!(requested, vec![date(6), date(7)])
            }
            other => panic!("expected NoRateForDate, got {:?}", other),
        }
    }

    #[test]
    fn test_triangulated_rate_has_chain() {
        let resolver = resolver();
        let rate = resolver
            .get_rate_on(Currency::eur(), Currency::usd(), date(3))
            .unwrap()
            .unwrap();

        assert_eq!(rate.chain.len(), 2);
        let (first, second) = (&rate.chain[0], &rate.chain[1]);
        assert_eq!((first.base.code(), first.term.code()), ("EUR", "RON"));
        assert_eq!((second.base.code(), second.term.code()), ("RON", "USD"));
        assert_eq!(rate.factor, rate::multiply(first.factor, second.factor).unwrap());
        assert_eq!(rate.factor, dec!(1.073978942496818));
    }

    #[test]
    fn test_missing_hub_leg_is_absent_for_direct_pairs() {
        let resolver = resolver();
        // HUF is not published on the 4th.
        assert!(resolver
            .get_rate_on(Currency::huf(), Currency::ron(), date(4))
            .unwrap()
            .is_none());
        assert!(resolver
            .get_rate_on(Currency::ron(), Currency::huf(), date(4))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_missing_leg_fails_triangulation() {
        let resolver = resolver();
        let result = resolver.get_rate_on(Currency::eur(), Currency::huf(), date(4));

        assert!(matches!(
            result,
            Err(FxError::UnresolvableConversion { .. })
        ));
    }

    #[test]
    fn test_reverse_absent_rate() {
        let resolver = resolver();
        assert!(matches!(
            resolver.reverse(None),
            Err(FxError::InvalidReverseRate)
        ));
    }

    #[test]
    fn test_scale_travels_in_context_not_in_reversal() {
        let resolver = loaded_resolver(ResolverConfig::default().with_scale("2"));
        let rate = resolver
            .get_rate_on(Currency::huf(), Currency::ron(), date(3))
            .unwrap()
            .unwrap();

        assert_eq!(rate.context.scale, Some(2));
        assert_eq!(rate.factor, dec!(0.01501));
    }

    #[test]
    fn test_empty_store_resolves_to_none() {
        let resolver = RateResolver::new(ResolverConfig::default()).unwrap();
        let feed = vec![FeedDay::new(date(3), vec![FeedEntry::new("XYZ", dec!(1.1))])];

        let status = resolver.on_feed_loaded("test", Ok(feed));

        assert!(status.is_loaded());
        assert!(resolver
            .get_rate(Currency::eur(), Currency::usd())
            .unwrap()
            .is_none());
        assert!(resolver
            .get_rate_on(Currency::eur(), Currency::ron(), date(3))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_failed_load_opens_gate() {
        let resolver = RateResolver::new(ResolverConfig::default()).unwrap();

        let status = resolver.on_feed_loaded(
            "test",
            Err(FeedError::InvalidValue {
                currency: "EUR".to_string(),
                date: date(3),
            }),
        );

        assert!(!status.is_loaded());
        assert!(resolver.is_ready());
        assert!(resolver
            .get_rate(Currency::eur(), Currency::ron())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_timeout() {
        let config = ResolverConfig::default().with_load_timeout(Duration::from_millis(20));
        let resolver = RateResolver::new(config).unwrap();

        match resolver.get_rate(Currency::eur(), Currency::ron()) {
            Err(FxError::LoadTimeout { last_state }) => {
                assert_eq!(last_state, "no load attempt has completed")
            }
            other => panic!("expected LoadTimeout, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_load_timeout_does_not_panic() {
        let config = ResolverConfig::default().with_load_timeout(Duration::from_secs(u64::MAX));
        assert!(config.validate().is_ok());

        let resolver = loaded_resolver(config);
        let rate = resolver
            .get_rate(Currency::eur(), Currency::ron())
            .unwrap()
            .unwrap();

        assert_eq!(rate.factor, dec!(4.6432));
    }

    #[test]
    fn test_waiters_released_by_first_load() {
        let resolver = Arc::new(RateResolver::new(ResolverConfig::default()).unwrap());

        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let resolver = Arc::clone(&resolver);
                thread::spawn(move || resolver.get_rate(Currency::eur(), Currency::usd()))
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        resolver.on_feed_loaded("test", Ok(sample_feed()));

        let results: Vec<ExchangeRate> = waiters
            .into_iter()
            .map(|waiter| waiter.join().unwrap().unwrap().unwrap())
            .collect();

        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(results[0].context.as_of, Some(date(4)));
    }

    #[test]
    fn test_currency_conversion() {
        let resolver = resolver();
        let query = ConversionQuery::new(Currency::huf(), Currency::ron()).on(date(3));
        let conversion = resolver.get_currency_conversion_for(&query);

        let hundred_huf = Money::new(dec!(100), Currency::huf());
        let result = conversion.apply(&hundred_huf).unwrap();
        assert_eq!(result.currency, Currency::ron());
        assert_eq!(result.value, dec!(1.501));

        let hundred_eur = Money::new(dec!(100), Currency::eur());
        assert_eq!(conversion.apply(&hundred_eur).unwrap().value, dec!(464.12));
    }

    #[test]
    fn test_currency_conversion_same_currency_is_unchanged() {
        let resolver = resolver();
        let conversion = resolver.get_currency_conversion(Currency::huf());

        let ten = Money::new(dec!(10), Currency::huf());
        assert_eq!(conversion.apply(&ten).unwrap(), ten);
    }

    #[test]
    fn test_currency_conversion_applies_scale() {
        let resolver = loaded_resolver(ResolverConfig::default().with_scale("2"));
        let conversion = resolver.get_currency_conversion(Currency::usd());

        let result = conversion.apply(&Money::new(dec!(10), Currency::eur())).unwrap();

        // 10 EUR at 4.6432 / 4.2950 on the 4th.
        assert_eq!(result.value, dec!(10.81));
        assert_eq!(result.currency, Currency::usd());
    }

    #[test]
    fn test_currency_conversion_without_rate() {
        let resolver = resolver();
        let conversion = resolver.get_currency_conversion(Currency::ron());

        let result = conversion.apply(&Money::new(dec!(10), Currency::huf()));

        assert!(matches!(result, Err(FxError::RateNotAvailable { .. })));
    }

    #[test]
    fn test_reload_cycle_with_static_feed() {
        let resolver = RateResolver::new(ResolverConfig::default()).unwrap();
        let feed = StaticFeed::new("static", sample_feed());

        let first = tokio_test::block_on(resolver.load_now(&feed));
        let second = tokio_test::block_on(resolver.load_now(&feed));

        assert_eq!(first.to_string(), "Loaded static exchange rates for days:2");
        assert_eq!(second.to_string(), "Loaded static exchange rates for days:0");
        assert_eq!(resolver.store().len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_start_loads_in_background() {
        let feed = Arc::new(StaticFeed::new("static", sample_feed()));
        let resolver = RateResolver::start(ResolverConfig::default(), feed).unwrap();

        let query_resolver = Arc::clone(&resolver);
        let rate = tokio::task::spawn_blocking(move || {
            query_resolver.get_rate(Currency::usd(), Currency::ron())
        })
        .await
        .unwrap()
        .unwrap()
        .unwrap();

        assert_eq!(rate.factor, dec!(4.2950));
        assert!(resolver.status().unwrap().is_loaded());
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_days() {
        let resolver = Arc::new(RateResolver::new(ResolverConfig::default()).unwrap());
        let feed = Arc::new(StaticFeed::new("static", sample_feed()));
        resolver.load_now(feed.as_ref()).await;

        let mut days = sample_feed();
        days.push(FeedDay::new(date(5), vec![FeedEntry::new("EUR", dec!(4.6500))]));
        feed.set_days(days);

        let refresh = resolver.spawn_refresh(feed.clone(), Duration::from_millis(10));
        for _ in 0..100 {
            if resolver.store().latest_date() == Some(date(5)) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        refresh.abort();

        assert_eq!(resolver.store().latest_date(), Some(date(5)));
    }

    proptest! {
        #[test]
        fn prop_double_reverse_is_stable(value in 1u64..10_000_000u64, scale in 0u32..6) {
            let resolver = RateResolver::new(ResolverConfig::default()).unwrap();
            let factor = Decimal::new(value as i64, scale);
            let rate = ExchangeRate::new(
                Currency::ron(),
                Currency::eur(),
                factor,
                RateContext::historic("TEST"),
            );

            let back = resolver.reverse(Some(&resolver.reverse(Some(&rate)).unwrap())).unwrap();

            let tolerance = factor * dec!(0.00000000000001);
            prop_assert!((back.factor - factor).abs() <= tolerance);
        }

        #[test]
        fn prop_triangulation_composes_legs(a in 1u64..1_000_000u64, b in 1u64..1_000_000u64) {
            let resolver = RateResolver::new(ResolverConfig::default()).unwrap();
            let feed = vec![FeedDay::new(
                date(3),
                vec![
                    FeedEntry::new("EUR", Decimal::new(a as i64, 4)),
                    FeedEntry::new("USD", Decimal::new(b as i64, 4)),
                ],
            )];
            resolver.on_feed_loaded("prop", Ok(feed));

            let cross = resolver.get_rate(Currency::eur(), Currency::usd()).unwrap().unwrap();
            let to_hub = resolver.get_rate(Currency::eur(), Currency::ron()).unwrap().unwrap();
            let from_hub = resolver.get_rate(Currency::ron(), Currency::usd()).unwrap().unwrap();

            let expected = to_hub.factor * from_hub.factor;
            let tolerance = expected * dec!(0.00000000000001);
            prop_assert!((cross.factor - expected).abs() <= tolerance);
            prop_assert_eq!(cross.chain.len(), 2);
        }
    }
}
