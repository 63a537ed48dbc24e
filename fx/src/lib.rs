//! RateHub FX Resolver
//!
//! Historic exchange rates published by a central bank against a single hub
//! currency, resolved for arbitrary currency pairs.
//!
//! # Features
//!
//! - Date-indexed rate store, safe for concurrent loads and queries
//! - Feed ingestion with multiplier handling and currency filtering
//! - Queries block until the first feed load completes
//! - Cross rates triangulated through the hub currency
//!
//! # Example
//!
//! ```rust,ignore
//! use ratehub_fx::{JsonFileFeed, RateResolver, ResolverConfig};
//! use ratehub_common::{Currency, Money};
//!
//! let feed = Arc::new(JsonFileFeed::new("nbr.json"));
//! let resolver = RateResolver::start(ResolverConfig::from_env(), feed)?;
//!
//! // Latest EUR -> USD rate, via RON
//! let rate = resolver.get_rate(Currency::eur(), Currency::usd())?;
//!
//! // Convert amount
//! let eur = Money::from_str("100.00", Currency::eur())?;
//! let ron = resolver.get_currency_conversion(Currency::ron()).apply(&eur)?;
//! ```

pub mod config;
pub mod conversion;
pub mod error;
pub mod feed;
pub mod gate;
pub mod ingest;
pub mod resolver;
pub mod store;

pub use config::ResolverConfig;
pub use conversion::{ConversionQuery, CurrencyConversion};
pub use error::{FeedError, FxError, FxResult};
pub use feed::{FeedDay, FeedDocument, FeedEntry, FeedSource, JsonFileFeed, StaticFeed};
pub use gate::{LoadStatus, ReadinessGate};
pub use ingest::{IngestReport, Ingester};
pub use resolver::RateResolver;
pub use store::{RateStore, StoreStats};
