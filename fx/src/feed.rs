//! Feed records and the sources that deliver them.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::FeedError;

/// One published rate: `multiplier currency = value hub`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub currency: String,
    /// Units of `currency` the value is quoted for. Absent means 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<u32>,
    pub value: Decimal,
}

impl FeedEntry {
    /// Entry quoted for one unit of `currency`.
    pub fn new(currency: impl Into<String>, value: Decimal) -> Self {
        Self {
            currency: currency.into(),
            multiplier: None,
            value,
        }
    }

    /// Quote the value for `multiplier` units.
    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }
}

/// All rates published for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDay {
    pub date: NaiveDate,
    #[serde(alias = "rates")]
    pub entries: Vec<FeedEntry>,
}

impl FeedDay {
    /// Rates published on `date`.
    pub fn new(date: NaiveDate, entries: Vec<FeedEntry>) -> Self {
        Self { date, entries }
    }
}

/// On-disk feed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedDocument {
    pub days: Vec<FeedDay>,
}

impl FeedDocument {
    /// Parse a JSON feed document.
    pub fn from_json(bytes: &[u8]) -> Result<Self, FeedError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Source of feed payloads.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Identifier used in load status messages.
    fn resource_id(&self) -> &str;

    /// Fetch the current feed payload.
    async fn fetch(&self) -> Result<Vec<FeedDay>, FeedError>;
}

/// In-memory feed, replaceable between load cycles.
pub struct StaticFeed {
    resource_id: String,
    days: RwLock<Vec<FeedDay>>,
}

impl StaticFeed {
    /// Feed that returns `days` until replaced.
    pub fn new(resource_id: impl Into<String>, days: Vec<FeedDay>) -> Self {
        Self {
            resource_id: resource_id.into(),
            days: RwLock::new(days),
        }
    }

    /// Replace the payload returned by the next fetch.
    pub fn set_days(&self, days: Vec<FeedDay>) {
        *self.days.write() = days;
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    async fn fetch(&self) -> Result<Vec<FeedDay>, FeedError> {
        Ok(self.days.read().clone())
    }
}

/// Feed read from a JSON document on disk.
pub struct JsonFileFeed {
    resource_id: String,
    path: PathBuf,
}

impl JsonFileFeed {
    /// Feed read from `path`, identified by its file stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let resource_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feed".to_string());
        Self { resource_id, path }
    }

    /// Override the identifier used in load status messages.
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = resource_id.into();
        self
    }
}

#[async_trait]
impl FeedSource for JsonFileFeed {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    async fn fetch(&self) -> Result<Vec<FeedDay>, FeedError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let document = FeedDocument::from_json(&bytes)?;
        debug!(
            path = %self.path.display(),
            days = document.days.len(),
            "Read feed document"
        );
        Ok(document.days)
    }
}
