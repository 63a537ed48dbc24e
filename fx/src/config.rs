//! Resolver configuration.

use ratehub_common::Currency;
use std::time::Duration;

use crate::error::{FxError, FxResult};

/// Configuration for a [`RateResolver`](crate::RateResolver).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Provider name stamped on every rate context.
    pub provider_name: String,
    /// Human-readable provider description.
    pub description: String,
    /// Hub currency all feed rates are quoted against.
    pub hub_currency: String,
    /// Raw scale setting; only a non-negative integer takes effect.
    pub scale_override: Option<String>,
    /// How long queries wait for the first feed load.
    pub load_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            provider_name: "NBR".to_string(),
            description: "National Bank of Romania currency rates".to_string(),
            hub_currency: "RON".to_string(),
            scale_override: None,
            load_timeout: Duration::from_secs(30),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("RATEHUB_PROVIDER") {
            config.provider_name = name;
        }

        if let Ok(hub) = std::env::var("RATEHUB_HUB_CURRENCY") {
            config.hub_currency = hub;
        }

        if let Ok(scale) = std::env::var("RATEHUB_SCALE") {
            config.scale_override = Some(scale);
        }

        if let Ok(secs) = std::env::var("RATEHUB_LOAD_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.load_timeout = Duration::from_secs(secs);
            }
        }

        config
    }

    /// Set the raw scale setting.
    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale_override = Some(scale.into());
        self
    }

    /// Set how long queries wait for the first load.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Effective scale: set only when the override parses as a
    /// non-negative integer.
    pub fn scale(&self) -> Option<u32> {
        self.scale_override
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok())
    }

    /// Hub currency as a [`Currency`].
    pub fn hub(&self) -> Currency {
        Currency::new(&self.hub_currency)
    }

    /// Validate configuration.
    pub fn validate(&self) -> FxResult<()> {
        if self.provider_name.trim().is_empty() {
            return Err(FxError::Config("Provider name cannot be empty".to_string()));
        }

        if self.hub_currency.len() != 3
            || !self.hub_currency.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(FxError::Config(format!(
                "Hub currency must be a three-letter code, got '{}'",
                self.hub_currency
            )));
        }

        if self.load_timeout.is_zero() {
            return Err(FxError::Config("Load timeout cannot be zero".to_string()));
        }

        Ok(())
    }
}
