//! Rate resolution and feed error types.

use chrono::NaiveDate;
use ratehub_common::{Currency, CurrencyMismatchError};
use thiserror::Error;

/// Errors surfaced to callers of the rate resolver.
#[derive(Debug, Error)]
pub enum FxError {
    /// The first feed load did not finish within the configured wait.
    #[error("Failed to load currency conversion data: {last_state}")]
    LoadTimeout { last_state: String },

    /// None of the explicitly requested dates has published rates.
    #[error("No exchange rates published for {}", format_dates(.requested))]
    NoRateForDate { requested: Vec<NaiveDate> },

    /// A triangulated conversion is missing one of its hub legs.
    #[error("Cannot convert {base} to {term}: missing rate through the hub currency")]
    UnresolvableConversion { base: Currency, term: Currency },

    /// Attempted to reverse a rate that does not exist.
    #[error("Rate not reversible: no rate to reverse")]
    InvalidReverseRate,

    /// An amount conversion found no rate for its currency pair.
    #[error("No rate available for {base}/{term}")]
    RateNotAvailable { base: Currency, term: Currency },

    /// Amount currency does not match the rate's base currency.
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },

    /// Invalid resolver configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FxError {
    /// Get error code for logs and CLI output.
    pub fn error_code(&self) -> &'static str {
        match self {
            FxError::LoadTimeout { .. } => "LOAD_TIMEOUT",
            FxError::NoRateForDate { .. } => "NO_RATE_FOR_DATE",
            FxError::UnresolvableConversion { .. } => "UNRESOLVABLE_CONVERSION",
            FxError::InvalidReverseRate => "INVALID_REVERSE_RATE",
            FxError::RateNotAvailable { .. } => "RATE_NOT_AVAILABLE",
            FxError::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            FxError::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<CurrencyMismatchError> for FxError {
    fn from(err: CurrencyMismatchError) -> Self {
        FxError::CurrencyMismatch {
            expected: err.expected,
            actual: err.actual,
        }
    }
}

/// Result type for rate resolution.
pub type FxResult<T> = Result<T, FxError>;

/// Errors raised while fetching or ingesting a feed payload.
///
/// These never reach query callers; the resolver records them as the last
/// load status.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed document could not be read.
    #[error("Feed I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The feed document is malformed.
    #[error("Feed parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rate value is zero or negative.
    #[error("Invalid rate value for {currency} on {date}")]
    InvalidValue { currency: String, date: NaiveDate },

    /// A multiplier of zero.
    #[error("Invalid multiplier for {currency} on {date}")]
    InvalidMultiplier { currency: String, date: NaiveDate },

    /// Factor computation overflowed.
    #[error("Arithmetic overflow computing factor for {currency} on {date}")]
    Arithmetic { currency: String, date: NaiveDate },
}

fn format_dates(dates: &[NaiveDate]) -> String {
    dates
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect::<Vec<_>>()
        .join(",")
}
