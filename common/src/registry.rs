//! Currency code recognition.

use std::collections::HashSet;

/// Decides which currency codes the system accepts.
pub trait CurrencyRegistry: Send + Sync {
    /// Whether `code` names a known currency.
    fn is_recognized(&self, code: &str) -> bool;
}

/// Active ISO 4217 codes, plus the precious-metal and SDR codes some
/// central bank feeds publish.
const ISO_4217: &[&str] = &[
    "AED", "AFN", "ALL", "AMD", "ANG", "AOA", "ARS", "AUD", "AWG", "AZN", "BAM", "BBD", "BDT",
    "BGN", "BHD", "BIF", "BMD", "BND", "BOB", "BRL", "BSD", "BTN", "BWP", "BYN", "BZD", "CAD",
    "CDF", "CHF", "CLP", "CNY", "COP", "CRC", "CUP", "CVE", "CZK", "DJF", "DKK", "DOP", "DZD",
    "EGP", "ERN", "ETB", "EUR", "FJD", "FKP", "GBP", "GEL", "GHS", "GIP", "GMD", "GNF", "GTQ",
    "GYD", "HKD", "HNL", "HRK", "HTG", "HUF", "IDR", "ILS", "INR", "IQD", "IRR", "ISK", "JMD",
    "JOD", "JPY", "KES", "KGS", "KHR", "KMF", "KPW", "KRW", "KWD", "KYD", "KZT", "LAK", "LBP",
    "LKR", "LRD", "LSL", "LYD", "MAD", "MDL", "MGA", "MKD", "MMK", "MNT", "MOP", "MRU", "MUR",
    "MVR", "MWK", "MXN", "MYR", "MZN", "NAD", "NGN", "NIO", "NOK", "NPR", "NZD", "OMR", "PAB",
    "PEN", "PGK", "PHP", "PKR", "PLN", "PYG", "QAR", "RON", "RSD", "RUB", "RWF", "SAR", "SBD",
    "SCR", "SDG", "SEK", "SGD", "SHP", "SLE", "SOS", "SRD", "SSP", "STN", "SYP", "SZL", "THB",
    "TJS", "TMT", "TND", "TOP", "TRY", "TTD", "TWD", "TZS", "UAH", "UGX", "USD", "UYU", "UZS",
    "VES", "VND", "VUV", "WST", "XAF", "XAG", "XAU", "XCD", "XDR", "XOF", "XPD", "XPF", "XPT",
    "YER", "ZAR", "ZMW", "ZWL",
];

/// Registry backed by the ISO 4217 code list, optionally extended.
#[derive(Debug, Clone)]
pub struct Iso4217Registry {
    codes: HashSet<String>,
}

impl Iso4217Registry {
    /// Registry of the built-in code list.
    pub fn new() -> Self {
        Self {
            codes: ISO_4217.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Accept an additional code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.codes.insert(code.into().to_uppercase());
        self
    }
}

impl Default for Iso4217Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyRegistry for Iso4217Registry {
    fn is_recognized(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}
