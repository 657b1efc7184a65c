//! Tax and service-charge rates, read from the external settings store.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rigforge_core::{DomainError, DomainResult, ValueObject};

pub const GST_PERCENTAGE_KEY: &str = "gst_percentage";
pub const SERVICE_CHARGE_PERCENTAGE_KEY: &str = "service_charge_percentage";

pub const DEFAULT_GST_PERCENT: Decimal = Decimal::from_parts(18, 0, 0, false, 0);
pub const DEFAULT_SERVICE_CHARGE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// A non-negative percentage, e.g. `18` or `12.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percent(Decimal);

impl ValueObject for Percent {}

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DomainError::validation(format!(
                "percentage cannot be negative ({value})"
            )));
        }
        Ok(Self(value.normalize()))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for Decimal {
    fn from(value: Percent) -> Self {
        value.0
    }
}

impl FromStr for Percent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::validation(format!("invalid percentage '{s}': {e}")))?;
        Self::new(value)
    }
}

impl core::fmt::Display for Percent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Key/value settings as stored by the site's settings collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, String>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    /// Read a percentage, falling back to `default` when absent or unusable.
    pub fn percent_or(&self, key: &str, default: Decimal) -> Percent {
        let fallback = Percent(default);
        match self.get(key) {
            None => {
                tracing::debug!(key, %default, "setting absent; using default");
                fallback
            }
            Some(raw) => raw.parse().unwrap_or_else(|err: DomainError| {
                tracing::warn!(key, raw, error = %err, "unusable setting; using default");
                fallback
            }),
        }
    }

    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// External settings store.
pub trait SettingsSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn settings(&self) -> Result<Settings, Self::Error>;
}

impl SettingsSource for Settings {
    type Error = Infallible;

    fn settings(&self) -> Result<Settings, Self::Error> {
        Ok(self.clone())
    }
}

/// Rates applied on top of a build subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRates {
    pub tax_percent: Percent,
    pub service_charge_percent: Percent,
}

impl Default for QuoteRates {
    fn default() -> Self {
        Self {
            tax_percent: Percent(DEFAULT_GST_PERCENT),
            service_charge_percent: Percent(DEFAULT_SERVICE_CHARGE_PERCENT),
        }
    }
}

impl QuoteRates {
    pub fn new(tax_percent: Percent, service_charge_percent: Percent) -> Self {
        Self {
            tax_percent,
            service_charge_percent,
        }
    }

    /// Missing or malformed settings fall back to 18 % GST and 5 % service.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            tax_percent: settings.percent_or(GST_PERCENTAGE_KEY, DEFAULT_GST_PERCENT),
            service_charge_percent: settings
                .percent_or(SERVICE_CHARGE_PERCENTAGE_KEY, DEFAULT_SERVICE_CHARGE_PERCENT),
        }
    }

    /// Fetch settings and derive rates. Store failures are returned as-is.
    pub fn load<S: SettingsSource>(source: &S) -> Result<Self, S::Error> {
        source.settings().map(|s| Self::from_settings(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_settings_give_defaults() {
        let rates = QuoteRates::from_settings(&Settings::new());
        assert_eq!(rates.tax_percent.value(), dec!(18));
        assert_eq!(rates.service_charge_percent.value(), dec!(5));
        assert_eq!(rates, QuoteRates::default());
    }

    #[test]
    fn settings_override_defaults() {
        let settings = Settings::new()
            .with(GST_PERCENTAGE_KEY, "12.5")
            .with(SERVICE_CHARGE_PERCENTAGE_KEY, "0");
        let rates = QuoteRates::from_settings(&settings);
        assert_eq!(rates.tax_percent.value(), dec!(12.5));
        assert_eq!(rates.service_charge_percent, Percent::ZERO);
    }

    #[test]
    fn unusable_settings_fall_back() {
        let settings: Settings = [
            (GST_PERCENTAGE_KEY, "eighteen"),
            (SERVICE_CHARGE_PERCENTAGE_KEY, "-3"),
        ]
        .into_iter()
        .collect();
        assert_eq!(QuoteRates::from_settings(&settings), QuoteRates::default());

        let blank = Settings::new().with(GST_PERCENTAGE_KEY, "  ");
        assert_eq!(QuoteRates::from_settings(&blank).tax_percent.value(), dec!(18));
    }

    #[test]
    fn negative_percent_is_rejected() {
        assert!(Percent::new(dec!(-0.5)).is_err());
        assert_eq!(Percent::new(dec!(18.00)).unwrap().to_string(), "18%");
    }

    #[test]
    fn load_reads_through_the_source() {
        let rates = QuoteRates::load(&Settings::new().with(GST_PERCENTAGE_KEY, "28")).unwrap();
        assert_eq!(rates.tax_percent.value(), dec!(28));
    }
}
