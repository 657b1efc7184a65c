//! Render-ready quotation data for external document generators.
//!
//! PDF, email and WhatsApp rendering happen elsewhere; everything they print
//! is computed here so they never do arithmetic themselves.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use rigforge_catalog::Category;
use rigforge_core::Money;

use crate::quote::Quote;
use crate::rates::{QuoteRates, Settings};

pub const COMPANY_NAME_KEY: &str = "company_name";
pub const COMPANY_PHONE_KEY: &str = "company_phone";
pub const COMPANY_EMAIL_KEY: &str = "company_email";
pub const COMPANY_ADDRESS_KEY: &str = "company_address";

/// Days a quotation stays valid after issue.
pub const QUOTE_VALIDITY_DAYS: i64 = 7;

/// Terms printed at the foot of every quotation.
pub const TERMS: [&str; 3] = [
    "This quotation is valid for 7 days from the date of issue.",
    "Prices are subject to change based on availability.",
    "Warranty as per manufacturer terms.",
];

/// Seller details printed on the quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Konark Computers".to_string(),
            phone: "+91 942 642 9416".to_string(),
            email: "info@konarkcomputers.com".to_string(),
            address: "Ahmedabad, Gujarat, India".to_string(),
        }
    }
}

impl CompanyProfile {
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        Self {
            name: settings.text_or(COMPANY_NAME_KEY, &defaults.name),
            phone: settings.text_or(COMPANY_PHONE_KEY, &defaults.phone),
            email: settings.text_or(COMPANY_EMAIL_KEY, &defaults.email),
            address: settings.text_or(COMPANY_ADDRESS_KEY, &defaults.address),
        }
    }
}

/// Human-facing quotation reference, `KQ-` + base-36 issue time in ms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteNumber(String);

impl QuoteNumber {
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        let millis = u64::try_from(at.timestamp_millis()).unwrap_or_default();
        Self(format!("KQ-{}", to_base36_upper(millis)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for QuoteNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36_upper(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub name: String,
    pub brand: Option<String>,
    pub category: Category,
    pub price: Money,
}

/// Everything a document generator needs for one quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotationSheet {
    pub number: QuoteNumber,
    pub issued_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub customer_name: String,
    pub company: CompanyProfile,
    pub rates: QuoteRates,
    pub lines: Vec<QuoteLine>,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub service_charge: Money,
    pub total: Money,
    pub terms: Vec<String>,
}

impl QuotationSheet {
    pub fn new(
        quote: &Quote,
        rates: QuoteRates,
        company: CompanyProfile,
        customer_name: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            number: QuoteNumber::from_timestamp(issued_at),
            issued_at,
            valid_until: issued_at + Duration::days(QUOTE_VALIDITY_DAYS),
            customer_name: customer_name.into().trim().to_string(),
            company,
            rates,
            lines: quote
                .items
                .iter()
                .map(|p| QuoteLine {
                    name: p.name().to_string(),
                    brand: p.brand().map(str::to_string),
                    category: p.category(),
                    price: p.price(),
                })
                .collect(),
            subtotal: quote.subtotal,
            tax_amount: quote.tax_amount,
            service_charge: quote.service_charge,
            total: quote.total,
            terms: TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Summary lines as printed under the items, e.g. `GST (18%)  ₹4,140`.
    pub fn summary(&self) -> Vec<(String, String)> {
        vec![
            ("Subtotal".to_string(), self.subtotal.to_inr_string()),
            (
                format!("GST ({})", self.rates.tax_percent),
                self.tax_amount.to_inr_string(),
            ),
            (
                format!("Service Charge ({})", self.rates.service_charge_percent),
                self.service_charge.to_inr_string(),
            ),
            ("TOTAL".to_string(), self.total.to_inr_string()),
        ]
    }
}
