//! Shaping quotes into leads for the external lead-capture service.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rigforge_builder::BuilderSession;
use rigforge_catalog::Product;
use rigforge_core::{DomainError, DomainResult, Money};

use crate::quote::{Quote, compute_quote_with};
use crate::rates::QuoteRates;

/// Lead lifecycle as tracked by the back office. Submissions always start
/// as `New`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    FollowUp,
    Converted,
    Archived,
}

/// Contact details typed in by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
}

impl CustomerContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_whatsapp(mut self, number: impl Into<String>) -> Self {
        self.whatsapp = Some(number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Payload accepted by the lead-capture service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub customer_name: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub items: Vec<Product>,
    pub subtotal: Money,
    pub gst_amount: Money,
    pub service_charge: Money,
    pub total_amount: Money,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl LeadPayload {
    /// Validate contact details and the quote, then build the payload.
    ///
    /// Needs a name, at least one usable contact channel, and at least one
    /// item. A channel that is filled in but malformed is an error even when
    /// the other channel is fine.
    pub fn from_quote(
        quote: &Quote,
        contact: &CustomerContact,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quote.is_empty() {
            return Err(DomainError::EmptySubmission);
        }

        let name = contact.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let whatsapp = non_blank(contact.whatsapp.as_deref())
            .map(normalize_phone)
            .transpose()?;
        let email = non_blank(contact.email.as_deref())
            .map(normalize_email)
            .transpose()?;

        if whatsapp.is_none() && email.is_none() {
            return Err(DomainError::validation(
                "provide a WhatsApp number or an email address",
            ));
        }

        Ok(Self {
            customer_name: name.to_string(),
            whatsapp,
            email,
            items: quote.items.clone(),
            subtotal: quote.subtotal,
            gst_amount: quote.tax_amount,
            service_charge: quote.service_charge,
            total_amount: quote.total,
            status: LeadStatus::New,
            created_at,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_phone(raw: &str) -> DomainResult<String> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')');
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    if !raw.chars().all(allowed) || !(10..=15).contains(&digits) {
        return Err(DomainError::validation(format!("'{raw}' is not a valid WhatsApp number")));
    }
    Ok(raw.to_string())
}

fn normalize_email(raw: &str) -> DomainResult<String> {
    let valid = match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !raw.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::validation(format!("'{raw}' is not a valid email address")));
    }
    Ok(raw.to_ascii_lowercase())
}

/// External lead-capture service. The core never retries.
pub trait LeadSink {
    type Receipt;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_lead(&self, payload: &LeadPayload) -> Result<Self::Receipt, Self::Error>;
}

#[derive(Debug, Error)]
pub enum SubmitError<E: std::error::Error + 'static> {
    /// Input problem the customer can fix.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The lead-capture service failed; surfaced unchanged.
    #[error("lead submission failed: {0}")]
    Sink(#[source] E),
}

impl<E: std::error::Error + 'static> SubmitError<E> {
    pub fn is_empty_submission(&self) -> bool {
        matches!(self, SubmitError::Invalid(DomainError::EmptySubmission))
    }
}

/// Validate and hand a quote to the lead sink.
pub fn submit_quote<S: LeadSink>(
    sink: &S,
    quote: &Quote,
    contact: &CustomerContact,
    created_at: DateTime<Utc>,
) -> Result<S::Receipt, SubmitError<S::Error>> {
    let payload = LeadPayload::from_quote(quote, contact, created_at)?;
    let receipt = sink.create_lead(&payload).map_err(SubmitError::Sink)?;
    tracing::info!(
        items = payload.items.len(),
        total = %payload.total_amount,
        "lead submitted"
    );
    Ok(receipt)
}

/// Price the session's build, submit it, and reset the session on success.
///
/// On failure the session is left untouched so the customer can retry.
pub fn submit_session<S: LeadSink>(
    sink: &S,
    session: &mut BuilderSession,
    rates: &QuoteRates,
    contact: &CustomerContact,
    created_at: DateTime<Utc>,
) -> Result<S::Receipt, SubmitError<S::Error>> {
    let quote = compute_quote_with(session.build(), rates);
    let receipt = submit_quote(sink, &quote, contact, created_at)?;
    session.reset();
    Ok(receipt)
}

/// In-memory lead sink for tests/dev. Receipts are 1-based positions.
#[derive(Debug, Default)]
pub struct InMemoryLeadSink {
    leads: RwLock<Vec<LeadPayload>>,
}

#[derive(Debug, Error)]
#[error("lead store lock poisoned")]
pub struct LeadStorePoisoned;

impl InMemoryLeadSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leads(&self) -> Vec<LeadPayload> {
        match self.leads.read() {
            Ok(leads) => leads.clone(),
            Err(_) => vec![],
        }
    }
}

impl LeadSink for InMemoryLeadSink {
    type Receipt = usize;
    type Error = LeadStorePoisoned;

    fn create_lead(&self, payload: &LeadPayload) -> Result<Self::Receipt, Self::Error> {
        let mut leads = self.leads.write().map_err(|_| LeadStorePoisoned)?;
        leads.push(payload.clone());
        Ok(leads.len())
    }
}
