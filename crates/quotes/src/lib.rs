//! Pricing, quotation sheets and lead submission for the PC builder.
//!
//! Everything here is synchronous and free of I/O. Rates and company details
//! come from a [`SettingsSource`]; finished quotes leave through a
//! [`LeadSink`].

pub mod lead;
pub mod quote;
pub mod rates;
pub mod sheet;

pub use lead::{
    CustomerContact, InMemoryLeadSink, LeadPayload, LeadSink, LeadStatus, LeadStorePoisoned,
    SubmitError, submit_quote, submit_session,
};
pub use quote::{Quote, compute_quote, compute_quote_with, percent_of};
pub use rates::{Percent, QuoteRates, Settings, SettingsSource};
pub use sheet::{CompanyProfile, QuotationSheet, QuoteLine, QuoteNumber};
