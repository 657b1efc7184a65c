//! Priced quotation derived from a build.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use rigforge_builder::{BuildSelection, aggregate};
use rigforge_catalog::Product;
use rigforge_core::Money;

use crate::rates::{Percent, QuoteRates};

/// Items and totals for a build. Derived on demand, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub items: Vec<Product>,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub service_charge: Money,
    pub total: Money,
}

impl Quote {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// `percent` of `amount`, rounded half-up to a whole currency unit.
pub fn percent_of(amount: Money, percent: Percent) -> Money {
    let Some(scaled) = Decimal::from(amount.amount()).checked_mul(percent.value()) else {
        return Money::new(u64::MAX);
    };
    let exact = scaled / Decimal::ONE_HUNDRED;
    let rounded = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Money::new(rounded.to_u64().unwrap_or(u64::MAX))
}

/// Price a build.
///
/// Tax and service charge are each rounded on their own before being added to
/// the subtotal, so the grand total can differ by one unit from rounding
/// `subtotal * (1 + rates)` once. An empty build prices to all zeros.
pub fn compute_quote(
    build: &BuildSelection,
    tax_percent: Percent,
    service_charge_percent: Percent,
) -> Quote {
    let subtotal = aggregate::total(build);
    let tax_amount = percent_of(subtotal, tax_percent);
    let service_charge = percent_of(subtotal, service_charge_percent);

    Quote {
        items: aggregate::items(build).into_iter().cloned().collect(),
        subtotal,
        tax_amount,
        service_charge,
        total: subtotal.saturating_add(tax_amount).saturating_add(service_charge),
    }
}

/// [`compute_quote`] with rates loaded from settings.
pub fn compute_quote_with(build: &BuildSelection, rates: &QuoteRates) -> Quote {
    compute_quote(build, rates.tax_percent, rates.service_charge_percent)
}
