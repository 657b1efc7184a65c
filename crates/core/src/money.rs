//! Monetary amounts in whole currency units.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A non-negative amount in whole currency units (rupees).
///
/// Catalog prices are stored without a minor unit, so neither is this.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Addition that clamps at `u64::MAX` instead of wrapping.
    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Format with Indian digit grouping, e.g. `₹1,23,456`.
    pub fn to_inr_string(self) -> String {
        format!("₹{}", group_indian(self.0))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_nothing_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn sum_saturates_instead_of_wrapping() {
        let total: Money = [Money::new(u64::MAX), Money::new(1)].into_iter().sum();
        assert_eq!(total, Money::new(u64::MAX));
    }

    #[test]
    fn inr_grouping() {
        assert_eq!(Money::new(0).to_inr_string(), "₹0");
        assert_eq!(Money::new(950).to_inr_string(), "₹950");
        assert_eq!(Money::new(4500).to_inr_string(), "₹4,500");
        assert_eq!(Money::new(28290).to_inr_string(), "₹28,290");
        assert_eq!(Money::new(123456).to_inr_string(), "₹1,23,456");
        assert_eq!(Money::new(12345678).to_inr_string(), "₹1,23,45,678");
    }
}
