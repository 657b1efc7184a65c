//! Smart filter: which products can fill a slot given the rest of the build.

use rigforge_catalog::{Category, Product, TagSet};
use rigforge_core::DomainResult;

use crate::build::BuildSelection;
use crate::rules::{PAIR_RULES, PairRule};

/// Tags contributed by every filled slot other than the target.
///
/// Required tags of a slot are left out when a pairwise rule supersedes the
/// generic check for that slot (the case rule matches board requirements
/// any-of instead of all-of).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildConstraints {
    /// Union of the other parts' compatibility tags.
    pub offered: TagSet,
    /// Union of the other parts' required tags.
    pub required: TagSet,
    /// Number of other slots that are filled.
    pub filled_slots: usize,
}

impl BuildConstraints {
    pub fn collect(build: &BuildSelection, target: Category, rules: &[PairRule]) -> Self {
        let mut constraints = Self::default();
        for (category, product) in build.filled() {
            if category == target {
                continue;
            }
            constraints.offered.extend_from(product.compatibility_tags());
            if !rules.iter().any(|r| r.exempts(target, category)) {
                constraints.required.extend_from(product.required_tags());
            }
            constraints.filled_slots += 1;
        }
        constraints
    }

    pub fn is_unconstrained(&self) -> bool {
        self.filled_slots == 0
    }

    /// The candidate offers everything the other parts demand.
    pub fn satisfied_by(&self, candidate: &Product) -> bool {
        candidate.compatibility_tags().contains_all(&self.required)
    }
}

/// Products of `target` compatible with everything else already chosen.
///
/// Out-of-stock products are never offered. Input order is preserved. The
/// target's own current selection never constrains the result. Asking for a
/// category that is not a build slot is an error, not an empty result.
pub fn filter_candidates<'a>(
    catalog: &'a [Product],
    build: &BuildSelection,
    target: Category,
) -> DomainResult<Vec<&'a Product>> {
    filter_candidates_with(catalog, build, target, PAIR_RULES)
}

/// [`filter_candidates`] with a caller-supplied pairwise rule table.
pub fn filter_candidates_with<'a>(
    catalog: &'a [Product],
    build: &BuildSelection,
    target: Category,
    rules: &[PairRule],
) -> DomainResult<Vec<&'a Product>> {
    let target = target.ensure_build_slot()?;
    let in_category = catalog
        .iter()
        .filter(|p| p.in_stock() && p.category() == target);

    let constraints = BuildConstraints::collect(build, target, rules);
    if constraints.is_unconstrained() {
        return Ok(in_category.collect());
    }

    let active: Vec<&PairRule> = rules.iter().filter(|r| r.is_active(target, build)).collect();

    let survivors: Vec<&Product> = in_category
        .filter(|candidate| {
            if !constraints.satisfied_by(candidate) {
                return false;
            }
            active.iter().all(|rule| {
                let ok = rule.check(candidate, build);
                if !ok {
                    tracing::trace!(
                        rule = rule.name,
                        product = %candidate.name(),
                        "candidate rejected"
                    );
                }
                ok
            })
        })
        .collect();

    tracing::debug!(
        slot = %target,
        other_slots = constraints.filled_slots,
        offered_tags = constraints.offered.len(),
        required_tags = constraints.required.len(),
        rules = active.len(),
        survivors = survivors.len(),
        "filtered candidates"
    );

    Ok(survivors)
}
