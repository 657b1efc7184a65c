//! Step-by-step builder session.
//!
//! Mirrors the wizard: one build slot per step, a toggle-select on the current
//! step, and a reset once a quote has been submitted.

use rigforge_catalog::{BUILD_SLOTS, Category, Product};
use rigforge_core::{DomainError, DomainResult};

use crate::aggregate::{self, BuildMode};
use crate::build::{BuildSelection, Selection};
use crate::filter::filter_candidates;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuilderSession {
    step: usize,
    mode: BuildMode,
    build: BuildSelection,
}

impl BuilderSession {
    pub fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current_category(&self) -> Category {
        BUILD_SLOTS[self.step]
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn build(&self) -> &BuildSelection {
        &self.build
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 == BUILD_SLOTS.len()
    }

    /// Advance one step; stays on the last step.
    pub fn next(&mut self) -> Category {
        if !self.is_last_step() {
            self.step += 1;
        }
        self.current_category()
    }

    /// Go back one step; stays on the first step.
    pub fn prev(&mut self) -> Category {
        if !self.is_first_step() {
            self.step -= 1;
        }
        self.current_category()
    }

    /// Jump straight to the step for `category`.
    pub fn go_to(&mut self, category: Category) -> DomainResult<()> {
        self.step = category.ensure_build_slot()?.slot_index().unwrap_or(self.step);
        Ok(())
    }

    /// Toggle `product` on the current step.
    pub fn select(&mut self, product: &Product) -> DomainResult<()> {
        let current = self.current_category();
        if product.category() != current {
            return Err(DomainError::validation(format!(
                "{} cannot be chosen on the {} step",
                product.category(),
                current
            )));
        }
        self.build.apply(Selection::toggle(&self.build, product))
    }

    /// Compatible products for the current step.
    pub fn candidates<'a>(&self, catalog: &'a [Product]) -> DomainResult<Vec<&'a Product>> {
        filter_candidates(catalog, &self.build, self.current_category())
    }

    pub fn selected_count(&self) -> usize {
        self.build.selected_count()
    }

    /// A quote needs at least one item, whatever the mode.
    pub fn can_get_quote(&self) -> bool {
        !self.build.is_empty()
    }

    /// All categories the current mode requires are filled.
    pub fn is_complete(&self) -> bool {
        aggregate::is_complete(&self.build, self.mode.required_categories())
    }

    /// Start over after a submission, keeping the chosen mode.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }
}
