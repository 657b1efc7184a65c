//! Build aggregation: line items, subtotal, and completion status.
//!
//! Pricing with tax and service charge lives in `rigforge-quotes`; this module
//! only folds over the build.

use serde::{Deserialize, Serialize};

use rigforge_catalog::{Category, Product};
use rigforge_core::Money;

use crate::build::BuildSelection;

/// Categories a full PC needs before it is considered complete.
pub const FULL_PC_REQUIRED: [Category; 4] = [
    Category::Cpu,
    Category::Motherboard,
    Category::Ram,
    Category::Storage,
];

/// What the customer is building; decides which slots are mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    FullPc,
    #[default]
    PartsOnly,
}

impl BuildMode {
    pub fn required_categories(self) -> &'static [Category] {
        match self {
            BuildMode::FullPc => &FULL_PC_REQUIRED,
            BuildMode::PartsOnly => &[],
        }
    }
}

/// Sum of the prices of all filled slots.
pub fn total(build: &BuildSelection) -> Money {
    build.filled().map(|(_, p)| p.price()).sum()
}

/// Filled slots as line items, in wizard step order.
pub fn items(build: &BuildSelection) -> Vec<&Product> {
    build.filled().map(|(_, p)| p).collect()
}

/// Every category in `required` is filled.
pub fn is_complete(build: &BuildSelection, required: &[Category]) -> bool {
    required.iter().all(|c| build.is_filled(*c))
}

/// Required categories still missing, in the order given.
pub fn missing(build: &BuildSelection, required: &[Category]) -> Vec<Category> {
    required
        .iter()
        .copied()
        .filter(|c| !build.is_filled(*c))
        .collect()
}
