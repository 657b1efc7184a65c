//! In-progress build state and the selection reducer.

use serde::{Deserialize, Serialize};

use rigforge_catalog::{BUILD_SLOTS, Category, Product};
use rigforge_core::{DomainError, DomainResult, Entity, ProductId};

/// One product (or nothing) per build slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSelection {
    slots: [Option<Product>; BUILD_SLOTS.len()],
}

/// A change to a build.
///
/// UI clicks are interpreted into one of these with [`Selection::toggle`];
/// the reducer never has to guess whether a click meant "deselect".
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Select { category: Category, product: Product },
    Deselect { category: Category },
}

impl Selection {
    /// Interpret a click on `product`: choosing the product already in its
    /// slot clears the slot, anything else selects it.
    pub fn toggle(build: &BuildSelection, product: &Product) -> Self {
        let category = product.category();
        match build.get(category) {
            Some(current) if current.id() == product.id() => Selection::Deselect { category },
            _ => Selection::Select {
                category,
                product: product.clone(),
            },
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Selection::Select { category, .. } | Selection::Deselect { category } => *category,
        }
    }
}

/// Deterministic key for a build, usable for memoizing filter results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildFingerprint(Vec<(Category, ProductId)>);

impl BuildSelection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<&Product> {
        category
            .slot_index()
            .and_then(|i| self.slots[i].as_ref())
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Filled slots in wizard step order.
    pub fn filled(&self) -> impl Iterator<Item = (Category, &Product)> {
        BUILD_SLOTS
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(c, p)| p.as_ref().map(|p| (*c, p)))
    }

    pub fn selected_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    pub fn fingerprint(&self) -> BuildFingerprint {
        BuildFingerprint(
            self.filled()
                .map(|(c, p)| (c, p.id().clone()))
                .collect(),
        )
    }

    /// Apply a selection in place.
    pub fn apply(&mut self, selection: Selection) -> DomainResult<()> {
        let index = slot_index(selection.category())?;
        match selection {
            Selection::Select { category, product } => {
                if product.category() != category {
                    return Err(DomainError::invariant(format!(
                        "product {} is a {}, not a {}",
                        product.id(),
                        product.category(),
                        category
                    )));
                }
                self.slots[index] = Some(product);
            }
            Selection::Deselect { .. } => {
                self.slots[index] = None;
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

/// Pure reducer: the build after `selection`.
pub fn apply_selection(
    build: &BuildSelection,
    selection: Selection,
) -> DomainResult<BuildSelection> {
    let mut next = build.clone();
    next.apply(selection)?;
    Ok(next)
}

fn slot_index(category: Category) -> DomainResult<usize> {
    category
        .slot_index()
        .ok_or_else(|| DomainError::invalid_category(format!("{category} is not a build slot")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigforge_catalog::ProductRecord;

    fn product(id: &str, category: Category, price: i64) -> Product {
        Product::from_record(ProductRecord::new(id, id, category, price)).unwrap()
    }

    #[test]
    fn empty_build_has_no_selections() {
        let build = BuildSelection::empty();
        assert!(build.is_empty());
        assert_eq!(build.filled().count(), 0);
        assert!(build.get(Category::Cpu).is_none());
    }

    #[test]
    fn selecting_another_product_replaces_the_slot() {
        let a = product("cpu-a", Category::Cpu, 100);
        let b = product("cpu-b", Category::Cpu, 200);

        let empty = BuildSelection::empty();
        let build = apply_selection(&empty, Selection::toggle(&empty, &a)).unwrap();
        let build = apply_selection(&build, Selection::toggle(&build, &b)).unwrap();

        assert_eq!(build.selected_count(), 1);
        assert_eq!(build.get(Category::Cpu).unwrap().id().as_str(), "cpu-b");
    }

    #[test]
    fn selecting_same_product_again_clears_the_slot() {
        let a = product("cpu-a", Category::Cpu, 100);
        let empty = BuildSelection::empty();
        let build = apply_selection(&empty, Selection::toggle(&empty, &a)).unwrap();

        let toggle = Selection::toggle(&build, &a);
        assert_eq!(toggle, Selection::Deselect { category: Category::Cpu });

        let build = apply_selection(&build, toggle).unwrap();
        assert_eq!(build, BuildSelection::empty());
    }

    #[test]
    fn reducer_does_not_touch_its_input() {
        let a = product("ram-a", Category::Ram, 100);
        let before = BuildSelection::empty();
        let after = apply_selection(&before, Selection::toggle(&before, &a)).unwrap();
        assert!(before.is_empty());
        assert_eq!(after.selected_count(), 1);
    }

    #[test]
    fn product_must_match_the_slot() {
        let ram = product("ram-a", Category::Ram, 100);
        let err = apply_selection(
            &BuildSelection::empty(),
            Selection::Select {
                category: Category::Cpu,
                product: ram,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn non_slot_category_cannot_be_selected() {
        let monitor = product("mon-a", Category::Monitor, 100);
        let empty = BuildSelection::empty();
        let err = apply_selection(&empty, Selection::toggle(&empty, &monitor)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCategory(_)));
    }

    #[test]
    fn filled_iterates_in_step_order_and_fingerprint_follows() {
        let mut build = BuildSelection::empty();
        build.apply(Selection::toggle(&build, &product("cool-a", Category::Cooling, 1))).unwrap();
        build.apply(Selection::toggle(&build, &product("cpu-a", Category::Cpu, 1))).unwrap();

        let order: Vec<_> = build.filled().map(|(c, _)| c).collect();
        assert_eq!(order, [Category::Cpu, Category::Cooling]);

        let mut other = BuildSelection::empty();
        other.apply(Selection::toggle(&other, &product("cpu-a", Category::Cpu, 1))).unwrap();
        other.apply(Selection::toggle(&other, &product("cool-a", Category::Cooling, 1))).unwrap();
        assert_eq!(build.fingerprint(), other.fingerprint());
    }
}
