//! Product catalog for the PC builder.
//!
//! This crate owns the product data contract: categories, compatibility tags,
//! validated products, and the boundary to the external product store. It is
//! pure domain logic (no IO); the store itself is a collaborator behind
//! [`CatalogSource`].

pub mod catalog;
pub mod category;
pub mod product;
pub mod tag;

pub use catalog::{Catalog, CatalogIngest, CatalogSource, InMemoryCatalogSource, load_catalog};
pub use category::{BUILD_SLOTS, Category};
pub use product::{Product, ProductRecord};
pub use tag::{Tag, TagFamily, TagSet};
