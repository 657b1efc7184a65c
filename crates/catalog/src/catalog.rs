//! In-memory catalog and the catalog-store collaborator boundary.

use std::collections::HashSet;
use std::convert::Infallible;

use rigforge_core::{DomainError, Entity, ProductId};

use crate::category::Category;
use crate::product::{Product, ProductRecord};

/// External product store.
///
/// Implementations are expected to return in-stock items only; ingestion
/// drops anything else regardless. Failures are surfaced to the caller
/// unchanged.
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn list_products(&self) -> Result<Vec<ProductRecord>, Self::Error>;
}

/// Validated, in-stock products in store order.
///
/// Store order is meaningful (display/price order) and is never changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Outcome of ingesting raw records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogIngest {
    pub catalog: Catalog,
    /// Records rejected as malformed, in input order.
    pub rejected: Vec<DomainError>,
    /// Records skipped because they were out of stock.
    pub out_of_stock: usize,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Validate raw records, keeping in-stock products and collecting
    /// rejections instead of failing the whole catalog.
    ///
    /// Ids are unique: the first record with a given id wins and later ones
    /// are rejected.
    pub fn ingest(records: impl IntoIterator<Item = ProductRecord>) -> CatalogIngest {
        let mut ingest = CatalogIngest::default();
        let mut seen: HashSet<ProductId> = HashSet::new();

        for record in records {
            if !record.in_stock {
                ingest.out_of_stock += 1;
                continue;
            }
            let product = Product::from_record(record).and_then(|product| {
                if seen.insert(product.id().clone()) {
                    Ok(product)
                } else {
                    Err(DomainError::malformed_product(
                        product.id().as_str(),
                        "duplicate product id",
                    ))
                }
            });
            match product {
                Ok(product) => ingest.catalog.products.push(product),
                Err(err) => {
                    tracing::warn!(error = %err, "rejected catalog record");
                    ingest.rejected.push(err);
                }
            }
        }

        tracing::debug!(
            accepted = ingest.catalog.len(),
            rejected = ingest.rejected.len(),
            out_of_stock = ingest.out_of_stock,
            "catalog ingested"
        );
        ingest
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category() == category)
    }
}

/// Fetch and ingest the catalog from a store.
pub fn load_catalog<S: CatalogSource>(source: &S) -> Result<CatalogIngest, S::Error> {
    let records = source.list_products()?;
    Ok(Catalog::ingest(records))
}

/// In-memory product store for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogSource {
    records: Vec<ProductRecord>,
}

impl InMemoryCatalogSource {
    pub fn new(records: Vec<ProductRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }
}

impl CatalogSource for InMemoryCatalogSource {
    type Error = Infallible;

    fn list_products(&self) -> Result<Vec<ProductRecord>, Self::Error> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.in_stock)
            .cloned()
            .collect())
    }
}
