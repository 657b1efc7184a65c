use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use rigforge_core::{DomainError, DomainResult, Entity, Money, ProductId};

use crate::category::Category;
use crate::tag::{TagFamily, TagSet};

/// Catalog record as it arrives from the external product store.
///
/// Fields are loose on purpose: the store is not under our control, so tag
/// arrays may be missing and the category may be an unknown string. Turn a
/// record into a [`Product`] with [`Product::from_record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Map<String, JsonValue>,
    #[serde(default)]
    pub compatibility_tags: Option<Vec<String>>,
    #[serde(default)]
    pub required_tags: Option<Vec<String>>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl ProductRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        price: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.as_str().to_string(),
            brand: None,
            price,
            image_url: None,
            description: None,
            specifications: Map::new(),
            compatibility_tags: Some(Vec::new()),
            required_tags: Some(Vec::new()),
            in_stock: true,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_compatibility_tags(mut self, tags: &[&str]) -> Self {
        self.compatibility_tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_required_tags(mut self, tags: &[&str]) -> Self {
        self.required_tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.specifications.insert(key.into(), value.into());
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

/// A validated catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    brand: Option<String>,
    price: Money,
    image_url: Option<String>,
    description: Option<String>,
    specifications: Map<String, JsonValue>,
    compatibility_tags: TagSet,
    required_tags: TagSet,
    in_stock: bool,
}

impl Product {
    /// Validate a raw record.
    ///
    /// Missing tag arrays are read as empty sets (and logged). Negative prices,
    /// unknown categories, several tags in one prefix family, and tags that
    /// repeat the product's own category id are rejected.
    pub fn from_record(record: ProductRecord) -> DomainResult<Self> {
        let id: ProductId = record
            .id
            .parse()
            .map_err(|_| DomainError::malformed_product("<blank>", "id cannot be empty"))?;

        let malformed = |reason: String| DomainError::malformed_product(id.as_str(), reason);

        let name = record.name.trim();
        if name.is_empty() {
            return Err(malformed("name cannot be empty".to_string()));
        }

        let category: Category = record
            .category
            .parse()
            .map_err(|e: DomainError| malformed(e.to_string()))?;

        let price = u64::try_from(record.price)
            .map(Money::new)
            .map_err(|_| malformed(format!("price cannot be negative ({})", record.price)))?;

        let compatibility_tags = read_tags(&id, "compatibility_tags", record.compatibility_tags)
            .map_err(|e| malformed(e.to_string()))?;
        let required_tags = read_tags(&id, "required_tags", record.required_tags)
            .map_err(|e| malformed(e.to_string()))?;

        for family in TagFamily::ALL {
            let found = compatibility_tags.family_tags(family);
            if found.len() > 1 {
                let list: Vec<_> = found.iter().map(|t| t.as_str()).collect();
                return Err(malformed(format!(
                    "conflicting '{}' tags: {}",
                    family.prefix(),
                    list.join(", ")
                )));
            }
        }

        if compatibility_tags.contains_str(category.as_str())
            || required_tags.contains_str(category.as_str())
        {
            return Err(malformed(format!(
                "tag '{}' repeats the product category",
                category.as_str()
            )));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            category,
            brand: record.brand.filter(|b| !b.trim().is_empty()),
            price,
            image_url: record.image_url,
            description: record.description,
            specifications: record.specifications,
            compatibility_tags,
            required_tags,
            in_stock: record.in_stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn specifications(&self) -> &Map<String, JsonValue> {
        &self.specifications
    }

    pub fn compatibility_tags(&self) -> &TagSet {
        &self.compatibility_tags
    }

    pub fn required_tags(&self) -> &TagSet {
        &self.required_tags
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn read_tags(id: &ProductId, field: &str, raw: Option<Vec<String>>) -> DomainResult<TagSet> {
    match raw {
        Some(values) => TagSet::parse(values),
        None => {
            tracing::warn!(
                product_id = %id,
                field,
                "catalog record missing tag array; treating as empty"
            );
            Ok(TagSet::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::Tag;

    fn cpu_record() -> ProductRecord {
        ProductRecord::new("cpu-7600x", "Ryzen 5 7600X", Category::Cpu, 18500)
            .with_brand("AMD")
            .with_compatibility_tags(&["socket-am5", "ram-ddr5"])
            .with_spec("cores", 6)
    }

    #[test]
    fn valid_record_becomes_product() {
        let product = Product::from_record(cpu_record()).unwrap();
        assert_eq!(product.id().as_str(), "cpu-7600x");
        assert_eq!(product.category(), Category::Cpu);
        assert_eq!(product.price(), Money::new(18500));
        assert_eq!(product.brand(), Some("AMD"));
        assert!(product.compatibility_tags().contains(&Tag::parse("socket-am5").unwrap()));
        assert!(product.required_tags().is_empty());
        assert_eq!(product.specifications()["cores"], 6);
    }

    #[test]
    fn missing_tag_arrays_are_read_as_empty() {
        let json = r#"{"id":"psu-1","name":"650W Bronze","category":"psu","price":4200}"#;
        let record: ProductRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.compatibility_tags, None);
        assert!(record.in_stock);

        let product = Product::from_record(record).unwrap();
        assert!(product.compatibility_tags().is_empty());
        assert!(product.required_tags().is_empty());
    }

    #[test]
    fn conflicting_socket_tags_are_rejected() {
        let record = cpu_record().with_compatibility_tags(&["socket-am5", "socket-am4"]);
        let err = Product::from_record(record).unwrap_err();
        match err {
            DomainError::MalformedProduct { id, reason } => {
                assert_eq!(id, "cpu-7600x");
                assert!(reason.contains("socket-"));
            }
            other => panic!("Expected MalformedProduct, got {other:?}"),
        }
    }

    #[test]
    fn several_required_case_tags_are_fine() {
        let record = ProductRecord::new("mb-1", "B650M", Category::Motherboard, 15000)
            .with_compatibility_tags(&["socket-am5", "ram-ddr5"])
            .with_required_tags(&["case-atx", "case-matx"]);
        let product = Product::from_record(record).unwrap();
        assert_eq!(product.required_tags().len(), 2);
    }

    #[test]
    fn category_id_used_as_tag_is_rejected() {
        let record = cpu_record().with_compatibility_tags(&["cpu"]);
        assert!(matches!(
            Product::from_record(record),
            Err(DomainError::MalformedProduct { .. })
        ));
    }

    #[test]
    fn negative_price_and_unknown_category_are_rejected() {
        let mut record = cpu_record();
        record.price = -1;
        assert!(Product::from_record(record).is_err());

        let mut record = cpu_record();
        record.category = "toaster".to_string();
        let err = Product::from_record(record).unwrap_err();
        assert!(err.to_string().contains("unknown category"));
    }

    #[test]
    fn blank_name_or_id_is_rejected() {
        let mut record = cpu_record();
        record.name = "  ".to_string();
        assert!(Product::from_record(record).is_err());

        let mut record = cpu_record();
        record.id = String::new();
        assert!(Product::from_record(record).is_err());
    }

    #[test]
    fn products_are_compared_by_identity() {
        let a = Product::from_record(cpu_record()).unwrap();
        let mut cheaper = cpu_record();
        cheaper.price = 17000;
        let b = Product::from_record(cheaper).unwrap();
        assert_ne!(a, b);
        assert!(a.same_identity_as(&b));
    }
}
