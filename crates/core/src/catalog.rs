use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// Label of the sentinel filter that matches every product.
pub const ALL_CATEGORIES: &str = "All";

/// Ordered, immutable product list. Loaded once and shared read-only between
/// the catalog view and the cart ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
            if product.price < Decimal::ZERO {
                return Err(DomainError::InvalidCatalog(format!(
                    "product {} has a negative price",
                    product.id
                )));
            }
            if product.name.trim().is_empty() {
                return Err(DomainError::InvalidCatalog(format!(
                    "product {} has an empty name",
                    product.id
                )));
            }
            if product.category.trim().is_empty() {
                return Err(DomainError::InvalidCatalog(format!(
                    "product {} has an empty category",
                    product.id
                )));
            }
        }

        Ok(Self { products })
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
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

    /// Distinct categories in first-occurrence order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|product| seen.insert(product.category.as_str()))
            .map(|product| product.category.clone())
            .collect()
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.products.iter().any(|product| product.category == category)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => &product.category == category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(value)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL_CATEGORIES.to_owned(),
            CategoryFilter::Category(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current category selection over the shared catalog.
#[derive(Clone, Debug)]
pub struct CatalogView {
    catalog: Arc<Catalog>,
    selected: CategoryFilter,
    strict_categories: bool,
}

impl CatalogView {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, selected: CategoryFilter::All, strict_categories: false }
    }

    /// Reject categories that no product carries instead of showing an empty list.
    pub fn with_strict_categories(mut self, strict: bool) -> Self {
        self.strict_categories = strict;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn set_category_filter(
        &mut self,
        filter: impl Into<CategoryFilter>,
    ) -> Result<(), DomainError> {
        let filter = filter.into();
        if self.strict_categories {
            if let CategoryFilter::Category(category) = &filter {
                if !self.catalog.has_category(category) {
                    return Err(DomainError::UnknownCategory(category.clone()));
                }
            }
        }

        self.selected = filter;
        Ok(())
    }

    pub fn list_categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_owned()];
        categories.extend(self.catalog.categories());
        categories
    }

    pub fn list_filtered_products(&self) -> Vec<Product> {
        self.catalog
            .products()
            .iter()
            .filter(|product| self.selected.matches(product))
            .cloned()
            .collect()
    }

    pub fn reset(&mut self) {
        self.selected = CategoryFilter::All;
    }
}
