use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use drape_core::PersistenceError;
use crate::product::{Product, ProductCategory};

/// Number of featured products shown on the home page
pub const FEATURED_LIMIT: u32 = 6;

/// Catalog query. Every unset field means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub featured: Option<bool>,
    pub category: Option<String>,
    pub limit: Option<u32>,
}

impl ProductFilter {
    /// Everything in the catalog ("All Products")
    pub fn all() -> Self {
        Self::default()
    }

    /// Home page selection
    pub fn featured(limit: u32) -> Self {
        Self {
            featured: Some(true),
            category: None,
            limit: Some(limit),
        }
    }

    pub fn category(category: ProductCategory) -> Self {
        Self {
            category: Some(category.tag().to_string()),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Row-level predicate (limit is applied by the caller after ordering)
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(featured) = self.featured {
            if product.is_featured != featured {
                return false;
            }
        }

        if let Some(category) = &self.category {
            if &product.category != category {
                return false;
            }
        }

        true
    }
}

/// Read access to the hosted catalog
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Products matching `filter`, newest first, at most `filter.limit` of them.
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, PersistenceError>;
}
