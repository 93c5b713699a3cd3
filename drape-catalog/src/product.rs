use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Catalog entry as stored by the hosted database. Read-only from the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price of the reference size shown on the product card
    pub base_price: f64,
    pub price_per_sqm: f64,
    pub image_url: String,
    pub is_featured: bool,
    pub is_bestseller: bool,
    pub stock_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn availability(&self) -> StockStatus {
        StockStatus::from_label(&self.stock_status)
    }

    pub fn known_category(&self) -> Option<ProductCategory> {
        ProductCategory::from_tag(&self.category)
    }
}

/// Categories offered as catalog tabs
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Manual,
    Motorized,
    Accessories,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 3] = [
        ProductCategory::Manual,
        ProductCategory::Motorized,
        ProductCategory::Accessories,
    ];

    /// Tag stored in the `category` column
    pub fn tag(self) -> &'static str {
        match self {
            ProductCategory::Manual => "manual",
            ProductCategory::Motorized => "motorized",
            ProductCategory::Accessories => "accessories",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProductCategory::Manual => "Manual Curtains",
            ProductCategory::Motorized => "Motorized Systems",
            ProductCategory::Accessories => "Accessories",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    MadeToOrder,
}

impl StockStatus {
    /// Only the `in_stock` label means the item ships from stock; anything else is made to order.
    pub fn from_label(label: &str) -> Self {
        if label == "in_stock" {
            StockStatus::InStock
        } else {
            StockStatus::MadeToOrder
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::MadeToOrder => "Made to Order",
        }
    }
}
