use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use drape_catalog::{Product, ProductFilter, ProductRepository};
use drape_core::PersistenceError;
use crate::persistence;

pub struct StoreProductRepository {
    pool: PgPool,
}

impl StoreProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    category: String,
    base_price: f64,
    price_per_sqm: f64,
    image_url: String,
    is_featured: bool,
    is_bestseller: bool,
    stock_status: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            category: row.category,
            base_price: row.base_price,
            price_per_sqm: row.price_per_sqm,
            image_url: row.image_url,
            is_featured: row.is_featured,
            is_bestseller: row.is_bestseller,
            stock_status: row.stock_status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Build the catalog query for `filter`. Unset filter fields add no clause.
fn catalog_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT id, name, description, category, base_price::FLOAT8 AS base_price, \
         price_per_sqm::FLOAT8 AS price_per_sqm, image_url, is_featured, is_bestseller, \
         stock_status, created_at, updated_at FROM products WHERE TRUE",
    );

    if let Some(featured) = filter.featured {
        query.push(" AND is_featured = ").push_bind(featured);
    }

    if let Some(category) = &filter.category {
        query.push(" AND category = ").push_bind(category.clone());
    }

    query.push(" ORDER BY created_at DESC");

    if let Some(limit) = filter.limit {
        query.push(" LIMIT ").push_bind(i64::from(limit));
    }

    query
}

#[async_trait]
impl ProductRepository for StoreProductRepository {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, PersistenceError> {
        let mut query = catalog_query(filter);
        debug!(sql = query.sql(), "Listing products");

        let rows: Vec<ProductRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
