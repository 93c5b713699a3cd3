use async_trait::async_trait;
use drape_core::PersistenceError;
use crate::models::{OrderHeader, OrderLine, StoredOrder};

/// Write access to the hosted `orders` / `order_items` tables
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert the header and return it with the identity assigned by the store.
    async fn insert_order(&self, header: &OrderHeader) -> Result<StoredOrder, PersistenceError>;

    /// Insert all lines of one order in a single write.
    async fn insert_order_lines(&self, lines: &[OrderLine]) -> Result<(), PersistenceError>;
}
