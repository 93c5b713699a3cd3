use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{PgPool, QueryBuilder};
use drape_core::PersistenceError;
use drape_order::{OrderHeader, OrderLine, OrderRepository, StoredOrder};
use crate::persistence;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn insert_order(&self, header: &OrderHeader) -> Result<StoredOrder, PersistenceError> {
        let (id, created_at): (Uuid, chrono::DateTime<chrono::Utc>) = sqlx::query_as(
            r#"
            INSERT INTO orders (order_number, customer_name, customer_email, customer_phone, delivery_address, subtotal, tax, total, payment_method, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, created_at
            "#,
        )
        .bind(header.order_number.as_str())
        .bind(&header.customer_name)
        .bind(header.customer_email.expose())
        .bind(header.customer_phone.expose())
        .bind(&header.delivery_address)
        .bind(header.subtotal)
        .bind(header.tax)
        .bind(header.total)
        .bind(header.payment_method.code())
        .bind(header.notes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(StoredOrder {
            id,
            created_at,
            header: header.clone(),
        })
    }

    async fn insert_order_lines(&self, lines: &[OrderLine]) -> Result<(), PersistenceError> {
        if lines.is_empty() {
            return Ok(());
        }

        let mut rows = Vec::with_capacity(lines.len());
        for line in lines {
            let quantity = i32::try_from(line.quantity)
                .map_err(|_| PersistenceError::new(format!("quantity {} out of range", line.quantity)))?;
            rows.push((line, quantity));
        }

        let mut query = QueryBuilder::new(
            "INSERT INTO order_items (order_id, product_id, product_name, width, height, quantity, unit_price, total_price) ",
        );
        query.push_values(rows, |mut b, (line, quantity)| {
            b.push_bind(line.order_id)
                .push_bind(line.product_id)
                .push_bind(line.product_name.clone())
                .push_bind(line.width)
                .push_bind(line.height)
                .push_bind(quantity)
                .push_bind(line.unit_price)
                .push_bind(line.total_price);
        });

        query
            .build()
            .execute(&self.pool)
            .await
            .map_err(persistence)?;

        Ok(())
    }
}
