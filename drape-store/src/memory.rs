use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use tracing::{debug, info};
use drape_booking::{Appointment, AppointmentRepository};
use drape_catalog::{Product, ProductFilter, ProductRepository};
use drape_core::PersistenceError;
use drape_order::{OrderHeader, OrderLine, OrderRepository, StoredOrder};

/// Which store operations should fail. Used to exercise failure paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailurePlan {
    pub catalog: bool,
    pub orders: bool,
    pub order_lines: bool,
    pub appointments: bool,
}

/// One accepted write, in the order it reached the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Order { order_number: String },
    OrderLines { count: usize },
    Appointment,
}

#[derive(Default)]
struct MemoryState {
    products: Vec<Product>,
    orders: Vec<StoredOrder>,
    order_lines: Vec<OrderLine>,
    appointments: Vec<Appointment>,
    journal: Vec<StoreWrite>,
    failures: FailurePlan,
}

/// In-process stand-in for the hosted store, implementing all three repositories.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        store.state().products = products;
        store
    }

    /// Seed the catalog from a JSON array of products.
    pub fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PersistenceError::new(format!("cannot read {}: {}", path.display(), e)))?;
        let products: Vec<Product> = serde_json::from_str(&raw)
            .map_err(|e| PersistenceError::new(format!("cannot parse {}: {}", path.display(), e)))?;

        info!("Seeded in-memory catalog with {} products from {}", products.len(), path.display());
        Ok(Self::with_products(products))
    }

    pub fn set_failures(&self, failures: FailurePlan) {
        self.state().failures = failures;
    }

    pub fn orders(&self) -> Vec<StoredOrder> {
        self.state().orders.clone()
    }

    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.state().order_lines.clone()
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state().appointments.clone()
    }

    pub fn journal(&self) -> Vec<StoreWrite> {
        self.state().journal.clone()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, PersistenceError> {
        let state = self.state();
        if state.failures.catalog {
            return Err(PersistenceError::new("catalog unavailable"));
        }

        let mut products: Vec<Product> = state.products.iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = filter.limit {
            products.truncate(limit as usize);
        }

        debug!("In-memory catalog returned {} products", products.len());
        Ok(products)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn insert_order(&self, header: &OrderHeader) -> Result<StoredOrder, PersistenceError> {
        let mut state = self.state();
        if state.failures.orders {
            return Err(PersistenceError::new("orders insert rejected"));
        }

        if state.orders.iter().any(|o| o.header.order_number == header.order_number) {
            return Err(PersistenceError::new(format!(
                "duplicate order_number {}",
                header.order_number
            )));
        }

        let stored = StoredOrder {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            header: header.clone(),
        };
        state.orders.push(stored.clone());
        state.journal.push(StoreWrite::Order {
            order_number: header.order_number.to_string(),
        });

        Ok(stored)
    }

    async fn insert_order_lines(&self, lines: &[OrderLine]) -> Result<(), PersistenceError> {
        let mut state = self.state();
        if state.failures.order_lines {
            return Err(PersistenceError::new("order_items insert rejected"));
        }

        if let Some(orphan) = lines.iter().find(|l| !state.orders.iter().any(|o| o.id == l.order_id)) {
            return Err(PersistenceError::new(format!(
                "order_items references unknown order {}",
                orphan.order_id
            )));
        }

        state.order_lines.extend_from_slice(lines);
        state.journal.push(StoreWrite::OrderLines { count: lines.len() });
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for MemoryStore {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), PersistenceError> {
        let mut state = self.state();
        if state.failures.appointments {
            return Err(PersistenceError::new("appointments insert rejected"));
        }

        state.appointments.push(appointment.clone());
        state.journal.push(StoreWrite::Appointment);
        Ok(())
    }
}
