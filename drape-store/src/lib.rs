pub mod app_config;
pub mod database;
pub mod product_repo;
pub mod order_repo;
pub mod appointment_repo;
pub mod memory;

pub use database::DbClient;
pub use product_repo::StoreProductRepository;
pub use order_repo::StoreOrderRepository;
pub use appointment_repo::StoreAppointmentRepository;
pub use memory::{FailurePlan, MemoryStore, StoreWrite};

use drape_core::PersistenceError;

/// Collapse a driver error into the store's single failure signal.
pub(crate) fn persistence(err: sqlx::Error) -> PersistenceError {
    PersistenceError::new(err.to_string())
}
