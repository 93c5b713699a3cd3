use std::sync::Arc;
use anyhow::Context;
use drape_booking::{AppointmentRepository, BookingComposer};
use drape_catalog::ProductRepository;
use drape_order::{OrderComposer, OrderRepository};
use drape_store::app_config::{Config, StorefrontConfig};
use drape_store::{
    DbClient, MemoryStore, StoreAppointmentRepository, StoreOrderRepository, StoreProductRepository,
};
use crate::session::{NoticeDelays, StorefrontSession};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub storefront: StorefrontConfig,
    // Shared so every session draws from one order-number sequence
    order_composer: Arc<OrderComposer>,
    booking_composer: Arc<BookingComposer>,
}

impl AppState {
    /// Wire the repositories: the hosted Postgres store when a URL is configured,
    /// otherwise an in-memory store seeded from `storefront.seed_catalog`.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        if let Some(url) = &config.database.url {
            let db = DbClient::new(url, &config.database)
                .await
                .context("Failed to connect to the store database")?;

            if config.database.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
                tracing::info!("Migrations applied");
            }

            tracing::info!("Using hosted store");
            return Ok(Self::from_repositories(
                Arc::new(StoreProductRepository::new(db.pool.clone())),
                Arc::new(StoreOrderRepository::new(db.pool.clone())),
                Arc::new(StoreAppointmentRepository::new(db.pool.clone())),
                config.storefront.clone(),
            ));
        }

        let store = match &config.storefront.seed_catalog {
            Some(path) => MemoryStore::from_seed_file(path)
                .with_context(|| format!("Failed to seed catalog from {}", path))?,
            None => MemoryStore::new(),
        };

        tracing::warn!("No database URL configured, using in-memory store");
        Ok(Self::in_memory(Arc::new(store), config.storefront.clone()))
    }

    pub fn in_memory(store: Arc<MemoryStore>, storefront: StorefrontConfig) -> Self {
        Self::from_repositories(store.clone(), store.clone(), store, storefront)
    }

    pub fn from_repositories(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        storefront: StorefrontConfig,
    ) -> Self {
        Self {
            order_composer: Arc::new(OrderComposer::new(orders)),
            booking_composer: Arc::new(BookingComposer::new(appointments)),
            products,
            storefront,
        }
    }

    /// Fresh customer session sharing this state's repositories
    pub fn session(&self) -> StorefrontSession {
        StorefrontSession::new(
            self.order_composer.clone(),
            self.booking_composer.clone(),
            self.notice_delays(),
        )
    }

    pub fn notice_delays(&self) -> NoticeDelays {
        NoticeDelays {
            order: self.storefront.order_notice(),
            booking: self.storefront.booking_notice(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("storefront", &self.storefront)
            .finish_non_exhaustive()
    }
}
