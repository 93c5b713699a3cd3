use async_trait::async_trait;
use drape_core::PersistenceError;
use crate::appointment::Appointment;

/// Write access to the hosted `appointments` table
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), PersistenceError>;
}
