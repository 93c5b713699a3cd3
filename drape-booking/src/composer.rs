use std::sync::Arc;
use tracing::{error, info};
use drape_core::CoreResult;
use crate::appointment::Appointment;
use crate::repository::AppointmentRepository;

/// Writes consultation requests to the store
pub struct BookingComposer {
    repository: Arc<dyn AppointmentRepository>,
}

impl BookingComposer {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn book(&self, appointment: &Appointment) -> CoreResult<()> {
        self.repository.insert_appointment(appointment).await
            .map_err(|e| {
                error!(date = %appointment.preferred_date, "Failed to write appointment: {}", e);
                e
            })?;

        info!(
            date = %appointment.preferred_date,
            slot = %appointment.preferred_time,
            "Consultation booked"
        );
        Ok(())
    }
}
