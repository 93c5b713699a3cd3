use async_trait::async_trait;
use sqlx::PgPool;
use drape_booking::{Appointment, AppointmentRepository};
use drape_core::PersistenceError;
use crate::persistence;

pub struct StoreAppointmentRepository {
    pool: PgPool,
}

impl StoreAppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for StoreAppointmentRepository {
    async fn insert_appointment(&self, appointment: &Appointment) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO appointments (customer_name, customer_email, customer_phone, customer_address, preferred_date, preferred_time, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&appointment.customer_name)
        .bind(appointment.customer_email.expose())
        .bind(appointment.customer_phone.expose())
        .bind(&appointment.customer_address)
        .bind(appointment.preferred_date)
        .bind(appointment.preferred_time.label())
        .bind(appointment.notes.as_deref())
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }
}
