pub mod appointment;
pub mod form;
pub mod composer;
pub mod repository;

pub use appointment::{Appointment, TimeSlot};
pub use form::{BookingField, BookingForm};
pub use composer::BookingComposer;
pub use repository::AppointmentRepository;
