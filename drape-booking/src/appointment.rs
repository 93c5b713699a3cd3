use std::fmt;
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use drape_shared::Masked;

/// Consultation visit windows offered on the booking form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    #[serde(rename = "9:00 AM - 11:00 AM")]
    Morning,
    #[serde(rename = "11:00 AM - 1:00 PM")]
    LateMorning,
    #[serde(rename = "2:00 PM - 4:00 PM")]
    Afternoon,
    #[serde(rename = "4:00 PM - 6:00 PM")]
    LateAfternoon,
    #[serde(rename = "6:00 PM - 8:00 PM")]
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 5] = [
        TimeSlot::Morning,
        TimeSlot::LateMorning,
        TimeSlot::Afternoon,
        TimeSlot::LateAfternoon,
        TimeSlot::Evening,
    ];

    /// Label shown to the customer and stored in `appointments.preferred_time`
    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::Morning => "9:00 AM - 11:00 AM",
            TimeSlot::LateMorning => "11:00 AM - 1:00 PM",
            TimeSlot::Afternoon => "2:00 PM - 4:00 PM",
            TimeSlot::LateAfternoon => "4:00 PM - 6:00 PM",
            TimeSlot::Evening => "6:00 PM - 8:00 PM",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.label() == label)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Consultation request ready to be written. Built only through `BookingForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub customer_name: String,
    pub customer_email: Masked<String>,
    pub customer_phone: Masked<String>,
    pub customer_address: String,
    pub preferred_date: NaiveDate,
    pub preferred_time: TimeSlot,
    pub notes: Option<String>,
}
