//! Commands and outcomes for the appointment book.

use crate::model::Appointment;
use chrono::NaiveDateTime;

/// Everything a booking needs. The student email is used for the
/// confirmation notification only and is not stored on the appointment.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub shop_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_email: String,
    pub student_phone: String,
    pub service_id: String,
    pub service_name: String,
    pub date: String,
    pub time_slot: String,
}

#[derive(Debug)]
pub enum AppointmentCommand {
    /// Create a new appointment in the `requested` state.
    Book(BookingRequest),
    /// Seller confirms a requested appointment.
    Accept {
        shop_id: String,
        appointment_id: String,
    },
    /// Seller declines a requested appointment. Terminal.
    Decline {
        shop_id: String,
        appointment_id: String,
    },
    /// Seller records payment for an ongoing appointment.
    SettlePayment {
        shop_id: String,
        appointment_id: String,
    },
    /// Seller closes a paid, ongoing appointment. Terminal.
    Close {
        shop_id: String,
        appointment_id: String,
    },
    /// One pass of the periodic sweep at the given wall-clock instant.
    Sweep { now: NaiveDateTime },
}

#[derive(Debug)]
pub enum AppointmentOutcome {
    Booked(Appointment),
    Updated(Appointment),
    Swept(SweepReport),
}

/// What one sweep pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub reminders_sent: usize,
    pub started: usize,
}

impl SweepReport {
    pub fn is_idle(&self) -> bool {
        self.reminders_sent == 0 && self.started == 0
    }
}
