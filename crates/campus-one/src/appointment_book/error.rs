//! Error types for the appointment book.

use crate::model::AppointmentStatus;
use thiserror::Error;

/// Errors that can occur while booking or advancing appointments.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppointmentError {
    /// The booking request was rejected before anything was created.
    #[error("Booking validation error: {0}")]
    Validation(String),

    /// No appointment with the given id exists.
    #[error("Appointment not found: {0}")]
    NotFound(String),

    /// The appointment belongs to a different shop than the caller.
    #[error("Appointment {0} belongs to another shop")]
    ForeignShop(String),

    /// The requested transition is not defined from the current state.
    #[error("Cannot {action} an appointment in the {status:?} state")]
    InvalidTransition {
        action: &'static str,
        status: AppointmentStatus,
    },

    /// Closing requires the payment to be settled first.
    #[error("Payment must be settled before closing appointment {0}")]
    PaymentPending(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for AppointmentError {
    fn from(msg: String) -> Self {
        AppointmentError::ActorCommunication(msg)
    }
}
