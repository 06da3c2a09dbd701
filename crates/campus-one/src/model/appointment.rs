use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an appointment.
///
/// ```text
/// requested --accept--> confirmed --time--> ongoing --close--> completed
/// requested --decline--> declined
/// ```
///
/// `declined` and `completed` are terminal; nothing transitions out of
/// them and appointments are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Requested,
    Confirmed,
    Ongoing,
    Completed,
    Declined,
}

impl AppointmentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Declined)
    }
}

/// One booked service instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub shop_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_phone: String,
    pub service_id: String,
    pub service_name: String,
    /// `%Y-%m-%d`
    pub date: String,
    /// `%H:%M`
    pub time_slot: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub payment_settled: bool,
    #[serde(default)]
    pub reminder_sent: bool,
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const SLOT_FORMAT: &str = "%H:%M";

impl Appointment {
    /// The wall-clock start of the slot, minute precision, or `None` when
    /// the stored date or time does not parse.
    pub fn slot_datetime(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()?;
        let time = NaiveTime::parse_from_str(&self.time_slot, SLOT_FORMAT).ok()?;
        Some(date.and_time(time))
    }
}
