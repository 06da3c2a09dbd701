//! The [`AppointmentBook`] ledger: booking validation, the seller-driven
//! transitions, and the time-driven sweep.

use crate::appointment_book::actions::{
    AppointmentCommand, AppointmentOutcome, BookingRequest, SweepReport,
};
use crate::appointment_book::error::AppointmentError;
use crate::clients::RelayClient;
use crate::model::appointment::{DATE_FORMAT, SLOT_FORMAT};
use crate::model::{Appointment, AppointmentStatus};
use crate::relay::ChannelKind;
use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use ledger_actor::{Applied, LedgerState};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Reminder policy for the sweep.
///
/// The default is window-based: a reminder fires only while the slot is
/// between the window edge and the slot time, so a pass that was not
/// running when the window elapsed skips that reminder permanently. With
/// `catch_up` set, a never-reminded appointment that is still confirmed
/// gets its reminder even after the window has passed.
#[derive(Debug, Clone, Copy)]
pub struct ReminderPolicy {
    pub window: Duration,
    pub catch_up: bool,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            window: Duration::minutes(5),
            catch_up: false,
        }
    }
}

/// Runtime dependencies of the appointment book.
pub struct AppointmentContext {
    pub relay: RelayClient,
    pub reminders: ReminderPolicy,
}

/// Every appointment in the system, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentBook(pub Vec<Appointment>);

#[async_trait]
impl LedgerState for AppointmentBook {
    type Command = AppointmentCommand;
    type Outcome = AppointmentOutcome;
    type Context = AppointmentContext;
    type Error = AppointmentError;

    const COLLECTION: &'static str = "appointments";

    async fn apply(
        &mut self,
        command: AppointmentCommand,
        ctx: &AppointmentContext,
    ) -> Result<Applied<AppointmentOutcome>, AppointmentError> {
        match command {
            AppointmentCommand::Book(request) => {
                let email = request.student_email.clone();
                let appointment = validate_booking(request)?;
                self.0.push(appointment.clone());
                ctx.relay
                    .dispatch(
                        ChannelKind::Email,
                        &email,
                        &format!(
                            "Recorded {} on {} at {} in the campus ledger.",
                            appointment.service_name, appointment.date, appointment.time_slot
                        ),
                        Some("Appointment requested"),
                    )
                    .await;
                Ok(Applied::mutated(AppointmentOutcome::Booked(appointment)))
            }
            AppointmentCommand::Accept {
                shop_id,
                appointment_id,
            } => self.transition(&shop_id, &appointment_id, |apt| {
                match apt.status {
                    AppointmentStatus::Requested => {
                        apt.status = AppointmentStatus::Confirmed;
                        Ok(())
                    }
                    status => Err(AppointmentError::InvalidTransition {
                        action: "accept",
                        status,
                    }),
                }
            }),
            AppointmentCommand::Decline {
                shop_id,
                appointment_id,
            } => self.transition(&shop_id, &appointment_id, |apt| {
                match apt.status {
                    AppointmentStatus::Requested => {
                        apt.status = AppointmentStatus::Declined;
                        Ok(())
                    }
                    status => Err(AppointmentError::InvalidTransition {
                        action: "decline",
                        status,
                    }),
                }
            }),
            AppointmentCommand::SettlePayment {
                shop_id,
                appointment_id,
            } => self.transition(&shop_id, &appointment_id, |apt| {
                match apt.status {
                    AppointmentStatus::Ongoing => {
                        apt.payment_settled = true;
                        Ok(())
                    }
                    status => Err(AppointmentError::InvalidTransition {
                        action: "settle payment for",
                        status,
                    }),
                }
            }),
            AppointmentCommand::Close {
                shop_id,
                appointment_id,
            } => self.transition(&shop_id, &appointment_id, |apt| match apt.status {
                AppointmentStatus::Ongoing => {
                    if !apt.payment_settled {
                        return Err(AppointmentError::PaymentPending(apt.id.clone()));
                    }
                    apt.status = AppointmentStatus::Completed;
                    Ok(())
                }
                status => Err(AppointmentError::InvalidTransition {
                    action: "close",
                    status,
                }),
            }),
            AppointmentCommand::Sweep { now } => {
                let report = self.sweep(now, ctx).await;
                let outcome = AppointmentOutcome::Swept(report);
                if report.is_idle() {
                    Ok(Applied::unchanged(outcome))
                } else {
                    Ok(Applied::mutated(outcome))
                }
            }
        }
    }
}

impl AppointmentBook {
    /// Runs one seller transition after the ownership check. The closure
    /// only runs for an appointment of the caller's own shop.
    fn transition(
        &mut self,
        shop_id: &str,
        appointment_id: &str,
        mutate: impl FnOnce(&mut Appointment) -> Result<(), AppointmentError>,
    ) -> Result<Applied<AppointmentOutcome>, AppointmentError> {
        let apt = self
            .0
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;
        if apt.shop_id != shop_id {
            return Err(AppointmentError::ForeignShop(appointment_id.to_string()));
        }
        mutate(apt)?;
        Ok(Applied::mutated(AppointmentOutcome::Updated(apt.clone())))
    }

    /// One sweep pass: reminders first, then the confirmed-to-ongoing
    /// transition, both against the same `now`.
    async fn sweep(&mut self, now: NaiveDateTime, ctx: &AppointmentContext) -> SweepReport {
        let mut report = SweepReport::default();
        for apt in self.0.iter_mut() {
            if apt.status != AppointmentStatus::Confirmed {
                continue;
            }
            let Some(slot) = apt.slot_datetime() else {
                warn!(
                    appointment = %apt.id,
                    date = %apt.date,
                    slot = %apt.time_slot,
                    "Unparseable slot, skipping"
                );
                continue;
            };

            let remaining = slot - now;
            let due_for_reminder = if ctx.reminders.catch_up {
                remaining <= ctx.reminders.window
            } else {
                remaining > Duration::zero() && remaining <= ctx.reminders.window
            };
            if !apt.reminder_sent && due_for_reminder {
                let minutes = remaining.num_minutes().max(0);
                ctx.relay
                    .dispatch(
                        ChannelKind::Sms,
                        &apt.student_phone,
                        &format!(
                            "CAMPUS ONE: your {} appointment at {} starts in {} minutes.",
                            apt.service_name, apt.time_slot, minutes
                        ),
                        None,
                    )
                    .await;
                apt.reminder_sent = true;
                report.reminders_sent += 1;
            }

            if now >= slot {
                apt.status = AppointmentStatus::Ongoing;
                report.started += 1;
            }
        }
        report
    }
}

/// Checks a booking request and builds the appointment. Nothing is
/// created on rejection.
fn validate_booking(request: BookingRequest) -> Result<Appointment, AppointmentError> {
    if request.student_phone.trim().is_empty() {
        return Err(AppointmentError::Validation(
            "a contact phone number is required".to_string(),
        ));
    }
    let date = NaiveDate::parse_from_str(&request.date, DATE_FORMAT).map_err(|_| {
        AppointmentError::Validation(format!("unrecognized date {:?}", request.date))
    })?;
    NaiveTime::parse_from_str(&request.time_slot, SLOT_FORMAT).map_err(|_| {
        AppointmentError::Validation(format!("unrecognized time slot {:?}", request.time_slot))
    })?;
    let today = Local::now().date_naive();
    if date < today {
        return Err(AppointmentError::Validation(format!(
            "{} is in the past",
            request.date
        )));
    }

    Ok(Appointment {
        id: Uuid::new_v4().to_string(),
        shop_id: request.shop_id,
        student_id: request.student_id,
        student_name: request.student_name,
        student_phone: request.student_phone,
        service_id: request.service_id,
        service_name: request.service_name,
        date: request.date,
        time_slot: request.time_slot,
        status: AppointmentStatus::Requested,
        payment_settled: false,
        reminder_sent: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: String, slot: &str, phone: &str) -> BookingRequest {
        BookingRequest {
            shop_id: "shop-3".into(),
            student_id: "user-1".into(),
            student_name: "Asha".into(),
            student_email: "asha@students.campus.edu".into(),
            student_phone: phone.into(),
            service_id: "srv-1".into(),
            service_name: "Haircut".into(),
            date,
            time_slot: slot.into(),
        }
    }

    fn today() -> String {
        Local::now().date_naive().format(DATE_FORMAT).to_string()
    }

    #[test]
    fn same_day_booking_is_accepted() {
        let apt = validate_booking(request(today(), "23:59", "9876543210")).unwrap();
        assert_eq!(apt.status, AppointmentStatus::Requested);
        assert!(!apt.payment_settled);
        assert!(!apt.reminder_sent);
    }

    #[test]
    fn yesterday_is_rejected() {
        let yesterday = (Local::now().date_naive() - Duration::days(1))
            .format(DATE_FORMAT)
            .to_string();
        let err = validate_booking(request(yesterday, "10:00", "9876543210")).unwrap_err();
        assert!(matches!(err, AppointmentError::Validation(_)));
    }

    #[test]
    fn missing_phone_and_garbage_fields_are_rejected() {
        assert!(matches!(
            validate_booking(request(today(), "10:00", "   ")),
            Err(AppointmentError::Validation(_))
        ));
        assert!(matches!(
            validate_booking(request("tomorrow".into(), "10:00", "9876543210")),
            Err(AppointmentError::Validation(_))
        ));
        assert!(matches!(
            validate_booking(request(today(), "10am", "9876543210")),
            Err(AppointmentError::Validation(_))
        ));
    }
}
