//! # Appointment Client
//!
//! High-level API for the appointment book actor: booking, the seller
//! actions, the sweep entry point, and filtered reads over a snapshot.

use crate::appointment_book::{
    AppointmentBook, AppointmentCommand, AppointmentError, AppointmentOutcome, BookingRequest,
    SweepReport,
};
use crate::model::Appointment;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use ledger_actor::{ActorError, LedgerClient, LedgerFacade};
use tracing::{debug, instrument};

/// Client for the appointment book actor.
#[derive(Clone)]
pub struct AppointmentClient {
    inner: LedgerClient<AppointmentBook>,
}

#[async_trait]
impl LedgerFacade<AppointmentBook> for AppointmentClient {
    type Error = AppointmentError;

    fn inner(&self) -> &LedgerClient<AppointmentBook> {
        &self.inner
    }

    fn map_error(e: ActorError) -> Self::Error {
        Self::lift(e)
    }
}

impl AppointmentClient {
    pub fn new(inner: LedgerClient<AppointmentBook>) -> Self {
        Self { inner }
    }

    fn lift(e: ActorError) -> AppointmentError {
        e.into_ledger::<AppointmentError>()
            .unwrap_or_else(|other| AppointmentError::ActorCommunication(other.to_string()))
    }

    async fn updated(&self, command: AppointmentCommand) -> Result<Appointment, AppointmentError> {
        match self.inner.apply(command).await {
            Ok(AppointmentOutcome::Updated(appointment)) => Ok(appointment),
            Ok(_) => unreachable!("seller commands must return an Updated outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// Books a new appointment. A rejected booking creates nothing.
    #[instrument(skip(self, request))]
    pub async fn book(&self, request: BookingRequest) -> Result<Appointment, AppointmentError> {
        debug!(shop = %request.shop_id, service = %request.service_name, "Sending request");
        match self.inner.apply(AppointmentCommand::Book(request)).await {
            Ok(AppointmentOutcome::Booked(appointment)) => Ok(appointment),
            Ok(_) => unreachable!("Book must return a Booked outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// Seller confirms a requested appointment of their own shop.
    #[instrument(skip(self))]
    pub async fn accept(
        &self,
        shop_id: &str,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.updated(AppointmentCommand::Accept {
            shop_id: shop_id.to_string(),
            appointment_id: appointment_id.to_string(),
        })
        .await
    }

    /// Seller declines a requested appointment of their own shop.
    #[instrument(skip(self))]
    pub async fn decline(
        &self,
        shop_id: &str,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.updated(AppointmentCommand::Decline {
            shop_id: shop_id.to_string(),
            appointment_id: appointment_id.to_string(),
        })
        .await
    }

    /// Seller records payment for an ongoing appointment.
    #[instrument(skip(self))]
    pub async fn settle_payment(
        &self,
        shop_id: &str,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.updated(AppointmentCommand::SettlePayment {
            shop_id: shop_id.to_string(),
            appointment_id: appointment_id.to_string(),
        })
        .await
    }

    /// Seller closes a paid, ongoing appointment.
    #[instrument(skip(self))]
    pub async fn close(
        &self,
        shop_id: &str,
        appointment_id: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.updated(AppointmentCommand::Close {
            shop_id: shop_id.to_string(),
            appointment_id: appointment_id.to_string(),
        })
        .await
    }

    /// Runs one sweep pass at the given instant.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now: NaiveDateTime) -> Result<SweepReport, AppointmentError> {
        match self.inner.apply(AppointmentCommand::Sweep { now }).await {
            Ok(AppointmentOutcome::Swept(report)) => Ok(report),
            Ok(_) => unreachable!("Sweep must return a Swept outcome"),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// All appointments, oldest first.
    pub async fn all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.snapshot().await?.0)
    }

    /// A student's own appointments.
    pub async fn for_student(&self, student_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = self.all().await?;
        appointments.retain(|a| a.student_id == student_id);
        Ok(appointments)
    }

    /// The appointments of one shop.
    pub async fn for_shop(&self, shop_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        let mut appointments = self.all().await?;
        appointments.retain(|a| a.shop_id == shop_id);
        Ok(appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;
    use ledger_actor::mock::{create_mock_client, expect_apply};

    fn appointment() -> Appointment {
        Appointment {
            id: "apt-1".into(),
            shop_id: "shop-3".into(),
            student_id: "user-1".into(),
            student_name: "Asha".into(),
            student_phone: "9876543210".into(),
            service_id: "srv-1".into(),
            service_name: "Haircut".into(),
            date: "2026-08-05".into(),
            time_slot: "14:30".into(),
            status: AppointmentStatus::Confirmed,
            payment_settled: false,
            reminder_sent: false,
        }
    }

    #[tokio::test]
    async fn accept_sends_the_callers_shop_for_the_ownership_check() {
        let (client, mut receiver) = create_mock_client::<AppointmentBook>(10);
        let appointments = AppointmentClient::new(client);

        let accept_task =
            tokio::spawn(async move { appointments.accept("shop-3", "apt-1").await });

        let (command, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        match command {
            AppointmentCommand::Accept {
                shop_id,
                appointment_id,
            } => {
                assert_eq!(shop_id, "shop-3");
                assert_eq!(appointment_id, "apt-1");
            }
            other => panic!("Expected Accept, got {other:?}"),
        }
        responder
            .send(Ok(AppointmentOutcome::Updated(appointment())))
            .unwrap();

        let updated = accept_task.await.unwrap().unwrap();
        assert_eq!(updated.status, AppointmentStatus::Confirmed);
    }

    #[tokio::test]
    async fn ledger_errors_come_back_typed() {
        let (client, mut receiver) = create_mock_client::<AppointmentBook>(10);
        let appointments = AppointmentClient::new(client);

        let close_task = tokio::spawn(async move { appointments.close("shop-3", "apt-1").await });

        let (_, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        responder
            .send(Err(ActorError::Ledger(Box::new(
                AppointmentError::PaymentPending("apt-1".into()),
            ))))
            .unwrap();

        let err = close_task.await.unwrap().unwrap_err();
        assert_eq!(err, AppointmentError::PaymentPending("apt-1".into()));
    }

    #[tokio::test]
    async fn plumbing_errors_fold_into_actor_communication() {
        let (client, mut receiver) = create_mock_client::<AppointmentBook>(10);
        let appointments = AppointmentClient::new(client);

        let sweep_task = tokio::spawn(async move {
            appointments
                .sweep(chrono::Local::now().naive_local())
                .await
        });

        let (_, responder) = expect_apply(&mut receiver)
            .await
            .expect("Expected Apply request");
        responder.send(Err(ActorError::ActorClosed)).unwrap();

        let err = sweep_task.await.unwrap().unwrap_err();
        assert!(matches!(err, AppointmentError::ActorCommunication(_)));
    }
}
