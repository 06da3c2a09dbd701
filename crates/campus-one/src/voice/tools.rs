//! The four tool calls and their broker.

use crate::appointment_book::BookingRequest;
use crate::clients::{ActivityClient, AppointmentClient, CatalogClient};
use crate::model::{Offering, Shop, User};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{instrument, warn};

/// Reply of one tool call. Serializes as `{"result": "..."}` or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolReply {
    Result(String),
    Error(String),
}

/// Side effects a tool call asks the surrounding shell to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantSignal {
    /// Show a shop view, or the root view for `None`.
    Navigate(Option<String>),
    /// Shut the assistant session down.
    Sleep,
}

/// Executes tool calls on behalf of the signed-in user.
pub struct ToolBroker {
    catalog: CatalogClient,
    appointments: AppointmentClient,
    activity: ActivityClient,
    user: User,
    signals: mpsc::UnboundedSender<AssistantSignal>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn find_shop<'a>(shops: &'a [Shop], name: &str) -> Option<&'a Shop> {
    shops.iter().find(|s| contains_ci(&s.name, name))
}

impl ToolBroker {
    pub fn new(
        catalog: CatalogClient,
        appointments: AppointmentClient,
        activity: ActivityClient,
        user: User,
        signals: mpsc::UnboundedSender<AssistantSignal>,
    ) -> Self {
        Self {
            catalog,
            appointments,
            activity,
            user,
            signals,
        }
    }

    fn signal(&self, signal: AssistantSignal) {
        // The shell may already be gone; the reply still stands.
        let _ = self.signals.send(signal);
    }

    /// Reports availability, price, and stock of a retail item.
    #[instrument(skip(self))]
    pub async fn check_item_availability(&self, shop_name: &str, item_name: &str) -> ToolReply {
        let shops = match self.catalog.shops().await {
            Ok(shops) => shops,
            Err(e) => return ToolReply::Error(e.to_string()),
        };
        let Some(shop) = find_shop(&shops, shop_name) else {
            return ToolReply::Error(format!("Shop \"{shop_name}\" not found."));
        };
        match &shop.offering {
            Offering::Retail { items } => {
                match items.iter().find(|i| contains_ci(&i.name, item_name)) {
                    Some(item) => ToolReply::Result(format!(
                        "{} is {} in {}. Price is ₹{}. Stock: {}.",
                        item.name,
                        if item.available {
                            "available"
                        } else {
                            "out of stock"
                        },
                        shop.name,
                        item.price,
                        item.stock
                    )),
                    None => ToolReply::Error(format!(
                        "Item \"{item_name}\" not found in {}.",
                        shop.name
                    )),
                }
            }
            Offering::Service { .. } => ToolReply::Error(format!(
                "{} offers services, not stocked items.",
                shop.name
            )),
        }
    }

    /// Opens a shop view, or the root view for "home" / "dashboard".
    #[instrument(skip(self))]
    pub async fn navigate_to_shop(&self, shop_name: &str) -> ToolReply {
        let lowered = shop_name.to_lowercase();
        if lowered == "home" || lowered == "dashboard" {
            self.signal(AssistantSignal::Navigate(None));
            return ToolReply::Result("Navigated to the main dashboard.".to_string());
        }
        let shops = match self.catalog.shops().await {
            Ok(shops) => shops,
            Err(e) => return ToolReply::Error(e.to_string()),
        };
        match find_shop(&shops, shop_name) {
            Some(shop) => {
                self.signal(AssistantSignal::Navigate(Some(shop.id.clone())));
                ToolReply::Result(format!("Opened the {} view.", shop.name))
            }
            None => ToolReply::Error(format!("I couldn't find a shop named \"{shop_name}\".")),
        }
    }

    /// Books a service by name, with the same validation as the direct
    /// booking path.
    #[instrument(skip(self))]
    pub async fn book_appointment(
        &self,
        shop_name: &str,
        service_name: &str,
        date: &str,
        time: &str,
        phone: &str,
    ) -> ToolReply {
        let shops = match self.catalog.shops().await {
            Ok(shops) => shops,
            Err(e) => return ToolReply::Error(e.to_string()),
        };
        let Some(shop) = find_shop(&shops, shop_name) else {
            return ToolReply::Error(format!("Shop \"{shop_name}\" not found."));
        };
        let service = match &shop.offering {
            Offering::Service { services } => {
                match services.iter().find(|s| contains_ci(&s.name, service_name)) {
                    Some(service) => service,
                    None => {
                        return ToolReply::Error(format!(
                            "Service \"{service_name}\" not found in {}.",
                            shop.name
                        ))
                    }
                }
            }
            Offering::Retail { .. } => {
                return ToolReply::Error(format!(
                    "{} sells items; only services can be booked.",
                    shop.name
                ))
            }
        };

        let request = BookingRequest {
            shop_id: shop.id.clone(),
            student_id: self.user.id.clone(),
            student_name: self.user.name.clone(),
            student_email: self.user.email.clone(),
            student_phone: phone.to_string(),
            service_id: service.id.clone(),
            service_name: service.name.clone(),
            date: date.to_string(),
            time_slot: time.to_string(),
        };
        match self.appointments.book(request).await {
            Ok(appointment) => {
                if let Err(e) = self
                    .activity
                    .record(&self.user, "voice_booking", appointment.id.clone())
                    .await
                {
                    warn!(error = %e, "Voice booking succeeded but could not be recorded");
                }
                ToolReply::Result(format!(
                    "Success. Booked {} at {} for {} at {}.",
                    appointment.service_name, shop.name, appointment.date, appointment.time_slot
                ))
            }
            Err(e) => ToolReply::Error(e.to_string()),
        }
    }

    /// Ends the assistant session.
    #[instrument(skip(self))]
    pub fn go_to_sleep(&self) -> ToolReply {
        self.signal(AssistantSignal::Sleep);
        ToolReply::Result("Standing by.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_serialize_as_single_key_objects() {
        let ok = serde_json::to_string(&ToolReply::Result("done".into())).unwrap();
        assert_eq!(ok, r#"{"result":"done"}"#);

        let err = serde_json::to_string(&ToolReply::Error("nope".into())).unwrap();
        assert_eq!(err, r#"{"error":"nope"}"#);
    }

    #[test]
    fn substring_matching_ignores_case() {
        assert!(contains_ci("Campus Salon Elite", "salon"));
        assert!(!contains_ci("Campus Salon Elite", "laundry"));
    }
}
