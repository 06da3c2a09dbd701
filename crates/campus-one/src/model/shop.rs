use serde::{Deserialize, Serialize};

/// Vendor category. Stationary and electronics shops sell stocked items;
/// salons and laundries take bookings for services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShopCategory {
    Stationary,
    Electronics,
    Salon,
    Laundry,
}

/// A stocked retail item.
///
/// `available` is the seller-facing switch and may be toggled
/// independently of the stock count (a seller can take an item offline
/// while units remain on the shelf). It is initialized from `stock > 0`
/// when the item is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub available: bool,
    #[serde(default)]
    pub stock: u32,
}

/// A bookable service. Services carry no availability switch; any listed
/// service can be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// What a shop sells, as a tagged variant.
///
/// Callers dispatch on this with an exhaustive `match`; there is no
/// "is this category retail" list anywhere. The serialized form flattens
/// into the shop object as an `items` or `services` key, matching the
/// persisted blob layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offering {
    Retail { items: Vec<InventoryItem> },
    Service { services: Vec<ServiceItem> },
}

/// A campus vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub category: ShopCategory,
    pub location: String,
    pub timing: String,
    pub contact: String,
    pub image_url: String,
    #[serde(flatten)]
    pub offering: Offering,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offering_flattens_to_items_or_services_keys() {
        let shop = Shop {
            id: "shop-9".into(),
            name: "Test Shop".into(),
            category: ShopCategory::Salon,
            location: "somewhere".into(),
            timing: "09:00 - 17:00".into(),
            contact: "123".into(),
            image_url: "http://example.com/x.png".into(),
            offering: Offering::Service {
                services: vec![ServiceItem {
                    id: "srv-1".into(),
                    name: "Haircut".into(),
                    price: 100.0,
                    duration: Some("30 mins".into()),
                }],
            },
        };

        let json = serde_json::to_value(&shop).unwrap();
        assert!(json.get("services").is_some());
        assert!(json.get("items").is_none());

        let back: Shop = serde_json::from_value(json).unwrap();
        assert_eq!(back, shop);
    }

    #[test]
    fn retail_offering_round_trips() {
        let offering = Offering::Retail {
            items: vec![InventoryItem {
                id: "item-1".into(),
                name: "Notebook".into(),
                price: 60.0,
                available: true,
                stock: 45,
            }],
        };
        let json = serde_json::to_string(&offering).unwrap();
        let back: Offering = serde_json::from_str(&json).unwrap();
        assert_eq!(back, offering);
    }
}
