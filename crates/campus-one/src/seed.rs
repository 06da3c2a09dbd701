//! The fixed campus catalog used to seed the shop ledger on first run.

use crate::model::{InventoryItem, Offering, ServiceItem, Shop, ShopCategory};

fn item(id: &str, name: &str, price: f64, stock: u32) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        available: stock > 0,
        stock,
    }
}

fn service(id: &str, name: &str, price: f64, duration: &str) -> ServiceItem {
    ServiceItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        duration: Some(duration.to_string()),
    }
}

/// The four campus vendors every fresh installation starts with.
pub fn initial_shops() -> Vec<Shop> {
    vec![
        Shop {
            id: "shop-1".to_string(),
            name: "North Campus Stationers".to_string(),
            category: ShopCategory::Stationary,
            location: "North Campus, Block A".to_string(),
            timing: "09:00 AM - 08:00 PM".to_string(),
            contact: "9988776655".to_string(),
            image_url: "https://picsum.photos/seed/stationary/400/300".to_string(),
            offering: Offering::Retail {
                items: vec![
                    item("item-1", "A4 Notebook (160 pgs)", 60.0, 45),
                    item("item-2", "Blue Gel Pen", 10.0, 120),
                    item("item-3", "Lab Coat (L)", 350.0, 0),
                    item("item-4", "Scientific Calculator", 1200.0, 5),
                ],
            },
        },
        Shop {
            id: "shop-2".to_string(),
            name: "A2Z Electronics".to_string(),
            category: ShopCategory::Electronics,
            location: "South Campus, Main Arcade".to_string(),
            timing: "10:00 AM - 07:00 PM".to_string(),
            contact: "9944556677".to_string(),
            image_url: "https://picsum.photos/seed/electronics/400/300".to_string(),
            offering: Offering::Retail {
                items: vec![
                    item("elec-1", "Arduino Uno R3", 650.0, 12),
                    item("elec-2", "Jumper Wires (M-M) 40pcs", 120.0, 30),
                    item("elec-3", "Raspberry Pi 4 (4GB)", 4500.0, 0),
                    item("elec-4", "Soldering Kit", 850.0, 8),
                ],
            },
        },
        Shop {
            id: "shop-3".to_string(),
            name: "Campus Salon Elite".to_string(),
            category: ShopCategory::Salon,
            location: "North Campus, Amenities Center".to_string(),
            timing: "08:00 AM - 09:00 PM".to_string(),
            contact: "9911223344".to_string(),
            image_url: "https://picsum.photos/seed/salon/400/300".to_string(),
            offering: Offering::Service {
                services: vec![
                    service("srv-1", "Haircut (Classic)", 100.0, "30 mins"),
                    service("srv-2", "Beard Trim", 50.0, "15 mins"),
                    service("srv-3", "Head Massage", 80.0, "20 mins"),
                    service("srv-4", "Hair Coloring", 500.0, "60 mins"),
                ],
            },
        },
        Shop {
            id: "shop-4".to_string(),
            name: "Tumbler Laundry".to_string(),
            category: ShopCategory::Laundry,
            location: "South Campus, Near Hostel D3".to_string(),
            timing: "07:00 AM - 10:00 PM".to_string(),
            contact: "9900998877".to_string(),
            image_url: "https://picsum.photos/seed/laundry/400/300".to_string(),
            offering: Offering::Service {
                services: vec![
                    service("wash-1", "Wash & Fold (per kg)", 40.0, "24 hrs"),
                    service("wash-2", "Wash & Iron (per kg)", 60.0, "36 hrs"),
                    service("wash-3", "Dry Cleaning (Suit)", 250.0, "72 hrs"),
                    service("wash-4", "Blanket Wash", 150.0, "48 hrs"),
                ],
            },
        },
    ]
}
