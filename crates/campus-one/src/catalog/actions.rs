//! Commands and outcomes for the shop catalog.

use crate::model::Shop;

#[derive(Debug)]
pub enum CatalogCommand {
    /// Add an item or service to a shop. The shop's offering kind decides
    /// which one is created: retail shops turn `stock` into an inventory
    /// item (available when stock is positive), service shops turn
    /// `duration` into a service entry.
    AddOffering {
        shop_id: String,
        name: String,
        price: f64,
        stock: Option<u32>,
        duration: Option<String>,
    },
    /// Reprice an item or service.
    SetPrice {
        shop_id: String,
        entry_id: String,
        price: f64,
    },
    /// Restock a retail item. Does not touch the availability switch.
    SetStock {
        shop_id: String,
        item_id: String,
        stock: u32,
    },
    /// Seller override: take a retail item on or off line independent of
    /// its stock count.
    SetAvailability {
        shop_id: String,
        item_id: String,
        available: bool,
    },
}

#[derive(Debug)]
pub enum CatalogOutcome {
    /// The shop as it stands after the edit.
    Updated(Shop),
}
