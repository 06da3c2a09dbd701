//! Error types for the shop catalog.

use thiserror::Error;

/// Errors that can occur during catalog edits.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Inventory validation error: {0}")]
    Validation(String),

    #[error("Shop not found: {0}")]
    UnknownShop(String),

    #[error("No item or service {entry_id} in shop {shop_id}")]
    UnknownEntry { shop_id: String, entry_id: String },

    /// Stock and availability only exist for retail shops.
    #[error("Shop {0} does not stock retail items")]
    NotRetail(String),

    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<String> for CatalogError {
    fn from(msg: String) -> Self {
        CatalogError::ActorCommunication(msg)
    }
}
