//! # Shop Catalog Actor
//!
//! The vendor directory and its inventories. The catalog is seeded once
//! from the fixed campus list when nothing was ever persisted and is
//! owned by the sellers afterwards: the only mutations are inventory
//! edits (add an offering, reprice, restock, toggle availability).
//!
//! ## Structure
//!
//! - [`actions`] - inventory edit commands
//! - [`entity`] - the [`ShopCatalog`] ledger
//! - [`error`] - [`CatalogError`]
//! - [`new()`] - factory with the seed-on-first-run fallback

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::ShopCatalog;
pub use error::CatalogError;

use crate::clients::CatalogClient;
use crate::seed;
use ledger_actor::store::{persist_collection, BlobStore};
use ledger_actor::{LedgerActor, LedgerState};
use std::sync::Arc;
use tracing::{info, warn};

/// Creates the catalog actor and its client.
///
/// Falls back to the fixed seed catalog only when the `shops` blob was
/// never written, and persists the seed immediately so every later run
/// loads the seller-owned copy.
pub fn new(store: Arc<dyn BlobStore>) -> (LedgerActor<ShopCatalog>, CatalogClient) {
    let catalog = match store.read(ShopCatalog::COLLECTION) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(error = %e, "Stored shop catalog is corrupt, reseeding");
                seed_and_persist(store.as_ref())
            }
        },
        Ok(None) => seed_and_persist(store.as_ref()),
        Err(e) => {
            warn!(error = %e, "Storage read failed, seeding shop catalog in memory");
            ShopCatalog(seed::initial_shops())
        }
    };

    let (actor, client) = LedgerActor::persistent(32, catalog, store);
    (actor, CatalogClient::new(client))
}

fn seed_and_persist(store: &dyn BlobStore) -> ShopCatalog {
    info!("Seeding shop catalog from the fixed campus list");
    let catalog = ShopCatalog(seed::initial_shops());
    persist_collection(store, ShopCatalog::COLLECTION, &catalog);
    catalog
}
