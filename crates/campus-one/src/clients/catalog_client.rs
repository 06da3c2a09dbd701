//! # Catalog Client
//!
//! High-level API for the shop catalog actor.

use crate::catalog::{CatalogCommand, CatalogError, CatalogOutcome, ShopCatalog};
use crate::model::Shop;
use async_trait::async_trait;
use ledger_actor::{ActorError, LedgerClient, LedgerFacade};
use tracing::instrument;

/// Client for the shop catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: LedgerClient<ShopCatalog>,
}

#[async_trait]
impl LedgerFacade<ShopCatalog> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &LedgerClient<ShopCatalog> {
        &self.inner
    }

    fn map_error(e: ActorError) -> Self::Error {
        Self::lift(e)
    }
}

impl CatalogClient {
    pub fn new(inner: LedgerClient<ShopCatalog>) -> Self {
        Self { inner }
    }

    fn lift(e: ActorError) -> CatalogError {
        e.into_ledger::<CatalogError>()
            .unwrap_or_else(|other| CatalogError::ActorCommunication(other.to_string()))
    }

    async fn updated(&self, command: CatalogCommand) -> Result<Shop, CatalogError> {
        match self.inner.apply(command).await {
            Ok(CatalogOutcome::Updated(shop)) => Ok(shop),
            Err(e) => Err(Self::lift(e)),
        }
    }

    /// All shops, in catalog order.
    pub async fn shops(&self) -> Result<Vec<Shop>, CatalogError> {
        Ok(self.snapshot().await?.0)
    }

    /// One shop by id.
    pub async fn shop(&self, shop_id: &str) -> Result<Shop, CatalogError> {
        self.shops()
            .await?
            .into_iter()
            .find(|s| s.id == shop_id)
            .ok_or_else(|| CatalogError::UnknownShop(shop_id.to_string()))
    }

    /// Adds an item (retail shop) or a service (service shop).
    #[instrument(skip(self))]
    pub async fn add_offering(
        &self,
        shop_id: &str,
        name: &str,
        price: f64,
        stock: Option<u32>,
        duration: Option<String>,
    ) -> Result<Shop, CatalogError> {
        self.updated(CatalogCommand::AddOffering {
            shop_id: shop_id.to_string(),
            name: name.to_string(),
            price,
            stock,
            duration,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_price(
        &self,
        shop_id: &str,
        entry_id: &str,
        price: f64,
    ) -> Result<Shop, CatalogError> {
        self.updated(CatalogCommand::SetPrice {
            shop_id: shop_id.to_string(),
            entry_id: entry_id.to_string(),
            price,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_stock(
        &self,
        shop_id: &str,
        item_id: &str,
        stock: u32,
    ) -> Result<Shop, CatalogError> {
        self.updated(CatalogCommand::SetStock {
            shop_id: shop_id.to_string(),
            item_id: item_id.to_string(),
            stock,
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn set_availability(
        &self,
        shop_id: &str,
        item_id: &str,
        available: bool,
    ) -> Result<Shop, CatalogError> {
        self.updated(CatalogCommand::SetAvailability {
            shop_id: shop_id.to_string(),
            item_id: item_id.to_string(),
            available,
        })
        .await
    }
}
