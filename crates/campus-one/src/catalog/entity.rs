//! The [`ShopCatalog`] ledger and its inventory edits. Every edit
//! dispatches on the shop's offering variant with an exhaustive match.

use crate::catalog::actions::{CatalogCommand, CatalogOutcome};
use crate::catalog::error::CatalogError;
use crate::model::{InventoryItem, Offering, ServiceItem, Shop};
use async_trait::async_trait;
use ledger_actor::{Applied, LedgerState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_SERVICE_DURATION: &str = "30 mins";

/// Every campus vendor, in catalog order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopCatalog(pub Vec<Shop>);

#[async_trait]
impl LedgerState for ShopCatalog {
    type Command = CatalogCommand;
    type Outcome = CatalogOutcome;
    type Context = ();
    type Error = CatalogError;

    const COLLECTION: &'static str = "shops";

    async fn apply(
        &mut self,
        command: CatalogCommand,
        _ctx: &(),
    ) -> Result<Applied<CatalogOutcome>, CatalogError> {
        match command {
            CatalogCommand::AddOffering {
                shop_id,
                name,
                price,
                stock,
                duration,
            } => {
                if name.trim().is_empty() {
                    return Err(CatalogError::Validation("a name is required".to_string()));
                }
                if !price.is_finite() || price < 0.0 {
                    return Err(CatalogError::Validation(format!(
                        "{price} is not a usable price"
                    )));
                }
                let shop = self.shop_mut(&shop_id)?;
                match &mut shop.offering {
                    Offering::Retail { items } => {
                        let stock = stock.unwrap_or(0);
                        items.push(InventoryItem {
                            id: Uuid::new_v4().to_string(),
                            name: name.trim().to_string(),
                            price,
                            available: stock > 0,
                            stock,
                        });
                    }
                    Offering::Service { services } => {
                        services.push(ServiceItem {
                            id: Uuid::new_v4().to_string(),
                            name: name.trim().to_string(),
                            price,
                            duration: Some(
                                duration.unwrap_or_else(|| DEFAULT_SERVICE_DURATION.to_string()),
                            ),
                        });
                    }
                }
                Ok(Applied::mutated(CatalogOutcome::Updated(shop.clone())))
            }
            CatalogCommand::SetPrice {
                shop_id,
                entry_id,
                price,
            } => {
                if !price.is_finite() || price < 0.0 {
                    return Err(CatalogError::Validation(format!(
                        "{price} is not a usable price"
                    )));
                }
                let shop = self.shop_mut(&shop_id)?;
                let found = match &mut shop.offering {
                    Offering::Retail { items } => {
                        items.iter_mut().find(|i| i.id == entry_id).map(|item| {
                            item.price = price;
                        })
                    }
                    Offering::Service { services } => {
                        services.iter_mut().find(|s| s.id == entry_id).map(|service| {
                            service.price = price;
                        })
                    }
                };
                found.ok_or(CatalogError::UnknownEntry { shop_id, entry_id })?;
                Ok(Applied::mutated(CatalogOutcome::Updated(shop.clone())))
            }
            CatalogCommand::SetStock {
                shop_id,
                item_id,
                stock,
            } => {
                let shop = self.shop_mut(&shop_id)?;
                match &mut shop.offering {
                    Offering::Retail { items } => {
                        let item = items
                            .iter_mut()
                            .find(|i| i.id == item_id)
                            .ok_or(CatalogError::UnknownEntry {
                                shop_id,
                                entry_id: item_id,
                            })?;
                        item.stock = stock;
                    }
                    Offering::Service { .. } => return Err(CatalogError::NotRetail(shop_id)),
                }
                Ok(Applied::mutated(CatalogOutcome::Updated(shop.clone())))
            }
            CatalogCommand::SetAvailability {
                shop_id,
                item_id,
                available,
            } => {
                let shop = self.shop_mut(&shop_id)?;
                match &mut shop.offering {
                    Offering::Retail { items } => {
                        let item = items
                            .iter_mut()
                            .find(|i| i.id == item_id)
                            .ok_or(CatalogError::UnknownEntry {
                                shop_id,
                                entry_id: item_id,
                            })?;
                        item.available = available;
                    }
                    Offering::Service { .. } => return Err(CatalogError::NotRetail(shop_id)),
                }
                Ok(Applied::mutated(CatalogOutcome::Updated(shop.clone())))
            }
        }
    }
}

impl ShopCatalog {
    fn shop_mut(&mut self, shop_id: &str) -> Result<&mut Shop, CatalogError> {
        self.0
            .iter_mut()
            .find(|s| s.id == shop_id)
            .ok_or_else(|| CatalogError::UnknownShop(shop_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn catalog() -> ShopCatalog {
        ShopCatalog(seed::initial_shops())
    }

    #[tokio::test]
    async fn adding_to_a_retail_shop_creates_an_item_with_stock_derived_availability() {
        let mut catalog = catalog();
        let applied = catalog
            .apply(
                CatalogCommand::AddOffering {
                    shop_id: "shop-1".into(),
                    name: "Graph Paper".into(),
                    price: 25.0,
                    stock: Some(0),
                    duration: None,
                },
                &(),
            )
            .await
            .unwrap();

        let CatalogOutcome::Updated(shop) = applied.outcome;
        match &shop.offering {
            Offering::Retail { items } => {
                let item = items.last().unwrap();
                assert_eq!(item.name, "Graph Paper");
                assert!(!item.available);
                assert_eq!(item.stock, 0);
            }
            Offering::Service { .. } => panic!("shop-1 is retail"),
        }
    }

    #[tokio::test]
    async fn adding_to_a_service_shop_creates_a_service_with_default_duration() {
        let mut catalog = catalog();
        let applied = catalog
            .apply(
                CatalogCommand::AddOffering {
                    shop_id: "shop-3".into(),
                    name: "Shave".into(),
                    price: 60.0,
                    stock: None,
                    duration: None,
                },
                &(),
            )
            .await
            .unwrap();

        let CatalogOutcome::Updated(shop) = applied.outcome;
        match &shop.offering {
            Offering::Service { services } => {
                let service = services.last().unwrap();
                assert_eq!(service.duration.as_deref(), Some("30 mins"));
            }
            Offering::Retail { .. } => panic!("shop-3 offers services"),
        }
    }

    #[tokio::test]
    async fn availability_toggles_independently_of_stock() {
        let mut catalog = catalog();
        catalog
            .apply(
                CatalogCommand::SetAvailability {
                    shop_id: "shop-1".into(),
                    item_id: "item-1".into(),
                    available: false,
                },
                &(),
            )
            .await
            .unwrap();

        match &catalog.0[0].offering {
            Offering::Retail { items } => {
                assert!(!items[0].available);
                assert!(items[0].stock > 0);
            }
            Offering::Service { .. } => panic!("shop-1 is retail"),
        }
    }

    #[tokio::test]
    async fn stock_edits_on_a_service_shop_are_rejected() {
        let mut catalog = catalog();
        let err = catalog
            .apply(
                CatalogCommand::SetStock {
                    shop_id: "shop-4".into(),
                    item_id: "wash-1".into(),
                    stock: 3,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotRetail(_)));
    }

    #[tokio::test]
    async fn unknown_shops_and_entries_are_rejected() {
        let mut catalog = catalog();
        let err = catalog
            .apply(
                CatalogCommand::SetPrice {
                    shop_id: "shop-99".into(),
                    entry_id: "item-1".into(),
                    price: 10.0,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownShop(_)));

        let err = catalog
            .apply(
                CatalogCommand::SetPrice {
                    shop_id: "shop-1".into(),
                    entry_id: "item-99".into(),
                    price: 10.0,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownEntry { .. }));
    }
}
