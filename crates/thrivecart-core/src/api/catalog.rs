//! Products, bumps, upsells and downsells

use serde_json::Value;
use super::endpoint::{CatalogKind, Operation};
use super::ThriveCart;
use crate::http::Params;
use crate::Result;

/// Read access to one kind of catalog item
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    client: &'a ThriveCart,
    kind: CatalogKind,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(client: &'a ThriveCart, kind: CatalogKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// List every item of this kind
    pub async fn list(&self) -> Result<Value> {
        self.list_with(Params::new()).await
    }

    /// List with extra filter parameters
    pub async fn list_with(&self, filters: Params) -> Result<Value> {
        self.client
            .dispatch(Operation::CatalogList(self.kind), &[], filters)
            .await
    }

    /// Fetch a single item
    pub async fn get(&self, id: impl ToString) -> Result<Value> {
        self.item(Operation::CatalogItem(self.kind), id).await
    }

    /// Pricing options of a single item
    pub async fn pricing_options(&self, id: impl ToString) -> Result<Value> {
        self.item(Operation::PricingOptions(self.kind), id).await
    }

    async fn item(&self, operation: Operation, id: impl ToString) -> Result<Value> {
        let id = id.to_string();
        self.client
            .dispatch(operation, &[(self.kind.token(), id.as_str())], Params::new())
            .await
    }
}
