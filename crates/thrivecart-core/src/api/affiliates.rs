//! Affiliate management

use serde_json::{json, Value};
use super::endpoint::{AffiliateAction, Operation};
use super::params::{to_params, AffiliateQuery};
use super::ThriveCart;
use crate::http::Params;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct Affiliates<'a> {
    client: &'a ThriveCart,
}

impl<'a> Affiliates<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    /// One page of affiliates
    pub async fn list(&self, query: &AffiliateQuery) -> Result<Value> {
        self.client
            .dispatch(Operation::Affiliates, &[], to_params(query)?)
            .await
    }

    /// Create an affiliate; a structured `product_ids` is sent as JSON text
    pub async fn create(&self, affiliate: Params) -> Result<Value> {
        self.client
            .dispatch(Operation::CreateAffiliate, &[], affiliate)
            .await
    }

    /// Look up one affiliate by user ID, affiliate ID or email address
    pub async fn lookup(&self, affiliate_id: impl Into<String>) -> Result<Value> {
        let mut payload = Params::new();
        payload.insert("affiliate_id".to_string(), Value::String(affiliate_id.into()));
        self.client
            .dispatch(Operation::AffiliateLookup, &[], payload)
            .await
    }

    pub async fn favorite(&self, affiliate_id: &str) -> Result<Value> {
        self.action(AffiliateAction::Favorite, affiliate_id, Params::new()).await
    }

    pub async fn unfavorite(&self, affiliate_id: &str) -> Result<Value> {
        self.action(AffiliateAction::Unfavorite, affiliate_id, Params::new()).await
    }

    /// Register an affiliate for the given products
    pub async fn register(&self, affiliate_id: &str, product_ids: &[i64]) -> Result<Value> {
        let mut payload = Params::new();
        payload.insert("product_ids".to_string(), json!(product_ids));
        self.action(AffiliateAction::Register, affiliate_id, payload).await
    }

    pub async fn approve(&self, affiliate_id: &str) -> Result<Value> {
        self.action(AffiliateAction::Approve, affiliate_id, Params::new()).await
    }

    pub async fn reject(&self, affiliate_id: &str) -> Result<Value> {
        self.action(AffiliateAction::Reject, affiliate_id, Params::new()).await
    }

    pub async fn custom_commissions(&self, affiliate_id: &str, commissions: Params) -> Result<Value> {
        self.action(AffiliateAction::CustomCommissions, affiliate_id, commissions).await
    }

    pub async fn delete(&self, affiliate_id: &str) -> Result<Value> {
        self.action(AffiliateAction::Delete, affiliate_id, Params::new()).await
    }

    /// Run any per-affiliate action
    pub async fn action(
        &self,
        action: AffiliateAction,
        affiliate_id: &str,
        payload: Params,
    ) -> Result<Value> {
        self.client
            .dispatch(Operation::Affiliate(action), &[("affiliate_id", affiliate_id)], payload)
            .await
    }
}
