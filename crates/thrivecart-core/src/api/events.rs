//! Webhook event subscriptions

use serde_json::Value;
use super::endpoint::Operation;
use super::params::{to_params, EventSubscription};
use super::ThriveCart;
use crate::http::Params;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a ThriveCart,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    /// Start delivering matching events to `target_url`
    pub async fn subscribe(&self, subscription: &EventSubscription) -> Result<Value> {
        self.client
            .dispatch(Operation::Subscribe, &[], to_params(subscription)?)
            .await
    }

    /// Stop delivering events to `target_url`
    pub async fn unsubscribe(&self, target_url: impl Into<String>) -> Result<Value> {
        let mut payload = Params::new();
        payload.insert("target_url".to_string(), Value::String(target_url.into()));
        self.client
            .dispatch(Operation::Unsubscribe, &[], payload)
            .await
    }
}
