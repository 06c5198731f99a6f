//! Refunds

use serde_json::Value;
use super::endpoint::Operation;
use super::params::{to_params, RefundRequest};
use super::ThriveCart;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct Refunds<'a> {
    client: &'a ThriveCart,
}

impl<'a> Refunds<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    /// Refund a single transaction or rebill
    pub async fn create(&self, request: &RefundRequest) -> Result<Value> {
        self.client
            .dispatch(Operation::Refund, &[], to_params(request)?)
            .await
    }
}
