//! Transaction history

use serde_json::Value;
use super::endpoint::Operation;
use super::params::{to_params, TransactionQuery};
use super::ThriveCart;
use crate::Result;

/// `GET /transactions`, one page per call
#[derive(Debug, Clone, Copy)]
pub struct Transactions<'a> {
    client: &'a ThriveCart,
}

impl<'a> Transactions<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &TransactionQuery) -> Result<Value> {
        self.client
            .dispatch(Operation::Transactions, &[], to_params(query)?)
            .await
    }
}
