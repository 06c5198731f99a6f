//! Customer lookup

use serde_json::Value;
use super::endpoint::Operation;
use super::params::{to_params, CustomerQuery};
use super::ThriveCart;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct Customers<'a> {
    client: &'a ThriveCart,
}

impl<'a> Customers<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    /// Everything stored about the customer with this email address
    pub async fn get(&self, email: impl Into<String>) -> Result<Value> {
        let query = CustomerQuery { email: email.into() };
        self.client
            .dispatch(Operation::Customer, &[], to_params(&query)?)
            .await
    }
}
