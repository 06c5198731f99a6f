//! Subscription lifecycle

use serde_json::Value;
use super::endpoint::Operation;
use super::params::{to_params, PauseRequest, SubscriptionRequest};
use super::ThriveCart;
use crate::Result;

#[derive(Debug, Clone, Copy)]
pub struct Subscriptions<'a> {
    client: &'a ThriveCart,
}

impl<'a> Subscriptions<'a> {
    pub(crate) fn new(client: &'a ThriveCart) -> Self {
        Self { client }
    }

    /// Cancel an active or paused subscription
    pub async fn cancel(&self, request: &SubscriptionRequest) -> Result<Value> {
        self.client
            .dispatch(Operation::CancelSubscription, &[], to_params(request)?)
            .await
    }

    /// Pause an active subscription, optionally resuming it later
    pub async fn pause(&self, request: &PauseRequest) -> Result<Value> {
        self.client
            .dispatch(Operation::PauseSubscription, &[], to_params(request)?)
            .await
    }

    /// Resume a paused subscription
    pub async fn resume(&self, request: &SubscriptionRequest) -> Result<Value> {
        self.client
            .dispatch(Operation::ResumeSubscription, &[], to_params(request)?)
            .await
    }
}
