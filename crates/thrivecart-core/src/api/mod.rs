//! Public API surface
//!
//! [`ThriveCart`] owns an [`HttpClient`] and exposes the generic
//! [`ThriveCart::request`] primitive plus [`ThriveCart::dispatch`], which
//! runs an [`Operation`] through validation, normalization, building and
//! transport. Resource groups are thin wrappers borrowing the client:
//!
//! ```no_run
//! # async fn run() -> thrivecart_core::Result<()> {
//! use thrivecart_core::{ThriveCart, TransactionQuery};
//!
//! let client = ThriveCart::new("access-token")?;
//! let products = client.products().list().await?;
//! let page = client
//!     .transactions()
//!     .list(&TransactionQuery { per_page: Some(25), ..Default::default() })
//!     .await?;
//! # let _ = (products, page);
//! # Ok(())
//! # }
//! ```

pub mod affiliates;
pub mod catalog;
pub mod customers;
pub mod endpoint;
pub mod events;
pub mod params;
pub mod refunds;
pub mod subscriptions;
pub mod transactions;

use std::sync::Arc;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument};
use crate::config::{ClientConfig, Mode};
use crate::http::{Credentials, HttpClient, Params, Transport};
use crate::validation::ValidationContext;
use crate::Result;

pub use affiliates::Affiliates;
pub use catalog::Catalog;
pub use customers::Customers;
pub use endpoint::{AffiliateAction, CatalogKind, Operation};
pub use events::Events;
pub use params::{
    AffiliateQuery, CustomerQuery, EventSubscription, PauseRequest, RefundRequest,
    SubscriptionRequest, TransactionQuery, TransactionType,
};
pub use refunds::Refunds;
pub use subscriptions::Subscriptions;
pub use transactions::Transactions;

/// Client for the ThriveCart REST API
#[derive(Debug, Clone)]
pub struct ThriveCart {
    http: HttpClient,
}

impl ThriveCart {
    /// Create a client with default configuration
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_config(access_token, ClientConfig::default())
    }

    /// Create a client reading the token from `THRIVECART_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Ok(Self {
            http: HttpClient::new(credentials, ClientConfig::default())?,
        })
    }

    pub fn with_config(access_token: impl Into<String>, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(Credentials::new(access_token), config)?,
        })
    }

    /// Create a client that sends through a custom transport
    pub fn with_transport(
        access_token: impl Into<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_transport(Credentials::new(access_token), config, transport)?,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    pub fn mode(&self) -> Mode {
        self.http.config().mode
    }

    /// Switch this client between live and test mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.http.set_mode(mode);
    }

    /// Point this client at another environment
    pub fn set_base_uri(&mut self, base_uri: impl Into<String>) -> Result<()> {
        self.http.set_base_uri(base_uri)
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Send an arbitrary request without validation
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        tokens: &[(&str, &str)],
        params: Option<&Params>,
    ) -> Result<Value> {
        self.http.request(method, path, tokens, params).await
    }

    /// Run an operation through the full pipeline
    ///
    /// Validation failures return before anything is built or sent.
    #[instrument(skip(self, tokens, payload), fields(operation = %operation, mode = %self.mode()))]
    pub async fn dispatch(
        &self,
        operation: Operation,
        tokens: &[(&str, &str)],
        payload: Params,
    ) -> Result<Value> {
        operation
            .validator()
            .validate(&payload, tokens, &ValidationContext::current())
            .map_err(|e| {
                debug!(error = %e, "validation failed");
                e
            })?;

        let payload = params::encode_json_fields(payload, operation.json_encoded_fields())?;
        self.http
            .request(operation.method(), &operation.path(), tokens, Some(&payload))
            .await
    }

    /// `GET /ping`
    pub async fn ping(&self) -> Result<Value> {
        self.dispatch(Operation::Ping, &[], Params::new()).await
    }

    /// `GET /` account details for the token's owner
    pub async fn account(&self) -> Result<Value> {
        self.dispatch(Operation::Account, &[], Params::new()).await
    }

    pub fn products(&self) -> Catalog<'_> {
        Catalog::new(self, CatalogKind::Product)
    }

    pub fn bumps(&self) -> Catalog<'_> {
        Catalog::new(self, CatalogKind::Bump)
    }

    pub fn upsells(&self) -> Catalog<'_> {
        Catalog::new(self, CatalogKind::Upsell)
    }

    pub fn downsells(&self) -> Catalog<'_> {
        Catalog::new(self, CatalogKind::Downsell)
    }

    pub fn catalog(&self, kind: CatalogKind) -> Catalog<'_> {
        Catalog::new(self, kind)
    }

    pub fn transactions(&self) -> Transactions<'_> {
        Transactions::new(self)
    }

    pub fn customers(&self) -> Customers<'_> {
        Customers::new(self)
    }

    pub fn refunds(&self) -> Refunds<'_> {
        Refunds::new(self)
    }

    pub fn subscriptions(&self) -> Subscriptions<'_> {
        Subscriptions::new(self)
    }

    pub fn affiliates(&self) -> Affiliates<'_> {
        Affiliates::new(self)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }
}
