//! ThriveCart Core - Typed client for the ThriveCart REST API
//!
//! This crate assembles authenticated requests for ThriveCart's external API,
//! validates parameters before anything is sent, and normalizes responses
//! into JSON values or a single error type.
//!
//! # Main Components
//!
//! - **Error Handling**: One `Error` enum distinguishing validation, transport
//!   and remote failures
//! - **Request Pipeline**: Token substitution, header profiles, query/body
//!   encoding and a pluggable transport
//! - **Validation**: Per-operation rule sets with exact failure messages
//! - **API Client**: `ThriveCart` with resource wrappers for every endpoint
//! - **OAuth**: Authorization endpoints and resource-owner mapping
//!
//! # Example
//!
//! ```no_run
//! use thrivecart_core::{Mode, RefundRequest, Result, ThriveCart};
//!
//! async fn example() -> Result<()> {
//!     let mut client = ThriveCart::new("access-token")?;
//!     client.set_mode(Mode::Test);
//!
//!     client.ping().await?;
//!     client
//!         .refunds()
//!         .create(&RefundRequest {
//!             order_id: 1234,
//!             reference: "product-5".to_string(),
//!             reason: Some("Duplicate order".to_string()),
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod oauth;
pub mod validation;

// Re-export main types for convenience
pub use api::{
    // Client and resource groups
    ThriveCart, Affiliates, Catalog, Customers, Events, Refunds, Subscriptions, Transactions,

    // Endpoint table
    AffiliateAction, CatalogKind, Operation,

    // Typed parameters
    AffiliateQuery, CustomerQuery, EventSubscription, PauseRequest, RefundRequest,
    SubscriptionRequest, TransactionQuery, TransactionType,
};
pub use config::{ClientConfig, Mode};
pub use error::{Error, ErrorKind, Result};
pub use http::{
    AuthScheme, Credentials, HeaderProfile, HeaderSource, Params, RawResponse, RequestBuilder,
    RequestSpec, ReqwestTransport, Transport,
};
pub use oauth::{OAuthConfig, OAuthProvider, ResourceOwner, ResourceOwnerProfile};
pub use validation::{ValidationContext, Validator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
