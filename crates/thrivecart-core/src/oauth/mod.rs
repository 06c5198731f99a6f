//! OAuth2 helpers for apps acting on behalf of a ThriveCart account
//!
//! The authorization-code exchange itself is left to a general OAuth2
//! client. This module supplies the endpoint URLs, the provider's error
//! check and the resource-owner projection.

pub mod provider;
pub mod resource_owner;

pub use provider::{OAuthConfig, OAuthProvider, SCOPE_SEPARATOR};
pub use resource_owner::{ResourceOwner, ResourceOwnerProfile};
