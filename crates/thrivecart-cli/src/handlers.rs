//! Command handlers for CLI subcommands
//!
//! Each handler resolves what it needs from the effective [`Config`],
//! calls the library and hands the result to the [`OutputWriter`].
//!
//! [`Config`]: crate::config::Config
//! [`OutputWriter`]: crate::output::OutputWriter

mod api;
mod completions;
mod config;
mod oauth;
mod utils;

pub use api::{
    handle_account, handle_affiliates, handle_catalog, handle_customer, handle_events,
    handle_ping, handle_refund, handle_subscription, handle_transactions,
};
pub use completions::handle_completions;
pub use config::handle_config;
pub use oauth::handle_oauth;
