//! OAuth command handlers

use crate::cli::{AuthorizeUrlArgs, OauthAction, OauthArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use serde_json::json;
use thrivecart_core::{OAuthProvider, ReqwestTransport};
use tracing::Instrument;

/// Handle the oauth subcommands
pub async fn handle_oauth(args: OauthArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        OauthAction::AuthorizeUrl(url_args) => handle_authorize_url(url_args, config, output),
        OauthAction::Me => handle_me(config, output).await,
    }
}

fn handle_authorize_url(args: AuthorizeUrlArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let mut oauth = config.oauth_config(args.client_id.as_deref())?;
    if let Some(redirect_uri) = args.redirect_uri {
        oauth = oauth.with_redirect_uri(redirect_uri);
    }

    let provider = OAuthProvider::new(oauth)?;
    let scopes: Vec<&str> = args.scopes.iter().map(String::as_str).collect();
    let url = provider.authorization_url(&args.state, &scopes)?;

    if output.format() == OutputFormat::Human {
        output.info("Send the merchant to this URL to approve access:")?;
        output.writeln(&url)
    } else {
        output.data(&json!({
            "authorization_url": url,
            "access_token_url": provider.access_token_url(),
            "resource_owner_details_url": provider.resource_owner_details_url(),
        }))
    }
}

async fn handle_me(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let token = config
        .access_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(Error::MissingToken)?;

    let provider = OAuthProvider::new(config.oauth_config(None)?)?;
    let transport = ReqwestTransport::new(config.client_config().timeout)?;

    let timer = Timer::with_details("oauth_request", "resource_owner");
    let spinner = output.spinner("Fetching resource owner");
    let owner = provider
        .fetch_resource_owner(&transport, token)
        .instrument(timer.span().clone())
        .await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let owner = owner?;

    if output.format() == OutputFormat::Human {
        output.response(&serde_json::to_value(owner.profile())?)
    } else {
        output.data(&json!({
            "profile": owner.profile(),
            "response": owner.to_value(),
        }))
    }
}
