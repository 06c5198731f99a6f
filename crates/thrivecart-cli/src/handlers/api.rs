//! Handlers for the REST API subcommands

use super::utils::{build_client, parse_json_object, parse_trigger_field, send};
use crate::cli::{
    AffiliatesAction, AffiliatesArgs, CatalogArgs, CustomerArgs, EventsAction, EventsArgs,
    RefundArgs, SubscriptionAction, SubscriptionArgs, TransactionsArgs,
};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde_json::Value;
use thrivecart_core::{
    AffiliateAction, AffiliateQuery, CatalogKind, EventSubscription, Operation, Params,
    PauseRequest, RefundRequest, SubscriptionRequest, TransactionQuery,
};

/// Handle the ping command
pub async fn handle_ping(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let response = send(output, &Operation::Ping.to_string(), client.ping()).await?;

    output.success(&format!("ThriveCart API reachable ({} mode)", client.mode()))?;
    output.response(&response)
}

/// Handle the account command
pub async fn handle_account(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let response = send(output, &Operation::Account.to_string(), client.account()).await?;
    output.response(&response)
}

/// Handle products, bumps, upsells and downsells
pub async fn handle_catalog(
    kind: CatalogKind,
    args: CatalogArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let client = build_client(config)?;
    let catalog = client.catalog(kind);

    let response = match (&args.id, args.pricing_options) {
        (Some(id), true) => {
            let label = Operation::PricingOptions(kind).to_string();
            send(output, &label, catalog.pricing_options(id)).await?
        }
        (Some(id), false) => {
            let label = Operation::CatalogItem(kind).to_string();
            send(output, &label, catalog.get(id)).await?
        }
        (None, _) => {
            let mut filters = Params::new();
            if let Some(status) = args.status {
                let mode: thrivecart_core::Mode = status.into();
                filters.insert("status".to_string(), Value::String(mode.to_string()));
            }
            let label = Operation::CatalogList(kind).to_string();
            send(output, &label, catalog.list_with(filters)).await?
        }
    };

    output.response(&response)
}

/// Handle the transactions command
pub async fn handle_transactions(
    args: TransactionsArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let client = build_client(config)?;
    let query = TransactionQuery {
        query: args.query,
        transaction_type: args.transaction_type.map(Into::into),
        per_page: args.per_page,
        page: args.page,
    };

    let response = send(
        output,
        &Operation::Transactions.to_string(),
        client.transactions().list(&query),
    )
    .await?;
    output.response(&response)
}

/// Handle the customer command
pub async fn handle_customer(
    args: CustomerArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let client = build_client(config)?;
    let response = send(
        output,
        &Operation::Customer.to_string(),
        client.customers().get(args.email),
    )
    .await?;
    output.response(&response)
}

/// Handle the refund command
pub async fn handle_refund(args: RefundArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let request = RefundRequest {
        order_id: args.order_id,
        reference: args.reference,
        reason: args.reason,
    };

    let response = send(
        output,
        &Operation::Refund.to_string(),
        client.refunds().create(&request),
    )
    .await?;

    output.success(&format!(
        "Refund requested for {} on order {}",
        request.reference, request.order_id
    ))?;
    output.response(&response)
}

/// Handle subscription cancel, pause and resume
pub async fn handle_subscription(
    args: SubscriptionArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let client = build_client(config)?;
    let subscriptions = client.subscriptions();

    let (operation, response) = match args.action {
        SubscriptionAction::Cancel(ids) => {
            let request = SubscriptionRequest {
                order_id: ids.order_id,
                subscription_id: ids.subscription_id,
            };
            let operation = Operation::CancelSubscription;
            (operation, send(output, &operation.to_string(), subscriptions.cancel(&request)).await?)
        }
        SubscriptionAction::Pause(pause) => {
            let request = PauseRequest {
                auto_resume: pause.auto_resume,
                ..PauseRequest::new(pause.ids.order_id, pause.ids.subscription_id)
            };
            let operation = Operation::PauseSubscription;
            (operation, send(output, &operation.to_string(), subscriptions.pause(&request)).await?)
        }
        SubscriptionAction::Resume(ids) => {
            let request = SubscriptionRequest {
                order_id: ids.order_id,
                subscription_id: ids.subscription_id,
            };
            let operation = Operation::ResumeSubscription;
            (operation, send(output, &operation.to_string(), subscriptions.resume(&request)).await?)
        }
    };

    output.success(&format!("{} completed", operation))?;
    output.response(&response)
}

/// Handle the affiliates subcommands
pub async fn handle_affiliates(
    args: AffiliatesArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let client = build_client(config)?;
    let affiliates = client.affiliates();

    let response = match args.action {
        AffiliatesAction::List(list) => {
            let query = AffiliateQuery {
                product_id: list.product_id,
                query: list.query,
                per_page: list.per_page,
                page: list.page,
            };
            send(output, &Operation::Affiliates.to_string(), affiliates.list(&query)).await?
        }
        AffiliatesAction::Lookup { affiliate_id } => {
            send(
                output,
                &Operation::AffiliateLookup.to_string(),
                affiliates.lookup(affiliate_id),
            )
            .await?
        }
        AffiliatesAction::Create { data } => {
            let fields = parse_json_object(&data)?;
            send(output, &Operation::CreateAffiliate.to_string(), affiliates.create(fields)).await?
        }
        AffiliatesAction::Action {
            action,
            affiliate_id,
            data,
        } => {
            let action: AffiliateAction = action.into();
            let payload = match data {
                Some(data) => parse_json_object(&data)?,
                None => Params::new(),
            };
            let label = Operation::Affiliate(action).to_string();
            send(output, &label, affiliates.action(action, &affiliate_id, payload)).await?
        }
    };

    output.response(&response)
}

/// Handle the events subcommands
pub async fn handle_events(args: EventsArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let client = build_client(config)?;
    let events = client.events();

    let response = match args.action {
        EventsAction::Subscribe {
            event,
            target_url,
            trigger_fields,
        } => {
            let mut subscription = EventSubscription::new(event, target_url);
            for field in &trigger_fields {
                let (name, value) = parse_trigger_field(field)?;
                subscription = subscription.with_trigger_field(name, value);
            }
            send(output, &Operation::Subscribe.to_string(), events.subscribe(&subscription)).await?
        }
        EventsAction::Unsubscribe { target_url } => {
            send(output, &Operation::Unsubscribe.to_string(), events.unsubscribe(target_url)).await?
        }
    };

    output.response(&response)
}
