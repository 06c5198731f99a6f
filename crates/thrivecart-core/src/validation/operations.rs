//! Per-operation validator sets
//!
//! Rule order is significant: rules run top to bottom and the first failure
//! is reported.

use super::rules::{Check, Rule, MIN_AUTO_RESUME_OFFSET};
use super::ValidationContext;
use crate::http::Params;
use crate::Result;

/// Accepted values for `transactionType`
pub const TRANSACTION_TYPES: &[&str] = &["any", "charge", "rebill", "refund", "cancel"];

/// Largest accepted `perPage`
pub const MAX_PER_PAGE: f64 = 25.0;

/// Longest accepted refund reason, in characters
pub const MAX_REFUND_REASON: usize = 200;

/// Ordered set of rules for one operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validator {
    rules: Vec<Rule>,
}

impl Validator {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// A validator that accepts everything
    pub fn none() -> Self {
        Self::default()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, stopping at the first failure
    pub fn validate(
        &self,
        payload: &Params,
        tokens: &[(&str, &str)],
        ctx: &ValidationContext,
    ) -> Result<()> {
        self.rules
            .iter()
            .try_for_each(|rule| rule.evaluate(payload, tokens, ctx))
    }

    /// `GET /transactions`
    pub fn transactions() -> Self {
        let mut rules = vec![Rule::new(
            "transactionType",
            Check::OneOf(TRANSACTION_TYPES),
            r#"Invalid transaction type provided (you provided "{value}")."#,
        )];
        rules.extend(pagination_rules());
        Self::new(rules)
    }

    /// `POST /customer`
    pub fn customer() -> Self {
        Self::new(vec![
            Rule::new("email", Check::Required, "You must provide an email address."),
            Rule::new(
                "email",
                Check::Email,
                r#"You must provide a valid email address (you provided "{value}")."#,
            ),
        ])
    }

    /// `POST /refund`
    pub fn refund() -> Self {
        Self::new(vec![
            Rule::new(
                "order_id",
                Check::RequiredNumeric,
                r#"You must provide a valid order ID to refund (you provided "{value}")."#,
            ),
            Rule::new(
                "reference",
                Check::Required,
                r#"You must provide a valid item reference to refund (you provided "{value}")."#,
            ),
            Rule::new(
                "reason",
                Check::MaxLength(MAX_REFUND_REASON),
                r#"Your reason for this refund must be shorter than 200 characters (yours was "{value}")."#,
            ),
        ])
    }

    /// `POST /cancelSubscription`
    pub fn cancel_subscription() -> Self {
        Self::new(subscription_rules("cancel"))
    }

    /// `POST /pauseSubscription`
    pub fn pause_subscription() -> Self {
        let mut rules = subscription_rules("pause");
        rules.extend([
            Rule::new(
                "auto_resume",
                Check::NumericIfPresent,
                r#"If automatically resume a subscription, you must provide it as a Unix timestamp (you provided "{value}")."#,
            ),
            Rule::new(
                "auto_resume",
                Check::AfterNow,
                "You cannot auto-resume a subscription in the past. Check your timestamp.",
            ),
            Rule::new(
                "auto_resume",
                Check::AtLeastSecondsFromNow(MIN_AUTO_RESUME_OFFSET),
                "You cannot auto-resume a subscription within a day from right now - please provide a time further in the future.",
            ),
        ]);
        Self::new(rules)
    }

    /// `POST /resumeSubscription`
    pub fn resume_subscription() -> Self {
        Self::new(subscription_rules("resume"))
    }

    /// `GET /affiliates`
    pub fn affiliates() -> Self {
        let mut rules = vec![Rule::new(
            "product_id",
            Check::PositiveIfPresent,
            "You must provide a numeric product ID, or leave this field blank to exclude it.",
        )];
        rules.extend(pagination_rules());
        Self::new(rules)
    }

    /// `POST /affiliate`
    pub fn affiliate_lookup() -> Self {
        Self::new(vec![
            Rule::new(
                "affiliate_id",
                Check::Required,
                "You must provide an affiliate identifier to look up a single affiliate.",
            ),
            Rule::new(
                "affiliate_id",
                Check::EmailIfContainsAt,
                r#"You must provide a valid email address, if searching via email address (you provided "{value}")."#,
            ),
        ])
    }

    /// `POST /affiliates/{affiliate_id}/<action>`
    pub fn affiliate_action(action: &str) -> Self {
        Self::new(vec![Rule::new(
            "affiliate_id",
            Check::Required,
            format!("You must provide an affiliate identifier to {} an affiliate.", action),
        )])
    }

    /// `POST /subscribe`
    pub fn event_subscribe() -> Self {
        let mut rules = vec![Rule::new(
            "event",
            Check::Required,
            "You must provide a valid event name to create an event subscription.",
        )];
        rules.extend(target_url_rules("create"));
        Self::new(rules)
    }

    /// `POST /unsubscribe`
    pub fn event_unsubscribe() -> Self {
        Self::new(target_url_rules("cancel"))
    }
}

fn pagination_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "perPage",
            Check::NumericAtLeast(0.0),
            r#"You must provide a valid number for the perPage parameter (you provided "{value}")."#,
        ),
        Rule::new(
            "perPage",
            Check::AtMost(MAX_PER_PAGE),
            r#"The maximum results per page is 25 (you requested "{value}")."#,
        ),
        Rule::new(
            "page",
            Check::NonEmptyNumericIfPresent,
            r#"You must provide a valid number for the page parameter (you provided "{value}")."#,
        ),
    ]
}

fn subscription_rules(verb: &str) -> Vec<Rule> {
    vec![
        Rule::new(
            "order_id",
            Check::RequiredNumeric,
            format!(
                r#"You must provide a valid order ID to {} (you provided "{{value}}")."#,
                verb
            ),
        ),
        Rule::new(
            "subscription_id",
            Check::RequiredNumeric,
            format!(
                r#"You must provide a valid subscription ID to {} (you provided "{{value}}")."#,
                verb
            ),
        ),
    ]
}

fn target_url_rules(verb: &str) -> Vec<Rule> {
    vec![
        Rule::new(
            "target_url",
            Check::Required,
            format!("You must provide a target URL to {} an event subscription.", verb),
        ),
        Rule::new(
            "target_url",
            Check::Url,
            format!("You must provide a valid target URL to {} an event subscription.", verb),
        ),
    ]
}
