//! Endpoint table
//!
//! Each [`Operation`] knows its HTTP method, path template, validator set
//! and the fields that travel as JSON text.

use std::fmt;
use reqwest::Method;
use crate::validation::Validator;

/// Product-like resources sharing the same three read endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Product,
    Bump,
    Upsell,
    Downsell,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Product,
        CatalogKind::Bump,
        CatalogKind::Upsell,
        CatalogKind::Downsell,
    ];

    /// Collection segment, e.g. `products`
    pub fn collection(&self) -> &'static str {
        match self {
            CatalogKind::Product => "products",
            CatalogKind::Bump => "bumps",
            CatalogKind::Upsell => "upsells",
            CatalogKind::Downsell => "downsells",
        }
    }

    /// Path token naming a single item, e.g. `product_id`
    pub fn token(&self) -> &'static str {
        match self {
            CatalogKind::Product => "product_id",
            CatalogKind::Bump => "bump_id",
            CatalogKind::Upsell => "upsell_id",
            CatalogKind::Downsell => "downsell_id",
        }
    }
}

/// Actions addressed to a single affiliate by path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffiliateAction {
    Favorite,
    Unfavorite,
    Register,
    Approve,
    Reject,
    CustomCommissions,
    Delete,
}

impl AffiliateAction {
    pub const ALL: [AffiliateAction; 7] = [
        AffiliateAction::Favorite,
        AffiliateAction::Unfavorite,
        AffiliateAction::Register,
        AffiliateAction::Approve,
        AffiliateAction::Reject,
        AffiliateAction::CustomCommissions,
        AffiliateAction::Delete,
    ];

    /// Final path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            AffiliateAction::Favorite => "favorite",
            AffiliateAction::Unfavorite => "unfavorite",
            AffiliateAction::Register => "register",
            AffiliateAction::Approve => "approve",
            AffiliateAction::Reject => "reject",
            AffiliateAction::CustomCommissions => "custom_commissions",
            AffiliateAction::Delete => "delete",
        }
    }

    /// Verb phrase used in validation messages
    fn verb(&self) -> &'static str {
        match self {
            AffiliateAction::CustomCommissions => "set custom commissions for",
            other => other.as_str(),
        }
    }
}

impl std::str::FromStr for AffiliateAction {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        AffiliateAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| crate::Error::configuration(format!("Unknown affiliate action: {}", s)))
    }
}

/// A remote operation exposed by the REST API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ping,
    Account,
    CatalogList(CatalogKind),
    CatalogItem(CatalogKind),
    PricingOptions(CatalogKind),
    Transactions,
    Customer,
    Refund,
    CancelSubscription,
    PauseSubscription,
    ResumeSubscription,
    Affiliates,
    CreateAffiliate,
    AffiliateLookup,
    Affiliate(AffiliateAction),
    Subscribe,
    Unsubscribe,
}

impl Operation {
    /// Every operation in the table
    pub fn all() -> Vec<Operation> {
        let mut operations = vec![Operation::Ping, Operation::Account];
        for kind in CatalogKind::ALL {
            operations.extend([
                Operation::CatalogList(kind),
                Operation::CatalogItem(kind),
                Operation::PricingOptions(kind),
            ]);
        }
        operations.extend([
            Operation::Transactions,
            Operation::Customer,
            Operation::Refund,
            Operation::CancelSubscription,
            Operation::PauseSubscription,
            Operation::ResumeSubscription,
            Operation::Affiliates,
            Operation::CreateAffiliate,
            Operation::AffiliateLookup,
        ]);
        operations.extend(AffiliateAction::ALL.map(Operation::Affiliate));
        operations.extend([Operation::Subscribe, Operation::Unsubscribe]);
        operations
    }

    pub fn method(&self) -> Method {
        match self {
            Operation::Ping
            | Operation::Account
            | Operation::CatalogList(_)
            | Operation::CatalogItem(_)
            | Operation::PricingOptions(_)
            | Operation::Transactions
            | Operation::Affiliates => Method::GET,
            _ => Method::POST,
        }
    }

    /// Path template relative to the API root
    pub fn path(&self) -> String {
        match self {
            Operation::Ping => "/ping".to_string(),
            Operation::Account => "/".to_string(),
            Operation::CatalogList(kind) => format!("/{}", kind.collection()),
            Operation::CatalogItem(kind) => format!("/{}/{{{}}}", kind.collection(), kind.token()),
            Operation::PricingOptions(kind) => {
                format!("/{}/{{{}}}/pricing_options", kind.collection(), kind.token())
            }
            Operation::Transactions => "/transactions".to_string(),
            Operation::Customer => "/customer".to_string(),
            Operation::Refund => "/refund".to_string(),
            Operation::CancelSubscription => "/cancelSubscription".to_string(),
            Operation::PauseSubscription => "/pauseSubscription".to_string(),
            Operation::ResumeSubscription => "/resumeSubscription".to_string(),
            Operation::Affiliates | Operation::CreateAffiliate => "/affiliates".to_string(),
            Operation::AffiliateLookup => "/affiliate".to_string(),
            Operation::Affiliate(action) => format!("/affiliates/{{affiliate_id}}/{}", action.as_str()),
            Operation::Subscribe => "/subscribe".to_string(),
            Operation::Unsubscribe => "/unsubscribe".to_string(),
        }
    }

    /// Path tokens the template expects
    pub fn path_tokens(&self) -> &'static [&'static str] {
        match self {
            Operation::CatalogItem(kind) | Operation::PricingOptions(kind) => match kind {
                CatalogKind::Product => &["product_id"],
                CatalogKind::Bump => &["bump_id"],
                CatalogKind::Upsell => &["upsell_id"],
                CatalogKind::Downsell => &["downsell_id"],
            },
            Operation::Affiliate(_) => &["affiliate_id"],
            _ => &[],
        }
    }

    /// Rules run before the request is built
    pub fn validator(&self) -> Validator {
        match self {
            Operation::Transactions => Validator::transactions(),
            Operation::Customer => Validator::customer(),
            Operation::Refund => Validator::refund(),
            Operation::CancelSubscription => Validator::cancel_subscription(),
            Operation::PauseSubscription => Validator::pause_subscription(),
            Operation::ResumeSubscription => Validator::resume_subscription(),
            Operation::Affiliates => Validator::affiliates(),
            Operation::AffiliateLookup => Validator::affiliate_lookup(),
            Operation::Affiliate(action) => Validator::affiliate_action(action.verb()),
            Operation::Subscribe => Validator::event_subscribe(),
            Operation::Unsubscribe => Validator::event_unsubscribe(),
            _ => Validator::none(),
        }
    }

    /// Fields sent as JSON text when supplied as structured values
    pub fn json_encoded_fields(&self) -> &'static [&'static str] {
        match self {
            Operation::CreateAffiliate
            | Operation::Affiliate(AffiliateAction::Register)
            | Operation::Affiliate(AffiliateAction::CustomCommissions) => &["product_ids"],
            _ => &[],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Ping => f.write_str("ping"),
            Operation::Account => f.write_str("account"),
            Operation::CatalogList(kind) => write!(f, "{}.list", kind.collection()),
            Operation::CatalogItem(kind) => write!(f, "{}.get", kind.collection()),
            Operation::PricingOptions(kind) => write!(f, "{}.pricing_options", kind.collection()),
            Operation::Transactions => f.write_str("transactions.list"),
            Operation::Customer => f.write_str("customer.get"),
            Operation::Refund => f.write_str("refund.create"),
            Operation::CancelSubscription => f.write_str("subscription.cancel"),
            Operation::PauseSubscription => f.write_str("subscription.pause"),
            Operation::ResumeSubscription => f.write_str("subscription.resume"),
            Operation::Affiliates => f.write_str("affiliates.list"),
            Operation::CreateAffiliate => f.write_str("affiliates.create"),
            Operation::AffiliateLookup => f.write_str("affiliates.lookup"),
            Operation::Affiliate(action) => write!(f, "affiliates.{}", action.as_str()),
            Operation::Subscribe => f.write_str("events.subscribe"),
            Operation::Unsubscribe => f.write_str("events.unsubscribe"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_paths() {
        assert_eq!(Operation::CatalogList(CatalogKind::Product).path(), "/products");
        assert_eq!(Operation::CatalogItem(CatalogKind::Bump).path(), "/bumps/{bump_id}");
        assert_eq!(
            Operation::PricingOptions(CatalogKind::Downsell).path(),
            "/downsells/{downsell_id}/pricing_options"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(Operation::Transactions.method(), Method::GET);
        assert_eq!(Operation::Affiliates.method(), Method::GET);
        assert_eq!(Operation::CreateAffiliate.method(), Method::POST);
        assert_eq!(Operation::Customer.method(), Method::POST);
        assert_eq!(Operation::Affiliate(AffiliateAction::Delete).method(), Method::POST);
    }

    #[test]
    fn test_affiliate_action_paths() {
        assert_eq!(
            Operation::Affiliate(AffiliateAction::CustomCommissions).path(),
            "/affiliates/{affiliate_id}/custom_commissions"
        );
        assert_eq!("approve".parse::<AffiliateAction>().unwrap(), AffiliateAction::Approve);
        assert!("promote".parse::<AffiliateAction>().is_err());
    }

    #[test]
    fn test_path_tokens_match_templates() {
        for operation in Operation::all() {
            let path = operation.path();
            for token in operation.path_tokens() {
                assert!(path.contains(&format!("{{{}}}", token)), "{} lacks {}", operation, token);
            }
            assert_eq!(path.matches('{').count(), operation.path_tokens().len(), "{}", operation);
        }
    }

    #[test]
    fn test_table_size() {
        // ping, account, 4 x 3 catalog reads, 9 fixed operations, 7 affiliate actions, 2 events
        assert_eq!(Operation::all().len(), 32);
    }

    #[test]
    fn test_json_encoded_fields() {
        assert_eq!(Operation::CreateAffiliate.json_encoded_fields(), &["product_ids"]);
        assert!(Operation::Affiliate(AffiliateAction::Approve).json_encoded_fields().is_empty());
    }

    #[test]
    fn test_custom_commissions_message() {
        let validator = Operation::Affiliate(AffiliateAction::CustomCommissions).validator();
        let err = validator
            .validate(&Default::default(), &[], &crate::validation::ValidationContext::at(0))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "You must provide an affiliate identifier to set custom commissions for an affiliate."
        );
    }
}
