//! Property-based tests for validation and request building
//!
//! These tests verify invariants that must hold for all inputs.

use proptest::prelude::*;
use serde_json::{json, Value};
use thrivecart_core::http::{Credentials, Method, RequestBuilder};
use thrivecart_core::{ClientConfig, Params, ValidationContext, Validator};

const NOW: i64 = 1_700_000_000;

fn params(value: Value) -> Params {
    value.as_object().cloned().unwrap_or_default()
}

fn pause_payload(auto_resume: i64) -> Params {
    params(json!({"order_id": 1, "subscription_id": 2, "auto_resume": auto_resume}))
}

proptest! {
    #[test]
    fn per_page_outside_range_is_rejected(per_page in prop_oneof![-1000i64..0, 26i64..1000]) {
        let payload = params(json!({"perPage": per_page}));
        let ctx = ValidationContext::at(NOW);
        prop_assert!(Validator::transactions().validate(&payload, &[], &ctx).is_err());
        prop_assert!(Validator::affiliates().validate(&payload, &[], &ctx).is_err());
    }

    #[test]
    fn per_page_inside_range_is_accepted(per_page in 0i64..=25) {
        let payload = params(json!({"perPage": per_page}));
        let ctx = ValidationContext::at(NOW);
        prop_assert!(Validator::transactions().validate(&payload, &[], &ctx).is_ok());
    }

    #[test]
    fn auto_resume_within_a_day_is_rejected(offset in -100_000i64..86_399) {
        let ctx = ValidationContext::at(NOW);
        prop_assert!(Validator::pause_subscription()
            .validate(&pause_payload(NOW + offset), &[], &ctx)
            .is_err());
    }

    #[test]
    fn auto_resume_a_day_ahead_is_accepted(offset in 86_399i64..10_000_000) {
        let ctx = ValidationContext::at(NOW);
        prop_assert!(Validator::pause_subscription()
            .validate(&pause_payload(NOW + offset), &[], &ctx)
            .is_ok());
    }

    #[test]
    fn build_is_idempotent(
        id in "[a-z0-9]{1,12}",
        status in "[a-z]{1,8}",
        post in any::<bool>(),
    ) {
        let builder = RequestBuilder::new(&ClientConfig::default(), Credentials::new("tok"));
        let payload = params(json!({"status": status}));
        let method = if post { Method::POST } else { Method::GET };
        let tokens = [("product_id", id.as_str())];

        let first = builder.build(method.clone(), "/products/{product_id}", &tokens, Some(&payload));
        let second = builder.build(method, "/products/{product_id}", &tokens, Some(&payload));
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.path, format!("/products/{}", id));
    }

    #[test]
    fn numeric_order_ids_pass_refund_check(order_id in 1i64..i64::MAX) {
        let payload = params(json!({"order_id": order_id.to_string(), "reference": "ref"}));
        prop_assert!(Validator::refund()
            .validate(&payload, &[], &ValidationContext::at(NOW))
            .is_ok());
    }
}
