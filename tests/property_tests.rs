/// Property-based tests using proptest
/// Tests invariants of the metric derivation that should hold for all inputs
use meta_ads_relay::graph_models::{ActionValue, RawAdSet, RawInsightRow};
use meta_ads_relay::metrics::{derive_insight, extract_metric, PURCHASE_ACTION};
use meta_ads_relay::models::AdSetView;
use proptest::prelude::*;

/// Two-decimal rounding through exact decimal formatting (ties to even).
fn to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap()
}

fn action_strategy() -> impl Strategy<Value = ActionValue> {
    (
        prop::sample::select(vec!["purchase", "link_click", "add_to_cart", "lead"]),
        0.0f64..10_000.0,
    )
        .prop_map(|(action_type, value)| ActionValue::new(action_type, value))
}

// Property: ROAS is zero whenever nothing was spent
proptest! {
    #[test]
    fn zero_spend_means_zero_roas(revenue in 0.0f64..1_000_000.0) {
        let row = RawInsightRow {
            adset_id: Some("1".to_string()),
            spend: 0.0,
            actions: None,
            action_values: Some(vec![ActionValue::new(PURCHASE_ACTION, revenue)]),
        };

        prop_assert_eq!(derive_insight(&row).unwrap().roas, 0.0);
    }

    #[test]
    fn roas_is_rounded_ratio(spend in 0.01f64..100_000.0, revenue in 0.0f64..1_000_000.0) {
        let row = RawInsightRow {
            adset_id: None,
            spend,
            actions: None,
            action_values: Some(vec![ActionValue::new(PURCHASE_ACTION, revenue)]),
        };

        let insight = derive_insight(&row).unwrap();
        prop_assert_eq!(insight.roas, to_cents(revenue / spend));
        prop_assert_eq!(insight.spend, to_cents(spend));
        prop_assert_eq!(insight.revenue, to_cents(revenue));

    }
}

// Property: extract_metric picks the first match, or 0
proptest! {
    #[test]
    fn extract_metric_matches_first_purchase(items in prop::collection::vec(action_strategy(), 0..12)) {
        let expected = items
            .iter()
            .find(|item| item.action_type.as_deref() == Some(PURCHASE_ACTION))
            .map(|item| item.numeric_value().unwrap())
            .unwrap_or(0.0);

        prop_assert_eq!(extract_metric(Some(items.as_slice()), PURCHASE_ACTION), Ok(expected));
    }

    #[test]
    fn extract_metric_without_match_is_zero(items in prop::collection::vec(action_strategy(), 0..12)) {
        prop_assert_eq!(extract_metric(Some(items.as_slice()), "offsite_conversion.fb_pixel_custom"), Ok(0.0));
    }

    #[test]
    fn purchases_never_exceed_raw_count(count in 0.0f64..100_000.0) {
        let row = RawInsightRow {
            actions: Some(vec![ActionValue::new(PURCHASE_ACTION, count)]),
            ..Default::default()
        };

        let purchases = derive_insight(&row).unwrap().purchases;
        prop_assert!(purchases as f64 <= count);
        prop_assert!(count - (purchases as f64) < 1.0);
    }
}

// Property: budgets are minor units divided by 100
proptest! {
    #[test]
    fn budgets_scale_by_one_hundred(daily in 0i64..10_000_000, lifetime in 0i64..10_000_000) {
        let view = AdSetView::from(RawAdSet {
            id: "1".to_string(),
            name: "n".to_string(),
            status: "ACTIVE".to_string(),
            campaign_id: "2".to_string(),
            daily_budget: daily,
            lifetime_budget: lifetime,
            budget_remaining: 0,
        });

        prop_assert_eq!(view.daily_budget, daily as f64 / 100.0);
        prop_assert_eq!(view.lifetime_budget, lifetime as f64 / 100.0);
        prop_assert_eq!(view.budget_remaining, 0.0);
    }
}
