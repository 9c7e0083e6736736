use chrono::NaiveTime;
use dispatch_core::orders::{Priority, TrafficLevel};
use dispatch_core::scoring::{parse_reply, score_orders, ExtractionTier};
use dispatch_core::test_helpers::{sample_order, ScriptedOracle};
use dispatch_core::traffic::TrafficRules;

fn evening() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).expect("time")
}

const REPLY: &str =
    r#"[{"id":"SJ-1000","profitabilityScore":90,"trafficLevel":"High","trafficDelayMin":10}]"#;

#[test]
fn single_analysis_ranks_its_order_first() {
    let orders = vec![
        sample_order("SJ-1002", 9),
        sample_order("SJ-1000", 12),
        sample_order("SJ-1001", 6),
    ];
    let scored = score_orders(
        &ScriptedOracle::replying(REPLY),
        &orders,
        evening(),
        &TrafficRules::default(),
    );

    assert_eq!(scored.len(), 3);
    assert_eq!(scored[0].id, "SJ-1000");
    assert_eq!(scored[0].estimated_time_min, 22);
    assert_eq!(scored[0].priority, Priority::High);
    assert_eq!(scored[0].traffic_level, Some(TrafficLevel::High));
    // The others were not mentioned: defaults, original relative order.
    assert_eq!(scored[1].id, "SJ-1002");
    assert_eq!(scored[1].profitability_score, Some(50.0));
    assert_eq!(scored[2].id, "SJ-1001");
    for order in &scored {
        assert!(order.estimated_time_min >= order.base_time_min);
    }
}

#[test]
fn prose_wrapped_reply_is_extracted() {
    let raw = format!("Here: {REPLY} done");
    let parsed = parse_reply(&raw).expect("parse");
    assert_eq!(parsed.tier, ExtractionTier::BracketScan);

    let orders = vec![sample_order("SJ-1000", 12)];
    let scored = score_orders(
        &ScriptedOracle::replying(&raw),
        &orders,
        evening(),
        &TrafficRules::default(),
    );
    assert_eq!(scored[0].estimated_time_min, 22);
}

#[test]
fn failed_oracle_returns_input_in_original_order() {
    let orders = vec![
        sample_order("SJ-1003", 9),
        sample_order("SJ-1000", 12),
        sample_order("SJ-1001", 6),
    ];
    let oracle = ScriptedOracle::failing("503 Service Unavailable");
    let result = score_orders(&oracle, &orders, evening(), &TrafficRules::default());

    assert_eq!(oracle.calls(), 1);
    assert_eq!(result, orders);
}

#[test]
fn unusable_entries_do_not_discard_the_rest_of_the_reply() {
    let orders = vec![sample_order("SJ-1001", 9), sample_order("SJ-1000", 12)];
    let replies = [
        r#"[{"id":"SJ-1000","profitabilityScore":90,"trafficLevel":"High","trafficDelayMin":10},{"profitabilityScore":40}]"#,
        r#"[{"id":"SJ-1000","profitabilityScore":90,"trafficLevel":"High","trafficDelayMin":10},null]"#,
    ];

    for reply in replies {
        let scored = score_orders(
            &ScriptedOracle::replying(reply),
            &orders,
            evening(),
            &TrafficRules::default(),
        );
        assert_eq!(scored[0].id, "SJ-1000");
        assert_eq!(scored[0].estimated_time_min, 22);
        assert_eq!(scored[1].id, "SJ-1001");
        assert_eq!(scored[1].profitability_score, Some(50.0));
        assert_eq!(scored[1].traffic_level, Some(TrafficLevel::Low));
    }
}
